//! Service credential management
//!
//! The gateway accepts a long-lived Basic credential built from fixed
//! service identity material. The credential is created lazily on first use
//! and regenerated once its 8-hour horizon passes.
//!
//! Concurrency: the cache sits behind an `RwLock`. Near expiry, two
//! in-flight calls may both regenerate; since generation is a pure
//! transform with no network round trip, the duplicate work is harmless.
//! Should credential issuance ever become network-bound, refreshes must be
//! serialized behind a single-flight lock instead.

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use gatelink_common::time::Clock;
use parking_lot::RwLock;
use tracing::debug;

/// Credential lifetime before a lazy refresh
const CREDENTIAL_HORIZON: Duration = Duration::from_secs(8 * 60 * 60);

/// The long-lived service credential presented on every gateway call
#[derive(Debug, Clone)]
pub struct ServiceCredential {
    /// Full Authorization header value (`Basic <base64>`)
    pub value: String,
    pub issued_at: SystemTime,
    pub expires_at: SystemTime,
}

/// Owns the process-wide service credential and refreshes it on expiry
///
/// Exactly one live credential exists per manager; it is never persisted
/// and is invalidated only by time.
pub struct CredentialManager {
    username: String,
    password: String,
    clock: Arc<dyn Clock>,
    current: RwLock<Option<ServiceCredential>>,
}

impl CredentialManager {
    pub fn new(username: impl Into<String>, password: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            clock,
            current: RwLock::new(None),
        }
    }

    /// Return a credential value valid at the current clock time.
    ///
    /// Idempotent and safe to call before every remote request: the cached
    /// value is returned while `now < expires_at`, otherwise a fresh
    /// credential replaces it with a new `now + 8h` horizon.
    pub fn valid_token(&self) -> String {
        let now = self.clock.system_time();

        {
            let guard = self.current.read();
            if let Some(credential) = guard.as_ref() {
                if now < credential.expires_at {
                    return credential.value.clone();
                }
            }
        }

        let mut guard = self.current.write();
        // A concurrent caller may have refreshed while we waited for the
        // write lock; reuse its credential when still fresh.
        if let Some(credential) = guard.as_ref() {
            if now < credential.expires_at {
                return credential.value.clone();
            }
        }

        debug!("regenerating gateway service credential");
        let credential = self.generate(now);
        let value = credential.value.clone();
        *guard = Some(credential);
        value
    }

    /// Snapshot of the current credential, if one has been generated.
    pub fn snapshot(&self) -> Option<ServiceCredential> {
        self.current.read().clone()
    }

    fn generate(&self, now: SystemTime) -> ServiceCredential {
        let encoded = STANDARD.encode(format!("{}:{}", self.username, self.password));
        ServiceCredential {
            value: format!("Basic {}", encoded),
            issued_at: now,
            expires_at: now + CREDENTIAL_HORIZON,
        }
    }
}
