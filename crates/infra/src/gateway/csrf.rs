//! Anti-forgery token handshake
//!
//! Every state-changing gateway call must present a one-time CSRF token and
//! the session cookie the gateway issued alongside it. The handshake is a
//! priming GET against the service root with the `X-CSRF-Token: Fetch`
//! sentinel header.
//!
//! Sessions are never reused across operations: the gateway may invalidate
//! tokens between calls, so the handshake runs fresh immediately before
//! every protected request. One extra round trip per write buys
//! correctness.

use gatelink_domain::{ErrorOutcome, GatewayErrorKind, GatewayResult};
use reqwest::header::SET_COOKIE;
use reqwest::Method;
use tracing::debug;

use crate::gateway::errors::{classify_response, classify_transport};
use crate::http::HttpClient;

/// Header carrying the anti-forgery token in both directions
const CSRF_TOKEN_HEADER: &str = "x-csrf-token";

/// Token plus correlated session cookie for one mutating call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfSession {
    pub token: String,
    /// All gateway `Set-Cookie` values with their attributes stripped,
    /// joined into one `Cookie` header value
    pub cookie_header: String,
}

/// Run the priming request and extract the one-time session.
///
/// `authorization` is the current service credential; `service_root` is the
/// OData service base path the mutating call will target.
pub async fn fetch_csrf_session(
    http: &HttpClient,
    base_url: &str,
    service_root: &str,
    authorization: &str,
    sap_client: &str,
) -> GatewayResult<CsrfSession> {
    let url = format!("{}{}", base_url, service_root);
    let request = http
        .request(Method::GET, &url)
        .header("Authorization", authorization)
        .header(CSRF_TOKEN_HEADER, "Fetch")
        .header("Accept", "application/json")
        .header("sap-client", sap_client);

    let response = http.send(request).await.map_err(|err| classify_transport(&err))?;
    let status = response.status();

    let token = response
        .headers()
        .get(CSRF_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let cookie_header = join_cookie_values(
        response.headers().get_all(SET_COOKIE).iter().filter_map(|value| value.to_str().ok()),
    );

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(classify_response(status.as_u16(), &body));
    }

    let Some(token) = token else {
        return Err(ErrorOutcome::new(
            GatewayErrorKind::UnknownError,
            "Gateway did not return an anti-forgery token",
        ));
    };

    debug!(cookies = cookie_header.split("; ").count(), "anti-forgery session obtained");
    Ok(CsrfSession { token, cookie_header })
}

/// Keep the `name=value` pair of each cookie and drop its attributes.
fn join_cookie_values<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values
        .filter_map(|value| value.split(';').next())
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}
