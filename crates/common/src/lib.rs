//! # Gatelink Common
//!
//! Cross-cutting support code with no domain knowledge.
//!
//! This crate contains:
//! - Time abstraction (`Clock`, `SystemClock`, `MockClock`)
//!
//! ## Architecture
//! - No dependencies on other Gatelink crates
//! - Safe to use from every layer

pub mod time;

pub use time::{Clock, MockClock, SystemClock};
