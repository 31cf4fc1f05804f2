//! HTTP client wrapper for gateway traffic

mod client;

pub use client::{HttpClient, HttpClientBuilder};
