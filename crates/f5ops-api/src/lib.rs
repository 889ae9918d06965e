// f5ops-api: Async Rust client for the F5 BIG-IP iControl REST API

pub mod auth;
pub mod client;
pub mod error;
pub mod outcome;
pub mod transport;

pub use auth::{ConnectionTarget, Credentials, DEFAULT_PASSWORD, DEFAULT_PORT, DEFAULT_USER};
pub use client::DeviceClient;
pub use error::Error;
pub use outcome::{AUTH_REQUIRED_BODY, Classification, Outcome, RawResponse};
pub use reqwest::{Method, StatusCode};
pub use transport::{TlsMode, TransportConfig};
