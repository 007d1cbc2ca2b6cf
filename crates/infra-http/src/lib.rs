// Pubhub Infrastructure - HTTP Adapter
// Implements: HttpTransport (reqwest, API key injection, connection retries)

pub mod config;
pub mod reqwest_transport;

pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use reqwest_transport::ReqwestTransport;
