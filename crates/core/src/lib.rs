// Pubhub Core - Domain models, ports and resource services
// NO infrastructure dependencies: all I/O goes through port::HttpTransport

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{Result, SdkError};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
