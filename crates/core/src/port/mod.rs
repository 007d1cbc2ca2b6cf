// Port Layer - Interfaces for external dependencies

pub mod id_provider; // Correlation IDs
pub mod time_provider; // For deterministic testing
pub mod transport;

// Re-exports
pub use id_provider::IdProvider;
pub use time_provider::TimeProvider;
pub use transport::{ApiRequest, HttpMethod, HttpTransport, ObjectUpload};
