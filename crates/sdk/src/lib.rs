//! Pubhub SDK - Rust Client Library
//!
//! Typed clients for QR codes, short links, HTML hosting (with form
//! submissions and variables) and the social publisher.
//!
//! # Example
//!
//! ```no_run
//! use pubhub_sdk::{PubhubClient, PublishOptions, PublishTarget, VideoSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads PUBHUB_API_KEY and friends
//!     let client = PubhubClient::from_env()?;
//!
//!     // Reposts are recognised from the link itself
//!     let source = VideoSource::detect("https://www.tiktok.com/@bakery/video/7301234567890123456")?;
//!     let task = client
//!         .tasks()
//!         .publish(
//!             PublishTarget::Workspace("ws-1".to_string()),
//!             source,
//!             PublishOptions::default().caption("Fresh out of the oven"),
//!         )
//!         .await?;
//!
//!     println!("Task {} is {}", task.id, task.status);
//!     Ok(())
//! }
//! ```

mod client;
pub mod config;
pub mod files;

pub use client::PubhubClient;
pub use crate::config::Settings;
pub use crate::files::load_media;
pub use pubhub_core::domain::*;
pub use pubhub_core::{Result, SdkError};
pub use pubhub_infra_http::ClientConfig;
