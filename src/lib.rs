//! Pinboard Integration Module
//!
//! Typed, async client for the Pinboard bookmarking service's XML API.
//!
//! # Features
//!
//! - **Bookmarks**: add, delete, look up by URL or date, list, suggest tags
//! - **Tags**: counts, rename, delete
//! - **Notes**: list and fetch
//! - **Typed errors**: configuration, validation, transport, service and
//!   parse failures are distinct
//! - **Testable**: the HTTP transport is a trait with a mock implementation
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pinboard::{AddBookmarkRequest, PinboardClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), pinboard::PinboardError> {
//!     // Reads PINBOARD_API_TOKEN
//!     let client = pinboard::create_client_from_env()?;
//!
//!     client
//!         .bookmarks()
//!         .add(
//!             AddBookmarkRequest::new("https://www.rust-lang.org/", "Rust")
//!                 .with_tags(["rust", "lang"]),
//!         )
//!         .await?;
//!
//!     for (tag, count) in client.tags().get().await? {
//!         println!("{tag}: {count}");
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;
pub mod mocks;
pub mod services;
pub mod transport;
pub mod types;
pub mod xml;

// Re-export main types at crate root
pub use client::{PinboardClient, PinboardClientBuilder, PinboardClientImpl};
pub use config::{PinboardConfig, PinboardConfigBuilder};
pub use error::{
    ConfigurationError, ErrorKind, PinboardError, ResponseError, ServiceError, TransportError,
    ValidationError,
};
pub use services::{BookmarksService, NotesService, RequestPipeline, TagsService};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
pub use types::{
    AddBookmarkRequest, Bookmark, BookmarkDates, GetAllBookmarksRequest, Note, NoteSummary,
    SuggestedTags, TagCounts,
};

/// Create a new Pinboard client from environment variables.
///
/// Reads `PINBOARD_API_TOKEN` (required), `PINBOARD_BASE_URL` and
/// `PINBOARD_TIMEOUT_MS`.
///
/// # Example
///
/// ```rust,no_run
/// let client = pinboard::create_client_from_env()?;
/// # Ok::<(), pinboard::PinboardError>(())
/// ```
pub fn create_client_from_env() -> Result<impl PinboardClient> {
    PinboardClientBuilder::new().from_env().build()
}

/// Create a new Pinboard client with explicit configuration.
///
/// # Example
///
/// ```rust,no_run
/// use pinboard::PinboardConfig;
///
/// let config = PinboardConfig::builder()
///     .auth_token("alice:0123456789ABCDEF")
///     .build()?;
///
/// let client = pinboard::create_client(config)?;
/// # Ok::<(), pinboard::PinboardError>(())
/// ```
pub fn create_client(config: PinboardConfig) -> Result<impl PinboardClient> {
    PinboardClientBuilder::new().config(config).build()
}

/// Result type alias for Pinboard operations.
pub type Result<T> = std::result::Result<T, PinboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client() {
        let config = PinboardConfig::new("alice:ABC123").unwrap();
        let client = create_client(config).unwrap();
        assert_eq!(client.config().username(), Some("alice"));
    }
}
