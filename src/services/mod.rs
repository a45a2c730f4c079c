//! Pinboard service implementations.
//!
//! - Bookmarks: add, delete, lookup and listing operations
//! - Tags: tag counts, rename and delete
//! - Notes: note listing and retrieval
//!
//! All services send their requests through a shared [`RequestPipeline`].

mod bookmarks;
mod notes;
mod tags;

pub use bookmarks::BookmarksService;
pub use notes::NotesService;
pub use tags::TagsService;

use crate::config::PinboardConfig;
use crate::error::{classify_response, expect_acknowledgment, PinboardError};
use crate::transport::{HttpRequest, HttpTransport};
use crate::types::QueryParams;
use crate::xml::XmlNode;
use std::sync::Arc;
use tracing::{debug, warn};

/// Issues one GET per call and classifies the response.
///
/// Holds only shared, immutable handles, so one pipeline can serve any
/// number of concurrent calls.
#[derive(Clone)]
pub struct RequestPipeline {
    config: Arc<PinboardConfig>,
    transport: Arc<dyn HttpTransport>,
}

impl RequestPipeline {
    /// Create a pipeline over the given configuration and transport.
    pub fn new(config: Arc<PinboardConfig>, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    /// Send a GET for `path` and return the parsed body of a successful
    /// response.
    pub async fn get(&self, path: &str, params: QueryParams) -> Result<XmlNode, PinboardError> {
        let url = self.config.request_url(path, &params)?;
        let request = HttpRequest::get(url.as_str()).with_header("accept", "text/xml");

        debug!(endpoint = path, "sending Pinboard request");
        let response = self.transport.send(request).await.map_err(|e| {
            warn!(endpoint = path, error = %e, "Pinboard request failed");
            e
        })?;
        debug!(endpoint = path, status = response.status, "received Pinboard response");

        classify_response(&response).map_err(|e| {
            warn!(endpoint = path, kind = ?e.kind(), error = %e, "Pinboard call unsuccessful");
            e
        })
    }

    /// Send a mutating GET and require a `done` acknowledgment.
    pub async fn execute(&self, path: &str, params: QueryParams) -> Result<(), PinboardError> {
        let root = self.get(path, params).await?;
        expect_acknowledgment(&root)
    }

    /// The configuration requests are built from.
    pub fn config(&self) -> &PinboardConfig {
        &self.config
    }
}

impl std::fmt::Debug for RequestPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestPipeline")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
