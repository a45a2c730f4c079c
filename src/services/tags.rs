//! Tags service for the `tags/*` endpoints.

use super::RequestPipeline;
use crate::config::PinboardConfig;
use crate::error::PinboardError;
use crate::transport::HttpTransport;
use crate::types::*;
use crate::xml::mapping;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Service for tag operations.
pub struct TagsService {
    pipeline: RequestPipeline,
}

impl TagsService {
    /// Create a new tags service.
    pub fn new(config: Arc<PinboardConfig>, transport: Arc<dyn HttpTransport>) -> Self {
        Self::with_pipeline(RequestPipeline::new(config, transport))
    }

    pub(crate) fn with_pipeline(pipeline: RequestPipeline) -> Self {
        Self { pipeline }
    }

    /// All tags with the number of bookmarks carrying each.
    #[instrument(name = "pinboard.tags.get", skip_all)]
    pub async fn get(&self) -> Result<TagCounts, PinboardError> {
        let root = self.pipeline.get("tags/get", Vec::new()).await?;
        let counts = mapping::tag_counts(&root)?;
        debug!(count = counts.len(), "listed tags");
        Ok(counts)
    }

    /// Remove `tag` from every bookmark.
    #[instrument(name = "pinboard.tags.delete", skip_all)]
    pub async fn delete(&self, tag: &str) -> Result<(), PinboardError> {
        require_non_blank("tag", tag)?;
        self.pipeline
            .execute("tags/delete", vec![("tag", tag.to_string())])
            .await
    }

    /// Rename `old` to `new` on every bookmark.
    #[instrument(name = "pinboard.tags.rename", skip_all)]
    pub async fn rename(&self, old: &str, new: &str) -> Result<(), PinboardError> {
        require_non_blank("old", old)?;
        require_non_blank("new", new)?;
        validate_tag(new)?;
        self.pipeline
            .execute(
                "tags/rename",
                vec![("old", old.to_string()), ("new", new.to_string())],
            )
            .await
    }
}

impl std::fmt::Debug for TagsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagsService")
            .field("config", self.pipeline.config())
            .finish_non_exhaustive()
    }
}
