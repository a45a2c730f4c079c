//! Notes service for the `notes/*` endpoints.

use super::RequestPipeline;
use crate::config::PinboardConfig;
use crate::error::{PinboardError, ValidationError};
use crate::transport::HttpTransport;
use crate::types::*;
use crate::xml::mapping;
use std::sync::Arc;
use tracing::instrument;

/// Service for note operations.
pub struct NotesService {
    pipeline: RequestPipeline,
}

impl NotesService {
    /// Create a new notes service.
    pub fn new(config: Arc<PinboardConfig>, transport: Arc<dyn HttpTransport>) -> Self {
        Self::with_pipeline(RequestPipeline::new(config, transport))
    }

    pub(crate) fn with_pipeline(pipeline: RequestPipeline) -> Self {
        Self { pipeline }
    }

    /// Metadata for every note.
    #[instrument(name = "pinboard.notes.list", skip_all)]
    pub async fn list(&self) -> Result<Vec<NoteSummary>, PinboardError> {
        let root = self.pipeline.get("notes/list", Vec::new()).await?;
        Ok(mapping::note_summaries(&root)?)
    }

    /// A single note with its text.
    #[instrument(name = "pinboard.notes.get", skip_all)]
    pub async fn get(&self, id: &str) -> Result<Note, PinboardError> {
        require_non_blank("id", id)?;
        // The id becomes a path segment.
        if !id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ValidationError::InvalidArgument {
                name: "id",
                reason: "note ids are alphanumeric",
            }
            .into());
        }
        let root = self
            .pipeline
            .get(&format!("notes/{}", id), Vec::new())
            .await?;
        Ok(mapping::note(&root)?)
    }
}

impl std::fmt::Debug for NotesService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotesService")
            .field("config", self.pipeline.config())
            .finish_non_exhaustive()
    }
}
