//! Bookmarks service for the `posts/*` endpoints.

use super::RequestPipeline;
use crate::config::PinboardConfig;
use crate::error::{PinboardError, ValidationError};
use crate::transport::HttpTransport;
use crate::types::*;
use crate::xml::mapping;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Service for bookmark operations.
pub struct BookmarksService {
    pipeline: RequestPipeline,
}

impl BookmarksService {
    /// Create a new bookmarks service.
    pub fn new(config: Arc<PinboardConfig>, transport: Arc<dyn HttpTransport>) -> Self {
        Self::with_pipeline(RequestPipeline::new(config, transport))
    }

    pub(crate) fn with_pipeline(pipeline: RequestPipeline) -> Self {
        Self { pipeline }
    }

    /// Add a bookmark, or replace one when the request says so.
    #[instrument(name = "pinboard.bookmarks.add", skip_all)]
    pub async fn add(&self, request: AddBookmarkRequest) -> Result<(), PinboardError> {
        request.validate()?;
        self.pipeline.execute("posts/add", request.to_params()).await
    }

    /// Delete the bookmark for `url`.
    ///
    /// Deleting a URL that is not bookmarked surfaces the service's error.
    #[instrument(name = "pinboard.bookmarks.delete", skip_all)]
    pub async fn delete(&self, url: &str) -> Result<(), PinboardError> {
        require_non_blank("url", url)?;
        self.pipeline
            .execute("posts/delete", vec![("url", url.to_string())])
            .await
    }

    /// Look up the bookmark for `url`, including its change signature.
    #[instrument(name = "pinboard.bookmarks.get_by_url", skip_all)]
    pub async fn get_by_url(&self, url: &str) -> Result<Option<Bookmark>, PinboardError> {
        require_non_blank("url", url)?;
        let params = vec![("url", url.to_string()), ("meta", "yes".to_string())];
        let root = self.pipeline.get("posts/get", params).await?;
        Ok(mapping::bookmarks(&root)?.into_iter().next())
    }

    /// List bookmarks saved on `date`, optionally filtered by up to three tags.
    #[instrument(name = "pinboard.bookmarks.get_by_date", skip_all, fields(date = %date))]
    pub async fn get_by_date(
        &self,
        date: NaiveDate,
        tags: &[&str],
    ) -> Result<Vec<Bookmark>, PinboardError> {
        let mut params = tag_filter(tags)?;
        params.push(("dt", date.format("%Y-%m-%d").to_string()));
        let root = self.pipeline.get("posts/get", params).await?;
        Ok(mapping::bookmarks(&root)?)
    }

    /// List all bookmarks matching the request, newest first.
    #[instrument(name = "pinboard.bookmarks.get_all", skip_all)]
    pub async fn get_all(
        &self,
        request: GetAllBookmarksRequest,
    ) -> Result<Vec<Bookmark>, PinboardError> {
        request.validate()?;
        let root = self.pipeline.get("posts/all", request.to_params()).await?;
        let bookmarks = mapping::bookmarks(&root)?;
        debug!(count = bookmarks.len(), "listed bookmarks");
        Ok(bookmarks)
    }

    /// List the most recent bookmarks.
    ///
    /// `count` defaults to the service's own default (15) and may be at most
    /// 100.
    #[instrument(name = "pinboard.bookmarks.get_recent", skip_all)]
    pub async fn get_recent(
        &self,
        count: Option<u32>,
        tags: &[&str],
    ) -> Result<Vec<Bookmark>, PinboardError> {
        let mut params = tag_filter(tags)?;
        if let Some(count) = count {
            if !(1..=MAX_RECENT_COUNT).contains(&count) {
                return Err(ValidationError::OutOfRange {
                    name: "count",
                    value: u64::from(count),
                    min: 1,
                    max: u64::from(MAX_RECENT_COUNT),
                }
                .into());
            }
            params.push(("count", count.to_string()));
        }
        let root = self.pipeline.get("posts/recent", params).await?;
        Ok(mapping::bookmarks(&root)?)
    }

    /// Number of bookmarks saved per date.
    #[instrument(name = "pinboard.bookmarks.get_dates", skip_all)]
    pub async fn get_dates(&self, tags: &[&str]) -> Result<BookmarkDates, PinboardError> {
        let params = tag_filter(tags)?;
        let root = self.pipeline.get("posts/dates", params).await?;
        Ok(mapping::bookmark_dates(&root)?)
    }

    /// When any bookmark was last added, changed or deleted.
    #[instrument(name = "pinboard.bookmarks.get_last_change", skip_all)]
    pub async fn get_last_change(&self) -> Result<DateTime<Utc>, PinboardError> {
        let root = self.pipeline.get("posts/update", Vec::new()).await?;
        Ok(mapping::last_update(&root)?)
    }

    /// Popular and recommended tags for `url`.
    #[instrument(name = "pinboard.bookmarks.get_suggested_tags", skip_all)]
    pub async fn get_suggested_tags(&self, url: &str) -> Result<SuggestedTags, PinboardError> {
        require_non_blank("url", url)?;
        let root = self
            .pipeline
            .get("posts/suggest", vec![("url", url.to_string())])
            .await?;
        Ok(mapping::suggested_tags(&root)?)
    }
}

fn tag_filter(tags: &[&str]) -> Result<QueryParams, ValidationError> {
    let tags: Vec<String> = tags.iter().map(|t| t.to_string()).collect();
    validate_tags(&tags, MAX_FILTER_TAGS)?;
    Ok(tag_filter_params(&tags))
}

impl std::fmt::Debug for BookmarksService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookmarksService")
            .field("config", self.pipeline.config())
            .finish_non_exhaustive()
    }
}
