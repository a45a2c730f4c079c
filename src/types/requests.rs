//! Request types for Pinboard operations.
//!
//! Each request validates itself locally and renders the query parameters
//! for its endpoint. The auth token is added later by the request pipeline.

use crate::error::ValidationError;
use crate::xml::coerce::{format_flag, format_timestamp};
use chrono::{DateTime, Utc};

/// Query parameters in the order they are sent.
pub type QueryParams = Vec<(&'static str, String)>;

/// Maximum number of tags accepted by filtering endpoints.
pub const MAX_FILTER_TAGS: usize = 3;

/// Maximum number of tags on a single bookmark.
pub const MAX_BOOKMARK_TAGS: usize = 100;

/// Maximum title length in characters.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Maximum extended description length in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 65_536;

/// Largest `count` accepted by the recent-bookmarks endpoint.
pub const MAX_RECENT_COUNT: u32 = 100;

/// Request to add (or replace) a bookmark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddBookmarkRequest {
    /// URL to bookmark.
    pub url: String,
    /// Title.
    pub title: String,
    /// Extended description.
    pub description: Option<String>,
    /// Tags.
    pub tags: Vec<String>,
    /// Creation time to record instead of now.
    pub created_at: Option<DateTime<Utc>>,
    /// Replace an existing bookmark for the same URL.
    pub replace: bool,
    /// Make the bookmark public.
    pub shared: bool,
    /// Mark the bookmark unread.
    pub to_read: bool,
}

impl AddBookmarkRequest {
    /// Create a request for a private bookmark that does not replace an
    /// existing one.
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            description: None,
            tags: Vec::new(),
            created_at: None,
            replace: false,
            shared: false,
            to_read: false,
        }
    }

    /// Set the extended description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the creation time.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Set whether an existing bookmark is replaced.
    pub fn with_replace(mut self, replace: bool) -> Self {
        self.replace = replace;
        self
    }

    /// Set whether the bookmark is public.
    pub fn with_shared(mut self, shared: bool) -> Self {
        self.shared = shared;
        self
    }

    /// Set whether the bookmark is marked unread.
    pub fn with_to_read(mut self, to_read: bool) -> Self {
        self.to_read = to_read;
        self
    }

    /// Check the request against the service's limits.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("url", &self.url)?;
        require_non_blank("title", &self.title)?;
        require_max_length("title", &self.title, MAX_TITLE_LENGTH)?;
        if let Some(description) = &self.description {
            require_max_length("description", description, MAX_DESCRIPTION_LENGTH)?;
        }
        validate_tags(&self.tags, MAX_BOOKMARK_TAGS)
    }

    /// Render the `posts/add` parameters.
    pub fn to_params(&self) -> QueryParams {
        let mut params: QueryParams = vec![
            ("url", self.url.clone()),
            ("description", self.title.clone()),
        ];
        if let Some(description) = &self.description {
            params.push(("extended", description.clone()));
        }
        if !self.tags.is_empty() {
            params.push(("tags", self.tags.join(" ")));
        }
        if let Some(created_at) = &self.created_at {
            params.push(("dt", format_timestamp(created_at)));
        }
        params.push(("replace", format_flag(self.replace).to_string()));
        params.push(("shared", format_flag(self.shared).to_string()));
        params.push(("toread", format_flag(self.to_read).to_string()));
        params
    }
}

/// Request to list all bookmarks, optionally filtered and paged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetAllBookmarksRequest {
    /// Up to three tags that every result must carry.
    pub tags: Vec<String>,
    /// Offset of the first result.
    pub start: Option<u32>,
    /// Number of results to return.
    pub results: Option<u32>,
    /// Only bookmarks created at or after this time.
    pub from: Option<DateTime<Utc>>,
    /// Only bookmarks created at or before this time.
    pub to: Option<DateTime<Utc>>,
}

impl GetAllBookmarksRequest {
    /// Create an unfiltered request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Skip the first `start` results.
    pub fn with_start(mut self, start: u32) -> Self {
        self.start = Some(start);
        self
    }

    /// Limit the number of results.
    pub fn with_results(mut self, results: u32) -> Self {
        self.results = Some(results);
        self
    }

    /// Restrict to a creation-time window.
    pub fn with_range(mut self, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    /// Check the request against the service's limits.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_tags(&self.tags, MAX_FILTER_TAGS)?;
        if let Some(results) = self.results {
            if results == 0 {
                return Err(ValidationError::OutOfRange {
                    name: "results",
                    value: 0,
                    min: 1,
                    max: u64::from(u32::MAX),
                });
            }
        }
        if let (Some(from), Some(to)) = (&self.from, &self.to) {
            if from > to {
                return Err(ValidationError::InvalidDateRange {
                    from: format_timestamp(from),
                    to: format_timestamp(to),
                });
            }
        }
        Ok(())
    }

    /// Render the `posts/all` parameters.
    pub fn to_params(&self) -> QueryParams {
        let mut params = tag_filter_params(&self.tags);
        if let Some(start) = self.start {
            params.push(("start", start.to_string()));
        }
        if let Some(results) = self.results {
            params.push(("results", results.to_string()));
        }
        if let Some(from) = &self.from {
            params.push(("fromdt", format_timestamp(from)));
        }
        if let Some(to) = &self.to {
            params.push(("todt", format_timestamp(to)));
        }
        params
    }
}

/// Render a tag filter as the `tag` parameter, if any tags are given.
pub(crate) fn tag_filter_params(tags: &[String]) -> QueryParams {
    if tags.is_empty() {
        Vec::new()
    } else {
        vec![("tag", tags.join(" "))]
    }
}

/// Fail if `value` is empty or whitespace.
pub(crate) fn require_non_blank(name: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingArgument { name });
    }
    Ok(())
}

/// Fail if `value` is longer than `max` characters.
pub(crate) fn require_max_length(
    name: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    let length = value.chars().count();
    if length > max {
        return Err(ValidationError::TooLong { name, length, max });
    }
    Ok(())
}

/// Check a single tag name.
pub(crate) fn validate_tag(tag: &str) -> Result<(), ValidationError> {
    if tag.trim().is_empty() {
        return Err(ValidationError::InvalidTag {
            tag: tag.to_string(),
            reason: "tag is empty",
        });
    }
    if tag.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidTag {
            tag: tag.to_string(),
            reason: "tags cannot contain whitespace",
        });
    }
    if tag.contains(',') {
        return Err(ValidationError::InvalidTag {
            tag: tag.to_string(),
            reason: "tags cannot contain commas",
        });
    }
    Ok(())
}

/// Check a list of tags and its length.
pub(crate) fn validate_tags(tags: &[String], max: usize) -> Result<(), ValidationError> {
    if tags.len() > max {
        return Err(ValidationError::TooManyTags {
            count: tags.len(),
            max,
        });
    }
    tags.iter().try_for_each(|tag| validate_tag(tag))
}
