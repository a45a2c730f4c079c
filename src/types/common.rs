//! Domain types returned by the Pinboard API.

use super::requests::AddBookmarkRequest;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Tag name to number of bookmarks carrying it.
pub type TagCounts = HashMap<String, u32>;

/// Calendar date to number of bookmarks saved on it.
pub type BookmarkDates = BTreeMap<NaiveDate, u32>;

/// A saved bookmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    /// Bookmarked URL; identifies the bookmark.
    pub href: String,
    /// Title (the service calls this `description`).
    pub title: String,
    /// Extended description (the service calls this `extended`).
    pub description: String,
    /// Tags.
    pub tags: BTreeSet<String>,
    /// When the bookmark was saved.
    pub created_at: DateTime<Utc>,
    /// Whether the bookmark is public.
    pub shared: bool,
    /// Whether the bookmark is marked unread.
    pub to_read: bool,
    /// URL hash.
    pub hash: Option<String>,
    /// Change-detection signature, present when requested.
    pub meta: Option<String>,
}

impl Bookmark {
    /// Build the add request that recreates this bookmark remotely.
    ///
    /// The request replaces any existing bookmark for the same URL.
    pub fn to_add_request(&self) -> AddBookmarkRequest {
        AddBookmarkRequest::new(self.href.clone(), self.title.clone())
            .with_description(self.description.clone())
            .with_tags(self.tags.iter().cloned())
            .with_created_at(self.created_at)
            .with_shared(self.shared)
            .with_to_read(self.to_read)
            .with_replace(true)
    }
}

/// Tag suggestions for a URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedTags {
    /// Tags other users commonly apply to the URL.
    pub popular: Vec<String>,
    /// Tags drawn from the user's own tag list.
    pub recommended: Vec<String>,
}

/// Note metadata as returned by the note listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteSummary {
    /// Note identifier.
    pub id: String,
    /// Title.
    pub title: String,
    /// Content hash.
    pub hash: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Length of the text in characters.
    pub length: u32,
}

/// A note with its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Metadata.
    #[serde(flatten)]
    pub summary: NoteSummary,
    /// Body text.
    pub text: String,
}
