//! Mapping of decoded response trees into domain types.

use super::coerce::{
    parse_count, parse_date, parse_flag, parse_note_timestamp, parse_timestamp, split_tags,
};
use super::XmlNode;
use crate::error::ResponseError;
use crate::types::{Bookmark, BookmarkDates, Note, NoteSummary, SuggestedTags, TagCounts};
use chrono::{DateTime, Utc};

/// Map a `<tags>` listing.
pub fn tag_counts(root: &XmlNode) -> Result<TagCounts, ResponseError> {
    expect_root(root, "tags")?;
    let mut counts = TagCounts::with_capacity(root.children.len());
    for node in root.children_named("tag") {
        let name = node.required_attr("tag")?;
        let count = parse_count("count", node.required_attr("count")?)?;
        counts.insert(name.to_string(), count);
    }
    Ok(counts)
}

/// Map a `<posts>` listing, keeping the service's order.
pub fn bookmarks(root: &XmlNode) -> Result<Vec<Bookmark>, ResponseError> {
    expect_root(root, "posts")?;
    root.children_named("post").map(bookmark).collect()
}

/// Map a single `<post>` element.
pub fn bookmark(node: &XmlNode) -> Result<Bookmark, ResponseError> {
    let shared = match node.attr("shared") {
        Some(value) => parse_flag("shared", value)?,
        None => true,
    };
    let to_read = match node.attr("toread") {
        Some(value) => parse_flag("toread", value)?,
        None => false,
    };

    Ok(Bookmark {
        href: node.required_attr("href")?.to_string(),
        title: node.attr("description").unwrap_or_default().to_string(),
        description: node.attr("extended").unwrap_or_default().to_string(),
        tags: split_tags(node.attr("tag").unwrap_or_default()),
        created_at: parse_timestamp("time", node.required_attr("time")?)?,
        shared,
        to_read,
        hash: node.attr("hash").map(str::to_string),
        meta: node.attr("meta").map(str::to_string),
    })
}

/// Map a `<dates>` listing.
pub fn bookmark_dates(root: &XmlNode) -> Result<BookmarkDates, ResponseError> {
    expect_root(root, "dates")?;
    let mut dates = BookmarkDates::new();
    for node in root.children_named("date") {
        let date = parse_date("date", node.required_attr("date")?)?;
        let count = parse_count("count", node.required_attr("count")?)?;
        dates.insert(date, count);
    }
    Ok(dates)
}

/// Map an `<update time="..."/>` response.
pub fn last_update(root: &XmlNode) -> Result<DateTime<Utc>, ResponseError> {
    expect_root(root, "update")?;
    parse_timestamp("time", root.required_attr("time")?)
}

/// Map a `<suggested>` response.
pub fn suggested_tags(root: &XmlNode) -> Result<SuggestedTags, ResponseError> {
    expect_root(root, "suggested")?;
    let collect = |name: &'static str| {
        root.children_named(name)
            .filter_map(|node| node.text.as_deref())
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>()
    };
    Ok(SuggestedTags {
        popular: collect("popular"),
        recommended: collect("recommended"),
    })
}

/// Map a `<notes>` listing.
pub fn note_summaries(root: &XmlNode) -> Result<Vec<NoteSummary>, ResponseError> {
    expect_root(root, "notes")?;
    root.children_named("note").map(note_summary).collect()
}

/// Map a single `<note>` response including its text.
pub fn note(root: &XmlNode) -> Result<Note, ResponseError> {
    expect_root(root, "note")?;
    Ok(Note {
        summary: note_summary(root)?,
        text: root.child_text("text").unwrap_or_default().to_string(),
    })
}

fn note_summary(node: &XmlNode) -> Result<NoteSummary, ResponseError> {
    Ok(NoteSummary {
        id: node.required_attr("id")?.to_string(),
        title: node.required_child_text("title")?.to_string(),
        hash: node.child_text("hash").unwrap_or_default().to_string(),
        created_at: parse_note_timestamp("created_at", node.required_child_text("created_at")?)?,
        updated_at: parse_note_timestamp("updated_at", node.required_child_text("updated_at")?)?,
        length: parse_count("length", node.required_child_text("length")?)?,
    })
}

/// Fail unless the root element has the expected name.
pub(crate) fn expect_root(root: &XmlNode, expected: &'static str) -> Result<(), ResponseError> {
    if root.name != expected {
        return Err(ResponseError::UnexpectedRoot {
            expected,
            actual: root.name.clone(),
        });
    }
    Ok(())
}
