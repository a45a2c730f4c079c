//! Mock implementations for testing.
//!
//! [`MockTransport`] stands in for the network; [`TestFixtures`] holds
//! response bodies shaped like the service's.

mod transport;

pub use transport::{MockResponse, MockTransport};

use crate::config::PinboardConfig;
use crate::error::PinboardError;
use crate::types::AddBookmarkRequest;

/// Test fixtures for Pinboard operations.
pub struct TestFixtures;

impl TestFixtures {
    /// Token used by [`TestFixtures::config`].
    pub const AUTH_TOKEN: &'static str = "test_user:0123456789ABCDEF";

    /// A configuration with a fixed token and default settings.
    pub fn config() -> Result<PinboardConfig, PinboardError> {
        PinboardConfig::new(Self::AUTH_TOKEN)
    }

    /// A minimal add request.
    pub fn sample_add_request() -> AddBookmarkRequest {
        AddBookmarkRequest::new("https://mylink.com", "A Really Neat Website")
            .with_description("Description")
            .with_tags(["tag1", "tag2"])
    }

    /// Acknowledgment of a successful mutation.
    pub fn done_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" ?>
<result code="done" />"#
    }

    /// Failure reported by the service with a 200 status.
    pub fn error_xml(code: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" ?>
<result code="{}" />"#,
            code
        )
    }

    /// `tags/get` response.
    pub fn tags_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" ?>
<tags>
  <tag count="3" tag="tag1" />
  <tag count="1" tag="tag2" />
  <tag count="2" tag="tag3" />
</tags>"#
    }

    /// `posts/get` response with one bookmark and its change signature.
    pub fn post_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" ?>
<posts user="test_user" dt="2020-09-02T03:59:55Z">
  <post href="https://mylink.com" time="2020-09-02T03:59:55Z" description="A Really Neat Website" extended="Description" tag="tag1 tag2" hash="1f2ab71b5ee1d9fa3c7a0bb61d8a2a1c" meta="8b1d5c0cfe5c2f2e94b7d6c2b3f7a1e0" shared="yes" toread="no" />
</posts>"#
    }

    /// `posts/get` response for a URL that is not bookmarked.
    pub fn empty_posts_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" ?>
<posts user="test_user" dt="2020-09-02T03:59:55Z">
</posts>"#
    }

    /// `posts/all` and `posts/recent` response with two bookmarks.
    pub fn posts_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" ?>
<posts user="test_user">
  <post href="https://newer.example.com/" time="2020-09-05T10:00:00Z" description="Newer" extended="" tag="rust" hash="aaa" shared="no" toread="yes" />
  <post href="https://older.example.com/" time="2020-09-04T09:00:00Z" description="Older" extended="Notes &amp; more" tag="" hash="bbb" shared="yes" toread="no" />
</posts>"#
    }

    /// `posts/dates` response.
    pub fn dates_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" ?>
<dates user="test_user" tag="">
  <date count="5" date="2020-09-05" />
  <date count="1" date="2020-09-04" />
</dates>"#
    }

    /// `posts/update` response.
    pub fn update_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" ?>
<update time="2020-09-03T13:07:19Z" />"#
    }

    /// `posts/suggest` response.
    pub fn suggest_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" ?>
<suggested>
  <popular>security</popular>
  <recommended>ssh</recommended>
  <recommended>linux</recommended>
</suggested>"#
    }

    /// `notes/list` response.
    pub fn notes_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" ?>
<notes count="2">
  <note id="cf73fb9bd3bc0fb4a1e4">
    <hash>0c9a6f1e1b1e6d5ab0c3</hash>
    <title>Shopping list</title>
    <created_at>2020-09-01 12:00:00</created_at>
    <updated_at>2020-09-02 08:30:00</updated_at>
    <length>24</length>
  </note>
  <note id="a1b2c3d4e5f6a7b8c9d0">
    <hash>9d8c7b6a5f4e3d2c1b0a</hash>
    <title>Reading</title>
    <created_at>2020-08-15 09:15:00</created_at>
    <updated_at>2020-08-15 09:15:00</updated_at>
    <length>0</length>
  </note>
</notes>"#
    }

    /// `notes/{id}` response.
    pub fn note_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" ?>
<note id="cf73fb9bd3bc0fb4a1e4">
  <title>Shopping list</title>
  <hash>0c9a6f1e1b1e6d5ab0c3</hash>
  <created_at>2020-09-01 12:00:00</created_at>
  <updated_at>2020-09-02 08:30:00</updated_at>
  <length>24</length>
  <text>milk, eggs &amp; bread</text>
</note>"#
    }
}
