//! Post record types.
//!
//! - [`Post`] - An immutable, timestamped record held by the index
//! - [`NewPost`] - Deserializable input for bulk loading
//! - [`TopPost`] - The shape returned by most-viewed extraction

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single timestamped post.
///
/// Posts are identified by their timestamp. Once inserted a post is never
/// mutated; the view count is fixed at insertion time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// When the post was made, at minute precision.
    pub timestamp: NaiveDateTime,
    /// The post text.
    pub content: String,
    /// Who posted it.
    pub author: String,
    /// View count used for most-viewed ordering.
    pub views: u64,
}

impl Post {
    /// Creates a new post.
    pub fn new(
        timestamp: NaiveDateTime,
        content: impl Into<String>,
        author: impl Into<String>,
        views: u64,
    ) -> Self {
        Self {
            timestamp,
            content: content.into(),
            author: author.into(),
            views,
        }
    }
}

/// A post as supplied by a caller, with its timestamp still in text form.
///
/// `views` defaults to 0 when omitted from JSON input:
///
/// ```rust
/// use postindex::NewPost;
///
/// let post: NewPost = serde_json::from_str(
///     r#"{"timestamp": "4/1/2024 09:00", "content": "Eid Mubarak", "author": "Sara"}"#,
/// )?;
/// assert_eq!(post.views, 0);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    /// Timestamp text, parsed with the index's configured format.
    pub timestamp: String,
    /// The post text.
    pub content: String,
    /// Who posted it.
    pub author: String,
    /// View count.
    #[serde(default)]
    pub views: u64,
}

/// The record returned by [`RecordIndex::pop_max_views`](crate::RecordIndex::pop_max_views).
///
/// The timestamp is not part of the result; look the post up by timestamp if
/// it is needed, since popping leaves the point and ordered views intact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopPost {
    /// The post text.
    pub content: String,
    /// Who posted it.
    pub author: String,
    /// The post's view count.
    pub views: u64,
}

impl From<&Post> for TopPost {
    fn from(post: &Post) -> Self {
        Self {
            content: post.content.clone(),
            author: post.author.clone(),
            views: post.views,
        }
    }
}
