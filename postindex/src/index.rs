//! The record index: three synchronized views over one set of posts.
//!
//! # Design
//!
//! [`RecordIndex`] owns every post through three structures that are updated
//! together on insert:
//!
//! - **point view** - `HashMap` from timestamp to post, for exact lookup
//! - **ordered view** - `Vec` kept sorted by timestamp, for range scans
//! - **priority view** - [`ViewQueue`] max-heap by view count
//!
//! Posts are shared between the views with `Arc`, so each post body is stored
//! once. Timestamp text is parsed before any view is touched, which makes
//! every insert all-or-nothing.
//!
//! # Asymmetries
//!
//! Two behaviors are intentional and callers can rely on them:
//!
//! - [`RecordIndex::pop_max_views`] removes the post from the priority view
//!   only. The post stays reachable through [`RecordIndex::get_by_timestamp`]
//!   and [`RecordIndex::get_in_range`].
//! - Adding a second post with an existing timestamp replaces the point-view
//!   entry, but the ordered and priority views keep both posts.
//!
//! # Example
//!
//! ```rust
//! use postindex::RecordIndex;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut index = RecordIndex::new();
//! index.add("1/1/2024 08:30", "Good morning", "Mohammed", 98)?;
//! index.add("10/1/2024 14:00", "Rainy Day", "Shamma", 105)?;
//! index.add("13/1/2024 12:00", "Ramadan Kareem", "Noora", 200)?;
//!
//! let early = index.get_in_range("1/1/2024 00:00", "4/1/2024 23:59")?;
//! assert_eq!(early.len(), 1);
//!
//! let top = index.pop_max_views().unwrap();
//! assert_eq!(top.views, 200);
//!
//! // Still retrievable after the pop.
//! assert!(index.get_by_timestamp("13/1/2024 12:00")?.is_some());
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::config::IndexConfig;
use crate::error::{LoadError, Result};
use crate::post::{NewPost, Post, TopPost};
use crate::priority::ViewQueue;
use crate::timestamp::TimestampParser;

/// In-memory index over timestamped posts.
///
/// # Thread Safety
///
/// The index is designed for a single mutator. It is `Send` but performs no
/// internal locking; wrap it in a mutex to share it across threads.
#[derive(Debug)]
pub struct RecordIndex {
    /// Parser for all timestamp arguments.
    parser: TimestampParser,
    /// Point view: timestamp to most recently added post.
    by_timestamp: HashMap<NaiveDateTime, Arc<Post>>,
    /// Ordered view: every added post, ascending by timestamp.
    by_time_order: Vec<Arc<Post>>,
    /// Priority view: posts not yet popped, by descending views.
    by_priority: ViewQueue,
}

impl RecordIndex {
    /// Creates an empty index using the default `D/M/YYYY HH:MM` format.
    pub fn new() -> Self {
        Self::build(&IndexConfig::default())
    }

    /// Creates an empty index from a config.
    ///
    /// # Errors
    ///
    /// Returns a config error if [`IndexConfig::validate`] fails.
    pub fn with_config(config: &IndexConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: &IndexConfig) -> Self {
        let capacity = config.initial_capacity;
        Self {
            parser: config.parser(),
            by_timestamp: HashMap::with_capacity(capacity),
            by_time_order: Vec::with_capacity(capacity),
            by_priority: ViewQueue::with_capacity(capacity),
        }
    }

    /// Returns the parser used for timestamp arguments.
    pub fn parser(&self) -> &TimestampParser {
        &self.parser
    }

    /// Adds a post.
    ///
    /// The post is inserted into all three views. If a post with the same
    /// timestamp already exists, the point view now returns the new post while
    /// the ordered and priority views hold both.
    ///
    /// # Errors
    ///
    /// Returns a parse error if `timestamp` is malformed or names an
    /// impossible date; the index is left unchanged.
    pub fn add(
        &mut self,
        timestamp: &str,
        content: impl Into<String>,
        author: impl Into<String>,
        views: u64,
    ) -> Result<()> {
        let ts = self.parser.parse(timestamp)?;
        self.insert(Post::new(ts, content, author, views));
        Ok(())
    }

    /// Adds a post with zero views.
    ///
    /// # Errors
    ///
    /// Same as [`RecordIndex::add`].
    pub fn add_post(
        &mut self,
        timestamp: &str,
        content: impl Into<String>,
        author: impl Into<String>,
    ) -> Result<()> {
        self.add(timestamp, content, author, 0)
    }

    /// Inserts an already-parsed post into all three views.
    pub fn insert(&mut self, post: Post) {
        let post = Arc::new(post);
        let ts = post.timestamp;

        if self.by_timestamp.insert(ts, Arc::clone(&post)).is_some() {
            tracing::debug!(timestamp = %ts, "replaced point entry for duplicate timestamp");
        }

        // After any equal timestamps, so duplicates keep insertion order.
        let pos = self.by_time_order.partition_point(|p| p.timestamp <= ts);
        self.by_time_order.insert(pos, Arc::clone(&post));

        self.by_priority.push(post);

        tracing::trace!(
            timestamp = %ts,
            position = pos,
            total = self.by_time_order.len(),
            "post added"
        );
    }

    /// Looks up the post with exactly this timestamp.
    ///
    /// Returns `Ok(None)` if no post has that timestamp.
    ///
    /// # Errors
    ///
    /// Returns a parse error if `timestamp` is malformed.
    pub fn get_by_timestamp(&self, timestamp: &str) -> Result<Option<&Post>> {
        let ts = self.parser.parse(timestamp)?;
        Ok(self.get(&ts))
    }

    /// Looks up a post by an already-parsed timestamp.
    pub fn get(&self, ts: &NaiveDateTime) -> Option<&Post> {
        self.by_timestamp.get(ts).map(|p| &**p)
    }

    /// Returns every post with `start <= timestamp <= end`, oldest first.
    ///
    /// The result is a fresh vector. It is empty when no post qualifies,
    /// including when `start > end`.
    ///
    /// # Errors
    ///
    /// Returns a parse error if either bound is malformed.
    pub fn get_in_range(&self, start: &str, end: &str) -> Result<Vec<Post>> {
        let start = self.parser.parse(start)?;
        let end = self.parser.parse(end)?;
        Ok(self.range(start, end).cloned().collect())
    }

    /// Iterates the posts in `[start, end]` without copying them.
    pub fn range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> impl Iterator<Item = &Post> + '_ {
        let first = self.by_time_order.partition_point(|p| p.timestamp < start);
        self.by_time_order[first..]
            .iter()
            .take_while(move |p| p.timestamp <= end)
            .map(|p| &**p)
    }

    /// Removes and returns the most-viewed post from the priority view.
    ///
    /// Returns `None` once every added post has been popped. Ties on views go
    /// to the earlier timestamp, then to the earlier insertion. The post
    /// remains in the point and ordered views.
    pub fn pop_max_views(&mut self) -> Option<TopPost> {
        let post = self.by_priority.pop()?;
        tracing::debug!(
            timestamp = %post.timestamp,
            views = post.views,
            remaining = self.by_priority.len(),
            "popped most-viewed post"
        );
        Some(TopPost::from(&*post))
    }

    /// Returns the post `pop_max_views` would return next, without removing it.
    pub fn peek_max_views(&self) -> Option<&Post> {
        self.by_priority.peek()
    }

    /// Number of distinct timestamps in the point view.
    pub fn len(&self) -> usize {
        self.by_timestamp.len()
    }

    /// Returns true if no post has been added.
    pub fn is_empty(&self) -> bool {
        self.by_timestamp.is_empty()
    }

    /// Number of entries left in the priority view.
    pub fn pending_priority(&self) -> usize {
        self.by_priority.len()
    }

    /// Iterates every post in the ordered view, oldest first.
    ///
    /// Posts sharing a timestamp all appear, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Post> + '_ {
        self.by_time_order.iter().map(|p| &**p)
    }

    /// Returns the oldest post, if any.
    pub fn oldest(&self) -> Option<&Post> {
        self.by_time_order.first().map(|p| &**p)
    }

    /// Returns the newest post, if any.
    pub fn newest(&self) -> Option<&Post> {
        self.by_time_order.last().map(|p| &**p)
    }

    /// Adds a batch of posts.
    ///
    /// Every timestamp is parsed before anything is inserted, so either the
    /// whole batch lands or none of it does. Returns the number of posts added.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Entry`] naming the first entry whose timestamp
    /// fails to parse.
    pub fn extend<I>(&mut self, posts: I) -> Result<usize>
    where
        I: IntoIterator<Item = NewPost>,
    {
        let parsed = posts
            .into_iter()
            .enumerate()
            .map(|(position, new)| {
                let ts = self
                    .parser
                    .parse(&new.timestamp)
                    .map_err(|source| LoadError::Entry { position, source })?;
                Ok(Post::new(ts, new.content, new.author, new.views))
            })
            .collect::<std::result::Result<Vec<_>, LoadError>>()?;

        let count = parsed.len();
        for post in parsed {
            self.insert(post);
        }
        tracing::debug!(count, "bulk insert complete");
        Ok(count)
    }

    /// Adds the posts in a JSON array of [`NewPost`] objects.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Json`] for malformed JSON and [`LoadError::Entry`]
    /// for a bad timestamp. Nothing is inserted on error.
    pub fn extend_from_json(&mut self, json: &str) -> Result<usize> {
        let posts: Vec<NewPost> = serde_json::from_str(json).map_err(LoadError::from)?;
        self.extend(posts)
    }

    /// Reads a JSON file of posts and adds them.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Read`] if the file cannot be read, otherwise the
    /// same errors as [`RecordIndex::extend_from_json`].
    pub fn load_json_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|e| LoadError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let count = self.extend_from_json(&data)?;
        tracing::info!(path = %path.display(), count, "loaded posts");
        Ok(count)
    }
}

impl Default for RecordIndex {
    fn default() -> Self {
        Self::new()
    }
}
