//! # postindex
//!
//! In-memory index over timestamped posts.
//!
//! postindex keeps one set of posts in three synchronized views, each serving
//! one access pattern:
//!
//! - exact lookup by timestamp
//! - inclusive range queries over a time interval, oldest first
//! - destructive extraction of the most-viewed post
//!
//! **Status**: This crate is in early development. The API is not yet stable.
//!
//! ## Quick Start
//!
//! ```rust
//! use postindex::RecordIndex;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut index = RecordIndex::new();
//!
//! // Timestamps are `D/M/YYYY HH:MM` by default.
//! index.add("1/1/2024 08:30", "Good morning", "Mohammed", 98)?;
//! index.add("17/1/2024 15:00", "Coffee dose", "Ali", 56)?;
//!
//! // Point lookup: `None` when absent, an error only for bad input.
//! let post = index.get_by_timestamp("17/1/2024 15:00")?;
//! assert_eq!(post.map(|p| p.author.as_str()), Some("Ali"));
//!
//! // Range query, inclusive on both ends.
//! for post in index.get_in_range("1/1/2024 00:00", "31/1/2024 23:59")? {
//!     println!("{} {}", post.timestamp, post.content);
//! }
//!
//! // Most viewed first; removes from the priority view only.
//! let top = index.pop_max_views();
//! assert_eq!(top.map(|t| t.views), Some(98));
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`RecordIndex`] — Owns the posts and the three views
//! - [`Post`] — Immutable timestamped record
//! - [`TopPost`] — Content, author, and views returned by most-viewed extraction
//! - [`IndexConfig`] — Timestamp format and capacity settings
//!
//! ## Modules
//!
//! - [`index`] — The record index and its operations
//! - [`priority`] — Max-heap over view counts
//! - [`post`] — Record types
//! - [`timestamp`] — Timestamp text parsing
//! - [`config`] — Index configuration
//! - [`error`] — Error types

pub mod config;
pub mod error;
pub mod index;
pub mod post;
pub mod priority;
pub mod timestamp;

// Re-export primary API types at crate root for convenience.
pub use config::IndexConfig;
pub use error::{IndexError, ParseError, ParseErrorKind, Result};
pub use index::RecordIndex;
pub use post::{NewPost, Post, TopPost};
