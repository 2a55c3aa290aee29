//! Priority view over posts, ordered by view count.
//!
//! [`ViewQueue`] is a max-heap: [`ViewQueue::pop`] always yields the entry
//! with the highest view count. Ties are broken by the earlier timestamp,
//! then by insertion order, so extraction order is fully deterministic.
//!
//! The queue is a multiset. Pushing two posts with the same timestamp keeps
//! both entries. There is no decrease-key or arbitrary removal; entries leave
//! only through `pop`.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::Arc;

use crate::post::Post;

/// A heap entry. Ordering uses only the key fields, never the post body.
#[derive(Debug)]
struct Entry {
    views: u64,
    seq: u64,
    post: Arc<Post>,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.views
            .cmp(&other.views)
            // BinaryHeap pops the greatest, so earlier timestamps and lower
            // sequence numbers must compare greater.
            .then_with(|| other.post.timestamp.cmp(&self.post.timestamp))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

/// Max-heap of posts keyed by view count.
#[derive(Debug, Default)]
pub struct ViewQueue {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl ViewQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty queue with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_seq: 0,
        }
    }

    /// Adds a post. O(log n).
    pub fn push(&mut self, post: Arc<Post>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            views: post.views,
            seq,
            post,
        });
    }

    /// Removes and returns the most-viewed post, or `None` if empty. O(log n).
    pub fn pop(&mut self) -> Option<Arc<Post>> {
        self.heap.pop().map(|entry| entry.post)
    }

    /// Returns the most-viewed post without removing it.
    pub fn peek(&self) -> Option<&Post> {
        self.heap.peek().map(|entry| entry.post.as_ref())
    }

    /// Number of entries still queued.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if no entries remain.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn post(day: u32, views: u64) -> Arc<Post> {
        let ts = NaiveDate::from_ymd_opt(2024, 1, day).unwrap().and_hms_opt(12, 0, 0).unwrap();
        Arc::new(Post::new(ts, format!("post {day}"), "tester", views))
    }

    #[test]
    fn test_pop_highest_views_first() {
        let mut queue = ViewQueue::new();
        queue.push(post(1, 98));
        queue.push(post(2, 200));
        queue.push(post(3, 105));

        assert_eq!(queue.pop().unwrap().views, 200);
        assert_eq!(queue.pop().unwrap().views, 105);
        assert_eq!(queue.pop().unwrap().views, 98);
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_tie_breaks_on_earlier_timestamp() {
        let mut queue = ViewQueue::new();
        queue.push(post(9, 50));
        queue.push(post(3, 50));
        queue.push(post(6, 50));

        assert_eq!(queue.pop().unwrap().content, "post 3");
        assert_eq!(queue.pop().unwrap().content, "post 6");
        assert_eq!(queue.pop().unwrap().content, "post 9");
    }

    #[test]
    fn test_tie_on_timestamp_breaks_on_insertion_order() {
        let mut queue = ViewQueue::new();
        let first = post(1, 10);
        let mut second = (*post(1, 10)).clone();
        second.content = "second".to_string();

        queue.push(first);
        queue.push(Arc::new(second));

        assert_eq!(queue.pop().unwrap().content, "post 1");
        assert_eq!(queue.pop().unwrap().content, "second");
    }

    #[test]
    fn test_peek_does_not_remove() {
        let mut queue = ViewQueue::with_capacity(4);
        assert!(queue.peek().is_none());
        queue.push(post(1, 7));
        assert_eq!(queue.peek().unwrap().views, 7);
        assert_eq!(queue.len(), 1);
        assert!(!queue.is_empty());
    }
}
