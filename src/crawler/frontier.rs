//! Crawl frontier: FIFO queue, visited set, and page budget
//!
//! Enqueue is O(1) and does not deduplicate; the queue may hold duplicate
//! entries, which the pop side discards lazily against the visited set.
//! The budget counts only successfully persisted pages, so robots skips
//! and fetch failures never consume it.

use std::collections::{HashSet, VecDeque};

/// Breadth-first frontier for one crawl run
pub struct Frontier {
    queue: VecDeque<String>,
    visited: HashSet<String>,
    persisted: usize,
    budget: usize,
}

impl Frontier {
    /// Creates a frontier with the given page budget
    pub fn new(budget: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            visited: HashSet::new(),
            persisted: 0,
            budget,
        }
    }

    /// Appends an ordered sequence of seed URLs
    pub fn seed<I>(&mut self, urls: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.queue.extend(urls);
    }

    /// Appends one URL; duplicates are permitted
    pub fn enqueue(&mut self, url: String) {
        self.queue.push_back(url);
    }

    /// Pops the head URL, if any
    pub fn pop(&mut self) -> Option<String> {
        self.queue.pop_front()
    }

    /// Whether a URL has already been processed this run
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Marks a URL as visited; returns false if it already was
    pub fn mark_visited(&mut self, url: &str) -> bool {
        self.visited.insert(url.to_string())
    }

    /// Records one successfully persisted page
    pub fn record_persisted(&mut self) {
        self.persisted += 1;
    }

    /// Number of pages persisted so far
    pub fn persisted(&self) -> usize {
        self.persisted
    }

    /// Whether the persisted count has reached the budget
    pub fn budget_reached(&self) -> bool {
        self.persisted >= self.budget
    }

    /// Number of queued entries, duplicates included
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
