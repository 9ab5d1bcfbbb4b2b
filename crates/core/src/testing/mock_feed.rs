//! Mock release feed for paginator tests.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::episodes::{FeedError, ReleaseFeed, ReleaseRecord};

/// Mock implementation of the release feed.
///
/// Pages are queued as raw JSON arrays of records and served in order;
/// once the queue is exhausted the feed reports end-of-data. An "endless"
/// page and failure injection cover the ceiling and partial-failure
/// behaviors.
#[derive(Default)]
pub struct MockReleaseFeed {
    pages: Mutex<VecDeque<Value>>,
    endless_page: Mutex<Option<Value>>,
    fail_after: AtomicUsize,
    calls: AtomicUsize,
    last_sort: Mutex<Option<bool>>,
}

impl MockReleaseFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one page of records (a JSON array).
    pub fn push_page(&self, records: Value) {
        self.pages.lock().unwrap().push_back(records);
    }

    /// Serve the same page for every request, never reporting end-of-data.
    pub fn set_endless_page(&self, records: Value) {
        *self.endless_page.lock().unwrap() = Some(records);
    }

    /// Fail every fetch after the first `n` calls.
    pub fn fail_after(&self, n: usize) {
        self.fail_after.store(n, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Sort flag of the most recent fetch.
    pub fn last_sort(&self) -> Option<bool> {
        *self.last_sort.lock().unwrap()
    }

    fn parse(records: Value) -> Result<Vec<ReleaseRecord>, FeedError> {
        serde_json::from_value(records).map_err(|e| FeedError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl ReleaseFeed for MockReleaseFeed {
    async fn fetch_page(
        &self,
        _catalog_id: &str,
        _page: u32,
        ascending: bool,
    ) -> Result<Option<Vec<ReleaseRecord>>, FeedError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        *self.last_sort.lock().unwrap() = Some(ascending);

        let fail_after = self.fail_after.load(Ordering::SeqCst);
        if fail_after > 0 && call > fail_after {
            return Err(FeedError::Fetch("injected transport failure".to_string()));
        }

        if let Some(records) = self.endless_page.lock().unwrap().clone() {
            return Ok(Some(Self::parse(records)?));
        }

        match self.pages.lock().unwrap().pop_front() {
            Some(records) => Ok(Some(Self::parse(records)?)),
            None => Ok(None),
        }
    }
}
