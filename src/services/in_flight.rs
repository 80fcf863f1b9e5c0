use std::collections::HashSet;

use parking_lot::Mutex;

/// Registry of product queries whose analysis is still outstanding.
///
/// Submitting the same query again while its analysis runs is refused, which
/// keeps a double-submitted form from tracking the product twice.
#[derive(Debug, Default)]
pub struct InFlightQueries {
    queries: Mutex<HashSet<String>>,
}

impl InFlightQueries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `query` as running. `None` when it already is.
    pub fn begin(&self, query: &str) -> Option<InFlightGuard<'_>> {
        let key = normalize(query);
        if !self.queries.lock().insert(key.clone()) {
            return None;
        }
        Some(InFlightGuard { owner: self, key })
    }

    pub fn is_running(&self, query: &str) -> bool {
        self.queries.lock().contains(&normalize(query))
    }
}

/// Releases its query when dropped.
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    owner: &'a InFlightQueries,
    key: String,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.owner.queries.lock().remove(&self.key);
    }
}

fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}
