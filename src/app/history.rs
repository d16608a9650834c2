//! Session-local search history.
//!
//! History is ordered most-recent-first and never holds the same value twice.
//! Committing a value that is already present promotes it to the front instead of
//! adding a second copy, so the length only grows for genuinely new values. An
//! optional bound evicts the oldest entries.

/// Most-recent-first list of committed search values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
    /// Maximum number of entries kept; `0` disables eviction.
    limit: usize,
}

impl History {
    /// Creates an empty history holding at most `limit` entries (`0` = unbounded).
    #[must_use]
    pub const fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit,
        }
    }

    /// Records `value` as the most recent entry.
    ///
    /// An existing occurrence is removed first (dedupe-and-promote). When the
    /// bound is exceeded the oldest entry is dropped.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hnsearch::app::History;
    ///
    /// let mut history = History::new(0);
    /// for value in ["baz", "foo", "bar"] {
    ///     history.commit(value);
    /// }
    /// history.commit("foo");
    /// assert_eq!(history.entries(), ["foo", "bar", "baz"]);
    /// ```
    pub fn commit(&mut self, value: &str) {
        if let Some(pos) = self.entries.iter().position(|entry| entry == value) {
            self.entries.remove(pos);
        }
        self.entries.insert(0, value.to_string());

        if self.limit > 0 && self.entries.len() > self.limit {
            let evicted = self.entries.len() - self.limit;
            self.entries.truncate(self.limit);
            tracing::trace!(evicted, limit = self.limit, "history bound reached");
        }
    }

    /// Entries, most recent first.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::History;

    fn history_of(values: &[&str]) -> History {
        let mut history = History::new(0);
        for value in values.iter().rev() {
            history.commit(value);
        }
        history
    }

    #[test]
    fn new_values_go_to_the_front() {
        let mut history = History::new(0);
        history.commit("rust");
        history.commit("tokio");

        assert_eq!(history.entries(), ["tokio", "rust"]);
    }

    #[test]
    fn committing_existing_value_promotes_without_growing() {
        let mut history = history_of(&["bar", "foo", "baz"]);
        history.commit("foo");

        assert_eq!(history.entries(), ["foo", "bar", "baz"]);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn committing_the_front_entry_is_a_no_op() {
        let mut history = history_of(&["foo", "bar"]);
        history.commit("foo");

        assert_eq!(history.entries(), ["foo", "bar"]);
    }

    #[test]
    fn bound_evicts_oldest() {
        let mut history = History::new(2);
        history.commit("a");
        history.commit("b");
        history.commit("c");

        assert_eq!(history.entries(), ["c", "b"]);
    }

    #[test]
    fn promotion_at_the_bound_does_not_evict() {
        let mut history = History::new(2);
        history.commit("a");
        history.commit("b");
        history.commit("a");

        assert_eq!(history.entries(), ["a", "b"]);
    }

    #[test]
    fn values_are_compared_exactly() {
        let mut history = History::new(0);
        history.commit("Rust");
        history.commit("rust");

        assert_eq!(history.len(), 2);
    }
}
