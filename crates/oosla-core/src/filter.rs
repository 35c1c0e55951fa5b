use crate::types::IssueCategory;
use std::collections::HashSet;

// ---------------------------------------------------------------------------
// ExclusionFilter
// ---------------------------------------------------------------------------

/// Pre-classification gate: drops exception-listed keys, duplicate keys
/// within a run, and long-tail ticket types still under the maturity
/// floor. Guarantees each distinct key is classified at most once per
/// run.
#[derive(Debug)]
pub struct ExclusionFilter {
    exceptions: HashSet<String>,
    seen: HashSet<String>,
}

impl ExclusionFilter {
    pub fn new(exceptions: impl IntoIterator<Item = String>) -> Self {
        Self {
            exceptions: exceptions.into_iter().collect(),
            seen: HashSet::new(),
        }
    }

    /// Returns true when the ticket should flow on to classification,
    /// recording the key as seen. Skips (in order): exception list,
    /// duplicates from the remote search result, and tickets of a
    /// category that is neither security-class nor always-tracked while
    /// younger than `maturity_floor_hours`.
    pub fn should_process(
        &mut self,
        key: &str,
        category: IssueCategory,
        age_hours: f64,
        maturity_floor_hours: f64,
    ) -> bool {
        if self.exceptions.contains(key) {
            return false;
        }
        if self.seen.contains(key) {
            return false;
        }
        if !category.always_tracked() && age_hours < maturity_floor_hours {
            return false;
        }
        self.seen.insert(key.to_string());
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
