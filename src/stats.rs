use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;

/// One ranked entry: a domain and how many rows referenced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainCount {
    domain: String,
    count: u64,
}

impl DomainCount {
    pub fn new(domain: impl Into<String>, count: u64) -> Self {
        Self {
            domain: domain.into(),
            count,
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

/// Running domain -> count map for a single run.
#[derive(Debug, Default)]
pub(crate) struct DomainTally {
    counts: HashMap<String, u64>,
}

impl DomainTally {
    pub(crate) fn record(&mut self, domain: &str) {
        // Avoid allocating a key for domains we've already seen.
        if let Some(count) = self.counts.get_mut(domain) {
            *count += 1;
        } else {
            self.counts.insert(domain.to_string(), 1);
        }
    }

    pub(crate) fn merge(mut self, other: DomainTally) -> DomainTally {
        for (domain, count) in other.counts {
            *self.counts.entry(domain).or_insert(0) += count;
        }
        self
    }

    pub(crate) fn into_ranked(self) -> Vec<DomainCount> {
        rank(self.counts)
    }
}

/// Orders by count descending; equal counts fall back to domain ascending.
pub fn rank(counts: HashMap<String, u64>) -> Vec<DomainCount> {
    let mut sorted: Vec<DomainCount> = counts
        .into_iter()
        .map(|(domain, count)| DomainCount { domain, count })
        .collect();
    sorted.sort_unstable_by(|a, b| b.count.cmp(&a.count).then_with(|| a.domain.cmp(&b.domain)));
    sorted
}

/// Row accounting for a run. `rows_counted` always equals the sum of the ranked counts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub rows_read: u64,
    pub rows_counted: u64,
    pub rows_skipped_malformed: u64,
    pub rows_skipped_invalid: u64,
}

impl ImportSummary {
    pub fn rows_skipped(&self) -> u64 {
        self.rows_skipped_malformed + self.rows_skipped_invalid
    }

    pub(crate) fn merge(self, other: ImportSummary) -> ImportSummary {
        ImportSummary {
            rows_read: self.rows_read + other.rows_read,
            rows_counted: self.rows_counted + other.rows_counted,
            rows_skipped_malformed: self.rows_skipped_malformed + other.rows_skipped_malformed,
            rows_skipped_invalid: self.rows_skipped_invalid + other.rows_skipped_invalid,
        }
    }
}

#[derive(Debug)]
pub struct ImportReport {
    pub domains: Vec<DomainCount>,
    pub summary: ImportSummary,
    pub elapsed: Duration,
}
