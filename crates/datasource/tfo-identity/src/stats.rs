//! Statistics for data source reads.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Statistics collected while reading a list data source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingStats {
    /// When the read started
    pub started_at: Option<DateTime<Utc>>,

    /// When the read completed
    pub completed_at: Option<DateTime<Utc>>,

    /// Number of pages fetched from the service
    pub pages_fetched: usize,

    /// Number of records across all pages (before filtering)
    pub records_listed: usize,

    /// Number of records written to state (passed filters)
    pub records_output: usize,

    /// Number of records removed by filters
    pub records_filtered: usize,
}

impl ListingStats {
    /// Create a new stats tracker with the current time as start time.
    pub fn new() -> Self {
        Self {
            started_at: Some(Utc::now()),
            ..Default::default()
        }
    }

    /// Mark the read as complete with the current time.
    pub fn complete(&mut self) {
        self.completed_at = Some(Utc::now());
    }

    /// Record one fetched page.
    pub fn record_page(&mut self, records: usize) {
        self.pages_fetched += 1;
        self.records_listed += records;
    }

    /// Record the outcome of filtering.
    pub fn record_filtered(&mut self, before: usize, after: usize) {
        self.records_output = after;
        self.records_filtered = before.saturating_sub(after);
    }

    /// Get the duration of the read.
    pub fn duration(&self) -> Option<Duration> {
        match (self.started_at, self.completed_at) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    /// Calculate the throughput in listed records per second.
    pub fn records_per_second(&self) -> Option<f64> {
        self.duration().map(|d| {
            let secs = d.num_milliseconds() as f64 / 1000.0;
            if secs > 0.0 {
                self.records_listed as f64 / secs
            } else {
                0.0
            }
        })
    }
}
