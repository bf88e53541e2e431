//! Combining filter blocks with AND logic.

use serde_json::{Map, Value};
use tfo_error::Result;
use tracing::debug;

use super::{FieldFilter, Filter, FilterSpec};
use crate::schema::ResourceSchema;

/// All `filter` blocks of one data source, ANDed together.
///
/// An item survives only if it passes every filter. An empty set passes
/// everything.
pub struct FilterSet {
    filters: Vec<Box<dyn Filter>>,
}

impl Default for FilterSet {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterSet {
    /// Create an empty filter set.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Build field filters for each spec, resolving names against `schema`.
    ///
    /// Fails on the first malformed spec.
    pub fn from_specs(specs: &[FilterSpec], schema: &ResourceSchema) -> Result<Self> {
        let mut set = Self::new();
        for spec in specs {
            set.add_filter(Box::new(FieldFilter::new(spec, schema)?));
        }
        Ok(set)
    }

    /// Add a filter.
    pub fn add_filter(&mut self, filter: Box<dyn Filter>) {
        self.filters.push(filter);
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn filter_descriptions(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.description()).collect()
    }

    /// Keep the items that pass, in their original order.
    pub fn apply(&self, items: Vec<Map<String, Value>>) -> Vec<Map<String, Value>> {
        if self.filters.is_empty() {
            return items;
        }

        let before = items.len();
        let kept: Vec<_> = items.into_iter().filter(|item| self.matches(item)).collect();
        debug!(
            filter = %self.description(),
            before,
            after = kept.len(),
            "Applied filters"
        );
        kept
    }
}

impl Filter for FilterSet {
    fn matches(&self, item: &Map<String, Value>) -> bool {
        self.filters.iter().all(|f| f.matches(item))
    }

    fn description(&self) -> String {
        if self.filters.is_empty() {
            "all(empty)".to_string()
        } else {
            format!("all({})", self.filter_descriptions().join(" AND "))
        }
    }
}

impl std::fmt::Debug for FilterSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterSet")
            .field("filters", &self.filter_descriptions())
            .finish()
    }
}
