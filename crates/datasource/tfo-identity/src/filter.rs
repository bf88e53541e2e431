//! Filtering of projected data source items.
//!
//! Implements Terraform `filter` blocks:
//!
//! ```hcl
//! filter {
//!   name   = "name"
//!   values = ["network", "shared-.*"]
//!   regex  = true
//! }
//! ```
//!
//! Filters apply to projected items (the same maps that end up in state),
//! never to raw service records. Multiple filters are ANDed; the values of
//! one filter are ORed. Order is preserved.

mod composite;
mod field;

pub use composite::FilterSet;
pub use field::{FieldFilter, FilterSpec};

use serde_json::{Map, Value};

/// A predicate over projected items.
pub trait Filter: Send + Sync {
    /// Whether `item` passes this filter.
    fn matches(&self, item: &Map<String, Value>) -> bool;

    /// Human-readable description for logging.
    fn description(&self) -> String;
}
