//! Projection of compartment records into data source output.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tfo_types::{Compartment, format_sdk_time};

use crate::tags::defined_tags_to_map;

/// One element of the `compartments` output list.
///
/// Serialized, an absent `Option` field is an absent key. Presence rules:
///
/// | field            | present when                         |
/// |------------------|--------------------------------------|
/// | `compartment_id` | always (the record's parent)         |
/// | `defined_tags`   | record has defined tags              |
/// | `description`    | record has a description             |
/// | `freeform_tags`  | always, `{}` when the record has none |
/// | `id`             | record has an id                     |
/// | `inactive_state` | record has an inactive bitmask       |
/// | `is_accessible`  | record has the flag                  |
/// | `name`           | record has a name                    |
/// | `state`          | always, verbatim                     |
/// | `time_created`   | record has a creation time           |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompartmentView {
    pub compartment_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defined_tags: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub freeform_tags: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Inactive-status bitmask in base 10
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inactive_state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_accessible: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub state: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_created: Option<String>,
}

impl From<&Compartment> for CompartmentView {
    fn from(record: &Compartment) -> Self {
        Self {
            compartment_id: record.compartment_id.clone(),
            defined_tags: record.defined_tags.as_ref().map(defined_tags_to_map),
            description: record.description.clone(),
            freeform_tags: record.freeform_tags.clone().unwrap_or_default(),
            id: record.id.clone(),
            inactive_state: record.inactive_status.map(|bits| bits.to_string()),
            is_accessible: record.is_accessible,
            name: record.name.clone(),
            state: record.lifecycle_state.as_str().to_string(),
            time_created: record.time_created.as_ref().map(format_sdk_time),
        }
    }
}

/// Project records into output views, preserving their order.
pub fn project(records: &[Compartment]) -> Vec<CompartmentView> {
    records.iter().map(CompartmentView::from).collect()
}
