//! Shared fixtures for integration tests.

use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};
use serde_json::{Value, json};
use tfo_identity::{CompartmentsDataSource, MemoryIdentityClient, RetryPolicy};
use tfo_types::{Compartment, LifecycleState};

pub const TENANCY_ID: &str = "ocid1.tenancy.oc1..bbb";

/// A minimal active compartment directly under the tenancy.
pub fn compartment(n: usize) -> Compartment {
    Compartment::new(TENANCY_ID, LifecycleState::Active)
        .with_id(format!("ocid1.compartment.oc1..c{n}"))
        .with_name(format!("compartment-{n}"))
}

/// `count` compartments numbered from zero.
pub fn compartments(count: usize) -> Vec<Compartment> {
    (0..count).map(compartment).collect()
}

/// A compartment with every optional field set.
pub fn full_compartment() -> Compartment {
    let mut ops = BTreeMap::new();
    ops.insert("CostCenter".to_string(), json!("42"));
    let mut defined = BTreeMap::new();
    defined.insert("Operations".to_string(), ops);

    let mut freeform = BTreeMap::new();
    freeform.insert("team".to_string(), "net".to_string());

    Compartment::new(TENANCY_ID, LifecycleState::Inactive)
        .with_id("ocid1.compartment.oc1..aaa")
        .with_name("network")
        .with_description("shared networking")
        .with_inactive_status(5)
        .with_accessible(true)
        .with_time_created(Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap())
        .with_defined_tags(defined)
        .with_freeform_tags(freeform)
}

/// A data source that never retries.
pub fn data_source(client: MemoryIdentityClient) -> CompartmentsDataSource<MemoryIdentityClient> {
    CompartmentsDataSource::new(client, RetryPolicy::no_retry())
}

/// Configuration rooted at the tenancy.
pub fn config() -> Value {
    json!({"compartment_id": TENANCY_ID})
}

/// Configuration with the given filter blocks.
pub fn config_with_filters(filters: Value) -> Value {
    json!({"compartment_id": TENANCY_ID, "filter": filters})
}

/// The `compartments` list of a state object.
pub fn items(state: &Value) -> &Vec<Value> {
    state["compartments"]
        .as_array()
        .expect("compartments is a list")
}

/// The `id` of every item, in order.
pub fn ids(state: &Value) -> Vec<String> {
    items(state)
        .iter()
        .map(|item| item["id"].as_str().unwrap_or_default().to_string())
        .collect()
}
