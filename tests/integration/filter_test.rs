//! Filter blocks applied to the projected list.

use crate::common::{TENANCY_ID, compartments, config_with_filters, data_source, full_compartment, ids, items};
use serde_json::json;
use tfo_error::{SchemaError, TfoError};
use tfo_identity::{CompartmentsDataSource, MemoryIdentityClient, StateData};
use tfo_traits::ResourceData;
use tfo_types::{Compartment, LifecycleState};

fn mixed() -> Vec<Compartment> {
    vec![
        Compartment::new(TENANCY_ID, LifecycleState::Active).with_id("a").with_name("shared-net"),
        Compartment::new(TENANCY_ID, LifecycleState::Deleted).with_id("b").with_name("shared-db"),
        Compartment::new(TENANCY_ID, LifecycleState::Active).with_id("c").with_name("app"),
        Compartment::new(TENANCY_ID, LifecycleState::Active).with_id("d").with_name("shared-ops"),
    ]
}

#[tokio::test]
async fn test_filter_keeps_arrival_order() {
    let ds = data_source(MemoryIdentityClient::paged(mixed(), 2));
    let config = config_with_filters(json!([
        {"name": "state", "values": ["ACTIVE"]},
    ]));

    let (state, stats) = ds.read(config).await.unwrap();

    assert_eq!(ids(&state.to_json()), vec!["a", "c", "d"]);
    assert_eq!(stats.records_filtered, 1);
}

#[tokio::test]
async fn test_multiple_filters_all_apply() {
    let ds = data_source(MemoryIdentityClient::paged(mixed(), 3));
    let config = config_with_filters(json!([
        {"name": "state", "values": ["ACTIVE"]},
        {"name": "name", "values": ["^shared-"], "regex": true},
    ]));

    let (state, _) = ds.read(config).await.unwrap();

    assert_eq!(ids(&state.to_json()), vec!["a", "d"]);
}

#[tokio::test]
async fn test_values_within_filter_are_alternatives() {
    let ds = data_source(MemoryIdentityClient::paged(mixed(), 10));
    let config = config_with_filters(json!([
        {"name": "name", "values": ["app", "shared-db"]},
    ]));

    let (state, _) = ds.read(config).await.unwrap();

    assert_eq!(ids(&state.to_json()), vec!["b", "c"]);
}

#[tokio::test]
async fn test_filter_on_tags() {
    let mut records = compartments(2);
    records.push(full_compartment());
    let ds = data_source(MemoryIdentityClient::paged(records, 10));
    let config = config_with_filters(json!([
        {"name": "freeform_tags.team", "values": ["net"]},
        {"name": "defined_tags.Operations.CostCenter", "values": ["42"]},
    ]));

    let (state, _) = ds.read(config).await.unwrap();

    assert_eq!(ids(&state.to_json()), vec!["ocid1.compartment.oc1..aaa"]);
}

#[tokio::test]
async fn test_filter_on_bool_and_computed_string() {
    let ds = data_source(MemoryIdentityClient::paged(vec![full_compartment()], 10));
    let config = config_with_filters(json!([
        {"name": "is_accessible", "values": ["true"]},
        {"name": "inactive_state", "values": ["5"]},
    ]));

    let (state, _) = ds.read(config).await.unwrap();

    assert_eq!(items(&state.to_json()).len(), 1);
}

#[tokio::test]
async fn test_filter_matching_nothing() {
    let ds = data_source(MemoryIdentityClient::paged(mixed(), 10));
    let config = config_with_filters(json!([
        {"name": "name", "values": ["missing"]},
    ]));

    let (state, stats) = ds.read(config).await.unwrap();

    assert!(items(&state.to_json()).is_empty());
    assert_eq!(stats.records_output, 0);
    assert_eq!(stats.records_filtered, 4);
}

#[tokio::test]
async fn test_invalid_regex_value_never_matches() {
    let ds = data_source(MemoryIdentityClient::paged(mixed(), 10));
    let config = config_with_filters(json!([
        {"name": "name", "values": ["shared-(", "app"], "regex": true},
    ]));

    let (state, _) = ds.read(config).await.unwrap();

    assert_eq!(ids(&state.to_json()), vec!["c"]);
}

#[tokio::test]
async fn test_invalid_regex_reread_replaces_stale_output() {
    let ds = data_source(MemoryIdentityClient::paged(mixed(), 10));
    let config = config_with_filters(json!([
        {"name": "name", "values": ["("], "regex": true},
    ]));
    let mut state =
        StateData::from_config(CompartmentsDataSource::<MemoryIdentityClient>::schema(), config)
            .unwrap();
    state.set_id("first-read-id");
    state
        .set(
            "compartments",
            json!([{"compartment_id": "root", "freeform_tags": {}, "id": "old", "state": "ACTIVE"}]),
        )
        .unwrap();

    ds.read_into(&mut state).await.unwrap();

    assert_ne!(state.id(), "first-read-id");
    assert_eq!(state.get_ok("compartments"), Some(&json!([])));
}

#[tokio::test]
async fn test_filter_block_validated() {
    let ds = data_source(MemoryIdentityClient::paged(mixed(), 10));
    let config = config_with_filters(json!([
        {"name": "name"},
    ]));

    let err = ds.read(config).await.unwrap_err();

    assert!(matches!(
        err,
        TfoError::Schema(SchemaError::MissingRequired(ref field)) if field == "filter.0.values"
    ));
    assert!(ds.lister().client().requests().is_empty());
}
