//! Field presence of projected compartments.

use crate::common::{TENANCY_ID, config, data_source, full_compartment, items};
use serde_json::{Value, json};
use tfo_identity::MemoryIdentityClient;
use tfo_types::{Compartment, LifecycleState};

async fn read_one(record: Compartment) -> Value {
    let ds = data_source(MemoryIdentityClient::paged(vec![record], 10));
    let (state, _) = ds.read(config()).await.unwrap();
    let state = state.to_json();
    items(&state)[0].clone()
}

#[tokio::test]
async fn test_full_record() {
    let item = read_one(full_compartment()).await;

    assert_eq!(
        item,
        json!({
            "compartment_id": TENANCY_ID,
            "defined_tags": {"Operations.CostCenter": "42"},
            "description": "shared networking",
            "freeform_tags": {"team": "net"},
            "id": "ocid1.compartment.oc1..aaa",
            "inactive_state": "5",
            "is_accessible": true,
            "name": "network",
            "state": "INACTIVE",
            "time_created": "2024-03-01 12:30:00 +0000 UTC",
        })
    );
}

#[tokio::test]
async fn test_minimal_record() {
    let item = read_one(Compartment::new(TENANCY_ID, LifecycleState::Creating)).await;

    assert_eq!(
        item,
        json!({
            "compartment_id": TENANCY_ID,
            "freeform_tags": {},
            "state": "CREATING",
        })
    );
}

#[tokio::test]
async fn test_description_presence() {
    let without = read_one(Compartment::new(TENANCY_ID, LifecycleState::Active)).await;
    assert!(without.get("description").is_none());

    let with = read_one(Compartment::new(TENANCY_ID, LifecycleState::Active).with_description("x")).await;
    assert_eq!(with["description"], "x");
}

#[tokio::test]
async fn test_inactive_state_is_decimal_string() {
    let item = read_one(
        Compartment::new(TENANCY_ID, LifecycleState::Inactive).with_inactive_status(5),
    )
    .await;

    assert_eq!(item["inactive_state"], json!("5"));
    assert!(item["inactive_state"].as_i64().is_none());
}

#[tokio::test]
async fn test_compartment_id_is_parent() {
    let item = read_one(
        Compartment::new("ocid1.tenancy.bbb", LifecycleState::Active).with_id("ocid1.compartment.aaa"),
    )
    .await;

    assert_eq!(item["compartment_id"], "ocid1.tenancy.bbb");
    assert_eq!(item["id"], "ocid1.compartment.aaa");
}

#[tokio::test]
async fn test_unknown_state_kept_verbatim() {
    let record: Compartment = serde_json::from_value(json!({
        "compartmentId": TENANCY_ID,
        "lifecycleState": "ARCHIVED",
    }))
    .unwrap();

    let item = read_one(record).await;
    assert_eq!(item["state"], "ARCHIVED");
}
