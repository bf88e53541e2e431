//! Read lifecycle: configuration validation, ids, and missing roots.

use crate::common::{TENANCY_ID, compartments, config, data_source};
use serde_json::json;
use tfo_error::{SchemaError, ServiceError, TfoError};
use tfo_identity::{CompartmentsDataSource, MemoryIdentityClient, StateData};
use tfo_traits::ResourceData;

fn not_found() -> ServiceError {
    ServiceError::Status {
        status: 404,
        code: "NotAuthorizedOrNotFound".to_string(),
        message: "Authorization failed or requested resource not found".to_string(),
        opc_request_id: None,
    }
}

#[tokio::test]
async fn test_state_id_is_utc_timestamp() {
    let ds = data_source(MemoryIdentityClient::paged(compartments(1), 10));

    let (state, _) = ds.read(config()).await.unwrap();

    let id = state.id().to_string();
    assert!(id.ends_with(" +0000 UTC"), "unexpected id {id}");
    assert!(chrono::NaiveDateTime::parse_from_str(&id[..19], "%Y-%m-%d %H:%M:%S").is_ok());
}

#[tokio::test]
async fn test_configuration_kept_in_state() {
    let ds = data_source(MemoryIdentityClient::paged(compartments(1), 10));
    let config = json!({
        "compartment_id": TENANCY_ID,
        "access_level": "ANY",
        "compartment_id_in_subtree": false,
    });

    let (state, _) = ds.read(config).await.unwrap();
    let json = state.to_json();

    assert_eq!(json["compartment_id"], TENANCY_ID);
    assert_eq!(json["access_level"], "ANY");
    assert_eq!(json["compartment_id_in_subtree"], false);
}

#[tokio::test]
async fn test_missing_compartment_id_rejected() {
    let ds = data_source(MemoryIdentityClient::paged(compartments(1), 10));

    let err = ds.read(json!({"access_level": "ANY"})).await.unwrap_err();

    assert!(matches!(
        err,
        TfoError::Schema(SchemaError::MissingRequired(ref field)) if field == "compartment_id"
    ));
}

#[tokio::test]
async fn test_computed_output_not_configurable() {
    let ds = data_source(MemoryIdentityClient::paged(compartments(1), 10));

    let err = ds
        .read(json!({"compartment_id": TENANCY_ID, "compartments": []}))
        .await
        .unwrap_err();

    assert!(matches!(err, TfoError::Schema(_)));
}

#[tokio::test]
async fn test_missing_root_voids_state() {
    let ds = data_source(MemoryIdentityClient::new().with_failure(not_found()));

    let (state, stats) = ds.read(config()).await.unwrap();

    assert!(state.is_void());
    assert_eq!(state.to_json(), json!({"compartment_id": TENANCY_ID}));
    assert_eq!(stats.pages_fetched, 0);
}

#[tokio::test]
async fn test_reread_replaces_previous_output() {
    let ds = data_source(
        MemoryIdentityClient::paged(compartments(3), 10).with_failure(not_found()),
    );
    let mut state =
        StateData::from_config(CompartmentsDataSource::<MemoryIdentityClient>::schema(), config())
            .unwrap();

    ds.read_into(&mut state).await.unwrap();
    assert_eq!(state.get_ok("compartments").unwrap().as_array().unwrap().len(), 3);

    ds.read_into(&mut state).await.unwrap();
    assert!(state.is_void());
    assert!(state.get_ok("compartments").is_none());
}
