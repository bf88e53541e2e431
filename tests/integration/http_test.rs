//! HTTP client tests against a live identity endpoint.

use std::env;

use tfo_identity::{CompartmentsDataSource, HttpIdentityClient, RetryPolicy};
use tfo_types::ClientConfig;

fn endpoint_config() -> Option<(ClientConfig, String)> {
    let endpoint = env::var("TFO_IDENTITY_ENDPOINT").ok()?;
    let compartment_id = env::var("TFO_COMPARTMENT_ID").ok()?;

    let mut config = ClientConfig::new().with_endpoint(endpoint).with_timeout(10);
    if let Ok(token) = env::var("TFO_AUTH_TOKEN") {
        config = config.with_auth_token(token);
    }
    Some((config, compartment_id))
}

#[tokio::test]
#[ignore = "requires an identity endpoint"]
async fn test_read_from_endpoint() {
    let Some((config, compartment_id)) = endpoint_config() else {
        eprintln!("TFO_IDENTITY_ENDPOINT or TFO_COMPARTMENT_ID not set, skipping test");
        return;
    };

    let client = HttpIdentityClient::new(&config).unwrap();
    let ds = CompartmentsDataSource::new(client, RetryPolicy::for_service("identity").with_max_retries(2))
        .with_page_limit(5);

    let (state, stats) = ds
        .read(serde_json::json!({
            "compartment_id": compartment_id,
            "compartment_id_in_subtree": true,
        }))
        .await
        .unwrap();

    let json = state.to_json();
    let items = json["compartments"].as_array().unwrap();
    assert_eq!(items.len(), stats.records_output);
    for item in items {
        assert!(item["compartment_id"].is_string());
        assert!(item["freeform_tags"].is_object());
        assert!(item["state"].is_string());
    }
}

#[tokio::test]
#[ignore = "requires an identity endpoint"]
async fn test_unknown_root_voids_state() {
    let Some((config, _)) = endpoint_config() else {
        eprintln!("TFO_IDENTITY_ENDPOINT or TFO_COMPARTMENT_ID not set, skipping test");
        return;
    };

    let client = HttpIdentityClient::new(&config).unwrap();
    let ds = CompartmentsDataSource::new(client, RetryPolicy::no_retry());

    let (state, _) = ds
        .read(serde_json::json!({"compartment_id": "ocid1.compartment.oc1..doesnotexist"}))
        .await
        .unwrap();

    assert!(state.is_void());
}
