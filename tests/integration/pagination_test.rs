//! Pagination through the data source.

use crate::common::{compartment, compartments, config, data_source, ids};
use tfo_error::{ServiceError, TfoError};
use tfo_identity::{MemoryIdentityClient, PaginatedLister, RetryPolicy};
use tfo_traits::ResourceData;
use tfo_types::{ListCompartmentsRequest, ListCompartmentsResponse};

fn server_error() -> ServiceError {
    ServiceError::Status {
        status: 500,
        code: "InternalServerError".to_string(),
        message: "try again".to_string(),
        opc_request_id: Some("req-500".to_string()),
    }
}

#[tokio::test]
async fn test_all_pages_concatenated_in_order() {
    let records = compartments(7);
    let expected: Vec<String> = records.iter().filter_map(|c| c.id.clone()).collect();
    let ds = data_source(MemoryIdentityClient::paged(records, 3));

    let (state, stats) = ds.read(config()).await.unwrap();

    assert_eq!(ids(&state.to_json()), expected);
    assert_eq!(stats.pages_fetched, 3);
    assert_eq!(stats.records_listed, 7);
}

#[tokio::test]
async fn test_cursor_passed_to_following_requests() {
    let ds = data_source(MemoryIdentityClient::paged(compartments(5), 2));
    ds.read(config()).await.unwrap();

    let pages: Vec<Option<String>> = ds
        .lister()
        .client()
        .requests()
        .into_iter()
        .map(|r| r.page)
        .collect();
    assert_eq!(
        pages,
        vec![None, Some("page-2".to_string()), Some("page-3".to_string())]
    );
}

#[tokio::test]
async fn test_empty_pages_do_not_end_listing() {
    let client = MemoryIdentityClient::new()
        .with_page(ListCompartmentsResponse::new(vec![]).with_next_page("p2"))
        .with_page(ListCompartmentsResponse::new(vec![compartment(1)]));
    let ds = data_source(client);

    let (state, _) = ds.read(config()).await.unwrap();

    assert_eq!(ids(&state.to_json()), vec!["ocid1.compartment.oc1..c1"]);
}

#[tokio::test]
async fn test_failed_page_discards_everything() {
    let client = MemoryIdentityClient::new()
        .with_page(ListCompartmentsResponse::new(vec![compartment(1)]).with_next_page("p2"))
        .with_page(ListCompartmentsResponse::new(vec![compartment(2)]).with_next_page("p3"))
        .with_failure(server_error());
    let lister = PaginatedLister::new(client, RetryPolicy::no_retry());

    let err = lister
        .fetch_all(ListCompartmentsRequest::new(crate::common::TENANCY_ID))
        .await
        .unwrap_err();

    match err {
        TfoError::Service(ServiceError::Status { status, opc_request_id, .. }) => {
            assert_eq!(status, 500);
            assert_eq!(opc_request_id.as_deref(), Some("req-500"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_failed_read_leaves_state_empty() {
    let client = MemoryIdentityClient::new()
        .with_page(ListCompartmentsResponse::new(vec![compartment(1)]).with_next_page("p2"))
        .with_failure(server_error());
    let ds = data_source(client);
    let mut state = tfo_identity::StateData::from_config(
        tfo_identity::CompartmentsDataSource::<MemoryIdentityClient>::schema(),
        config(),
    )
    .unwrap();

    assert!(ds.read_into(&mut state).await.is_err());
    assert!(state.get_ok("compartments").is_none());
    assert_eq!(state.id(), "");
}

#[tokio::test]
async fn test_transient_failure_retried_within_page() {
    let client = MemoryIdentityClient::new()
        .with_page(ListCompartmentsResponse::new(vec![compartment(1)]).with_next_page("p2"))
        .with_failure(server_error())
        .with_page(ListCompartmentsResponse::new(vec![compartment(2)]));
    let retry = RetryPolicy::new()
        .with_max_retries(2)
        .with_initial_backoff_ms(1)
        .with_jitter(false);
    let ds = tfo_identity::CompartmentsDataSource::new(client, retry);

    let (state, stats) = ds.read(config()).await.unwrap();

    assert_eq!(
        ids(&state.to_json()),
        vec!["ocid1.compartment.oc1..c1", "ocid1.compartment.oc1..c2"]
    );
    assert_eq!(stats.pages_fetched, 2);

    let pages: Vec<Option<String>> = ds
        .lister()
        .client()
        .requests()
        .into_iter()
        .map(|r| r.page)
        .collect();
    assert_eq!(
        pages,
        vec![None, Some("p2".to_string()), Some("p2".to_string())]
    );
}

#[tokio::test]
async fn test_empty_listing_is_success() {
    let ds = data_source(MemoryIdentityClient::paged(Vec::new(), 10));

    let (state, stats) = ds.read(config()).await.unwrap();

    let json = state.to_json();
    assert!(json["compartments"].as_array().unwrap().is_empty());
    assert!(json["id"].is_string());
    assert_eq!(stats.pages_fetched, 1);
    assert_eq!(stats.records_output, 0);
}
