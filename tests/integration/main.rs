//! Integration tests for the compartments data source.
//!
//! Most tests drive the data source end to end over scripted pages from
//! `MemoryIdentityClient`. The HTTP tests need a live identity endpoint and
//! are marked `#[ignore]`.
//!
//! ## Running the HTTP tests
//!
//! ```bash
//! TFO_IDENTITY_ENDPOINT=http://localhost:8080 TFO_COMPARTMENT_ID=ocid1.tenancy.oc1..aaa \
//!     cargo test -p integration-tests -- --ignored
//! ```

mod common;
mod filter_test;
mod http_test;
mod lifecycle_test;
mod pagination_test;
mod projection_test;
