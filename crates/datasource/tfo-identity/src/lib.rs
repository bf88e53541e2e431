//! tfo-identity - Identity data sources for tfo.
//!
//! This crate reads the `compartments` data source:
//!
//! - Paginated `ListCompartments` with per-page retry
//! - Projection of records into schema-shaped output with exact field presence
//! - Terraform-style `filter` blocks over the projected items
//! - Schema validation of configuration and state writes
//!
//! # Example
//!
//! ```ignore
//! use serde_json::json;
//! use tfo_identity::{CompartmentsDataSource, HttpIdentityClient, RetryPolicy};
//! use tfo_types::ClientConfig;
//!
//! let client = HttpIdentityClient::new(&ClientConfig::new().with_region("eu-frankfurt-1"))?;
//! let data_source = CompartmentsDataSource::new(client, RetryPolicy::for_service("identity"));
//!
//! let (state, stats) = data_source
//!     .read(json!({
//!         "compartment_id": tenancy_id,
//!         "compartment_id_in_subtree": true,
//!         "filter": [{"name": "state", "values": ["ACTIVE"]}],
//!     }))
//!     .await?;
//!
//! eprintln!("Read {} compartments", stats.records_output);
//! ```

pub mod client;
pub mod data_source;
pub mod filter;
pub mod lifecycle;
pub mod lister;
pub mod project;
pub mod retry;
pub mod schema;
pub mod state;
pub mod stats;
pub mod tags;

pub use client::{HttpIdentityClient, MemoryIdentityClient};
pub use data_source::{CompartmentsDataSource, CompartmentsDataSourceCrud};
pub use filter::{FieldFilter, Filter, FilterSet, FilterSpec};
pub use lifecycle::{generate_data_source_id, read_resource};
pub use lister::PaginatedLister;
pub use project::{CompartmentView, project};
pub use retry::{IDENTITY_SERVICE, RetryPolicy, with_retry};
pub use schema::{
    Element, FieldSchema, FieldType, Presence, ResourceSchema, compartment_item_schema,
    compartments_data_source_schema, filter_schema,
};
pub use state::StateData;
pub use stats::ListingStats;
pub use tags::defined_tags_to_map;
