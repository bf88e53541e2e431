//! Identity client implementations.
//!
//! - [`HttpIdentityClient`] - REST client for the identity service
//! - [`MemoryIdentityClient`] - Scripted pages for tests and fixture replay

mod http;
mod memory;

pub use http::{HttpIdentityClient, LIST_COMPARTMENTS_PATH, parse_list_response, query_params};
pub use memory::MemoryIdentityClient;
