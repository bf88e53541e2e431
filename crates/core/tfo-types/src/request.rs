//! Request and response types for the paginated list call.

use serde::{Deserialize, Serialize};

use crate::compartment::{AccessLevel, Compartment};

/// Parameters for one `ListCompartments` call.
///
/// A request is built fresh for every read. Pagination reuses it and only
/// swaps `page`, so every other parameter stays identical across pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListCompartmentsRequest {
    /// Root of the listing (tenancy or parent compartment OCID)
    pub compartment_id: Option<String>,

    /// Access scope; `None` leaves the service default in place
    pub access_level: Option<AccessLevel>,

    /// Recurse into every descendant of `compartment_id`
    pub compartment_id_in_subtree: Option<bool>,

    /// Pagination cursor from a previous response; `None` for the first page
    pub page: Option<String>,

    /// Maximum items per page; `None` leaves the service default in place
    pub limit: Option<u32>,
}

impl ListCompartmentsRequest {
    /// Create a request rooted at the given compartment.
    pub fn new(compartment_id: impl Into<String>) -> Self {
        Self {
            compartment_id: Some(compartment_id.into()),
            ..Default::default()
        }
    }

    /// Set the access level.
    pub fn with_access_level(mut self, access_level: AccessLevel) -> Self {
        self.access_level = Some(access_level);
        self
    }

    /// Set whether to list the whole subtree.
    pub fn with_subtree(mut self, in_subtree: bool) -> Self {
        self.compartment_id_in_subtree = Some(in_subtree);
        self
    }

    /// Set the pagination cursor.
    pub fn with_page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    /// Set the page size.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// One page of a `ListCompartments` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListCompartmentsResponse {
    /// Records on this page, in service order
    pub items: Vec<Compartment>,

    /// Cursor for the next page; absent on the last page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opc_next_page: Option<String>,

    /// Service-assigned request id, for support tickets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opc_request_id: Option<String>,
}

impl ListCompartmentsResponse {
    /// Create a page holding the given items.
    pub fn new(items: Vec<Compartment>) -> Self {
        Self {
            items,
            ..Default::default()
        }
    }

    /// Set the next-page cursor.
    pub fn with_next_page(mut self, next_page: impl Into<String>) -> Self {
        self.opc_next_page = Some(next_page.into());
        self
    }

    /// Set the request id.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.opc_request_id = Some(request_id.into());
        self
    }

    /// Whether another page follows this one.
    pub fn has_next_page(&self) -> bool {
        self.opc_next_page.is_some()
    }
}
