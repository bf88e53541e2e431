//! Identity client trait.

use async_trait::async_trait;
use std::sync::Arc;
use tfo_error::Result;
use tfo_types::{ListCompartmentsRequest, ListCompartmentsResponse};

/// Trait for identity service backends.
///
/// Implementations include:
/// - In-memory scripted pages (for testing and fixture replay)
/// - HTTP client against the identity REST API (production)
///
/// One call returns one page. Callers drive pagination by feeding
/// `opc_next_page` back in as the request's `page`.
#[async_trait]
pub trait IdentityClient: Send + Sync {
    /// Lists one page of compartments.
    async fn list_compartments(
        &self,
        request: &ListCompartmentsRequest,
    ) -> Result<ListCompartmentsResponse>;
}

#[async_trait]
impl<T: IdentityClient + ?Sized> IdentityClient for Arc<T> {
    async fn list_compartments(
        &self,
        request: &ListCompartmentsRequest,
    ) -> Result<ListCompartmentsResponse> {
        (**self).list_compartments(request).await
    }
}
