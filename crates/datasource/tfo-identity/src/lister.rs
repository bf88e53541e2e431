//! Paginated compartment listing.

use async_stream::try_stream;
use futures::{Stream, TryStreamExt, pin_mut};
use tfo_error::Result;
use tfo_traits::IdentityClient;
use tfo_types::{Compartment, ListCompartmentsRequest, ListCompartmentsResponse};
use tracing::{debug, info};

use crate::retry::{RetryPolicy, with_retry};
use crate::stats::ListingStats;

/// Drives `ListCompartments` across every page of a listing.
///
/// Pages are requested strictly one after another: the next cursor is only
/// known once the previous page has arrived. Each page request runs under the
/// retry policy; the pagination loop itself never retries.
pub struct PaginatedLister<C> {
    client: C,
    retry: RetryPolicy,
}

impl<C: IdentityClient> PaginatedLister<C> {
    /// Create a lister over a client with an already-resolved retry policy.
    pub fn new(client: C, retry: RetryPolicy) -> Self {
        Self { client, retry }
    }

    /// The underlying client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// The retry policy applied to each page request.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Stream every page of a listing.
    ///
    /// The first request is sent as given. While a response carries
    /// `opc_next_page`, the same request is re-sent with that cursor as its
    /// `page`. The stream ends after the first page without a cursor, or
    /// right after yielding the first error.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use futures::StreamExt;
    ///
    /// let stream = lister.pages(ListCompartmentsRequest::new(tenancy_id));
    /// pin_mut!(stream);
    ///
    /// while let Some(page) = stream.next().await {
    ///     let page = page?;
    ///     println!("{} compartments", page.items.len());
    /// }
    /// ```
    pub fn pages(
        &self,
        request: ListCompartmentsRequest,
    ) -> impl Stream<Item = Result<ListCompartmentsResponse>> + '_ {
        try_stream! {
            let mut request = request;
            let mut page_number: usize = 0;

            loop {
                let response = self.fetch_page(&request).await?;
                page_number += 1;

                debug!(
                    page = page_number,
                    items = response.items.len(),
                    has_next = response.has_next_page(),
                    opc_request_id = ?response.opc_request_id,
                    "Fetched compartments page"
                );

                let next_page = response.opc_next_page.clone();
                yield response;

                match next_page {
                    Some(cursor) => request.page = Some(cursor),
                    None => break,
                }
            }
        }
    }

    /// Fetch every page and concatenate the records in arrival order.
    ///
    /// All-or-nothing: if any page fails, the error is returned unchanged and
    /// the records accumulated so far are dropped.
    pub async fn fetch_all(&self, request: ListCompartmentsRequest) -> Result<Vec<Compartment>> {
        let mut stats = ListingStats::default();
        self.fetch_all_with_stats(request, &mut stats).await
    }

    /// Like [`fetch_all`](Self::fetch_all), recording pages into `stats`.
    pub async fn fetch_all_with_stats(
        &self,
        request: ListCompartmentsRequest,
        stats: &mut ListingStats,
    ) -> Result<Vec<Compartment>> {
        debug!(
            compartment_id = ?request.compartment_id,
            access_level = ?request.access_level,
            in_subtree = ?request.compartment_id_in_subtree,
            "Listing compartments"
        );

        let stream = self.pages(request);
        pin_mut!(stream);

        let mut items = Vec::new();
        while let Some(page) = stream.try_next().await? {
            stats.record_page(page.items.len());
            items.extend(page.items);
        }

        info!(
            pages = stats.pages_fetched,
            records = items.len(),
            "Listed compartments"
        );

        Ok(items)
    }

    async fn fetch_page(&self, request: &ListCompartmentsRequest) -> Result<ListCompartmentsResponse> {
        with_retry(&self.retry, "ListCompartments", || {
            self.client.list_compartments(request)
        })
        .await
    }
}
