//! In-memory identity client.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use tfo_error::{Result, ServiceError, TfoError};
use tfo_traits::IdentityClient;
use tfo_types::{Compartment, ListCompartmentsRequest, ListCompartmentsResponse};

type Scripted = std::result::Result<ListCompartmentsResponse, ServiceError>;

/// An identity client that answers from a script.
///
/// Each call pops the next scripted response (a page or a failure) in order
/// and records the request it was given, so tests can check exactly which
/// cursors were sent.
#[derive(Debug, Default)]
pub struct MemoryIdentityClient {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<ListCompartmentsRequest>>,
}

impl MemoryIdentityClient {
    /// Create a client with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a client that replays the given pages in order.
    pub fn from_pages(pages: impl IntoIterator<Item = ListCompartmentsResponse>) -> Self {
        let client = Self::new();
        client.script.lock().extend(pages.into_iter().map(Ok));
        client
    }

    /// Split records into pages of `page_size`, chained by `page-N` cursors.
    ///
    /// An empty record set still produces one empty page.
    pub fn paged(records: Vec<Compartment>, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let chunks: Vec<Vec<Compartment>> = records
            .chunks(page_size)
            .map(|chunk| chunk.to_vec())
            .collect();

        if chunks.is_empty() {
            return Self::from_pages([ListCompartmentsResponse::default()]);
        }

        let last = chunks.len() - 1;
        let pages = chunks.into_iter().enumerate().map(|(i, items)| {
            let page = ListCompartmentsResponse::new(items)
                .with_request_id(format!("memory-request-{}", i + 1));
            if i < last {
                page.with_next_page(format!("page-{}", i + 2))
            } else {
                page
            }
        });
        Self::from_pages(pages)
    }

    /// Append a page to the script.
    pub fn with_page(self, page: ListCompartmentsResponse) -> Self {
        self.script.lock().push_back(Ok(page));
        self
    }

    /// Append a failure to the script.
    pub fn with_failure(self, error: ServiceError) -> Self {
        self.script.lock().push_back(Err(error));
        self
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<ListCompartmentsRequest> {
        self.requests.lock().clone()
    }

    /// Number of scripted responses not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.lock().len()
    }
}

#[async_trait]
impl IdentityClient for MemoryIdentityClient {
    async fn list_compartments(
        &self,
        request: &ListCompartmentsRequest,
    ) -> Result<ListCompartmentsResponse> {
        self.requests.lock().push(request.clone());

        let next = self.script.lock().pop_front();
        match next {
            Some(Ok(page)) => Ok(page),
            Some(Err(e)) => Err(TfoError::Service(e)),
            None => Err(TfoError::Other(anyhow::anyhow!(
                "memory client has no scripted response for page {:?}",
                request.page
            ))),
        }
    }
}
