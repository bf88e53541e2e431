//! REST client for the identity service.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::HeaderMap;
use serde::Deserialize;
use std::time::Duration;
use tfo_error::{Result, ServiceError, TfoError};
use tfo_traits::IdentityClient;
use tfo_types::{ClientConfig, Compartment, ListCompartmentsRequest, ListCompartmentsResponse};
use tracing::{debug, warn};

/// Path of the list-compartments operation (API version 20160918).
pub const LIST_COMPARTMENTS_PATH: &str = "/20160918/compartments";

const OPC_NEXT_PAGE: &str = "opc-next-page";
const OPC_REQUEST_ID: &str = "opc-request-id";
const DEFAULT_USER_AGENT: &str = concat!("tfo-identity/", env!("CARGO_PKG_VERSION"));

/// Identity client speaking the REST API over HTTP.
///
/// Requests carry a bearer token when one is configured. Request signing is
/// left to whatever sits in front of the endpoint (a signing proxy or a mock).
pub struct HttpIdentityClient {
    client: Client,
    endpoint: String,
    auth_token: Option<String>,
}

impl HttpIdentityClient {
    /// Create a client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(user_agent)
            .build()
            .map_err(|e| TfoError::Config(format!("Failed to create HTTP client: {e}")))?;

        let endpoint = config.resolved_endpoint();
        debug!(endpoint = %endpoint, "Identity client created");

        Ok(Self {
            client,
            endpoint,
            auth_token: config.auth_token.clone(),
        })
    }

    /// The base URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl IdentityClient for HttpIdentityClient {
    async fn list_compartments(
        &self,
        request: &ListCompartmentsRequest,
    ) -> Result<ListCompartmentsResponse> {
        let url = format!("{}{}", self.endpoint, LIST_COMPARTMENTS_PATH);

        let mut builder = self.client.get(&url).query(&query_params(request));
        if let Some(token) = &self.auth_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.text().await.map_err(transport_error)?;

        parse_list_response(status, &headers, &body)
    }
}

/// Query parameters for a list request, in the service's spelling.
///
/// Unset parameters are left out so the service applies its defaults.
pub fn query_params(request: &ListCompartmentsRequest) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();

    if let Some(compartment_id) = &request.compartment_id {
        params.push(("compartmentId", compartment_id.clone()));
    }
    if let Some(access_level) = request.access_level {
        params.push(("accessLevel", access_level.as_str().to_string()));
    }
    if let Some(in_subtree) = request.compartment_id_in_subtree {
        params.push(("compartmentIdInSubtree", in_subtree.to_string()));
    }
    if let Some(page) = &request.page {
        params.push(("page", page.clone()));
    }
    if let Some(limit) = request.limit {
        params.push(("limit", limit.to_string()));
    }

    params
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Turn a raw HTTP response into one page, or into the service's error.
pub fn parse_list_response(
    status: u16,
    headers: &HeaderMap,
    body: &str,
) -> Result<ListCompartmentsResponse> {
    let opc_request_id = header_value(headers, OPC_REQUEST_ID);

    if !(200..300).contains(&status) {
        let parsed: Option<ErrorBody> = serde_json::from_str(body).ok();
        let (code, message) = match parsed {
            Some(err) => (
                err.code.unwrap_or_else(|| "Unknown".to_string()),
                err.message.unwrap_or_default(),
            ),
            None => ("Unknown".to_string(), body.to_string()),
        };

        warn!(
            status = status,
            code = %code,
            opc_request_id = ?opc_request_id,
            "ListCompartments returned error status"
        );

        return Err(TfoError::Service(ServiceError::Status {
            status,
            code,
            message,
            opc_request_id,
        }));
    }

    let items: Vec<Compartment> = serde_json::from_str(body)
        .map_err(|e| ServiceError::Decode(format!("ListCompartments body: {e}")))?;

    Ok(ListCompartmentsResponse {
        items,
        opc_next_page: header_value(headers, OPC_NEXT_PAGE),
        opc_request_id,
    })
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}

fn transport_error(e: reqwest::Error) -> TfoError {
    if e.is_timeout() {
        TfoError::Service(ServiceError::Timeout(e.to_string()))
    } else if e.is_decode() {
        TfoError::Service(ServiceError::Decode(e.to_string()))
    } else {
        TfoError::Service(ServiceError::Transport(e.to_string()))
    }
}
