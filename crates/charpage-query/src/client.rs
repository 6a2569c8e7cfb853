//! GraphQL client executing typed operations over a [`Transport`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::QueryError;
use crate::operation::{GraphqlOperation, GraphqlRequest, GraphqlResponse};
use crate::transport::Transport;

/// How server-reported GraphQL errors interact with returned data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Any GraphQL error discards the data half of the response.
    #[default]
    None,
    /// Keep whatever data arrived alongside the errors.
    All,
}

/// Outcome of one execution. Data and error may both be present.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult<T> {
    pub data: Option<T>,
    pub error: Option<QueryError>,
}

impl<T> QueryResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(error: QueryError) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }

    pub fn is_partial(&self) -> bool {
        self.data.is_some() && self.error.is_some()
    }

    fn from_response(response: GraphqlResponse<T>, policy: ErrorPolicy) -> Self {
        let GraphqlResponse { data, errors } = response;
        if errors.is_empty() {
            return match data {
                Some(data) => Self::ok(data),
                None => Self::failed(QueryError::Protocol {
                    message: "response carried neither data nor errors".to_string(),
                }),
            };
        }
        let error = QueryError::Graphql { errors };
        match policy {
            ErrorPolicy::None => Self::failed(error),
            ErrorPolicy::All => Self {
                data,
                error: Some(error),
            },
        }
    }
}

/// Request counters.
#[derive(Debug, Default)]
pub struct ClientMetrics {
    requests_total: AtomicU64,
    requests_success: AtomicU64,
    requests_error: AtomicU64,
}

impl ClientMetrics {
    pub fn snapshot(&self) -> ClientMetricsSnapshot {
        ClientMetricsSnapshot {
            requests_total: self.requests_total.load(Ordering::Relaxed),
            requests_success: self.requests_success.load(Ordering::Relaxed),
            requests_error: self.requests_error.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientMetricsSnapshot {
    pub requests_total: u64,
    pub requests_success: u64,
    /// Requests that produced any error, including partial results.
    pub requests_error: u64,
}

/// Cheap to clone and `Send`, so a copy can move into worker jobs.
#[derive(Clone)]
pub struct GraphqlClient {
    transport: Arc<dyn Transport>,
    metrics: Arc<ClientMetrics>,
}

impl GraphqlClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            metrics: Arc::new(ClientMetrics::default()),
        }
    }

    pub fn metrics(&self) -> ClientMetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Execute a typed operation. Blocks the calling thread.
    pub fn execute<O: GraphqlOperation>(
        &self,
        variables: O::Variables,
        policy: ErrorPolicy,
    ) -> QueryResult<O::ResponseData> {
        self.metrics.requests_total.fetch_add(1, Ordering::Relaxed);
        log::debug!("executing {}", O::OPERATION_NAME);

        let result = match self.fetch::<O>(variables) {
            Ok(response) => QueryResult::from_response(response, policy),
            Err(error) => QueryResult::failed(error),
        };

        if let Some(error) = &result.error {
            self.metrics.requests_error.fetch_add(1, Ordering::Relaxed);
            log::warn!("{} failed: {error}", O::OPERATION_NAME);
        } else {
            self.metrics.requests_success.fetch_add(1, Ordering::Relaxed);
        }
        result
    }

    fn fetch<O: GraphqlOperation>(
        &self,
        variables: O::Variables,
    ) -> Result<GraphqlResponse<O::ResponseData>, QueryError> {
        let request = GraphqlRequest::for_operation::<O>(variables);
        let body = serde_json::to_value(&request)?;
        let bytes = self.transport.post_json(&body)?;
        let response = serde_json::from_slice(&bytes)?;
        Ok(response)
    }
}

impl std::fmt::Debug for GraphqlClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphqlClient")
            .field("metrics", &self.metrics.snapshot())
            .finish_non_exhaustive()
    }
}
