//! Operation types and the typed GraphQL trait.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::GraphqlError;

/// GraphQL query wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphqlQuery {
    query: String,
}

impl GraphqlQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    pub fn from_static(query: &'static str) -> Self {
        Self::new(query)
    }

    pub fn as_str(&self) -> &str {
        &self.query
    }
}

/// Typed GraphQL operation definition.
///
/// Results travel from worker threads back to the UI thread, so both
/// variables and data must be `Send`.
pub trait GraphqlOperation {
    type Variables: Serialize + Clone + Send + 'static;
    type ResponseData: DeserializeOwned + Clone + Send + 'static;

    const QUERY: &'static str;
    const OPERATION_NAME: &'static str;
}

/// Request payload as sent over the wire.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest<V> {
    pub query: GraphqlQuery,
    pub variables: V,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
}

impl<V> GraphqlRequest<V> {
    pub fn new(query: GraphqlQuery, variables: V) -> Self {
        Self {
            query,
            variables,
            operation_name: None,
        }
    }

    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    pub fn for_operation<O>(variables: V) -> Self
    where
        O: GraphqlOperation<Variables = V>,
    {
        Self::new(GraphqlQuery::from_static(O::QUERY), variables)
            .with_operation_name(O::OPERATION_NAME)
    }
}

/// GraphQL response container. Both halves may be present at once.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct GraphqlResponse<T> {
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}
