//! Charpage Query - GraphQL client plumbing for the character browser.
//!
//! This crate provides:
//! - Typed GraphQL operations and the `Characters` page query.
//! - A blocking HTTP transport behind a [`Transport`] trait.
//! - Partial-failure execution through [`ErrorPolicy`].
//! - A per-variables result cache backing cache-first fetches.

#![forbid(unsafe_code)]

mod cache;
mod characters;
mod client;
mod error;
mod operation;
mod transport;

pub use cache::{FetchPolicy, ResultCache};
pub use characters::{
    Character, CharacterPage, CharactersData, CharactersQuery, CharactersVariables, PageInfo,
};
pub use client::{ClientMetrics, ClientMetricsSnapshot, ErrorPolicy, GraphqlClient, QueryResult};
pub use error::{GraphqlError, GraphqlErrorLocation, HttpErrorInfo, QueryError};
pub use operation::{GraphqlOperation, GraphqlQuery, GraphqlRequest, GraphqlResponse};
pub use transport::{HttpTransport, HttpTransportBuilder, Transport, DEFAULT_ENDPOINT};
