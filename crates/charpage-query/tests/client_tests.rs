use std::sync::Arc;

use charpage_query::{
    CharactersQuery, CharactersVariables, ErrorPolicy, GraphqlClient, GraphqlError,
    GraphqlOperation, HttpErrorInfo, QueryError, ResultCache,
};
use charpage_testing::{errors_only, partial, standard_page, ScriptedResponse, ScriptedTransport};
use serde_json::json;

fn client_with(transport: &ScriptedTransport) -> GraphqlClient {
    GraphqlClient::new(Arc::new(transport.clone()))
}

#[test]
fn request_body_names_operation_and_page() {
    let transport = ScriptedTransport::new();
    transport.respond_json(3, standard_page(3));
    let client = client_with(&transport);

    client.execute::<CharactersQuery>(CharactersVariables::new(3), ErrorPolicy::All);

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    let body = &requests[0];
    assert_eq!(body["operationName"], "Characters");
    assert_eq!(body["variables"], json!({ "page": 3 }));
    assert_eq!(body["query"], CharactersQuery::QUERY);
    let query = body["query"].as_str().unwrap_or_default();
    for field in ["pages", "next", "prev", "id", "name", "image", "status", "species"] {
        assert!(query.contains(field), "query is missing {field}");
    }
}

#[test]
fn successful_response_yields_typed_data() {
    let transport = ScriptedTransport::new();
    transport.respond_json(1, standard_page(1));
    let client = client_with(&transport);

    let result = client.execute::<CharactersQuery>(CharactersVariables::new(1), ErrorPolicy::All);

    assert!(result.error.is_none());
    let data = result.data.expect("data");
    let names: Vec<_> = data
        .results()
        .iter()
        .filter_map(|character| character.name.as_deref())
        .collect();
    assert_eq!(names, vec!["Rick Sanchez", "Morty Smith"]);
    assert_eq!(data.info().next, Some(2));
    assert_eq!(data.info().prev, None);
    assert_eq!(data.info().pages, Some(42));
}

#[test]
fn error_policy_all_keeps_partial_data() {
    let transport = ScriptedTransport::new();
    transport.respond_json(1, partial(standard_page(1), "image resolver failed"));
    let client = client_with(&transport);

    let result = client.execute::<CharactersQuery>(CharactersVariables::new(1), ErrorPolicy::All);

    assert!(result.is_partial());
    assert_eq!(result.data.expect("data").results().len(), 2);
    assert_eq!(
        result.error.expect("error").to_string(),
        "image resolver failed"
    );
}

#[test]
fn error_policy_none_discards_partial_data() {
    let transport = ScriptedTransport::new();
    transport.respond_json(1, partial(standard_page(1), "image resolver failed"));
    let client = client_with(&transport);

    let result = client.execute::<CharactersQuery>(CharactersVariables::new(1), ErrorPolicy::None);

    assert!(result.data.is_none());
    assert!(matches!(result.error, Some(QueryError::Graphql { .. })));
}

#[test]
fn errors_without_data_fail_under_either_policy() {
    for policy in [ErrorPolicy::All, ErrorPolicy::None] {
        let transport = ScriptedTransport::new();
        transport.respond_json(1, errors_only("rate limited"));
        let client = client_with(&transport);

        let result = client.execute::<CharactersQuery>(CharactersVariables::new(1), policy);

        assert!(result.data.is_none(), "{policy:?}");
        assert_eq!(result.error.expect("error").to_string(), "rate limited");
    }
}

#[test]
fn transport_failure_becomes_network_error() {
    let transport = ScriptedTransport::new();
    transport.fail(
        1,
        QueryError::Http(HttpErrorInfo {
            message: "operation timed out".to_string(),
            is_timeout: true,
            is_connect: false,
        }),
    );
    let client = client_with(&transport);

    let result = client.execute::<CharactersQuery>(CharactersVariables::new(1), ErrorPolicy::All);

    let error = result.error.expect("error");
    assert!(error.is_network());
    assert_eq!(error.to_string(), "Network error: operation timed out");
}

#[test]
fn unscripted_page_reports_http_status() {
    let transport = ScriptedTransport::new();
    let client = client_with(&transport);

    let result = client.execute::<CharactersQuery>(CharactersVariables::new(9), ErrorPolicy::All);

    match result.error {
        Some(QueryError::HttpStatus { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected HTTP status error, got {other:?}"),
    }
}

#[test]
fn malformed_body_is_a_json_error() {
    let transport = ScriptedTransport::new();
    transport.respond(1, ScriptedResponse::Raw(b"not json".to_vec()));
    let client = client_with(&transport);

    let result = client.execute::<CharactersQuery>(CharactersVariables::new(1), ErrorPolicy::All);

    assert!(matches!(result.error, Some(QueryError::Json(_))));
    assert!(result.data.is_none());
}

#[test]
fn empty_response_is_a_protocol_error() {
    let transport = ScriptedTransport::new();
    transport.respond_json(1, json!({}));
    let client = client_with(&transport);

    let result = client.execute::<CharactersQuery>(CharactersVariables::new(1), ErrorPolicy::All);

    assert!(matches!(result.error, Some(QueryError::Protocol { .. })));
}

#[test]
fn absent_fields_deserialize_to_defaults() {
    let transport = ScriptedTransport::new();
    transport.respond_json(
        1,
        json!({
            "data": {
                "characters": {
                    "info": { "next": 2 },
                    "results": [{ "id": "1" }, { "name": "Morty Smith", "status": null }]
                }
            }
        }),
    );
    let client = client_with(&transport);

    let result = client.execute::<CharactersQuery>(CharactersVariables::new(1), ErrorPolicy::All);

    let data = result.data.expect("data");
    assert_eq!(data.results().len(), 2);
    assert_eq!(data.results()[0].name, None);
    assert_eq!(data.results()[1].status, None);
    assert_eq!(data.info().next, Some(2));
    assert_eq!(data.info().prev, None);
    assert_eq!(data.info().pages, None);
}

#[test]
fn metrics_count_partial_results_as_errors() {
    let transport = ScriptedTransport::new();
    transport.respond_json(1, standard_page(1));
    transport.respond_json(2, partial(standard_page(2), "boom"));
    let client = client_with(&transport);

    client.execute::<CharactersQuery>(CharactersVariables::new(1), ErrorPolicy::All);
    client.execute::<CharactersQuery>(CharactersVariables::new(2), ErrorPolicy::All);
    client.execute::<CharactersQuery>(CharactersVariables::new(3), ErrorPolicy::All);

    let metrics = client.metrics();
    assert_eq!(metrics.requests_total, 3);
    assert_eq!(metrics.requests_success, 1);
    assert_eq!(metrics.requests_error, 2);
}

#[test]
fn clones_share_metrics() {
    let transport = ScriptedTransport::new();
    transport.respond_json(1, standard_page(1));
    let client = client_with(&transport);
    let worker_copy = client.clone();

    std::thread::spawn(move || {
        worker_copy.execute::<CharactersQuery>(CharactersVariables::new(1), ErrorPolicy::All);
    })
    .join()
    .expect("worker thread");

    assert_eq!(client.metrics().requests_success, 1);
}

#[test]
fn graphql_error_display_joins_messages() {
    let error = QueryError::Graphql {
        errors: vec![GraphqlError::new("first"), GraphqlError::new("second")],
    };
    assert_eq!(error.to_string(), "first; second");
    assert!(!error.is_network());

    let empty = QueryError::Graphql { errors: Vec::new() };
    assert_eq!(empty.to_string(), "GraphQL error");
}

#[test]
fn result_cache_keeps_last_value_per_key() {
    let mut cache: ResultCache<u32, &str> = ResultCache::new();
    assert!(cache.is_empty());

    assert_eq!(cache.insert(1, "first"), None);
    assert_eq!(cache.insert(1, "second"), Some("first"));
    cache.insert(2, "other");

    assert_eq!(cache.get(&1), Some("second"));
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.evict(&2), Some("other"));
    assert!(!cache.contains(&2));

    cache.clear();
    assert!(cache.is_empty());
}
