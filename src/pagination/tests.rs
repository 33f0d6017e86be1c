//! Tests for pagination module

use super::*;
use crate::error::{Error, Result};
use async_trait::async_trait;
use futures::StreamExt;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Mutex;
use test_case::test_case;

// ============================================================================
// Test fixtures
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
struct ListParams {
    limit: Option<u32>,
    name: Option<String>,
    start: Option<String>,
}

impl PageRequest for ListParams {
    fn cursor_field(&self) -> &str {
        "start"
    }

    fn set_cursor(&mut self, cursor: String) {
        self.start = Some(cursor);
    }
}

/// Replays canned responses and records every request it receives
struct MockList {
    responses: Mutex<VecDeque<Result<Page<String>>>>,
    requests: Mutex<Vec<ListParams>>,
}

impl MockList {
    fn new(responses: Vec<Result<Page<String>>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn push(&self, response: Result<Page<String>>) {
        self.responses.lock().unwrap().push_back(response);
    }

    fn requests(&self) -> Vec<ListParams> {
        self.requests.lock().unwrap().clone()
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl<'a> ListOperation for &'a MockList {
    type Params = ListParams;
    type Item = String;

    async fn fetch_page(&self, params: ListParams) -> Result<Page<String>> {
        self.requests.lock().unwrap().push(params);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Other("no more mock responses".to_string())))
    }
}

fn items(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}

/// Pages for the given item groups; page N links to page N+1 with cursor "cN"
fn linked_pages(groups: &[&[&str]]) -> Vec<Result<Page<String>>> {
    let last = groups.len() - 1;
    groups
        .iter()
        .enumerate()
        .map(|(i, group)| {
            let page = if i == last {
                Page::last(items(group))
            } else {
                Page::with_next(items(group), format!("c{}", i + 1))
            };
            Ok(page)
        })
        .collect()
}

/// The two-page fixture: `{"next":{"start":"1"},"items":[A],...}` then `{"items":[B],...}`
fn two_page_fixture() -> Vec<Result<Page<String>>> {
    vec![
        Ok(Page::with_next(items(&["A"]), "1").total_count(2).limit(1)),
        Ok(Page::last(items(&["B"])).total_count(2).limit(1)),
    ]
}

// ============================================================================
// Pager lifecycle
// ============================================================================

#[tokio::test]
async fn test_construction_makes_no_request() {
    let mock = MockList::new(two_page_fixture());
    let pager = Pager::new(&mock, ListParams::default());

    assert_eq!(pager.state(), PagerState::Fresh);
    assert!(pager.has_next());
    assert_eq!(pager.pages_fetched(), 0);
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn test_two_page_scenario_incremental() {
    let mock = MockList::new(two_page_fixture());
    let mut pager = Pager::new(&mock, ListParams::default());

    assert!(pager.has_next());
    assert_eq!(pager.get_next().await.unwrap(), items(&["A"]));
    assert_eq!(pager.state(), PagerState::HasMore);

    assert!(pager.has_next());
    assert_eq!(pager.get_next().await.unwrap(), items(&["B"]));
    assert_eq!(pager.state(), PagerState::Exhausted);

    assert!(!pager.has_next());
    assert_eq!(pager.pages_fetched(), 2);
}

#[tokio::test]
async fn test_two_page_scenario_get_all() {
    let mock = MockList::new(two_page_fixture());
    let mut pager = Pager::new(&mock, ListParams::default());

    assert_eq!(pager.get_all().await.unwrap(), items(&["A", "B"]));
    assert!(!pager.has_next());
    assert_eq!(mock.calls(), 2);
}

#[tokio::test]
async fn test_exhausted_is_terminal() {
    let mock = MockList::new(vec![Ok(Page::last(items(&["only"])))]);
    let mut pager = Pager::new(&mock, ListParams::default());

    pager.get_next().await.unwrap();

    for _ in 0..3 {
        assert!(!pager.has_next());
    }

    let err = pager.get_next().await.unwrap_err();
    assert!(matches!(err, Error::PagerExhausted));
    assert!(!pager.has_next());

    // The exhausted pager never reaches the operation again
    assert_eq!(mock.calls(), 1);
    assert_eq!(pager.get_all().await.unwrap(), Vec::<String>::new());
    assert_eq!(mock.calls(), 1);
}

// ============================================================================
// Cursor handling
// ============================================================================

#[tokio::test]
async fn test_cursor_forwarded_verbatim() {
    let opaque = [
        "eyJpZCI6IjEyMyJ9==",
        "r010-a0b1c2/with spaces&and=symbols",
        "  leading-and-trailing  ",
    ];
    let mock = MockList::new(vec![
        Ok(Page::with_next(items(&["1"]), opaque[0])),
        Ok(Page::with_next(items(&["2"]), opaque[1])),
        Ok(Page::with_next(items(&["3"]), opaque[2])),
        Ok(Page::last(items(&["4"]))),
    ]);
    let mut pager = Pager::new(&mock, ListParams::default());

    pager.get_all().await.unwrap();

    let starts: Vec<Option<String>> = mock.requests().into_iter().map(|p| p.start).collect();
    assert_eq!(
        starts,
        vec![
            None,
            Some(opaque[0].to_string()),
            Some(opaque[1].to_string()),
            Some(opaque[2].to_string()),
        ]
    );
}

#[tokio::test]
async fn test_filters_preserved_across_pages() {
    let mock = MockList::new(two_page_fixture());
    let params = ListParams {
        limit: Some(1),
        name: Some("prod".to_string()),
        start: None,
    };
    let mut pager = Pager::new(&mock, params);

    pager.get_all().await.unwrap();

    let requests = mock.requests();
    assert_eq!(requests.len(), 2);
    for request in &requests {
        assert_eq!(request.limit, Some(1));
        assert_eq!(request.name.as_deref(), Some("prod"));
    }
    assert_eq!(requests[1].start.as_deref(), Some("1"));
}

#[tokio::test]
async fn test_caller_supplied_starting_cursor() {
    let mock = MockList::new(vec![Ok(Page::last(items(&["Z"])))]);
    let params = ListParams {
        start: Some("resume-here".to_string()),
        ..Default::default()
    };
    let mut pager = Pager::new(&mock, params);

    assert_eq!(pager.get_all().await.unwrap(), items(&["Z"]));
    assert_eq!(mock.requests()[0].start.as_deref(), Some("resume-here"));
}

// ============================================================================
// Termination
// ============================================================================

#[tokio::test]
async fn test_total_count_does_not_stop_pagination() {
    // total_count says 2, page 1 holds a single item and links onward
    let mock = MockList::new(two_page_fixture());
    let mut pager = Pager::new(&mock, ListParams::default());

    let first = pager.get_next().await.unwrap();
    assert_eq!(first.len(), 1);
    assert!(pager.has_next());

    assert_eq!(pager.get_all().await.unwrap(), items(&["B"]));
}

#[tokio::test]
async fn test_under_reported_total_count_is_ignored() {
    let mock = MockList::new(vec![
        Ok(Page::with_next(items(&["a"]), "c1").total_count(1)),
        Ok(Page::with_next(items(&["b"]), "c2").total_count(1)),
        Ok(Page::last(items(&["c"])).total_count(1)),
    ]);
    let mut pager = Pager::new(&mock, ListParams::default());

    assert_eq!(pager.get_all().await.unwrap(), items(&["a", "b", "c"]));
}

#[tokio::test]
async fn test_over_reported_total_count_is_ignored() {
    let mock = MockList::new(vec![Ok(Page::last(items(&["a"])).total_count(50))]);
    let mut pager = Pager::new(&mock, ListParams::default());

    assert_eq!(pager.get_all().await.unwrap(), items(&["a"]));
    assert!(!pager.has_next());
}

#[tokio::test]
async fn test_empty_page_with_continuation_keeps_going() {
    let mock = MockList::new(vec![
        Ok(Page::with_next(Vec::new(), "c1")),
        Ok(Page::last(items(&["late"]))),
    ]);
    let mut pager = Pager::new(&mock, ListParams::default());

    assert_eq!(pager.get_next().await.unwrap(), Vec::<String>::new());
    assert!(pager.has_next());
    assert_eq!(pager.get_next().await.unwrap(), items(&["late"]));
}

// ============================================================================
// Equivalence of consumption styles
// ============================================================================

#[test_case(&[&["A"]]; "single page")]
#[test_case(&[&["A"], &["B"]]; "two pages")]
#[test_case(&[&["A", "B", "C"], &[], &["D"], &["E", "F"]]; "uneven pages with an empty one")]
#[test_case(&[&[]]; "empty listing")]
#[tokio::test]
async fn test_get_all_matches_manual_loop(groups: &[&[&str]]) {
    let bulk_mock = MockList::new(linked_pages(groups));
    let mut bulk = Pager::new(&bulk_mock, ListParams::default());
    let all = bulk.get_all().await.unwrap();

    let manual_mock = MockList::new(linked_pages(groups));
    let mut manual = Pager::new(&manual_mock, ListParams::default());
    let mut looped = Vec::new();
    while manual.has_next() {
        looped.extend(manual.get_next().await.unwrap());
    }

    let expected: Vec<String> = groups.iter().flat_map(|g| items(g)).collect();
    assert_eq!(all, expected);
    assert_eq!(looped, all);
    assert_eq!(bulk_mock.requests(), manual_mock.requests());
}

#[tokio::test]
async fn test_get_all_after_partial_consumption_returns_remainder() {
    let mock = MockList::new(linked_pages(&[&["1", "2"], &["3"], &["4", "5"]]));
    let mut pager = Pager::new(&mock, ListParams::default());

    assert_eq!(pager.get_next().await.unwrap(), items(&["1", "2"]));
    assert_eq!(pager.get_all().await.unwrap(), items(&["3", "4", "5"]));
}

#[tokio::test]
async fn test_into_stream_yields_pages_in_order() {
    let mock = MockList::new(linked_pages(&[&["1", "2"], &["3"], &["4"]]));
    let pager = Pager::new(&mock, ListParams::default());

    let pages: Vec<Vec<String>> = pager
        .into_stream()
        .map(|page| page.unwrap())
        .collect()
        .await;

    assert_eq!(pages, vec![items(&["1", "2"]), items(&["3"]), items(&["4"])]);
}

// ============================================================================
// Failure semantics
// ============================================================================

#[tokio::test]
async fn test_error_propagates_and_cursor_is_kept() {
    let mock = MockList::new(vec![
        Ok(Page::with_next(items(&["A"]), "1").total_count(2).limit(1)),
        Err(Error::http_status(503, "service unavailable")),
    ]);
    let mut pager = Pager::new(&mock, ListParams::default());

    assert_eq!(pager.get_next().await.unwrap(), items(&["A"]));

    let err = pager.get_next().await.unwrap_err();
    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "service unavailable");
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
    assert_eq!(pager.state(), PagerState::HasMore);
    assert_eq!(pager.params().start.as_deref(), Some("1"));
    assert_eq!(pager.pages_fetched(), 1);

    // Retrying re-requests the same page
    mock.push(Ok(Page::last(items(&["B"])).total_count(2).limit(1)));
    assert_eq!(pager.get_next().await.unwrap(), items(&["B"]));
    assert!(!pager.has_next());

    let starts: Vec<Option<String>> = mock.requests().into_iter().map(|p| p.start).collect();
    assert_eq!(
        starts,
        vec![None, Some("1".to_string()), Some("1".to_string())]
    );
}

#[tokio::test]
async fn test_error_on_first_page_leaves_pager_fresh() {
    let mock = MockList::new(vec![Err(Error::http_status(401, "unauthorized"))]);
    let mut pager = Pager::new(&mock, ListParams::default());

    let err = pager.get_all().await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(pager.state(), PagerState::Fresh);
    assert!(pager.has_next());
}

#[tokio::test]
async fn test_into_stream_stops_after_error() {
    let mock = MockList::new(vec![
        Ok(Page::with_next(items(&["A"]), "1")),
        Err(Error::http_status(500, "boom")),
        Ok(Page::last(items(&["never"]))),
    ]);
    let pager = Pager::new(&mock, ListParams::default());

    let results: Vec<Result<Vec<String>>> = pager.into_stream().collect().await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].as_ref().unwrap(), &items(&["A"]));
    assert!(results[1].is_err());
    assert_eq!(mock.calls(), 2);
}

// ============================================================================
// Closure adapter and dynamic params
// ============================================================================

#[tokio::test]
async fn test_list_fn_with_dynamic_params() {
    let operation = list_fn(|params: DynamicParams| async move {
        let page = match params.cursor() {
            None => Page::with_next(vec![json!({"id": "zone-1"})], "2"),
            Some("2") => Page::last(vec![json!({"id": "zone-2"})]),
            Some(other) => return Err(Error::Other(format!("unexpected offset {other}"))),
        };
        Ok(page)
    });

    let params = DynamicParams::new("offset").with("limit", 1);
    let mut pager = Pager::new(operation, params);

    let all = pager.get_all().await.unwrap();
    assert_eq!(all, vec![json!({"id": "zone-1"}), json!({"id": "zone-2"})]);
    assert_eq!(pager.params().cursor(), Some("2"));
    assert_eq!(pager.params().values()["limit"], json!(1));
}

#[test_case(json!([1, 2]), "an array"; "array")]
#[test_case(json!("limit=1"), "a string"; "string")]
#[test_case(json!(5), "a number"; "number")]
fn test_dynamic_params_rejects_non_object(value: serde_json::Value, kind: &str) {
    let err = DynamicParams::from_value("start", value).unwrap_err();
    assert!(matches!(err, Error::InvalidPagerParams { .. }));
    assert!(err.to_string().contains(kind));
}

#[test]
fn test_dynamic_params_from_object_and_null() {
    let params = DynamicParams::from_value("start", json!({"limit": 10})).unwrap();
    assert_eq!(params.cursor_field(), "start");
    assert_eq!(params.cursor(), None);

    let empty = DynamicParams::from_value("offset", serde_json::Value::Null).unwrap();
    assert!(empty.values().is_empty());
}

#[test]
fn test_dynamic_params_to_query() {
    let mut params = DynamicParams::new("start")
        .with("limit", 50)
        .with("name", "edge")
        .with("global", true)
        .with("skip", serde_json::Value::Null)
        .with("types", json!(["A", "AAAA"]));
    params.set_cursor("abc".to_string());

    let query = params.to_query();
    assert_eq!(query.get("limit").map(String::as_str), Some("50"));
    assert_eq!(query.get("name").map(String::as_str), Some("edge"));
    assert_eq!(query.get("global").map(String::as_str), Some("true"));
    assert_eq!(query.get("types").map(String::as_str), Some("A,AAAA"));
    assert_eq!(query.get("start").map(String::as_str), Some("abc"));
    assert!(!query.contains_key("skip"));
}

// ============================================================================
// Page decoding
// ============================================================================

#[test]
fn test_page_from_json_next_start() {
    let body = json!({
        "next": {"start": "1"},
        "items": [{"id": "A"}],
        "total_count": 2,
        "limit": 1
    });

    let page = Page::from_json(body, "items", "start").unwrap();
    assert_eq!(page.items, vec![json!({"id": "A"})]);
    assert_eq!(page.next_cursor.as_deref(), Some("1"));
    assert_eq!(page.total_count, Some(2));
    assert_eq!(page.limit, Some(1));
}

#[test]
fn test_page_from_json_last_page() {
    let body = json!({"items": [{"id": "B"}], "total_count": 2, "limit": 1});

    let page = Page::from_json(body, "items", "start").unwrap();
    assert!(!page.has_more());
}

#[test]
fn test_page_from_json_href_offset() {
    let body = json!({
        "dnszones": [{"id": "z1"}],
        "offset": 0,
        "limit": 1,
        "total_count": 3,
        "next": {"href": "https://api.dns-svcs.cloud.ibm.com/v1/instances/i/dnszones?offset=1&limit=1"}
    });

    let page = Page::from_json(body, "dnszones", "offset").unwrap();
    assert_eq!(page.next_cursor.as_deref(), Some("1"));
}

#[test]
fn test_page_from_json_empty_cursor_is_last() {
    let body = json!({"items": [], "next": {"start": ""}});
    let page = Page::from_json(body, "items", "start").unwrap();
    assert_eq!(page.next_cursor, None);
}

#[test]
fn test_page_from_json_missing_items() {
    let err = Page::from_json(json!({"total_count": 0}), "connections", "start").unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
    assert!(err.to_string().contains("connections"));

    let err = Page::from_json(json!([]), "connections", "start").unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

#[test]
fn test_page_map_keeps_metadata() {
    let page = Page::with_next(vec![1, 2], "n").total_count(4).limit(2);
    let mapped = page.map(|n| n * 10);
    assert_eq!(mapped.items, vec![10, 20]);
    assert_eq!(mapped.next_cursor.as_deref(), Some("n"));
    assert_eq!(mapped.total_count, Some(4));
    assert_eq!(mapped.limit, Some(2));
}

#[test]
fn test_cursor_from_href() {
    assert_eq!(
        cursor_from_href("https://x.test/v1/items?limit=5&start=abc%3D%3D", "start"),
        Some("abc==".to_string())
    );
    assert_eq!(
        cursor_from_href("/v1/items?offset=20", "offset"),
        Some("20".to_string())
    );
    assert_eq!(cursor_from_href("https://x.test/v1/items", "start"), None);
}

#[test]
fn test_extract_jsonpath() {
    let data = json!({
        "next": {
            "start": "abc123",
            "offset": 42
        }
    });

    assert_eq!(
        extract_jsonpath(&data, "$.next.start"),
        Some("abc123".to_string())
    );
    assert_eq!(
        extract_jsonpath(&data, "next.start"),
        Some("abc123".to_string())
    );
    assert_eq!(
        extract_jsonpath(&data, "next.offset"),
        Some("42".to_string())
    );
    assert_eq!(extract_jsonpath(&data, "$.missing"), None);
}

// ============================================================================
// JsonListOperation over HTTP
// ============================================================================

#[tokio::test]
async fn test_json_list_operation_follows_href_offsets() {
    use crate::http::{HttpClient, HttpClientConfig};
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/things"))
        .and(query_param("version", "2024-01-01"))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "things": [{"id": 1}, {"id": 2}],
            "limit": 2,
            "total_count": 3,
            "next": {"href": format!("{}/v1/things?offset=2&limit=2", mock_server.uri())}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/things"))
        .and(query_param("offset", "2"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "things": [{"id": 3}],
            "limit": 2,
            "total_count": 3
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder().max_retries(0).build();
    let client = HttpClient::with_config(config).unwrap();
    let operation = JsonListOperation::new(
        &client,
        format!("{}/v1/things", mock_server.uri()),
        "things",
    )
    .query("version", "2024-01-01");

    let mut pager = Pager::new(operation, DynamicParams::new("offset").with("limit", 2));
    let all = pager.get_all().await.unwrap();

    assert_eq!(all, vec![json!({"id": 1}), json!({"id": 2}), json!({"id": 3})]);
}
