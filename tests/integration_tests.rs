//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: configuration → authentication → paged
//! list requests → collected items

use futures::StreamExt;
use ibm_networking_sdk::config::ServiceConfig;
use ibm_networking_sdk::http::{HttpClient, HttpClientConfig};
use ibm_networking_sdk::pagination::{DynamicParams, JsonListOperation, Pager, PagerState};
use ibm_networking_sdk::services::dns_svcs::{DnsSvcs, ListResourceRecordsParams};
use ibm_networking_sdk::services::transit_gateway::{
    ListTransitGatewaysParams, TransitGatewayApis,
};
use ibm_networking_sdk::types::BackoffType;
use ibm_networking_sdk::Error;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;
use wiremock::matchers::{body_string_contains, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway(id: &str) -> Value {
    json!({
        "id": id,
        "crn": format!("crn:v1:bluemix:public:transit:us-south:a/123::gateway:{id}"),
        "name": id,
        "location": "us-south",
        "created_at": "2024-01-01T00:00:00Z",
        "global": true,
        "status": "available"
    })
}

async fn mount_iam(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/identity/token"))
        .and(body_string_contains("apikey=test-apikey"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "iam-access-token",
            "refresh_token": "unused",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn lookup(vars: HashMap<String, String>) -> impl Fn(&str) -> Option<String> {
    move |key| vars.get(key).cloned()
}

// ============================================================================
// Transit Gateway
// ============================================================================

#[tokio::test]
async fn test_transit_gateway_pager_with_iam_from_environment() {
    let server = MockServer::start().await;
    mount_iam(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/transit_gateways"))
        .and(header("Authorization", "Bearer iam-access-token"))
        .and(query_param("version", "2021-05-01"))
        .and(query_param_is_missing("start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "first": {"href": "https://transit.cloud.ibm.com/v1/transit_gateways?limit=2"},
            "limit": 2,
            "next": {"href": "https://transit.cloud.ibm.com/v1/transit_gateways?start=AAA&limit=2", "start": "AAA"},
            "transit_gateways": [gateway("gw-1"), gateway("gw-2")]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/transit_gateways"))
        .and(header("Authorization", "Bearer iam-access-token"))
        .and(query_param("start", "AAA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "first": {"href": "https://transit.cloud.ibm.com/v1/transit_gateways?limit=2"},
            "limit": 2,
            "transit_gateways": [gateway("gw-3")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let vars = HashMap::from([
        ("TRANSIT_GATEWAY_APIS_URL".to_string(), server.uri()),
        ("TRANSIT_GATEWAY_APIS_APIKEY".to_string(), "test-apikey".to_string()),
        ("TRANSIT_GATEWAY_APIS_AUTH_URL".to_string(), server.uri()),
    ]);
    let config = ServiceConfig::from_lookup("transit_gateway_apis", lookup(vars)).unwrap();
    let service = TransitGatewayApis::from_config(&config, "2021-05-01").unwrap();

    let mut pager = service.transit_gateways_pager(ListTransitGatewaysParams {
        limit: Some(2),
        start: None,
    });
    let all = pager.get_all().await.unwrap();

    assert_eq!(
        all.iter().map(|g| g.id.as_str()).collect::<Vec<_>>(),
        vec!["gw-1", "gw-2", "gw-3"]
    );
    assert_eq!(pager.state(), PagerState::Exhausted);
    assert_eq!(pager.pages_fetched(), 2);
}

#[tokio::test]
async fn test_pager_survives_transient_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/transit_gateways"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/transit_gateways"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "first": {"href": "x"},
            "limit": 50,
            "transit_gateways": [gateway("gw-1")]
        })))
        .mount(&server)
        .await;

    let config = HttpClientConfig::builder()
        .max_retries(2)
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(10),
            Duration::from_millis(10),
        )
        .build();
    let client = HttpClient::with_config(config).unwrap();
    let service = TransitGatewayApis::new(client, server.uri(), "2021-05-01").unwrap();

    let mut pager = service.transit_gateways_pager(ListTransitGatewaysParams::default());
    let page = pager.get_next().await.unwrap();

    assert_eq!(page.len(), 1);
    assert!(!pager.has_next());
}

#[tokio::test]
async fn test_pager_stream_of_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/transit_gateways"))
        .and(query_param_is_missing("start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "first": {"href": "x"}, "limit": 1,
            "next": {"href": "x?start=B", "start": "B"},
            "transit_gateways": [gateway("gw-a")]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/transit_gateways"))
        .and(query_param("start", "B"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "first": {"href": "x"}, "limit": 1,
            "transit_gateways": [gateway("gw-b")]
        })))
        .mount(&server)
        .await;

    let service = TransitGatewayApis::from_config(
        &ServiceConfig::unauthenticated(server.uri()),
        "2021-05-01",
    )
    .unwrap();

    let pages: Vec<_> = service
        .transit_gateways_pager(ListTransitGatewaysParams::default())
        .into_stream()
        .collect()
        .await;

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[1].as_ref().unwrap()[0].id, "gw-b");
}

// ============================================================================
// DNS Services
// ============================================================================

#[tokio::test]
async fn test_dns_records_pager_with_bearer_config_file() {
    let server = MockServer::start().await;
    let base = format!(
        "{}/instances/inst-1/dnszones/zone-1/resource_records",
        server.uri()
    );
    Mock::given(method("GET"))
        .and(path("/instances/inst-1/dnszones/zone-1/resource_records"))
        .and(header("Authorization", "Bearer static-token"))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resource_records": [{"id": "r1", "name": "a.example.com", "type": "A", "rdata": {"ip": "10.0.0.1"}}],
            "offset": 0, "limit": 1, "count": 1, "total_count": 1,
            "first": {"href": format!("{base}?limit=1")},
            "next": {"href": format!("{base}?limit=1&offset=1")}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/instances/inst-1/dnszones/zone-1/resource_records"))
        .and(query_param("offset", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resource_records": [{"id": "r2", "name": "b.example.com", "type": "CNAME", "rdata": {"cname": "a.example.com"}}],
            "offset": 1, "limit": 1, "count": 1, "total_count": 1,
            "first": {"href": format!("{base}?limit=1")}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("dns.yaml");
    std::fs::write(
        &config_path,
        format!(
            "service_url: {}\nauth:\n  type: bearer_token\n  bearer_token: static-token\n",
            server.uri()
        ),
    )
    .unwrap();

    let config = ServiceConfig::from_file(&config_path).unwrap();
    let service = DnsSvcs::from_config(&config).unwrap();
    let mut params = ListResourceRecordsParams::new("inst-1", "zone-1");
    params.limit = Some(1);

    // total_count undercounts; the continuation link still drives the second request
    let records = service
        .resource_records_pager(params)
        .unwrap()
        .get_all()
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[1].record_type, "CNAME");
}

// ============================================================================
// Untyped listing
// ============================================================================

#[tokio::test]
async fn test_json_list_operation_with_dynamic_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/connections"))
        .and(query_param("version", "2021-05-01"))
        .and(query_param("network_type", "vpc"))
        .and(query_param_is_missing("start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "connections": [{"id": "c1"}],
            "next": {"href": "https://transit.cloud.ibm.com/v1/connections?start=opaque%2Btoken", "start": "opaque+token"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/connections"))
        .and(query_param("start", "opaque+token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "connections": [{"id": "c2"}]
        })))
        .mount(&server)
        .await;

    let client = HttpClient::new().unwrap();
    let operation = JsonListOperation::new(
        &client,
        format!("{}/v1/connections", server.uri()),
        "connections",
    )
    .query("version", "2021-05-01");
    let params =
        DynamicParams::from_value("start", json!({"network_type": "vpc"})).unwrap();

    let mut pager = Pager::new(operation, params);
    let items = pager.get_all().await.unwrap();

    assert_eq!(items, vec![json!({"id": "c1"}), json!({"id": "c2"})]);
    assert!(matches!(
        pager.get_next().await.unwrap_err(),
        Error::PagerExhausted
    ));
}

#[test]
fn test_dynamic_params_rejects_non_object() {
    let err = DynamicParams::from_value("start", json!(["not", "an", "object"])).unwrap_err();
    assert!(matches!(err, Error::InvalidPagerParams { .. }));
}

#[test]
fn test_blocking_first_page() {
    tokio_test::block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/locations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "locations": [{"name": "us-south", "billing_location": "us", "type": "region"}]
            })))
            .mount(&server)
            .await;

        let service = TransitGatewayApis::from_config(
            &ServiceConfig::unauthenticated(server.uri()),
            "2021-05-01",
        )
        .unwrap();
        let locations = service.list_gateway_locations().await.unwrap();
        assert_eq!(locations.locations[0].name, "us-south");
    });
}
