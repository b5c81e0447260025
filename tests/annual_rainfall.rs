//! End-to-end tests of `GET /annual-rainfall` against a mocked Open-Meteo archive.

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use annual_rainfall::api::{self, handlers};
use annual_rainfall::{round_to_hundredths, RainfallService, RetryPolicy};
use serde_json::{json, Value};
use std::path::Path;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FIRST_DAY: i64 = 1_726_185_600; // 2024-09-13T00:00:00Z
const DAY: i64 = 86_400;

macro_rules! rainfall_app {
    ($service:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($service))
                .configure(api::configure)
                .default_service(web::route().to(handlers::not_found)),
        )
        .await
    };
}

/// 365 days of data: every fourth day missing, the rest 0, 0.25 or 0.5 mm.
fn year_of_values() -> Vec<Option<f64>> {
    (0..365)
        .map(|i| if i % 4 == 0 { None } else { Some(0.25 * (i % 3) as f64) })
        .collect()
}

fn archive_body(values: &[Option<f64>]) -> Value {
    let time: Vec<i64> = (0..values.len() as i64).map(|i| FIRST_DAY + i * DAY).collect();
    json!({
        "latitude": 51.5,
        "longitude": -0.12,
        "utc_offset_seconds": 0,
        "timezone": "GMT",
        "daily_units": {"time": "unixtime", "precipitation_sum": "mm"},
        "daily": {"time": time, "precipitation_sum": values}
    })
}

async fn service_for(server: &MockServer, cache_dir: &Path, retries: u32) -> RainfallService {
    RainfallService::builder()
        .cache_dir(cache_dir.to_path_buf())
        .archive_url(format!("{}/v1/archive", server.uri()))
        .retry_policy(RetryPolicy::immediate(retries))
        .build()
        .await
        .unwrap()
}

#[actix_web::test]
async fn london_returns_full_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/archive"))
        .and(query_param("latitude", "51.5074"))
        .and(query_param("longitude", "-0.1278"))
        .and(query_param("start_date", "2024-09-13"))
        .and(query_param("end_date", "2025-09-12"))
        .and(query_param("daily", "precipitation_sum"))
        .and(query_param("timezone", "UTC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(archive_body(&year_of_values())))
        .expect(1)
        .mount(&server)
        .await;

    let cache = tempfile::tempdir().unwrap();
    let app = rainfall_app!(service_for(&server, cache.path(), 5).await);

    let req = test::TestRequest::get()
        .uri("/annual-rainfall?lat=51.5074&lon=-0.1278")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({
            "latitude": 51.5074,
            "longitude": -0.1278,
            "start_date": "2024-09-13",
            "end_date": "2025-09-12",
            "rainfall_mm": 68.25
        })
    );
}

#[actix_web::test]
async fn total_is_rounded_sum_of_series() {
    let values: Vec<Option<f64>> = (0..365).map(|i| Some(0.013 * (i % 7) as f64)).collect();
    let expected = round_to_hundredths(values.iter().flatten().sum()).unwrap();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(archive_body(&values)))
        .mount(&server)
        .await;

    let cache = tempfile::tempdir().unwrap();
    let app = rainfall_app!(service_for(&server, cache.path(), 0).await);

    let req = test::TestRequest::get()
        .uri("/annual-rainfall?lat=-33.87&lon=151.21")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["rainfall_mm"].as_f64(), Some(expected));
    assert!(expected >= 0.0);
}

#[actix_web::test]
async fn identical_requests_hit_upstream_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(archive_body(&year_of_values())))
        .expect(1)
        .mount(&server)
        .await;

    let cache = tempfile::tempdir().unwrap();
    let service = service_for(&server, cache.path(), 0).await;
    let cache_dir = service.archive().transport().cache().dir().to_path_buf();
    let app = rainfall_app!(service);

    let mut totals = Vec::new();
    for _ in 0..2 {
        let req = test::TestRequest::get()
            .uri("/annual-rainfall?lat=48.8566&lon=2.3522")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        totals.push(body["rainfall_mm"].clone());
    }

    assert_eq!(totals[0], totals[1]);
    assert_eq!(std::fs::read_dir(cache_dir).unwrap().count(), 1);
}

#[actix_web::test]
async fn range_edges_are_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(archive_body(&year_of_values())))
        .expect(2)
        .mount(&server)
        .await;

    let cache = tempfile::tempdir().unwrap();
    let app = rainfall_app!(service_for(&server, cache.path(), 0).await);

    for uri in [
        "/annual-rainfall?lat=90&lon=180",
        "/annual-rainfall?lat=-90&lon=-180",
    ] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK, "{}", uri);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["start_date"], "2024-09-13");
        assert_eq!(body["end_date"], "2025-09-12");
    }
}

#[actix_web::test]
async fn out_of_range_is_rejected_without_upstream_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let cache = tempfile::tempdir().unwrap();
    let app = rainfall_app!(service_for(&server, cache.path(), 0).await);

    for (uri, field) in [
        ("/annual-rainfall?lat=91&lon=0", "lat"),
        ("/annual-rainfall?lat=0&lon=181", "lon"),
    ] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY, "{}", uri);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"][0]["loc"], json!(["query", field]));
    }
}

#[actix_web::test]
async fn missing_lat_is_rejected_without_upstream_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let cache = tempfile::tempdir().unwrap();
    let app = rainfall_app!(service_for(&server, cache.path(), 0).await);

    let req = test::TestRequest::get()
        .uri("/annual-rainfall?lon=-0.1278")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({"detail": [{
            "type": "missing",
            "loc": ["query", "lat"],
            "msg": "Field required",
            "input": null
        }]})
    );
}

#[actix_web::test]
async fn non_numeric_coordinates_are_rejected() {
    let server = MockServer::start().await;
    let cache = tempfile::tempdir().unwrap();
    let app = rainfall_app!(service_for(&server, cache.path(), 0).await);

    let req = test::TestRequest::get()
        .uri("/annual-rainfall?lat=north&lon=west")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(resp).await;
    let detail = body["detail"].as_array().unwrap();
    assert_eq!(detail.len(), 2);
    assert!(detail.iter().all(|d| d["type"] == "float_parsing"));
}

#[actix_web::test]
async fn persistent_upstream_500_is_a_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(6)
        .mount(&server)
        .await;

    let cache = tempfile::tempdir().unwrap();
    let app = rainfall_app!(service_for(&server, cache.path(), 5).await);

    let req = test::TestRequest::get()
        .uri("/annual-rainfall?lat=51.5074&lon=-0.1278")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    assert!(resp.status().is_server_error());

    let body: Value = test::read_body_json(resp).await;
    assert!(body.get("rainfall_mm").is_none());
    assert!(body["detail"].is_string());
}

#[actix_web::test]
async fn unreachable_upstream_is_a_bad_gateway() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let cache = tempfile::tempdir().unwrap();
    let service = RainfallService::builder()
        .cache_dir(cache.path().to_path_buf())
        .archive_url(format!("http://127.0.0.1:{}/v1/archive", port))
        .retry_policy(RetryPolicy::immediate(2))
        .build()
        .await
        .unwrap();
    let app = rainfall_app!(service);

    let req = test::TestRequest::get()
        .uri("/annual-rainfall?lat=51.5074&lon=-0.1278")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

    let body: Value = test::read_body_json(resp).await;
    assert!(body.get("rainfall_mm").is_none());
}

#[actix_web::test]
async fn malformed_upstream_payload_is_a_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&server)
        .await;

    let cache = tempfile::tempdir().unwrap();
    let app = rainfall_app!(service_for(&server, cache.path(), 5).await);

    let req = test::TestRequest::get()
        .uri("/annual-rainfall?lat=1&lon=1")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
}

#[actix_web::test]
async fn misaligned_series_is_an_internal_error() {
    let mut body = archive_body(&year_of_values());
    body["daily"]["precipitation_sum"] = json!([1.0, 2.0]);

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let cache = tempfile::tempdir().unwrap();
    let app = rainfall_app!(service_for(&server, cache.path(), 0).await);

    let req = test::TestRequest::get()
        .uri("/annual-rainfall?lat=1&lon=1")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"detail": "Internal Server Error"}));
}

#[actix_web::test]
async fn unknown_route_is_json_404() {
    let server = MockServer::start().await;
    let cache = tempfile::tempdir().unwrap();
    let app = rainfall_app!(service_for(&server, cache.path(), 0).await);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/annual-snowfall").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"detail": "Not Found"}));
}
