use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Alert, Drone, Mission, NewsPage, PriceQuote};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- health ---

#[tokio::test]
async fn health_is_plain_text() {
    let resp = app().oneshot(get_request("/api/health")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers()[http::header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/plain"));
    assert_eq!(body_bytes(resp).await, "ok");
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let resp = app().oneshot(get_request("/api/nope")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- dashboard ---

#[tokio::test]
async fn overview_counts_seeded_fleet() {
    let resp = app().oneshot(get_request("/api/dashboard/overview")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let overview: Value = body_json(resp).await;
    assert_eq!(overview["totalDrones"], 4);
    assert_eq!(overview["activeDrones"], 1);
    assert_eq!(overview["activeMissions"], 1);
    assert_eq!(overview["openAlerts"], 2);
    assert_eq!(overview["fleetUtilization"], 0.25);
}

#[tokio::test]
async fn drones_filter_by_status() {
    let resp = app()
        .oneshot(get_request("/api/dashboard/drones?status=charging"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let drones: Vec<Drone> = body_json(resp).await;
    assert_eq!(drones.len(), 1);
    assert_eq!(drones[0].callsign, "Harrier");
}

#[tokio::test]
async fn drones_reject_unknown_status() {
    let resp = app()
        .oneshot(get_request("/api/dashboard/drones?status=sleeping"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn telemetry_honours_limit() {
    let resp = app()
        .oneshot(get_request("/api/dashboard/drones/DRN-001/telemetry?limit=3"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let points: Vec<Value> = body_json(resp).await;
    assert_eq!(points.len(), 3);
    assert_eq!(points[2]["speedMps"], 14.0);
}

#[tokio::test]
async fn telemetry_for_unknown_drone_is_404_json() {
    let resp = app()
        .oneshot(get_request("/api/dashboard/drones/DRN-999/telemetry"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert_eq!(body, serde_json::json!({"error": "not found"}));
}

#[tokio::test]
async fn alerts_filter_and_acknowledge() {
    let app = app();

    let resp = app
        .clone()
        .oneshot(get_request("/api/dashboard/alerts?acknowledged=false&severity=critical"))
        .await
        .unwrap();
    let alerts: Vec<Alert> = body_json(resp).await;
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].id, "ALT-001");

    let resp = app
        .clone()
        .oneshot(json_request("POST", "/api/dashboard/alerts/ALT-001/acknowledge", "{}"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let alert: Alert = body_json(resp).await;
    assert!(alert.acknowledged);

    let resp = app
        .oneshot(get_request("/api/dashboard/alerts?acknowledged=false"))
        .await
        .unwrap();
    let alerts: Vec<Alert> = body_json(resp).await;
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].id, "ALT-002");
}

// --- execution ---

#[tokio::test]
async fn create_mission_returns_201_planned() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/execution/missions",
            r#"{"name":"Bridge inspection","droneId":"DRN-002"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let mission: Mission = body_json(resp).await;
    assert_eq!(mission.name, "Bridge inspection");
    assert!(mission.id.starts_with("MSN-"));
    assert!(mission.waypoints.is_empty());
}

#[tokio::test]
async fn create_mission_with_unknown_drone_is_400() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/execution/missions",
            r#"{"name":"Ghost","droneId":"DRN-999"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_mission_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/api/execution/missions", r#"{"title":1}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn illegal_transition_is_409() {
    let resp = app()
        .oneshot(json_request("POST", "/api/execution/missions/MSN-002/pause", "{}"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = body_json(resp).await;
    assert_eq!(body["error"], "cannot pause a mission that is planned");
}

#[tokio::test]
async fn delete_mission_then_404() {
    let app = app();

    let resp = app
        .clone()
        .oneshot(Request::builder().method("DELETE").uri("/api/execution/missions/MSN-002").body(String::new()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    let resp = app
        .oneshot(get_request("/api/execution/missions/MSN-002"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn command_to_offline_drone_is_not_accepted() {
    let resp = app()
        .oneshot(json_request("POST", "/api/execution/drones/DRN-004/commands", r#"{"type":"return_to_base"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let ack: Value = body_json(resp).await;
    assert_eq!(ack["droneId"], "DRN-004");
    assert_eq!(ack["accepted"], false);
}

// --- market ---

#[tokio::test]
async fn opportunities_filter_by_region_and_value() {
    let resp = app()
        .oneshot(get_request("/api/market/opportunities?region=uk&minValue=200000"))
        .await
        .unwrap();

    let items: Vec<Value> = body_json(resp).await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], "OPP-001");
}

#[tokio::test]
async fn quote_prices_by_service_and_region() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/market/pricing/quote",
            r#"{"service":"patrol","region":"us","flightHours":10,"drones":2}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let quote: PriceQuote = body_json(resp).await;
    assert_eq!(quote.unit_price, 95.0 * 1.25);
    assert_eq!(quote.total, 95.0 * 1.25 * 20.0);
    assert_eq!(quote.currency, "USD");
}

#[tokio::test]
async fn quote_for_unknown_service_is_400() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/market/pricing/quote",
            r#"{"service":"sightseeing","region":"uk","flightHours":1,"drones":1}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- news ---

#[tokio::test]
async fn news_pages_newest_first() {
    let resp = app().oneshot(get_request("/api/news?limit=2&offset=0")).await.unwrap();

    let page: NewsPage = body_json(resp).await;
    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].id, "NEWS-001");
    assert_eq!(page.items[1].id, "NEWS-003");
}

#[tokio::test]
async fn critical_route_is_not_an_article_id() {
    let resp = app().oneshot(get_request("/api/news/critical")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let items: Vec<Value> = body_json(resp).await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["severity"], "critical");
}

// --- portfolio ---

#[tokio::test]
async fn summary_counts_assets() {
    let resp = app().oneshot(get_request("/api/portfolio/summary")).await.unwrap();

    let summary: Value = body_json(resp).await;
    assert_eq!(summary["totalAssets"], 3);
    assert_eq!(summary["operational"], 2);
    assert_eq!(summary["inMaintenance"], 1);
    assert_eq!(summary["totalValue"], 121_000.0);
}

#[tokio::test]
async fn schedule_maintenance_for_unknown_asset_is_404() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/portfolio/maintenance",
            r#"{"assetId":"AST-999","description":"x","scheduledFor":"2030-01-01T00:00:00Z"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patch_assignment_rejects_end_before_start() {
    let resp = app()
        .oneshot(json_request(
            "PATCH",
            "/api/portfolio/assignments/ASG-001",
            r#"{"endsAt":"2000-01-01T00:00:00Z"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
