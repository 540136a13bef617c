//! Admin dashboard API surface: floor CRUD, table map aggregation,
//! order management, QR export.

use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};

use pos_server::api::{OneshotRouter, build_router};
use pos_server::core::{Config, ServerState};
use pos_server::db::DbService;

async fn test_state() -> ServerState {
    let db = DbService::in_memory().await.unwrap();
    ServerState::with_pool(Config::with_overrides("./target/test-work", 0), db.pool)
}

async fn call(
    state: &ServerState,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(json_body) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(json_body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = build_router().oneshot(state, request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn call_raw(state: &ServerState, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = build_router().oneshot(state, request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn health_reports_ok() {
    let state = test_state().await;
    let (status, body) = call(&state, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["name"], "pos-server");
}

#[tokio::test]
async fn area_crud_and_guarded_delete() {
    let state = test_state().await;

    let (status, area) = call(&state, "POST", "/api/areas", Some(json!({"name": "Hall"}))).await;
    assert_eq!(status, StatusCode::OK);
    let area_id = area["id"].as_i64().unwrap();

    // duplicate name (case-insensitive) conflicts
    let (status, body) = call(&state, "POST", "/api/areas", Some(json!({"name": "hall"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 7005);

    // empty name fails validation
    let (status, _) = call(&state, "POST", "/api/areas", Some(json!({"name": "  "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // add a table, then deletion is refused
    let (_, _table) = call(
        &state,
        "POST",
        "/api/tables",
        Some(json!({"name": "T1", "area_id": area_id})),
    )
    .await;
    let (status, body) = call(&state, "DELETE", &format!("/api/areas/{area_id}"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 7006);

    // list shows the table count
    let (_, areas) = call(&state, "GET", "/api/areas", None).await;
    assert_eq!(areas[0]["table_count"], 1);
}

#[tokio::test]
async fn table_map_derives_occupancy_from_orders() {
    let state = test_state().await;

    let (_, area) = call(&state, "POST", "/api/areas", Some(json!({"name": "Hall"}))).await;
    let area_id = area["id"].as_i64().unwrap();
    let (_, t1) = call(
        &state,
        "POST",
        "/api/tables",
        Some(json!({"name": "T1", "area_id": area_id})),
    )
    .await;
    let (_, _t2) = call(
        &state,
        "POST",
        "/api/tables",
        Some(json!({"name": "T2", "area_id": area_id})),
    )
    .await;
    let (_, cat) = call(
        &state,
        "POST",
        "/api/categories",
        Some(json!({"name": "Coffee"})),
    )
    .await;
    let (_, espresso) = call(
        &state,
        "POST",
        "/api/products",
        Some(json!({"category_id": cat["id"], "name": "Espresso", "price": 25000})),
    )
    .await;

    // order 3 espressos on T1
    let (status, _) = call(
        &state,
        "POST",
        &format!("/api/customer/tables/{}/orders", t1["id"]),
        Some(json!({"items": [{"product_id": espresso["id"], "quantity": 3}]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, map) = call(&state, "GET", "/api/table-map", None).await;
    assert_eq!(status, StatusCode::OK);

    let tables = map[0]["tables"].as_array().unwrap();
    let t1_view = tables.iter().find(|t| t["name"] == "T1").unwrap();
    let t2_view = tables.iter().find(|t| t["name"] == "T2").unwrap();

    assert_eq!(t1_view["status"], "occupied");
    assert_eq!(t1_view["total_amount"], 75000);
    assert_eq!(t1_view["item_count"], 3);

    assert_eq!(t2_view["status"], "empty");
    assert_eq!(t2_view["duration_minutes"], 0);
    assert_eq!(t2_view["total_amount"], 0);
    assert_eq!(t2_view["item_count"], 0);
}

#[tokio::test]
async fn admin_can_extend_a_tables_order() {
    let state = test_state().await;

    let (_, area) = call(&state, "POST", "/api/areas", Some(json!({"name": "Hall"}))).await;
    let (_, table) = call(
        &state,
        "POST",
        "/api/tables",
        Some(json!({"name": "T1", "area_id": area["id"]})),
    )
    .await;
    let (_, cat) = call(
        &state,
        "POST",
        "/api/categories",
        Some(json!({"name": "Coffee"})),
    )
    .await;
    let (_, espresso) = call(
        &state,
        "POST",
        "/api/products",
        Some(json!({"category_id": cat["id"], "name": "Espresso", "price": 25000})),
    )
    .await;
    let table_id = table["id"].as_i64().unwrap();

    // no active order yet: a pending one is opened
    let (status, first) = call(
        &state,
        "POST",
        &format!("/api/orders/table/{table_id}/items"),
        Some(json!({"items": [{"product_id": espresso["id"], "quantity": 1}]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["total_amount"], 25000);

    // second call lands on the same order
    let (status, second) = call(
        &state,
        "POST",
        &format!("/api/orders/table/{table_id}/items"),
        Some(json!({"items": [{"product_id": espresso["id"], "quantity": 2}]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["id"], first["id"]);
    assert_eq!(second["total_amount"], 75000);
    assert_eq!(second["items"].as_array().unwrap().len(), 2);

    // order list carries the joined names
    let (_, orders) = call(&state, "GET", "/api/orders", None).await;
    assert_eq!(orders[0]["table_name"], "T1");
    assert_eq!(orders[0]["area_name"], "Hall");
}

#[tokio::test]
async fn invalid_status_transition_is_rejected() {
    let state = test_state().await;

    let (_, area) = call(&state, "POST", "/api/areas", Some(json!({"name": "Hall"}))).await;
    let (_, table) = call(
        &state,
        "POST",
        "/api/tables",
        Some(json!({"name": "T1", "area_id": area["id"]})),
    )
    .await;
    let (_, cat) = call(
        &state,
        "POST",
        "/api/categories",
        Some(json!({"name": "Coffee"})),
    )
    .await;
    let (_, espresso) = call(
        &state,
        "POST",
        "/api/products",
        Some(json!({"category_id": cat["id"], "name": "Espresso", "price": 25000})),
    )
    .await;
    let (_, order) = call(
        &state,
        "POST",
        &format!("/api/customer/tables/{}/orders", table["id"]),
        Some(json!({"items": [{"product_id": espresso["id"], "quantity": 1}]})),
    )
    .await;
    let order_id = order["id"].as_i64().unwrap();

    let (status, body) = call(
        &state,
        "PUT",
        &format!("/api/orders/{order_id}/status"),
        Some(json!({"status": "shipped"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4004);

    let (status, updated) = call(
        &state,
        "PUT",
        &format!("/api/orders/{order_id}/status"),
        Some(json!({"status": "served"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "served");
}

#[tokio::test]
async fn store_settings_get_and_upsert() {
    let state = test_state().await;

    let (status, defaults) = call(&state, "GET", "/api/store-settings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(defaults["store_name"], "Local Cafe");

    let (status, updated) = call(
        &state,
        "PUT",
        "/api/store-settings",
        Some(json!({"store_name": "Bean There", "wifi_pass": "espresso123"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["store_name"], "Bean There");

    let (_, fetched) = call(&state, "GET", "/api/store-settings", None).await;
    assert_eq!(fetched["store_name"], "Bean There");
    assert_eq!(fetched["wifi_pass"], "espresso123");
}

#[tokio::test]
async fn qr_endpoints_return_png_and_zip() {
    let state = test_state().await;

    let (_, area) = call(&state, "POST", "/api/areas", Some(json!({"name": "Hall"}))).await;
    let area_id = area["id"].as_i64().unwrap();
    let (_, table) = call(
        &state,
        "POST",
        "/api/tables",
        Some(json!({"name": "T1", "area_id": area_id})),
    )
    .await;
    call(
        &state,
        "POST",
        "/api/tables",
        Some(json!({"name": "T2", "area_id": area_id})),
    )
    .await;

    let (status, png) = call_raw(
        &state,
        &format!("/api/tables/{}/qr.png", table["id"].as_i64().unwrap()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&png[..4], &[0x89, b'P', b'N', b'G']);

    let (status, zip_bytes) = call_raw(&state, &format!("/api/areas/{area_id}/qr.zip")).await;
    assert_eq!(status, StatusCode::OK);
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_bytes)).unwrap();
    assert_eq!(archive.len(), 2);
    assert!(archive.by_name("QR_T1.png").is_ok());
}

#[tokio::test]
async fn sync_versions_increment_per_resource() {
    let state = test_state().await;

    call(&state, "POST", "/api/areas", Some(json!({"name": "A"}))).await;
    call(&state, "POST", "/api/areas", Some(json!({"name": "B"}))).await;
    call(&state, "POST", "/api/categories", Some(json!({"name": "C"}))).await;

    assert_eq!(state.resource_versions.get("area"), 2);
    assert_eq!(state.resource_versions.get("category"), 1);
    assert_eq!(state.resource_versions.get("order"), 0);

    let snapshot = state.versions_snapshot();
    assert_eq!(snapshot.get("area"), Some(&2));
}
