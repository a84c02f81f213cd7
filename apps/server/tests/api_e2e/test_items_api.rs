//! E2E tests: single item endpoints.

use std::sync::Arc;

use actix_web::test;
use fmcp_lib::services::DisabledProvider;
use serde_json::json;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_get_item_returns_derived_priority() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool, Arc::new(DisabledProvider)).await;

    let body = register(
        &app,
        "pfmea.xlsx",
        "FMEA",
        json!([{ "failure_mode": "Crack", "severity": 10, "occurrence": 10, "detection": 10 }]),
    )
    .await;
    let ids = item_ids(&app, body["document"]["id"].as_i64().unwrap()).await;

    let (status, item) = send(
        &app,
        test::TestRequest::get().uri(&format!("/api/v1/items/{}", ids[0])),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(item["kind"], "FMEA");
    assert_eq!(item["action_priority"], "H");
    assert!(item["edited_by"].is_null());
}

#[actix_rt::test]
async fn test_put_item_records_editor() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool, Arc::new(DisabledProvider)).await;

    let body = register(
        &app,
        "cp.xlsx",
        "CP",
        json!([{ "product_characteristic": "Length", "control_method": "Caliper" }]),
    )
    .await;
    let ids = item_ids(&app, body["document"]["id"].as_i64().unwrap()).await;
    let uri = format!("/api/v1/items/{}", ids[0]);

    let unauthenticated = test::TestRequest::put()
        .uri(&uri)
        .set_json(json!({ "kind": "CP", "control_method": "CMM" }));
    let (status, _) = send(&app, unauthenticated).await;
    assert_eq!(status, 401);

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(("X-Remote-User", TEST_USER))
        .set_json(json!({ "kind": "CP", "product_characteristic": "Length", "control_method": "CMM" }));
    let (status, item) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(item["control_method"], "CMM");
    assert_eq!(item["edited_by"], TEST_USER);

    let wrong_kind = test::TestRequest::put()
        .uri(&uri)
        .insert_header(("X-Remote-User", TEST_USER))
        .set_json(json!({ "kind": "FMEA", "failure_mode": "Crack" }));
    let (status, _) = send(&app, wrong_kind).await;
    assert_eq!(status, 400);

    let foreign_field = test::TestRequest::put()
        .uri(&uri)
        .insert_header(("X-Remote-User", TEST_USER))
        .set_json(json!({ "kind": "CP", "control_method": "Gauge", "severity": 11 }));
    let (status, body) = send(&app, foreign_field).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "VALIDATION_ERROR");

    let (_, item) = send(&app, test::TestRequest::get().uri(&uri)).await;
    assert_eq!(item["control_method"], "CMM");
}

#[actix_rt::test]
async fn test_missing_item_is_not_found() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool, Arc::new(DisabledProvider)).await;

    let (status, body) = send(&app, test::TestRequest::get().uri("/api/v1/items/404")).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[actix_rt::test]
async fn test_item_history_tracks_edits() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool, Arc::new(DisabledProvider)).await;

    let body = register(
        &app,
        "cp.xlsx",
        "CP",
        json!([{ "product_characteristic": "Length", "control_method": "Caliper" }]),
    )
    .await;
    let ids = item_ids(&app, body["document"]["id"].as_i64().unwrap()).await;
    let uri = format!("/api/v1/items/{}", ids[0]);

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(("X-Remote-User", TEST_USER))
        .set_json(json!({ "kind": "CP", "product_characteristic": "Length", "control_method": "CMM" }));
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 200);

    let (status, body) = send(
        &app,
        test::TestRequest::get().uri(&format!("{}/history", uri)),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["item_id"], ids[0]);
    let entries = body["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["change_type"], "CREATE");
    assert_eq!(entries[0]["changed_by"], TEST_USER);
    assert!(entries[0]["old_content"].is_null());
    assert_eq!(entries[1]["change_type"], "UPDATE");
    assert_eq!(entries[1]["old_content"]["control_method"], "Caliper");
    assert_eq!(entries[1]["new_content"]["control_method"], "CMM");

    let (status, _) = send(&app, test::TestRequest::get().uri("/api/v1/items/404/history")).await;
    assert_eq!(status, 404);
}
