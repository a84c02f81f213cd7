//! E2E tests: association ledger and export endpoints.

use std::sync::Arc;

use actix_web::test;
use fmcp_lib::services::DisabledProvider;
use serde_json::json;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_associate_list_and_export() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool, Arc::new(DisabledProvider)).await;

    let fmea = register(
        &app,
        "pfmea.xlsx",
        "FMEA",
        json!([{ "failure_mode": "Crack", "severity": 8, "occurrence": 4, "detection": 3 }]),
    )
    .await;
    let cp = register(
        &app,
        "cp.xlsx",
        "CP",
        json!([
            { "product_characteristic": "Surface", "control_method": "Visual" },
            { "product_characteristic": "Length", "control_method": "Caliper" },
        ]),
    )
    .await;

    let fmea_document_id = fmea["document"]["id"].as_i64().unwrap();
    let fmea_id = item_ids(&app, fmea_document_id).await[0];
    let cp_ids = item_ids(&app, cp["document"]["id"].as_i64().unwrap()).await;

    let request = json!({ "fmea_item_id": fmea_id, "cp_item_ids": cp_ids });
    let (status, created) = send(&app, post_as_user("/api/v1/associations", request.clone())).await;
    assert_eq!(status, 201, "{}", created);
    let created = created.as_array().unwrap().clone();
    assert_eq!(created.len(), 2);
    assert_eq!(created[0]["created_by"], TEST_USER);

    // Repeating the request returns the stored rows unchanged.
    let (status, repeated) = send(&app, post_as_user("/api/v1/associations", request)).await;
    assert_eq!(status, 201);
    assert_eq!(repeated.as_array().unwrap(), &created);

    let (status, listed) = send(
        &app,
        test::TestRequest::get().uri(&format!("/api/v1/items/{}/associations", fmea_id)),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(listed["fmea_item_id"], fmea_id);
    assert_eq!(listed["associations"].as_array().unwrap().len(), 2);

    let (status, export) = send(
        &app,
        test::TestRequest::get().uri(&format!("/api/v1/documents/{}/export", fmea_document_id)),
    )
    .await;
    assert_eq!(status, 200);
    let rows = export["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["failure_mode"], "Crack");
    assert_eq!(rows[0]["linked_cp_items"].as_array().unwrap().len(), 2);
}

#[actix_rt::test]
async fn test_association_errors() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool, Arc::new(DisabledProvider)).await;

    let fmea = register(&app, "pfmea.xlsx", "FMEA", json!([{ "failure_mode": "Crack" }])).await;
    let cp = register(&app, "cp.xlsx", "CP", json!([{ "product_characteristic": "Surface" }])).await;
    let fmea_id = item_ids(&app, fmea["document"]["id"].as_i64().unwrap()).await[0];
    let cp_document_id = cp["document"]["id"].as_i64().unwrap();
    let cp_id = item_ids(&app, cp_document_id).await[0];

    let unauthenticated = test::TestRequest::post()
        .uri("/api/v1/associations")
        .set_json(json!({ "fmea_item_id": fmea_id, "cp_item_ids": [cp_id] }));
    let (status, _) = send(&app, unauthenticated).await;
    assert_eq!(status, 401);

    let (status, body) = send(
        &app,
        post_as_user(
            "/api/v1/associations",
            json!({ "fmea_item_id": cp_id, "cp_item_ids": [fmea_id] }),
        ),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "VALIDATION_ERROR");

    let (status, _) = send(
        &app,
        post_as_user(
            "/api/v1/associations",
            json!({ "fmea_item_id": fmea_id, "cp_item_ids": [9999] }),
        ),
    )
    .await;
    assert_eq!(status, 404);

    let (status, body) = send(
        &app,
        post_as_user(
            "/api/v1/associations",
            json!({ "fmea_item_id": fmea_id, "cp_item_ids": [] }),
        ),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(body, json!([]));

    let (status, _) = send(
        &app,
        post_as_user(
            "/api/v1/associations",
            json!({ "fmea_item_id": 9999, "cp_item_ids": [] }),
        ),
    )
    .await;
    assert_eq!(status, 404);

    let (status, _) = send(
        &app,
        test::TestRequest::get().uri(&format!("/api/v1/items/{}/associations", cp_id)),
    )
    .await;
    assert_eq!(status, 400);

    let (status, _) = send(
        &app,
        test::TestRequest::get().uri(&format!("/api/v1/documents/{}/export", cp_document_id)),
    )
    .await;
    assert_eq!(status, 400);
}
