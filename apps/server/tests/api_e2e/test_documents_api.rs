//! E2E tests: document registry endpoints.

use std::sync::Arc;

use actix_web::test;
use fmcp_lib::services::DisabledProvider;
use serde_json::json;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_register_requires_identity() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool, Arc::new(DisabledProvider)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/documents")
        .set_json(json!({ "file_name": "pfmea.xlsx", "document_type": "FMEA" }));
    let (status, body) = send(&app, req).await;

    assert_eq!(status, 401);
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[actix_rt::test]
async fn test_register_with_rows_records_uploader() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool, Arc::new(DisabledProvider)).await;

    let body = register(
        &app,
        "pfmea.xlsx",
        "FMEA",
        json!([
            { "failure_mode": "Crack", "severity": 9, "occurrence": 4, "detection": 3 },
            { "failure_mode": "Burr", "severity": 3, "occurrence": 2, "detection": 2 },
        ]),
    )
    .await;

    assert_eq!(body["item_count"], 2);
    assert_eq!(body["document"]["document_type"], "FMEA");
    assert_eq!(body["document"]["version"], "1.0");
    assert_eq!(body["document"]["uploaded_by"], TEST_USER);

    let id = body["document"]["id"].as_i64().unwrap();
    let (status, detail) = send(
        &app,
        test::TestRequest::get().uri(&format!("/api/v1/documents/{}", id)),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(detail["item_count"], 2);
    assert_eq!(detail["file_name"], "pfmea.xlsx");
}

#[actix_rt::test]
async fn test_register_rejects_unknown_kind_and_bad_json() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool, Arc::new(DisabledProvider)).await;

    let (status, body) = send(
        &app,
        post_as_user(
            "/api/v1/documents",
            json!({ "file_name": "x.xlsx", "document_type": "DFMEA" }),
        ),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "VALIDATION_ERROR");

    let (status, body) = send(
        &app,
        post_as_user("/api/v1/documents", json!({ "document_type": "CP" })),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[actix_rt::test]
async fn test_list_filters_by_kind() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool, Arc::new(DisabledProvider)).await;

    register(&app, "pfmea.xlsx", "FMEA", json!([])).await;
    register(&app, "cp.xlsx", "CP", json!([])).await;

    let (status, body) = send(&app, test::TestRequest::get().uri("/api/v1/documents")).await;
    assert_eq!(status, 200);
    assert_eq!(body["documents"].as_array().unwrap().len(), 2);

    let (status, body) = send(
        &app,
        test::TestRequest::get().uri("/api/v1/documents?kind=cp"),
    )
    .await;
    assert_eq!(status, 200);
    let documents = body["documents"].as_array().unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0]["file_name"], "cp.xlsx");

    let (status, _) = send(
        &app,
        test::TestRequest::get().uri("/api/v1/documents?kind=spreadsheet"),
    )
    .await;
    assert_eq!(status, 400);
}

#[actix_rt::test]
async fn test_missing_document_and_bad_path() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool, Arc::new(DisabledProvider)).await;

    let (status, body) = send(&app, test::TestRequest::get().uri("/api/v1/documents/77")).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "NOT_FOUND");

    let (status, _) = send(&app, test::TestRequest::get().uri("/api/v1/documents/abc")).await;
    assert_eq!(status, 400);
}

#[actix_rt::test]
async fn test_delete_requires_admin_key() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool, Arc::new(DisabledProvider)).await;

    let body = register(&app, "cp.xlsx", "CP", json!([{ "product_characteristic": "Length" }])).await;
    let uri = format!("/api/v1/documents/{}", body["document"]["id"]);

    let (status, _) = send(&app, test::TestRequest::delete().uri(&uri)).await;
    assert_eq!(status, 401);

    let (status, _) = send(
        &app,
        test::TestRequest::delete()
            .uri(&uri)
            .insert_header(("X-Admin-Key", "wrong-key")),
    )
    .await;
    assert_eq!(status, 401);

    let (status, body) = send(
        &app,
        test::TestRequest::delete()
            .uri(&uri)
            .insert_header(("X-Admin-Key", TEST_ADMIN_KEY)),
    )
    .await;
    assert_eq!(status, 204);
    assert!(body.is_null());

    let (status, _) = send(&app, test::TestRequest::get().uri(&uri)).await;
    assert_eq!(status, 404);
}

#[actix_rt::test]
async fn test_add_items_to_registered_document() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool, Arc::new(DisabledProvider)).await;

    let body = register(&app, "cp.xlsx", "CP", json!([])).await;
    let id = body["document"]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/documents/{}/items", id);

    let (status, body) = send(
        &app,
        post_as_user(
            &uri,
            json!({ "kind": "CP", "rows": [
                { "row_index": 4, "product_characteristic": "Length", "control_method": "Caliper" },
                { "row_index": 2, "product_characteristic": "Surface", "control_method": "Visual" },
            ]}),
        ),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(body["items"].as_array().unwrap().len(), 2);

    let (status, body) = send(&app, test::TestRequest::get().uri(&uri)).await;
    assert_eq!(status, 200);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items[0]["product_characteristic"], "Surface");
    assert_eq!(items[0]["kind"], "CP");
    assert_eq!(items[1]["row_index"], 4);

    let (status, _) = send(
        &app,
        post_as_user(&uri, json!({ "kind": "FMEA", "rows": [{ "failure_mode": "Crack" }] })),
    )
    .await;
    assert_eq!(status, 400);
}

#[actix_rt::test]
async fn test_add_items_rejects_fields_of_the_other_kind() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool, Arc::new(DisabledProvider)).await;

    let body = register(&app, "cp.xlsx", "CP", json!([])).await;
    let id = body["document"]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/documents/{}/items", id);

    let (status, body) = send(
        &app,
        post_as_user(
            &uri,
            json!({ "kind": "CP", "rows": [{ "failure_mode": "Crack", "severity": 11 }] }),
        ),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(item_ids(&app, id).await.is_empty());

    let (status, _) = send(
        &app,
        post_as_user(
            "/api/v1/documents",
            json!({
                "file_name": "cp2.xlsx",
                "document_type": "CP",
                "rows": { "kind": "CP", "rows": [{ "failure_mode": "Crack" }] },
            }),
        ),
    )
    .await;
    assert_eq!(status, 400);
}
