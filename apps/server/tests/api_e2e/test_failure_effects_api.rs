//! E2E tests: failure-effect option endpoints.

use std::sync::Arc;

use actix_web::test;
use fmcp_lib::services::DisabledProvider;
use serde_json::json;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_register_and_list_failure_effects() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool, Arc::new(DisabledProvider)).await;

    let (status, body) = send(
        &app,
        post_as_user(
            "/api/v1/documents",
            json!({
                "file_name": "pfmea.xlsx",
                "document_type": "FMEA",
                "failure_effects": [
                    { "failure_effect": "Noise", "severity": 3 },
                    { "failure_effect": "Loss of function", "severity": 9 },
                ],
            }),
        ),
    )
    .await;
    assert_eq!(status, 201, "{}", body);
    let id = body["document"]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/fe/documents/{}", id);

    let (status, _) = send(
        &app,
        post_as_user(&uri, json!([{ "failure_effect": "Rattle", "severity": 5 }])),
    )
    .await;
    assert_eq!(status, 201);

    let (status, body) = send(&app, test::TestRequest::get().uri(&uri)).await;
    assert_eq!(status, 200);
    assert_eq!(body["document_id"], id);
    let effects: Vec<&str> = body["options"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["failure_effect"].as_str().unwrap())
        .collect();
    assert_eq!(effects, vec!["Loss of function", "Rattle", "Noise"]);
    assert_eq!(body["options"][0]["severity"], 9);
}

#[actix_rt::test]
async fn test_failure_effect_errors() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool, Arc::new(DisabledProvider)).await;

    let fmea = register(&app, "pfmea.xlsx", "FMEA", json!([])).await;
    let cp = register(&app, "cp.xlsx", "CP", json!([])).await;
    let fmea_uri = format!("/api/v1/fe/documents/{}", fmea["document"]["id"]);
    let cp_uri = format!("/api/v1/fe/documents/{}", cp["document"]["id"]);

    let (status, body) = send(&app, test::TestRequest::get().uri(&cp_uri)).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "VALIDATION_ERROR");

    let (status, _) = send(&app, test::TestRequest::get().uri("/api/v1/fe/documents/999")).await;
    assert_eq!(status, 404);

    let unauthenticated = test::TestRequest::post()
        .uri(&fmea_uri)
        .set_json(json!([{ "failure_effect": "Leak", "severity": 7 }]));
    let (status, _) = send(&app, unauthenticated).await;
    assert_eq!(status, 401);

    let (status, _) = send(
        &app,
        post_as_user(&fmea_uri, json!([{ "failure_effect": "Leak", "severity": 11 }])),
    )
    .await;
    assert_eq!(status, 400);

    let (status, _) = send(
        &app,
        post_as_user(&fmea_uri, json!([{ "failure_effect": "Leak" }])),
    )
    .await;
    assert_eq!(status, 400);

    let (_, body) = send(&app, test::TestRequest::get().uri(&fmea_uri)).await;
    assert!(body["options"].as_array().unwrap().is_empty());
}
