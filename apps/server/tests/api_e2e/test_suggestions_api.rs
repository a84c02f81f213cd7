//! E2E tests: AI suggestion endpoint.

use std::sync::Arc;

use actix_web::test;
use fmcp_lib::services::DisabledProvider;
use serde_json::json;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_suggestions_are_ranked_and_not_stored() {
    let pool = create_test_pool().await;

    // Seed through a disabled app, then query through one with a fixed answer.
    let seed_app = create_test_app(&pool, Arc::new(DisabledProvider)).await;
    let fmea = register(&seed_app, "pfmea.xlsx", "FMEA", json!([{ "failure_mode": "Crack" }])).await;
    let cp = register(
        &seed_app,
        "cp.xlsx",
        "CP",
        json!([
            { "product_characteristic": "Surface" },
            { "product_characteristic": "Length" },
        ]),
    )
    .await;
    let fmea_id = item_ids(&seed_app, fmea["document"]["id"].as_i64().unwrap()).await[0];
    let cp_ids = item_ids(&seed_app, cp["document"]["id"].as_i64().unwrap()).await;

    let answer = format!("{}, 31337, {}", cp_ids[1], cp_ids[0]);
    let app = create_test_app(&pool, Arc::new(FixedAnswer(answer))).await;

    let (status, body) = send(
        &app,
        test::TestRequest::post().uri(&format!("/api/v1/ai/suggest-association/{}", fmea_id)),
    )
    .await;
    assert_eq!(status, 200, "{}", body);
    let suggestions = body["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0]["rank"], 1);
    assert_eq!(suggestions[0]["cp_item"]["id"], cp_ids[1]);
    assert_eq!(suggestions[1]["cp_item"]["id"], cp_ids[0]);
    assert_eq!(body["candidate_count"], 2);

    let (_, listed) = send(
        &app,
        test::TestRequest::get().uri(&format!("/api/v1/items/{}/associations", fmea_id)),
    )
    .await;
    assert!(listed["associations"].as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn test_disabled_provider_is_bad_gateway() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool, Arc::new(DisabledProvider)).await;

    let fmea = register(&app, "pfmea.xlsx", "FMEA", json!([{ "failure_mode": "Crack" }])).await;
    register(&app, "cp.xlsx", "CP", json!([{ "product_characteristic": "Surface" }])).await;
    let fmea_id = item_ids(&app, fmea["document"]["id"].as_i64().unwrap()).await[0];

    let (status, body) = send(
        &app,
        test::TestRequest::post().uri(&format!("/api/v1/ai/suggest-association/{}", fmea_id)),
    )
    .await;
    assert_eq!(status, 502);
    assert_eq!(body["error"], "UPSTREAM_ERROR");

    let (status, _) = send(
        &app,
        test::TestRequest::post().uri("/api/v1/ai/suggest-association/5000"),
    )
    .await;
    assert_eq!(status, 404);
}
