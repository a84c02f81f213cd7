//! E2E tests: health endpoints.

use std::sync::Arc;

use actix_web::test;
use fmcp_lib::services::DisabledProvider;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_health_and_ready() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool, Arc::new(DisabledProvider)).await;

    let (status, body) = send(&app, test::TestRequest::get().uri("/api/v1/health")).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));

    let (status, body) = send(&app, test::TestRequest::get().uri("/api/v1/ready")).await;
    assert_eq!(status, 200);
    assert_eq!(body["database"], "connected");
}
