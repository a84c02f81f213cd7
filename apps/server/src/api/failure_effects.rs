//! Failure-effect option API handlers.

use actix_web::{HttpResponse, web};

use crate::auth::Identity;
use crate::db::DbPool;
use crate::error::{AppResult, ErrorResponse};
use crate::models::{FailureEffectListResponse, FailureEffectRow};

/// Failure-effect options of an FMEA document, highest severity first.
#[utoipa::path(
    get,
    path = "/api/v1/fe/documents/{document_id}",
    tag = "Failure Effects",
    params(("document_id" = i32, Path, description = "FMEA document ID")),
    responses(
        (status = 200, description = "Failure-effect options", body = FailureEffectListResponse),
        (status = 400, description = "Document is not an FMEA document", body = ErrorResponse),
        (status = 404, description = "Document not found", body = ErrorResponse),
    )
)]
pub async fn list_failure_effects(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let document_id = path.into_inner();
    let options = pool.list_failure_effects(document_id).await?;

    Ok(HttpResponse::Ok().json(FailureEffectListResponse {
        document_id,
        options,
    }))
}

/// Store parsed failure-effect rows for an FMEA document.
#[utoipa::path(
    post,
    path = "/api/v1/fe/documents/{document_id}",
    tag = "Failure Effects",
    params(("document_id" = i32, Path, description = "FMEA document ID")),
    request_body = [FailureEffectRow],
    responses(
        (status = 201, description = "Failure effects stored", body = FailureEffectListResponse),
        (status = 400, description = "Not an FMEA document or invalid rows", body = ErrorResponse),
        (status = 401, description = "Missing identity", body = ErrorResponse),
        (status = 404, description = "Document not found", body = ErrorResponse),
    ),
    security(("remote_user" = []))
)]
pub async fn add_failure_effects(
    _identity: Identity,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    body: web::Json<Vec<FailureEffectRow>>,
) -> AppResult<HttpResponse> {
    let document_id = path.into_inner();
    let options = pool
        .add_failure_effects(document_id, body.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(FailureEffectListResponse {
        document_id,
        options,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/fe/documents/{document_id}")
            .route(web::get().to(list_failure_effects))
            .route(web::post().to(add_failure_effects)),
    );
}
