//! AI suggestion endpoint.

use actix_web::{HttpResponse, web};

use crate::db::DbPool;
use crate::error::{AppResult, ErrorResponse};
use crate::models::SuggestionResponse;
use crate::services::SuggestionService;

/// Rank CP items not yet linked to the FMEA item. Nothing is stored.
#[utoipa::path(
    post,
    path = "/api/v1/ai/suggest-association/{fmea_item_id}",
    tag = "Suggestions",
    params(("fmea_item_id" = i32, Path, description = "FMEA item ID")),
    responses(
        (status = 200, description = "Suggested CP items, best first", body = SuggestionResponse),
        (status = 400, description = "The id names a CP item", body = ErrorResponse),
        (status = 404, description = "FMEA item not found", body = ErrorResponse),
        (status = 502, description = "Provider failed or is not configured", body = ErrorResponse),
    )
)]
pub async fn suggest_association(
    pool: web::Data<DbPool>,
    service: web::Data<SuggestionService>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let response = service.suggest(&pool, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/ai/suggest-association/{fmea_item_id}")
            .route(web::post().to(suggest_association)),
    );
}
