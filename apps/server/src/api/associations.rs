//! Association ledger API handlers.

use actix_web::{HttpResponse, web};

use crate::auth::Identity;
use crate::db::DbPool;
use crate::error::{AppResult, ErrorResponse};
use crate::models::{Association, AssociationListResponse, CreateAssociationsRequest};

/// Confirm links from one FMEA item to CP items.
///
/// Pairs that already exist are returned unchanged.
#[utoipa::path(
    post,
    path = "/api/v1/associations",
    tag = "Associations",
    request_body = CreateAssociationsRequest,
    responses(
        (status = 201, description = "Associations recorded", body = [Association]),
        (status = 400, description = "An id names an item of the wrong kind", body = ErrorResponse),
        (status = 401, description = "Missing identity", body = ErrorResponse),
        (status = 404, description = "An id names no item", body = ErrorResponse),
    ),
    security(("remote_user" = []))
)]
pub async fn create_associations(
    identity: Identity,
    pool: web::Data<DbPool>,
    body: web::Json<CreateAssociationsRequest>,
) -> AppResult<HttpResponse> {
    let request = body.into_inner();
    let associations = pool
        .create_associations(request.fmea_item_id, &request.cp_item_ids, &identity.user)
        .await?;

    Ok(HttpResponse::Created().json(associations))
}

#[utoipa::path(
    get,
    path = "/api/v1/items/{item_id}/associations",
    tag = "Associations",
    params(("item_id" = i32, Path, description = "FMEA item ID")),
    responses(
        (status = 200, description = "Associations of the FMEA item", body = AssociationListResponse),
        (status = 400, description = "The id names a CP item", body = ErrorResponse),
        (status = 404, description = "FMEA item not found", body = ErrorResponse),
    )
)]
pub async fn list_associations(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let fmea_item_id = path.into_inner();
    let associations = pool.list_associations_for_fmea_item(fmea_item_id).await?;

    Ok(HttpResponse::Ok().json(AssociationListResponse {
        fmea_item_id,
        associations,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/associations").route(web::post().to(create_associations)))
        .service(
            web::resource("/items/{item_id}/associations").route(web::get().to(list_associations)),
        );
}
