//! Single-item API handlers.

use actix_web::{HttpResponse, web};

use crate::auth::Identity;
use crate::db::DbPool;
use crate::error::{AppResult, ErrorResponse};
use crate::models::{Item, ItemHistoryResponse, UpdateItemRequest};

#[utoipa::path(
    get,
    path = "/api/v1/items/{item_id}",
    tag = "Items",
    params(("item_id" = i32, Path, description = "FMEA or CP item ID")),
    responses(
        (status = 200, description = "Item", body = Item),
        (status = 404, description = "Item not found", body = ErrorResponse),
    )
)]
pub async fn get_item(pool: web::Data<DbPool>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let item = pool.get_item(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(item))
}

/// Replace an item's content; the editor is recorded as `edited_by`.
#[utoipa::path(
    put,
    path = "/api/v1/items/{item_id}",
    tag = "Items",
    params(("item_id" = i32, Path, description = "FMEA or CP item ID")),
    request_body = UpdateItemRequest,
    responses(
        (status = 200, description = "Updated item", body = Item),
        (status = 400, description = "Kind mismatch or invalid rating", body = ErrorResponse),
        (status = 401, description = "Missing identity", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
    ),
    security(("remote_user" = []))
)]
pub async fn update_item(
    identity: Identity,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    body: web::Json<UpdateItemRequest>,
) -> AppResult<HttpResponse> {
    let item = pool
        .update_item(path.into_inner(), body.into_inner(), &identity.user)
        .await?;
    Ok(HttpResponse::Ok().json(item))
}

/// Content snapshots of an item, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/items/{item_id}/history",
    tag = "Items",
    params(("item_id" = i32, Path, description = "FMEA or CP item ID")),
    responses(
        (status = 200, description = "Item history", body = ItemHistoryResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
    )
)]
pub async fn get_item_history(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let item_id = path.into_inner();
    let entries = pool.get_item_history(item_id).await?;
    Ok(HttpResponse::Ok().json(ItemHistoryResponse { item_id, entries }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/items/{item_id}")
            .route(web::get().to(get_item))
            .route(web::put().to(update_item)),
    )
    .service(web::resource("/items/{item_id}/history").route(web::get().to(get_item_history)));
}
