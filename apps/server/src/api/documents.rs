//! Document registry API handlers.

use actix_web::{HttpResponse, web};

use crate::auth::{AdminAuth, Identity};
use crate::db::DbPool;
use crate::error::{AppResult, ErrorResponse};
use crate::models::{
    DocumentDetail, DocumentKind, DocumentListResponse, FmeaExport, ItemListResponse, ItemRows,
    ListDocumentsQuery, RegisterDocumentRequest, RegisterDocumentResponse,
};

/// Register a document, optionally with its parsed rows.
#[utoipa::path(
    post,
    path = "/api/v1/documents",
    tag = "Documents",
    request_body = RegisterDocumentRequest,
    responses(
        (status = 201, description = "Document registered", body = RegisterDocumentResponse),
        (status = 400, description = "Invalid kind, blank name or bad rows", body = ErrorResponse),
        (status = 401, description = "Missing identity", body = ErrorResponse),
    ),
    security(("remote_user" = []))
)]
pub async fn register_document(
    identity: Identity,
    pool: web::Data<DbPool>,
    body: web::Json<RegisterDocumentRequest>,
) -> AppResult<HttpResponse> {
    let (document, items) = pool
        .register_document(body.into_inner(), &identity.user)
        .await?;

    Ok(HttpResponse::Created().json(RegisterDocumentResponse {
        document,
        item_count: items.len(),
    }))
}

/// List documents in registration order.
#[utoipa::path(
    get,
    path = "/api/v1/documents",
    tag = "Documents",
    params(
        ("kind" = Option<String>, Query, description = "Filter by kind: FMEA, CP or OI")
    ),
    responses(
        (status = 200, description = "Documents", body = DocumentListResponse),
        (status = 400, description = "Unknown kind", body = ErrorResponse),
    )
)]
pub async fn list_documents(
    pool: web::Data<DbPool>,
    query: web::Query<ListDocumentsQuery>,
) -> AppResult<HttpResponse> {
    let kind = query
        .kind
        .as_deref()
        .map(DocumentKind::parse_input)
        .transpose()?;

    let documents = pool.list_documents(kind).await?;
    Ok(HttpResponse::Ok().json(DocumentListResponse { documents }))
}

#[utoipa::path(
    get,
    path = "/api/v1/documents/{document_id}",
    tag = "Documents",
    params(("document_id" = i32, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document with item count", body = DocumentDetail),
        (status = 404, description = "Document not found", body = ErrorResponse),
    )
)]
pub async fn get_document(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let document_id = path.into_inner();
    let document = pool.get_document(document_id).await?;
    let item_count = pool.count_items(document_id).await?;

    Ok(HttpResponse::Ok().json(DocumentDetail {
        document,
        item_count,
    }))
}

/// Delete a document with its items and their associations.
#[utoipa::path(
    delete,
    path = "/api/v1/documents/{document_id}",
    tag = "Documents",
    params(("document_id" = i32, Path, description = "Document ID")),
    responses(
        (status = 204, description = "Document deleted"),
        (status = 401, description = "Missing or invalid admin key", body = ErrorResponse),
        (status = 404, description = "Document not found", body = ErrorResponse),
    ),
    security(("admin_key" = []))
)]
pub async fn delete_document(
    _admin: AdminAuth,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    pool.delete_document(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Store parsed rows for an existing document.
#[utoipa::path(
    post,
    path = "/api/v1/documents/{document_id}/items",
    tag = "Items",
    params(("document_id" = i32, Path, description = "Document ID")),
    request_body = ItemRows,
    responses(
        (status = 201, description = "Items stored", body = ItemListResponse),
        (status = 400, description = "Rows do not match the document or fail validation", body = ErrorResponse),
        (status = 401, description = "Missing identity", body = ErrorResponse),
        (status = 404, description = "Document not found", body = ErrorResponse),
    ),
    security(("remote_user" = []))
)]
pub async fn add_items(
    identity: Identity,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    body: web::Json<ItemRows>,
) -> AppResult<HttpResponse> {
    let document_id = path.into_inner();
    let items = pool
        .bulk_insert_items(document_id, body.into_inner(), &identity.user)
        .await?;

    Ok(HttpResponse::Created().json(ItemListResponse { document_id, items }))
}

/// Items of a document in source row order.
#[utoipa::path(
    get,
    path = "/api/v1/documents/{document_id}/items",
    tag = "Items",
    params(("document_id" = i32, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Items", body = ItemListResponse),
        (status = 404, description = "Document not found", body = ErrorResponse),
    )
)]
pub async fn list_items(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let document_id = path.into_inner();
    let items = pool.get_items_for_document(document_id).await?;

    Ok(HttpResponse::Ok().json(ItemListResponse { document_id, items }))
}

/// FMEA rows of a document with their linked CP rows.
#[utoipa::path(
    get,
    path = "/api/v1/documents/{document_id}/export",
    tag = "Documents",
    params(("document_id" = i32, Path, description = "FMEA document ID")),
    responses(
        (status = 200, description = "Export", body = FmeaExport),
        (status = 400, description = "Not an FMEA document", body = ErrorResponse),
        (status = 404, description = "Document not found", body = ErrorResponse),
    )
)]
pub async fn export_document(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let export = pool.export_fmea_document(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(export))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/documents")
            .route(web::get().to(list_documents))
            .route(web::post().to(register_document)),
    )
    .service(
        web::resource("/documents/{document_id}")
            .route(web::get().to(get_document))
            .route(web::delete().to(delete_document)),
    )
    .service(
        web::resource("/documents/{document_id}/items")
            .route(web::get().to(list_items))
            .route(web::post().to(add_items)),
    )
    .service(web::resource("/documents/{document_id}/export").route(web::get().to(export_document)));
}
