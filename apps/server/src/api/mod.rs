//! API endpoint modules.

pub mod associations;
pub mod documents;
pub mod failure_effects;
pub mod health;
pub mod items;
pub mod openapi;
pub mod suggestions;

use actix_web::web;

use crate::error::AppError;

pub use associations::configure_routes as configure_association_routes;
pub use documents::configure_routes as configure_document_routes;
pub use failure_effects::configure_routes as configure_failure_effect_routes;
pub use health::configure_health_routes;
pub use items::configure_routes as configure_item_routes;
pub use openapi::ApiDoc;
pub use suggestions::configure_routes as configure_suggestion_routes;

/// Mount every `/api/v1` route.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(configure_health_routes)
            .configure(configure_document_routes)
            .configure(configure_failure_effect_routes)
            .configure(configure_item_routes)
            .configure(configure_association_routes)
            .configure(configure_suggestion_routes),
    );
}

/// JSON body config that reports malformed payloads as validation errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(16 * 1024 * 1024)
        .error_handler(|err, _req| AppError::Validation(err.to_string()).into())
}

/// Query string config that reports malformed parameters as validation errors.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::Validation(err.to_string()).into())
}

/// Path config that reports non-numeric ids as validation errors.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| AppError::Validation(err.to_string()).into())
}
