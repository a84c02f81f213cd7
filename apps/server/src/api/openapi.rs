//! OpenAPI documentation configuration.

use utoipa::OpenApi;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};

use crate::config::{ADMIN_KEY_HEADER, IDENTITY_HEADER};
use crate::{api, error, models};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "FMEA/CP Association Server",
        version = "0.1.0",
        description = "Review FMEA and Control Plan documents and record confirmed links between their rows"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        api::health::health,
        api::health::ready,
        api::documents::register_document,
        api::documents::list_documents,
        api::documents::get_document,
        api::documents::delete_document,
        api::documents::add_items,
        api::documents::list_items,
        api::documents::export_document,
        api::items::get_item,
        api::items::update_item,
        api::items::get_item_history,
        api::failure_effects::list_failure_effects,
        api::failure_effects::add_failure_effects,
        api::associations::create_associations,
        api::associations::list_associations,
        api::suggestions::suggest_association,
    ),
    components(
        schemas(
            error::ErrorResponse,
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Documents
            models::DocumentKind,
            models::Document,
            models::DocumentDetail,
            models::DocumentListResponse,
            models::RegisterDocumentRequest,
            models::RegisterDocumentResponse,
            models::ListDocumentsQuery,
            // Items
            models::ActionPriority,
            models::ItemKind,
            models::FmeaRow,
            models::CpRow,
            models::ItemRows,
            models::FmeaItem,
            models::CpItem,
            models::Item,
            models::UpdateItemRequest,
            models::ItemListResponse,
            models::ChangeType,
            models::ItemHistoryEntry,
            models::ItemHistoryResponse,
            // Failure effects
            models::FailureEffectRow,
            models::FailureEffectOption,
            models::FailureEffectListResponse,
            // Associations
            models::Association,
            models::AssociationListResponse,
            models::CreateAssociationsRequest,
            models::LinkedCpItem,
            models::FmeaExport,
            models::FmeaExportRow,
            // Suggestions
            models::SuggestedCpItem,
            models::SuggestionResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Documents", description = "Document registration, listing, deletion and export"),
        (name = "Items", description = "FMEA and CP rows"),
        (name = "Failure Effects", description = "Failure-effect options of FMEA documents"),
        (name = "Associations", description = "Confirmed FMEA to CP links"),
        (name = "Suggestions", description = "AI-ranked CP candidates for an FMEA row")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Registers the identity and admin key header schemes.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "remote_user",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(IDENTITY_HEADER))),
            );
            components.add_security_scheme(
                "admin_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(ADMIN_KEY_HEADER))),
            );
        }
    }
}
