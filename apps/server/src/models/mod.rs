//! Domain models and DTOs for documents, items, history and associations.

pub mod action_priority;
pub mod association;
pub mod document;
pub mod export;
pub mod failure_effect;
pub mod history;
pub mod item;
pub mod suggestion;

pub use action_priority::ActionPriority;
pub use association::{
    Association, AssociationListResponse, CreateAssociationsRequest, LinkedCpItem,
};
pub use document::{
    Document, DocumentDetail, DocumentKind, DocumentListResponse, ListDocumentsQuery,
    RegisterDocumentRequest, RegisterDocumentResponse,
};
pub use export::{FmeaExport, FmeaExportRow};
pub use failure_effect::{
    FailureEffectListResponse, FailureEffectOption, FailureEffectRow, ValidFailureEffect,
};
pub use history::{ChangeType, ItemHistoryEntry, ItemHistoryResponse};
pub use item::{
    CpItem, CpRow, FmeaItem, FmeaRow, Item, ItemKind, ItemListResponse, ItemRows,
    UpdateItemRequest, ValidCpRow, ValidFmeaRow, ValidRows,
};
pub use suggestion::{SuggestedCpItem, SuggestionResponse};
