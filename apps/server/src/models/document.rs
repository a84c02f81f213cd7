//! Document domain models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::document;
use crate::error::{AppError, AppResult};

use super::failure_effect::FailureEffectRow;
use super::item::ItemRows;

/// Default version label for a newly registered document.
pub const DEFAULT_VERSION: &str = "1.0";

/// Kind of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum DocumentKind {
    /// Failure Mode and Effects Analysis
    #[serde(rename = "FMEA")]
    Fmea,
    /// Control Plan
    #[serde(rename = "CP")]
    Cp,
    /// Operation Instruction (registered but carries no items)
    #[serde(rename = "OI")]
    Oi,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fmea => "FMEA",
            Self::Cp => "CP",
            Self::Oi => "OI",
        }
    }

    /// Case-insensitive parse.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "FMEA" => Some(Self::Fmea),
            "CP" => Some(Self::Cp),
            "OI" => Some(Self::Oi),
            _ => None,
        }
    }

    /// Parse user input, failing with a validation error on unknown kinds.
    pub fn parse_input(s: &str) -> AppResult<Self> {
        Self::parse(s).ok_or_else(|| {
            AppError::Validation(format!(
                "Unknown document type '{}'; expected FMEA, CP or OI",
                s
            ))
        })
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Registered document.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Document {
    pub id: i32,
    pub file_name: String,
    pub document_type: DocumentKind,
    pub version: String,
    pub uploaded_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    pub fn from_entity(model: document::Model) -> AppResult<Self> {
        let document_type = DocumentKind::parse(&model.document_kind).ok_or_else(|| {
            AppError::Database(format!(
                "Document {} has unknown stored kind '{}'",
                model.id, model.document_kind
            ))
        })?;

        Ok(Self {
            id: model.id,
            file_name: model.file_name,
            document_type,
            version: model.version,
            uploaded_by: model.uploaded_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Request to register a document, optionally with its parsed rows.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterDocumentRequest {
    /// Original spreadsheet file name.
    pub file_name: String,
    /// FMEA, CP or OI (case-insensitive).
    pub document_type: String,
    /// Version label, defaults to "1.0".
    #[serde(default)]
    pub version: Option<String>,
    /// Parsed rows to store with the document in the same transaction.
    #[serde(default)]
    pub rows: Option<ItemRows>,
    /// Failure-effect options; FMEA documents only.
    #[serde(default)]
    pub failure_effects: Option<Vec<FailureEffectRow>>,
}

/// Response after registering a document.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterDocumentResponse {
    pub document: Document,
    /// Number of items stored with the document.
    pub item_count: usize,
}

/// Query parameters for listing documents.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ListDocumentsQuery {
    /// Filter by kind (FMEA, CP or OI).
    #[serde(default)]
    pub kind: Option<String>,
}

/// Document list response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DocumentListResponse {
    pub documents: Vec<Document>,
}

/// Document detail with its item count.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DocumentDetail {
    #[serde(flatten)]
    pub document: Document,
    pub item_count: u64,
}
