//! FMEA and CP item models, row input and validation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{cp_item, fmea_item};
use crate::error::{AppError, AppResult};

use super::action_priority::{ActionPriority, validate_rating};
use super::document::DocumentKind;

/// Kind of a stored item. Always equal to the owning document's kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ItemKind {
    #[serde(rename = "FMEA")]
    Fmea,
    #[serde(rename = "CP")]
    Cp,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fmea => "FMEA",
            Self::Cp => "CP",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "FMEA" => Some(Self::Fmea),
            "CP" => Some(Self::Cp),
            _ => None,
        }
    }

    /// The item kind a document of `kind` may hold. OI documents hold none.
    pub fn for_document(kind: DocumentKind) -> Option<Self> {
        match kind {
            DocumentKind::Fmea => Some(Self::Fmea),
            DocumentKind::Cp => Some(Self::Cp),
            DocumentKind::Oi => None,
        }
    }

    /// Label used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fmea => "FMEA item",
            Self::Cp => "CP item",
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One parsed FMEA spreadsheet row.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default, deny_unknown_fields)]
pub struct FmeaRow {
    /// Source spreadsheet row; defaults to the position in the batch.
    pub row_index: Option<i32>,
    pub process_step: Option<String>,
    pub process_function: Option<String>,
    pub process_item: Option<String>,
    pub process_item_function: Option<String>,
    pub work_element: Option<String>,
    pub work_element_function: Option<String>,
    pub failure_effects: Option<String>,
    pub failure_mode: Option<String>,
    pub failure_cause: Option<String>,
    /// 1-10
    pub severity: Option<i32>,
    /// 1-10
    pub occurrence: Option<i32>,
    /// 1-10
    pub detection: Option<i32>,
    /// Derived from S/O/D when omitted.
    pub action_priority: Option<ActionPriority>,
    pub prevention_controls: Option<String>,
    pub detection_controls: Option<String>,
    pub prevention_action: Option<String>,
    pub detection_action: Option<String>,
    pub responsible_person: Option<String>,
    pub target_completion_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub action_taken: Option<String>,
    pub completion_date: Option<NaiveDate>,
    pub post_severity: Option<i32>,
    pub post_occurrence: Option<i32>,
    pub post_detection: Option<i32>,
    pub post_action_priority: Option<ActionPriority>,
    pub remarks: Option<String>,
}

/// One parsed Control Plan spreadsheet row.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default, deny_unknown_fields)]
pub struct CpRow {
    /// Source spreadsheet row; defaults to the position in the batch.
    pub row_index: Option<i32>,
    pub process_name: Option<String>,
    pub product_characteristic: Option<String>,
    pub process_characteristic: Option<String>,
    pub evaluation_technique: Option<String>,
    pub control_method: Option<String>,
    pub spec_tolerance: Option<String>,
    pub sample_size: Option<String>,
    pub sample_frequency: Option<String>,
    pub special_characteristic_class: Option<String>,
    pub equipment: Option<String>,
    pub reaction_plan: Option<String>,
}

/// A batch of rows, tagged with the item kind they describe.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", content = "rows")]
pub enum ItemRows {
    #[serde(rename = "FMEA")]
    Fmea(Vec<FmeaRow>),
    #[serde(rename = "CP")]
    Cp(Vec<CpRow>),
}

impl ItemRows {
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Fmea(_) => ItemKind::Fmea,
            Self::Cp(_) => ItemKind::Cp,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Fmea(rows) => rows.len(),
            Self::Cp(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check the batch against the target document kind and validate every row.
    ///
    /// Nothing is written by callers unless this succeeds for the whole batch.
    pub fn validate_for(self, document_kind: DocumentKind) -> AppResult<ValidRows> {
        let expected = ItemKind::for_document(document_kind);

        if expected != Some(self.kind()) {
            if self.is_empty() {
                return Ok(ValidRows::Empty);
            }
            return Err(AppError::Validation(format!(
                "{} rows cannot be stored in a {} document",
                self.kind(),
                document_kind
            )));
        }

        match self {
            Self::Fmea(rows) => rows
                .into_iter()
                .enumerate()
                .map(|(position, row)| row.validate(position))
                .collect::<AppResult<Vec<_>>>()
                .map(ValidRows::Fmea),
            Self::Cp(rows) => rows
                .into_iter()
                .enumerate()
                .map(|(position, row)| row.validate(position))
                .collect::<AppResult<Vec<_>>>()
                .map(ValidRows::Cp),
        }
    }
}

/// Rows that passed validation, ready to be written.
#[derive(Debug, Clone)]
pub enum ValidRows {
    Empty,
    Fmea(Vec<ValidFmeaRow>),
    Cp(Vec<ValidCpRow>),
}

/// Validated FMEA row: ratings in range, AP resolved, text trimmed.
#[derive(Debug, Clone)]
pub struct ValidFmeaRow {
    pub row_index: i32,
    pub process_step: Option<String>,
    pub process_function: Option<String>,
    pub process_item: Option<String>,
    pub process_item_function: Option<String>,
    pub work_element: Option<String>,
    pub work_element_function: Option<String>,
    pub failure_effects: Option<String>,
    pub failure_mode: Option<String>,
    pub failure_cause: Option<String>,
    pub severity: Option<i16>,
    pub occurrence: Option<i16>,
    pub detection: Option<i16>,
    pub action_priority: Option<ActionPriority>,
    pub prevention_controls: Option<String>,
    pub detection_controls: Option<String>,
    pub prevention_action: Option<String>,
    pub detection_action: Option<String>,
    pub responsible_person: Option<String>,
    pub target_completion_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub action_taken: Option<String>,
    pub completion_date: Option<NaiveDate>,
    pub post_severity: Option<i16>,
    pub post_occurrence: Option<i16>,
    pub post_detection: Option<i16>,
    pub post_action_priority: Option<ActionPriority>,
    pub remarks: Option<String>,
}

/// Validated CP row with trimmed text.
#[derive(Debug, Clone)]
pub struct ValidCpRow {
    pub row_index: i32,
    pub process_name: Option<String>,
    pub product_characteristic: Option<String>,
    pub process_characteristic: Option<String>,
    pub evaluation_technique: Option<String>,
    pub control_method: Option<String>,
    pub spec_tolerance: Option<String>,
    pub sample_size: Option<String>,
    pub sample_frequency: Option<String>,
    pub special_characteristic_class: Option<String>,
    pub equipment: Option<String>,
    pub reaction_plan: Option<String>,
}

/// Trim text cells; blank cells become absent.
fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn resolve_row_index(row_index: Option<i32>, position: usize) -> AppResult<i32> {
    match row_index {
        Some(i) if i < 0 => Err(AppError::Validation(format!(
            "row_index must not be negative, got {}",
            i
        ))),
        Some(i) => Ok(i),
        None => i32::try_from(position)
            .map_err(|_| AppError::Validation("Too many rows in one batch".to_string())),
    }
}

impl FmeaRow {
    /// Validate one row. `position` is its index in the submitted batch.
    pub fn validate(self, position: usize) -> AppResult<ValidFmeaRow> {
        let row_index = resolve_row_index(self.row_index, position)?;
        let at = |field: &str| format!("{} (row {})", field, row_index);

        let severity = validate_rating(&at("severity"), self.severity)?;
        let occurrence = validate_rating(&at("occurrence"), self.occurrence)?;
        let detection = validate_rating(&at("detection"), self.detection)?;
        let post_severity = validate_rating(&at("post_severity"), self.post_severity)?;
        let post_occurrence = validate_rating(&at("post_occurrence"), self.post_occurrence)?;
        let post_detection = validate_rating(&at("post_detection"), self.post_detection)?;

        Ok(ValidFmeaRow {
            row_index,
            process_step: clean(self.process_step),
            process_function: clean(self.process_function),
            process_item: clean(self.process_item),
            process_item_function: clean(self.process_item_function),
            work_element: clean(self.work_element),
            work_element_function: clean(self.work_element_function),
            failure_effects: clean(self.failure_effects),
            failure_mode: clean(self.failure_mode),
            failure_cause: clean(self.failure_cause),
            severity,
            occurrence,
            detection,
            action_priority: ActionPriority::resolve(
                self.action_priority,
                severity,
                occurrence,
                detection,
            ),
            prevention_controls: clean(self.prevention_controls),
            detection_controls: clean(self.detection_controls),
            prevention_action: clean(self.prevention_action),
            detection_action: clean(self.detection_action),
            responsible_person: clean(self.responsible_person),
            target_completion_date: self.target_completion_date,
            status: clean(self.status),
            action_taken: clean(self.action_taken),
            completion_date: self.completion_date,
            post_severity,
            post_occurrence,
            post_detection,
            post_action_priority: ActionPriority::resolve(
                self.post_action_priority,
                post_severity,
                post_occurrence,
                post_detection,
            ),
            remarks: clean(self.remarks),
        })
    }
}

impl CpRow {
    /// Validate one row. `position` is its index in the submitted batch.
    pub fn validate(self, position: usize) -> AppResult<ValidCpRow> {
        Ok(ValidCpRow {
            row_index: resolve_row_index(self.row_index, position)?,
            process_name: clean(self.process_name),
            product_characteristic: clean(self.product_characteristic),
            process_characteristic: clean(self.process_characteristic),
            evaluation_technique: clean(self.evaluation_technique),
            control_method: clean(self.control_method),
            spec_tolerance: clean(self.spec_tolerance),
            sample_size: clean(self.sample_size),
            sample_frequency: clean(self.sample_frequency),
            special_characteristic_class: clean(self.special_characteristic_class),
            equipment: clean(self.equipment),
            reaction_plan: clean(self.reaction_plan),
        })
    }
}

/// Stored FMEA item.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FmeaItem {
    pub id: i32,
    pub document_id: i32,
    pub row_index: i32,
    pub process_step: Option<String>,
    pub process_function: Option<String>,
    pub process_item: Option<String>,
    pub process_item_function: Option<String>,
    pub work_element: Option<String>,
    pub work_element_function: Option<String>,
    pub failure_effects: Option<String>,
    pub failure_mode: Option<String>,
    pub failure_cause: Option<String>,
    pub severity: Option<i16>,
    pub occurrence: Option<i16>,
    pub detection: Option<i16>,
    pub action_priority: Option<ActionPriority>,
    pub prevention_controls: Option<String>,
    pub detection_controls: Option<String>,
    pub prevention_action: Option<String>,
    pub detection_action: Option<String>,
    pub responsible_person: Option<String>,
    pub target_completion_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub action_taken: Option<String>,
    pub completion_date: Option<NaiveDate>,
    pub post_severity: Option<i16>,
    pub post_occurrence: Option<i16>,
    pub post_detection: Option<i16>,
    pub post_action_priority: Option<ActionPriority>,
    pub remarks: Option<String>,
    pub edited_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FmeaItem {
    pub fn from_entity(model: fmea_item::Model) -> Self {
        Self {
            id: model.id,
            document_id: model.document_id,
            row_index: model.row_index,
            process_step: model.process_step,
            process_function: model.process_function,
            process_item: model.process_item,
            process_item_function: model.process_item_function,
            work_element: model.work_element,
            work_element_function: model.work_element_function,
            failure_effects: model.failure_effects,
            failure_mode: model.failure_mode,
            failure_cause: model.failure_cause,
            severity: model.severity,
            occurrence: model.occurrence,
            detection: model.detection,
            action_priority: model
                .action_priority
                .as_deref()
                .and_then(ActionPriority::parse),
            prevention_controls: model.prevention_controls,
            detection_controls: model.detection_controls,
            prevention_action: model.prevention_action,
            detection_action: model.detection_action,
            responsible_person: model.responsible_person,
            target_completion_date: model.target_completion_date,
            status: model.status,
            action_taken: model.action_taken,
            completion_date: model.completion_date,
            post_severity: model.post_severity,
            post_occurrence: model.post_occurrence,
            post_detection: model.post_detection,
            post_action_priority: model
                .post_action_priority
                .as_deref()
                .and_then(ActionPriority::parse),
            remarks: model.remarks,
            edited_by: model.edited_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Stored CP item.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CpItem {
    pub id: i32,
    pub document_id: i32,
    pub row_index: i32,
    pub process_name: Option<String>,
    pub product_characteristic: Option<String>,
    pub process_characteristic: Option<String>,
    pub evaluation_technique: Option<String>,
    pub control_method: Option<String>,
    pub spec_tolerance: Option<String>,
    pub sample_size: Option<String>,
    pub sample_frequency: Option<String>,
    pub special_characteristic_class: Option<String>,
    pub equipment: Option<String>,
    pub reaction_plan: Option<String>,
    pub edited_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CpItem {
    pub fn from_entity(model: cp_item::Model) -> Self {
        Self {
            id: model.id,
            document_id: model.document_id,
            row_index: model.row_index,
            process_name: model.process_name,
            product_characteristic: model.product_characteristic,
            process_characteristic: model.process_characteristic,
            evaluation_technique: model.evaluation_technique,
            control_method: model.control_method,
            spec_tolerance: model.spec_tolerance,
            sample_size: model.sample_size,
            sample_frequency: model.sample_frequency,
            special_characteristic_class: model.special_characteristic_class,
            equipment: model.equipment,
            reaction_plan: model.reaction_plan,
            edited_by: model.edited_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// A stored item of either kind.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind")]
pub enum Item {
    #[serde(rename = "FMEA")]
    Fmea(FmeaItem),
    #[serde(rename = "CP")]
    Cp(CpItem),
}

impl Item {
    pub fn id(&self) -> i32 {
        match self {
            Self::Fmea(item) => item.id,
            Self::Cp(item) => item.id,
        }
    }

    pub fn document_id(&self) -> i32 {
        match self {
            Self::Fmea(item) => item.document_id,
            Self::Cp(item) => item.document_id,
        }
    }

    pub fn row_index(&self) -> i32 {
        match self {
            Self::Fmea(item) => item.row_index,
            Self::Cp(item) => item.row_index,
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Fmea(_) => ItemKind::Fmea,
            Self::Cp(_) => ItemKind::Cp,
        }
    }
}

/// Replacement content for an item. The kind must match the stored item.
///
/// `row_index` in the payload is ignored; an item keeps its source row.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind")]
pub enum UpdateItemRequest {
    #[serde(rename = "FMEA")]
    Fmea(FmeaRow),
    #[serde(rename = "CP")]
    Cp(CpRow),
}

impl UpdateItemRequest {
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Fmea(_) => ItemKind::Fmea,
            Self::Cp(_) => ItemKind::Cp,
        }
    }
}

/// Items of one document in row order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemListResponse {
    pub document_id: i32,
    pub items: Vec<Item>,
}
