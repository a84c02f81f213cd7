//! Failure-effect options of an FMEA document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::fmea_fe_item;
use crate::error::{AppError, AppResult};

use super::action_priority::validate_rating;

/// One failure effect as parsed from the effect list sheet.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct FailureEffectRow {
    pub failure_effect: String,
    /// 1-10
    pub severity: i32,
}

/// A failure-effect row that passed validation.
#[derive(Debug, Clone)]
pub struct ValidFailureEffect {
    pub failure_effect: String,
    pub severity: i16,
}

impl FailureEffectRow {
    /// Validate one row; `position` is its index in the batch.
    pub fn validate(self, position: usize) -> AppResult<ValidFailureEffect> {
        let failure_effect = self.failure_effect.trim().to_string();
        if failure_effect.is_empty() {
            return Err(AppError::Validation(format!(
                "failure_effects[{}].failure_effect must not be blank",
                position
            )));
        }

        let field = format!("failure_effects[{}].severity", position);
        let severity = validate_rating(&field, Some(self.severity))?
            .ok_or_else(|| AppError::Validation(format!("{} is required", field)))?;

        Ok(ValidFailureEffect {
            failure_effect,
            severity,
        })
    }
}

/// Validate a batch of rows, failing on the first invalid one.
pub fn validate_failure_effects(rows: Vec<FailureEffectRow>) -> AppResult<Vec<ValidFailureEffect>> {
    rows.into_iter()
        .enumerate()
        .map(|(position, row)| row.validate(position))
        .collect()
}

/// A stored failure-effect option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FailureEffectOption {
    pub id: i32,
    pub document_id: i32,
    pub failure_effect: String,
    pub severity: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<fmea_fe_item::Model> for FailureEffectOption {
    fn from(model: fmea_fe_item::Model) -> Self {
        Self {
            id: model.id,
            document_id: model.document_id,
            failure_effect: model.failure_effect,
            severity: model.severity,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Failure-effect options of one FMEA document, highest severity first.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FailureEffectListResponse {
    pub document_id: i32,
    pub options: Vec<FailureEffectOption>,
}
