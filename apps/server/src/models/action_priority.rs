//! Risk ratings and AIAG-VDA Action Priority.
//!
//! Severity, occurrence and detection are rated 1..=10. The Action Priority
//! table groups each rating into bands and maps the band triple to H/M/L.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Lowest valid S/O/D rating.
pub const MIN_RATING: i32 = 1;

/// Highest valid S/O/D rating.
pub const MAX_RATING: i32 = 10;

/// Check an optional rating against the valid range.
///
/// `field` names the offending column in the error message.
pub fn validate_rating(field: &str, value: Option<i32>) -> AppResult<Option<i16>> {
    match value {
        None => Ok(None),
        Some(v) if (MIN_RATING..=MAX_RATING).contains(&v) => Ok(Some(v as i16)),
        Some(v) => Err(AppError::Validation(format!(
            "{} must be between {} and {}, got {}",
            field, MIN_RATING, MAX_RATING, v
        ))),
    }
}

/// Action Priority (AP) level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ActionPriority {
    #[serde(rename = "H")]
    High,
    #[serde(rename = "M")]
    Medium,
    #[serde(rename = "L")]
    Low,
}

impl ActionPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "H",
            Self::Medium => "M",
            Self::Low => "L",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "H" | "HIGH" => Some(Self::High),
            "M" | "MEDIUM" => Some(Self::Medium),
            "L" | "LOW" => Some(Self::Low),
            _ => None,
        }
    }

    /// Look up the AP for a rating triple. Every rating must already be in range.
    pub fn from_ratings(severity: i16, occurrence: i16, detection: i16) -> Self {
        use ActionPriority::{High as H, Low as L, Medium as M};

        let s = severity_band(severity);
        let o = occurrence_band(occurrence);
        let d = detection_band(detection);

        // Rows: occurrence band 8-10, 6-7, 4-5, 2-3, 1.
        // Columns: detection band 7-10, 5-6, 2-4, 1.
        const TABLE: [[[ActionPriority; 4]; 5]; 5] = [
            // S 9-10
            [
                [H, H, H, H],
                [H, H, H, H],
                [H, H, H, M],
                [H, M, L, L],
                [L, L, L, L],
            ],
            // S 7-8
            [
                [H, H, H, H],
                [H, H, H, M],
                [H, M, M, M],
                [M, M, L, L],
                [L, L, L, L],
            ],
            // S 4-6
            [
                [H, H, M, M],
                [M, M, M, L],
                [M, L, L, L],
                [L, L, L, L],
                [L, L, L, L],
            ],
            // S 2-3
            [
                [M, M, L, L],
                [L, L, L, L],
                [L, L, L, L],
                [L, L, L, L],
                [L, L, L, L],
            ],
            // S 1
            [
                [L, L, L, L],
                [L, L, L, L],
                [L, L, L, L],
                [L, L, L, L],
                [L, L, L, L],
            ],
        ];

        TABLE[s][o][d]
    }

    /// Keep an explicit AP, otherwise derive it when all three ratings are present.
    pub fn resolve(
        explicit: Option<Self>,
        severity: Option<i16>,
        occurrence: Option<i16>,
        detection: Option<i16>,
    ) -> Option<Self> {
        explicit.or(match (severity, occurrence, detection) {
            (Some(s), Some(o), Some(d)) => Some(Self::from_ratings(s, o, d)),
            _ => None,
        })
    }
}

impl std::fmt::Display for ActionPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn severity_band(value: i16) -> usize {
    match value {
        9.. => 0,
        7..=8 => 1,
        4..=6 => 2,
        2..=3 => 3,
        _ => 4,
    }
}

fn occurrence_band(value: i16) -> usize {
    match value {
        8.. => 0,
        6..=7 => 1,
        4..=5 => 2,
        2..=3 => 3,
        _ => 4,
    }
}

fn detection_band(value: i16) -> usize {
    match value {
        7.. => 0,
        5..=6 => 1,
        2..=4 => 2,
        _ => 3,
    }
}
