//! Pass/fail classification of subject averages.

use serde::{Deserialize, Serialize};

/// Grade at or above which a subject counts as passing.
pub const DEFAULT_PASSING_THRESHOLD: f64 = 3.95;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeStatus {
    /// No average has been computed yet.
    Unclassified,
    Passing,
    Failing,
}

impl GradeStatus {
    /// Visual marker for a subject block. Unclassified subjects carry none.
    pub fn marker_class(self) -> Option<&'static str> {
        match self {
            Self::Unclassified => None,
            Self::Passing => Some("ramo-aprobando"),
            Self::Failing => Some("ramo-reprobando"),
        }
    }
}

/// An average of zero or below is the "not computed" sentinel.
pub fn classify(average: f64, threshold: f64) -> GradeStatus {
    if average <= 0.0 {
        GradeStatus::Unclassified
    } else if average >= threshold {
        GradeStatus::Passing
    } else {
        GradeStatus::Failing
    }
}

/// Average rendered with one decimal place.
pub fn format_average(average: f64) -> String {
    format!("{average:.1}")
}
