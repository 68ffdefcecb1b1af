//! Structured judgments ("asks") collected during sentencing review.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Time unit for an incarceration sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AskUnit {
    Months,
    Years,
}

impl fmt::Display for AskUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AskUnit::Months => write!(f, "months"),
            AskUnit::Years => write!(f, "years"),
        }
    }
}

/// A reviewer's judgment about one free-text field of a case record.
///
/// Only the `Incarceration` variant carries the numeric range; every other
/// variant is fully described by its detail text (or by nothing at all).
/// `num_max == 0` means a single-value sentence rather than a range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    /// The reviewer has not yet picked an ask type.
    Unclassified { details: String },
    NoAsk,
    Incarceration {
        unit: AskUnit,
        num_min: u32,
        num_max: u32,
    },
    Probation { details: String },
    TimeServed,
    NonCustodial { details: String },
    Custom { details: String },
}

impl Default for Annotation {
    fn default() -> Self {
        Annotation::Unclassified {
            details: String::new(),
        }
    }
}

impl Annotation {
    /// The ask-type label as persisted and as shown in the selector.
    pub fn label(&self) -> &'static str {
        match self {
            Annotation::Unclassified { .. } => "",
            Annotation::NoAsk => "No Ask",
            Annotation::Incarceration { .. } => "Incarceration",
            Annotation::Probation { .. } => "Probation",
            Annotation::TimeServed => "Time Served",
            Annotation::NonCustodial { .. } => "Non-custodial",
            Annotation::Custom { .. } => "Custom",
        }
    }

    /// The detail text for this judgment.
    ///
    /// Derived for `Incarceration`: `"2-5 years"` for a range, `"2 years"`
    /// when `num_max` is zero. Always empty for `NoAsk` and `TimeServed`.
    pub fn details(&self) -> String {
        match self {
            Annotation::Incarceration {
                unit,
                num_min,
                num_max,
            } => {
                if *num_max != 0 {
                    format!("{num_min}-{num_max} {unit}")
                } else {
                    format!("{num_min} {unit}")
                }
            }
            Annotation::NoAsk | Annotation::TimeServed => String::new(),
            Annotation::Unclassified { details }
            | Annotation::Probation { details }
            | Annotation::NonCustodial { details }
            | Annotation::Custom { details } => details.clone(),
        }
    }

    /// Whether the reviewer has picked a concrete ask type.
    pub fn is_classified(&self) -> bool {
        !matches!(self, Annotation::Unclassified { .. })
    }
}

/// Which of the two raw text fields is being reviewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewField {
    Sentence,
    Defense,
}

impl ReviewField {
    /// Name of the source text column this field reviews.
    pub fn source_column(&self) -> &'static str {
        match self {
            ReviewField::Sentence => crate::schema::SENTENCE_INFO,
            ReviewField::Defense => crate::schema::DEFENSE_ASK,
        }
    }

    /// Name of the annotation column this field writes.
    pub fn review_column(&self) -> &'static str {
        match self {
            ReviewField::Sentence => crate::schema::REVIEWED_SENTENCE,
            ReviewField::Defense => crate::schema::REVIEWED_DEFENSE_ASK,
        }
    }
}

impl fmt::Display for ReviewField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewField::Sentence => write!(f, "Sentence Info"),
            ReviewField::Defense => write!(f, "Defense Ask"),
        }
    }
}
