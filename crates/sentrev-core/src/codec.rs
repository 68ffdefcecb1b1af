//! JSON wire form for annotations persisted in `reviewed_*` cells.
//!
//! The cell holds a flat object with keys `type` and `details`, plus
//! `unit`/`num_min`/`num_max` for incarceration asks. Decoding is strict:
//! a malformed cell yields an explicit [`CodecError`] for the caller to
//! surface instead of being silently replaced with an empty judgment.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::annotation::{Annotation, AskUnit};

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown ask type: {0:?}")]
    UnknownType(String),

    #[error("incarceration annotation missing unit")]
    MissingUnit,
}

/// Flat cell representation shared by every ask type.
#[derive(Serialize, Deserialize)]
struct WireRecord {
    #[serde(rename = "type")]
    ask_type: String,
    #[serde(default)]
    details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    unit: Option<AskUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    num_min: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    num_max: Option<u32>,
}

/// Encode an annotation as its canonical cell text.
pub fn encode(ann: &Annotation) -> String {
    let (unit, num_min, num_max) = match ann {
        Annotation::Incarceration {
            unit,
            num_min,
            num_max,
        } => (Some(*unit), Some(*num_min), Some(*num_max)),
        _ => (None, None, None),
    };
    let record = WireRecord {
        ask_type: ann.label().to_string(),
        details: ann.details(),
        unit,
        num_min,
        num_max,
    };
    // A flat struct of strings and integers always serialises.
    serde_json::to_string(&record).expect("wire record serialises")
}

/// Decode cell text back into an annotation.
pub fn decode(cell: &str) -> Result<Annotation, CodecError> {
    let record: WireRecord = serde_json::from_str(cell)?;
    match record.ask_type.as_str() {
        "" => Ok(Annotation::Unclassified {
            details: record.details,
        }),
        "No Ask" => Ok(Annotation::NoAsk),
        "Incarceration" => Ok(Annotation::Incarceration {
            unit: record.unit.ok_or(CodecError::MissingUnit)?,
            num_min: record.num_min.unwrap_or(0),
            num_max: record.num_max.unwrap_or(0),
        }),
        "Probation" => Ok(Annotation::Probation {
            details: record.details,
        }),
        "Time Served" => Ok(Annotation::TimeServed),
        "Non-custodial" => Ok(Annotation::NonCustodial {
            details: record.details,
        }),
        "Custom" => Ok(Annotation::Custom {
            details: record.details,
        }),
        other => Err(CodecError::UnknownType(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incarceration_roundtrip() {
        let ann = Annotation::Incarceration {
            unit: AskUnit::Years,
            num_min: 2,
            num_max: 5,
        };
        let cell = encode(&ann);
        assert!(cell.contains("\"type\":\"Incarceration\""));
        assert!(cell.contains("\"details\":\"2-5 years\""));
        assert!(cell.contains("\"unit\":\"years\""));
        assert_eq!(decode(&cell).unwrap(), ann);
    }

    #[test]
    fn custom_roundtrip() {
        let ann = Annotation::Custom {
            details: "deferred prosecution agreement".into(),
        };
        assert_eq!(decode(&encode(&ann)).unwrap(), ann);
    }

    #[test]
    fn no_ask_omits_numeric_keys() {
        let cell = encode(&Annotation::NoAsk);
        assert_eq!(cell, r#"{"type":"No Ask","details":""}"#);
        assert_eq!(decode(&cell).unwrap(), Annotation::NoAsk);
    }

    #[test]
    fn unclassified_roundtrip_keeps_details() {
        let ann = Annotation::Unclassified {
            details: "needs a second look".into(),
        };
        assert_eq!(decode(&encode(&ann)).unwrap(), ann);
    }

    #[test]
    fn malformed_json_is_an_error() {
        // The python predecessor stored repr() dicts; those must now fail
        // loudly rather than silently resetting the judgment.
        let result = decode("{'type': 'No Ask', 'details': ''}");
        assert!(matches!(result, Err(CodecError::Json(_))));
    }

    #[test]
    fn unknown_type_is_an_error() {
        let result = decode(r#"{"type":"Parole","details":""}"#);
        assert!(matches!(result, Err(CodecError::UnknownType(t)) if t == "Parole"));
    }

    #[test]
    fn incarceration_without_unit_is_an_error() {
        let result = decode(r#"{"type":"Incarceration","details":"2 years","num_min":2}"#);
        assert!(matches!(result, Err(CodecError::MissingUnit)));
    }

    #[test]
    fn missing_numeric_fields_default_to_zero() {
        let ann = decode(r#"{"type":"Incarceration","details":"","unit":"months"}"#).unwrap();
        assert_eq!(
            ann,
            Annotation::Incarceration {
                unit: AskUnit::Months,
                num_min: 0,
                num_max: 0,
            }
        );
    }
}
