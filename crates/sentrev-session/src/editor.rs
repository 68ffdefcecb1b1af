//! Turns reviewer input into a stored annotation.

use sentrev_core::{Annotation, AskUnit};

/// What the reviewer entered for the active field: the selected ask type
/// plus whichever conditional inputs that type exposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AskInput {
    Unclassified,
    NoAsk,
    Incarceration {
        unit: AskUnit,
        num_min: u32,
        num_max: u32,
    },
    Probation,
    TimeServed,
    NonCustodial { details: String },
    Custom { details: String },
}

/// Build the annotation to store from the reviewer's input and whatever
/// judgment the field already carried.
///
/// `Probation` takes no input of its own and keeps the prior detail text
/// as-is. `Unclassified` likewise carries the prior details forward, with
/// the type left unset.
pub fn apply(existing: Option<&Annotation>, input: AskInput) -> Annotation {
    match input {
        AskInput::Unclassified => Annotation::Unclassified {
            details: prior_details(existing),
        },
        AskInput::NoAsk => Annotation::NoAsk,
        AskInput::Incarceration {
            unit,
            num_min,
            num_max,
        } => Annotation::Incarceration {
            unit,
            num_min,
            num_max,
        },
        AskInput::Probation => Annotation::Probation {
            details: prior_details(existing),
        },
        AskInput::TimeServed => Annotation::TimeServed,
        AskInput::NonCustodial { details } => Annotation::NonCustodial { details },
        AskInput::Custom { details } => Annotation::Custom { details },
    }
}

fn prior_details(existing: Option<&Annotation>) -> String {
    existing.map(Annotation::details).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incarceration_stores_range_and_derives_details() {
        let ann = apply(
            None,
            AskInput::Incarceration {
                unit: AskUnit::Years,
                num_min: 2,
                num_max: 5,
            },
        );
        assert_eq!(ann.label(), "Incarceration");
        assert_eq!(ann.details(), "2-5 years");
    }

    #[test]
    fn time_served_forces_empty_details() {
        let existing = Annotation::Custom {
            details: "old text".into(),
        };
        let ann = apply(Some(&existing), AskInput::TimeServed);
        assert_eq!(ann, Annotation::TimeServed);
        assert_eq!(ann.details(), "");
    }

    #[test]
    fn no_ask_forces_empty_details() {
        let ann = apply(None, AskInput::NoAsk);
        assert_eq!(ann.details(), "");
    }

    #[test]
    fn custom_takes_text_verbatim() {
        let ann = apply(None, AskInput::Custom {
            details: "split sentence".into(),
        });
        assert_eq!(ann, Annotation::Custom {
            details: "split sentence".into(),
        });
    }

    #[test]
    fn probation_keeps_prior_details() {
        let existing = Annotation::NonCustodial {
            details: "community service".into(),
        };
        let ann = apply(Some(&existing), AskInput::Probation);
        assert_eq!(ann, Annotation::Probation {
            details: "community service".into(),
        });
    }

    #[test]
    fn probation_with_no_prior_judgment_is_empty() {
        let ann = apply(None, AskInput::Probation);
        assert_eq!(ann, Annotation::Probation {
            details: String::new(),
        });
    }

    #[test]
    fn unclassified_keeps_prior_details_but_not_type() {
        let existing = Annotation::Custom {
            details: "keep me".into(),
        };
        let ann = apply(Some(&existing), AskInput::Unclassified);
        assert!(!ann.is_classified());
        assert_eq!(ann.details(), "keep me");
    }
}
