use std::{fmt, str::FromStr};

use common::{form::SubmissionOutcome, models::Quarter};

pub mod widget;

#[derive(Debug, Clone)]
pub enum Msg {
    PublicationYear(String),
    SearchType(String),
    SelectQuarter(QuarterChoice),
    Submit,
    Settled(SubmissionOutcome),
}

/// An entry of the quarter pick list, including the empty prompt entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuarterChoice {
    Unselected,
    Selected(Quarter),
}

impl QuarterChoice {
    pub const ALL: [QuarterChoice; 5] = [
        QuarterChoice::Unselected,
        QuarterChoice::Selected(Quarter::First),
        QuarterChoice::Selected(Quarter::Second),
        QuarterChoice::Selected(Quarter::Third),
        QuarterChoice::Selected(Quarter::Fourth),
    ];

    /// Maps the form's quarter value back to an entry, unknown values show the prompt.
    pub fn from_form(quarter: &str) -> Self {
        match Quarter::from_str(quarter) {
            Ok(q) if q.as_str() == quarter => QuarterChoice::Selected(q),
            _ => QuarterChoice::Unselected,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuarterChoice::Unselected => "",
            QuarterChoice::Selected(q) => q.as_str(),
        }
    }
}

impl fmt::Display for QuarterChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuarterChoice::Unselected => write!(f, "Select which quarter"),
            QuarterChoice::Selected(q) => write!(f, "{}", q),
        }
    }
}
