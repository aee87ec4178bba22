use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Parameters posted to `/scopus/data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    pub publication_year: String,
    pub search_type: String,
    pub quarter_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Annual,
    Quarterly,
    Unrecognized,
}

impl SearchKind {
    pub fn from_search_type(search_type: &str) -> Self {
        match search_type {
            "a" => SearchKind::Annual,
            "q" => SearchKind::Quarterly,
            _ => SearchKind::Unrecognized,
        }
    }
}

/// A quarter of the publication year as the backend names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum Quarter {
    #[strum(serialize = "quarter_1", to_string = "Quarter 1")]
    First,
    #[strum(serialize = "quarter_2", to_string = "Quarter 2")]
    Second,
    #[strum(serialize = "quarter_3", to_string = "Quarter 3")]
    Third,
    #[strum(serialize = "quarter_4", to_string = "Quarter 4")]
    Fourth,
}

impl Quarter {
    pub const ALL: [Quarter; 4] = [
        Quarter::First,
        Quarter::Second,
        Quarter::Third,
        Quarter::Fourth,
    ];

    /// Wire value, e.g. `quarter_2`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Quarter::First => "quarter_1",
            Quarter::Second => "quarter_2",
            Quarter::Third => "quarter_3",
            Quarter::Fourth => "quarter_4",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn request_serializes_with_backend_field_names() {
        let request = SubmissionRequest {
            publication_year: "2022".into(),
            search_type: "q".into(),
            quarter_number: "quarter_2".into(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "publicationYear": "2022",
                "searchType": "q",
                "quarterNumber": "quarter_2",
            })
        );
    }

    #[test]
    fn response_filename_is_optional() {
        let response: SubmissionResponse =
            serde_json::from_str(r#"{"message":"Failed to generate data. Check parameters."}"#)
                .unwrap();
        assert_eq!(response.filename, None);
    }

    #[test]
    fn quarter_parses_wire_value_and_displays_label() {
        let quarter = Quarter::from_str("quarter_3").unwrap();
        assert_eq!(quarter, Quarter::Third);
        assert_eq!(quarter.to_string(), "Quarter 3");
        assert_eq!(quarter.as_str(), "quarter_3");
        assert!(Quarter::from_str("quarter_5").is_err());
    }

    #[test]
    fn search_kind_is_case_sensitive() {
        assert_eq!(SearchKind::from_search_type("a"), SearchKind::Annual);
        assert_eq!(SearchKind::from_search_type("q"), SearchKind::Quarterly);
        assert_eq!(SearchKind::from_search_type("Q"), SearchKind::Unrecognized);
        assert_eq!(SearchKind::from_search_type(""), SearchKind::Unrecognized);
    }
}
