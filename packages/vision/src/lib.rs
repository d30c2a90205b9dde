#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Vision-model autofill for new reports.
//!
//! The submission form sends the uploaded photo to an external vision model
//! with [`ANALYSIS_PROMPT`] and uses the answer to pre-fill the animal name,
//! injury status and description. The inference call itself belongs to the
//! caller; this crate turns the model's raw text into an [`AnimalAutofill`].
//! Models frequently wrap JSON in Markdown code fences and phrase the
//! injury status loosely, so both are normalized here.

use std::sync::LazyLock;

use animal_alert_report_models::InjuryStatus;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Prompt sent alongside the photo.
pub const ANALYSIS_PROMPT: &str = r#"Analyze this image and output ONLY valid JSON.
Do not use Markdown. Do not use code blocks.
Return this exact structure:
{
  "animal": "Name of animal",
  "isInjured": "Yes/No/Unknown",
  "description": "Short description"
}"#;

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)```json|```").unwrap_or_else(|_| unreachable!()));

/// Errors that can occur while interpreting a model response.
#[derive(Debug, Error)]
pub enum VisionError {
    /// The response was not valid JSON after fence stripping.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The response parsed, but not to a JSON object.
    #[error("Expected a JSON object, got: {found}")]
    NotAnObject {
        /// The JSON type that was found instead.
        found: String,
    },
}

/// Form values suggested by the vision model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalAutofill {
    /// Suggested report name. Empty when the model gave none.
    pub animal: String,
    /// Normalized injury status.
    pub injury_status: InjuryStatus,
    /// Suggested description. Empty when the model gave none.
    pub description: String,
}

/// Parses a raw model response into an [`AnimalAutofill`].
///
/// The animal name falls back to a `name` field, and missing text fields
/// become empty strings.
///
/// # Errors
///
/// Returns [`VisionError`] if the response is not a JSON object.
pub fn parse_autofill(raw: &str) -> Result<AnimalAutofill, VisionError> {
    let cleaned = strip_code_fences(raw);
    log::trace!("parsing vision response: {cleaned}");

    let fields = match serde_json::from_str(&cleaned)? {
        Value::Object(fields) => fields,
        other => {
            return Err(VisionError::NotAnObject {
                found: json_type_name(&other).to_string(),
            });
        }
    };

    let text = |key: &str| {
        fields
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    };

    Ok(AnimalAutofill {
        animal: text("animal")
            .or_else(|| text("name"))
            .unwrap_or_default()
            .to_string(),
        injury_status: normalize_injury(text("isInjured")),
        description: text("description").unwrap_or_default().to_string(),
    })
}

/// Removes Markdown code fences (with or without a `json` tag) and
/// surrounding whitespace.
#[must_use]
pub fn strip_code_fences(raw: &str) -> String {
    CODE_FENCE.replace_all(raw, "").trim().to_string()
}

/// Maps free-form injury wording onto [`InjuryStatus`].
///
/// Matching is case-insensitive and checked in order: a literal "unknown"
/// stays unknown, "yes"/"injur" means injured, then "no"/"health" means not
/// injured, anything else is unknown.
///
/// The exact "unknown" check must stay first: "unknown" contains "no" and
/// would otherwise be read as not injured.
#[must_use]
pub fn normalize_injury(value: Option<&str>) -> InjuryStatus {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return InjuryStatus::Unknown;
    };
    let value = value.trim().to_lowercase();

    if value == "unknown" {
        InjuryStatus::Unknown
    } else if value.contains("yes") || value.contains("injur") {
        InjuryStatus::Yes
    } else if value.contains("no") || value.contains("health") {
        InjuryStatus::No
    } else {
        InjuryStatus::Unknown
    }
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_json() {
        let autofill = parse_autofill(
            r#"{"animal": "Indian Pariah Dog", "isInjured": "Yes", "description": "Limping on the left leg"}"#,
        )
        .unwrap();

        assert_eq!(
            autofill,
            AnimalAutofill {
                animal: "Indian Pariah Dog".to_string(),
                injury_status: InjuryStatus::Yes,
                description: "Limping on the left leg".to_string(),
            }
        );
    }

    #[test]
    fn strips_markdown_fences() {
        let raw = "```JSON\n{\"animal\": \"Cow\", \"isInjured\": \"No\"}\n```\n";
        let autofill = parse_autofill(raw).unwrap();

        assert_eq!(autofill.animal, "Cow");
        assert_eq!(autofill.injury_status, InjuryStatus::No);
        assert_eq!(autofill.description, "");
    }

    #[test]
    fn falls_back_to_name_field() {
        let autofill = parse_autofill(r#"{"name": "Pigeon", "animal": ""}"#).unwrap();
        assert_eq!(autofill.animal, "Pigeon");
        assert_eq!(autofill.injury_status, InjuryStatus::Unknown);
    }

    #[test]
    fn normalizes_injury_wording() {
        assert_eq!(normalize_injury(Some("YES")), InjuryStatus::Yes);
        assert_eq!(normalize_injury(Some("Injured wing")), InjuryStatus::Yes);
        assert_eq!(normalize_injury(Some("no")), InjuryStatus::No);
        assert_eq!(normalize_injury(Some("Looks healthy")), InjuryStatus::No);
        assert_eq!(normalize_injury(Some("unclear")), InjuryStatus::Unknown);
        assert_eq!(normalize_injury(Some("")), InjuryStatus::Unknown);
        assert_eq!(normalize_injury(None), InjuryStatus::Unknown);
    }

    #[test]
    fn literal_unknown_is_not_read_as_no() {
        assert_eq!(normalize_injury(Some("Unknown")), InjuryStatus::Unknown);
        assert_eq!(normalize_injury(Some(" UNKNOWN ")), InjuryStatus::Unknown);
        assert_eq!(normalize_injury(Some("unknown, probably not")), InjuryStatus::No);
    }

    #[test]
    fn rejects_non_object_json() {
        let err = parse_autofill("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, VisionError::NotAnObject { ref found } if found == "array"));
    }

    #[test]
    fn rejects_prose() {
        assert!(matches!(
            parse_autofill("I think this is a dog."),
            Err(VisionError::Json(_))
        ));
    }
}
