use crate::error::{PlantDbError, Result};
use crate::plant::Plant;
use regex::Regex;
use std::sync::OnceLock;

/// Minimum description length, matching the add form's rule.
const MIN_DESCRIPTION_LEN: usize = 10;

/// One rejected field and the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Result of validating a plant record, one entry per offending field.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<FieldError>,
}

impl ValidationResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }
}

/// Validate a plant's fields. Field names in the result use the wire
/// spelling so the caller can report them against its form inputs.
pub fn validate_plant(plant: &Plant) -> ValidationResult {
    let mut result = ValidationResult::default();

    if plant.name.trim().is_empty() {
        result.push("name", "Plant name is required");
    }
    if !is_valid_url(&plant.image_url) {
        result.push("imageUrl", "Must be a valid URL");
    }
    if plant.watering_frequency.trim().is_empty() {
        result.push("wateringFrequency", "Watering frequency is required");
    }
    if plant.sunlight_requirement.trim().is_empty() {
        result.push("sunlightRequirement", "Sunlight requirement is required");
    }
    if plant.description.chars().count() < MIN_DESCRIPTION_LEN {
        result.push(
            "description",
            format!("Description must be at least {MIN_DESCRIPTION_LEN} characters"),
        );
    }

    result
}

/// Validate and reject with a single joined message, the way add/edit
/// surface it.
pub fn ensure_valid(plant: &Plant) -> Result<()> {
    let result = validate_plant(plant);
    if result.is_ok() {
        return Ok(());
    }

    Err(PlantDbError::Validation(format!(
        "Plant validation failed:\n  - {}",
        result
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("\n  - ")
    )))
}

/// Syntactic URL check: a scheme followed by a non-empty, whitespace-free
/// rest. Reachability is not our business.
pub fn is_valid_url(s: &str) -> bool {
    static URL_RE: OnceLock<Regex> = OnceLock::new();
    let re = URL_RE
        .get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://\S+$").expect("static regex"));
    re.is_match(s)
}
