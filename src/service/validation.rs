//! Request body validation against per-field rules.

use crate::error::AppError;
use serde_json::{Map, Value};

/// Shape a field's value must have when present and non-null.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldFormat {
    Text,
    /// Calendar date, `YYYY-MM-DD`.
    Date,
}

#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub name: &'static str,
    /// Must be present and non-null.
    pub required: bool,
    pub format: FieldFormat,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

/// Rules for a project body; create and update both replace every mutable field.
pub const PROJECT_RULES: &[FieldRule] = &[
    FieldRule {
        name: "projectName",
        required: true,
        format: FieldFormat::Text,
        min_length: Some(1),
        max_length: Some(255),
    },
    FieldRule {
        name: "projectDescription",
        required: true,
        format: FieldFormat::Text,
        min_length: None,
        max_length: Some(4096),
    },
    FieldRule {
        name: "projectImage",
        required: false,
        format: FieldFormat::Text,
        min_length: None,
        max_length: Some(2048),
    },
    FieldRule {
        name: "projectDeadline",
        required: false,
        format: FieldFormat::Date,
        min_length: None,
        max_length: None,
    },
];

pub struct RequestValidator;

impl RequestValidator {
    /// Validate body against rules. Fields without a rule are ignored.
    pub fn validate(body: &Map<String, Value>, rules: &[FieldRule]) -> Result<(), AppError> {
        for rule in rules {
            match body.get(rule.name) {
                None | Some(Value::Null) if rule.required => {
                    return Err(AppError::Validation(format!("{} is required", rule.name)));
                }
                None | Some(Value::Null) => {}
                Some(v) => validate_field(v, rule)?,
            }
        }
        Ok(())
    }
}

fn validate_field(v: &Value, rule: &FieldRule) -> Result<(), AppError> {
    let Some(s) = v.as_str() else {
        return Err(AppError::Validation(format!("{} must be a string", rule.name)));
    };
    let len = s.chars().count();
    if let Some(min) = rule.min_length {
        if len < min {
            return Err(AppError::Validation(format!(
                "{} must be at least {} characters",
                rule.name, min
            )));
        }
    }
    if let Some(max) = rule.max_length {
        if len > max {
            return Err(AppError::Validation(format!(
                "{} must be at most {} characters",
                rule.name, max
            )));
        }
    }
    if rule.format == FieldFormat::Date
        && chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").is_err()
    {
        return Err(AppError::Validation(format!(
            "{} must be a date (YYYY-MM-DD)",
            rule.name
        )));
    }
    Ok(())
}
