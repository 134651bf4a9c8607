//! Book payload validation
//!
//! Payloads are checked against a declarative rule table before anything is
//! deserialized, so every violation is reported at once and no type coercion
//! happens. Unknown fields are ignored.

use std::borrow::Cow;

use chrono::{Datelike, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::{ValidationError, ValidationErrors};

use crate::models::book::{BookUpdate, NewBook};

/// Which request the payload belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// All fields including `isbn` are required
    Create,
    /// All fields except `isbn` are required; a body `isbn` is ignored
    Update,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Text,
    Integer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    None,
    /// Inclusive lower bound
    Min(i64),
    /// Inclusive upper bound at the current year
    NotAfterCurrentYear,
}

struct FieldRule {
    name: &'static str,
    kind: Kind,
    bound: Bound,
    in_update: bool,
}

const RULES: &[FieldRule] = &[
    FieldRule { name: "isbn", kind: Kind::Text, bound: Bound::None, in_update: false },
    FieldRule { name: "amazon_url", kind: Kind::Text, bound: Bound::None, in_update: true },
    FieldRule { name: "author", kind: Kind::Text, bound: Bound::None, in_update: true },
    FieldRule { name: "language", kind: Kind::Text, bound: Bound::None, in_update: true },
    FieldRule { name: "pages", kind: Kind::Integer, bound: Bound::Min(1), in_update: true },
    FieldRule { name: "publisher", kind: Kind::Text, bound: Bound::None, in_update: true },
    FieldRule { name: "title", kind: Kind::Text, bound: Bound::None, in_update: true },
    FieldRule { name: "year", kind: Kind::Integer, bound: Bound::NotAfterCurrentYear, in_update: true },
];

fn violation(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message));
    error
}

fn check_field(rule: &FieldRule, value: Option<&Value>, current_year: i64) -> Option<ValidationError> {
    let value = match value {
        None | Some(Value::Null) => {
            return Some(violation("required", format!("{} is required", rule.name)));
        }
        Some(v) => v,
    };

    match rule.kind {
        Kind::Text => match value.as_str() {
            None => Some(violation("type", format!("{} must be a string", rule.name))),
            Some(s) if s.trim().is_empty() => {
                Some(violation("length", format!("{} must not be empty", rule.name)))
            }
            Some(_) => None,
        },
        Kind::Integer => {
            // Only JSON integers that fit the INTEGER column are accepted
            let Some(n) = value.as_i64().filter(|n| i32::try_from(*n).is_ok()) else {
                return Some(violation("type", format!("{} must be an integer", rule.name)));
            };
            match rule.bound {
                Bound::Min(min) if n < min => Some(violation(
                    "range",
                    format!("{} must be at least {}", rule.name, min),
                )),
                Bound::NotAfterCurrentYear if n > current_year => Some(violation(
                    "range",
                    format!("{} must not be later than {}", rule.name, current_year),
                )),
                _ => None,
            }
        }
    }
}

fn check_payload(payload: &Value, mode: Mode, current_year: i64) -> Result<&Map<String, Value>, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let Some(object) = payload.as_object() else {
        errors.add("body", violation("type", "body must be a JSON object".to_string()));
        return Err(errors);
    };

    for rule in RULES.iter().filter(|r| mode == Mode::Create || r.in_update) {
        if let Some(error) = check_field(rule, object.get(rule.name), current_year) {
            errors.add(rule.name, error);
        }
    }

    if errors.errors().is_empty() {
        Ok(object)
    } else {
        Err(errors)
    }
}

fn validate_as<T: DeserializeOwned>(payload: &Value, mode: Mode, current_year: i64) -> Result<T, ValidationErrors> {
    let object = check_payload(payload, mode, current_year)?;

    // Keep only the fields the rules know about so extras never reach serde
    let known: Map<String, Value> = RULES
        .iter()
        .filter_map(|r| object.get(r.name).map(|v| (r.name.to_string(), v.clone())))
        .collect();

    serde_json::from_value(Value::Object(known)).map_err(|e| {
        let mut errors = ValidationErrors::new();
        errors.add("body", violation("type", e.to_string()));
        errors
    })
}

fn current_year() -> i64 {
    i64::from(Utc::now().year())
}

/// Validate a create payload against the rules in force at `year`
pub fn validate_new_book_at(payload: &Value, year: i64) -> Result<NewBook, ValidationErrors> {
    validate_as(payload, Mode::Create, year)
}

/// Validate an update payload against the rules in force at `year`
pub fn validate_book_update_at(payload: &Value, year: i64) -> Result<BookUpdate, ValidationErrors> {
    validate_as(payload, Mode::Update, year)
}

pub fn validate_new_book(payload: &Value) -> Result<NewBook, ValidationErrors> {
    validate_new_book_at(payload, current_year())
}

pub fn validate_book_update(payload: &Value) -> Result<BookUpdate, ValidationErrors> {
    validate_book_update_at(payload, current_year())
}
