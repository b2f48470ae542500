//! Declarative request validation.
//!
//! Each endpoint owns a [`RuleSet`]: a static list of fields, the column type
//! they are stored as, and the rules they must satisfy. Checking a body runs
//! every rule on every field and collects all failures; extraction converts
//! the surviving values into [`Fields`] ready for the repository.

pub mod rules;

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::database::{FieldValue, Fields};

/// Field name -> every message produced for it
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct ValidationErrors(FieldErrors);

impl ValidationErrors {
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![message.into()]);
        Self(errors)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.0
    }

    pub fn into_inner(self) -> FieldErrors {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Rule {
    Required,
    /// An explicit null is accepted and stored as NULL
    Nullable,
    String,
    /// Maximum length for text, maximum value for numbers
    Max(usize),
    /// Minimum length for text, minimum value for numbers
    Min(f64),
    Email,
    Date,
    Numeric,
    Integer,
    Boolean,
    In(&'static [&'static str]),
    /// `<field>_confirmation` must carry the same value
    Confirmed,
}

/// Storage type a validated value is converted into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Text,
    Integer,
    Real,
    Bool,
    DateTime,
    Date,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: Kind,
    pub rules: &'static [Rule],
}

impl FieldRule {
    pub const fn new(name: &'static str, kind: Kind, rules: &'static [Rule]) -> Self {
        Self { name, kind, rules }
    }

    fn has(&self, wanted: fn(&Rule) -> bool) -> bool {
        self.rules.iter().any(wanted)
    }

    fn is_numeric(&self) -> bool {
        matches!(self.kind, Kind::Integer | Kind::Real)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RuleSet {
    pub fields: &'static [FieldRule],
}

impl RuleSet {
    pub const fn new(fields: &'static [FieldRule]) -> Self {
        Self { fields }
    }

    /// Runs every rule and returns all failures keyed by field
    pub fn check(&self, body: &Value) -> FieldErrors {
        let empty = Map::new();
        let object = body.as_object().unwrap_or(&empty);
        let mut errors = FieldErrors::new();

        for field in self.fields {
            let messages = check_field(field, object);
            if !messages.is_empty() {
                errors.insert(field.name.to_string(), messages);
            }
        }

        errors
    }

    /// Validates the body and converts every present field to its storage value
    pub fn extract(&self, body: &Value) -> Result<Fields, ValidationErrors> {
        self.extract_with(body, FieldErrors::new())
    }

    /// Like [`RuleSet::extract`], merging failures found outside the rule set
    /// (uniqueness checks and the like) into the same report
    pub fn extract_with(&self, body: &Value, extra: FieldErrors) -> Result<Fields, ValidationErrors> {
        let mut errors = self.check(body);
        for (field, messages) in extra {
            errors.entry(field).or_default().extend(messages);
        }
        if !errors.is_empty() {
            return Err(ValidationErrors(errors));
        }

        let empty = Map::new();
        let object = body.as_object().unwrap_or(&empty);
        let mut fields = Fields::new();

        for field in self.fields {
            match object.get(field.name) {
                None => continue,
                // Blank strings and empty arrays count as absent, like in `check_field`
                Some(value) if is_missing(value) => {
                    if field.has(|r| matches!(r, Rule::Nullable)) {
                        fields.set(field.name, FieldValue::Null);
                    }
                }
                Some(value) => match convert(field.kind, value) {
                    Some(converted) => fields.set(field.name, converted),
                    None => {
                        errors.insert(
                            field.name.to_string(),
                            vec![format!("The {} field has an invalid value.", label(field.name))],
                        );
                    }
                },
            }
        }

        if errors.is_empty() {
            Ok(fields)
        } else {
            Err(ValidationErrors(errors))
        }
    }
}

fn check_field(field: &FieldRule, object: &Map<String, Value>) -> Vec<String> {
    let name = label(field.name);
    let value = object.get(field.name);
    let mut messages = Vec::new();

    if value.map_or(true, is_missing) {
        if field.has(|r| matches!(r, Rule::Required)) {
            messages.push(format!("The {} field is required.", name));
        }
        return messages;
    }

    let Some(value) = value else {
        return messages;
    };

    for rule in field.rules {
        match rule {
            Rule::Required | Rule::Nullable => {}
            Rule::String => {
                if !value.is_string() {
                    messages.push(format!("The {} field must be a string.", name));
                }
            }
            Rule::Max(max) => {
                if field.is_numeric() {
                    if as_f64(value).is_some_and(|n| n > *max as f64) {
                        messages.push(format!("The {} field must not be greater than {}.", name, max));
                    }
                } else if value.as_str().is_some_and(|s| s.chars().count() > *max) {
                    messages.push(format!(
                        "The {} field must not be greater than {} characters.",
                        name, max
                    ));
                }
            }
            Rule::Min(min) => {
                if field.is_numeric() {
                    if as_f64(value).is_some_and(|n| n < *min) {
                        messages.push(format!("The {} field must be at least {}.", name, min));
                    }
                } else if value.as_str().is_some_and(|s| (s.chars().count() as f64) < *min) {
                    messages.push(format!("The {} field must be at least {} characters.", name, min));
                }
            }
            Rule::Email => {
                if !value.as_str().is_some_and(is_valid_email) {
                    messages.push(format!("The {} field must be a valid email address.", name));
                }
            }
            Rule::Date => {
                if value.as_str().and_then(parse_datetime).is_none() {
                    messages.push(format!("The {} field must be a valid date.", name));
                }
            }
            Rule::Numeric => {
                if as_f64(value).is_none() {
                    messages.push(format!("The {} field must be a number.", name));
                }
            }
            Rule::Integer => {
                if as_i64(value).is_none() {
                    messages.push(format!("The {} field must be an integer.", name));
                }
            }
            Rule::Boolean => {
                if as_bool(value).is_none() {
                    messages.push(format!("The {} field must be true or false.", name));
                }
            }
            Rule::In(allowed) => {
                if !value.as_str().is_some_and(|s| allowed.contains(&s)) {
                    messages.push(format!("The selected {} is invalid.", name));
                }
            }
            Rule::Confirmed => {
                let confirmation = object.get(&format!("{}_confirmation", field.name));
                if confirmation != Some(value) {
                    messages.push(format!("The {} field confirmation does not match.", name));
                }
            }
        }
    }

    messages
}

fn is_missing(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(a) => a.is_empty(),
        _ => false,
    }
}

fn convert(kind: Kind, value: &Value) -> Option<FieldValue> {
    match kind {
        Kind::Text => match value {
            Value::String(s) => Some(FieldValue::Text(s.clone())),
            Value::Number(n) => Some(FieldValue::Text(n.to_string())),
            Value::Bool(b) => Some(FieldValue::Text(b.to_string())),
            _ => None,
        },
        Kind::Integer => as_i64(value).map(FieldValue::Integer),
        Kind::Real => as_f64(value).map(FieldValue::Real),
        Kind::Bool => as_bool(value).map(FieldValue::Bool),
        Kind::DateTime => value.as_str().and_then(parse_datetime).map(FieldValue::Timestamp),
        Kind::Date => value
            .as_str()
            .and_then(parse_datetime)
            .map(|dt| FieldValue::Date(dt.date())),
    }
}

/// "flight_number" -> "flight number"
fn label(field: &str) -> String {
    field.replace('_', " ")
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) => match s.as_str() {
            "1" | "true" => Some(true),
            "0" | "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Basic structural email check: one '@', non-empty local part, dotted domain
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };

    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Parses the date formats clients send: RFC 3339, `YYYY-MM-DD HH:MM[:SS]`,
/// `YYYY-MM-DDTHH:MM[:SS]` and a bare `YYYY-MM-DD` (midnight). Offsets are
/// normalised to UTC.
pub fn parse_datetime(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.naive_utc());
    }

    const FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];
    for format in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Some(dt);
        }
    }

    parse_date(input).map(|d| d.and_time(NaiveTime::MIN))
}

pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}
