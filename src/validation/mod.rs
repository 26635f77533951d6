//! Request-body schemas.
//!
//! A [`Schema`] is plain data: one [`FieldRule`] per accepted key. Bodies are
//! checked against it as raw JSON, before they are deserialized into DTOs, so
//! every violation can be reported at once.

pub mod products;

use std::fmt;

use serde_json::{Map, Value};

use crate::error::ApiError;

#[derive(Debug, Clone, Copy)]
pub enum Kind {
    String,
    Number,
    Integer,
    Boolean,
    /// An array of objects, each checked against the item schema.
    Array(&'static Schema),
}

#[derive(Debug, Clone, Copy)]
pub enum Constraint {
    /// Non-empty after trimming.
    NonEmpty,
    OneOf(&'static [&'static str]),
    GreaterThan(f64),
    AtLeast(f64),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: Kind,
    pub required: bool,
    pub constraints: &'static [Constraint],
}

#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub fields: &'static [FieldRule],
    /// Minimum number of known fields the body must carry.
    pub min_fields: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

impl Violation {
    fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

impl Schema {
    pub fn validate(&self, value: &Value) -> Vec<Violation> {
        let mut violations = Vec::new();
        match value.as_object() {
            Some(object) => self.check_object(object, "", &mut violations),
            None => violations.push(Violation::new("", "body must be a JSON object")),
        }
        violations
    }

    /// Validate and turn violations into a 400-class error.
    pub fn check(&self, value: &Value) -> Result<(), ApiError> {
        let violations = self.validate(value);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(
                violations.iter().map(ToString::to_string).collect(),
            ))
        }
    }

    fn check_object(&self, object: &Map<String, Value>, prefix: &str, out: &mut Vec<Violation>) {
        for key in object.keys() {
            if !self.fields.iter().any(|rule| rule.name == key) {
                out.push(Violation::new(join(prefix, key), "is not allowed"));
            }
        }

        let present = self
            .fields
            .iter()
            .filter(|rule| object.contains_key(rule.name))
            .count();
        if present < self.min_fields {
            out.push(Violation::new(
                prefix,
                format!("must contain at least {} field(s)", self.min_fields),
            ));
        }

        for rule in self.fields {
            let path = join(prefix, rule.name);
            match object.get(rule.name) {
                None if rule.required => out.push(Violation::new(path, "is required")),
                None => {}
                Some(value) => rule.check_value(value, &path, out),
            }
        }
    }
}

impl FieldRule {
    fn check_value(&self, value: &Value, path: &str, out: &mut Vec<Violation>) {
        let type_ok = match self.kind {
            Kind::String => value.is_string(),
            Kind::Number => value.is_number(),
            Kind::Integer => value.is_i64() || value.is_u64(),
            Kind::Boolean => value.is_boolean(),
            Kind::Array(_) => value.is_array(),
        };
        if !type_ok {
            out.push(Violation::new(path, format!("must be {}", self.kind.describe())));
            return;
        }

        if let (Kind::Array(items), Some(array)) = (self.kind, value.as_array()) {
            for (index, item) in array.iter().enumerate() {
                let item_path = format!("{path}[{index}]");
                match item.as_object() {
                    Some(object) => items.check_object(object, &item_path, out),
                    None => out.push(Violation::new(item_path, "must be an object")),
                }
            }
        }

        for constraint in self.constraints {
            if let Some(message) = constraint.violated_by(value) {
                out.push(Violation::new(path, message));
            }
        }
    }
}

impl Kind {
    fn describe(&self) -> &'static str {
        match self {
            Kind::String => "a string",
            Kind::Number => "a number",
            Kind::Integer => "an integer",
            Kind::Boolean => "a boolean",
            Kind::Array(_) => "an array",
        }
    }
}

impl Constraint {
    fn violated_by(&self, value: &Value) -> Option<String> {
        match *self {
            Constraint::NonEmpty => match value.as_str() {
                Some(s) if s.trim().is_empty() => Some("must not be empty".to_string()),
                _ => None,
            },
            Constraint::OneOf(allowed) => match value.as_str() {
                Some(s) if !allowed.contains(&s) => {
                    Some(format!("must be one of [{}]", allowed.join(", ")))
                }
                _ => None,
            },
            Constraint::GreaterThan(min) => match value.as_f64() {
                Some(n) if n <= min => Some(format!("must be greater than {min}")),
                _ => None,
            },
            Constraint::AtLeast(min) => match value.as_f64() {
                Some(n) if n < min => Some(format!("must be at least {min}")),
                _ => None,
            },
        }
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}
