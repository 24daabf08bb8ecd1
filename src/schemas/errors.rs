use std::collections::BTreeMap;

use serde::Serialize;

pub const MISSING: &str = "Missing data for required field.";
pub const NULL: &str = "Field may not be null.";
pub const NOT_A_STRING: &str = "Not a valid string.";
pub const INVALID_TYPE: &str = "Invalid type.";
pub const INVALID_INPUT: &str = "Invalid input type.";
pub const BLANK: &str = "Data not provided.";

/// Key used for errors that apply to the whole payload rather than one field.
pub const SCHEMA_KEY: &str = "_schema";

/// Field-keyed validation errors, serialized as `{"field": ["message"]}` or,
/// for nested schemas, `{"field": {"inner": ["message"]}}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(transparent)]
#[error("validation failed for {} field(s)", .0.len())]
pub struct ValidationErrors(BTreeMap<String, FieldError>);

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldError {
    Messages(Vec<String>),
    Nested(ValidationErrors),
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.get(field)
    }

    pub fn add(&mut self, field: &str, message: &str) {
        match self
            .0
            .entry(field.to_string())
            .or_insert_with(|| FieldError::Messages(vec![]))
        {
            FieldError::Messages(messages) => messages.push(message.to_string()),
            // a field that already carries nested errors keeps them
            FieldError::Nested(_) => {}
        }
    }

    pub fn nest(&mut self, field: &str, errors: ValidationErrors) {
        self.0.insert(field.to_string(), FieldError::Nested(errors));
    }

    pub fn single(field: &str, message: &str) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Turns an accumulated error set into `Err` if anything was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl FieldError {
    pub fn messages(&self) -> Option<&[String]> {
        match self {
            FieldError::Messages(messages) => Some(messages),
            FieldError::Nested(_) => None,
        }
    }

    pub fn nested(&self) -> Option<&ValidationErrors> {
        match self {
            FieldError::Nested(errors) => Some(errors),
            FieldError::Messages(_) => None,
        }
    }
}
