use serde::Serialize;
use serde_json::Value;

use super::errors::{self, FieldError, ValidationErrors};
use crate::models::{Author, AuthorName};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AuthorDump {
    pub id: i64,
    pub first: String,
    pub last: String,
    pub formatted_name: String,
}

pub struct AuthorSchema;

impl AuthorSchema {
    pub fn dump(author: &Author) -> AuthorDump {
        AuthorDump {
            id: author.id,
            first: author.first.clone(),
            last: author.last.clone(),
            formatted_name: author.formatted_name(),
        }
    }

    pub fn dump_many(authors: &[Author]) -> Vec<AuthorDump> {
        authors.iter().map(Self::dump).collect()
    }

    /// Loads a nested author object. `id` and `formatted_name` are output-only
    /// and ignored, as is any other unknown key.
    pub fn load(value: &Value) -> Result<AuthorName, FieldError> {
        let Some(object) = value.as_object() else {
            return Err(FieldError::Messages(vec![errors::INVALID_TYPE.to_string()]));
        };

        let mut errors = ValidationErrors::new();
        let first = required_name(object.get("first"), "first", &mut errors);
        let last = required_name(object.get("last"), "last", &mut errors);

        match (first, last) {
            (Some(first), Some(last)) if errors.is_empty() => Ok(AuthorName { first, last }),
            _ => Err(FieldError::Nested(errors)),
        }
    }
}

fn required_name(
    value: Option<&Value>,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match value {
        None => errors.add(field, errors::MISSING),
        Some(Value::Null) => errors.add(field, errors::NULL),
        Some(Value::String(s)) if s.trim().is_empty() => errors.add(field, errors::BLANK),
        Some(Value::String(s)) => return Some(s.clone()),
        Some(_) => errors.add(field, errors::NOT_A_STRING),
    }

    None
}
