use serde::Serialize;
use serde_json::{Map, Value};
use time::OffsetDateTime;

use super::author::{AuthorDump, AuthorSchema};
use super::errors::{self, ValidationErrors};
use super::is_falsy;
use crate::models::{NewQuote, Quote};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuoteDump {
    pub id: i64,
    pub author: AuthorDump,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub posted_at: OffsetDateTime,
}

/// The list view of a quote: `id` and `content` only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuoteSummary {
    pub id: i64,
    pub content: String,
}

pub struct QuoteSchema;

impl QuoteSchema {
    pub fn dump(quote: &Quote) -> QuoteDump {
        QuoteDump {
            id: quote.id,
            author: AuthorSchema::dump(&quote.author),
            content: quote.content.clone(),
            posted_at: quote.posted_at,
        }
    }

    pub fn summarize(quote: &Quote) -> QuoteSummary {
        QuoteSummary {
            id: quote.id,
            content: quote.content.clone(),
        }
    }

    pub fn summarize_many(quotes: &[Quote]) -> Vec<QuoteSummary> {
        quotes.iter().map(Self::summarize).collect()
    }

    /// Validates a submitted quote, collecting errors for every field.
    pub fn load(input: &Value) -> Result<NewQuote, ValidationErrors> {
        let Some(object) = input.as_object() else {
            return Err(ValidationErrors::single(
                errors::SCHEMA_KEY,
                errors::INVALID_INPUT,
            ));
        };

        let data = normalize_author(object.clone());
        let mut errors = ValidationErrors::new();

        let content = match data.get("content") {
            None => {
                errors.add("content", errors::MISSING);
                None
            }
            Some(Value::Null) => {
                errors.add("content", errors::NULL);
                None
            }
            Some(Value::String(s)) if s.trim().is_empty() => {
                errors.add("content", errors::BLANK);
                None
            }
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                errors.add("content", errors::NOT_A_STRING);
                None
            }
        };

        let author = match data.get("author") {
            Some(author) if is_falsy(author) => {
                errors.add("author", errors::BLANK);
                None
            }
            Some(author) => match AuthorSchema::load(author) {
                Ok(name) => Some(name),
                Err(errors::FieldError::Messages(messages)) => {
                    for message in &messages {
                        errors.add("author", message);
                    }
                    None
                }
                Err(errors::FieldError::Nested(nested)) => {
                    errors.nest("author", nested);
                    None
                }
            },
            None => {
                errors.add("author", errors::BLANK);
                None
            }
        };

        match (content, author) {
            (Some(content), Some(author)) => errors.into_result(NewQuote { content, author }),
            _ => Err(errors),
        }
    }
}

/// Rewrites `author` from a full-name string into a `{first, last}` object.
///
/// The name is split on its first run of whitespace, so everything after the
/// first token becomes the last name. A single token only fills `first`.
/// Falsy values become an empty object, which then fails the blank check.
pub fn normalize_author(mut data: Map<String, Value>) -> Map<String, Value> {
    let author = match data.remove("author") {
        Some(Value::String(name)) if !name.trim().is_empty() => {
            let mut author = Map::new();
            match name.trim().split_once(char::is_whitespace) {
                Some((first, last)) => {
                    author.insert("first".to_string(), Value::from(first));
                    author.insert("last".to_string(), Value::from(last.trim_start()));
                }
                None => {
                    author.insert("first".to_string(), Value::from(name.trim()));
                }
            }
            Value::Object(author)
        }
        Some(Value::String(_)) => Value::Object(Map::new()),
        Some(value) if !is_falsy(&value) => value,
        _ => Value::Object(Map::new()),
    };

    data.insert("author".to_string(), author);
    data
}
