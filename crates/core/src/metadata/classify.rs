//! Single-pass classification of provider response bodies.
//!
//! The provider answers every lookup with HTTP 200 and signals failure in
//! the body, so the body alone decides the outcome. The discriminating
//! `Response`/`Error` fields are checked before the full record decode.

use serde_json::Value;

use super::types::MovieRecord;
use super::{LookupError, LookupFailure};

/// Error message the provider uses when a title has no match.
pub const NOT_FOUND_SENTINEL: &str = "Movie not found!";

/// Outcome of classifying one response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    /// Body was empty or whitespace.
    Empty,
    /// Body decoded into a record.
    Record(MovieRecord),
    /// Body matched the not-found sentinel shape.
    NotFound,
    /// Provider answered `"Response": "False"` with some other error.
    Rejected(String),
    /// Body was not JSON, not an object, or had the wrong field types.
    Malformed(String),
}

impl Classified {
    /// Convert into the lookup result for `title`.
    ///
    /// An empty body is lenient: it yields a record holding only the title.
    pub fn into_result(self, title: &str) -> Result<MovieRecord, LookupError> {
        match self {
            Classified::Empty => Ok(MovieRecord::title_only(title)),
            Classified::Record(record) => Ok(record),
            Classified::NotFound => Err(LookupError::new(title, LookupFailure::NotFound)),
            Classified::Rejected(message) => {
                Err(LookupError::new(title, LookupFailure::Rejected(message)))
            }
            Classified::Malformed(reason) => {
                Err(LookupError::new(title, LookupFailure::Malformed(reason)))
            }
        }
    }
}

/// Classify a raw response body.
pub fn classify(body: &[u8]) -> Classified {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Classified::Empty;
    }

    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => return Classified::Malformed(format!("invalid JSON: {}", e)),
    };

    let Some(object) = value.as_object() else {
        return Classified::Malformed("expected a JSON object".to_string());
    };

    let error = object.get("Error").and_then(Value::as_str);
    if error == Some(NOT_FOUND_SENTINEL) {
        return Classified::NotFound;
    }

    let rejected = object
        .get("Response")
        .and_then(Value::as_str)
        .is_some_and(|r| r.eq_ignore_ascii_case("false"));
    if rejected {
        return Classified::Rejected(
            error
                .unwrap_or("provider returned Response=False")
                .to_string(),
        );
    }

    match serde_json::from_value::<MovieRecord>(value) {
        Ok(record) => Classified::Record(record),
        Err(e) => Classified::Malformed(format!("unexpected record shape: {}", e)),
    }
}
