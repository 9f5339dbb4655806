//! Structured fields pulled from JSON response bodies.

use serde_json::Value;
use std::fmt;

/// The body was not JSON, or not a JSON object.
///
/// Never fatal: the caller continues with no structured fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseParseError {
    /// Why parsing failed
    pub reason: String,
}

impl fmt::Display for ResponseParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "response body is not a JSON object: {}", self.reason)
    }
}

impl std::error::Error for ResponseParseError {}

/// Well-known fields of interest, each present only if the body had it
/// with the expected type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseFields {
    /// `html_url`: the browser URL of a created resource
    pub html_url: Option<String>,
    /// `url`: a resource locator (document hosts return this)
    pub url: Option<String>,
    /// `message`: human-readable status or error message
    pub message: Option<String>,
    /// `errors`: structured error details, any JSON shape
    pub errors: Option<Value>,
}

impl ResponseFields {
    /// Extracts fields from a parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseParseError`] if `value` is not an object.
    pub fn from_value(value: &Value) -> Result<Self, ResponseParseError> {
        let object = value.as_object().ok_or_else(|| ResponseParseError {
            reason: format!("expected an object, found {}", kind_of(value)),
        })?;

        let string = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_string);

        Ok(Self {
            html_url: string("html_url"),
            url: string("url"),
            message: string("message"),
            errors: object.get("errors").cloned(),
        })
    }

    /// Parses `body` as JSON and extracts fields.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseParseError`] if `body` is not a JSON object.
    pub fn parse(body: &[u8]) -> Result<(Value, Self), ResponseParseError> {
        let value: Value = serde_json::from_slice(body).map_err(|e| ResponseParseError {
            reason: e.to_string(),
        })?;
        let fields = Self::from_value(&value)?;
        Ok((value, fields))
    }

    /// Returns true if no field was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.html_url.is_none() && self.url.is_none() && self.message.is_none() && self.errors.is_none()
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
