//! Output shapes.

use crate::error::GuestError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The JSON result object written to standard output.
///
/// Either the success branch (`message`, `url`, `status_code`, `data`) or
/// the error branch (`error`) is populated, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Output {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Resource locator extracted from the response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Diagnostic for the failure branch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Upstream HTTP status, echoed by the generic request module
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Upstream payload, echoed by the generic request module
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Output {
    /// Creates a success result with a message.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::succeeded()
        }
    }

    /// Creates a success result with no message.
    #[must_use]
    pub fn succeeded() -> Self {
        Self {
            success: true,
            message: None,
            url: None,
            error: None,
            status_code: None,
            data: None,
        }
    }

    /// Creates a failure result from a terminal error.
    #[must_use]
    pub fn failure(err: &GuestError) -> Self {
        Self {
            success: false,
            error: Some(err.to_string()),
            ..Self::succeeded()
        }
    }

    /// Sets the extracted URL.
    #[must_use]
    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url;
        self
    }

    /// Sets the upstream status.
    #[must_use]
    pub fn with_status_code(mut self, status: u16) -> Self {
        self.status_code = Some(status);
        self
    }

    /// Sets the upstream payload.
    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

impl From<&GuestError> for Output {
    fn from(err: &GuestError) -> Self {
        Self::failure(err)
    }
}

/// What a module hands to the encoder.
#[derive(Debug, Clone, PartialEq)]
pub enum Emission {
    /// A JSON result object followed by a newline
    Json(Output),
    /// A bare string written as-is with no trailing newline
    Bare(String),
}

impl Emission {
    /// Returns true if this emission reports success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        match self {
            Self::Json(output) => output.success,
            Self::Bare(_) => true,
        }
    }
}

impl From<Output> for Emission {
    fn from(output: Output) -> Self {
        Self::Json(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_omits_absent_fields() {
        let output = Output::success("done");
        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            json!({"success": true, "message": "done"})
        );
    }

    #[test]
    fn failure_has_only_error() {
        let output = Output::failure(&GuestError::validation("token", "token is required"));
        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            json!({"success": false, "error": "token is required"})
        );
    }

    #[test]
    fn metadata_fields_serialize() {
        let output = Output::succeeded()
            .with_status_code(200)
            .with_data(json!({"k": "v"}));
        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            json!({"success": true, "status_code": 200, "data": {"k": "v"}})
        );
    }

    #[test]
    fn bare_emission_is_success() {
        assert!(Emission::Bare("https://x".into()).is_success());
        assert!(!Emission::from(Output::failure(&GuestError::decode("input"))).is_success());
    }
}
