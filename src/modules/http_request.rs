//! Generic outbound request.

use crate::config::GuestConfig;
use crate::error::GuestError;
use crate::output::{Emission, Output};
use crate::pipeline::{GuestModule, Plan};
use crate::request::{HeaderSet, Request};
use crate::response::CompletedResponse;
use crate::types::HttpMethod;
use serde::Deserialize;
use serde_json::{json, Value};

const SERVICE: &str = "HTTP";

/// Process input.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HttpRequestInput {
    /// Absolute target URL
    #[serde(default)]
    pub url: String,
    /// Extra request headers
    #[serde(default)]
    pub headers: Option<HeaderSet>,
    /// Method verb, `GET` when absent
    #[serde(default)]
    pub method: Option<String>,
    /// JSON-encoded as the request body when present
    #[serde(default)]
    pub data: Option<Value>,
}

/// The `http_request` guest module.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpRequest;

impl GuestModule for HttpRequest {
    const NAME: &'static str = "http_request";
    type Input = HttpRequestInput;

    fn plan(&self, input: Self::Input, config: &GuestConfig) -> Result<Plan, GuestError> {
        let method = match input.method.as_deref() {
            None | Some("") => HttpMethod::default(),
            Some(raw) => raw
                .parse::<HttpMethod>()
                .map_err(|e| GuestError::validation("method", e.to_string()))?,
        };

        let mut builder = Request::builder(method, input.url);
        if let Some(headers) = &input.headers {
            builder = builder.headers(headers);
        }
        if !input.headers.as_ref().is_some_and(|h| h.contains("User-Agent")) {
            builder = builder.header("User-Agent", config.user_agent.as_str());
        }
        if let Some(data) = &input.data {
            builder = builder.json_body(data)?;
        }

        builder.build().map(Plan::Call)
    }

    fn complete(&self, response: CompletedResponse) -> Result<Emission, GuestError> {
        let response = response.require_success(SERVICE)?;

        let data = match (response.json(), response.body_text()) {
            (Some(json), _) => Some(json.clone()),
            (None, Some(text)) => Some(json!({ "raw_response": text })),
            (None, None) => None,
        };

        let mut output = Output::succeeded().with_status_code(response.status());
        if let Some(data) = data {
            output = output.with_data(data);
        }
        Ok(output.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::RawResponse;

    fn plan(input: Value) -> Result<Plan, GuestError> {
        let input: HttpRequestInput = serde_json::from_value(input).unwrap();
        HttpRequest.plan(input, &GuestConfig::default())
    }

    fn request(input: Value) -> Request {
        match plan(input).unwrap() {
            Plan::Call(request) => request,
            Plan::Skip(_) => panic!("expected a request"),
        }
    }

    fn complete(status: u16, body: Option<&[u8]>) -> Result<Emission, GuestError> {
        HttpRequest.complete(CompletedResponse::from_raw(RawResponse { status, body }))
    }

    #[test]
    fn defaults_to_get_without_body() {
        let request = request(json!({"url": "https://example.com/status"}));
        assert_eq!(request.method(), HttpMethod::Get);
        assert!(request.body().is_none());
        assert_eq!(request.headers().get("User-Agent"), Some("Mule-AI-WASM-Module"));
    }

    #[test]
    fn method_is_case_insensitive() {
        let request = request(json!({"url": "https://example.com", "method": "patch"}));
        assert_eq!(request.method(), HttpMethod::Patch);
    }

    #[test]
    fn unknown_method_is_rejected() {
        let err = plan(json!({"url": "https://example.com", "method": "TELEPORT"})).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("TELEPORT"));
    }

    #[test]
    fn missing_url_is_rejected() {
        let err = plan(json!({})).unwrap_err();
        assert_eq!(err.to_string(), "URL is required");
    }

    #[test]
    fn data_and_headers_are_sent() {
        let request = request(json!({
            "url": "https://example.com/items",
            "method": "POST",
            "headers": {"X-Trace": "abc", "User-Agent": "mine"},
            "data": {"name": "widget"}
        }));
        assert_eq!(request.headers().get("X-Trace"), Some("abc"));
        assert_eq!(request.headers().get("User-Agent"), Some("mine"));
        assert_eq!(request.body().unwrap(), br#"{"name":"widget"}"#);
    }

    #[test]
    fn json_body_becomes_data() {
        let Emission::Json(output) = complete(200, Some(br#"{"ok":true}"#)).unwrap() else {
            panic!("expected JSON");
        };
        assert_eq!(output.status_code, Some(200));
        assert_eq!(output.data, Some(json!({"ok": true})));
    }

    #[test]
    fn text_body_becomes_raw_response() {
        let Emission::Json(output) = complete(200, Some(b"plain text")).unwrap() else {
            panic!("expected JSON");
        };
        assert_eq!(output.data, Some(json!({"raw_response": "plain text"})));
    }

    #[test]
    fn empty_body_has_no_data() {
        let Emission::Json(output) = complete(204, None).unwrap() else {
            panic!("expected JSON");
        };
        assert!(output.data.is_none());
        assert_eq!(output.status_code, Some(204));
    }

    #[test]
    fn non_success_status_fails() {
        let err = complete(404, Some(br#"{"message":"Not Found"}"#)).unwrap_err();
        assert_eq!(err.to_string(), "HTTP error: Not Found (status: 404)");
    }
}
