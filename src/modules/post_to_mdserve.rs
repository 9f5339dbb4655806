//! Publishes a markdown document to an mdserve endpoint.
//!
//! The only module whose success result is a bare string: the hosted
//! document URL, with no JSON wrapper and no trailing newline.

use crate::config::GuestConfig;
use crate::error::GuestError;
use crate::output::Emission;
use crate::pipeline::{GuestModule, Plan};
use crate::request::Request;
use crate::response::CompletedResponse;
use crate::types::HttpMethod;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

const SERVICE: &str = "API";

/// Process input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MdserveInput {
    /// The markdown document
    #[serde(default, rename = "prompt")]
    pub document: String,
    /// Upload endpoint
    #[serde(default)]
    pub endpoint: String,
}

/// Body returned by the endpoint on success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MdserveResponse {
    /// API locator of the stored document
    #[serde(default)]
    pub api_url: String,
    /// Stored filename
    #[serde(default)]
    pub filename: String,
    /// Server message
    #[serde(default)]
    pub message: String,
    /// Browser URL of the stored document
    #[serde(default)]
    pub url: String,
}

impl MdserveResponse {
    /// The document locator to emit: `url`, else `api_url`.
    ///
    /// # Errors
    ///
    /// Returns an invalid response error if both are empty.
    pub fn into_location(self) -> Result<String, GuestError> {
        if !self.url.is_empty() {
            return Ok(self.url);
        }
        if !self.api_url.is_empty() {
            tracing::debug!(api_url = %self.api_url, "Response has no url; using api_url");
            return Ok(self.api_url);
        }
        Err(GuestError::invalid_response("API response did not include a url"))
    }
}

#[derive(Serialize)]
struct UploadPayload<'a> {
    filename: &'a str,
    content: &'a str,
}

/// Content-addressed filename: lower-case hex of the first 16 bytes of the
/// document's SHA-256.
#[must_use]
pub fn document_filename(document: &str) -> String {
    let digest = Sha256::digest(document.as_bytes());
    hex::encode(&digest[..16])
}

/// The `post_to_mdserve` guest module.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostToMdserve;

impl GuestModule for PostToMdserve {
    const NAME: &'static str = "post_to_mdserve";
    type Input = MdserveInput;

    fn plan(&self, input: Self::Input, config: &GuestConfig) -> Result<Plan, GuestError> {
        if input.document.is_empty() {
            return Err(GuestError::validation("prompt", "document is required"));
        }
        if input.endpoint.is_empty() {
            return Err(GuestError::validation("endpoint", "endpoint is required"));
        }

        let filename = document_filename(&input.document);
        tracing::debug!(%filename, bytes = input.document.len(), "Uploading document");

        Request::builder(HttpMethod::Post, input.endpoint)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .header("User-Agent", config.user_agent.as_str())
            .json_body(&UploadPayload {
                filename: &filename,
                content: &input.document,
            })?
            .build()
            .map(Plan::Call)
    }

    fn complete(&self, response: CompletedResponse) -> Result<Emission, GuestError> {
        if !response.is_success() {
            return Err(GuestError::upstream(SERVICE, response.status(), None, None));
        }

        let body = response
            .body()
            .ok_or_else(|| GuestError::empty_response(SERVICE))?;

        match serde_json::from_slice::<MdserveResponse>(body) {
            Ok(parsed) => parsed.into_location().map(Emission::Bare),
            Err(err) => Err(match response.fields().message.as_deref() {
                Some(message) => GuestError::invalid_response(format!("API error: {message}")),
                None => GuestError::invalid_response(format!("failed to parse API response: {err}")),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::RawResponse;
    use serde_json::json;

    fn completed(status: u16, body: Option<&[u8]>) -> CompletedResponse {
        CompletedResponse::from_raw(RawResponse { status, body })
    }

    #[test]
    fn filename_is_truncated_sha256_hex() {
        let name = document_filename("hello");
        // sha256("hello") = 2cf24dba5fb0a30e26e83b2ac5b9e29e...
        assert_eq!(name, "2cf24dba5fb0a30e26e83b2ac5b9e29e");
        assert_eq!(name.len(), 32);
        assert_eq!(document_filename("hello"), name);
        assert_ne!(document_filename("hello!"), name);
    }

    #[test]
    fn builds_upload_request() {
        let input = MdserveInput {
            document: "# Title".into(),
            endpoint: "http://mdserve.local/api/upload".into(),
        };
        let Plan::Call(request) = PostToMdserve.plan(input, &GuestConfig::default()).unwrap() else {
            panic!("expected a request");
        };

        assert_eq!(request.url(), "http://mdserve.local/api/upload");
        assert_eq!(request.headers().get("Accept"), Some("application/json"));
        let body: serde_json::Value = serde_json::from_slice(request.body().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({"filename": document_filename("# Title"), "content": "# Title"})
        );
    }

    #[test]
    fn requires_document_then_endpoint() {
        let config = GuestConfig::default();
        let err = PostToMdserve.plan(MdserveInput::default(), &config).unwrap_err();
        assert_eq!(err.to_string(), "document is required");

        let err = PostToMdserve
            .plan(
                MdserveInput {
                    document: "x".into(),
                    endpoint: String::new(),
                },
                &config,
            )
            .unwrap_err();
        assert_eq!(err.to_string(), "endpoint is required");
    }

    #[test]
    fn rejects_relative_endpoint() {
        let err = PostToMdserve
            .plan(
                MdserveInput {
                    document: "x".into(),
                    endpoint: "/upload".into(),
                },
                &GuestConfig::default(),
            )
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn success_emits_bare_url() {
        let body = br#"{"api_url":"http://m/api/d","filename":"f","message":"ok","url":"http://m/d?x=1&y=2"}"#;
        let emission = PostToMdserve.complete(completed(200, Some(body))).unwrap();
        assert_eq!(emission, Emission::Bare("http://m/d?x=1&y=2".into()));
    }

    #[test]
    fn missing_url_falls_back_to_api_url() {
        let body = br#"{"api_url":"http://m/api/d","message":"ok"}"#;
        let emission = PostToMdserve.complete(completed(200, Some(body))).unwrap();
        assert_eq!(emission, Emission::Bare("http://m/api/d".into()));
    }

    #[test]
    fn success_without_any_locator_is_an_error() {
        let bodies: [&[u8]; 3] = [br#"{"message":"stored"}"#, b"{}", br#"{"url":"","api_url":""}"#];
        for body in bodies {
            let err = PostToMdserve.complete(completed(200, Some(body))).unwrap_err();
            assert_eq!(err.to_string(), "API response did not include a url");
        }
    }

    #[test]
    fn non_success_status_is_reported() {
        let err = PostToMdserve
            .complete(completed(413, Some(br#"{"message":"too big"}"#)))
            .unwrap_err();
        assert_eq!(err.to_string(), "API request failed with status: 413");
    }

    #[test]
    fn empty_body_is_an_error() {
        let err = PostToMdserve.complete(completed(200, None)).unwrap_err();
        assert_eq!(err.to_string(), "empty response from API");
    }

    #[test]
    fn unparseable_body_uses_message_when_present() {
        let err = PostToMdserve
            .complete(completed(200, Some(br#"{"message":"quota exceeded","url":7}"#)))
            .unwrap_err();
        assert_eq!(err.to_string(), "API error: quota exceeded");

        let err = PostToMdserve
            .complete(completed(200, Some(b"<html>")))
            .unwrap_err();
        assert!(err.to_string().starts_with("failed to parse API response: "));
    }
}
