//! HTTP method type.
//!
//! The host reads the method as a plain byte string, so only the canonical
//! upper-case spelling is ever lent across the boundary.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An HTTP verb accepted by the host runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HttpMethod {
    /// GET - the default when a module does not name a method
    #[default]
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
    /// HEAD
    Head,
    /// OPTIONS
    Options,
}

/// Error returned when a string does not name a supported HTTP method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidHttpMethod {
    /// The rejected input
    pub value: String,
}

impl fmt::Display for InvalidHttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_empty() {
            write!(f, "HTTP method cannot be empty")
        } else {
            write!(
                f,
                "unsupported HTTP method '{}'; use GET, POST, PUT, PATCH, DELETE, HEAD or OPTIONS",
                self.value
            )
        }
    }
}

impl std::error::Error for InvalidHttpMethod {}

impl HttpMethod {
    /// Returns the canonical upper-case verb.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

impl FromStr for HttpMethod {
    type Err = InvalidHttpMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            "HEAD" => Ok(Self::Head),
            "OPTIONS" => Ok(Self::Options),
            _ => Err(InvalidHttpMethod {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for HttpMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for HttpMethod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_get() {
        assert_eq!(HttpMethod::default(), HttpMethod::Get);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("post".parse::<HttpMethod>().unwrap(), HttpMethod::Post);
        assert_eq!("Patch".parse::<HttpMethod>().unwrap(), HttpMethod::Patch);
        assert_eq!(" delete ".parse::<HttpMethod>().unwrap(), HttpMethod::Delete);
    }

    #[test]
    fn parse_rejects_unknown_verb() {
        let err = "TRACE".parse::<HttpMethod>().unwrap_err();
        assert_eq!(err.value, "TRACE");
        assert!(err.to_string().contains("unsupported HTTP method"));
    }

    #[test]
    fn parse_rejects_empty() {
        let err = "".parse::<HttpMethod>().unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn display_is_upper_case() {
        assert_eq!(HttpMethod::Options.to_string(), "OPTIONS");
        assert_eq!(HttpMethod::Get.as_str(), "GET");
    }

    #[test]
    fn deserializes_from_lower_case_json() {
        let method: HttpMethod = serde_json::from_str("\"put\"").unwrap();
        assert_eq!(method, HttpMethod::Put);
        assert_eq!(serde_json::to_string(&method).unwrap(), "\"PUT\"");
    }
}
