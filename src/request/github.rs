//! GitHub issue API URL validation.
//!
//! Checked before any buffer is built so a malformed target never costs a
//! host call.

use crate::error::GuestError;
use std::fmt;

/// Prefix every issue API URL must start with.
pub const GITHUB_API_REPOS: &str = "https://api.github.com/repos/";

const EXPECTED_FORMAT: &str =
    "invalid GitHub API URL format. Expected format: https://api.github.com/repos/{owner}/{repo}/issues/{number}";

/// A validated `https://api.github.com/repos/{owner}/{repo}/issues/{number}` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueUrl {
    raw: String,
    owner: String,
    repo: String,
    number: u64,
}

impl IssueUrl {
    /// Parses and validates an issue API URL.
    ///
    /// The path after the prefix must be exactly four non-empty segments:
    /// owner, repo, the literal `issues`, and a number made of ASCII digits.
    ///
    /// # Errors
    ///
    /// Returns a validation error on an empty string, wrong prefix, wrong
    /// segment count, or non-numeric issue number.
    pub fn parse(url: &str) -> Result<Self, GuestError> {
        if url.is_empty() {
            return Err(GuestError::validation("issue", "issue URL is required"));
        }

        let invalid = || GuestError::validation("issue", EXPECTED_FORMAT);

        let path = url.strip_prefix(GITHUB_API_REPOS).ok_or_else(invalid)?;
        let parts: Vec<&str> = path.split('/').collect();

        let [owner, repo, "issues", number] = parts.as_slice() else {
            return Err(invalid());
        };
        if owner.is_empty() || repo.is_empty() {
            return Err(invalid());
        }
        if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let number = number.parse::<u64>().map_err(|_| invalid())?;

        Ok(Self {
            raw: url.to_string(),
            owner: (*owner).to_string(),
            repo: (*repo).to_string(),
            number,
        })
    }

    /// The URL exactly as provided.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Repository owner.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Issue number.
    #[must_use]
    pub fn number(&self) -> u64 {
        self.number
    }

    /// The endpoint that creates comments on this issue.
    #[must_use]
    pub fn comments_url(&self) -> String {
        format!("{}/comments", self.raw)
    }
}

impl fmt::Display for IssueUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
