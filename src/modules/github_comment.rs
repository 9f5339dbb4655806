//! Posts a comment on a GitHub issue.

use crate::config::GuestConfig;
use crate::error::GuestError;
use crate::output::{Emission, Output};
use crate::pipeline::{GuestModule, Plan};
use crate::request::{IssueUrl, Request};
use crate::response::CompletedResponse;
use crate::types::HttpMethod;
use serde::{Deserialize, Serialize};

const SERVICE: &str = "GitHub API";
const ACCEPT: &str = "application/vnd.github.v3+json";

/// Process input: the prompt carries the comment request as JSON text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GithubCommentInput {
    /// JSON text holding a [`CommentPrompt`]
    #[serde(default)]
    pub prompt: String,
    /// GitHub token
    #[serde(default)]
    pub token: String,
}

/// The decoded prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CommentPrompt {
    /// Issue API URL
    #[serde(default)]
    pub issue: String,
    /// Comment body; missing or empty means nothing to post
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Serialize)]
struct CommentPayload<'a> {
    body: &'a str,
}

/// The `github_comment` guest module.
#[derive(Debug, Clone, Copy, Default)]
pub struct GithubComment;

impl GuestModule for GithubComment {
    const NAME: &'static str = "github_comment";
    type Input = GithubCommentInput;

    fn plan(&self, input: Self::Input, config: &GuestConfig) -> Result<Plan, GuestError> {
        let prompt: CommentPrompt = serde_json::from_str(&input.prompt)
            .map_err(|e| GuestError::decode(format!("prompt content: {e}")))?;

        let issue = IssueUrl::parse(&prompt.issue)?;

        let comment = match prompt.comment.as_deref() {
            None | Some("") => {
                return Ok(Plan::Skip(Output::success("Empty comment - no action taken")));
            }
            Some(comment) => comment,
        };

        if input.token.is_empty() {
            return Err(GuestError::validation("token", "GitHub token is required"));
        }

        tracing::debug!(
            owner = issue.owner(),
            repo = issue.repo(),
            number = issue.number(),
            "Posting issue comment"
        );

        Request::builder(HttpMethod::Post, issue.comments_url())
            .header("Authorization", format!("Bearer {}", input.token))
            .header("Accept", ACCEPT)
            .header("Content-Type", "application/json")
            .header("User-Agent", config.user_agent.as_str())
            .json_body(&CommentPayload { body: comment })?
            .build()
            .map(Plan::Call)
    }

    fn complete(&self, response: CompletedResponse) -> Result<Emission, GuestError> {
        let response = response.require_success(SERVICE)?;
        let output = Output::success("Comment posted successfully")
            .with_url(response.fields().html_url.clone());
        Ok(output.into())
    }
}
