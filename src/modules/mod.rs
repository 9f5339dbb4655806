//! Guest modules built on the call cycle.
//!
//! Each module is a thin [`GuestModule`](crate::pipeline::GuestModule):
//! it validates its input, names one request, and shapes the result.

mod github_comment;
mod http_request;
mod post_to_mdserve;

pub use github_comment::{CommentPrompt, GithubComment, GithubCommentInput};
pub use http_request::{HttpRequest, HttpRequestInput};
pub use post_to_mdserve::{document_filename, MdserveInput, MdserveResponse, PostToMdserve};
