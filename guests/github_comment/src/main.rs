//! Posts a comment on a GitHub issue.
//!
//! Build for the host runtime with `cargo build --release --target wasm32-wasip1`.

use guest_http::modules::GithubComment;
use std::process::ExitCode;

fn main() -> ExitCode {
    guest_http::run_stdio(GithubComment)
}
