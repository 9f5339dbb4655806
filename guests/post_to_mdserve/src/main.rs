//! Publishes a markdown document to mdserve.
//!
//! Build for the host runtime with `cargo build --release --target wasm32-wasip1`.

use guest_http::modules::PostToMdserve;
use std::process::ExitCode;

fn main() -> ExitCode {
    guest_http::run_stdio(PostToMdserve)
}
