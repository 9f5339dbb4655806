//! Issues one generic HTTP request.
//!
//! Build for the host runtime with `cargo build --release --target wasm32-wasip1`.

use guest_http::modules::HttpRequest;
use std::process::ExitCode;

fn main() -> ExitCode {
    guest_http::run_stdio(HttpRequest)
}
