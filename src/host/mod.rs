//! The host import surface and the invoker that drives it.
//!
//! ## Overview
//!
//! A guest module reaches the network through exactly three synchronous
//! boundary calls. [`HostImports`] is the seam over those calls;
//! [`HostCallInvoker`] composes them into one atomic exchange per cycle.
//!
//! ## Implementations
//!
//! - **WasmHost**: the real `env` module imports (only on `wasm32`)
//! - **StubHost**: native placeholder that performs no I/O
//! - **MockHost**: scripted, recording host for tests

mod error;
mod invoker;
pub mod mock;
mod stub;
mod traits;

#[cfg(target_arch = "wasm32")]
mod wasm;

pub use error::HostCallError;
pub use invoker::HostCallInvoker;
pub use stub::StubHost;
pub use traits::HostImports;

#[cfg(target_arch = "wasm32")]
pub use wasm::WasmHost;

/// The host implementation for the current target.
#[cfg(target_arch = "wasm32")]
pub type PlatformHost = WasmHost;

/// The host implementation for the current target.
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformHost = StubHost;

/// Returns the host implementation for the current target.
#[must_use]
pub fn platform_host() -> PlatformHost {
    PlatformHost::default()
}
