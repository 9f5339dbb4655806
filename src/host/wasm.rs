//! Host imports for `wasm32` guests.
//!
//! The host registers these functions in the `env` module. Every address
//! and length is a 32-bit offset into guest linear memory.

use super::traits::HostImports;
use crate::buffer::LentBufferMut;
use crate::request::LentRequest;
use crate::types::OutcomeCode;

#[link(wasm_import_module = "env")]
extern "C" {
    fn http_request_with_headers(
        method_ptr: u32,
        method_size: u32,
        url_ptr: u32,
        url_size: u32,
        body_ptr: u32,
        body_size: u32,
        headers_ptr: u32,
        headers_size: u32,
    ) -> u32;
    fn get_last_response_status() -> u32;
    fn get_last_response_body(buffer_ptr: u32, buffer_size: u32) -> u32;
}

/// The host runtime's `env` imports.
#[derive(Debug, Default, Clone, Copy)]
pub struct WasmHost;

impl HostImports for WasmHost {
    fn perform_request(&mut self, request: &LentRequest<'_>) -> OutcomeCode {
        // usize is 32 bits on wasm32, so these casts are lossless.
        let (body_ptr, body_size) = request
            .body
            .as_ref()
            .map_or((0, 0), |b| (b.address() as u32, b.len() as u32));

        // SAFETY: every pointer names a live, non-empty allocation borrowed by
        // `request` for the whole call, and the host only reads within the
        // given lengths.
        let raw = unsafe {
            http_request_with_headers(
                request.method.address() as u32,
                request.method.len() as u32,
                request.url.address() as u32,
                request.url.len() as u32,
                body_ptr,
                body_size,
                request.headers.address() as u32,
                request.headers.len() as u32,
            )
        };
        OutcomeCode::new(raw)
    }

    fn last_response_status(&mut self) -> u32 {
        // SAFETY: takes no pointers.
        unsafe { get_last_response_status() }
    }

    fn last_response_body(&mut self, destination: &mut LentBufferMut<'_>) -> u32 {
        let capacity = destination.capacity() as u32;
        // SAFETY: `destination` holds the only mutable borrow of the region
        // and the host writes at most `capacity` bytes into it.
        unsafe { get_last_response_body(destination.address() as u32, capacity) }
    }
}
