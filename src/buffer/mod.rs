//! Guest-owned memory shared with the host.
//!
//! Two shapes of buffer cross the boundary:
//! - [`LentBuffer`]: a read-only view of an existing allocation handed to the
//!   host for the span of one call. The borrow keeps the bytes alive, unmoved
//!   and unmodified until the lend is dropped.
//! - [`ResponseBuffer`]: a fixed-capacity region the host writes a response
//!   body into, reporting back how many bytes it used.

mod lend;
mod response;

pub use lend::{EmptyBuffer, LentBuffer, LentBufferMut};
pub use response::{Oversized, ResponseBuffer, RESPONSE_BUFFER_CAPACITY};
