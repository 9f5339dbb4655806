//! The single terminal result of a call cycle.

mod encoder;
mod result;

pub use encoder::{ExitSignal, OutputEncoder};
pub use result::{Emission, Output};
