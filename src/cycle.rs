//! Call-cycle state enumeration.
//!
//! One process run walks a single linear path through these states and
//! ends in [`CycleState::Emitted`]. There is no edge back to `Invoked`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The stage a call cycle has reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CycleState {
    /// Nothing has been read yet
    #[default]
    Idle,
    /// Input JSON decoded
    InputDecoded,
    /// Required fields checked
    Validated,
    /// Request serialized and ready to lend
    RequestBuilt,
    /// Host call issued
    Invoked,
    /// Host returned success and the response was retrieved
    Succeeded,
    /// Response classified and turned into a result
    ResponseExtracted,
    /// A stage failed; the error is the result
    Failed,
    /// The single result has been written
    Emitted,
}

impl CycleState {
    /// Returns true if `next` directly follows this state.
    ///
    /// Any stage before emission may fail. A validated cycle may emit
    /// without a host call when the module decides there is nothing to send.
    #[must_use]
    pub fn can_transition_to(&self, next: Self) -> bool {
        use CycleState::*;
        match (self, next) {
            (Idle, InputDecoded)
            | (InputDecoded, Validated)
            | (Validated, RequestBuilt)
            | (Validated, Emitted)
            | (RequestBuilt, Invoked)
            | (Invoked, Succeeded)
            | (Succeeded, ResponseExtracted)
            | (ResponseExtracted, Emitted)
            | (Failed, Emitted) => true,
            (state, Failed) => !matches!(state, Failed | ResponseExtracted | Emitted),
            _ => false,
        }
    }

    /// Returns true once the result has been written.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Emitted)
    }
}

impl fmt::Display for CycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::InputDecoded => write!(f, "input_decoded"),
            Self::Validated => write!(f, "validated"),
            Self::RequestBuilt => write!(f, "request_built"),
            Self::Invoked => write!(f, "invoked"),
            Self::Succeeded => write!(f, "succeeded"),
            Self::ResponseExtracted => write!(f, "response_extracted"),
            Self::Failed => write!(f, "failed"),
            Self::Emitted => write!(f, "emitted"),
        }
    }
}

/// Tracks the current state of one cycle and logs each transition.
#[derive(Debug, Default)]
pub(crate) struct Cycle {
    state: CycleState,
    module: &'static str,
}

impl Cycle {
    pub(crate) fn new(module: &'static str) -> Self {
        Self {
            state: CycleState::Idle,
            module,
        }
    }

    pub(crate) fn state(&self) -> CycleState {
        self.state
    }

    pub(crate) fn advance(&mut self, next: CycleState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal cycle transition {} -> {}",
            self.state,
            next
        );
        tracing::debug!(module = self.module, from = %self.state, to = %next, "Cycle transition");
        self.state = next;
    }
}
