//! Lifecycle transitions
//!
//! `Initial -> Streaming -> Complete`, with `Error` reachable from any
//! non-terminal state. Terminal states are never left.

use super::types::{JsonStreamState, StreamStateMachine};
use crate::jsonpath::error::JsonPathError;

/// Transition from Initial to Streaming on the first significant byte
pub(super) fn transition_to_streaming(machine: &mut StreamStateMachine) {
    if machine.state == JsonStreamState::Initial {
        machine.state = JsonStreamState::Streaming;
    }
}

/// Transition to Complete once the root value closed and input ended
pub(super) fn transition_to_complete(machine: &mut StreamStateMachine) {
    if !is_terminal_state(&machine.state) {
        machine.state = JsonStreamState::Complete;
    }
}

/// Transition to Error, dropping any partially captured value
pub(super) fn transition_to_error(machine: &mut StreamStateMachine, error: &JsonPathError) {
    if is_terminal_state(&machine.state) {
        return;
    }
    machine.state = JsonStreamState::Error {
        kind: error.kind,
        message: error.message.clone(),
    };
    machine.capture = None;
    machine.buffer.release();
}

/// Whether the state accepts no further input
#[inline]
#[must_use]
pub fn is_terminal_state(state: &JsonStreamState) -> bool {
    matches!(
        state,
        JsonStreamState::Complete | JsonStreamState::Error { .. }
    )
}
