// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! State machine for issue workflow.
//!
//! Legal edges live in [`TRANSITIONS`]; adding a state is a table change.

use crate::error::{Error, Result};
use crate::issue::State;

/// Directed edges of the workflow, keyed by source state.
pub const TRANSITIONS: &[(State, &[State])] = &[
    (
        State::Todo,
        &[State::InProgress, State::Blocked, State::Canceled],
    ),
    (
        State::InProgress,
        &[State::Blocked, State::Done, State::Todo, State::Canceled],
    ),
    (
        State::Blocked,
        &[State::Todo, State::InProgress, State::Canceled],
    ),
    (State::Done, &[State::Todo]),
    (State::Canceled, &[State::Todo]),
];

/// Returns the states reachable in one step from `from`.
pub fn targets(from: State) -> &'static [State] {
    TRANSITIONS
        .iter()
        .find(|(source, _)| *source == from)
        .map(|(_, targets)| *targets)
        .unwrap_or(&[])
}

/// Check whether moving from `from` to `to` is allowed.
///
/// A self-transition is always allowed.
pub fn can_transition(from: State, to: State) -> bool {
    from == to || targets(from).contains(&to)
}

/// Validate a transition, producing an error that lists the valid targets.
pub fn validate_transition(from: State, to: State) -> Result<()> {
    if can_transition(from, to) {
        return Ok(());
    }
    let valid_targets = targets(from)
        .iter()
        .map(State::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    Err(Error::InvalidTransition {
        from: from.to_string(),
        to: to.to_string(),
        valid_targets,
    })
}

#[cfg(test)]
#[path = "transition_tests.rs"]
mod tests;
