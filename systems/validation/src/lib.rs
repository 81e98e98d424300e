#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure validation system that turns raw command batches into typed commands.

use rover_mission_core::{BatchError, Command};

/// Reports whether every token in the raw batch is a recognized command.
///
/// The empty batch validates successfully; rejecting emptiness is dispatch
/// policy rather than a validation concern. Validation never touches world
/// state.
#[must_use]
pub fn validate(raw: &str) -> bool {
    raw.chars().all(|token| Command::from_token(token).is_some())
}

/// Parses the raw batch into typed commands, rejecting it wholesale on the
/// first unrecognized token.
///
/// All-or-nothing: a single bad token invalidates the entire batch, so no
/// partial command vector ever reaches the world.
pub fn parse_batch(raw: &str) -> Result<Vec<Command>, BatchError> {
    raw.chars()
        .enumerate()
        .map(|(index, token)| {
            Command::from_token(token).ok_or(BatchError::InvalidToken { index, token })
        })
        .collect()
}
