#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command processor that replays validated batches against the world.
//!
//! Dispatch owns the batch-level policy: empty batches are rejected before
//! validation, validation failures reject the batch with zero mutation, and
//! the first obstacle encounter stops the replay so commands after the
//! aborting one are never applied, turns included.

use rover_mission_core::{BatchError, BatchHalt, BatchReport, Command, Event, Position};
use rover_mission_world::{apply, query, World};

/// Replays a raw command batch against the world, capturing the outcome.
///
/// Rejection happens before any state mutation: an empty batch yields
/// [`BatchError::Empty`] and an unrecognized token yields
/// [`BatchError::InvalidToken`]. Obstacle encounters are not errors; they
/// surface as the `halt` field of the returned [`BatchReport`], with the
/// partial progress before the obstacle kept.
pub fn run_batch(world: &mut World, raw: &str) -> Result<BatchReport, BatchError> {
    if raw.is_empty() {
        return Err(BatchError::Empty);
    }

    let commands = rover_mission_system_validation::parse_batch(raw)?;
    Ok(replay(world, &commands))
}

/// Replays already-validated commands in order, stopping on the first
/// obstacle encounter.
#[must_use]
pub fn replay(world: &mut World, commands: &[Command]) -> BatchReport {
    let mut events = Vec::new();
    let mut halt = None;

    for (index, command) in commands.iter().enumerate() {
        events.clear();
        apply(world, *command, &mut events);

        if let Some(obstacle) = blocked_cell(&events) {
            halt = Some(BatchHalt {
                // Reported one-based: the first command of a batch is index one.
                command_index: index + 1,
                obstacle,
            });
            break;
        }
    }

    let snapshot = query::rover_snapshot(world);
    BatchReport {
        position: snapshot.position,
        heading: snapshot.heading,
        halt,
    }
}

fn blocked_cell(events: &[Event]) -> Option<Position> {
    events.iter().find_map(|event| match event {
        Event::MoveBlocked { obstacle, .. } => Some(*obstacle),
        _ => None,
    })
}
