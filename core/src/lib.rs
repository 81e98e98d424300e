#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Rover Mission engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired rover mutations, the world executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values describing
//! what actually happened. Systems stay pure: they parse raw command batches,
//! replay them, and fold the resulting event stream into a [`BatchReport`].

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Location of a single grid cell expressed as signed x/y coordinates.
///
/// Positions are signed so that raw pre-wrap arithmetic may leave the grid
/// on any edge; only the world hands out canonical (wrapped) values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    /// Creates a new position from its coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate, growing eastward.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical coordinate, growing southward so row zero renders on top.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the position displaced by the heading's unit vector scaled
    /// by `factor`.
    ///
    /// A factor of `1` travels along the heading, `-1` travels opposite to
    /// it. The result is raw and may lie outside any grid until wrapped.
    #[must_use]
    pub const fn stepped(self, heading: Heading, factor: i32) -> Self {
        let (dx, dy) = heading.unit_step();
        Self::new(self.x + dx * factor, self.y + dy * factor)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {})", self.x, self.y)
    }
}

/// Cardinal compass directions the rover can face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    /// Facing toward decreasing row indices.
    North,
    /// Facing toward increasing row indices.
    South,
    /// Facing toward increasing column indices.
    East,
    /// Facing toward decreasing column indices.
    West,
}

impl Heading {
    /// Heading after rotating 90 degrees clockwise.
    ///
    /// The rotation cycle is total: N→E→S→W→N with no failure path.
    #[must_use]
    pub const fn turned_right(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    /// Heading after rotating 90 degrees counter-clockwise.
    #[must_use]
    pub const fn turned_left(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
            Self::East => Self::North,
        }
    }

    /// Unit travel vector for the heading, expressed as `(dx, dy)`.
    ///
    /// North decreases `y` so that row zero renders at the top of a frame.
    #[must_use]
    pub const fn unit_step(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::South => (0, 1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::North => "North",
            Self::South => "South",
            Self::East => "East",
            Self::West => "West",
        };
        formatter.write_str(name)
    }
}

/// Commands that express all permissible rover mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Drives the rover along its current heading for the given number of
    /// unit steps.
    Advance {
        /// Number of unit moves to attempt.
        steps: u32,
    },
    /// Drives the rover opposite to its current heading without turning it
    /// around.
    Reverse {
        /// Number of unit moves to attempt.
        steps: u32,
    },
    /// Rotates the rover 90 degrees counter-clockwise.
    TurnLeft,
    /// Rotates the rover 90 degrees clockwise.
    TurnRight,
}

impl Command {
    /// Parses a single command token, case-insensitively.
    ///
    /// Recognized tokens are `f` (forward), `b` (backward), `l` (turn left)
    /// and `r` (turn right).
    #[must_use]
    pub const fn from_token(token: char) -> Option<Self> {
        match token {
            'f' | 'F' => Some(Self::Advance { steps: 1 }),
            'b' | 'B' => Some(Self::Reverse { steps: 1 }),
            'l' | 'L' => Some(Self::TurnLeft),
            'r' | 'R' => Some(Self::TurnRight),
            _ => None,
        }
    }
}

/// Events broadcast by the world after executing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the rover rotated to a new heading.
    RoverTurned {
        /// Heading the rover faces after the rotation.
        heading: Heading,
    },
    /// Confirms that the rover committed one unit move between two cells.
    RoverAdvanced {
        /// Cell the rover occupied before the move.
        from: Position,
        /// Canonical cell the rover occupies after wrapping.
        to: Position,
    },
    /// Reports that a unit move was refused because the destination holds
    /// an obstacle. The remaining unit steps of the command are abandoned.
    MoveBlocked {
        /// Cell the rover still occupies after the refusal.
        at: Position,
        /// Cell holding the obstacle that blocked the move.
        obstacle: Position,
    },
}

/// Outcome of replaying one command batch against the world.
///
/// Obstacle encounters are part of this value rather than an error: prior
/// successful moves are kept and the rover stays fully steerable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Cell the rover occupies after the batch completed or aborted.
    pub position: Position,
    /// Heading the rover faces after the batch completed or aborted.
    pub heading: Heading,
    /// Obstacle interruption, present when the batch was cut short.
    pub halt: Option<BatchHalt>,
}

/// Records which command of a batch ran into an obstacle, and where.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchHalt {
    /// One-based index of the command that was aborted, so the first
    /// command of a batch reports index one.
    pub command_index: usize,
    /// Cell holding the obstacle that ended the batch.
    pub obstacle: Position,
}

/// Reasons world construction may be rejected at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SetupError {
    /// Grid dimensions must both be strictly positive.
    #[error("invalid grid dimensions: width and height must be greater than zero, received {width}x{height}")]
    InvalidDimensions {
        /// Requested number of grid columns.
        width: i32,
        /// Requested number of grid rows.
        height: i32,
    },
    /// The rover's initial position must lie inside the grid bounds.
    #[error("invalid starting position {position}: outside the configured grid")]
    InvalidStartingPosition {
        /// Starting cell that missed the grid.
        position: Position,
    },
    /// An explicitly configured obstacle lies outside the grid bounds.
    #[error("obstacle {position} lies outside the configured grid")]
    ObstacleOutOfBounds {
        /// Obstacle cell that missed the grid.
        position: Position,
    },
    /// An explicitly configured obstacle covers the rover's starting cell.
    #[error("obstacle {position} covers the rover's starting cell")]
    ObstacleAtStart {
        /// Obstacle cell that collides with the rover.
        position: Position,
    },
}

/// Reasons a command batch may be rejected before touching the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BatchError {
    /// The batch contained no tokens at all.
    #[error("no command received in the request")]
    Empty,
    /// The batch contained a token outside the recognized command set.
    #[error("unknown command token {token:?} at index {index}, the request was cancelled")]
    InvalidToken {
        /// Zero-based index of the offending token within the raw batch.
        index: usize,
        /// The token that failed to parse.
        token: char,
    },
}
