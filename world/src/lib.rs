#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Rover Mission.
//!
//! The world owns the planet grid and the single rover driving across it.
//! All mutation flows through [`apply`], which executes one [`Command`] at a
//! time and announces what happened as [`Event`] values. Obstacle encounters
//! are events, never stored flags, so a new batch always starts clean.

use rover_mission_core::{Command, Event, Heading, Position, SetupError};

/// Describes how the obstacle field should be populated at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ObstacleLayout {
    /// Scatters the requested number of obstacles across free cells using
    /// the provided seed. The rover's starting cell is never chosen, and
    /// the count is capped at one less than the number of grid cells.
    Scattered {
        /// Number of obstacle cells to place.
        count: usize,
        /// Seed driving the deterministic shuffle.
        seed: u64,
    },
    /// Places exactly the listed obstacle cells.
    Explicit(Vec<Position>),
}

/// Configuration consumed once when the world is constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldSetup {
    /// Number of grid columns.
    pub width: i32,
    /// Number of grid rows.
    pub height: i32,
    /// Obstacle population strategy.
    pub obstacles: ObstacleLayout,
    /// Cell the rover occupies before the first command.
    pub start: Position,
    /// Compass direction the rover faces before the first command.
    pub heading: Heading,
}

/// Toroidal planet surface: fixed dimensions plus an immutable obstacle field.
#[derive(Clone, Debug)]
pub struct PlanetGrid {
    width: i32,
    height: i32,
    obstacles: Vec<bool>,
}

impl PlanetGrid {
    fn with_dimensions(width: i32, height: i32) -> Result<Self, SetupError> {
        if width <= 0 || height <= 0 {
            return Err(SetupError::InvalidDimensions { width, height });
        }

        let capacity_u64 = width as u64 * height as u64;
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Ok(Self {
            width,
            height,
            obstacles: vec![false; capacity],
        })
    }

    /// Number of grid columns.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Number of grid rows.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Wraps the position onto the torus so both coordinates land in bounds.
    ///
    /// `rem_euclid` is true mathematical modulo: arbitrarily negative
    /// coordinates re-enter from the opposite edge.
    #[must_use]
    pub fn wrap(&self, position: Position) -> Position {
        Position::new(
            position.x().rem_euclid(self.width),
            position.y().rem_euclid(self.height),
        )
    }

    /// Reports whether the cell holds an obstacle.
    ///
    /// Out-of-bounds cells never do; canonical positions are produced by
    /// [`PlanetGrid::wrap`] before this query matters.
    #[must_use]
    pub fn has_obstacle_at(&self, position: Position) -> bool {
        self.index(position)
            .map_or(false, |index| self.obstacles.get(index).copied().unwrap_or(false))
    }

    /// Reports whether the cell lies inside the grid bounds.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        position.x() >= 0
            && position.x() < self.width
            && position.y() >= 0
            && position.y() < self.height
    }

    fn place_obstacle(&mut self, cell: Position) {
        if let Some(index) = self.index(cell) {
            if let Some(slot) = self.obstacles.get_mut(index) {
                *slot = true;
            }
        }
    }

    fn index(&self, cell: Position) -> Option<usize> {
        if self.contains(cell) {
            let row = usize::try_from(cell.y()).ok()?;
            let column = usize::try_from(cell.x()).ok()?;
            let width = usize::try_from(self.width).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }

    fn obstacle_cells(&self) -> Vec<Position> {
        let mut cells = Vec::new();
        for row in 0..self.height {
            for column in 0..self.width {
                let cell = Position::new(column, row);
                if self.has_obstacle_at(cell) {
                    cells.push(cell);
                }
            }
        }
        cells
    }
}

/// Represents the authoritative Rover Mission world state.
#[derive(Clone, Debug)]
pub struct World {
    grid: PlanetGrid,
    rover: Rover,
}

#[derive(Clone, Copy, Debug)]
struct Rover {
    position: Position,
    heading: Heading,
}

impl World {
    /// Builds a world from the provided setup, validating every invariant
    /// the simulation relies on.
    ///
    /// Construction failures are fatal to startup: the caller gets no
    /// partially initialized world.
    pub fn from_setup(setup: WorldSetup) -> Result<Self, SetupError> {
        let mut grid = PlanetGrid::with_dimensions(setup.width, setup.height)?;

        if !grid.contains(setup.start) {
            return Err(SetupError::InvalidStartingPosition {
                position: setup.start,
            });
        }

        match setup.obstacles {
            ObstacleLayout::Explicit(cells) => {
                for cell in cells {
                    if !grid.contains(cell) {
                        return Err(SetupError::ObstacleOutOfBounds { position: cell });
                    }
                    if cell == setup.start {
                        return Err(SetupError::ObstacleAtStart { position: cell });
                    }
                    grid.place_obstacle(cell);
                }
            }
            ObstacleLayout::Scattered { count, seed } => {
                scatter_obstacles(&mut grid, count, seed, setup.start);
            }
        }

        Ok(Self {
            grid,
            rover: Rover {
                position: setup.start,
                heading: setup.heading,
            },
        })
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Every state change is announced through `out_events`. A multi-step move
/// that runs into an obstacle abandons its remaining unit steps and reports
/// the refusal as [`Event::MoveBlocked`]; the rover keeps the last cell it
/// occupied successfully.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::TurnLeft => {
            world.rover.heading = world.rover.heading.turned_left();
            out_events.push(Event::RoverTurned {
                heading: world.rover.heading,
            });
        }
        Command::TurnRight => {
            world.rover.heading = world.rover.heading.turned_right();
            out_events.push(Event::RoverTurned {
                heading: world.rover.heading,
            });
        }
        Command::Advance { steps } => travel(world, steps, 1, out_events),
        Command::Reverse { steps } => travel(world, steps, -1, out_events),
    }
}

fn travel(world: &mut World, steps: u32, factor: i32, out_events: &mut Vec<Event>) {
    for _ in 0..steps {
        let from = world.rover.position;
        let next = world.grid.wrap(from.stepped(world.rover.heading, factor));

        if world.grid.has_obstacle_at(next) {
            out_events.push(Event::MoveBlocked {
                at: from,
                obstacle: next,
            });
            // Abandon the remaining unit steps of this command.
            return;
        }

        world.rover.position = next;
        out_events.push(Event::RoverAdvanced { from, to: next });
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{PlanetGrid, World};
    use rover_mission_core::{Heading, Position};

    /// Immutable representation of the rover's state used for queries.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct RoverSnapshot {
        /// Cell currently occupied by the rover.
        pub position: Position,
        /// Compass direction the rover currently faces.
        pub heading: Heading,
    }

    /// Captures a read-only snapshot of the rover.
    #[must_use]
    pub fn rover_snapshot(world: &World) -> RoverSnapshot {
        RoverSnapshot {
            position: world.rover.position,
            heading: world.rover.heading,
        }
    }

    /// Provides read-only access to the world's planet grid.
    #[must_use]
    pub fn planet_grid(world: &World) -> &PlanetGrid {
        &world.grid
    }

    /// Enumerates every obstacle cell in deterministic row-major order.
    #[must_use]
    pub fn obstacle_cells(world: &World) -> Vec<Position> {
        world.grid.obstacle_cells()
    }
}

fn scatter_obstacles(grid: &mut PlanetGrid, requested: usize, seed: u64, start: Position) {
    let mut cells: Vec<Position> = Vec::new();
    for row in 0..grid.height() {
        for column in 0..grid.width() {
            let cell = Position::new(column, row);
            if cell != start {
                cells.push(cell);
            }
        }
    }

    // Fisher-Yates shuffle driven by the mission seed.
    let mut rng_state = seed;
    for index in (1..cells.len()).rev() {
        rng_state = next_random(rng_state);
        let swap_index = (rng_state % (index as u64 + 1)) as usize;
        cells.swap(index, swap_index);
    }

    for cell in cells.into_iter().take(requested) {
        grid.place_obstacle(cell);
    }
}

fn next_random(state: u64) -> u64 {
    state.wrapping_mul(636_413_622_384_679_3005).wrapping_add(1)
}
