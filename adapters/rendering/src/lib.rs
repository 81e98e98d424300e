#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Rover Mission adapters.
//!
//! Rendering is pure presentation: callers assemble a [`Scene`] from world
//! queries and receive a human-viewable grid string back. The renderer never
//! reads world state directly.

use rover_mission_core::{Heading, Position};

/// Glyphs used when presenting a grid frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphSet {
    /// Glyph drawn along the frame border.
    pub border: &'static str,
    /// Glyph drawn on traversable ground.
    pub ground: &'static str,
    /// Glyph drawn on the cell occupied by the rover.
    pub rover: &'static str,
    /// Glyph drawn on cells holding obstacles.
    pub obstacle: &'static str,
}

impl GlyphSet {
    /// Emoji glyphs used by the mission control presentation.
    pub const EMOJI: Self = Self {
        border: "🟦",
        ground: "🟫",
        rover: "🚀",
        obstacle: "🌑",
    };

    /// Plain ASCII glyphs for terminals without emoji fonts.
    pub const ASCII: Self = Self {
        border: "#",
        ground: ".",
        rover: "R",
        obstacle: "o",
    };
}

impl Default for GlyphSet {
    fn default() -> Self {
        Self::EMOJI
    }
}

/// Everything an adapter needs to draw one grid frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    /// Number of grid columns.
    pub width: i32,
    /// Number of grid rows.
    pub height: i32,
    /// Cell currently occupied by the rover.
    pub rover: Position,
    /// Compass direction the rover currently faces.
    pub heading: Heading,
    /// Cells holding obstacles.
    pub obstacles: Vec<Position>,
}

/// Renders the scene as a bordered grid with row zero at the top.
///
/// The rover glyph wins over the obstacle glyph when both claim a cell,
/// which a consistent world never produces. Each row ends with a newline.
#[must_use]
pub fn render(scene: &Scene, glyphs: GlyphSet) -> String {
    let mut frame = String::new();

    push_border_row(&mut frame, scene.width, glyphs);
    for row in 0..scene.height {
        frame.push_str(glyphs.border);
        for column in 0..scene.width {
            let cell = Position::new(column, row);
            let glyph = if scene.rover == cell {
                glyphs.rover
            } else if scene.obstacles.contains(&cell) {
                glyphs.obstacle
            } else {
                glyphs.ground
            };
            frame.push_str(glyph);
        }
        frame.push_str(glyphs.border);
        frame.push('\n');
    }
    push_border_row(&mut frame, scene.width, glyphs);

    frame
}

/// Formats the one-line status header shown above the grid.
///
/// A halted batch appends the obstacle warning on its own line.
#[must_use]
pub fn summary(scene: &Scene, halted: bool) -> String {
    let mut line = format!(
        "Direction: {}, Position: {}",
        scene.heading, scene.rover
    );
    if halted {
        line.push_str("\n⚠️ Obstacle encountered!");
    }
    line
}

fn push_border_row(frame: &mut String, width: i32, glyphs: GlyphSet) {
    // The border spans the grid plus one cell on each side.
    for _ in 0..width + 2 {
        frame.push_str(glyphs.border);
    }
    frame.push('\n');
}
