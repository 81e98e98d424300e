use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;

use rover_mission_core::{Heading, Position};
use rover_mission_world::{ObstacleLayout, WorldSetup};

/// Seed used for obstacle scattering when the mission file does not pin one.
/// A fixed default keeps deployments reproducible; override it per mission.
const DEFAULT_SCATTER_SEED: u64 = 0x7a3d_91c5_04b8_662f;

const DEFAULT_GRID_WIDTH: i32 = 10;
const DEFAULT_GRID_HEIGHT: i32 = 10;
const DEFAULT_OBSTACLE_COUNT: usize = 5;
const DEFAULT_PORT: u16 = 3000;

/// Command-line surface for the Rover Mission service.
#[derive(Debug, Parser)]
#[command(name = "rover-mission", about = "Toroidal rover simulation service")]
pub(crate) struct Cli {
    /// Path to the JSON mission configuration file.
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,

    /// Overrides the port the HTTP listener binds to.
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

/// Mission configuration consumed once at startup.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct MissionConfig {
    pub(crate) grid: GridConfig,
    pub(crate) rover: RoverConfig,
    pub(crate) server: ServerConfig,
}

impl MissionConfig {
    /// Loads the configuration file, falling back to built-in defaults when
    /// no path is provided. A present-but-malformed file is a startup error.
    pub(crate) fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read mission config {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse mission config {}", path.display()))
    }

    /// Translates the configuration into the world's construction input.
    pub(crate) fn world_setup(&self) -> WorldSetup {
        let obstacles = match &self.grid.obstacles {
            ObstacleConfig::Count(count) => ObstacleLayout::Scattered {
                count: *count,
                seed: self.grid.seed.unwrap_or(DEFAULT_SCATTER_SEED),
            },
            ObstacleConfig::Cells(cells) => {
                ObstacleLayout::Explicit(cells.iter().map(CellConfig::position).collect())
            }
        };

        WorldSetup {
            width: self.grid.width,
            height: self.grid.height,
            obstacles,
            start: self.rover.start.position(),
            heading: self.rover.heading,
        }
    }
}

/// Planet grid settings.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GridConfig {
    pub(crate) width: i32,
    pub(crate) height: i32,
    pub(crate) obstacles: ObstacleConfig,
    pub(crate) seed: Option<u64>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            obstacles: ObstacleConfig::Count(DEFAULT_OBSTACLE_COUNT),
            seed: None,
        }
    }
}

/// Obstacle settings: either a scatter count or explicit cells.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub(crate) enum ObstacleConfig {
    /// Number of randomly scattered obstacles.
    Count(usize),
    /// Explicit obstacle cells.
    Cells(Vec<CellConfig>),
}

/// Grid cell expressed as plain x/y fields in the mission file.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct CellConfig {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl CellConfig {
    pub(crate) fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// Rover start settings.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct RoverConfig {
    pub(crate) start: CellConfig,
    pub(crate) heading: Heading,
}

impl Default for RoverConfig {
    fn default() -> Self {
        Self {
            start: CellConfig { x: 0, y: 0 },
            heading: Heading::North,
        }
    }
}

/// HTTP listener settings.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ServerConfig {
    pub(crate) port: u16,
}

impl ServerConfig {
    /// Resolves the listening port: CLI override, then the `PORT`
    /// environment variable, then the mission file, then the default.
    pub(crate) fn resolved_port(&self, override_port: Option<u16>) -> anyhow::Result<u16> {
        if let Some(port) = override_port {
            return Ok(port);
        }
        if let Ok(raw) = std::env::var("PORT") {
            return raw
                .parse()
                .with_context(|| format!("invalid PORT value {raw:?}"));
        }
        Ok(self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

#[cfg(test)]
mod tests {
    use super::{MissionConfig, ObstacleConfig};
    use rover_mission_core::{Heading, Position};
    use rover_mission_world::ObstacleLayout;

    #[test]
    fn defaults_apply_when_no_file_is_given() {
        let config = MissionConfig::load(None).expect("defaults always load");

        assert_eq!(config.grid.width, 10);
        assert_eq!(config.grid.height, 10);
        assert_eq!(config.grid.obstacles, ObstacleConfig::Count(5));
        assert_eq!(config.rover.heading, Heading::North);
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn mission_files_override_every_section() {
        let raw = r#"{
            "grid": { "width": 8, "height": 6, "obstacles": 3, "seed": 17 },
            "rover": { "start": { "x": 2, "y": 1 }, "heading": "East" },
            "server": { "port": 8080 }
        }"#;
        let config: MissionConfig = serde_json::from_str(raw).expect("config parses");

        assert_eq!(config.grid.width, 8);
        assert_eq!(config.grid.seed, Some(17));
        assert_eq!(config.server.port, 8080);

        let setup = config.world_setup();
        assert_eq!(setup.start, Position::new(2, 1));
        assert_eq!(setup.heading, Heading::East);
        assert_eq!(
            setup.obstacles,
            ObstacleLayout::Scattered { count: 3, seed: 17 }
        );
    }

    #[test]
    fn explicit_obstacle_cells_parse_into_positions() {
        let raw = r#"{
            "grid": { "width": 4, "height": 4, "obstacles": [ { "x": 1, "y": 2 }, { "x": 3, "y": 0 } ] }
        }"#;
        let config: MissionConfig = serde_json::from_str(raw).expect("config parses");

        assert_eq!(
            config.world_setup().obstacles,
            ObstacleLayout::Explicit(vec![Position::new(1, 2), Position::new(3, 0)])
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let raw = r#"{ "grid": { "width": 4, "height": 4, "obstackles": 2 } }"#;
        assert!(serde_json::from_str::<MissionConfig>(raw).is_err());
    }

    #[test]
    fn cli_port_override_wins_over_the_mission_file() {
        let config = MissionConfig::load(None).expect("defaults always load");
        let port = config
            .server
            .resolved_port(Some(9100))
            .expect("override resolves");
        assert_eq!(port, 9100);
    }
}
