use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use rover_mission_core::{BatchError, BatchHalt, Heading, Position};
use rover_mission_rendering::{render, summary, GlyphSet, Scene};
use rover_mission_system_dispatch as dispatch;
use rover_mission_world::{query, World};

/// Shared application state handed to every request handler.
///
/// A single mutex serializes whole command batches so overlapping requests
/// can never interleave their unit moves.
#[derive(Clone)]
pub(crate) struct AppState {
    world: Arc<Mutex<World>>,
}

impl AppState {
    pub(crate) fn new(world: World) -> Self {
        Self {
            world: Arc::new(Mutex::new(world)),
        }
    }
}

/// Builds the mission control router with tracing and CORS middleware.
pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/rover", get(rover_status))
        .route("/api/rover/command", post(rover_command))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommandRequest {
    /// Single-character command tokens, e.g. `"ffrb"`.
    #[serde(default)]
    commands: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct RoverResponse {
    heading: Heading,
    position: Position,
    halt: Option<HaltResponse>,
    summary: String,
    grid: String,
}

#[derive(Debug, Serialize)]
struct HaltResponse {
    command_index: usize,
    obstacle: Position,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    code: &'static str,
}

async fn health() -> &'static str {
    "OK"
}

async fn rover_status(State(state): State<AppState>) -> Json<RoverResponse> {
    let world = state.world.lock().unwrap_or_else(PoisonError::into_inner);
    Json(respond(&world, None))
}

async fn rover_command(
    State(state): State<AppState>,
    Json(request): Json<CommandRequest>,
) -> Response {
    let mut world = state.world.lock().unwrap_or_else(PoisonError::into_inner);

    match dispatch::run_batch(&mut world, &request.commands) {
        Ok(report) => {
            let status = if report.halt.is_some() {
                StatusCode::CONFLICT
            } else {
                StatusCode::OK
            };
            if let Some(halt) = report.halt {
                info!(command_index = halt.command_index, "batch halted by obstacle");
            }
            (status, Json(respond(&world, report.halt))).into_response()
        }
        Err(error) => {
            warn!(%error, "rejected command batch");
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: error.to_string(),
                    code: error_code(&error),
                }),
            )
                .into_response()
        }
    }
}

fn respond(world: &World, halt: Option<BatchHalt>) -> RoverResponse {
    let snapshot = query::rover_snapshot(world);
    let scene = scene_of(world);

    RoverResponse {
        heading: snapshot.heading,
        position: snapshot.position,
        summary: summary(&scene, halt.is_some()),
        grid: render(&scene, GlyphSet::default()),
        halt: halt.map(|halt| HaltResponse {
            command_index: halt.command_index,
            obstacle: halt.obstacle,
        }),
    }
}

fn scene_of(world: &World) -> Scene {
    let snapshot = query::rover_snapshot(world);
    let grid = query::planet_grid(world);

    Scene {
        width: grid.width(),
        height: grid.height(),
        rover: snapshot.position,
        heading: snapshot.heading,
        obstacles: query::obstacle_cells(world),
    }
}

const fn error_code(error: &BatchError) -> &'static str {
    match error {
        BatchError::Empty => "empty_command_input",
        BatchError::InvalidToken { .. } => "invalid_command_token",
    }
}

#[cfg(test)]
mod tests {
    use super::{error_code, respond, rover_command, AppState, CommandRequest};
    use axum::{extract::State, http::StatusCode, Json};
    use rover_mission_core::{BatchError, Heading, Position};
    use rover_mission_world::{ObstacleLayout, World, WorldSetup};

    fn state_with_obstacle() -> AppState {
        let world = World::from_setup(WorldSetup {
            width: 5,
            height: 5,
            obstacles: ObstacleLayout::Explicit(vec![Position::new(2, 0)]),
            start: Position::new(0, 0),
            heading: Heading::East,
        })
        .expect("setup is valid");
        AppState::new(world)
    }

    async fn post_commands(state: &AppState, commands: &str) -> StatusCode {
        let response = rover_command(
            State(state.clone()),
            Json(CommandRequest {
                commands: commands.to_owned(),
            }),
        )
        .await;
        response.status()
    }

    #[tokio::test]
    async fn clean_batches_answer_ok() {
        let state = state_with_obstacle();
        assert_eq!(post_commands(&state, "rf").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn blocked_batches_answer_conflict() {
        let state = state_with_obstacle();
        assert_eq!(post_commands(&state, "fff").await, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn rejected_batches_answer_bad_request() {
        let state = state_with_obstacle();
        assert_eq!(post_commands(&state, "").await, StatusCode::BAD_REQUEST);
        assert_eq!(post_commands(&state, "fxz").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rejected_batches_leave_the_world_untouched() {
        let state = state_with_obstacle();
        let _ = post_commands(&state, "fxz").await;

        let world = state.world.lock().expect("lock is healthy");
        let snapshot = rover_mission_world::query::rover_snapshot(&world);
        assert_eq!(snapshot.position, Position::new(0, 0));
        assert_eq!(snapshot.heading, Heading::East);
    }

    #[test]
    fn error_codes_distinguish_the_rejection_kinds() {
        assert_eq!(error_code(&BatchError::Empty), "empty_command_input");
        assert_eq!(
            error_code(&BatchError::InvalidToken {
                index: 0,
                token: 'x'
            }),
            "invalid_command_token"
        );
    }

    #[test]
    fn responses_embed_the_summary_and_grid() {
        let state = state_with_obstacle();
        let world = state.world.lock().expect("lock is healthy");
        let response = respond(&world, None);

        assert_eq!(response.heading, Heading::East);
        assert_eq!(response.position, Position::new(0, 0));
        assert!(response.halt.is_none());
        assert!(response.summary.starts_with("Direction: East"));
        assert!(response.grid.contains("🚀"));
        assert!(response.grid.contains("🌑"));
    }
}
