use crate::api_error::ApiError;
use crate::models::game::{Move, Player};
use crate::service::match_engine::MatchEngine;
use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::info;

/// Application state shared across request handlers. The mutex makes each
/// engine operation one atomic read-modify-write unit.
pub struct AppState {
    pub engine: Mutex<MatchEngine>,
}

// =============================================================================
// GAME STATE
// =============================================================================

/// GET /game_state/{player}
/// Read-only view of the match for one player.
pub async fn game_state(
    state: web::Data<AppState>,
    path: web::Path<u32>,
) -> Result<impl Responder, ApiError> {
    let raw = path.into_inner();
    let player = Player::try_from(raw).map_err(|_| ApiError::InvalidPlayer(raw))?;

    let view = state.engine.lock().await.get_state(player);
    Ok(HttpResponse::Ok().json(view))
}

// =============================================================================
// MAKE MOVE
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct MakeMoveRequest {
    pub player: u32,
    #[serde(rename = "move")]
    pub mv: String,
}

/// POST /make_move
/// Submit one player's move. Input is validated before the engine is touched,
/// so a rejected request leaves the game state unchanged.
pub async fn make_move(
    state: web::Data<AppState>,
    req: web::Json<MakeMoveRequest>,
) -> Result<impl Responder, ApiError> {
    let player = Player::try_from(req.player).map_err(|_| ApiError::InvalidPlayer(req.player))?;
    let mv: Move = req.mv.parse().map_err(|_| ApiError::InvalidMove(req.mv.clone()))?;

    info!(player = %player, game_move = %mv, "Received move submission");

    state.engine.lock().await.submit_move(player, mv);

    Ok(HttpResponse::Ok().json(serde_json::json!({ "status": "success" })))
}

// =============================================================================
// ROUTE CONFIGURATION
// =============================================================================

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/game_state/{player}", web::get().to(game_state))
        .route("/make_move", web::post().to(make_move));
}
