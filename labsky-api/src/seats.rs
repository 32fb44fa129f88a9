use axum::{routing::get, Json, Router};
use labsky_catalog::{Seat, SeatCatalog};

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/seats", get(list_seats))
}

/// GET /seats
/// Full seat map in row-major order
pub async fn list_seats() -> Json<&'static [Seat]> {
    Json(SeatCatalog::seats())
}
