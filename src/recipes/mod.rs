use crate::state::AppState;
use axum::Router;

mod defaults;
mod dto;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
