use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub mod password;
pub mod policy;
pub mod repo;
pub mod repo_types;
pub mod service;
pub mod token;
pub(crate) mod extractors;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::routes())
}
