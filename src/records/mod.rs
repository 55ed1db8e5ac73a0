mod dto;
pub mod handlers;
pub mod model;

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(handlers::list_records)
            .post(handlers::create_record)
            .put(handlers::update_record)
            .delete(handlers::delete_record),
    )
}
