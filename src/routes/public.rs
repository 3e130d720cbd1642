use askama::Template;
use askama_axum::IntoResponse as AskamaTemplateResponse;
use axum::{extract::State, response::IntoResponse, routing::get, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(landing))
}

#[derive(Template)]
#[template(path = "landing.html")]
struct LandingTemplate {
    trip_count: usize,
}

async fn landing(State(state): State<AppState>) -> impl IntoResponse {
    AskamaTemplateResponse::into_response(LandingTemplate {
        trip_count: state.trips.trips().len(),
    })
}
