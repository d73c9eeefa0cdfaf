use axum::{
    Router,
    routing::{any, get, post},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{AppState, apidoc::ApiDoc};

pub mod generate;
pub mod preview;
pub mod provider;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/generate", post(generate::generate))
        .route("/provider/verify", get(provider::verify_provider_token))
        .route("/preview/{kind}", any(preview::preview_handler))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
}
