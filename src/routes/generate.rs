use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::Value as JsonValue;
use tracing::{error, info};

use crate::{
    AppState,
    handlers::{self, GenerationInput},
    models::{
        common::ErrorMessage,
        generation::{GenerateRequest, GenerationResponse},
    },
};

type ErrorResponse = (StatusCode, Json<ErrorMessage>);

fn bad_request(message: impl Into<String>) -> ErrorResponse {
    (StatusCode::BAD_REQUEST, Json(ErrorMessage::new(message)))
}

#[utoipa::path(
    post,
    path = "/generate",
    tag = "generation",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Specification and code generated; deployment outcome inside", body = GenerationResponse),
        (status = 400, description = "Missing prompt or name, or malformed body", body = ErrorMessage),
        (status = 500, description = "Specification or code generation failed", body = ErrorMessage)
    )
)]
pub async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<JsonValue>, JsonRejection>,
) -> Result<Json<GenerationResponse>, ErrorResponse> {
    let Json(payload) =
        payload.map_err(|rej| bad_request(format!("Invalid JSON body: {}", rej.body_text())))?;

    let request: GenerateRequest = serde_json::from_value(payload)
        .map_err(|err| bad_request(format!("Invalid request body: {err}")))?;

    let input = validate(request).ok_or_else(|| bad_request("Missing prompt or name"))?;

    info!(
        "Incoming generation request (name={} autoDeploy={})",
        input.name, input.auto_deploy
    );

    let response = handlers::generate_api(&state, &input).await.map_err(|e| {
        error!("Generation error: {e}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorMessage::new(format!("Failed to generate API: {e}"))),
        )
    })?;

    Ok(Json(response))
}

fn validate(request: GenerateRequest) -> Option<GenerationInput> {
    let prompt = request.prompt.filter(|p| !p.trim().is_empty())?;
    let name = request.name.filter(|n| !n.trim().is_empty())?;
    Some(GenerationInput {
        prompt,
        name,
        auto_deploy: request.auto_deploy.unwrap_or(false),
    })
}
