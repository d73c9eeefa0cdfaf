use axum::{
    Json,
    body::Bytes,
    extract::Path,
    http::{Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::{classify::ApiKind, deploy::canned, models::common::ErrorMessage};

#[utoipa::path(
    post,
    path = "/preview/{kind}",
    tag = "deployment",
    description = "Runs a canned handler in-process. Routed for every HTTP method; OPTIONS answers the CORS preflight.",
    params(
        ("kind" = ApiKind, Path, description = "Canned handler to run")
    ),
    request_body(content = Option<Object>, description = "Handler input. A missing or unparsable body reads as no fields"),
    responses(
        (status = 200, description = "Handler response as JSON, empty for OPTIONS"),
        (status = 400, description = "Handler rejected the input", body = ErrorMessage),
        (status = 404, description = "Unknown kind", body = ErrorMessage)
    )
)]
pub async fn preview_handler(Path(kind): Path<String>, method: Method, body: Bytes) -> Response {
    let kind: ApiKind = match kind.parse() {
        Ok(kind) => kind,
        Err(err) => {
            return (StatusCode::NOT_FOUND, Json(ErrorMessage::new(err.to_string()))).into_response();
        }
    };

    // Mirrors `req.body || {}`: an absent or unparsable body reads as no fields
    let parsed: Option<Value> = if body.is_empty() {
        None
    } else {
        serde_json::from_slice(&body).ok()
    };

    let res = canned::respond(kind, method.as_str(), parsed.as_ref());
    let status = StatusCode::from_u16(res.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let cors = [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")];

    match res.body {
        Some(json) => (status, cors, Json(json)).into_response(),
        None => (status, cors).into_response(),
    }
}
