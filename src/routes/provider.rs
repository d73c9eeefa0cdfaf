use axum::{Json, extract::State, http::StatusCode};
use tracing::{info, warn};

use crate::{
    AppState,
    models::deployment::{TokenCheck, TokenCheckDetails, TokenCheckFailure},
};

#[utoipa::path(
    get,
    path = "/provider/verify",
    tag = "deployment",
    responses(
        (status = 200, description = "Vercel token is valid", body = TokenCheck),
        (status = 400, description = "Vercel rejected the token or was unreachable", body = TokenCheckFailure)
    )
)]
pub async fn verify_provider_token(
    State(state): State<AppState>,
) -> Result<Json<TokenCheck>, (StatusCode, Json<TokenCheckFailure>)> {
    match state.deployer.verify_token().await {
        Ok(user) => {
            info!("Vercel token verified for user {:?}", user.username);
            Ok(Json(TokenCheck {
                success: true,
                message: "Vercel token is valid".to_string(),
                user,
            }))
        }
        Err(err) => {
            warn!("Vercel token test failed: {}", err);
            Err((
                StatusCode::BAD_REQUEST,
                Json(TokenCheckFailure {
                    success: false,
                    error: "Vercel API error".to_string(),
                    details: TokenCheckDetails {
                        status: err.status,
                        message: err.message,
                    },
                }),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, services::vercel::VercelDeployer};
    use crate::services::llm::testing::ScriptedCompletion;
    use axum::{body::to_bytes, response::IntoResponse};
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn state_for(server: &mockito::Server) -> AppState {
        let base = server.url();
        let cfg = Config::from_lookup(|key| match key {
            "GOOGLE_API_KEY" => Some("test".to_string()),
            "VERCEL_TOKEN" => Some("secret".to_string()),
            "VERCEL_API_BASE_URL" => Some(base.clone()),
            _ => None,
        })
        .unwrap();
        AppState {
            llm: Arc::new(ScriptedCompletion::default()),
            deployer: Arc::new(VercelDeployer::new(cfg.vercel, reqwest::Client::new()).unwrap()),
        }
    }

    async fn body_of(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn valid_token() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v2/user")
            .with_status(200)
            .with_body(json!({"user": {"id": "u1", "username": "dev", "email": "d@x.io"}}).to_string())
            .create_async()
            .await;

        let response = verify_provider_token(State(state_for(&server)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_of(response).await,
            json!({
                "success": true,
                "message": "Vercel token is valid",
                "user": {"id": "u1", "username": "dev", "email": "d@x.io"}
            })
        );
    }

    #[tokio::test]
    async fn rejected_token() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v2/user")
            .with_status(403)
            .with_body(json!({"error": {"message": "Invalid token"}}).to_string())
            .create_async()
            .await;

        let response = verify_provider_token(State(state_for(&server)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_of(response).await,
            json!({
                "success": false,
                "error": "Vercel API error",
                "details": {"status": 403, "message": "Vercel API Error: Invalid token"}
            })
        );
    }
}
