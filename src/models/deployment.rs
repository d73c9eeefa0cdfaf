use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Input to the packager.
#[derive(Debug, Clone)]
pub struct DeploymentConfig {
    /// Request-scoped correlation id
    pub api_id: String,
    /// Generated code; only used as classification signal
    pub code: String,
    /// Raw, un-normalized project name
    pub name: String,
    pub description: String,
}

/// Outcome of an auto-deploy. Either `url` + `deployment_id` or `error` is set, per `success`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DeploymentResult {
    pub fn deployed(url: String, deployment_id: String) -> Self {
        Self {
            success: true,
            url: Some(url),
            deployment_id: Some(deployment_id),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            url: None,
            deployment_id: None,
            error: Some(error.into()),
        }
    }
}

/// One named text file of a deployment bundle, in Vercel's inline-file shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BundleFile {
    pub file: String,
    pub data: String,
}

/* ----------------------- Vercel wire types ----------------------- */

#[derive(Debug, Serialize)]
pub struct CreateDeploymentRequest<'a> {
    pub name: &'a str,
    pub files: &'a [BundleFile],
    pub target: &'static str,
    pub public: bool,
}

/// Subset of the deployment descriptor we rely on.
#[derive(Debug, Deserialize)]
pub struct CreatedDeployment {
    /// Bare domain, without scheme
    pub url: String,
    pub uid: String,
}

/// Live deployment as seen by callers.
#[derive(Debug, Clone, PartialEq)]
pub struct Deployment {
    pub url: String,
    pub deployment_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ProviderUserEnvelope {
    pub user: Option<ProviderUser>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ProviderUser {
    pub id: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
}

/// Body of `GET /provider/verify` on success.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenCheck {
    pub success: bool,
    pub message: String,
    pub user: ProviderUser,
}

/// Body of `GET /provider/verify` on failure.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenCheckFailure {
    pub success: bool,
    pub error: String,
    pub details: TokenCheckDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenCheckDetails {
    pub status: Option<u16>,
    pub message: String,
}

/// Extracts a human message from a provider error body.
///
/// Vercel sends `{"error": {"message": ".."}}`, but a bare string also shows up.
pub fn provider_error_message(body: &Value) -> Option<String> {
    match body.get("error")? {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(false) => None,
        Value::Object(obj) => match obj.get("message") {
            Some(Value::String(m)) => Some(m.clone()),
            _ => Some(Value::Object(obj.clone()).to_string()),
        },
        Value::Null => None,
        other => Some(other.to_string()),
    }
}
