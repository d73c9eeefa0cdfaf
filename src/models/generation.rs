use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{deployment::DeploymentResult, spec::ApiSpecification};

/// Body of `POST /generate`. Fields are optional so that missing values map to a 400, not a decode error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub prompt: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub auto_deploy: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    Generated,
    Deployed,
    Failed,
}

impl GenerationStatus {
    /// `None` means no deployment was requested.
    pub fn from_deployment(deployment: Option<&DeploymentResult>) -> Self {
        match deployment {
            None => GenerationStatus::Generated,
            Some(d) if d.success => GenerationStatus::Deployed,
            Some(_) => GenerationStatus::Failed,
        }
    }
}

/// Ready-to-paste curl invocation for a deployed endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CurlCommand {
    pub title: String,
    pub command: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    pub id: String,
    pub specification: ApiSpecification,
    pub code: String,
    pub message: String,
    pub deployment: Option<DeploymentResult>,
    pub deploy_url: Option<String>,
    pub deployment_id: Option<String>,
    pub status: GenerationStatus,
    /// Empty unless a deploy URL exists
    pub commands: Vec<CurlCommand>,
}
