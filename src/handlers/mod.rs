use std::fmt;

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    AppState,
    classify::classify_parts,
    models::{
        deployment::DeploymentConfig,
        generation::{GenerationResponse, GenerationStatus},
    },
    services::llm::CompletionError,
    usage::curl_commands,
    utils::new_api_id,
};

pub mod code;
pub mod specification;

/// Pipeline step that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Specification,
    Code,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Specification => f.write_str("specification"),
            Stage::Code => f.write_str("code"),
        }
    }
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("{stage} output failed validation: {message}")]
    Validation { stage: Stage, message: String },

    #[error("{stage} completion failed: {source}")]
    Upstream {
        stage: Stage,
        #[source]
        source: CompletionError,
    },
}

/// Validated input of one generation run.
#[derive(Debug, Clone)]
pub struct GenerationInput {
    pub prompt: String,
    pub name: String,
    pub auto_deploy: bool,
}

/// Runs spec → code → optional deploy.
///
/// Spec or code failures abort the run. Deployment failures never do; they are
/// reported inside the response.
pub async fn generate_api(
    state: &AppState,
    input: &GenerationInput,
) -> Result<GenerationResponse, GenerationError> {
    let id = new_api_id();
    info!("Generating API {} for prompt: {}", id, input.prompt);

    let specification =
        specification::generate_specification(state.llm.as_ref(), &input.prompt).await?;
    let code = code::generate_code(state.llm.as_ref(), &specification).await?;

    let deployment = if input.auto_deploy {
        let config = DeploymentConfig {
            api_id: id.clone(),
            code: code.clone(),
            name: input.name.clone(),
            description: specification.description.clone(),
        };
        Some(state.deployer.deploy(&config).await)
    } else {
        None
    };

    let status = GenerationStatus::from_deployment(deployment.as_ref());
    let deploy_url = deployment.as_ref().and_then(|d| d.url.clone());
    let deployment_id = deployment.as_ref().and_then(|d| d.deployment_id.clone());

    let message = match (&status, deployment.as_ref().and_then(|d| d.error.as_deref())) {
        (GenerationStatus::Deployed, _) => "API generated and deployed successfully!".to_string(),
        (GenerationStatus::Failed, err) => {
            let reason = err.unwrap_or("unknown deployment error");
            warn!("API {} generated but deployment failed: {}", id, reason);
            format!("API generated, but deployment failed: {reason}")
        }
        (GenerationStatus::Generated, _) => {
            "API generated successfully! Copy the code below.".to_string()
        }
    };

    let commands = match &deploy_url {
        Some(url) => {
            let spec_json = serde_json::to_string(&specification).unwrap_or_default();
            let kind = classify_parts(&[spec_json.as_str(), input.prompt.as_str()]);
            curl_commands(url, kind)
        }
        None => Vec::new(),
    };

    Ok(GenerationResponse {
        id,
        specification,
        code,
        message,
        deployment,
        deploy_url,
        deployment_id,
        status,
        commands,
    })
}
