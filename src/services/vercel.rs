use reqwest::{Response, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::{
    config::{ConfigError, VercelConfig},
    deploy::bundle::build_bundle,
    models::deployment::{
        BundleFile, CreateDeploymentRequest, CreatedDeployment, Deployment, DeploymentConfig,
        DeploymentResult, ProviderUser, ProviderUserEnvelope, provider_error_message,
    },
};

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct DeploymentError {
    /// HTTP status from the provider; `None` for transport failures
    pub status: Option<u16>,
    pub message: String,
}

impl DeploymentError {
    fn transport(err: reqwest::Error, timeout_secs: u64) -> Self {
        let message = if err.is_timeout() {
            format!("Vercel request timed out after {timeout_secs}s")
        } else {
            format!("Vercel request failed: {err}")
        };
        Self {
            status: err.status().map(|s| s.as_u16()),
            message,
        }
    }
}

/// Client for Vercel's deployment API. Built once at startup and shared.
#[derive(Clone)]
pub struct VercelDeployer {
    http: reqwest::Client,
    token: String,
    cfg: VercelConfig,
}

impl VercelDeployer {
    /// Fails when no token is configured; nothing here works without one.
    pub fn new(cfg: VercelConfig, http: reqwest::Client) -> Result<Self, ConfigError> {
        let token = cfg
            .token
            .clone()
            .ok_or(ConfigError::MissingVar("VERCEL_TOKEN"))?;
        Ok(Self { http, token, cfg })
    }

    /// Packages and submits one API. Never fails: errors come back as a failed result.
    pub async fn deploy(&self, config: &DeploymentConfig) -> DeploymentResult {
        info!(
            "Starting deployment for API {} (id={})",
            config.name, config.api_id
        );

        let bundle = build_bundle(config);
        info!(
            "Packaged {} handler as project {}",
            bundle.kind, bundle.project_name
        );

        match self.submit(&bundle.project_name, &bundle.files).await {
            Ok(deployment) => {
                info!("Deployment successful: {}", deployment.url);
                DeploymentResult::deployed(deployment.url, deployment.deployment_id)
            }
            Err(err) => {
                error!(
                    "Deployment failed for {} (status={:?}): {}",
                    config.api_id, err.status, err.message
                );
                DeploymentResult::failed(err.message)
            }
        }
    }

    /// Creates a public production deployment from `files`.
    ///
    /// `name` must already be a valid project slug.
    pub async fn submit(
        &self,
        name: &str,
        files: &[BundleFile],
    ) -> Result<Deployment, DeploymentError> {
        let url = self.endpoint("v13/deployments")?;
        let payload = CreateDeploymentRequest {
            name,
            files,
            target: "production",
            public: true,
        };

        info!(
            "Creating public Vercel deployment for {} with files {:?}",
            name,
            files.iter().map(|f| f.file.as_str()).collect::<Vec<_>>()
        );

        let res = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .timeout(self.cfg.deploy_timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|e| DeploymentError::transport(e, self.cfg.deploy_timeout.as_secs()))?;

        let res = ensure_success(res).await?;
        let created: CreatedDeployment = res.json().await.map_err(|e| DeploymentError {
            status: None,
            message: format!("Unexpected Vercel response: {e}"),
        })?;

        info!("Deployment created: {}", created.uid);
        Ok(Deployment {
            url: format!("https://{}", created.url),
            deployment_id: created.uid,
        })
    }

    /// Confirms the token against the identity endpoint.
    pub async fn verify_token(&self) -> Result<ProviderUser, DeploymentError> {
        let url = self.endpoint("v2/user")?;
        let res = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .timeout(self.cfg.verify_timeout)
            .send()
            .await
            .map_err(|e| DeploymentError::transport(e, self.cfg.verify_timeout.as_secs()))?;

        let res = ensure_success(res).await?;
        let envelope: ProviderUserEnvelope = res.json().await.map_err(|e| DeploymentError {
            status: None,
            message: format!("Unexpected Vercel response: {e}"),
        })?;
        Ok(envelope.user.unwrap_or_default())
    }

    fn endpoint(&self, path: &str) -> Result<url::Url, DeploymentError> {
        self.cfg.base_url.join(path).map_err(|e| DeploymentError {
            status: None,
            message: format!("Failed to resolve Vercel endpoint {path}: {e}"),
        })
    }
}

/// Passes 2xx responses through and turns everything else into a [`DeploymentError`].
async fn ensure_success(res: Response) -> Result<Response, DeploymentError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    warn!("Vercel API response ({}): {}", status, body);
    Err(classify_failure(status, &body))
}

fn classify_failure(status: StatusCode, body: &str) -> DeploymentError {
    let structured = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| provider_error_message(&v));

    let message = match structured {
        Some(msg) => format!("Vercel API Error: {msg}"),
        None => format!(
            "HTTP {}: {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("request failed")
        ),
    };
    DeploymentError {
        status: Some(status.as_u16()),
        message,
    }
}
