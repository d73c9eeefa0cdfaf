use tracing::info;

use super::{GenerationError, Stage};
use crate::{models::spec::ApiSpecification, services::llm::CompletionService, utils::strip_code_fences};

fn code_prompt(spec_json: &str) -> String {
    format!(
        "Generate a complete Next.js API route for this specification:\n{spec_json}\n\nReturn ONLY the TypeScript code for the API route file."
    )
}

/// Asks for a route implementation of `spec`.
///
/// The result is display-only text: it is never parsed, executed, or deployed.
pub async fn generate_code(
    llm: &dyn CompletionService,
    spec: &ApiSpecification,
) -> Result<String, GenerationError> {
    let spec_json = serde_json::to_string_pretty(spec).map_err(|e| GenerationError::Validation {
        stage: Stage::Code,
        message: format!("specification could not be serialized: {e}"),
    })?;

    let completion = llm
        .complete(&code_prompt(&spec_json))
        .await
        .map_err(|source| GenerationError::Upstream {
            stage: Stage::Code,
            source,
        })?;

    let code = strip_code_fences(&completion);
    info!("Generated code length: {}", code.len());
    Ok(code)
}
