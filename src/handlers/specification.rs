use tracing::info;

use super::{GenerationError, Stage};
use crate::{models::spec::ApiSpecification, services::llm::CompletionService, utils::strip_code_fences};

fn specification_prompt(prompt: &str) -> String {
    format!(
        r#"Generate a REST API specification for: "{prompt}"

Return ONLY a JSON object with this exact structure:
{{
  "endpoint": "/api/example",
  "method": "POST",
  "description": "Brief description",
  "parameters": [
    {{"name": "param1", "type": "string", "required": true}}
  ],
  "responseExample": {{"message": "success"}}
}}"#
    )
}

/// Turns free text into a validated [`ApiSpecification`] with one completion call.
pub async fn generate_specification(
    llm: &dyn CompletionService,
    prompt: &str,
) -> Result<ApiSpecification, GenerationError> {
    let completion = llm
        .complete(&specification_prompt(prompt))
        .await
        .map_err(|source| GenerationError::Upstream {
            stage: Stage::Specification,
            source,
        })?;

    let spec = parse_specification(&completion)?;
    info!(
        "Generated specification: {} {} ({} parameters)",
        spec.method,
        spec.endpoint,
        spec.parameters.len()
    );
    Ok(spec)
}

/// Strict decode of a raw completion. Nothing is coerced or repaired.
///
/// The completion is decoded as-is first; the fenced body is only tried when that fails.
pub fn parse_specification(completion: &str) -> Result<ApiSpecification, GenerationError> {
    let raw = completion.trim();
    let spec: ApiSpecification = match serde_json::from_str(raw) {
        Ok(spec) => spec,
        Err(raw_err) => {
            let fenced = strip_code_fences(completion);
            if fenced == raw {
                return Err(not_a_specification(raw_err));
            }
            serde_json::from_str(&fenced).map_err(not_a_specification)?
        }
    };

    if spec.endpoint.trim().is_empty() {
        return Err(invalid("endpoint must not be empty".to_string()));
    }
    if spec.description.trim().is_empty() {
        return Err(invalid("description must not be empty".to_string()));
    }
    Ok(spec)
}

fn not_a_specification(err: serde_json::Error) -> GenerationError {
    invalid(format!("not a valid specification: {err}"))
}

fn invalid(message: String) -> GenerationError {
    GenerationError::Validation {
        stage: Stage::Specification,
        message,
    }
}
