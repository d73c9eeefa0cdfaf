use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "API Forge",
        version = "0.1.0",
        description = "Describe an HTTP API in plain language; get a specification, generated code, and an optional Vercel deployment."
    ),
    servers(
        (url = "http://localhost:8080", description = "Local dev")
    ),
    tags(
        (name = "generation", description = "Specification and code generation"),
        (name = "deployment", description = "Hosting provider diagnostics and canned handler previews")
    ),
    // Handlers (paths)
    paths(
        crate::routes::generate::generate,
        crate::routes::provider::verify_provider_token,
        crate::routes::preview::preview_handler,
    ),
    // Schemas used in requests/responses
    components(
        schemas(
            crate::models::generation::GenerateRequest,
            crate::models::generation::GenerationResponse,
            crate::models::generation::GenerationStatus,
            crate::models::generation::CurlCommand,
            crate::models::spec::ApiSpecification,
            crate::models::spec::ApiParameter,
            crate::models::spec::HttpMethod,
            crate::models::deployment::DeploymentResult,
            crate::models::deployment::TokenCheck,
            crate::models::deployment::TokenCheckFailure,
            crate::classify::ApiKind,
            crate::models::common::ErrorMessage
        )
    )
)]
pub struct ApiDoc;
