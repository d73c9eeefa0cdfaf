//! Usage documentation per [`ApiKind`]: the worked example on the deployed
//! docs page and the curl commands returned to the dashboard.

use crate::{classify::ApiKind, models::generation::CurlCommand};

/// Worked request/response pair embedded in the deployed docs page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageExample {
    pub title: &'static str,
    pub request: &'static str,
    pub response: &'static str,
}

pub fn usage_example(kind: ApiKind) -> UsageExample {
    match kind {
        ApiKind::Square => UsageExample {
            title: "Square Example",
            request: r#"curl -X POST /api -H "Content-Type: application/json" -d '{"number": 4}'"#,
            response: r#"{"number": 4, "square": 16}"#,
        },
        ApiKind::Auth => UsageExample {
            title: "Auth Example",
            request: r#"curl -X POST /api -H "Content-Type: application/json" -d '{"email": "user@example.com", "password": "123456"}'"#,
            response: r#"{"success": true, "token": "mock-token"}"#,
        },
        ApiKind::Calculator => UsageExample {
            title: "Calculator Example",
            request: r#"curl -X POST /api -H "Content-Type: application/json" -d '{"operation": "add", "a": 10, "b": 5}'"#,
            response: r#"{"operation": "add", "result": 15}"#,
        },
        ApiKind::Generic => UsageExample {
            title: "Generic Example",
            request: "curl /api",
            response: r#"{"message": "API is working", "method": "GET"}"#,
        },
    }
}

fn post_command(base_url: &str, body: &str) -> String {
    format!(
        "curl -X POST {base_url}/api \\\n    -H \"Content-Type: application/json\" \\\n    -d '{body}'"
    )
}

fn command(title: &str, command: String) -> CurlCommand {
    CurlCommand {
        title: title.to_string(),
        command,
    }
}

/// Curl commands for exercising a live deployment.
///
/// The first entry always fetches `/api`; the rest depend on `kind`.
pub fn curl_commands(deploy_url: &str, kind: ApiKind) -> Vec<CurlCommand> {
    let trimmed = deploy_url.trim_end_matches('/');
    let base_url = trimmed.strip_suffix("/api").unwrap_or(trimmed);

    let mut commands = vec![command("API Info", format!("curl {base_url}/api"))];

    let examples: &[(&str, &str)] = match kind {
        ApiKind::Square => &[
            ("Calculate Square", r#"{"number": 7}"#),
            ("Try Another Number", r#"{"number": 15}"#),
        ],
        ApiKind::Auth => &[
            (
                "User Login",
                r#"{"email": "test@example.com", "password": "password123"}"#,
            ),
            ("Invalid Login", r#"{"email": "invalid", "password": ""}"#),
        ],
        ApiKind::Calculator => &[
            ("Add Numbers", r#"{"operation": "add", "a": 15, "b": 25}"#),
            ("Multiply Numbers", r#"{"operation": "multiply", "a": 8, "b": 9}"#),
        ],
        ApiKind::Generic => &[("Test API", r#"{"key": "value", "test": true}"#)],
    };

    commands.extend(
        examples
            .iter()
            .map(|(title, body)| command(title, post_command(base_url, body))),
    );
    commands
}
