use serde_json::json;

use super::{canned, naming::normalize_project_name};
use crate::{
    classify::{ApiKind, classify_parts},
    models::deployment::{BundleFile, DeploymentConfig},
    usage::usage_example,
    utils::escape_html,
};

/// Files of one deployment plus what was decided while building them.
#[derive(Debug, Clone)]
pub struct Bundle {
    pub project_name: String,
    pub kind: ApiKind,
    pub files: Vec<BundleFile>,
}

/// Builds the minimal Vercel project for a generated API.
///
/// The function file is the canned handler for the detected kind, never `config.code`.
pub fn build_bundle(config: &DeploymentConfig) -> Bundle {
    let kind = classify_parts(&[config.code.as_str(), config.description.as_str()]);
    let project_name = normalize_project_name(&config.name);

    let files = vec![
        BundleFile {
            file: "package.json".to_string(),
            data: package_json(&project_name, &config.description),
        },
        BundleFile {
            file: "vercel.json".to_string(),
            data: vercel_json(),
        },
        BundleFile {
            file: "api/index.js".to_string(),
            data: canned::handler_source(kind).to_string(),
        },
        BundleFile {
            file: "public/index.html".to_string(),
            data: docs_page(&config.name, &config.description, kind),
        },
    ];

    Bundle {
        project_name,
        kind,
        files,
    }
}

fn package_json(project_name: &str, description: &str) -> String {
    let manifest = json!({
        "name": project_name,
        "version": "1.0.0",
        "description": description,
        "main": "api/index.js",
        "dependencies": {},
        "engines": { "node": "18.x" },
    });
    pretty(&manifest)
}

fn vercel_json() -> String {
    let config = json!({
        "version": 2,
        "functions": {
            "api/*.js": { "runtime": "@vercel/node@3.0.0" }
        },
        "headers": [
            {
                "source": "/api/(.*)",
                "headers": [
                    { "key": "Access-Control-Allow-Origin", "value": "*" },
                    { "key": "Access-Control-Allow-Methods", "value": "GET, POST, PUT, DELETE, OPTIONS" },
                    { "key": "Access-Control-Allow-Headers", "value": "Content-Type, Authorization" }
                ]
            }
        ]
    });
    pretty(&config)
}

fn pretty(value: &serde_json::Value) -> String {
    // Serializing a Value cannot fail
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn docs_page(name: &str, description: &str, kind: ApiKind) -> String {
    let name = escape_html(name);
    let description = escape_html(description);
    let example = usage_example(kind);
    let request = escape_html(example.request);
    let response = escape_html(example.response);

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{name} - API</title>
</head>
<body>
  <h1>{name}</h1>
  <p>{description}</p>
  <div><strong>Endpoint:</strong> <code>/api</code></div>
  <div>
    <h3>{title}</h3>
    <p><strong>Request:</strong><br><code>{request}</code></p>
    <p><strong>Response:</strong><br><code>{response}</code></p>
  </div>
</body>
</html>
"#,
        title = example.title,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn config(name: &str, code: &str, description: &str) -> DeploymentConfig {
        DeploymentConfig {
            api_id: "api-1".to_string(),
            code: code.to_string(),
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    fn file<'a>(bundle: &'a Bundle, path: &str) -> &'a str {
        &bundle
            .files
            .iter()
            .find(|f| f.file == path)
            .unwrap_or_else(|| panic!("missing {path}"))
            .data
    }

    #[test]
    fn bundle_has_fixed_file_set() {
        let bundle = build_bundle(&config("sq", "", "Squares a number"));
        let paths: Vec<&str> = bundle.files.iter().map(|f| f.file.as_str()).collect();
        assert_eq!(
            paths,
            ["package.json", "vercel.json", "api/index.js", "public/index.html"]
        );
    }

    #[test]
    fn llm_code_is_never_deployed() {
        let llm_code = "export default function handler() { process.exit(1) } // square";
        let bundle = build_bundle(&config("sq", llm_code, "whatever"));
        assert_eq!(bundle.kind, ApiKind::Square);
        let handler = file(&bundle, "api/index.js");
        assert_eq!(handler, canned::handler_source(ApiKind::Square));
        assert!(!handler.contains("process.exit"));
    }

    #[test]
    fn manifest_uses_normalized_name() {
        let bundle = build_bundle(&config("My Cool API!!", "", "desc"));
        assert_eq!(bundle.project_name, "my-cool-api");
        let manifest: Value = serde_json::from_str(file(&bundle, "package.json")).unwrap();
        assert_eq!(manifest["name"], "my-cool-api");
        assert_eq!(manifest["main"], "api/index.js");
        assert_eq!(manifest["description"], "desc");

        let bundle = build_bundle(&config("###", "", "desc"));
        let manifest: Value = serde_json::from_str(file(&bundle, "package.json")).unwrap();
        assert_eq!(manifest["name"], "simple-api");
    }

    #[test]
    fn vercel_config_declares_runtime_and_cors() {
        let bundle = build_bundle(&config("x", "", ""));
        let cfg: Value = serde_json::from_str(file(&bundle, "vercel.json")).unwrap();
        assert_eq!(cfg["functions"]["api/*.js"]["runtime"], "@vercel/node@3.0.0");
        assert_eq!(cfg["headers"][0]["source"], "/api/(.*)");
        let headers = cfg["headers"][0]["headers"].as_array().unwrap();
        let lookup = |key: &str| {
            headers
                .iter()
                .find(|h| h["key"] == key)
                .and_then(|h| h["value"].as_str())
                .unwrap()
                .to_string()
        };
        assert_eq!(lookup("Access-Control-Allow-Origin"), "*");
        assert_eq!(
            lookup("Access-Control-Allow-Methods"),
            "GET, POST, PUT, DELETE, OPTIONS"
        );
        assert_eq!(
            lookup("Access-Control-Allow-Headers"),
            "Content-Type, Authorization"
        );
    }

    #[test]
    fn docs_page_documents_the_selected_kind() {
        let bundle = build_bundle(&config("Calc <1>", "", "A math helper"));
        assert_eq!(bundle.kind, ApiKind::Calculator);
        let html = file(&bundle, "public/index.html");
        assert!(html.contains("<h1>Calc &lt;1&gt;</h1>"));
        assert!(html.contains("<p>A math helper</p>"));
        assert!(html.contains("<code>/api</code>"));
        assert!(html.contains("Calculator Example"));
    }

    #[test]
    fn unmatched_signal_deploys_generic() {
        let bundle = build_bundle(&config("books", "list books", "A library"));
        assert_eq!(bundle.kind, ApiKind::Generic);
        assert_eq!(
            file(&bundle, "api/index.js"),
            canned::handler_source(ApiKind::Generic)
        );
    }
}
