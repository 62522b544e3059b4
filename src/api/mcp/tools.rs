//! Built-in tools that report on and help operate API-key authentication.

use std::borrow::Cow;
use std::sync::Arc;

use rmcp::model::{JsonObject, Tool};
use serde_json::json;

use crate::services::auth::keygen;

pub const GENERATE_API_KEY: &str = "generate_api_key";
pub const CHECK_AUTH_STATUS: &str = "check_auth_status";

/// What the tools may disclose about the gate. Never includes key material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthStatus {
    pub required: bool,
    pub key_count: usize,
    pub usage: Vec<String>,
}

pub fn catalog() -> Vec<Tool> {
    vec![
        tool(
            GENERATE_API_KEY,
            "Generate a new secure API key for authentication",
        ),
        tool(
            CHECK_AUTH_STATUS,
            "Check current authentication configuration",
        ),
    ]
}

fn tool(name: &'static str, description: &'static str) -> Tool {
    Tool {
        name: Cow::Borrowed(name),
        title: None,
        description: Some(Cow::Borrowed(description)),
        input_schema: Arc::new(empty_schema()),
        output_schema: None,
        annotations: None,
        execution: None,
        icons: None,
        meta: None,
    }
}

fn empty_schema() -> JsonObject {
    match json!({"type": "object", "properties": {}}) {
        serde_json::Value::Object(map) => map,
        _ => JsonObject::new(),
    }
}

pub fn generate_api_key(status: &AuthStatus) -> Result<String, getrandom::Error> {
    if !status.required {
        return Ok(
            "API key authentication is currently disabled. Set REQUIRE_API_KEY=true to enable."
                .to_string(),
        );
    }

    let key = keygen::generate_api_key()?;
    Ok(format!(
        "New API key generated:\n\n{key}\n\n\
         - Store it securely; it cannot be recovered later.\n\
         - Add it to the API_KEYS environment variable (comma-separated) and restart the server.\n\
         - Share it only with authorized users."
    ))
}

pub fn check_auth_status(status: &AuthStatus) -> String {
    let mut out = String::from("Authentication status\n\n");
    out.push_str(&format!(
        "API key required: {}\n",
        if status.required { "yes" } else { "no" }
    ));

    if status.required {
        out.push_str(&format!("Configured API keys: {}\n", status.key_count));
    }

    out.push_str("\nUsage:\n");
    for hint in &status.usage {
        out.push_str(&format!("- {hint}\n"));
    }
    out
}
