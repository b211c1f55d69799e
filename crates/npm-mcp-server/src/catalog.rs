//! Tool catalog advertised by `tools/list`.

use npm_mcp_core::ToolName;
use serde::Serialize;
use serde_json::{Value, json};

/// One entry of the `tools/list` result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// All tools, in a fixed order.
pub fn tool_definitions() -> Vec<ToolDefinition> {
    ToolName::ALL.into_iter().map(tool_definition).collect()
}

pub fn tool_definition(tool: ToolName) -> ToolDefinition {
    match tool {
        ToolName::Publish => ToolDefinition {
            name: tool.as_str(),
            description: "Publish an npm package using NPM_ACCESS_TOKEN or NPM_TOKEN from server env.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "packagePath": {
                        "type": "string",
                        "description": "Package directory (defaults to the server's working directory)."
                    },
                    "tag": { "type": "string", "description": "Dist-tag to publish under (default: latest)." },
                    "access": { "type": "string", "enum": ["public", "restricted"] },
                    "otp": { "type": "string", "description": "One-time password for 2FA." }
                }
            }),
        },
        ToolName::Unpublish => ToolDefinition {
            name: tool.as_str(),
            description: "Unpublish a specific npm package version.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "packagePath": { "type": "string" },
                    "packageName": {
                        "type": "string",
                        "description": "Defaults to the name in <packagePath>/package.json."
                    },
                    "version": { "type": "string" },
                    "otp": { "type": "string" }
                },
                "required": ["version"]
            }),
        },
        ToolName::View => ToolDefinition {
            name: tool.as_str(),
            description: "View published package metadata using npm view.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "packagePath": { "type": "string" },
                    "packageName": { "type": "string" },
                    "version": { "type": "string" },
                    "field": { "type": "string", "description": "Single metadata field, e.g. dist-tags." },
                    "json": { "type": "boolean" }
                }
            }),
        },
    }
}
