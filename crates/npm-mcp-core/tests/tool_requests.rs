//! Integration tests for the public request/response surface.
//!
//! Handler behaviour is covered next to `NpmService`; these check that the
//! types a front-end needs are exported and agree with each other.

use npm_mcp_core::{
    Access, ToolArguments, ToolError, ToolErrorCategory, ToolName, ToolRequest, ToolResponse,
};
use serde_json::json;

#[test]
fn test_every_tool_name_parses() {
    for tool in ToolName::ALL {
        let args = ToolArguments::from_value(Some(json!({ "version": "1.0.0" })));
        let request = ToolRequest::parse(tool.as_str(), &args).unwrap();
        assert_eq!(request.tool_name(), tool);
    }
}

#[test]
fn test_tool_names_are_exact() {
    let args = ToolArguments::default();
    for name in ["NPM_PUBLISH", " npm_publish", "npm_view", ""] {
        let err = ToolRequest::parse(name, &args).unwrap_err();
        assert_eq!(err.category(), ToolErrorCategory::UnknownTool);
    }
}

#[test]
fn test_publish_defaults() {
    let args = ToolArguments::from_value(Some(json!({ "tag": "  ", "otp": "" })));
    let ToolRequest::Publish(publish) = ToolRequest::parse("npm_publish", &args).unwrap() else {
        panic!("expected publish request");
    };
    assert_eq!(publish.tag, "latest");
    assert_eq!(publish.access, Access::Public);
    assert_eq!(publish.otp, None);
    assert_eq!(publish.package_path, None);
}

#[test]
fn test_array_arguments_are_empty() {
    let args = ToolArguments::from_value(Some(json!(["npm_publish", "--force"])));
    assert!(args.is_empty());
}

#[test]
fn test_error_becomes_error_response() {
    let outcome: Result<String, ToolError> =
        Err(ToolError::Validation("version is required for npm_unpublish.".into()));
    let response = ToolResponse::from(outcome);

    assert!(response.is_error);
    assert_eq!(response.first_text(), Some("version is required for npm_unpublish."));
}
