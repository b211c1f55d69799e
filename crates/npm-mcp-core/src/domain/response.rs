//! Tool call responses as they appear on the wire.

use serde::Serialize;

use crate::error::ToolError;

/// One content block of a tool response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    Text { text: String },
}

/// Result of a `tools/call` request.
///
/// Always carries exactly one text block: the command output on success, or
/// the error message on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResponse {
    pub content: Vec<ToolContent>,
    pub is_error: bool,
}

impl ToolResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: message.into(),
            }],
            is_error: true,
        }
    }

    /// Text of the first content block.
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().map(|block| match block {
            ToolContent::Text { text } => text.as_str(),
        })
    }
}

impl From<Result<String, ToolError>> for ToolResponse {
    fn from(result: Result<String, ToolError>) -> Self {
        match result {
            Ok(text) => Self::text(text),
            Err(err) => Self::error(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_mcp_shape() {
        let value = serde_json::to_value(ToolResponse::error("boom")).unwrap();
        assert_eq!(
            value,
            json!({ "content": [{ "type": "text", "text": "boom" }], "isError": true })
        );
    }

    #[test]
    fn from_result_maps_errors() {
        let response = ToolResponse::from(Err(ToolError::Validation("bad".into())));
        assert!(response.is_error);
        assert_eq!(response.first_text(), Some("bad"));

        let response = ToolResponse::from(Ok("ok".to_string()));
        assert!(!response.is_error);
        assert_eq!(response.first_text(), Some("ok"));
    }
}
