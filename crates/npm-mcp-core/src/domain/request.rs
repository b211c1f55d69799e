//! Tool requests.
//!
//! Arguments arrive from the protocol layer as loosely-typed JSON. They are
//! normalized into [`ToolArguments`] and then validated into one
//! [`ToolRequest`] variant per tool before any handler logic runs.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::ToolError;

/// Default dist-tag for `npm publish`.
pub const DEFAULT_TAG: &str = "latest";

/// Names of the tools this server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    Publish,
    Unpublish,
    View,
}

impl ToolName {
    /// Every tool, in catalog order.
    pub const ALL: [Self; 3] = [Self::Publish, Self::Unpublish, Self::View];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Publish => "npm_publish",
            Self::Unpublish => "npm_unpublish",
            Self::View => "npm_view_package",
        }
    }

    /// Exact-match lookup; no case folding or aliasing.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.as_str() == name)
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Package access level for `npm publish --access`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Access {
    #[default]
    Public,
    Restricted,
}

impl Access {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Restricted => "restricted",
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Access {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Self::Public),
            "restricted" => Ok(Self::Restricted),
            other => Err(ToolError::Validation(format!(
                "access must be one of: public, restricted (got '{other}')."
            ))),
        }
    }
}

/// Normalized tool arguments.
///
/// Anything that is not a JSON object (arrays, scalars, null, missing)
/// normalizes to an empty argument set.
#[derive(Debug, Clone, Default)]
pub struct ToolArguments {
    values: Map<String, Value>,
}

impl ToolArguments {
    pub fn from_value(value: Option<Value>) -> Self {
        match value {
            Some(Value::Object(values)) => Self { values },
            _ => Self::default(),
        }
    }

    /// Trimmed string value; non-strings and blank strings are absent.
    pub fn string(&self, key: &str) -> Option<String> {
        let trimmed = self.values.get(key)?.as_str()?.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    /// Boolean value; anything that is not a JSON boolean is absent.
    pub fn boolean(&self, key: &str) -> Option<bool> {
        self.values.get(key)?.as_bool()
    }

    fn path(&self, key: &str) -> Option<PathBuf> {
        self.string(key).map(PathBuf::from)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Value> for ToolArguments {
    fn from(value: Value) -> Self {
        Self::from_value(Some(value))
    }
}

/// Arguments for `npm publish`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    pub package_path: Option<PathBuf>,
    pub tag: String,
    pub access: Access,
    pub otp: Option<String>,
}

impl Default for PublishRequest {
    fn default() -> Self {
        Self {
            package_path: None,
            tag: DEFAULT_TAG.to_string(),
            access: Access::Public,
            otp: None,
        }
    }
}

/// Arguments for `npm unpublish`.
///
/// `version` is mandatory, but it is checked by the handler after the
/// token so a call without credentials always reports the missing token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnpublishRequest {
    pub package_path: Option<PathBuf>,
    pub package_name: Option<String>,
    pub version: Option<String>,
    pub otp: Option<String>,
}

impl UnpublishRequest {
    /// The version to remove, or the validation error for a missing one.
    pub fn required_version(&self) -> Result<&str, ToolError> {
        self.version.as_deref().ok_or_else(|| {
            ToolError::Validation(format!("version is required for {}.", ToolName::Unpublish))
        })
    }
}

/// Arguments for `npm view`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewRequest {
    pub package_path: Option<PathBuf>,
    pub package_name: Option<String>,
    pub version: Option<String>,
    pub field: Option<String>,
    pub json: bool,
}

/// A validated request for exactly one tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolRequest {
    Publish(PublishRequest),
    Unpublish(UnpublishRequest),
    View(ViewRequest),
}

impl ToolRequest {
    /// Route by exact tool name and validate the arguments for that tool.
    pub fn parse(tool_name: &str, args: &ToolArguments) -> Result<Self, ToolError> {
        let tool = ToolName::from_name(tool_name)
            .ok_or_else(|| ToolError::UnknownTool(tool_name.to_string()))?;

        match tool {
            ToolName::Publish => {
                let access = args
                    .string("access")
                    .map(|raw| raw.parse::<Access>())
                    .transpose()?
                    .unwrap_or_default();
                Ok(Self::Publish(PublishRequest {
                    package_path: args.path("packagePath"),
                    tag: args
                        .string("tag")
                        .unwrap_or_else(|| DEFAULT_TAG.to_string()),
                    access,
                    otp: args.string("otp"),
                }))
            }
            ToolName::Unpublish => Ok(Self::Unpublish(UnpublishRequest {
                package_path: args.path("packagePath"),
                package_name: args.string("packageName"),
                version: args.string("version"),
                otp: args.string("otp"),
            })),
            ToolName::View => Ok(Self::View(ViewRequest {
                package_path: args.path("packagePath"),
                package_name: args.string("packageName"),
                version: args.string("version"),
                field: args.string("field"),
                json: args.boolean("json").unwrap_or(false),
            })),
        }
    }

    pub const fn tool_name(&self) -> ToolName {
        match self {
            Self::Publish(_) => ToolName::Publish,
            Self::Unpublish(_) => ToolName::Unpublish,
            Self::View(_) => ToolName::View,
        }
    }
}
