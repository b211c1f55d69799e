//! Package descriptor (`package.json`) lookup.

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::ToolError;

/// File name of the package descriptor inside a package directory.
pub const PACKAGE_DESCRIPTOR: &str = "package.json";

const NAME_GUIDANCE: &str =
    "Provide packageName or ensure package.json has a valid name field.";

/// Use `provided` if present, otherwise the `name` from `<package_dir>/package.json`.
pub async fn resolve_package_name(
    package_dir: &Path,
    provided: Option<&str>,
) -> Result<String, ToolError> {
    match provided {
        Some(name) => Ok(name.to_string()),
        None => read_package_name(package_dir).await,
    }
}

/// Read the trimmed, non-empty `name` field of the package descriptor.
pub async fn read_package_name(package_dir: &Path) -> Result<String, ToolError> {
    let descriptor = package_dir.join(PACKAGE_DESCRIPTOR);
    let raw = tokio::fs::read_to_string(&descriptor).await.map_err(|e| {
        ToolError::Validation(format!(
            "Cannot read {}: {e}. {NAME_GUIDANCE}",
            descriptor.display()
        ))
    })?;

    let parsed: Value = serde_json::from_str(&raw).map_err(|e| {
        ToolError::Validation(format!(
            "Cannot parse {}: {e}. {NAME_GUIDANCE}",
            descriptor.display()
        ))
    })?;

    let name = parsed
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default();
    if name.is_empty() {
        return Err(ToolError::Validation(format!(
            "package name is required. {NAME_GUIDANCE}"
        )));
    }

    debug!(descriptor = %descriptor.display(), name, "Resolved package name");
    Ok(name.to_string())
}
