//! Workspace-level `trellis.toml` configuration.

use std::{path::Path, str::FromStr};

use serde::Deserialize;

use crate::{Error, Result, error::SourceContext};

/// File name of the workspace configuration.
pub const CONFIG_FILE: &str = "trellis.toml";

/// Default output directory, relative to the host package.
pub const DEFAULT_OUTPUT: &str = "app/(mounted)";

/// Default declaration file, relative to the host package.
pub const DEFAULT_DECLARATIONS: &str = "mounted-routes.d.ts";

/// Workspace configuration.
///
/// Every field is optional; a workspace without `trellis.toml` uses the
/// defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkspaceConfig {
    /// Package directories. A trailing `/*` expands to every immediate
    /// subdirectory.
    #[serde(default = "default_members")]
    pub members: Vec<String>,

    /// Name of the host package.
    #[serde(default)]
    pub host: Option<String>,

    /// Generated stub directory, relative to the host package.
    #[serde(default)]
    pub output: Option<String>,

    /// Generated declaration file, relative to the host package.
    #[serde(default)]
    pub declarations: Option<String>,
}

fn default_members() -> Vec<String> {
    vec!["packages/*".to_string()]
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            members: default_members(),
            host: None,
            output: None,
            declarations: None,
        }
    }
}

impl WorkspaceConfig {
    /// Load `trellis.toml` from the workspace root, or the defaults when it
    /// does not exist.
    pub fn load(root: impl AsRef<Path>) -> Result<Self> {
        let path = root.as_ref().join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse a configuration with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let ctx = SourceContext::new(content, filename);
        let config: Self = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;
        if config.members.is_empty() {
            return Err(ctx.validation_error("`members` must list at least one entry", ""));
        }
        Ok(config)
    }

    /// Output directory relative to the host package.
    pub fn output_dir(&self) -> &str {
        self.output.as_deref().unwrap_or(DEFAULT_OUTPUT)
    }

    /// Declaration file relative to the host package.
    pub fn declarations_file(&self) -> &str {
        self.declarations.as_deref().unwrap_or(DEFAULT_DECLARATIONS)
    }
}

impl FromStr for WorkspaceConfig {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, CONFIG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let temp = TempDir::new().unwrap();
        let config = WorkspaceConfig::load(temp.path()).unwrap();

        assert_eq!(config, WorkspaceConfig::default());
        assert_eq!(config.members, vec!["packages/*"]);
        assert_eq!(config.output_dir(), DEFAULT_OUTPUT);
        assert_eq!(config.declarations_file(), DEFAULT_DECLARATIONS);
    }

    #[test]
    fn test_parse_config() {
        let config: WorkspaceConfig = r#"
            members = ["apps/*", "libs/shared"]
            host = "web"
            output = "app/(features)"
        "#
        .parse()
        .unwrap();

        assert_eq!(config.members, vec!["apps/*", "libs/shared"]);
        assert_eq!(config.host.as_deref(), Some("web"));
        assert_eq!(config.output_dir(), "app/(features)");
        assert_eq!(config.declarations_file(), DEFAULT_DECLARATIONS);
    }

    #[test]
    fn test_empty_members_rejected() {
        let result: Result<WorkspaceConfig> = "members = []".parse();
        assert!(matches!(*result.unwrap_err(), Error::Validation { .. }));
    }
}
