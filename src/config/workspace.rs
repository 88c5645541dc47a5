//! Settings-file backed configuration accessor
//!
//! Resolves keys the way the editor does for a workspace folder: the user
//! `settings.json` is overlaid by the folder's `.vscode/settings.json`.

use crate::config::accessor::ConfigurationAccessor;
use crate::error::{RlsConfigError, Result};
use crate::utils::sanitizer::sanitize_settings_json;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Which settings scope a layer came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsScope {
    User,
    Workspace,
}

impl std::fmt::Display for SettingsScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Workspace => f.write_str("workspace"),
        }
    }
}

/// One parsed settings file
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsLayer {
    pub scope: SettingsScope,
    pub path: PathBuf,
    values: Map<String, Value>,
}

impl SettingsLayer {
    pub fn new(scope: SettingsScope, path: PathBuf, values: Map<String, Value>) -> Self {
        Self { scope, path, values }
    }

    /// Parse settings text, accepting comments and trailing commas.
    pub fn parse(scope: SettingsScope, path: PathBuf, text: &str) -> Result<Self> {
        let sanitized = sanitize_settings_json(text);
        if sanitized.trim().is_empty() {
            return Ok(Self::new(scope, path, Map::new()));
        }

        let value: Value = serde_json::from_str(&sanitized)
            .map_err(|e| RlsConfigError::settings_parse(&path, e.to_string()))?;

        match value {
            Value::Object(values) => Ok(Self::new(scope, path, values)),
            _ => Err(RlsConfigError::settings_parse(
                &path,
                "top-level value must be a JSON object",
            )),
        }
    }

    /// Resolve a dotted key, either stored flat or as nested objects.
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        lookup_in(&self.values, key)
    }
}

fn lookup_in<'a>(values: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    if let Some(value) = values.get(key) {
        return Some(value);
    }

    for (idx, _) in key.match_indices('.') {
        let (head, rest) = (&key[..idx], &key[idx + 1..]);
        if let Some(Value::Object(nested)) = values.get(head) {
            if let Some(value) = lookup_in(nested, rest) {
                return Some(value);
            }
        }
    }

    None
}

/// User and workspace settings, resolved with workspace precedence
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkspaceConfiguration {
    /// Lowest precedence first
    layers: Vec<SettingsLayer>,
}

impl WorkspaceConfiguration {
    pub fn from_layers(layers: Vec<SettingsLayer>) -> Self {
        Self { layers }
    }

    /// Read the user settings file and the workspace folder's settings.
    ///
    /// Files that do not exist are skipped. Files that exist but cannot be
    /// read or parsed are errors.
    pub async fn load(user_settings: Option<&Path>, workspace_folder: Option<&Path>) -> Result<Self> {
        let mut layers = Vec::new();

        if let Some(path) = user_settings {
            if let Some(layer) = read_layer(SettingsScope::User, path).await? {
                layers.push(layer);
            }
        }

        if let Some(folder) = workspace_folder {
            let path = Self::workspace_settings_path(folder);
            if let Some(layer) = read_layer(SettingsScope::Workspace, &path).await? {
                layers.push(layer);
            }
        }

        info!("Resolved settings from {} file(s)", layers.len());
        Ok(Self { layers })
    }

    /// Load using the platform's user settings location.
    pub async fn load_default(workspace_folder: Option<&Path>) -> Result<Self> {
        let user_settings = Self::default_user_settings_path()?;
        Self::load(Some(user_settings.as_path()), workspace_folder).await
    }

    /// Files that contributed settings, lowest precedence first
    pub fn sources(&self) -> Vec<(SettingsScope, &Path)> {
        self.layers
            .iter()
            .map(|layer| (layer.scope, layer.path.as_path()))
            .collect()
    }

    /// Scope of the layer that supplies `key`, if any
    pub fn source_of(&self, key: &str) -> Option<SettingsScope> {
        self.layers
            .iter()
            .rev()
            .find(|layer| layer.lookup(key).is_some())
            .map(|layer| layer.scope)
    }

    pub fn workspace_settings_path(folder: &Path) -> PathBuf {
        folder.join(".vscode").join("settings.json")
    }

    pub fn default_user_settings_path() -> Result<PathBuf> {
        // Use XDG Base Directory specification on Linux and macOS
        // On Windows, use the platform-appropriate config directory
        #[cfg(any(target_os = "linux", target_os = "macos"))]
        {
            use std::env;
            let config_dir = if let Ok(xdg_config_home) = env::var("XDG_CONFIG_HOME") {
                PathBuf::from(xdg_config_home)
            } else {
                let home_dir = env::var("HOME")
                    .map_err(|_| RlsConfigError::config("HOME environment variable not set"))?;
                PathBuf::from(home_dir).join(".config")
            };
            Ok(config_dir.join("Code").join("User").join("settings.json"))
        }

        #[cfg(not(any(target_os = "linux", target_os = "macos")))]
        {
            let config_dir = dirs::config_dir()
                .ok_or_else(|| RlsConfigError::config("Unable to determine config directory"))?;
            Ok(config_dir.join("Code").join("User").join("settings.json"))
        }
    }
}

impl ConfigurationAccessor for WorkspaceConfiguration {
    fn inspect(&self, key: &str) -> Option<Value> {
        self.layers
            .iter()
            .rev()
            .find_map(|layer| layer.lookup(key))
            .cloned()
    }
}

async fn read_layer(scope: SettingsScope, path: &Path) -> Result<Option<SettingsLayer>> {
    let exists = tokio::fs::try_exists(path)
        .await
        .map_err(|e| RlsConfigError::settings_read(path, e))?;
    if !exists {
        debug!("No {} settings at {}", scope, path.display());
        return Ok(None);
    }

    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| RlsConfigError::settings_read(path, e))?;
    let layer = SettingsLayer::parse(scope, path.to_path_buf(), &contents)?;
    debug!("Loaded {} settings from {}", scope, path.display());
    Ok(Some(layer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn layer(scope: SettingsScope, value: Value) -> SettingsLayer {
        match value {
            Value::Object(values) => SettingsLayer::new(scope, PathBuf::from("settings.json"), values),
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_flat_and_nested_keys_resolve_the_same() {
        let flat = layer(SettingsScope::User, json!({"rust-client.showStdOut": true}));
        let nested = layer(SettingsScope::User, json!({"rust-client": {"showStdOut": true}}));

        assert_eq!(flat.lookup("rust-client.showStdOut"), Some(&json!(true)));
        assert_eq!(nested.lookup("rust-client.showStdOut"), Some(&json!(true)));
        assert_eq!(nested.lookup("rust-client.showStdErr"), None);
    }

    #[test]
    fn test_flat_key_wins_over_nested() {
        let both = layer(
            SettingsScope::User,
            json!({"rls.path": "/flat", "rls": {"path": "/nested"}}),
        );
        assert_eq!(both.lookup("rls.path"), Some(&json!("/flat")));
    }

    #[test]
    fn test_workspace_overrides_user() {
        let config = WorkspaceConfiguration::from_layers(vec![
            layer(
                SettingsScope::User,
                json!({"rust-client.logToFile": true, "rls.path": "/user/rls"}),
            ),
            layer(SettingsScope::Workspace, json!({"rls.path": "/workspace/rls"})),
        ]);

        assert!(config.get("rust-client.logToFile", false));
        assert_eq!(
            config.get::<Option<String>>("rls.path", None),
            Some("/workspace/rls".to_string())
        );
        assert_eq!(config.source_of("rls.path"), Some(SettingsScope::Workspace));
        assert_eq!(config.source_of("rust-client.logToFile"), Some(SettingsScope::User));
        assert_eq!(config.source_of("rls.root"), None);
    }

    #[test]
    fn test_parse_rejects_non_object() {
        let err = SettingsLayer::parse(SettingsScope::User, PathBuf::from("s.json"), "[1, 2]").unwrap_err();
        assert!(matches!(err, RlsConfigError::SettingsParse { .. }));
    }

    #[test]
    fn test_parse_accepts_empty_file() {
        let layer = SettingsLayer::parse(SettingsScope::User, PathBuf::from("s.json"), "  // nothing\n").unwrap();
        assert_eq!(layer.lookup("rls.path"), None);
    }

    #[tokio::test]
    async fn test_load_missing_files_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.json");
        let config = WorkspaceConfiguration::load(Some(missing.as_path()), Some(temp_dir.path()))
            .await
            .unwrap();

        assert!(config.sources().is_empty());
        assert_eq!(config.inspect("rls.path"), None);
    }

    #[tokio::test]
    async fn test_load_reads_workspace_folder() {
        let temp_dir = TempDir::new().unwrap();
        let settings_path = WorkspaceConfiguration::workspace_settings_path(temp_dir.path());
        tokio::fs::create_dir_all(settings_path.parent().unwrap()).await.unwrap();
        tokio::fs::write(
            &settings_path,
            "{\n  // local override\n  \"rls.root\": \"/src/rls\",\n}\n",
        )
        .await
        .unwrap();

        let config = WorkspaceConfiguration::load(None, Some(temp_dir.path())).await.unwrap();

        assert_eq!(config.sources(), vec![(SettingsScope::Workspace, settings_path.as_path())]);
        assert_eq!(config.inspect("rls.root"), Some(json!("/src/rls")));
    }
}
