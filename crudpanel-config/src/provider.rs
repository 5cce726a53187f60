//! Framework defaults provider using Figment

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use tracing::{debug, trace};

use crate::defaults::FrameworkDefaults;
use crate::error::{ConfigError, Result};

/// File stem looked up by `ConfigProvider::discover`.
pub const CONFIG_FILE_STEM: &str = "crudpanel";

/// Environment variable prefix. Nested keys split on `__`.
pub const ENV_PREFIX: &str = "CRUDPANEL_";

const EXTENSIONS: [&str; 4] = ["toml", "yaml", "yml", "json"];

/// Loads `FrameworkDefaults` from layered sources.
///
/// Sources are merged in precedence order (later sources override earlier ones):
/// 1. Built-in defaults
/// 2. An optional configuration file (TOML, YAML or JSON)
/// 3. Environment variables prefixed `CRUDPANEL_`
#[derive(Debug, Default)]
pub struct ConfigProvider {
    file: Option<PathBuf>,
    skip_env: bool,
}

impl ConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit configuration file.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Look for `crudpanel.{toml,yaml,yml,json}` in a directory.
    pub fn discover(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let file = EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{CONFIG_FILE_STEM}.{ext}")))
            .find(|path| path.is_file());
        debug!(?dir, ?file, "configuration file discovery");
        Self {
            file,
            skip_env: false,
        }
    }

    /// Ignore environment variables.
    pub fn without_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Load the merged defaults.
    pub fn load(&self) -> Result<FrameworkDefaults> {
        let figment = self.build_figment()?;
        let defaults: FrameworkDefaults = figment.extract()?;
        debug!(route_root = %defaults.route_root, per_page = defaults.per_page, "framework defaults loaded");
        Ok(defaults)
    }

    fn build_figment(&self) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(FrameworkDefaults::default()));

        if let Some(path) = &self.file {
            trace!(?path, "merging configuration file");
            figment = match path.extension().and_then(|e| e.to_str()) {
                Some("toml") => figment.merge(Toml::file(path)),
                Some("yaml") | Some("yml") => figment.merge(Yaml::file(path)),
                Some("json") => figment.merge(Json::file(path)),
                _ => return Err(ConfigError::UnsupportedFormat { path: path.clone() }),
            };
        }

        if !self.skip_env {
            figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        }

        Ok(figment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn builtin_defaults_without_sources() {
        let defaults = ConfigProvider::new().without_env().load().unwrap();
        assert_eq!(defaults, FrameworkDefaults::default());
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("crudpanel.toml");
        fs::write(
            &path,
            "route_root = \"backend\"\nper_page = 50\n\n[permissions]\nread = true\n",
        )
        .unwrap();

        let defaults = ConfigProvider::new()
            .with_file(&path)
            .without_env()
            .load()
            .unwrap();
        assert_eq!(defaults.route_root, "backend");
        assert_eq!(defaults.per_page, 50);
        assert_eq!(defaults.permissions.get("read"), Some(&true));
        // untouched keys keep their defaults
        assert_eq!(defaults.sort_by_default, "id.desc");
        assert_eq!(defaults.permissions.get("update"), Some(&false));
    }

    #[test]
    fn yaml_file_is_discovered() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("crudpanel.yaml"),
            "per_page: 5\nexpand_form_container: true\n",
        )
        .unwrap();

        let provider = ConfigProvider::discover(tmp.path()).without_env();
        assert!(provider.file().is_some());
        let defaults = provider.load().unwrap();
        assert_eq!(defaults.per_page, 5);
        assert!(defaults.expand_form_container);
    }

    #[test]
    fn discover_without_file() {
        let tmp = TempDir::new().unwrap();
        let provider = ConfigProvider::discover(tmp.path());
        assert!(provider.file().is_none());
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("crudpanel.ini");
        fs::write(&path, "per_page=1").unwrap();
        let err = ConfigProvider::new().with_file(&path).load().unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));
    }

    #[test]
    fn malformed_value_is_a_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("crudpanel.json");
        fs::write(&path, r#"{"per_page": "many"}"#).unwrap();
        let err = ConfigProvider::new()
            .with_file(&path)
            .without_env()
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    #[serial]
    fn env_overrides_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("crudpanel.json");
        fs::write(&path, r#"{"per_page": 10}"#).unwrap();

        std::env::set_var("CRUDPANEL_PER_PAGE", "99");
        std::env::set_var("CRUDPANEL_PERMISSIONS__DELETE", "true");
        let result = ConfigProvider::new().with_file(&path).load();
        std::env::remove_var("CRUDPANEL_PER_PAGE");
        std::env::remove_var("CRUDPANEL_PERMISSIONS__DELETE");

        let defaults = result.unwrap();
        assert_eq!(defaults.per_page, 99);
        assert_eq!(defaults.permissions.get("delete"), Some(&true));
    }
}
