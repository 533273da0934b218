//! Configuration file support for conda-license-audit.
//!
//! Provides YAML-based configuration through `conda-license-audit.config.yml`
//! files, including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::application::dto::OutputFormat;
use crate::license_resolution::policies::ProviderTable;
use crate::shared::security::{validate_regular_file, MAX_CONFIG_FILE_SIZE};
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "conda-license-audit.config.yml";

/// Upper bound for `concurrency`, from the CLI or the config file
pub const MAX_CONCURRENCY: usize = 64;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub concurrency: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub conda_exe: Option<PathBuf>,
    pub pkgs_dir: Option<PathBuf>,
    pub max_archive_mb: Option<u64>,
    /// Extra recipe providers: channel host to `meta.yaml` URL template with `{name}`
    pub providers: Option<BTreeMap<String, String>>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    /// Default providers plus the ones configured here; configured hosts win.
    pub fn provider_table(&self) -> Result<ProviderTable> {
        let mut table = ProviderTable::default();
        if let Some(providers) = &self.providers {
            for (host, template) in providers {
                table = table.with_provider(host, template)?;
            }
        }
        Ok(table)
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    validate_regular_file(path, "config file", MAX_CONFIG_FILE_SIZE).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref format) = config.format {
        if let Err(e) = OutputFormat::from_str(format) {
            bail!("Invalid config: format: {}", e);
        }
    }

    if let Some(concurrency) = config.concurrency {
        if concurrency == 0 || concurrency > MAX_CONCURRENCY {
            bail!(
                "Invalid config: concurrency must be between 1 and {} (got {}).",
                MAX_CONCURRENCY,
                concurrency
            );
        }
    }

    if config.timeout_secs == Some(0) {
        bail!("Invalid config: timeout_secs must be greater than 0.");
    }

    if config.max_archive_mb == Some(0) {
        bail!("Invalid config: max_archive_mb must be greater than 0.");
    }

    config.provider_table().map_err(|e| {
        anyhow::anyhow!(
            "Invalid config: providers: {}\n\n\
             💡 Hint: Each provider maps a channel host (e.g. \"conda.example.com\") to a URL template containing {{name}}.",
            e
        )
    })?;

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, content).unwrap();
        config_path
    }

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(
            &dir,
            r#"
format: json
concurrency: 4
timeout_secs: 60
conda_exe: /opt/conda/bin/conda
pkgs_dir: /opt/conda/pkgs
max_archive_mb: 128
providers:
  conda.example.com: "https://git.example.com/recipes/{name}/meta.yaml"
"#,
        );

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.format.as_deref(), Some("json"));
        assert_eq!(config.concurrency, Some(4));
        assert_eq!(config.timeout_secs, Some(60));
        assert_eq!(config.conda_exe, Some(PathBuf::from("/opt/conda/bin/conda")));
        assert_eq!(config.pkgs_dir, Some(PathBuf::from("/opt/conda/pkgs")));
        assert_eq!(config.max_archive_mb, Some(128));

        let table = config.provider_table().unwrap();
        assert_eq!(
            table.metadata_url("conda.example.com", "zlib").as_deref(),
            Some("https://git.example.com/recipes/zlib/meta.yaml")
        );
        assert!(table.contains_host("conda.anaconda.org"));
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "format: text\n").unwrap();

        let config = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.format.as_deref(), Some("text"));
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(discover_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config_from_path(Path::new("/nonexistent/config.yml")).unwrap_err();
        assert!(format!("{}", err).contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, "invalid: yaml: [[[broken");

        let err = load_config_from_path(&config_path).unwrap_err();
        assert!(format!("{}", err).contains("Failed to parse config file"));
    }

    #[test]
    fn test_invalid_format_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, "format: markdown\n");

        let err = load_config_from_path(&config_path).unwrap_err();
        assert!(format!("{}", err).contains("Invalid config: format"));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, "concurrency: 0\n");

        let err = load_config_from_path(&config_path).unwrap_err();
        assert!(format!("{}", err).contains("concurrency must be between 1 and 64"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, "timeout_secs: 0\n");

        let err = load_config_from_path(&config_path).unwrap_err();
        assert!(format!("{}", err).contains("timeout_secs"));
    }

    #[test]
    fn test_provider_without_placeholder_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(
            &dir,
            "providers:\n  conda.example.com: \"https://git.example.com/meta.yaml\"\n",
        );

        let err = load_config_from_path(&config_path).unwrap_err();
        let message = format!("{}", err);
        assert!(message.contains("Invalid config: providers"));
        assert!(message.contains("{name}"));
    }

    #[test]
    fn test_unknown_fields_are_captured() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, "format: json\nexclude_packages: [pip]\n");

        let config = load_config_from_path(&config_path).unwrap();
        assert!(config.unknown_fields.contains_key("exclude_packages"));
    }

    #[test]
    fn test_config_directory_rejected() {
        let dir = TempDir::new().unwrap();
        let err = load_config_from_path(dir.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("not a regular file"));
    }
}
