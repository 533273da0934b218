use crate::shared::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// PackageManager port for the package manager's own CLI
///
/// Failures here are `EnumerationError`s: they happen before any
/// package-level work and are the only errors allowed to abort a run.
#[async_trait]
pub trait PackageManager: Send + Sync {
    /// Lists the identifiers (prefix paths) of all known environments
    async fn list_environments(&self) -> Result<Vec<String>>;

    /// Lists the explicit package archive identifiers installed in `environment`
    ///
    /// Comment and directive lines are removed; every returned line is a
    /// candidate identifier and may still be malformed.
    async fn list_explicit_packages(&self, environment: &str) -> Result<Vec<String>>;

    /// Root directory of the package store (`pkgs_dirs[0]` for conda)
    async fn package_store_root(&self) -> Result<PathBuf>;
}
