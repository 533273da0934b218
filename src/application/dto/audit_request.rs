use std::path::PathBuf;

/// AuditRequest - Input for auditing one environment
///
/// The package store root is explicit so that the same use case can audit
/// several environments against one store, or a store given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRequest {
    /// Environment name or prefix path
    pub environment: String,
    /// Directory holding extracted packages (`pkgs_dirs[0]` for conda)
    pub package_store_root: PathBuf,
}

impl AuditRequest {
    pub fn new(environment: impl Into<String>, package_store_root: impl Into<PathBuf>) -> Self {
        Self {
            environment: environment.into(),
            package_store_root: package_store_root.into(),
        }
    }
}
