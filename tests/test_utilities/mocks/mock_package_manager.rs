use async_trait::async_trait;
use conda_license_audit::prelude::*;
use std::collections::HashMap;
use std::path::PathBuf;

/// Mock PackageManager serving fixed explicit lists per environment
pub struct MockPackageManager {
    environments: HashMap<String, Vec<String>>,
    store_root: PathBuf,
}

impl MockPackageManager {
    pub fn new(store_root: impl Into<PathBuf>) -> Self {
        Self {
            environments: HashMap::new(),
            store_root: store_root.into(),
        }
    }

    pub fn with_environment(mut self, name: &str, lines: &[&str]) -> Self {
        self.environments.insert(
            name.to_string(),
            lines.iter().map(|line| line.to_string()).collect(),
        );
        self
    }
}

#[async_trait]
impl PackageManager for MockPackageManager {
    async fn list_environments(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.environments.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    async fn list_explicit_packages(&self, environment: &str) -> Result<Vec<String>> {
        self.environments.get(environment).cloned().ok_or_else(|| {
            AuditError::enumeration(format!("environment '{}' does not exist", environment))
                .into()
        })
    }

    async fn package_store_root(&self) -> Result<PathBuf> {
        Ok(self.store_root.clone())
    }
}
