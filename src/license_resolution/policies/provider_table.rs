use crate::shared::error::AuditError;
use crate::shared::Result;
use std::collections::BTreeMap;

/// Placeholder substituted with the package name in a metadata URL template
pub const NAME_PLACEHOLDER: &str = "{name}";

/// ProviderTable - known package hosts and where their recipes live
///
/// Maps a channel host to a raw-content URL template for the recipe's
/// `meta.yaml`. Built once at startup and read-only afterwards; share it
/// behind an `Arc` rather than mutating it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderTable {
    templates: BTreeMap<String, String>,
}

impl ProviderTable {
    /// Table with no providers
    pub fn empty() -> Self {
        Self {
            templates: BTreeMap::new(),
        }
    }

    /// Returns a table with `host` mapped to `template`, replacing any previous entry.
    ///
    /// # Errors
    /// Returns a validation error if the host is blank or the template
    /// lacks the `{name}` placeholder.
    pub fn with_provider(mut self, host: &str, template: &str) -> Result<Self> {
        let host = host.trim();
        if host.is_empty() || host.contains('/') {
            return Err(AuditError::Validation {
                message: format!("Invalid provider host '{}'", host),
            }
            .into());
        }

        if !template.contains(NAME_PLACEHOLDER) {
            return Err(AuditError::Validation {
                message: format!(
                    "Metadata URL template for '{}' must contain the {} placeholder",
                    host, NAME_PLACEHOLDER
                ),
            }
            .into());
        }

        self.templates
            .insert(host.to_string(), template.to_string());
        Ok(self)
    }

    /// Metadata URL for `name` on `host`, or `None` if the host is unknown
    pub fn metadata_url(&self, host: &str, name: &str) -> Option<String> {
        self.templates
            .get(host)
            .map(|template| template.replace(NAME_PLACEHOLDER, name))
    }

    pub fn contains_host(&self, host: &str) -> bool {
        self.templates.contains_key(host)
    }

    pub fn hosts(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }
}

impl Default for ProviderTable {
    /// The two public providers: the Anaconda recipe repository and conda-forge feedstocks
    fn default() -> Self {
        let mut templates = BTreeMap::new();
        templates.insert(
            "repo.continuum.io".to_string(),
            "https://raw.githubusercontent.com/ContinuumIO/anaconda-recipes/master/{name}/meta.yaml"
                .to_string(),
        );
        templates.insert(
            "conda.anaconda.org".to_string(),
            "https://raw.githubusercontent.com/conda-forge/{name}-feedstock/master/recipe/meta.yaml"
                .to_string(),
        );
        Self { templates }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_conda_forge_url() {
        let table = ProviderTable::default();
        assert_eq!(
            table.metadata_url("conda.anaconda.org", "blas").as_deref(),
            Some("https://raw.githubusercontent.com/conda-forge/blas-feedstock/master/recipe/meta.yaml")
        );
    }

    #[test]
    fn test_default_continuum_url() {
        let table = ProviderTable::default();
        assert_eq!(
            table.metadata_url("repo.continuum.io", "six").as_deref(),
            Some("https://raw.githubusercontent.com/ContinuumIO/anaconda-recipes/master/six/meta.yaml")
        );
    }

    #[test]
    fn test_unknown_host() {
        let table = ProviderTable::default();
        assert!(table.metadata_url("example.org", "six").is_none());
        assert!(!table.contains_host("example.org"));
    }

    #[test]
    fn test_with_provider_adds_host() {
        let table = ProviderTable::default()
            .with_provider("repo.anaconda.com", "https://recipes.example.org/{name}.yaml")
            .unwrap();

        assert_eq!(table.hosts().count(), 3);
        assert_eq!(
            table.metadata_url("repo.anaconda.com", "zlib").as_deref(),
            Some("https://recipes.example.org/zlib.yaml")
        );
    }

    #[test]
    fn test_with_provider_requires_placeholder() {
        let result = ProviderTable::empty().with_provider("example.org", "https://example.org/meta.yaml");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("{name}"));
    }

    #[test]
    fn test_with_provider_rejects_blank_host() {
        let result = ProviderTable::empty().with_provider("  ", "https://example.org/{name}");
        assert!(result.is_err());
    }
}
