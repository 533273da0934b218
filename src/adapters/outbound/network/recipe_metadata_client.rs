use crate::license_resolution::domain::{PackageReference, RecipeMetadata};
use crate::license_resolution::policies::ProviderTable;
use crate::license_resolution::services::RecipeReader;
use crate::ports::outbound::RecipeMetadataRepository;
use crate::shared::error::ResolutionError;
use crate::shared::security::validate_url_component;
use crate::shared::{ResolutionResult, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Renders a reqwest failure as a short cause for a failure record
pub(crate) fn describe_request_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_connect() {
        format!("connection failed: {}", error)
    } else {
        error.to_string()
    }
}

/// Builds the shared HTTP client: one user agent, one per-request timeout
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client> {
    let user_agent = format!("conda-license-audit/{}", env!("CARGO_PKG_VERSION"));
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// HttpRecipeMetadataRepository adapter fetching `meta.yaml` recipes
///
/// The package's channel host selects a URL template from the provider
/// table; the templated document is fetched once, without retries, and
/// read into `RecipeMetadata`.
pub struct HttpRecipeMetadataRepository {
    client: reqwest::Client,
    providers: Arc<ProviderTable>,
}

impl HttpRecipeMetadataRepository {
    pub fn new(client: reqwest::Client, providers: Arc<ProviderTable>) -> Self {
        Self { client, providers }
    }

    /// Metadata URL for `reference`, or `UnresolvedHost` if no provider serves its host
    fn metadata_url(&self, reference: &PackageReference) -> ResolutionResult<String> {
        if !self.providers.contains_host(reference.host()) {
            return Err(ResolutionError::UnresolvedHost {
                host: reference.host().to_string(),
            });
        }

        let name = reference.name();
        validate_url_component(name, "Package name").map_err(|e| {
            ResolutionError::MetadataFetchError {
                url: reference.host().to_string(),
                details: e.to_string(),
            }
        })?;

        let encoded = urlencoding::encode(name);
        self.providers
            .metadata_url(reference.host(), &encoded)
            .ok_or_else(|| ResolutionError::UnresolvedHost {
                host: reference.host().to_string(),
            })
    }

    async fn fetch_document(&self, url: &str) -> ResolutionResult<String> {
        let fetch_error = |details: String| ResolutionError::MetadataFetchError {
            url: url.to_string(),
            details,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_error(describe_request_error(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(format!("server returned status {}", status)));
        }

        response
            .text()
            .await
            .map_err(|e| fetch_error(describe_request_error(&e)))
    }
}

#[async_trait]
impl RecipeMetadataRepository for HttpRecipeMetadataRepository {
    async fn fetch_recipe_metadata(
        &self,
        reference: &PackageReference,
    ) -> ResolutionResult<RecipeMetadata> {
        let url = self.metadata_url(reference)?;
        let document = self.fetch_document(&url).await?;
        RecipeReader::read(reference.name(), &url, &document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::license_resolution::services::ReferenceParser;

    fn repository() -> HttpRecipeMetadataRepository {
        let client = build_http_client(Duration::from_secs(5)).unwrap();
        HttpRecipeMetadataRepository::new(client, Arc::new(ProviderTable::default()))
    }

    #[test]
    fn test_metadata_url_conda_forge() {
        let reference = ReferenceParser::parse(
            "https://conda.anaconda.org/conda-forge/noarch/six-1.10.0-py_1.tar.bz2",
        )
        .unwrap();

        assert_eq!(
            repository().metadata_url(&reference).unwrap(),
            "https://raw.githubusercontent.com/conda-forge/six-feedstock/master/recipe/meta.yaml"
        );
    }

    #[test]
    fn test_metadata_url_continuum() {
        let reference = ReferenceParser::parse(
            "https://repo.continuum.io/pkgs/free/linux-64/cycler-0.10.0-py36_0.tar.bz2",
        )
        .unwrap();

        assert_eq!(
            repository().metadata_url(&reference).unwrap(),
            "https://raw.githubusercontent.com/ContinuumIO/anaconda-recipes/master/cycler/meta.yaml"
        );
    }

    #[tokio::test]
    async fn test_unknown_host_is_unresolved_without_network() {
        let reference = ReferenceParser::parse(
            "https://example.org/channel/linux-64/foo-1.0-0.tar.bz2",
        )
        .unwrap();

        let result = repository().fetch_recipe_metadata(&reference).await;
        assert!(matches!(
            result,
            Err(ResolutionError::UnresolvedHost { ref host }) if host == "example.org"
        ));
    }

    #[test]
    fn test_describe_request_error_is_not_empty() {
        let error = reqwest::Client::new().get("not a url").build().unwrap_err();
        assert!(!describe_request_error(&error).is_empty());
    }
}
