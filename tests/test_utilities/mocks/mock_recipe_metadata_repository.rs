use async_trait::async_trait;
use conda_license_audit::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock RecipeMetadataRepository answering from an in-memory table
///
/// Packages registered with `with_recipe` resolve to a `.tar.gz` source
/// URL; `with_failure` makes a package fail its metadata fetch. Any
/// other package on a host outside `hosts` is an `UnresolvedHost`.
pub struct MockRecipeMetadataRepository {
    hosts: Vec<String>,
    recipes: HashMap<String, (String, String)>,
    failures: HashMap<String, String>,
    calls: Arc<AtomicUsize>,
}

impl MockRecipeMetadataRepository {
    pub fn new(hosts: &[&str]) -> Self {
        Self {
            hosts: hosts.iter().map(|host| host.to_string()).collect(),
            recipes: HashMap::new(),
            failures: HashMap::new(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Registers `source_url` as the upstream archive for `name`
    pub fn with_recipe(mut self, name: &str, source_url: &str) -> Self {
        let filename = source_url
            .rsplit('/')
            .next()
            .unwrap_or(source_url)
            .to_string();
        self.recipes
            .insert(name.to_string(), (source_url.to_string(), filename));
        self
    }

    pub fn with_failure(mut self, name: &str, details: &str) -> Self {
        self.failures.insert(name.to_string(), details.to_string());
        self
    }

    /// Shared fetch counter, readable after the mock moves into a use case
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl RecipeMetadataRepository for MockRecipeMetadataRepository {
    async fn fetch_recipe_metadata(
        &self,
        reference: &PackageReference,
    ) -> ResolutionResult<RecipeMetadata> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if !self.hosts.iter().any(|host| host == reference.host()) {
            return Err(ResolutionError::UnresolvedHost {
                host: reference.host().to_string(),
            });
        }

        let url = format!("mock://{}/{}/meta.yaml", reference.host(), reference.name());
        if let Some(details) = self.failures.get(reference.name()) {
            return Err(ResolutionError::MetadataFetchError {
                url,
                details: details.clone(),
            });
        }

        match self.recipes.get(reference.name()) {
            Some((source_url, filename)) => RecipeMetadata::new(
                reference.name().to_string(),
                source_url.clone(),
                filename,
            ),
            None => Err(ResolutionError::MetadataFetchError {
                url,
                details: "HTTP 404 Not Found".to_string(),
            }),
        }
    }
}
