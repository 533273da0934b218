use crate::license_resolution::domain::{PackageReference, RecipeMetadata};
use crate::ports::outbound::RecipeMetadataRepository;
use crate::shared::ResolutionResult;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// Recipes are per package name on a given channel host
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct CacheKey {
    host: String,
    package_name: String,
}

impl CacheKey {
    fn new(reference: &PackageReference) -> Self {
        Self {
            host: reference.host().to_string(),
            package_name: reference.name().to_string(),
        }
    }
}

/// CachingRecipeMetadataRepository wraps a RecipeMetadataRepository with an
/// in-memory cache.
///
/// Auditing several environments usually means the same packages on the
/// same hosts, so each recipe is fetched once per process. Only successes
/// are cached; a failed fetch is attempted again by the next caller.
pub struct CachingRecipeMetadataRepository<R: RecipeMetadataRepository> {
    inner: R,
    cache: Arc<DashMap<CacheKey, RecipeMetadata>>,
}

impl<R: RecipeMetadataRepository> CachingRecipeMetadataRepository<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: Arc::new(DashMap::new()),
        }
    }

    #[cfg(test)]
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl<R: RecipeMetadataRepository> RecipeMetadataRepository for CachingRecipeMetadataRepository<R> {
    async fn fetch_recipe_metadata(
        &self,
        reference: &PackageReference,
    ) -> ResolutionResult<RecipeMetadata> {
        let key = CacheKey::new(reference);

        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached.clone());
        }

        let metadata = self.inner.fetch_recipe_metadata(reference).await?;
        self.cache.insert(key, metadata.clone());
        Ok(metadata)
    }
}
