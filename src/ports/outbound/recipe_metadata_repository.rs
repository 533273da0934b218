use crate::license_resolution::domain::{PackageReference, RecipeMetadata};
use crate::shared::ResolutionResult;
use async_trait::async_trait;

/// RecipeMetadataRepository port for locating a package's upstream source
///
/// # Async Support
/// Implementations must be `Send + Sync` so that packages of one batch can
/// be resolved concurrently.
#[async_trait]
pub trait RecipeMetadataRepository: Send + Sync {
    /// Fetches and reads the recipe metadata for `reference`
    ///
    /// # Errors
    /// - `UnresolvedHost` if the reference's host has no known provider
    /// - `MetadataFetchError` on network errors, timeouts, non-success
    ///   statuses or unreadable documents
    /// - `UnexpectedArchiveFormat` if the upstream archive is not a `.tar.gz`
    async fn fetch_recipe_metadata(
        &self,
        reference: &PackageReference,
    ) -> ResolutionResult<RecipeMetadata>;
}
