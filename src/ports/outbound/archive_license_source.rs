use crate::license_resolution::domain::{LicenseEvidence, RecipeMetadata};
use crate::shared::ResolutionResult;
use async_trait::async_trait;

/// ArchiveLicenseSource port for license files inside an upstream source archive
#[async_trait]
pub trait ArchiveLicenseSource: Send + Sync {
    /// Downloads the archive described by `metadata` and collects its
    /// `LICENSE` members
    ///
    /// # Returns
    /// `Ok(None)` when the archive holds no matching member. Any temporary
    /// download is released before this returns, whatever the outcome.
    ///
    /// # Errors
    /// `ArchiveFetchError` if the archive cannot be downloaded or opened.
    async fn scan_archive(
        &self,
        metadata: &RecipeMetadata,
    ) -> ResolutionResult<Option<LicenseEvidence>>;
}
