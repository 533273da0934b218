use async_trait::async_trait;
use conda_license_audit::prelude::*;
use std::collections::HashMap;

/// Mock ArchiveLicenseSource holding archive member lists keyed by source URL
///
/// URLs without registered members fail with `ArchiveFetchError`, as a
/// missing archive would.
#[derive(Default)]
pub struct MockArchiveLicenseSource {
    archives: HashMap<String, Vec<(String, String)>>,
}

impl MockArchiveLicenseSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the members of the archive at `source_url`
    pub fn with_archive(mut self, source_url: &str, members: &[(&str, &str)]) -> Self {
        self.archives.insert(
            source_url.to_string(),
            members
                .iter()
                .map(|(name, content)| (name.to_string(), content.to_string()))
                .collect(),
        );
        self
    }
}

#[async_trait]
impl ArchiveLicenseSource for MockArchiveLicenseSource {
    async fn scan_archive(
        &self,
        metadata: &RecipeMetadata,
    ) -> ResolutionResult<Option<LicenseEvidence>> {
        let members = self.archives.get(metadata.source_url()).ok_or_else(|| {
            ResolutionError::ArchiveFetchError {
                url: metadata.source_url().to_string(),
                details: "HTTP 404 Not Found".to_string(),
            }
        })?;

        let entries = members
            .iter()
            .filter(|(name, _)| name.contains("LICENSE"))
            .map(|(name, content)| LicenseEntry::from_bytes(name.clone(), content.clone().into_bytes()))
            .collect();

        Ok(LicenseEvidence::from_entries(
            metadata.package_name().to_string(),
            Provenance::UpstreamArchive {
                source_url: metadata.source_url().to_string(),
            },
            entries,
        ))
    }
}
