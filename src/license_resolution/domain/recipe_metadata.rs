use crate::shared::error::ResolutionError;
use crate::shared::ResolutionResult;

/// Suffix every upstream source archive must carry
pub const UPSTREAM_ARCHIVE_SUFFIX: &str = ".tar.gz";

/// RecipeMetadata value object describing where a package's sources live
///
/// Produced by the metadata resolver and consumed once by the archive
/// scanner. The archive name is stored with its `.tar.gz` suffix stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeMetadata {
    package_name: String,
    source_url: String,
    archive_base: String,
}

impl RecipeMetadata {
    /// Builds metadata from a recipe's source entry.
    ///
    /// # Errors
    /// `UnexpectedArchiveFormat` when `archive_filename` does not end in
    /// `.tar.gz`. No other suffix is ever stripped.
    pub fn new(
        package_name: String,
        source_url: String,
        archive_filename: &str,
    ) -> ResolutionResult<Self> {
        let archive_base = archive_filename
            .strip_suffix(UPSTREAM_ARCHIVE_SUFFIX)
            .filter(|base| !base.is_empty())
            .ok_or_else(|| ResolutionError::UnexpectedArchiveFormat {
                filename: archive_filename.to_string(),
                expected: UPSTREAM_ARCHIVE_SUFFIX,
            })?;

        Ok(Self {
            package_name,
            source_url,
            archive_base: archive_base.to_string(),
        })
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// Archive name without its `.tar.gz` suffix
    pub fn archive_base(&self) -> &str {
        &self.archive_base
    }

    pub fn archive_filename(&self) -> String {
        format!("{}{}", self.archive_base, UPSTREAM_ARCHIVE_SUFFIX)
    }
}
