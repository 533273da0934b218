use crate::license_resolution::domain::{LicenseEvidence, PackageReference};
use crate::shared::Result;
use std::path::{Path, PathBuf};

/// Result of inspecting a package's installed metadata directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalScan {
    /// The `info` directory does not exist (package not extracted in the store)
    NotInstalled { directory: PathBuf },
    /// The directory exists but holds no `LICENSE` entry
    NoLicense { directory: PathBuf },
    /// License entries were found
    Found(LicenseEvidence),
}

/// LocalLicenseSource port for license files bundled with an installed package
///
/// Local scans are cheap filesystem listings and run inline, so this
/// port is synchronous.
pub trait LocalLicenseSource: Send + Sync {
    /// Scans `<store_root>/<name>-<version>-<build>/info` for entries whose
    /// name contains `LICENSE`
    ///
    /// # Errors
    /// Returns an error only for I/O failures other than a missing
    /// directory; a missing directory is `LocalScan::NotInstalled`.
    fn scan(&self, store_root: &Path, reference: &PackageReference) -> Result<LocalScan>;
}
