use crate::license_resolution::domain::{
    is_license_name, LicenseEntry, LicenseEvidence, PackageReference, Provenance,
};
use crate::ports::outbound::{LocalLicenseSource, LocalScan};
use crate::shared::Result;
use anyhow::Context;
use std::fs;
use std::io;
use std::path::Path;

/// Name of the metadata directory inside an extracted package
const INFO_DIR: &str = "info";

/// Subdirectory of `info` where conda-build copies the recipe's `license_file`s
const LICENSES_DIR: &str = "licenses";

/// FileSystemLicenseScanner adapter for the conda package store
///
/// Looks at `<store>/<name>-<version>-<build>/info`. Entries whose name
/// contains `LICENSE` are evidence, both directly in `info` and in
/// `info/licenses/`. Other files there (`COPYING`, `NOTICE`) are not.
pub struct FileSystemLicenseScanner;

impl FileSystemLicenseScanner {
    pub fn new() -> Self {
        Self
    }

    /// Sorted names of regular files in `directory` accepted by `keep`
    fn list_files(directory: &Path, keep: impl Fn(&str) -> bool) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let read_dir = fs::read_dir(directory)
            .with_context(|| format!("Failed to list {}", directory.display()))?;

        for entry in read_dir {
            let entry =
                entry.with_context(|| format!("Failed to list {}", directory.display()))?;
            let file_type = entry
                .file_type()
                .with_context(|| format!("Failed to stat {}", entry.path().display()))?;
            if file_type.is_dir() {
                continue;
            }

            // Non UTF-8 names cannot be matched against the marker
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if keep(&name) {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }
}

impl Default for FileSystemLicenseScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalLicenseSource for FileSystemLicenseScanner {
    fn scan(&self, store_root: &Path, reference: &PackageReference) -> Result<LocalScan> {
        let directory = store_root
            .join(reference.install_dir_name())
            .join(INFO_DIR);

        match fs::metadata(&directory) {
            Ok(metadata) if metadata.is_dir() => {}
            Ok(_) => anyhow::bail!("{} is not a directory", directory.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(LocalScan::NotInstalled { directory });
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to access {}", directory.display()));
            }
        }

        let mut names = Self::list_files(&directory, is_license_name)?;

        let licenses_dir = directory.join(LICENSES_DIR);
        if licenses_dir.is_dir() {
            names.extend(
                Self::list_files(&licenses_dir, is_license_name)?
                    .into_iter()
                    .map(|name| format!("{}/{}", LICENSES_DIR, name)),
            );
        }

        let entries = names
            .into_iter()
            .map(|name| LicenseEntry::from_file(&directory, name))
            .collect();

        let evidence = LicenseEvidence::from_entries(
            reference.name().to_string(),
            Provenance::InstalledLocal {
                directory: directory.clone(),
            },
            entries,
        );

        Ok(match evidence {
            Some(evidence) => LocalScan::Found(evidence),
            None => LocalScan::NoLicense { directory },
        })
    }
}
