use super::recipe_metadata_client::describe_request_error;
use crate::license_resolution::domain::{
    is_license_name, LicenseEntry, LicenseEvidence, Provenance, RecipeMetadata,
};
use crate::ports::outbound::ArchiveLicenseSource;
use crate::shared::error::ResolutionError;
use crate::shared::ResolutionResult;
use async_trait::async_trait;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom, Write};

/// Default cap on a downloaded source archive (512 MB)
pub const DEFAULT_MAX_ARCHIVE_BYTES: u64 = 512 * 1024 * 1024;

/// Default cap on a single buffered license member (4 MB)
pub const DEFAULT_MAX_ENTRY_BYTES: u64 = 4 * 1024 * 1024;

/// HttpArchiveLicenseScanner adapter for upstream `.tar.gz` source archives
///
/// The archive is streamed into an anonymous temporary file, which the OS
/// removes as soon as the handle is dropped. Decompression runs on the
/// blocking pool. Matching members are copied into memory while the archive
/// is open, so the file is gone by the time evidence is returned.
pub struct HttpArchiveLicenseScanner {
    client: reqwest::Client,
    max_archive_bytes: u64,
    max_entry_bytes: u64,
}

impl HttpArchiveLicenseScanner {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            max_archive_bytes: DEFAULT_MAX_ARCHIVE_BYTES,
            max_entry_bytes: DEFAULT_MAX_ENTRY_BYTES,
        }
    }

    pub fn with_max_archive_bytes(mut self, max_archive_bytes: u64) -> Self {
        self.max_archive_bytes = max_archive_bytes;
        self
    }

    pub fn with_max_entry_bytes(mut self, max_entry_bytes: u64) -> Self {
        self.max_entry_bytes = max_entry_bytes;
        self
    }

    /// Streams `url` into a rewound temporary file
    async fn download(&self, url: &str) -> ResolutionResult<File> {
        let fetch_error = |details: String| ResolutionError::ArchiveFetchError {
            url: url.to_string(),
            details,
        };
        let too_large = || {
            fetch_error(format!(
                "archive exceeds the {} byte limit",
                self.max_archive_bytes
            ))
        };

        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_error(describe_request_error(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(format!("server returned status {}", status)));
        }

        if response
            .content_length()
            .is_some_and(|length| length > self.max_archive_bytes)
        {
            return Err(too_large());
        }

        let mut file = tempfile::tempfile()
            .map_err(|e| fetch_error(format!("cannot create temporary file: {}", e)))?;
        let mut written: u64 = 0;

        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| fetch_error(describe_request_error(&e)))?
        {
            written += chunk.len() as u64;
            if written > self.max_archive_bytes {
                return Err(too_large());
            }
            file.write_all(&chunk)
                .map_err(|e| fetch_error(format!("cannot write temporary file: {}", e)))?;
        }

        file.seek(SeekFrom::Start(0))
            .map_err(|e| fetch_error(format!("cannot rewind temporary file: {}", e)))?;
        Ok(file)
    }
}

/// Collects regular-file members whose path contains `LICENSE`, in archive order
fn collect_license_members<R: Read>(
    reader: R,
    max_entry_bytes: u64,
) -> io::Result<Vec<LicenseEntry>> {
    let mut archive = tar::Archive::new(GzDecoder::new(reader));
    let mut entries = Vec::new();

    for entry in archive.entries()? {
        let mut entry = entry?;
        if !entry.header().entry_type().is_file() {
            continue;
        }

        let path = entry.path()?.to_string_lossy().into_owned();
        if !is_license_name(&path) {
            continue;
        }

        let mut bytes = Vec::new();
        entry.by_ref().take(max_entry_bytes).read_to_end(&mut bytes)?;
        entries.push(LicenseEntry::from_bytes(path, bytes));
    }

    Ok(entries)
}

#[async_trait]
impl ArchiveLicenseSource for HttpArchiveLicenseScanner {
    async fn scan_archive(
        &self,
        metadata: &RecipeMetadata,
    ) -> ResolutionResult<Option<LicenseEvidence>> {
        let url = metadata.source_url().to_string();
        let file = self.download(&url).await?;
        let max_entry_bytes = self.max_entry_bytes;

        let scanned = tokio::task::spawn_blocking(move || {
            collect_license_members(BufReader::new(file), max_entry_bytes)
        })
        .await;

        let entries = match scanned {
            Ok(Ok(entries)) => entries,
            Ok(Err(e)) => {
                return Err(ResolutionError::ArchiveFetchError {
                    url,
                    details: format!("cannot read gzip tar archive: {}", e),
                })
            }
            Err(e) => {
                return Err(ResolutionError::ArchiveFetchError {
                    url,
                    details: format!("archive scan task failed: {}", e),
                })
            }
        };

        Ok(LicenseEvidence::from_entries(
            metadata.package_name().to_string(),
            Provenance::UpstreamArchive { source_url: url },
            entries,
        ))
    }
}
