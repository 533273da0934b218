use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Case-sensitive marker an entry name must contain to count as license-bearing
pub const LICENSE_MARKER: &str = "LICENSE";

pub fn is_license_name(name: &str) -> bool {
    name.contains(LICENSE_MARKER)
}

/// Where license evidence was obtained from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProvenanceKind {
    InstalledLocal,
    UpstreamArchive,
}

impl ProvenanceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProvenanceKind::InstalledLocal => "installed-local",
            ProvenanceKind::UpstreamArchive => "upstream-archive",
        }
    }
}

impl fmt::Display for ProvenanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provenance of a piece of evidence: the kind and its descriptor travel together
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    /// Found in the package's installed `info` directory
    InstalledLocal { directory: PathBuf },
    /// Extracted from the upstream source archive
    UpstreamArchive { source_url: String },
}

impl Provenance {
    pub fn kind(&self) -> ProvenanceKind {
        match self {
            Provenance::InstalledLocal { .. } => ProvenanceKind::InstalledLocal,
            Provenance::UpstreamArchive { .. } => ProvenanceKind::UpstreamArchive,
        }
    }

    /// Path or URL the evidence came from
    pub fn descriptor(&self) -> String {
        match self {
            Provenance::InstalledLocal { directory } => directory.display().to_string(),
            Provenance::UpstreamArchive { source_url } => source_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum LicenseContent {
    File(PathBuf),
    Buffered(Vec<u8>),
}

/// One license-bearing entry with a scoped read handle
///
/// Local entries open their file for the duration of a single read;
/// upstream entries hold the bytes captured while the archive was open.
/// Nothing stays open between reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseEntry {
    name: String,
    content: LicenseContent,
}

impl LicenseEntry {
    /// Entry backed by a file inside `directory`
    pub fn from_file(directory: &Path, name: String) -> Self {
        let path = directory.join(&name);
        Self {
            name,
            content: LicenseContent::File(path),
        }
    }

    /// Entry backed by bytes already read from an archive member
    pub fn from_bytes(name: String, bytes: Vec<u8>) -> Self {
        Self {
            name,
            content: LicenseContent::Buffered(bytes),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Opens a reader over the entry; dropping it releases the handle.
    pub fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        match &self.content {
            LicenseContent::File(path) => Ok(Box::new(File::open(path)?)),
            LicenseContent::Buffered(bytes) => Ok(Box::new(bytes.as_slice())),
        }
    }

    /// Reads the whole entry, replacing invalid UTF-8 sequences.
    pub fn read_to_string(&self) -> io::Result<String> {
        let mut bytes = Vec::new();
        self.open()?.read_to_end(&mut bytes)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// LicenseEvidence value object
///
/// Invariant: `entries` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseEvidence {
    package_name: String,
    provenance: Provenance,
    entries: Vec<LicenseEntry>,
}

impl LicenseEvidence {
    /// Returns `None` when `entries` is empty, since empty evidence is no evidence.
    pub fn from_entries(
        package_name: String,
        provenance: Provenance,
        entries: Vec<LicenseEntry>,
    ) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }

        Some(Self {
            package_name,
            provenance,
            entries,
        })
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    pub fn entries(&self) -> &[LicenseEntry] {
        &self.entries
    }

    pub fn entry_names(&self) -> Vec<&str> {
        self.entries.iter().map(LicenseEntry::name).collect()
    }
}
