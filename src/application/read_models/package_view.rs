//! Package-level views

/// Resolution status of a package as shown in reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageStatus {
    Resolved,
    ManualReview,
}

impl PackageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageStatus::Resolved => "resolved",
            PackageStatus::ManualReview => "manual-review",
        }
    }
}

/// View of one package's outcome
///
/// Exactly one of `evidence` and `failure` is set, matching `status`.
#[derive(Debug, Clone)]
pub struct PackageView {
    pub name: String,
    pub status: PackageStatus,
    pub evidence: Option<EvidenceView>,
    pub failure: Option<FailureView>,
}

/// Where license files were found and their names
#[derive(Debug, Clone)]
pub struct EvidenceView {
    /// `installed-local` or `upstream-archive`
    pub provenance: String,
    /// Directory path or source URL
    pub location: String,
    pub license_files: Vec<String>,
}

/// Why a package needs manual review
#[derive(Debug, Clone)]
pub struct FailureView {
    pub stage: String,
    pub detail: String,
}
