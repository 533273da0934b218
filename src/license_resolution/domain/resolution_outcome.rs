use crate::license_resolution::domain::LicenseEvidence;
use crate::shared::error::ResolutionError;
use std::fmt;

/// Stage at which resolution of a package stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureStage {
    /// The archive identifier never parsed
    MalformedReference,
    UnresolvedHost,
    ArchiveNotFound,
    NoLicenseFound,
    MetadataFetchError,
}

impl FailureStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureStage::MalformedReference => "malformed-reference",
            FailureStage::UnresolvedHost => "unresolved-host",
            FailureStage::ArchiveNotFound => "archive-not-found",
            FailureStage::NoLicenseFound => "no-license-found",
            FailureStage::MetadataFetchError => "metadata-fetch-error",
        }
    }
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&ResolutionError> for FailureStage {
    fn from(error: &ResolutionError) -> Self {
        match error {
            ResolutionError::MalformedReference { .. } => FailureStage::MalformedReference,
            ResolutionError::UnresolvedHost { .. } => FailureStage::UnresolvedHost,
            ResolutionError::MetadataFetchError { .. }
            | ResolutionError::UnexpectedArchiveFormat { .. } => FailureStage::MetadataFetchError,
            ResolutionError::ArchiveFetchError { .. } => FailureStage::ArchiveNotFound,
            ResolutionError::NoLicenseFound { .. } => FailureStage::NoLicenseFound,
        }
    }
}

/// A package whose license could not be resolved automatically
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionFailure {
    package_name: String,
    stage: FailureStage,
    detail: String,
}

impl ResolutionFailure {
    pub fn new(package_name: String, stage: FailureStage, detail: String) -> Self {
        Self {
            package_name,
            stage,
            detail,
        }
    }

    /// Converts a stage error into a failure record for `package_name`
    pub fn from_error(package_name: &str, error: &ResolutionError) -> Self {
        Self::new(package_name.to_string(), error.into(), error.to_string())
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn stage(&self) -> FailureStage {
        self.stage
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

/// Terminal outcome of one package: DONE or MANUAL_REVIEW
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    Resolved(LicenseEvidence),
    ManualReview(ResolutionFailure),
}

impl ResolutionOutcome {
    pub fn package_name(&self) -> &str {
        match self {
            ResolutionOutcome::Resolved(evidence) => evidence.package_name(),
            ResolutionOutcome::ManualReview(failure) => failure.package_name(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, ResolutionOutcome::Resolved(_))
    }

    pub fn evidence(&self) -> Option<&LicenseEvidence> {
        match self {
            ResolutionOutcome::Resolved(evidence) => Some(evidence),
            ResolutionOutcome::ManualReview(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&ResolutionFailure> {
        match self {
            ResolutionOutcome::Resolved(_) => None,
            ResolutionOutcome::ManualReview(failure) => Some(failure),
        }
    }
}

/// One outcome per input package, in input order
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    outcomes: Vec<ResolutionOutcome>,
}

impl BatchReport {
    pub fn new(outcomes: Vec<ResolutionOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[ResolutionOutcome] {
        &self.outcomes
    }

    pub fn into_outcomes(self) -> Vec<ResolutionOutcome> {
        self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn resolved(&self) -> impl Iterator<Item = &LicenseEvidence> {
        self.outcomes.iter().filter_map(ResolutionOutcome::evidence)
    }

    pub fn manual_review(&self) -> impl Iterator<Item = &ResolutionFailure> {
        self.outcomes.iter().filter_map(ResolutionOutcome::failure)
    }

    pub fn resolved_count(&self) -> usize {
        self.resolved().count()
    }

    pub fn unresolved_count(&self) -> usize {
        self.manual_review().count()
    }
}
