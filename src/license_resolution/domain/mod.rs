pub mod audit_metadata;
pub mod license_evidence;
pub mod package_reference;
pub mod recipe_metadata;
pub mod resolution_outcome;

pub use audit_metadata::AuditMetadata;
pub use license_evidence::{
    is_license_name, LicenseEntry, LicenseEvidence, Provenance, ProvenanceKind, LICENSE_MARKER,
};
pub use package_reference::{ArchiveFormat, PackageReference};
pub use recipe_metadata::{RecipeMetadata, UPSTREAM_ARCHIVE_SUFFIX};
pub use resolution_outcome::{BatchReport, FailureStage, ResolutionFailure, ResolutionOutcome};
