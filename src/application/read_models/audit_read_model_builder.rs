//! Builder for constructing AuditReadModel from audit responses

use super::audit_read_model::{AuditMetadataView, AuditReadModel, EnvironmentView, SummaryView};
use super::package_view::{EvidenceView, FailureView, PackageStatus, PackageView};
use crate::application::dto::AuditResponse;
use crate::license_resolution::domain::{AuditMetadata, ResolutionOutcome};
use crate::license_resolution::services::AuditMetadataGenerator;

/// Builder for constructing AuditReadModel from audit responses
pub struct AuditReadModelBuilder;

impl AuditReadModelBuilder {
    /// Builds the read model for a run; environments keep the given order.
    ///
    /// Run metadata is that of the first environment audited, or freshly
    /// generated when nothing was audited.
    pub fn build(responses: &[AuditResponse]) -> AuditReadModel {
        let metadata = match responses.first() {
            Some(first) => Self::build_metadata(&first.metadata),
            None => Self::build_metadata(&AuditMetadataGenerator::generate_default_metadata()),
        };

        let environments: Vec<EnvironmentView> =
            responses.iter().map(Self::build_environment).collect();

        let summary = SummaryView {
            environments: environments.len(),
            packages: environments.iter().map(|e| e.packages.len()).sum(),
            resolved: environments.iter().map(|e| e.resolved).sum(),
            manual_review: environments.iter().map(|e| e.manual_review).sum(),
        };

        AuditReadModel {
            metadata,
            environments,
            summary,
        }
    }

    fn build_metadata(metadata: &AuditMetadata) -> AuditMetadataView {
        AuditMetadataView {
            timestamp: metadata.timestamp().to_string(),
            tool_name: metadata.tool_name().to_string(),
            tool_version: metadata.tool_version().to_string(),
            serial_number: metadata.serial_number().to_string(),
        }
    }

    fn build_environment(response: &AuditResponse) -> EnvironmentView {
        EnvironmentView {
            name: response.environment.clone(),
            audited_at: response.metadata.timestamp().to_string(),
            packages: response
                .report
                .outcomes()
                .iter()
                .map(Self::build_package)
                .collect(),
            resolved: response.report.resolved_count(),
            manual_review: response.report.unresolved_count(),
        }
    }

    fn build_package(outcome: &ResolutionOutcome) -> PackageView {
        match outcome {
            ResolutionOutcome::Resolved(evidence) => PackageView {
                name: evidence.package_name().to_string(),
                status: PackageStatus::Resolved,
                evidence: Some(EvidenceView {
                    provenance: evidence.provenance().kind().to_string(),
                    location: evidence.provenance().descriptor(),
                    license_files: evidence
                        .entry_names()
                        .into_iter()
                        .map(str::to_string)
                        .collect(),
                }),
                failure: None,
            },
            ResolutionOutcome::ManualReview(failure) => PackageView {
                name: failure.package_name().to_string(),
                status: PackageStatus::ManualReview,
                evidence: None,
                failure: Some(FailureView {
                    stage: failure.stage().to_string(),
                    detail: failure.detail().to_string(),
                }),
            },
        }
    }
}
