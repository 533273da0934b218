use crate::application::dto::{AuditRequest, AuditResponse};
use crate::application::use_cases::ResolveLicensesUseCase;
use crate::license_resolution::domain::{BatchReport, ResolutionFailure, ResolutionOutcome};
use crate::license_resolution::services::{AuditMetadataGenerator, ReferenceParser};
use crate::ports::inbound::LicenseAuditPort;
use crate::ports::outbound::{
    ArchiveLicenseSource, LocalLicenseSource, PackageManager, ProgressReporter,
    RecipeMetadataRepository,
};
use crate::shared::Result;
use async_trait::async_trait;

/// AuditEnvironmentUseCase - audits every explicit package of one environment
///
/// Lists the environment's archive identifiers through the package manager,
/// parses them, and hands the parsed references to the resolver. Lines that
/// do not parse stay in the report as `malformed-reference` failures at
/// their original position.
pub struct AuditEnvironmentUseCase<PM, LS, MR, AS, PR> {
    package_manager: PM,
    resolver: ResolveLicensesUseCase<LS, MR, AS, PR>,
}

impl<PM, LS, MR, AS, PR> AuditEnvironmentUseCase<PM, LS, MR, AS, PR>
where
    PM: PackageManager,
    LS: LocalLicenseSource,
    MR: RecipeMetadataRepository,
    AS: ArchiveLicenseSource,
    PR: ProgressReporter,
{
    pub fn new(package_manager: PM, resolver: ResolveLicensesUseCase<LS, MR, AS, PR>) -> Self {
        Self {
            package_manager,
            resolver,
        }
    }

    pub fn package_manager(&self) -> &PM {
        &self.package_manager
    }

    async fn list_packages(&self, request: &AuditRequest) -> Result<Vec<String>> {
        let reporter = self.resolver.progress_reporter();
        reporter.report(&format!(
            "📦 Listing environment '{}'",
            request.environment
        ));

        let identifiers = self
            .package_manager
            .list_explicit_packages(&request.environment)
            .await?;

        reporter.report(&format!(
            "✅ Detected {} package(s) in '{}'",
            identifiers.len(),
            request.environment
        ));
        Ok(identifiers)
    }

    async fn build_report(&self, request: &AuditRequest, identifiers: &[String]) -> BatchReport {
        let reporter = self.resolver.progress_reporter();
        reporter.report(&format!("📦 Auditing environment '{}'", request.environment));

        let mut slots: Vec<Option<ResolutionOutcome>> = Vec::with_capacity(identifiers.len());
        let mut references = Vec::new();
        let mut positions = Vec::new();

        for (position, identifier) in identifiers.iter().enumerate() {
            match ReferenceParser::parse(identifier) {
                Ok(reference) => {
                    positions.push(position);
                    references.push(reference);
                    slots.push(None);
                }
                Err(error) => {
                    reporter.report_error(&format!("⚠️  {}", error));
                    let failure = ResolutionFailure::from_error(identifier.trim(), &error);
                    slots.push(Some(ResolutionOutcome::ManualReview(failure)));
                }
            }
        }

        let resolved = self
            .resolver
            .execute(&request.package_store_root, &references)
            .await;

        for (position, outcome) in positions.into_iter().zip(resolved.into_outcomes()) {
            slots[position] = Some(outcome);
        }

        BatchReport::new(slots.into_iter().flatten().collect())
    }
}

#[async_trait(?Send)]
impl<PM, LS, MR, AS, PR> LicenseAuditPort for AuditEnvironmentUseCase<PM, LS, MR, AS, PR>
where
    PM: PackageManager,
    LS: LocalLicenseSource,
    MR: RecipeMetadataRepository,
    AS: ArchiveLicenseSource,
    PR: ProgressReporter,
{
    async fn audit_environment(&self, request: AuditRequest) -> Result<AuditResponse> {
        let mut responses = self.audit_environments(vec![request]).await?;
        responses
            .pop()
            .ok_or_else(|| anyhow::anyhow!("audit produced no response"))
    }

    async fn audit_environments(&self, requests: Vec<AuditRequest>) -> Result<Vec<AuditResponse>> {
        let mut listed = Vec::with_capacity(requests.len());
        for request in requests {
            let identifiers = self.list_packages(&request).await?;
            listed.push((request, identifiers));
        }

        let mut responses = Vec::with_capacity(listed.len());
        for (request, identifiers) in listed {
            let report = self.build_report(&request, &identifiers).await;
            let metadata = AuditMetadataGenerator::generate_default_metadata();
            responses.push(AuditResponse::new(request.environment, report, metadata));
        }
        Ok(responses)
    }
}
