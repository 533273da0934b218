use crate::license_resolution::domain::{
    BatchReport, PackageReference, ResolutionFailure, ResolutionOutcome,
};
use crate::ports::outbound::{
    ArchiveLicenseSource, LocalLicenseSource, LocalScan, ProgressReporter,
    RecipeMetadataRepository,
};
use crate::shared::error::ResolutionError;
use crate::shared::ResolutionResult;
use futures::stream::{self, StreamExt};
use std::path::Path;

/// Packages resolved at once when no concurrency is configured
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Terminal outcome of one package plus warnings raised on the way
struct PackageResolution {
    outcome: ResolutionOutcome,
    warnings: Vec<String>,
}

/// ResolveLicensesUseCase - license resolution for a batch of packages
///
/// Each package runs through the same state machine:
/// local scan, then (only if nothing was found locally) recipe metadata,
/// then the upstream archive. Every stage error is terminal for that
/// package only and becomes a manual-review outcome; the batch always
/// completes.
///
/// # Type Parameters
/// * `LS` - LocalLicenseSource implementation
/// * `MR` - RecipeMetadataRepository implementation
/// * `AS` - ArchiveLicenseSource implementation
/// * `PR` - ProgressReporter implementation
pub struct ResolveLicensesUseCase<LS, MR, AS, PR> {
    local_source: LS,
    metadata_repository: MR,
    archive_source: AS,
    progress_reporter: PR,
    concurrency: usize,
}

impl<LS, MR, AS, PR> ResolveLicensesUseCase<LS, MR, AS, PR>
where
    LS: LocalLicenseSource,
    MR: RecipeMetadataRepository,
    AS: ArchiveLicenseSource,
    PR: ProgressReporter,
{
    pub fn new(
        local_source: LS,
        metadata_repository: MR,
        archive_source: AS,
        progress_reporter: PR,
    ) -> Self {
        Self {
            local_source,
            metadata_repository,
            archive_source,
            progress_reporter,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Sets how many packages are in flight at once (at least one)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn progress_reporter(&self) -> &PR {
        &self.progress_reporter
    }

    /// Resolves every reference against the package store at `store_root`
    ///
    /// The report holds one outcome per reference, in input order.
    pub async fn execute(&self, store_root: &Path, references: &[PackageReference]) -> BatchReport {
        let total = references.len();
        if total == 0 {
            return BatchReport::default();
        }

        self.progress_reporter.report(&format!(
            "🔍 Resolving licenses for {} package(s) from {}",
            total,
            store_root.display()
        ));

        let mut resolutions = stream::iter(references)
            .map(|reference| self.resolve_package(store_root, reference))
            .buffered(self.concurrency);

        let mut outcomes = Vec::with_capacity(total);
        while let Some(resolution) = resolutions.next().await {
            for warning in &resolution.warnings {
                self.progress_reporter.report_error(warning);
            }
            if let ResolutionOutcome::ManualReview(failure) = &resolution.outcome {
                self.progress_reporter.report_error(&format!(
                    "⚠️  {}: manual review required [{}] {}",
                    failure.package_name(),
                    failure.stage(),
                    failure.detail()
                ));
            }

            let name = resolution.outcome.package_name().to_string();
            outcomes.push(resolution.outcome);
            self.progress_reporter
                .report_progress(outcomes.len(), total, Some(&name));
        }

        let report = BatchReport::new(outcomes);
        self.progress_reporter.report_completion(&format!(
            "✅ License resolution complete: {} resolved, {} need manual review",
            report.resolved_count(),
            report.unresolved_count()
        ));
        report
    }

    async fn resolve_package(
        &self,
        store_root: &Path,
        reference: &PackageReference,
    ) -> PackageResolution {
        let mut warnings = Vec::new();

        match self.local_source.scan(store_root, reference) {
            Ok(LocalScan::Found(evidence)) => {
                return PackageResolution {
                    outcome: ResolutionOutcome::Resolved(evidence),
                    warnings,
                };
            }
            Ok(LocalScan::NotInstalled { .. }) | Ok(LocalScan::NoLicense { .. }) => {}
            Err(e) => warnings.push(format!(
                "⚠️  {}: local scan failed, trying upstream: {:#}",
                reference.name(),
                e
            )),
        }

        let outcome = match self.resolve_upstream(reference).await {
            Ok(outcome) => outcome,
            Err(error) => {
                ResolutionOutcome::ManualReview(ResolutionFailure::from_error(reference.name(), &error))
            }
        };

        PackageResolution { outcome, warnings }
    }

    async fn resolve_upstream(
        &self,
        reference: &PackageReference,
    ) -> ResolutionResult<ResolutionOutcome> {
        let metadata = self
            .metadata_repository
            .fetch_recipe_metadata(reference)
            .await?;

        match self.archive_source.scan_archive(&metadata).await? {
            Some(evidence) => Ok(ResolutionOutcome::Resolved(evidence)),
            None => Err(ResolutionError::NoLicenseFound {
                descriptor: metadata.source_url().to_string(),
            }),
        }
    }
}
