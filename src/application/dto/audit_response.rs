use crate::license_resolution::domain::{AuditMetadata, BatchReport};

/// AuditResponse - Result of auditing one environment
///
/// Always produced once enumeration succeeded, however many packages
/// ended up in manual review.
#[derive(Debug, Clone)]
pub struct AuditResponse {
    pub environment: String,
    pub report: BatchReport,
    pub metadata: AuditMetadata,
}

impl AuditResponse {
    pub fn new(environment: String, report: BatchReport, metadata: AuditMetadata) -> Self {
        Self {
            environment,
            report,
            metadata,
        }
    }

    pub fn requires_manual_review(&self) -> bool {
        self.report.unresolved_count() > 0
    }
}
