//! Audit read model for report rendering
//!
//! A denormalized, formatter-friendly view of one or more environment
//! audits. Formatters never touch domain types directly.

use super::package_view::PackageView;

/// Main read model for an audit run
#[derive(Debug, Clone)]
pub struct AuditReadModel {
    pub metadata: AuditMetadataView,
    pub environments: Vec<EnvironmentView>,
    pub summary: SummaryView,
}

impl AuditReadModel {
    pub fn requires_manual_review(&self) -> bool {
        self.summary.manual_review > 0
    }
}

/// View representation of audit metadata
#[derive(Debug, Clone)]
pub struct AuditMetadataView {
    pub timestamp: String,
    pub tool_name: String,
    pub tool_version: String,
    pub serial_number: String,
}

/// One audited environment
#[derive(Debug, Clone)]
pub struct EnvironmentView {
    pub name: String,
    pub audited_at: String,
    pub packages: Vec<PackageView>,
    pub resolved: usize,
    pub manual_review: usize,
}

/// Totals across all environments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SummaryView {
    pub environments: usize,
    pub packages: usize,
    pub resolved: usize,
    pub manual_review: usize,
}
