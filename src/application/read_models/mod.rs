//! Read models for report rendering
//!
//! View-optimized structs giving formatters a flat representation of
//! audit results.

pub mod audit_read_model;
pub mod audit_read_model_builder;
pub mod package_view;

pub use audit_read_model::{AuditMetadataView, AuditReadModel, EnvironmentView, SummaryView};
pub use audit_read_model_builder::AuditReadModelBuilder;
pub use package_view::{EvidenceView, FailureView, PackageStatus, PackageView};
