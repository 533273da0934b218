//! conda-license-audit - license provenance for conda environments
//!
//! For every package installed in a conda environment this library finds
//! the license files that govern it: first in the package's installed
//! `info` directory, then in the upstream source archive named by the
//! package's recipe. Packages that cannot be resolved either way are
//! reported for manual review instead of failing the run.
//!
//! # Architecture
//!
//! The library follows a hexagonal layout:
//!
//! - **Domain Layer** (`license_resolution`): package references, evidence,
//!   outcomes, the provider table and pure parsing services
//! - **Application Layer** (`application`): use cases, DTOs and read models
//! - **Ports** (`ports`): interfaces for the package manager, package store,
//!   recipe metadata, source archives and output
//! - **Adapters** (`adapters`): conda CLI, filesystem, HTTP, console and formatters
//! - **Shared** (`shared`): error types, result aliases and path/URL guards
//!
//! # Example
//!
//! ```no_run
//! use conda_license_audit::prelude::*;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn run() -> Result<()> {
//! let client = build_http_client(Duration::from_secs(30))?;
//! let resolver = ResolveLicensesUseCase::new(
//!     FileSystemLicenseScanner::new(),
//!     HttpRecipeMetadataRepository::new(client.clone(), Arc::new(ProviderTable::default())),
//!     HttpArchiveLicenseScanner::new(client),
//!     StderrProgressReporter::new(),
//! );
//! let use_case = AuditEnvironmentUseCase::new(CondaCli::default(), resolver);
//!
//! let response = use_case
//!     .audit_environment(AuditRequest::new("base", "/opt/conda/pkgs"))
//!     .await?;
//! let model = AuditReadModelBuilder::build(&[response]);
//! println!("{}", TextFormatter::new().format(&model)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod license_resolution;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::conda::CondaCli;
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemLicenseScanner, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, TextFormatter};
    pub use crate::adapters::outbound::network::{
        build_http_client, CachingRecipeMetadataRepository, HttpArchiveLicenseScanner,
        HttpRecipeMetadataRepository,
    };
    pub use crate::application::dto::{AuditRequest, AuditResponse, OutputFormat};
    pub use crate::application::read_models::{AuditReadModel, AuditReadModelBuilder};
    pub use crate::application::use_cases::{AuditEnvironmentUseCase, ResolveLicensesUseCase};
    pub use crate::license_resolution::domain::{
        BatchReport, FailureStage, LicenseEntry, LicenseEvidence, PackageReference, Provenance,
        ProvenanceKind, RecipeMetadata, ResolutionFailure, ResolutionOutcome,
    };
    pub use crate::license_resolution::policies::ProviderTable;
    pub use crate::license_resolution::services::ReferenceParser;
    pub use crate::ports::inbound::LicenseAuditPort;
    pub use crate::ports::outbound::{
        ArchiveLicenseSource, LocalLicenseSource, LocalScan, OutputPresenter, PackageManager,
        ProgressReporter, RecipeMetadataRepository, ReportFormatter,
    };
    pub use crate::shared::error::{AuditError, ResolutionError};
    pub use crate::shared::{ResolutionResult, Result};
}
