/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, network, conda CLI, console).
pub mod archive_license_source;
pub mod local_license_source;
pub mod output_presenter;
pub mod package_manager;
pub mod progress_reporter;
pub mod recipe_metadata_repository;
pub mod report_formatter;

pub use archive_license_source::ArchiveLicenseSource;
pub use local_license_source::{LocalLicenseSource, LocalScan};
pub use output_presenter::OutputPresenter;
pub use package_manager::PackageManager;
pub use progress_reporter::ProgressReporter;
pub use recipe_metadata_repository::RecipeMetadataRepository;
pub use report_formatter::ReportFormatter;
