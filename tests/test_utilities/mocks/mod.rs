/// Mock implementations for testing
mod mock_archive_license_source;
mod mock_package_manager;
mod mock_progress_reporter;
mod mock_recipe_metadata_repository;

pub use mock_archive_license_source::MockArchiveLicenseSource;
pub use mock_package_manager::MockPackageManager;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_recipe_metadata_repository::MockRecipeMetadataRepository;
