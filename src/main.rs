mod cli;

use cli::{Args, AuditSettings, EnvironmentSelection};
use conda_license_audit::adapters::outbound::conda::CondaCli;
use conda_license_audit::adapters::outbound::console::StderrProgressReporter;
use conda_license_audit::adapters::outbound::filesystem::FileSystemLicenseScanner;
use conda_license_audit::adapters::outbound::network::{
    build_http_client, CachingRecipeMetadataRepository, HttpArchiveLicenseScanner,
    HttpRecipeMetadataRepository,
};
use conda_license_audit::application::dto::AuditRequest;
use conda_license_audit::application::factories::{FormatterFactory, PresenterFactory};
use conda_license_audit::application::read_models::AuditReadModelBuilder;
use conda_license_audit::application::use_cases::{
    AuditEnvironmentUseCase, ResolveLicensesUseCase,
};
use conda_license_audit::config::{self, ConfigFile};
use conda_license_audit::ports::inbound::LicenseAuditPort;
use conda_license_audit::ports::outbound::PackageManager;
use conda_license_audit::shared::error::{AuditError, ExitCode};
use conda_license_audit::shared::Result;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // clap exits with code 2 on invalid arguments and 0 for --help / --version
    let args = Args::parse_args();

    match run(args).await {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let config = load_config(args.config.as_deref())?;
    let settings = args.into_settings(config)?;

    let package_manager = CondaCli::new(settings.conda_exe.clone());

    let store_root = match &settings.pkgs_dir {
        Some(dir) => validate_store_root(dir)?,
        None => package_manager.package_store_root().await?,
    };

    let environments = match &settings.environments {
        EnvironmentSelection::Named(names) => names.clone(),
        EnvironmentSelection::All => package_manager.list_environments().await?,
    };

    let use_case = build_use_case(package_manager, &settings)?;

    let requests = environments
        .into_iter()
        .map(|environment| AuditRequest::new(environment, store_root.clone()))
        .collect();
    let responses = use_case.audit_environments(requests).await?;

    let model = AuditReadModelBuilder::build(&responses);

    if !settings.quiet {
        eprintln!("{}", FormatterFactory::progress_message(settings.format));
    }
    let formatter = FormatterFactory::create(settings.format);
    let report = formatter.format(&model)?;

    let presenter = PresenterFactory::create(settings.output.clone().into());
    presenter.present(&report)?;

    Ok(if model.requires_manual_review() {
        ExitCode::ManualReviewRequired
    } else {
        ExitCode::Success
    })
}

type CliAuditUseCase = AuditEnvironmentUseCase<
    CondaCli,
    FileSystemLicenseScanner,
    CachingRecipeMetadataRepository<HttpRecipeMetadataRepository>,
    HttpArchiveLicenseScanner,
    StderrProgressReporter,
>;

/// Wires adapters into the use case (dependency injection)
fn build_use_case(package_manager: CondaCli, settings: &AuditSettings) -> Result<CliAuditUseCase> {
    let client = build_http_client(settings.timeout)?;
    let providers = Arc::new(settings.providers.clone());

    let metadata_repository = CachingRecipeMetadataRepository::new(
        HttpRecipeMetadataRepository::new(client.clone(), providers),
    );
    let archive_scanner =
        HttpArchiveLicenseScanner::new(client).with_max_archive_bytes(settings.max_archive_bytes);
    let progress_reporter = if settings.quiet {
        StderrProgressReporter::quiet()
    } else {
        StderrProgressReporter::new()
    };

    let resolver = ResolveLicensesUseCase::new(
        FileSystemLicenseScanner::new(),
        metadata_repository,
        archive_scanner,
        progress_reporter,
    )
    .with_concurrency(settings.concurrency);

    Ok(AuditEnvironmentUseCase::new(package_manager, resolver))
}

/// Explicit `--config` must load; otherwise a config in the current directory is optional.
fn load_config(explicit: Option<&Path>) -> Result<Option<ConfigFile>> {
    match explicit {
        Some(path) => Ok(Some(config::load_config_from_path(path)?)),
        None => {
            let cwd = std::env::current_dir()?;
            config::discover_config(&cwd)
        }
    }
}

fn validate_store_root(path: &Path) -> Result<PathBuf> {
    let metadata = std::fs::metadata(path).map_err(|e| AuditError::InvalidPath {
        path: path.to_path_buf(),
        reason: format!("Failed to read path metadata: {}", e),
    })?;

    if !metadata.is_dir() {
        return Err(AuditError::InvalidPath {
            path: path.to_path_buf(),
            reason: "Not a directory".to_string(),
        }
        .into());
    }

    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_validate_store_root_directory() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(
            validate_store_root(temp_dir.path()).unwrap(),
            temp_dir.path().to_path_buf()
        );
    }

    #[test]
    fn test_validate_store_root_nonexistent() {
        let err = validate_store_root(Path::new("/nonexistent/pkgs")).unwrap_err();
        assert!(format!("{}", err).contains("Invalid path"));
    }

    #[test]
    fn test_validate_store_root_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("pkgs");
        fs::write(&file_path, "").unwrap();

        let err = validate_store_root(&file_path).unwrap_err();
        assert!(format!("{}", err).contains("Not a directory"));
    }

    #[test]
    fn test_load_config_explicit_missing() {
        assert!(load_config(Some(Path::new("/nonexistent/config.yml"))).is_err());
    }
}
