use clap::{ArgGroup, Parser};
use conda_license_audit::adapters::outbound::conda::DEFAULT_CONDA_EXECUTABLE;
use conda_license_audit::adapters::outbound::network::DEFAULT_MAX_ARCHIVE_BYTES;
use conda_license_audit::application::dto::OutputFormat;
use conda_license_audit::application::use_cases::DEFAULT_CONCURRENCY;
use conda_license_audit::config::{ConfigFile, MAX_CONCURRENCY};
use conda_license_audit::license_resolution::policies::ProviderTable;
use conda_license_audit::shared::Result;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Per-request timeout when neither CLI nor config sets one
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Find the license files of every package in a conda environment
#[derive(Parser, Debug)]
#[command(name = "conda-license-audit")]
#[command(version)]
#[command(
    about = "Find bundled or upstream license files for every package in a conda environment",
    long_about = None
)]
#[command(group(
    ArgGroup::new("environments")
        .required(true)
        .args(["env", "all_envs"])
))]
pub struct Args {
    /// Environment name or prefix to audit; can be given several times
    #[arg(short = 'n', long = "env", value_name = "ENV")]
    pub env: Vec<String>,

    /// Audit every environment conda knows about
    #[arg(long)]
    pub all_envs: bool,

    /// Package store directory (defaults to conda's first pkgs_dirs entry)
    #[arg(long, value_name = "DIR")]
    pub pkgs_dir: Option<PathBuf>,

    /// Packages resolved in parallel [default: 8]
    #[arg(short = 'j', long, value_parser = clap::value_parser!(u64).range(1..=MAX_CONCURRENCY as u64))]
    pub concurrency: Option<u64>,

    /// Timeout for each HTTP request, in seconds [default: 30]
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Largest upstream archive to download, in MB [default: 512]
    #[arg(long, value_name = "MB", value_parser = clap::value_parser!(u64).range(1..))]
    pub max_archive_mb: Option<u64>,

    /// Output format: text or json [default: text]
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file (defaults to conda-license-audit.config.yml in the current directory)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// conda executable to run [default: conda]
    #[arg(long, value_name = "PATH")]
    pub conda_exe: Option<PathBuf>,

    /// Only print warnings on stderr
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Merges CLI arguments over config file values over defaults.
    pub fn into_settings(self, config: Option<ConfigFile>) -> Result<AuditSettings> {
        let config = config.unwrap_or_default();

        let format = match (self.format, config.format.as_deref()) {
            (Some(format), _) => format,
            (None, Some(format)) => OutputFormat::from_str(format).map_err(anyhow::Error::msg)?,
            (None, None) => OutputFormat::default(),
        };

        let environments = if self.all_envs {
            EnvironmentSelection::All
        } else {
            EnvironmentSelection::Named(self.env)
        };

        let timeout_secs = self
            .timeout
            .or(config.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let max_archive_bytes = self
            .max_archive_mb
            .or(config.max_archive_mb)
            .map(|mb| mb.saturating_mul(BYTES_PER_MB))
            .unwrap_or(DEFAULT_MAX_ARCHIVE_BYTES);

        Ok(AuditSettings {
            environments,
            pkgs_dir: self.pkgs_dir.or_else(|| config.pkgs_dir.clone()),
            concurrency: self
                .concurrency
                .map(|c| c as usize)
                .or(config.concurrency)
                .unwrap_or(DEFAULT_CONCURRENCY),
            timeout: Duration::from_secs(timeout_secs),
            max_archive_bytes,
            format,
            output: self.output,
            conda_exe: self
                .conda_exe
                .or_else(|| config.conda_exe.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONDA_EXECUTABLE)),
            providers: config.provider_table()?,
            quiet: self.quiet,
        })
    }
}

/// Which environments to audit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvironmentSelection {
    Named(Vec<String>),
    All,
}

/// Effective settings for one run
#[derive(Debug, Clone)]
pub struct AuditSettings {
    pub environments: EnvironmentSelection,
    pub pkgs_dir: Option<PathBuf>,
    pub concurrency: usize,
    pub timeout: Duration,
    pub max_archive_bytes: u64,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub conda_exe: PathBuf,
    pub providers: ProviderTable,
    pub quiet: bool,
}
