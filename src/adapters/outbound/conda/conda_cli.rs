use crate::ports::outbound::PackageManager;
use crate::shared::error::AuditError;
use crate::shared::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

/// Executable used when none is configured
pub const DEFAULT_CONDA_EXECUTABLE: &str = "conda";

#[derive(Debug, Deserialize)]
struct EnvironmentList {
    #[serde(default)]
    envs: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CondaInfo {
    #[serde(default)]
    pkgs_dirs: Vec<PathBuf>,
}

/// CondaCli adapter driving the `conda` executable
///
/// Every call is a separate subprocess with stdout captured. A spawn
/// failure, non-zero exit or unreadable output is an `EnumerationError`.
pub struct CondaCli {
    executable: PathBuf,
}

impl CondaCli {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    async fn run(&self, args: &[&str]) -> Result<String> {
        let command_line = format!("{} {}", self.executable.display(), args.join(" "));

        let output = Command::new(&self.executable)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| AuditError::enumeration(format!("cannot run `{}`: {}", command_line, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AuditError::enumeration(format!(
                "`{}` failed with {}: {}",
                command_line,
                output.status,
                stderr.trim()
            ))
            .into());
        }

        String::from_utf8(output.stdout).map_err(|e| {
            AuditError::enumeration(format!("`{}` printed invalid UTF-8: {}", command_line, e))
                .into()
        })
    }

    /// conda may print banners before its JSON document; parse from the first brace.
    fn json_document(output: &str) -> &str {
        output.find('{').map_or(output, |start| &output[start..])
    }

    /// Prefixes listed by `conda env list --json`
    pub fn parse_environments(output: &str) -> Result<Vec<String>> {
        let list: EnvironmentList = serde_json::from_str(Self::json_document(output))
            .map_err(|e| AuditError::enumeration(format!("invalid environment list: {}", e)))?;
        Ok(list.envs)
    }

    /// Candidate identifiers from `conda list --explicit`
    ///
    /// Drops blank lines, `#` comments and `@` directives such as `@EXPLICIT`.
    /// Lines may carry an `#md5` or `#sha256:` suffix, which is cut off.
    pub fn parse_explicit_list(output: &str) -> Vec<String> {
        output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('@'))
            .map(|line| line.split('#').next().unwrap_or(line).trim().to_string())
            .collect()
    }

    /// First `pkgs_dirs` entry of `conda info --json`
    pub fn parse_package_store_root(output: &str) -> Result<PathBuf> {
        let info: CondaInfo = serde_json::from_str(Self::json_document(output))
            .map_err(|e| AuditError::enumeration(format!("invalid conda info output: {}", e)))?;

        info.pkgs_dirs
            .into_iter()
            .next()
            .ok_or_else(|| AuditError::enumeration("conda info lists no pkgs_dirs").into())
    }

    /// Environments given as a path are selected with `-p`, names with `-n`
    fn environment_flag(environment: &str) -> &'static str {
        if environment.contains(std::path::MAIN_SEPARATOR) || environment.contains('/') {
            "-p"
        } else {
            "-n"
        }
    }
}

impl Default for CondaCli {
    fn default() -> Self {
        Self::new(DEFAULT_CONDA_EXECUTABLE)
    }
}

#[async_trait]
impl PackageManager for CondaCli {
    async fn list_environments(&self) -> Result<Vec<String>> {
        let output = self.run(&["env", "list", "--json"]).await?;
        Self::parse_environments(&output)
    }

    async fn list_explicit_packages(&self, environment: &str) -> Result<Vec<String>> {
        let flag = Self::environment_flag(environment);
        let output = self
            .run(&["list", "--explicit", flag, environment])
            .await?;
        Ok(Self::parse_explicit_list(&output))
    }

    async fn package_store_root(&self) -> Result<PathBuf> {
        let output = self.run(&["info", "--json"]).await?;
        Self::parse_package_store_root(&output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_environments() {
        let output = r#"{
  "envs": [
    "/opt/conda",
    "/opt/conda/envs/analysis"
  ]
}"#;
        assert_eq!(
            CondaCli::parse_environments(output).unwrap(),
            vec!["/opt/conda", "/opt/conda/envs/analysis"]
        );
    }

    #[test]
    fn test_parse_environments_skips_leading_noise() {
        let output = "Note: you may need to restart the kernel\n{\"envs\": [\"/opt/conda\"]}";
        assert_eq!(
            CondaCli::parse_environments(output).unwrap(),
            vec!["/opt/conda"]
        );
    }

    #[test]
    fn test_parse_environments_invalid_json() {
        let err = CondaCli::parse_environments("not json").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Failed to enumerate conda packages"));
        assert!(message.contains("invalid environment list"));
    }

    #[test]
    fn test_parse_explicit_list() {
        let output = "\
# This file may be used to create an environment using:
# $ conda create --name <env> --file <this file>
# platform: linux-64
@EXPLICIT
https://repo.continuum.io/pkgs/free/linux-64/cycler-0.10.0-py36_0.tar.bz2

https://conda.anaconda.org/conda-forge/linux-64/zlib-1.2.11-0.tar.bz2#d7c3b1cf6ae2bf3c33cbd1d69bd2b5a1
";
        assert_eq!(
            CondaCli::parse_explicit_list(output),
            vec![
                "https://repo.continuum.io/pkgs/free/linux-64/cycler-0.10.0-py36_0.tar.bz2",
                "https://conda.anaconda.org/conda-forge/linux-64/zlib-1.2.11-0.tar.bz2",
            ]
        );
    }

    #[test]
    fn test_parse_explicit_list_keeps_malformed_lines() {
        let output = "@EXPLICIT\nnot-a-url\n";
        assert_eq!(CondaCli::parse_explicit_list(output), vec!["not-a-url"]);
    }

    #[test]
    fn test_parse_package_store_root() {
        let output = r#"{"pkgs_dirs": ["/opt/conda/pkgs", "/home/user/.conda/pkgs"], "platform": "linux-64"}"#;
        assert_eq!(
            CondaCli::parse_package_store_root(output).unwrap(),
            PathBuf::from("/opt/conda/pkgs")
        );
    }

    #[test]
    fn test_parse_package_store_root_empty() {
        let err = CondaCli::parse_package_store_root(r#"{"pkgs_dirs": []}"#).unwrap_err();
        assert!(err.to_string().contains("no pkgs_dirs"));
    }

    #[test]
    fn test_environment_flag() {
        assert_eq!(CondaCli::environment_flag("base"), "-n");
        assert_eq!(CondaCli::environment_flag("/opt/conda/envs/analysis"), "-p");
    }

    #[tokio::test]
    async fn test_missing_executable_is_enumeration_error() {
        let cli = CondaCli::new("/nonexistent/bin/conda");
        let err = cli.list_environments().await.unwrap_err();
        assert!(err.downcast_ref::<AuditError>().is_some());
        assert!(err.to_string().contains("cannot run"));
    }
}
