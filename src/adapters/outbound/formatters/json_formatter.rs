use crate::application::read_models::{AuditReadModel, EnvironmentView, PackageView};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    metadata: JsonMetadata<'a>,
    summary: JsonSummary,
    environments: Vec<JsonEnvironment<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonMetadata<'a> {
    timestamp: &'a str,
    tool: JsonTool<'a>,
    #[serde(rename = "serialNumber")]
    serial_number: &'a str,
}

#[derive(Debug, Serialize)]
struct JsonTool<'a> {
    name: &'a str,
    version: &'a str,
}

#[derive(Debug, Serialize)]
struct JsonSummary {
    environments: usize,
    packages: usize,
    resolved: usize,
    #[serde(rename = "manualReview")]
    manual_review: usize,
}

#[derive(Debug, Serialize)]
struct JsonEnvironment<'a> {
    name: &'a str,
    #[serde(rename = "auditedAt")]
    audited_at: &'a str,
    packages: Vec<JsonPackage<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonPackage<'a> {
    name: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    provenance: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<&'a str>,
    #[serde(rename = "licenseFiles", skip_serializing_if = "Option::is_none")]
    license_files: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stage: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<&'a str>,
}

/// JsonFormatter adapter for a machine-readable audit report
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }

    fn package(package: &PackageView) -> JsonPackage<'_> {
        let evidence = package.evidence.as_ref();
        let failure = package.failure.as_ref();
        JsonPackage {
            name: &package.name,
            status: package.status.as_str(),
            provenance: evidence.map(|e| e.provenance.as_str()),
            location: evidence.map(|e| e.location.as_str()),
            license_files: evidence.map(|e| e.license_files.as_slice()),
            stage: failure.map(|f| f.stage.as_str()),
            detail: failure.map(|f| f.detail.as_str()),
        }
    }

    fn environment(environment: &EnvironmentView) -> JsonEnvironment<'_> {
        JsonEnvironment {
            name: &environment.name,
            audited_at: &environment.audited_at,
            packages: environment.packages.iter().map(Self::package).collect(),
        }
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, model: &AuditReadModel) -> Result<String> {
        let report = JsonReport {
            metadata: JsonMetadata {
                timestamp: &model.metadata.timestamp,
                tool: JsonTool {
                    name: &model.metadata.tool_name,
                    version: &model.metadata.tool_version,
                },
                serial_number: &model.metadata.serial_number,
            },
            summary: JsonSummary {
                environments: model.summary.environments,
                packages: model.summary.packages,
                resolved: model.summary.resolved,
                manual_review: model.summary.manual_review,
            },
            environments: model.environments.iter().map(Self::environment).collect(),
        };

        let mut json = serde_json::to_string_pretty(&report)?;
        json.push('\n');
        Ok(json)
    }
}
