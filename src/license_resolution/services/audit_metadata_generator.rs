use crate::license_resolution::domain::AuditMetadata;
use chrono::Utc;
use uuid::Uuid;

/// Tool name stamped on reports
pub const TOOL_NAME: &str = "conda-license-audit";

/// AuditMetadataGenerator service for stamping audit reports
pub struct AuditMetadataGenerator;

impl AuditMetadataGenerator {
    /// Generates metadata with the current timestamp and a unique serial number
    pub fn generate_metadata(tool_name: &str, tool_version: &str) -> AuditMetadata {
        let timestamp = Utc::now().to_rfc3339();
        let serial_number = format!("urn:uuid:{}", Uuid::new_v4());

        AuditMetadata::new(
            timestamp,
            tool_name.to_string(),
            tool_version.to_string(),
            serial_number,
        )
    }

    /// Generates metadata for this tool, using the compile-time version from Cargo.toml
    pub fn generate_default_metadata() -> AuditMetadata {
        Self::generate_metadata(TOOL_NAME, env!("CARGO_PKG_VERSION"))
    }
}
