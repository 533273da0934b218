use crate::application::read_models::{
    AuditReadModel, EnvironmentView, PackageStatus, PackageView, SummaryView,
};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

/// TextFormatter adapter for a human-readable audit summary
///
/// One block per environment listing every package with its status and
/// evidence, followed by the packages needing manual review and totals.
pub struct TextFormatter;

impl TextFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper methods for rendering sections
impl TextFormatter {
    fn render_header(&self, output: &mut String, model: &AuditReadModel) {
        output.push_str("License Provenance Audit\n");
        output.push_str("========================\n");
        output.push_str(&format!(
            "Generated by {} {} at {}\n",
            model.metadata.tool_name, model.metadata.tool_version, model.metadata.timestamp
        ));
        output.push_str(&format!("Serial: {}\n\n", model.metadata.serial_number));
    }

    fn render_package(&self, output: &mut String, package: &PackageView) {
        match (&package.evidence, &package.failure) {
            (Some(evidence), _) => {
                output.push_str(&format!(
                    "  [ok]     {} ({}: {})\n",
                    package.name, evidence.provenance, evidence.location
                ));
                for file in &evidence.license_files {
                    output.push_str(&format!("             - {}\n", file));
                }
            }
            (None, Some(failure)) => {
                output.push_str(&format!(
                    "  [review] {} ({})\n",
                    package.name, failure.stage
                ));
            }
            (None, None) => {
                output.push_str(&format!("  [review] {}\n", package.name));
            }
        }
    }

    fn render_environment(&self, output: &mut String, environment: &EnvironmentView) {
        output.push_str(&format!(
            "Environment: {} ({} package(s))\n",
            environment.name,
            environment.packages.len()
        ));
        for package in &environment.packages {
            self.render_package(output, package);
        }

        let review: Vec<&PackageView> = environment
            .packages
            .iter()
            .filter(|p| p.status == PackageStatus::ManualReview)
            .collect();
        if !review.is_empty() {
            output.push_str("\n  Manual review required:\n");
            for package in review {
                if let Some(failure) = &package.failure {
                    output.push_str(&format!(
                        "    {} [{}]: {}\n",
                        package.name, failure.stage, failure.detail
                    ));
                }
            }
        }
        output.push('\n');
    }

    fn render_summary(&self, output: &mut String, summary: &SummaryView) {
        output.push_str(&format!(
            "Summary: {} environment(s), {} package(s), {} resolved, {} need manual review\n",
            summary.environments, summary.packages, summary.resolved, summary.manual_review
        ));
    }
}

impl ReportFormatter for TextFormatter {
    fn format(&self, model: &AuditReadModel) -> Result<String> {
        let mut output = String::new();
        self.render_header(&mut output, model);
        for environment in &model.environments {
            self.render_environment(&mut output, environment);
        }
        self.render_summary(&mut output, &model.summary);
        Ok(output)
    }
}
