use crate::application::read_models::AuditReadModel;
use crate::shared::Result;

/// ReportFormatter port for rendering audit reports
pub trait ReportFormatter {
    /// Formats the audit read model
    ///
    /// # Errors
    /// Returns an error if formatting or serialization fails
    fn format(&self, model: &AuditReadModel) -> Result<String>;
}
