use crate::adapters::outbound::formatters::{JsonFormatter, TextFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::ReportFormatter;

/// Factory for creating report formatters
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates the formatter for `format`
    ///
    /// # Examples
    /// ```
    /// use conda_license_audit::application::dto::OutputFormat;
    /// use conda_license_audit::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Json);
    /// ```
    pub fn create(format: OutputFormat) -> Box<dyn ReportFormatter> {
        match format {
            OutputFormat::Text => Box::new(TextFormatter::new()),
            OutputFormat::Json => Box::new(JsonFormatter::new()),
        }
    }

    /// Progress message shown before the report is rendered
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Text => "📝 Generating text report...",
            OutputFormat::Json => "📝 Generating JSON report...",
        }
    }
}
