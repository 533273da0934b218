/// Data Transfer Objects for the application layer
///
/// DTOs carry data between the CLI and the use cases, keeping the
/// domain layer isolated.
mod audit_request;
mod audit_response;
mod output_format;

pub use audit_request::AuditRequest;
pub use audit_response::AuditResponse;
pub use output_format::OutputFormat;
