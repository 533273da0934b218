/// Use cases - application workflows driving the domain through ports
mod audit_environment;
mod resolve_licenses;

pub use audit_environment::AuditEnvironmentUseCase;
pub use resolve_licenses::{ResolveLicensesUseCase, DEFAULT_CONCURRENCY};
