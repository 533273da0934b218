use crate::application::dto::{AuditRequest, AuditResponse};
use crate::shared::Result;
use async_trait::async_trait;

/// LicenseAuditPort - Inbound port for auditing environments
///
/// This port defines the interface that driving adapters (the CLI) use to
/// trigger an audit. Progress reporters are not required to be `Sync`, so
/// the returned future is not `Send`.
#[async_trait(?Send)]
pub trait LicenseAuditPort {
    /// Audits every explicit package of `request.environment`
    ///
    /// # Errors
    /// Returns an error only if the environment's packages cannot be
    /// enumerated. Per-package failures are reported inside the response.
    async fn audit_environment(&self, request: AuditRequest) -> Result<AuditResponse>;

    /// Audits several environments, one response per request in order
    ///
    /// Every environment is enumerated before any package is resolved, so
    /// an enumeration failure aborts the run without discarding work.
    ///
    /// # Errors
    /// The first enumeration failure, before any resolution has started.
    async fn audit_environments(&self, requests: Vec<AuditRequest>) -> Result<Vec<AuditResponse>>;
}
