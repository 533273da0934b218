/// Ports: the traits between the audit core and the outside world
///
/// Inbound ports are what the CLI drives (`LicenseAuditPort`); outbound
/// ports are what the core needs from conda, the package store, the
/// network and the console.
pub mod inbound;
pub mod outbound;
