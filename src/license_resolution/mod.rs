//! License resolution domain
//!
//! Pure types and rules of the resolution engine: archive identifiers,
//! recipe metadata, license evidence, outcomes and the provider table.
//! Nothing here touches the network or the filesystem except the scoped
//! read handles carried by `LicenseEntry`.
pub mod domain;
pub mod policies;
pub mod services;
