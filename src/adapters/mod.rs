/// Adapters layer - Infrastructure implementations
///
/// Concrete implementations of the outbound ports: the conda CLI, the
/// package store on disk, HTTP recipe and archive sources, the console
/// and report formatting.
pub mod outbound;
