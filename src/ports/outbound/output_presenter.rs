use crate::shared::Result;

/// OutputPresenter port for the rendered audit report
///
/// Progress and warnings never go through this port, so stdout carries
/// nothing but the report when it is the destination.
pub trait OutputPresenter {
    /// Delivers the rendered report
    ///
    /// # Errors
    /// `FileWriteError` when the destination cannot be written, including a
    /// missing parent directory or a symbolic link target.
    fn present(&self, content: &str) -> Result<()>;
}
