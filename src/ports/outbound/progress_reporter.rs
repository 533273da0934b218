/// ProgressReporter port for reporting audit progress
///
/// Progress goes to a side channel (stderr for the CLI) so that it never
/// mixes with the report written to stdout.
pub trait ProgressReporter {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports batch progress
    ///
    /// # Arguments
    /// * `current` - Packages finished so far
    /// * `total` - Packages in the batch
    /// * `message` - Optional message, usually the package just finished
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a warning or a per-package failure
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
