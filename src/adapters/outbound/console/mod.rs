/// Console adapters for user-facing progress on stderr
mod progress_reporter;

pub use progress_reporter::StderrProgressReporter;
