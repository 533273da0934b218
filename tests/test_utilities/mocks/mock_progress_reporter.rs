use conda_license_audit::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock ProgressReporter recording every call
///
/// Clones share one log, so a test can keep a handle after the reporter
/// moves into a use case.
#[derive(Default, Clone)]
pub struct MockProgressReporter {
    messages: Arc<Mutex<Vec<String>>>,
    progress: Arc<Mutex<Vec<(usize, usize)>>>,
}

impl MockProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    /// Warnings and failures, without their `Error: ` prefix
    pub fn errors(&self) -> Vec<String> {
        self.get_messages()
            .iter()
            .filter_map(|m| m.strip_prefix("Error: ").map(str::to_string))
            .collect()
    }

    /// `(current, total)` pairs in the order they were reported
    pub fn progress_steps(&self) -> Vec<(usize, usize)> {
        self.progress.lock().unwrap().clone()
    }
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }

    fn report_progress(&self, current: usize, total: usize, _message: Option<&str>) {
        self.progress.lock().unwrap().push((current, total));
    }

    fn report_error(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(format!("Error: {}", message));
    }

    fn report_completion(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(format!("Completed: {}", message));
    }
}
