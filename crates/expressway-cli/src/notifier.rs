use expressway_core::ports::{Notifier, Severity};

use crate::output::OutputWriter;

/// Prints editor status messages as they arrive
pub struct ConsoleNotifier<'a> {
    output: &'a OutputWriter,
}

impl<'a> ConsoleNotifier<'a> {
    pub fn new(output: &'a OutputWriter) -> Self {
        Self { output }
    }
}

impl Notifier for ConsoleNotifier<'_> {
    fn notify(&mut self, severity: Severity, message: String) {
        match severity {
            Severity::Info => self.output.info(message),
            Severity::Success => self.output.success(message),
            Severity::Error => self.output.error(message),
        }
    }
}
