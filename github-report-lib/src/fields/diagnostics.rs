use super::LOG_TARGET;

/// Receives warnings about questionable report settings.
pub trait Diagnostics {
    fn warn(&mut self, message: &str);
}

/// Sends warnings to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn warn(&mut self, message: &str) {
        log::warn!(target: LOG_TARGET, "{message}");
    }
}

/// Collects warnings, mostly for tests.
impl Diagnostics for Vec<String> {
    fn warn(&mut self, message: &str) {
        self.push(message.to_string());
    }
}
