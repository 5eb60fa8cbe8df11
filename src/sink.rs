use log::{error, warn};

use crate::atlas::Severity;

/// Receives `(severity, message)` pairs
pub trait DiagnosticSink {
    fn report(&mut self, severity: Severity, message: &str);
}

/// Forwards diagnostics to the `log` facade
#[derive(Debug, Clone, Default)]
pub struct LogSink {
    prefix: Option<String>,
}

impl LogSink {
    /// Prefix every message, typically with the atlas path
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    fn format(&self, message: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}: {}", prefix, message),
            None => message.to_string(),
        }
    }
}

impl DiagnosticSink for LogSink {
    fn report(&mut self, severity: Severity, message: &str) {
        let message = self.format(message);
        match severity {
            Severity::Warning => warn!("{}", message),
            Severity::Error => error!("{}", message),
        }
    }
}

impl DiagnosticSink for Vec<(Severity, String)> {
    fn report(&mut self, severity: Severity, message: &str) {
        self.push((severity, message.to_string()));
    }
}
