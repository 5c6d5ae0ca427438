//! Reporting of rules the simulator had to skip.
//!
//! The simulator never prints. It hands each skipped equation to a
//! [`DiagnosticSink`] chosen by the caller.

use std::sync::Mutex;

use hmsim_registry::MalformedEquationError;
use serde::{Serialize, Serializer};

/// A rule that was skipped because its equation could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEquation {
    pub equation: String,
    #[serde(serialize_with = "reason_as_text")]
    pub reason: MalformedEquationError,
}

fn reason_as_text<S: Serializer>(
    reason: &MalformedEquationError,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(reason)
}

/// Receiver for simulation diagnostics.
pub trait DiagnosticSink: Send + Sync {
    fn skipped_equation(&self, event: &SkippedEquation);
}

/// Emits each event as a `tracing` warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn skipped_equation(&self, event: &SkippedEquation) {
        tracing::warn!(
            equation = %event.equation,
            reason = %event.reason,
            "skipping malformed equation"
        );
    }
}

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: Mutex<Vec<SkippedEquation>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<SkippedEquation> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn into_events(self) -> Vec<SkippedEquation> {
        self.events
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DiagnosticSink for CollectingSink {
    fn skipped_equation(&self, event: &SkippedEquation) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event.clone());
    }
}
