// SPDX-License-Identifier: MIT

//! Error reporting sinks
//!
//! Nodes never propagate their errors as data. The runtime hands them to
//! an `ErrorSink` together with the id of the node that raised them.

use std::sync::Mutex;

use super::error::NodeError;

/// Receives node errors; there is no return value and no retry signal.
pub trait ErrorSink: Send + Sync {
    fn report(&self, node_id: &str, error: &NodeError);
}

/// Sink that writes every report to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ErrorSink for LogSink {
    fn report(&self, node_id: &str, error: &NodeError) {
        log::error!("[{}] {}", node_id, error);
    }
}

/// Sink that keeps reports in memory, in arrival order
#[derive(Debug, Default)]
pub struct MemorySink {
    reports: Mutex<Vec<(String, NodeError)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far
    pub fn reports(&self) -> Vec<(String, NodeError)> {
        match self.reports.lock() {
            Ok(reports) => reports.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ErrorSink for MemorySink {
    fn report(&self, node_id: &str, error: &NodeError) {
        let mut reports = match self.reports.lock() {
            Ok(reports) => reports,
            Err(poisoned) => poisoned.into_inner(),
        };
        reports.push((node_id.to_string(), error.clone()));
    }
}
