//! Execution result types for operations

use crate::LogEntry;
use serde_json::Value;
use std::fmt::Display;
use std::time::Instant;

/// Result of executing an operation
///
/// - `Logged`: a mutation that belongs in the activity log
/// - `Unlogged`: a read with no side effects
/// - `Failed`: an error, optionally logged
pub enum ExecutionResult<T, E> {
    Logged { value: T, log_entry: LogEntry },
    Unlogged { value: T },
    Failed {
        error: E,
        log_entry: Option<LogEntry>,
    },
}

impl<T, E> ExecutionResult<T, E> {
    /// Extract the result (Ok or Err)
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Logged { value, .. } => Ok(value),
            Self::Unlogged { value } => Ok(value),
            Self::Failed { error, .. } => Err(error),
        }
    }

    /// Get the value and log entry separately
    pub fn split(self) -> (Result<T, E>, Option<LogEntry>) {
        match self {
            Self::Logged { value, log_entry } => (Ok(value), Some(log_entry)),
            Self::Unlogged { value } => (Ok(value), None),
            Self::Failed { error, log_entry } => (Err(error), log_entry),
        }
    }

    pub fn should_log(&self) -> bool {
        matches!(
            self,
            Self::Logged { .. }
                | Self::Failed {
                    log_entry: Some(_),
                    ..
                }
        )
    }
}

impl<E: Display> ExecutionResult<Value, E> {
    /// Wrap the outcome of a mutating command.
    ///
    /// Success and failure both produce a log entry so the activity log
    /// shows rejected mutations too.
    pub fn mutation(op: String, input: Value, result: Result<Value, E>, started: Instant) -> Self {
        let duration_ms = started.elapsed().as_millis() as u64;
        match result {
            Ok(value) => Self::Logged {
                log_entry: LogEntry::new(op, input, value.clone(), None, duration_ms),
                value,
            },
            Err(error) => {
                let message = error.to_string();
                Self::Failed {
                    log_entry: Some(LogEntry::failure(op, input, &message, duration_ms)),
                    error,
                }
            }
        }
    }

    /// Wrap the outcome of a read-only command
    pub fn query(result: Result<Value, E>) -> Self {
        match result {
            Ok(value) => Self::Unlogged { value },
            Err(error) => Self::Failed {
                error,
                log_entry: None,
            },
        }
    }
}
