//! Error types for the expense splitter
//!
//! This module defines all error types that can occur while building a ledger,
//! settling expenses, or moving balances to and from disk.
//!
//! # Error Categories
//!
//! - **Lookup Errors**: Unknown participant names or identifiers
//! - **Settlement Errors**: Empty splits, repeated settlement, invalid amounts
//! - **File Errors**: Missing files, malformed rows, other I/O failures
//! - **Arithmetic Errors**: Overflow in balance calculations

use crate::types::{ExpenseId, ParticipantId};
use thiserror::Error;

/// Main error type for the expense splitter
///
/// Every variant aborts the operation that raised it. None of them are
/// transient, so callers never retry; the interactive session re-prompts
/// on input errors and reports file errors verbatim.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplitError {
    /// A participant name did not resolve to anyone in the ledger
    #[error("Participant '{name}' not found")]
    ParticipantNotFound {
        /// The name as entered
        name: String,
    },

    /// An expense referenced a participant id that does not belong to the ledger
    #[error("Participant {id} does not belong to this ledger")]
    UnknownParticipant {
        /// The foreign identifier
        id: ParticipantId,
    },

    /// An expense has nobody to split between
    #[error("Expense {} has no participants to split between", expense.map(|e| e.to_string()).unwrap_or_else(|| "(new)".to_string()))]
    EmptySplit {
        /// The offending expense, if it was already recorded
        expense: Option<ExpenseId>,
    },

    /// An expense identifier did not resolve to a recorded expense
    #[error("Expense {expense} not found")]
    ExpenseNotFound {
        /// The unknown identifier
        expense: ExpenseId,
    },

    /// An expense was settled a second time
    #[error("Expense {expense} is already settled")]
    AlreadySettled {
        /// The expense that was settled before
        expense: ExpenseId,
    },

    /// Expense amount was not a positive decimal
    #[error("Invalid amount '{amount}'")]
    InvalidAmount {
        /// The amount as text
        amount: String,
    },

    /// File not found at the specified path
    ///
    /// Raised by import before any row is read.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// A balances row was malformed
    ///
    /// The whole import aborts on the first bad row.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Arithmetic overflow would occur
    ///
    /// The settlement is rejected and no balance changes.
    #[error("Arithmetic overflow in {operation} for {participant}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Name of the participant whose balance overflowed
        participant: String,
    },

    /// Interactive input ended while a prompt was waiting for an answer
    #[error("Input closed before the session finished")]
    InputClosed,
}

// Conversion from io::Error to SplitError
impl From<std::io::Error> for SplitError {
    fn from(error: std::io::Error) -> Self {
        SplitError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to SplitError
impl From<csv::Error> for SplitError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        match error.kind() {
            csv::ErrorKind::Io(err) => SplitError::IoError {
                message: err.to_string(),
            },
            csv::ErrorKind::Utf8 { err, .. } => SplitError::parse_error(line, err.to_string()),
            csv::ErrorKind::Deserialize { err, .. } => {
                SplitError::parse_error(line, err.to_string())
            }
            _ => SplitError::parse_error(line, error.to_string()),
        }
    }
}

// Conversion from csv_async::Error to SplitError, mirroring csv::Error
impl From<csv_async::Error> for SplitError {
    fn from(error: csv_async::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        match error.kind() {
            csv_async::ErrorKind::Io(err) => SplitError::IoError {
                message: err.to_string(),
            },
            csv_async::ErrorKind::Utf8 { err, .. } => {
                SplitError::parse_error(line, err.to_string())
            }
            _ => SplitError::parse_error(line, error.to_string()),
        }
    }
}

impl SplitError {
    /// Create a ParticipantNotFound error
    pub fn participant_not_found(name: &str) -> Self {
        SplitError::ParticipantNotFound {
            name: name.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: impl ToString) -> Self {
        SplitError::InvalidAmount {
            amount: amount.to_string(),
        }
    }

    /// Create a ParseError error
    pub fn parse_error(line: Option<u64>, message: impl Into<String>) -> Self {
        SplitError::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, participant: &str) -> Self {
        SplitError::ArithmeticOverflow {
            operation: operation.to_string(),
            participant: participant.to_string(),
        }
    }

    /// Whether an interactive caller should ask for the input again
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            SplitError::ParticipantNotFound { .. }
                | SplitError::EmptySplit { .. }
                | SplitError::InvalidAmount { .. }
        )
    }
}
