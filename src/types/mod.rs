//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `participant`: Participants and their identifiers
//! - `expense`: Expenses, their identifiers and settlement status
//! - `error`: Error types for the expense splitter

pub mod error;
pub mod expense;
pub mod participant;

pub use error::SplitError;
pub use expense::{Expense, ExpenseId, SettlementStatus};
pub use participant::{Participant, ParticipantId};
