//! Expense Splitter Library
//! # Overview
//!
//! Tracks shared expenses among a small group: who paid, how much, and who
//! owes what. Balances can be exported to and re-imported from a flat CSV file.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Participant, Expense, SplitError)
//! - [`core`] - Business logic components:
//!   - [`core::ledger`] - Registration, settlement, reporting, persistence
//!   - [`core::roster`] - Participant storage and balance updates
//!   - [`core::expense_store`] - Expense storage and settlement tracking
//!   - [`core::settlement`] - Bill-splitting arithmetic
//! - [`io`] - Balances file format, readers and report formatting
//! - [`strategy`] - Sync and async load strategies for imports
//! - [`cli`] - Argument parsing and the interactive session
//! - [`logging`] - Tracing subscriber setup
//!
//! # Settlement
//!
//! Settling an expense moves its net contribution from the payer to the
//! beneficiaries:
//!
//! - payer: `owed_amount -= net`, `paid_amount += net`
//! - each beneficiary: `owed_amount += share`, `paid_amount -= share`
//!
//! Each expense is settled at most once.
//!
//! ```
//! use expense_splitter::{Ledger, Participant};
//! use rust_decimal::Decimal;
//!
//! let mut ledger = Ledger::new();
//! for name in ["Alice", "Bob", "Carol"] {
//!     ledger.add_participant(Participant::new(name));
//! }
//! let id = ledger
//!     .record_expense(Decimal::new(30, 0), "Alice", &["Alice", "Bob", "Carol"])
//!     .unwrap();
//! ledger.settle(id).unwrap();
//!
//! assert_eq!(ledger.participants()[0].owed_amount, Decimal::new(-20, 0));
//! assert_eq!(ledger.participants()[1].owed_amount, Decimal::new(10, 0));
//! ```

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod logging;
pub mod strategy;
pub mod types;

pub use crate::core::{ImportMode, Ledger, SettlementPolicy};
pub use crate::io::write_balances_csv;
pub use crate::types::{Expense, ExpenseId, Participant, ParticipantId, SettlementStatus, SplitError};
