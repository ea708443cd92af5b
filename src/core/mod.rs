//! Core business logic module
//!
//! This module contains the ledger and the components it coordinates:
//! - `ledger` - Registration, settlement, reporting and persistence
//! - `roster` - Participant storage and atomic balance updates
//! - `expense_store` - Expense storage and settlement tracking
//! - `settlement` - Bill-splitting arithmetic

pub mod expense_store;
pub mod ledger;
pub mod roster;
pub mod settlement;

pub use expense_store::ExpenseStore;
pub use ledger::{ImportMode, Ledger};
pub use roster::ParticipantRoster;
pub use settlement::{plan_settlement, BalanceDelta, SettlementPlan, SettlementPolicy};
