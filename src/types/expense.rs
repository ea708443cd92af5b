//! Expense-related types for the expense splitter
//!
//! An expense records one payment event. It refers to participants by
//! [`ParticipantId`] rather than owning them; the ledger that stores the
//! expense owns the participants.

use super::participant::ParticipantId;
use rust_decimal::Decimal;
use std::fmt;

/// Expense identifier
///
/// Position of the expense in the ledger's expense store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExpenseId(pub usize);

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Whether an expense has been applied to participant balances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettlementStatus {
    /// Recorded but not yet applied
    #[default]
    Pending,

    /// Applied exactly once; further settlement is rejected
    Settled,
}

/// One payment event
///
/// The amount and references are fixed once the expense is created. Only
/// the settlement status changes, and only the owning ledger changes it.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    /// Total amount paid (strictly positive once validated by a ledger)
    pub amount: Decimal,

    /// Who fronted the money
    pub paid_by: ParticipantId,

    /// Who shares the cost, in entry order
    pub split_between: Vec<ParticipantId>,

    pub(crate) status: SettlementStatus,
}

impl Expense {
    /// Create a pending expense
    ///
    /// No validation happens here; [`crate::Ledger::add_expense`] checks
    /// the amount and the participant references.
    pub fn new(amount: Decimal, paid_by: ParticipantId, split_between: Vec<ParticipantId>) -> Self {
        Expense {
            amount,
            paid_by,
            split_between,
            status: SettlementStatus::Pending,
        }
    }

    /// Current settlement status
    pub fn status(&self) -> SettlementStatus {
        self.status
    }

    /// Shorthand for `status() == SettlementStatus::Settled`
    pub fn is_settled(&self) -> bool {
        self.status == SettlementStatus::Settled
    }
}
