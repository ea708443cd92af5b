//! Expense storage
//!
//! This module provides the ExpenseStore component that keeps every recorded
//! expense in insertion order and tracks which ones have been settled.
//!
//! # Settlement Tracking
//!
//! Each expense carries a `SettlementStatus`. The store flips it to
//! `Settled` once the ledger has applied the expense, so a second settlement
//! attempt can be rejected instead of double counting.

use crate::types::{Expense, ExpenseId, SettlementStatus, SplitError};

/// Expense store
///
/// Maintains a Vec of expenses; an `ExpenseId` is the index into it.
#[derive(Debug, Default)]
pub struct ExpenseStore {
    expenses: Vec<Expense>,
}

impl ExpenseStore {
    /// Create a new empty expense store
    pub fn new() -> Self {
        ExpenseStore {
            expenses: Vec::new(),
        }
    }

    /// Store an expense and return its identifier
    pub fn store(&mut self, expense: Expense) -> ExpenseId {
        self.expenses.push(expense);
        ExpenseId(self.expenses.len() - 1)
    }

    /// Get an immutable reference to a stored expense
    ///
    /// # Returns
    ///
    /// * `Some(&Expense)` - If the expense exists
    /// * `None` - If the expense ID is not found
    pub fn get(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.get(id.0)
    }

    /// All expenses in insertion order
    pub fn all(&self) -> &[Expense] {
        &self.expenses
    }

    /// Identifiers of every expense still waiting for settlement
    pub fn pending(&self) -> Vec<ExpenseId> {
        self.expenses
            .iter()
            .enumerate()
            .filter(|(_, expense)| !expense.is_settled())
            .map(|(index, _)| ExpenseId(index))
            .collect()
    }

    /// Mark an expense as settled
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the expense was pending and is now settled
    /// * `Err(SplitError::AlreadySettled)` - If it was settled before
    /// * `Err(SplitError::ExpenseNotFound)` - If the ID is unknown
    pub fn mark_settled(&mut self, id: ExpenseId) -> Result<(), SplitError> {
        let expense = self
            .expenses
            .get_mut(id.0)
            .ok_or(SplitError::ExpenseNotFound { expense: id })?;

        if expense.is_settled() {
            return Err(SplitError::AlreadySettled { expense: id });
        }

        expense.status = SettlementStatus::Settled;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }
}
