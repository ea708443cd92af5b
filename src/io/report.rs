//! Console formatting for settlement and balance reports

use crate::types::{Expense, Participant};
use rust_decimal::{Decimal, RoundingStrategy};

/// Render an amount with two decimal places, midpoint away from zero
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

/// `"{payer} paid {amount} for {beneficiary}, {beneficiary}, ..."`
pub fn expense_line(expense: &Expense, payer: &str, beneficiaries: &[&str]) -> String {
    format!(
        "{} paid {} for {}",
        payer,
        format_amount(expense.amount),
        beneficiaries.join(", ")
    )
}

/// `"{name} owes: {owed}, has paid: {paid}"`
pub fn balance_line(participant: &Participant) -> String {
    format!(
        "{} owes: {}, has paid: {}",
        participant.name,
        format_amount(participant.owed_amount),
        format_amount(participant.paid_amount)
    )
}
