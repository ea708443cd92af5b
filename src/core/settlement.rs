//! Bill-splitting arithmetic
//!
//! Turns one expense into the balance changes it causes, without touching
//! any participant. The ledger applies the resulting [`SettlementPlan`] to
//! its roster.
//!
//! # Policies
//!
//! - [`SettlementPolicy::Independent`] moves exactly the expense amount from
//!   the payer to the beneficiaries.
//! - [`SettlementPolicy::CarryForward`] first subtracts whatever the payer
//!   has already paid in earlier settlements, so a payer who fronted money
//!   before moves less (or negative) money this time.
//!
//! # Rounding
//!
//! Each beneficiary gets `net_contribution / n`. The last beneficiary in
//! list order absorbs the division remainder, so the shares always add up to
//! the net contribution and every settlement sums to zero across the group.

use crate::types::{Expense, ExpenseId, Participant, ParticipantId, SplitError};
use rust_decimal::Decimal;

/// How the quantity moved by a settlement is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettlementPolicy {
    /// Move the expense amount, ignoring earlier balances
    #[default]
    Independent,

    /// Move `amount - payer.paid_amount`, read at settlement time
    CarryForward,
}

/// Change to one participant's balances
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceDelta {
    pub participant: ParticipantId,
    /// Added to `owed_amount`
    pub owed: Decimal,
    /// Added to `paid_amount`
    pub paid: Decimal,
}

/// Everything one settlement will change
#[derive(Debug, Clone, PartialEq)]
pub struct SettlementPlan {
    /// Quantity moved from the payer to the beneficiaries
    pub net_contribution: Decimal,

    /// Payer delta first, then one delta per beneficiary in list order
    pub deltas: Vec<BalanceDelta>,
}

impl SettlementPlan {
    /// Share assigned to each beneficiary, in list order
    pub fn shares(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.deltas.iter().skip(1).map(|delta| delta.owed)
    }
}

/// Compute the balance changes for one expense
///
/// # Arguments
///
/// * `id` - Identifier of the expense, used for error reporting
/// * `expense` - The expense being settled
/// * `payer` - Current state of the payer
/// * `policy` - How the net contribution is derived
///
/// # Errors
///
/// - `EmptySplit` if the expense has no beneficiaries
/// - `ArithmeticOverflow` if an intermediate value does not fit a `Decimal`
pub fn plan_settlement(
    id: ExpenseId,
    expense: &Expense,
    payer: &Participant,
    policy: SettlementPolicy,
) -> Result<SettlementPlan, SplitError> {
    let total_split = expense.split_between.len();
    if total_split == 0 {
        return Err(SplitError::EmptySplit { expense: Some(id) });
    }

    let net_contribution = match policy {
        SettlementPolicy::Independent => expense.amount,
        SettlementPolicy::CarryForward => expense
            .amount
            .checked_sub(payer.paid_amount)
            .ok_or_else(|| SplitError::arithmetic_overflow("settle", &payer.name))?,
    };

    let shares = split_evenly(net_contribution, total_split)
        .ok_or_else(|| SplitError::arithmetic_overflow("split", &payer.name))?;

    let mut deltas = Vec::with_capacity(total_split + 1);
    deltas.push(BalanceDelta {
        participant: expense.paid_by,
        owed: -net_contribution,
        paid: net_contribution,
    });
    deltas.extend(
        expense
            .split_between
            .iter()
            .zip(shares)
            .map(|(&participant, share)| BalanceDelta {
                participant,
                owed: share,
                paid: -share,
            }),
    );

    Ok(SettlementPlan {
        net_contribution,
        deltas,
    })
}

/// Divide `total` into `parts` shares that add up to `total` exactly
///
/// Returns `None` when `parts` is zero or the arithmetic overflows.
pub fn split_evenly(total: Decimal, parts: usize) -> Option<Vec<Decimal>> {
    if parts == 0 {
        return None;
    }

    let share = total.checked_div(Decimal::from(parts))?;
    let allocated = share.checked_mul(Decimal::from(parts - 1))?;
    let last = total.checked_sub(allocated)?;

    let mut shares = vec![share; parts - 1];
    shares.push(last);
    Some(shares)
}
