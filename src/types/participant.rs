//! Participant-related types for the expense splitter
//!
//! This module defines the Participant structure and the identifier the
//! ledger hands out when one is registered.

use rust_decimal::Decimal;
use std::fmt;

/// Participant identifier
///
/// Position of the participant in the ledger's roster. Participants are never
/// removed, so an identifier stays valid for the lifetime of its ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticipantId(pub usize);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named party sharing expenses
///
/// Both balances are signed. After settlement a participant who fronted more
/// than their share has a negative `owed_amount` (the group owes them) and a
/// positive `paid_amount`.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    /// Display name, unique within a ledger by convention only
    pub name: String,

    /// What the participant owes the group (negative: what the group owes them)
    pub owed_amount: Decimal,

    /// Net contribution to the group so far
    pub paid_amount: Decimal,
}

impl Participant {
    /// Create a participant with zero balances
    ///
    /// Surrounding whitespace is trimmed from the name.
    pub fn new(name: &str) -> Self {
        Self::with_balances(name, Decimal::ZERO, Decimal::ZERO)
    }

    /// Create a participant with explicit balances (used when importing)
    pub fn with_balances(name: &str, owed_amount: Decimal, paid_amount: Decimal) -> Self {
        Participant {
            name: name.trim().to_string(),
            owed_amount,
            paid_amount,
        }
    }
}
