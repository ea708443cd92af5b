//! Participant roster
//!
//! This module provides the `ParticipantRoster` which owns every participant
//! of a ledger in registration order.
//!
//! The roster is responsible for:
//! - Handing out stable `ParticipantId`s
//! - Resolving participants by name
//! - Applying balance changes atomically with checked arithmetic
//! - Appending or merging imported participants

use crate::core::settlement::BalanceDelta;
use crate::types::{Participant, ParticipantId, SplitError};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Ordered collection of participants
#[derive(Debug, Default)]
pub struct ParticipantRoster {
    participants: Vec<Participant>,
}

impl ParticipantRoster {
    /// Create an empty roster
    pub fn new() -> Self {
        ParticipantRoster {
            participants: Vec::new(),
        }
    }

    /// Append a participant and return its identifier
    ///
    /// Names are not checked for uniqueness.
    pub fn add(&mut self, participant: Participant) -> ParticipantId {
        self.participants.push(participant);
        ParticipantId(self.participants.len() - 1)
    }

    /// Insert a participant, or overwrite the balances of the first one with
    /// the same name
    pub fn upsert_by_name(&mut self, participant: Participant) -> ParticipantId {
        match self.find_by_name(&participant.name) {
            Some(id) => {
                let existing = &mut self.participants[id.0];
                existing.owed_amount = participant.owed_amount;
                existing.paid_amount = participant.paid_amount;
                id
            }
            None => self.add(participant),
        }
    }

    /// Get a participant by identifier
    pub fn get(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.get(id.0)
    }

    /// Whether the identifier was issued by this roster
    pub fn contains(&self, id: ParticipantId) -> bool {
        id.0 < self.participants.len()
    }

    /// Resolve a name to the first participant carrying it
    ///
    /// Both sides are compared with surrounding whitespace trimmed.
    pub fn find_by_name(&self, name: &str) -> Option<ParticipantId> {
        let name = name.trim();
        self.participants
            .iter()
            .position(|participant| participant.name == name)
            .map(ParticipantId)
    }

    /// All participants in registration order
    pub fn all(&self) -> &[Participant] {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Apply a set of balance changes
    ///
    /// New balances are computed against a staged copy first; the roster is
    /// only written once every delta has been applied without overflow.
    /// Several deltas for the same participant accumulate.
    ///
    /// # Errors
    ///
    /// - `UnknownParticipant` if a delta targets an id outside the roster
    /// - `ArithmeticOverflow` if any new balance does not fit a `Decimal`
    pub fn apply_deltas(&mut self, deltas: &[BalanceDelta]) -> Result<(), SplitError> {
        let mut staged: BTreeMap<ParticipantId, (Decimal, Decimal)> = BTreeMap::new();

        for delta in deltas {
            let participant = self
                .get(delta.participant)
                .ok_or(SplitError::UnknownParticipant {
                    id: delta.participant,
                })?;

            let (owed, paid) = staged
                .entry(delta.participant)
                .or_insert((participant.owed_amount, participant.paid_amount));

            *owed = owed
                .checked_add(delta.owed)
                .ok_or_else(|| SplitError::arithmetic_overflow("settle", &participant.name))?;
            *paid = paid
                .checked_add(delta.paid)
                .ok_or_else(|| SplitError::arithmetic_overflow("settle", &participant.name))?;
        }

        for (id, (owed, paid)) in staged {
            let participant = &mut self.participants[id.0];
            participant.owed_amount = owed;
            participant.paid_amount = paid;
        }

        Ok(())
    }
}
