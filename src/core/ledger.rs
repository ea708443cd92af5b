//! Expense ledger
//!
//! This module provides the Ledger that owns a group's participants and
//! expenses, coordinating between the ParticipantRoster and ExpenseStore.
//!
//! The ledger enforces business rules such as:
//! - Expenses only reference participants registered with this ledger
//! - Expense amounts are strictly positive
//! - Each expense is settled at most once
//! - Imports are all-or-nothing

use crate::core::expense_store::ExpenseStore;
use crate::core::roster::ParticipantRoster;
use crate::core::settlement::{plan_settlement, SettlementPolicy};
use crate::io::csv_format::write_balances_csv;
use crate::io::report::{balance_line, expense_line};
use crate::strategy::{LoadStrategy, SyncLoadStrategy};
use crate::types::{Expense, ExpenseId, Participant, ParticipantId, SplitError};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// How imported participants are combined with the existing roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    /// Append every row, even when the name already exists
    #[default]
    Append,

    /// Overwrite the balances of the first participant with the same name;
    /// append unknown names. Later rows win over earlier ones.
    Merge,
}

/// Ledger for one group
///
/// Created empty; participants and expenses are appended over its lifetime
/// and never removed.
#[derive(Debug, Default)]
pub struct Ledger {
    roster: ParticipantRoster,
    expenses: ExpenseStore,
    policy: SettlementPolicy,
}

impl Ledger {
    /// Create an empty ledger using [`SettlementPolicy::Independent`]
    pub fn new() -> Self {
        Self::with_policy(SettlementPolicy::default())
    }

    /// Create an empty ledger with an explicit settlement policy
    pub fn with_policy(policy: SettlementPolicy) -> Self {
        Ledger {
            roster: ParticipantRoster::new(),
            expenses: ExpenseStore::new(),
            policy,
        }
    }

    pub fn policy(&self) -> SettlementPolicy {
        self.policy
    }

    /// Register a participant
    pub fn add_participant(&mut self, participant: Participant) -> ParticipantId {
        let id = self.roster.add(participant);
        tracing::debug!(participant = %id, "registered participant");
        id
    }

    /// All participants in registration order
    pub fn participants(&self) -> &[Participant] {
        self.roster.all()
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.roster.get(id)
    }

    /// First participant whose name matches, ignoring surrounding whitespace
    pub fn find_participant(&self, name: &str) -> Option<ParticipantId> {
        self.roster.find_by_name(name)
    }

    /// Build an expense from participant names
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount` is not strictly positive
    /// - `ParticipantNotFound` for the first name that is not registered
    ///   (payer first, then beneficiaries in order)
    /// - `EmptySplit` if no beneficiary is named
    pub fn expense<S: AsRef<str>>(
        &self,
        amount: Decimal,
        payer: &str,
        beneficiaries: &[S],
    ) -> Result<Expense, SplitError> {
        if amount <= Decimal::ZERO {
            return Err(SplitError::invalid_amount(amount));
        }

        let paid_by = self.resolve(payer)?;
        let split_between = beneficiaries
            .iter()
            .map(|name| self.resolve(name.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        if split_between.is_empty() {
            return Err(SplitError::EmptySplit { expense: None });
        }

        Ok(Expense::new(amount, paid_by, split_between))
    }

    fn resolve(&self, name: &str) -> Result<ParticipantId, SplitError> {
        self.roster
            .find_by_name(name)
            .ok_or_else(|| SplitError::participant_not_found(name.trim()))
    }

    /// Record an expense
    ///
    /// An empty beneficiary list is accepted here and rejected at settlement.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if the amount is not strictly positive
    /// - `UnknownParticipant` if the payer or a beneficiary was not issued by
    ///   this ledger
    pub fn add_expense(&mut self, expense: Expense) -> Result<ExpenseId, SplitError> {
        if expense.amount <= Decimal::ZERO {
            return Err(SplitError::invalid_amount(expense.amount));
        }

        if let Some(&id) = std::iter::once(&expense.paid_by)
            .chain(expense.split_between.iter())
            .find(|&&id| !self.roster.contains(id))
        {
            return Err(SplitError::UnknownParticipant { id });
        }

        let id = self.expenses.store(expense);
        tracing::debug!(expense = %id, "recorded expense");
        Ok(id)
    }

    /// [`Ledger::expense`] followed by [`Ledger::add_expense`]
    pub fn record_expense<S: AsRef<str>>(
        &mut self,
        amount: Decimal,
        payer: &str,
        beneficiaries: &[S],
    ) -> Result<ExpenseId, SplitError> {
        let expense = self.expense(amount, payer, beneficiaries)?;
        self.add_expense(expense)
    }

    /// All expenses in insertion order
    pub fn expenses(&self) -> &[Expense] {
        self.expenses.all()
    }

    pub fn expense_at(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.get(id)
    }

    /// Apply one expense to participant balances
    ///
    /// The payer's `owed_amount` falls and `paid_amount` rises by the net
    /// contribution; each beneficiary takes the opposite of their share. See
    /// [`crate::core::settlement`] for how the net contribution and shares
    /// are derived.
    ///
    /// # Errors
    ///
    /// Balances are unchanged on every error:
    /// - `ExpenseNotFound` if `id` is unknown
    /// - `AlreadySettled` if the expense was settled before
    /// - `EmptySplit` if the expense has no beneficiaries
    /// - `ArithmeticOverflow` if a new balance does not fit a `Decimal`
    pub fn settle(&mut self, id: ExpenseId) -> Result<(), SplitError> {
        let expense = self
            .expenses
            .get(id)
            .ok_or(SplitError::ExpenseNotFound { expense: id })?;

        if expense.is_settled() {
            return Err(SplitError::AlreadySettled { expense: id });
        }

        let payer = self
            .roster
            .get(expense.paid_by)
            .ok_or(SplitError::UnknownParticipant {
                id: expense.paid_by,
            })?;

        let plan = plan_settlement(id, expense, payer, self.policy)?;

        self.roster.apply_deltas(&plan.deltas)?;
        self.expenses.mark_settled(id)?;

        tracing::debug!(
            expense = %id,
            net_contribution = %plan.net_contribution,
            "settled expense"
        );

        Ok(())
    }

    /// Settle every pending expense and describe every expense
    ///
    /// Expenses are visited in insertion order. Pending ones are settled;
    /// settled ones are only described, so calling this twice does not
    /// double count. Stops at the first settlement error.
    pub fn settle_all_and_report(&mut self) -> Result<Vec<String>, SplitError> {
        for id in self.expenses.pending() {
            self.settle(id)?;
        }

        Ok(self
            .expenses
            .all()
            .iter()
            .map(|expense| self.describe(expense))
            .collect())
    }

    fn describe(&self, expense: &Expense) -> String {
        let name_of = |id: ParticipantId| {
            self.roster
                .get(id)
                .map(|participant| participant.name.as_str())
                .unwrap_or("?")
        };

        let beneficiaries: Vec<&str> = expense.split_between.iter().map(|&id| name_of(id)).collect();
        expense_line(expense, name_of(expense.paid_by), &beneficiaries)
    }

    /// One line per participant with both balances to two decimal places
    pub fn report_balances(&self) -> Vec<String> {
        self.roster.all().iter().map(balance_line).collect()
    }

    /// Sum of every participant's `owed_amount`
    ///
    /// Zero after any sequence of settlements starting from zero balances.
    /// `None` if the sum overflows.
    pub fn total_owed(&self) -> Option<Decimal> {
        self.roster
            .all()
            .iter()
            .try_fold(Decimal::ZERO, |total, participant| {
                total.checked_add(participant.owed_amount)
            })
    }

    /// Write every participant's balances to `path`, replacing any existing file
    pub fn export_balances(&self, path: &Path) -> Result<(), SplitError> {
        let mut output = BufWriter::new(File::create(path)?);
        write_balances_csv(self.roster.all(), &mut output)?;

        tracing::info!(
            path = %path.display(),
            participants = self.roster.len(),
            "exported balances"
        );

        Ok(())
    }

    /// Append every participant stored at `path`
    ///
    /// Uses the synchronous reader and [`ImportMode::Append`]. Returns the
    /// number of rows loaded.
    pub fn import_balances(&mut self, path: &Path) -> Result<usize, SplitError> {
        self.import_balances_with(path, &SyncLoadStrategy, ImportMode::Append)
    }

    /// Load participants from `path` with a chosen reader and import mode
    ///
    /// The roster is untouched unless the whole file parsed.
    ///
    /// # Errors
    ///
    /// - `FileNotFound` if nothing exists at `path`
    /// - `ParseError` for the first malformed row
    pub fn import_balances_with(
        &mut self,
        path: &Path,
        strategy: &dyn LoadStrategy,
        mode: ImportMode,
    ) -> Result<usize, SplitError> {
        let participants = strategy.load(path)?;
        let loaded = participants.len();

        for participant in participants {
            match mode {
                ImportMode::Append => {
                    self.roster.add(participant);
                }
                ImportMode::Merge => {
                    self.roster.upsert_by_name(participant);
                }
            }
        }

        tracing::info!(path = %path.display(), rows = loaded, ?mode, "imported balances");

        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::AsyncLoadStrategy;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    fn dec(value: i64) -> Decimal {
        Decimal::new(value, 0)
    }

    fn group(names: &[&str]) -> Ledger {
        let mut ledger = Ledger::new();
        for name in names {
            ledger.add_participant(Participant::new(name));
        }
        ledger
    }

    fn balances(ledger: &Ledger) -> Vec<(String, Decimal, Decimal)> {
        ledger
            .participants()
            .iter()
            .map(|p| (p.name.clone(), p.owed_amount, p.paid_amount))
            .collect()
    }

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_three_way_split_scenario() {
        let mut ledger = group(&["Alice", "Bob", "Carol"]);
        let id = ledger
            .record_expense(dec(30), "Alice", &["Alice", "Bob", "Carol"])
            .unwrap();

        ledger.settle(id).unwrap();

        assert_eq!(
            balances(&ledger),
            vec![
                ("Alice".to_string(), dec(-20), dec(20)),
                ("Bob".to_string(), dec(10), dec(-10)),
                ("Carol".to_string(), dec(10), dec(-10)),
            ]
        );
        assert_eq!(ledger.total_owed(), Some(Decimal::ZERO));
    }

    #[rstest]
    #[case::two_way(40, &["Alice", "Bob"])]
    #[case::payer_excluded(30, &["Bob", "Carol"])]
    #[case::uneven(10, &["Alice", "Bob", "Carol"])]
    fn test_beneficiaries_absorb_payer_contribution(
        #[case] amount: i64,
        #[case] beneficiaries: &[&str],
    ) {
        let mut ledger = group(&["Alice", "Bob", "Carol"]);
        let id = ledger
            .record_expense(dec(amount), "Alice", beneficiaries)
            .unwrap();

        ledger.settle(id).unwrap();

        let beneficiary_owed: Decimal = beneficiaries
            .iter()
            .map(|name| ledger.find_participant(name).unwrap())
            .map(|id| ledger.participant(id).unwrap().owed_amount)
            .sum();
        // Alice's own owed balance also carries the full amount she fronted.
        let payer_delta = if beneficiaries.contains(&"Alice") {
            dec(-amount)
        } else {
            Decimal::ZERO
        };
        let alice = ledger.participant(ParticipantId(0)).unwrap();

        assert_eq!(beneficiary_owed - payer_delta, dec(amount));
        assert_eq!(alice.paid_amount, -alice.owed_amount);
        assert_eq!(ledger.total_owed(), Some(Decimal::ZERO));
    }

    #[test]
    fn test_empty_split_leaves_balances_unchanged() {
        let mut ledger = group(&["Alice", "Bob"]);
        let id = ledger
            .add_expense(Expense::new(dec(30), ParticipantId(0), Vec::new()))
            .unwrap();

        let result = ledger.settle(id);

        assert_eq!(result, Err(SplitError::EmptySplit { expense: Some(id) }));
        assert!(ledger
            .participants()
            .iter()
            .all(|p| p.owed_amount.is_zero() && p.paid_amount.is_zero()));
        assert!(!ledger.expense_at(id).unwrap().is_settled());
    }

    #[test]
    fn test_settling_twice_is_rejected() {
        let mut ledger = group(&["Alice", "Bob"]);
        let id = ledger.record_expense(dec(20), "Alice", &["Bob"]).unwrap();

        ledger.settle(id).unwrap();
        let after_first = balances(&ledger);

        assert_eq!(
            ledger.settle(id),
            Err(SplitError::AlreadySettled { expense: id })
        );
        assert_eq!(balances(&ledger), after_first);
    }

    #[test]
    fn test_settle_unknown_expense() {
        let mut ledger = group(&["Alice"]);
        assert_eq!(
            ledger.settle(ExpenseId(0)),
            Err(SplitError::ExpenseNotFound {
                expense: ExpenseId(0)
            })
        );
    }

    #[test]
    fn test_overflowing_settlement_leaves_ledger_untouched() {
        let mut ledger = Ledger::with_policy(SettlementPolicy::CarryForward);
        ledger.add_participant(Participant::with_balances(
            "Alice",
            Decimal::ZERO,
            Decimal::MIN,
        ));
        ledger.add_participant(Participant::new("Bob"));
        let id = ledger.record_expense(dec(10), "Alice", &["Bob"]).unwrap();
        let before = balances(&ledger);

        assert_eq!(
            ledger.settle(id),
            Err(SplitError::arithmetic_overflow("settle", "Alice"))
        );
        assert_eq!(
            ledger.settle_all_and_report(),
            Err(SplitError::arithmetic_overflow("settle", "Alice"))
        );
        assert_eq!(balances(&ledger), before);
        assert!(!ledger.expense_at(id).unwrap().is_settled());
    }

    #[test]
    fn test_carry_forward_policy_uses_prior_payments() {
        let mut ledger = Ledger::with_policy(SettlementPolicy::CarryForward);
        for name in ["Alice", "Bob", "Carol"] {
            ledger.add_participant(Participant::new(name));
        }
        let everyone = ["Alice", "Bob", "Carol"];
        let first = ledger.record_expense(dec(30), "Alice", &everyone).unwrap();
        let second = ledger.record_expense(dec(50), "Alice", &everyone).unwrap();

        ledger.settle(first).unwrap();
        // Alice already has paid_amount 20, so only 30 of the 50 moves.
        ledger.settle(second).unwrap();

        assert_eq!(
            balances(&ledger),
            vec![
                ("Alice".to_string(), dec(-40), dec(40)),
                ("Bob".to_string(), dec(20), dec(-20)),
                ("Carol".to_string(), dec(20), dec(-20)),
            ]
        );
        assert_eq!(ledger.total_owed(), Some(Decimal::ZERO));
    }

    #[test]
    fn test_independent_policy_ignores_prior_payments() {
        let mut ledger = group(&["Alice", "Bob", "Carol"]);
        let everyone = ["Alice", "Bob", "Carol"];
        ledger.record_expense(dec(30), "Alice", &everyone).unwrap();
        ledger.record_expense(dec(30), "Alice", &everyone).unwrap();

        ledger.settle_all_and_report().unwrap();

        assert_eq!(
            balances(&ledger),
            vec![
                ("Alice".to_string(), dec(-40), dec(40)),
                ("Bob".to_string(), dec(20), dec(-20)),
                ("Carol".to_string(), dec(20), dec(-20)),
            ]
        );
    }

    #[rstest]
    #[case::unknown_payer("Zed", &["Alice"], "Zed")]
    #[case::unknown_beneficiary("Alice", &["Bob", "Yan"], "Yan")]
    #[case::trimmed_name(" Zed ", &["Alice"], "Zed")]
    fn test_expense_rejects_unknown_names(
        #[case] payer: &str,
        #[case] beneficiaries: &[&str],
        #[case] missing: &str,
    ) {
        let ledger = group(&["Alice", "Bob"]);

        assert_eq!(
            ledger.expense(dec(10), payer, beneficiaries),
            Err(SplitError::participant_not_found(missing))
        );
    }

    #[rstest]
    #[case::zero(Decimal::ZERO)]
    #[case::negative(dec(-5))]
    fn test_expense_rejects_non_positive_amount(#[case] amount: Decimal) {
        let mut ledger = group(&["Alice", "Bob"]);

        assert!(matches!(
            ledger.expense(amount, "Alice", &["Bob"]),
            Err(SplitError::InvalidAmount { .. })
        ));
        assert!(matches!(
            ledger.add_expense(Expense::new(amount, ParticipantId(0), vec![ParticipantId(1)])),
            Err(SplitError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_expense_rejects_empty_beneficiaries() {
        let ledger = group(&["Alice"]);
        let none: [&str; 0] = [];

        assert_eq!(
            ledger.expense(dec(10), "Alice", &none),
            Err(SplitError::EmptySplit { expense: None })
        );
    }

    #[test]
    fn test_add_expense_rejects_foreign_participants() {
        let mut ledger = group(&["Alice", "Bob"]);

        let result = ledger.add_expense(Expense::new(
            dec(10),
            ParticipantId(0),
            vec![ParticipantId(1), ParticipantId(2)],
        ));

        assert_eq!(
            result,
            Err(SplitError::UnknownParticipant {
                id: ParticipantId(2)
            })
        );
        assert!(ledger.expenses().is_empty());
    }

    #[test]
    fn test_settle_all_and_report_lines() {
        let mut ledger = group(&["Alice", "Bob", "Carol"]);
        ledger
            .record_expense(dec(30), "Alice", &["Alice", "Bob", "Carol"])
            .unwrap();
        ledger
            .record_expense(Decimal::new(1250, 2), "Bob", &["Carol"])
            .unwrap();

        let lines = ledger.settle_all_and_report().unwrap();

        assert_eq!(
            lines,
            vec![
                "Alice paid 30.00 for Alice, Bob, Carol".to_string(),
                "Bob paid 12.50 for Carol".to_string(),
            ]
        );
        assert!(ledger.expenses().iter().all(Expense::is_settled));
    }

    #[test]
    fn test_settle_all_and_report_twice_does_not_double_count() {
        let mut ledger = group(&["Alice", "Bob"]);
        ledger.record_expense(dec(20), "Alice", &["Alice", "Bob"]).unwrap();

        let first = ledger.settle_all_and_report().unwrap();
        let after_first = balances(&ledger);
        let second = ledger.settle_all_and_report().unwrap();

        assert_eq!(first, second);
        assert_eq!(balances(&ledger), after_first);
    }

    #[test]
    fn test_settle_all_and_report_stops_at_empty_split() {
        let mut ledger = group(&["Alice", "Bob"]);
        ledger.record_expense(dec(20), "Alice", &["Bob"]).unwrap();
        let empty = ledger
            .add_expense(Expense::new(dec(5), ParticipantId(1), Vec::new()))
            .unwrap();

        assert_eq!(
            ledger.settle_all_and_report(),
            Err(SplitError::EmptySplit {
                expense: Some(empty)
            })
        );
        assert!(ledger.expense_at(ExpenseId(0)).unwrap().is_settled());
    }

    #[test]
    fn test_report_balances() {
        let mut ledger = group(&["Alice", "Bob", "Carol"]);
        ledger
            .record_expense(dec(10), "Alice", &["Alice", "Bob", "Carol"])
            .unwrap();
        ledger.settle_all_and_report().unwrap();

        assert_eq!(
            ledger.report_balances(),
            vec![
                "Alice owes: -6.67, has paid: 6.67".to_string(),
                "Bob owes: 3.33, has paid: -3.33".to_string(),
                "Carol owes: 3.33, has paid: -3.33".to_string(),
            ]
        );
    }

    #[test]
    fn test_export_then_import_round_trip() {
        let mut ledger = group(&["Alice", "Bob", "Carol"]);
        ledger
            .record_expense(dec(10), "Alice", &["Alice", "Bob", "Carol"])
            .unwrap();
        ledger.settle_all_and_report().unwrap();

        let dir = tempdir().unwrap();
        let path = dir.path().join("balances.csv");
        ledger.export_balances(&path).unwrap();

        let mut restored = Ledger::new();
        assert_eq!(restored.import_balances(&path).unwrap(), 3);

        assert_eq!(balances(&restored), balances(&ledger));
    }

    #[test]
    fn test_export_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("balances.csv");
        std::fs::write(&path, "stale content that is much longer than the new file\n").unwrap();

        group(&["Alice"]).export_balances(&path).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Name,Owed Amount,Paid Amount\nAlice,0,0\n"
        );
    }

    #[test]
    fn test_import_appends_duplicate_names() {
        let file = create_temp_csv("Name,Owed Amount,Paid Amount\nAlice,5,-5\n");
        let mut ledger = group(&["Alice"]);

        ledger.import_balances(file.path()).unwrap();

        assert_eq!(ledger.participants().len(), 2);
        assert_eq!(ledger.participants()[0].owed_amount, Decimal::ZERO);
        assert_eq!(ledger.participants()[1].name, "Alice");
        assert_eq!(ledger.participants()[1].owed_amount, dec(5));
    }

    #[test]
    fn test_import_merge_updates_by_name() {
        let file = create_temp_csv(
            "Name,Owed Amount,Paid Amount\nAlice,5,-5\nDave,1,-1\nAlice,7,-7\n",
        );
        let mut ledger = group(&["Alice", "Bob"]);

        let loaded = ledger
            .import_balances_with(file.path(), &SyncLoadStrategy, ImportMode::Merge)
            .unwrap();

        assert_eq!(loaded, 3);
        assert_eq!(
            balances(&ledger),
            vec![
                ("Alice".to_string(), dec(7), dec(-7)),
                ("Bob".to_string(), Decimal::ZERO, Decimal::ZERO),
                ("Dave".to_string(), dec(1), dec(-1)),
            ]
        );
    }

    #[test]
    fn test_import_missing_file_leaves_roster_unchanged() {
        let mut ledger = group(&["Alice"]);

        let result = ledger.import_balances(Path::new("does-not-exist.csv"));

        assert_eq!(
            result,
            Err(SplitError::FileNotFound {
                path: "does-not-exist.csv".to_string()
            })
        );
        assert_eq!(ledger.participants().len(), 1);
    }

    #[rstest]
    #[case::sync_reader(&SyncLoadStrategy)]
    #[case::async_reader(&AsyncLoadStrategy)]
    fn test_import_short_second_row_is_atomic(#[case] strategy: &dyn LoadStrategy) {
        let file = create_temp_csv("Name,Owed Amount,Paid Amount\nAlice,5,-5\nBob,5\n");
        let mut ledger = group(&["Carol"]);

        let result = ledger.import_balances_with(file.path(), strategy, ImportMode::Append);

        assert!(matches!(result, Err(SplitError::ParseError { .. })));
        assert_eq!(ledger.participants().len(), 1);
    }
}
