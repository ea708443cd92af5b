//! Interactive session
//!
//! Drives one bill-splitting round over any line-based input and output:
//! collect names, collect expenses, settle and print the split, save the
//! balances, then load a balances file and print it.
//!
//! Input errors (unknown names, bad amounts, empty splits) are printed and the
//! current expense is entered again. File errors during the load step are
//! printed and end the session normally.

use crate::cli::args::StrategyType;
use crate::core::{ImportMode, Ledger, SettlementPolicy};
use crate::strategy::create_strategy;
use crate::types::{Participant, SplitError};
use rust_decimal::Decimal;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

const NAMES_PROMPT: &str = "Enter names of persons separated by comma: ";
const AMOUNT_PROMPT: &str = "Enter expense amount: ";
const PAYER_PROMPT: &str = "Enter name of person who paid: ";
const SPLIT_PROMPT: &str = "Enter names of persons to split between (separated by comma): ";
const CONTINUE_PROMPT: &str = "Do you want to add another expense? (y/n) ";
const SAVE_PROMPT: &str = "Enter file path to save to (default extension is .csv): ";
const LOAD_PROMPT: &str = "Enter file path to load from (default extension is .csv): ";

/// Settings for one interactive session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Used when the save prompt is answered with a blank line
    pub save_path: PathBuf,

    /// When set, loaded without asking
    pub load_path: Option<PathBuf>,

    pub strategy: StrategyType,
    pub policy: SettlementPolicy,
    pub import_mode: ImportMode,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            save_path: PathBuf::from("group_data.csv"),
            load_path: None,
            strategy: StrategyType::Sync,
            policy: SettlementPolicy::default(),
            import_mode: ImportMode::default(),
        }
    }
}

/// Split a comma separated answer into trimmed, non-blank names
pub fn split_names(line: &str) -> Vec<String> {
    line.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// One prompt-driven round of bill splitting
pub struct Session<R, W> {
    input: R,
    output: W,
    config: SessionConfig,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, config: SessionConfig) -> Self {
        Session {
            input,
            output,
            config,
        }
    }

    /// Run every step of the session and return the final ledger
    ///
    /// # Errors
    ///
    /// - `InputClosed` if the input ends while a prompt is waiting
    /// - `IoError` if the console or the save file cannot be written
    /// - `ArithmeticOverflow` if settlement overflows
    pub fn run(&mut self) -> Result<Ledger, SplitError> {
        let mut ledger = Ledger::with_policy(self.config.policy);

        self.read_participants(&mut ledger)?;
        self.read_expenses(&mut ledger)?;

        writeln!(self.output, "Splitted Bill:")?;
        for line in ledger.settle_all_and_report()? {
            writeln!(self.output, "{}", line)?;
        }

        self.save(&ledger)?;
        self.load(&mut ledger)?;

        Ok(ledger)
    }

    fn read_participants(&mut self, ledger: &mut Ledger) -> Result<(), SplitError> {
        loop {
            let names = split_names(&self.prompt(NAMES_PROMPT)?);
            if names.is_empty() {
                writeln!(self.output, "Please enter at least one name.")?;
                continue;
            }

            for name in names {
                ledger.add_participant(Participant::new(&name));
            }
            return Ok(());
        }
    }

    fn read_expenses(&mut self, ledger: &mut Ledger) -> Result<(), SplitError> {
        loop {
            match self.read_expense(ledger) {
                Ok(()) => {}
                Err(error) if error.is_input_error() => {
                    tracing::warn!(%error, "expense rejected");
                    writeln!(self.output, "{}", error)?;
                    continue;
                }
                Err(error) => return Err(error),
            }

            let answer = self.prompt(CONTINUE_PROMPT)?;
            if !answer.trim().eq_ignore_ascii_case("y") {
                return Ok(());
            }
        }
    }

    fn read_expense(&mut self, ledger: &mut Ledger) -> Result<(), SplitError> {
        let amount = self.prompt(AMOUNT_PROMPT)?;
        let amount = Decimal::from_str(amount.trim())
            .map_err(|_| SplitError::invalid_amount(amount.trim()))?;
        if amount <= Decimal::ZERO {
            return Err(SplitError::invalid_amount(amount));
        }

        let payer = self.prompt(PAYER_PROMPT)?;
        if ledger.find_participant(&payer).is_none() {
            return Err(SplitError::participant_not_found(payer.trim()));
        }

        let beneficiaries = split_names(&self.prompt(SPLIT_PROMPT)?);
        ledger.record_expense(amount, &payer, &beneficiaries)?;
        Ok(())
    }

    fn save(&mut self, ledger: &Ledger) -> Result<(), SplitError> {
        let answer = self.prompt(SAVE_PROMPT)?;
        let path = match answer.trim() {
            "" => self.config.save_path.clone(),
            path => PathBuf::from(path),
        };

        ledger.export_balances(&path)
    }

    fn load(&mut self, ledger: &mut Ledger) -> Result<(), SplitError> {
        let path = match self.config.load_path.clone() {
            Some(path) => path,
            None => {
                let answer = self.prompt(LOAD_PROMPT)?;
                if answer.trim().is_empty() {
                    writeln!(self.output, "Invalid file path. Data not loaded.")?;
                    return Ok(());
                }
                PathBuf::from(answer.trim())
            }
        };

        let strategy = create_strategy(self.config.strategy);
        match ledger.import_balances_with(&path, strategy.as_ref(), self.config.import_mode) {
            Ok(_) => {
                for line in ledger.report_balances() {
                    writeln!(self.output, "{}", line)?;
                }
                Ok(())
            }
            Err(error @ (SplitError::FileNotFound { .. } | SplitError::ParseError { .. })) => {
                tracing::warn!(%error, "balances not loaded");
                writeln!(self.output, "{}", error)?;
                Ok(())
            }
            Err(error) => Err(error),
        }
    }

    /// Print `text` and read one line, without its line ending
    fn prompt(&mut self, text: &str) -> Result<String, SplitError> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(SplitError::InputClosed);
        }

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}
