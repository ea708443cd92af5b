//! CSV format handling for participant balances
//!
//! This module centralizes all CSV format concerns, providing:
//! - The balances header
//! - Conversion from raw CSV fields to participants
//! - Balance output serialization
//!
//! All functions are pure (no file handling) for easy testing.

use crate::types::{Participant, SplitError};
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;
use std::str::FromStr;

/// Header row of a balances file
pub const BALANCES_HEADER: [&str; 3] = ["Name", "Owed Amount", "Paid Amount"];

/// CSV row structure for serialization
///
/// Amounts are carried as text so they keep the full `Decimal` precision in
/// plain (non-scientific) notation.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct BalanceRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Owed Amount")]
    pub owed_amount: String,
    #[serde(rename = "Paid Amount")]
    pub paid_amount: String,
}

impl From<&Participant> for BalanceRow {
    fn from(participant: &Participant) -> Self {
        BalanceRow {
            name: participant.name.clone(),
            owed_amount: participant.owed_amount.to_string(),
            paid_amount: participant.paid_amount.to_string(),
        }
    }
}

/// Check that the first row of a balances file is the expected header
///
/// A file without the header would otherwise lose its first participant.
pub fn check_balances_header(fields: &[&str]) -> Result<(), SplitError> {
    if *fields == BALANCES_HEADER {
        return Ok(());
    }

    Err(SplitError::parse_error(
        Some(1),
        format!(
            "expected header '{}', found '{}'",
            BALANCES_HEADER.join(","),
            fields.join(",")
        ),
    ))
}

/// Convert the fields of one balances row into a Participant
///
/// This function:
/// - Checks the row has exactly three fields
/// - Trims the name
/// - Parses both amounts as `Decimal`
///
/// # Arguments
///
/// * `fields` - The raw fields of the row
/// * `line` - Line of the row in the source file, for error reporting
///
/// # Returns
///
/// * `Ok(Participant)` - Successfully converted row
/// * `Err(SplitError::ParseError)` - Wrong arity or a non-numeric amount
pub fn parse_balance_fields(fields: &[&str], line: Option<u64>) -> Result<Participant, SplitError> {
    let [name, owed, paid] = fields else {
        return Err(SplitError::parse_error(
            line,
            format!(
                "expected {} fields, found {}",
                BALANCES_HEADER.len(),
                fields.len()
            ),
        ));
    };

    let owed_amount = parse_amount(owed, BALANCES_HEADER[1], line)?;
    let paid_amount = parse_amount(paid, BALANCES_HEADER[2], line)?;

    Ok(Participant::with_balances(name, owed_amount, paid_amount))
}

fn parse_amount(text: &str, column: &str, line: Option<u64>) -> Result<Decimal, SplitError> {
    Decimal::from_str(text.trim()).map_err(|_| {
        SplitError::parse_error(line, format!("invalid {} '{}'", column, text.trim()))
    })
}

/// Write participant balances to CSV format
///
/// Writes the header followed by one row per participant, in the order
/// given. The header is written even when there are no participants.
///
/// # Arguments
///
/// * `participants` - Participants to write
/// * `output` - Mutable reference to a writer for outputting CSV
pub fn write_balances_csv(
    participants: &[Participant],
    output: &mut dyn Write,
) -> Result<(), SplitError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(output);

    writer.write_record(BALANCES_HEADER)?;

    for participant in participants {
        writer.serialize(BalanceRow::from(participant))?;
    }

    writer.flush()?;

    Ok(())
}
