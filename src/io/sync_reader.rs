//! Synchronous balances reader with iterator interface
//!
//! Provides a streaming iterator over participants stored in a balances file.
//! Delegates row conversion to the csv_format module.
//!
//! # Iterator Interface
//!
//! BalanceReader implements the Iterator trait, yielding
//! `Result<Participant, SplitError>` for each data row:
//!
//! ```no_run
//! use expense_splitter::io::sync_reader::BalanceReader;
//! use std::path::Path;
//!
//! let reader = BalanceReader::new(Path::new("group_data.csv")).unwrap();
//! let participants: Result<Vec<_>, _> = reader.collect();
//! ```
//!
//! # Error Handling
//!
//! - A missing file is reported as `FileNotFound` from `new()`
//! - Malformed rows are yielded as `ParseError` carrying the file line
//! - The header row is checked by `new()` and never yielded

use crate::io::csv_format::{check_balances_header, parse_balance_fields};
use crate::types::{Participant, SplitError};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::path::Path;

/// Synchronous balances reader
///
/// The file handle lives inside the reader and is closed when the reader is
/// dropped, whether iteration finished or stopped at an error.
#[derive(Debug)]
pub struct BalanceReader {
    reader: csv::Reader<File>,
    record: StringRecord,
}

impl BalanceReader {
    /// Create a new BalanceReader from a file path
    ///
    /// The CSV reader is configured to:
    /// - Treat the first row as a header
    /// - Trim whitespace from all fields
    /// - Allow flexible field counts, so arity errors are reported per row
    ///
    /// # Errors
    ///
    /// * `FileNotFound` if nothing exists at `path`
    /// * `IoError` if the file exists but cannot be read
    /// * `ParseError` if the first row is not the balances header
    pub fn new(path: &Path) -> Result<Self, SplitError> {
        if !path.exists() {
            return Err(SplitError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let file = File::open(path)?;

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(file);

        let header: Vec<&str> = reader.headers()?.iter().collect();
        check_balances_header(&header)?;

        Ok(Self {
            reader,
            record: StringRecord::new(),
        })
    }
}

impl Iterator for BalanceReader {
    type Item = Result<Participant, SplitError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(true) => {
                let line = self.record.position().map(|pos| pos.line());
                let fields: Vec<&str> = self.record.iter().collect();
                Some(parse_balance_fields(&fields, line))
            }
            Ok(false) => None,
            Err(e) => Some(Err(e.into())),
        }
    }
}
