//! Asynchronous balances reader
//!
//! Reads a balances file through csv-async. Used by the async load strategy;
//! produces exactly what the synchronous reader produces for the same input.
//!
//! # Architecture
//!
//! ```text
//! tokio::fs::File → compat → AsyncBalanceReader → Vec<Participant>
//!                                  ↓
//!                          csv_format module
//!          (check_balances_header, parse_balance_fields)
//! ```

use crate::io::csv_format::{check_balances_header, parse_balance_fields};
use crate::types::{Participant, SplitError};
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;

/// Asynchronous balances reader
pub struct AsyncBalanceReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncReader<R>,
}

impl<R: AsyncRead + Unpin + Send> AsyncBalanceReader<R> {
    /// Create a new AsyncBalanceReader from an async reader
    ///
    /// Configured like the synchronous reader: header row, trimmed fields,
    /// flexible field counts.
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_reader(reader);

        Self { csv_reader }
    }

    /// Check the header, then read every data row
    ///
    /// Stops at the first malformed row; nothing read so far is returned in
    /// that case.
    pub async fn read_all(&mut self) -> Result<Vec<Participant>, SplitError> {
        let header: Vec<&str> = self.csv_reader.headers().await?.iter().collect();
        check_balances_header(&header)?;

        let mut participants = Vec::new();
        let mut records = self.csv_reader.records();

        while let Some(result) = records.next().await {
            let record = result?;
            let line = record.position().map(|pos| pos.line());
            let fields: Vec<&str> = record.iter().collect();
            participants.push(parse_balance_fields(&fields, line)?);
        }

        Ok(participants)
    }
}
