//! I/O module
//!
//! Handles the balances file and console report formatting.
//!
//! # Components
//!
//! - `csv_format` - Balances format handling (row conversion, output serialization)
//! - `sync_reader` - Synchronous balances reader with iterator interface
//! - `async_reader` - Asynchronous balances reader
//! - `report` - Two-decimal report lines for expenses and balances

pub mod async_reader;
pub mod csv_format;
pub mod report;
pub mod sync_reader;

pub use async_reader::AsyncBalanceReader;
pub use csv_format::{check_balances_header, parse_balance_fields, write_balances_csv, BalanceRow, BALANCES_HEADER};
pub use sync_reader::BalanceReader;
