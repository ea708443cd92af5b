//! Synchronous load strategy
//!
//! Drains a [`BalanceReader`] on the calling thread. The reader, and with it
//! the file handle, is dropped as soon as the first error is returned.

use crate::io::sync_reader::BalanceReader;
use crate::strategy::LoadStrategy;
use crate::types::{Participant, SplitError};
use std::path::Path;

/// Synchronous load strategy
#[derive(Debug, Clone, Copy)]
pub struct SyncLoadStrategy;

impl LoadStrategy for SyncLoadStrategy {
    fn load(&self, path: &Path) -> Result<Vec<Participant>, SplitError> {
        let reader = BalanceReader::new(path)?;
        let participants = reader.collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            path = %path.display(),
            rows = participants.len(),
            "read balances synchronously"
        );

        Ok(participants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_sync_strategy_loads_rows() {
        let file = create_temp_csv("Name,Owed Amount,Paid Amount\nAlice,-20,20\nBob,20,-20\n");

        let participants = SyncLoadStrategy.load(file.path()).unwrap();

        assert_eq!(participants.len(), 2);
        assert_eq!(participants[1].name, "Bob");
    }

    #[test]
    fn test_sync_strategy_handles_missing_file() {
        let result = SyncLoadStrategy.load(Path::new("nonexistent.csv"));
        assert!(matches!(result, Err(SplitError::FileNotFound { .. })));
    }

    #[test]
    fn test_sync_strategy_aborts_on_first_bad_row() {
        let file = create_temp_csv("Name,Owed Amount,Paid Amount\nAlice,-20\nBob,x,-20\n");

        let result = SyncLoadStrategy.load(file.path());

        assert_eq!(
            result,
            Err(SplitError::parse_error(Some(2), "expected 3 fields, found 2"))
        );
    }

    #[test]
    fn test_sync_strategy_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SyncLoadStrategy>();
    }
}
