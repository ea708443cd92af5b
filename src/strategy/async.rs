//! Asynchronous load strategy
//!
//! Reads the balances file with tokio and csv-async on a private
//! current-thread runtime that lives for one `load` call. The ledger itself
//! stays single-threaded; only the file read is async.

use crate::io::async_reader::AsyncBalanceReader;
use crate::strategy::LoadStrategy;
use crate::types::{Participant, SplitError};
use std::path::Path;

/// Asynchronous load strategy
#[derive(Debug, Clone, Copy)]
pub struct AsyncLoadStrategy;

impl LoadStrategy for AsyncLoadStrategy {
    fn load(&self, path: &Path) -> Result<Vec<Participant>, SplitError> {
        if !path.exists() {
            return Err(SplitError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .map_err(|e| SplitError::IoError {
                message: format!("Failed to create tokio runtime: {}", e),
            })?;

        let participants = runtime.block_on(read_balances(path))?;

        tracing::debug!(
            path = %path.display(),
            rows = participants.len(),
            "read balances asynchronously"
        );

        Ok(participants)
    }
}

async fn read_balances(path: &Path) -> Result<Vec<Participant>, SplitError> {
    let file = tokio::fs::File::open(path).await?;

    // Wrap tokio file in a compatibility layer for csv-async
    let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);

    AsyncBalanceReader::new(compat_file).read_all().await
}
