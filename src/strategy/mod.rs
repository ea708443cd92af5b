//! Load strategy module for importing balances
//!
//! This module defines the Strategy pattern for reading a balances file into
//! participants. Two implementations (synchronous, asynchronous) can be
//! selected at runtime; both produce identical participants for the same file.

use crate::cli::StrategyType;
use crate::types::{Participant, SplitError};
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::AsyncLoadStrategy;
pub use sync::SyncLoadStrategy;

/// Strategy for reading a balances file
pub trait LoadStrategy: Send + Sync {
    /// Read every participant stored at `path`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Nothing exists at `path` (`FileNotFound`)
    /// - Any row is malformed (`ParseError`); no participants are returned
    /// - The file cannot be read (`IoError`)
    fn load(&self, path: &Path) -> Result<Vec<Participant>, SplitError>;
}

/// Create a load strategy based on the specified strategy type
pub fn create_strategy(strategy_type: StrategyType) -> Box<dyn LoadStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncLoadStrategy),
        StrategyType::Async => Box::new(AsyncLoadStrategy),
    }
}
