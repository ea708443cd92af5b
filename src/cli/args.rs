use crate::cli::session::SessionConfig;
use crate::core::{ImportMode, SettlementPolicy};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Split shared expenses among a group and keep everyone's balances
#[derive(Parser, Debug)]
#[command(name = "splitter")]
#[command(about = "Split shared expenses among a group and keep everyone's balances", long_about = None)]
pub struct SessionArgs {
    /// File the balances are saved to when the save prompt is left blank
    #[arg(
        long = "save",
        value_name = "PATH",
        default_value = "group_data.csv",
        help = "Default path for saving balances"
    )]
    pub save_path: PathBuf,

    /// Balances file to load after saving; skips the load prompt
    #[arg(
        long = "load",
        value_name = "PATH",
        help = "Balances file to load after saving (skips the load prompt)"
    )]
    pub load_path: Option<PathBuf>,

    /// Reader used when loading balances
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Load strategy: 'sync' for synchronous or 'async' for asynchronous"
    )]
    pub strategy: StrategyType,

    /// How each expense's net contribution is derived
    #[arg(
        long = "policy",
        value_name = "POLICY",
        default_value = "independent",
        help = "Settlement policy: 'independent' or 'carry-forward'"
    )]
    pub policy: PolicyType,

    /// How loaded participants are combined with the current ones
    #[arg(
        long = "import-mode",
        value_name = "MODE",
        default_value = "append",
        help = "Import mode: 'append' keeps duplicates, 'merge' updates by name"
    )]
    pub import_mode: ImportModeType,
}

/// Available strategies for reading a balances file
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PolicyType {
    Independent,
    CarryForward,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ImportModeType {
    Append,
    Merge,
}

impl From<PolicyType> for SettlementPolicy {
    fn from(policy: PolicyType) -> Self {
        match policy {
            PolicyType::Independent => SettlementPolicy::Independent,
            PolicyType::CarryForward => SettlementPolicy::CarryForward,
        }
    }
}

impl From<ImportModeType> for ImportMode {
    fn from(mode: ImportModeType) -> Self {
        match mode {
            ImportModeType::Append => ImportMode::Append,
            ImportModeType::Merge => ImportMode::Merge,
        }
    }
}

impl SessionArgs {
    /// Create a SessionConfig from CLI arguments
    pub fn to_session_config(&self) -> SessionConfig {
        SessionConfig {
            save_path: self.save_path.clone(),
            load_path: self.load_path.clone(),
            strategy: self.strategy,
            policy: self.policy.into(),
            import_mode: self.import_mode.into(),
        }
    }
}
