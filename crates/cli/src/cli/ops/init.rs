use std::path::PathBuf;

use clap::Args;

use common::prelude::{derive_note_address, Address, NOTES_PROGRAM_ID};
use notes_cli::state::{AppConfig, AppState, StateError};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// Directory for daily rolled log files (optional, stderr only if not set)
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Default log level
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    StateFailed(#[from] StateError),
    #[error("cannot derive note address: {0}")]
    Derive(#[from] common::address::AddressError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let config = AppConfig {
            log_level: self.log_level.clone(),
            log_dir: self.log_dir.clone(),
            ..AppConfig::default()
        };

        let state = AppState::init(ctx.config_path.clone(), Some(config))?;
        let identity = state.load_key()?.public();
        let (note_address, _) = derive_note_address(&NOTES_PROGRAM_ID, &identity)?;

        let output = format!(
            "Initialized notes directory at: {}\n\
             - Database: {}\n\
             - Key: {}\n\
             - Config: {}\n\
             - Identity: {}\n\
             - Wallet: {}\n\
             - Note address: {}",
            state.notes_dir.display(),
            state.db_path.display(),
            state.key_path.display(),
            state.config_path.display(),
            identity,
            Address::from(identity),
            note_address,
        );

        Ok(output)
    }
}
