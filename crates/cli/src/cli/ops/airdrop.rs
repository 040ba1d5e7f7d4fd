use clap::Args;

use common::prelude::{Address, RuntimeError};

use crate::cli::op::SessionError;

#[derive(Args, Debug, Clone)]
pub struct Airdrop {
    /// Lamports to credit to the local wallet
    #[arg(long)]
    pub lamports: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum AirdropError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError<sqlx::Error>),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Airdrop {
    type Error = AirdropError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let session = ctx.session().await?;
        let identity = session.key.public();

        let balance = session.runtime.airdrop(&identity, self.lamports).await?;
        tracing::info!("airdropped {} lamports to {}", self.lamports, identity);

        Ok(format!(
            "Airdropped {} lamports to {}\nBalance: {} lamports ({} tokens)",
            self.lamports,
            Address::from(identity),
            balance,
            super::tokens(balance)
        ))
    }
}
