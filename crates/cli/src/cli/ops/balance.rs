use clap::Args;

use common::prelude::{Address, RuntimeError};

use crate::cli::op::SessionError;

#[derive(Args, Debug, Clone)]
pub struct Balance;

#[derive(Debug, thiserror::Error)]
pub enum BalanceError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError<sqlx::Error>),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Balance {
    type Error = BalanceError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let session = ctx.session().await?;
        let wallet = Address::from(session.key.public());
        let balance = session.runtime.balance(&wallet).await?;

        Ok(format!(
            "{}: {} lamports ({} tokens)",
            wallet,
            balance,
            super::tokens(balance)
        ))
    }
}
