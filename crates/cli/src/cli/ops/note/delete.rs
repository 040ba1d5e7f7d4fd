use clap::Args;

use common::prelude::Address;
use common::program::instruction;

use super::SubmitError;

#[derive(Args, Debug, Clone)]
pub struct Delete;

#[async_trait::async_trait]
impl crate::cli::op::Op for Delete {
    type Error = SubmitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let session = ctx.session().await?;
        let identity = session.key.public();

        let message = instruction::delete_note(session.runtime.program_id(), &identity)?;
        let note_address = message.note;
        super::submit(&session, message).await?;

        let wallet = Address::from(identity);
        let balance = session.runtime.balance(&wallet).await?;
        Ok(format!(
            "Deleted note at {}\nWallet balance: {} lamports",
            note_address, balance
        ))
    }
}
