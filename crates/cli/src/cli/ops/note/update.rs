use clap::Args;

use common::program::instruction;

use super::SubmitError;

#[derive(Args, Debug, Clone)]
pub struct Update {
    /// Replacement body (1 to 1000 bytes)
    #[arg(long)]
    pub content: String,
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Update {
    type Error = SubmitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let session = ctx.session().await?;

        let message = instruction::update_note(
            session.runtime.program_id(),
            &session.key.public(),
            self.content.clone(),
        )?;
        let note_address = message.note;
        super::submit(&session, message).await?;

        Ok(format!("Updated note at {}", note_address))
    }
}
