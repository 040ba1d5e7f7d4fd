use clap::Args;

use common::program::instruction;

use super::SubmitError;

#[derive(Args, Debug, Clone)]
pub struct Create {
    /// Note title, set once (1 to 100 bytes)
    #[arg(long)]
    pub title: String,

    /// Note body (1 to 1000 bytes)
    #[arg(long)]
    pub content: String,
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Create {
    type Error = SubmitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let session = ctx.session().await?;
        let identity = session.key.public();

        let message = instruction::create_note(
            session.runtime.program_id(),
            &identity,
            self.title.clone(),
            self.content.clone(),
        )?;
        let note_address = message.note;
        super::submit(&session, message).await?;

        Ok(format!(
            "Created note '{}' at {}\nDeposit: {} lamports",
            self.title,
            note_address,
            session
                .runtime
                .rent()
                .minimum_balance(common::program::Note::SPACE)
        ))
    }
}
