use crate::address::{create_program_address, Address};
use crate::ledger::{Account, AccountChange, Rent};
use crate::runtime::Signer;

use super::error::NoteError;
use super::instruction::NoteInstruction;
use super::state::{Note, MAX_CONTENT_LEN, MAX_TITLE_LEN};
use super::{derive_note_address, NOTE_SEED};

/// Everything the program sees when an instruction runs.
///
/// The runtime loads the accounts and hands them over; the program never
/// talks to the ledger itself and answers with the changes it wants made.
#[derive(Debug)]
pub struct InstructionContext<'a> {
    pub program_id: &'a Address,
    pub signer: &'a Signer,
    /// Address the transaction names as the note slot
    pub note_address: Address,
    /// Whatever is stored at `note_address` right now
    pub note_account: Option<Account>,
    /// Balance of the signer's wallet
    pub payer_lamports: u64,
    pub rent: &'a Rent,
    pub unix_timestamp: i64,
}

/// Run a single instruction, returning the account changes to commit
pub fn process(
    ctx: InstructionContext<'_>,
    instruction: NoteInstruction,
) -> Result<Vec<AccountChange>, NoteError> {
    match instruction {
        NoteInstruction::CreateNote { title, content } => create_note(ctx, title, content),
        NoteInstruction::UpdateNote { content } => update_note(ctx, content),
        NoteInstruction::DeleteNote => delete_note(ctx),
    }
}

pub fn validate_title(title: &str) -> Result<(), NoteError> {
    if title.is_empty() {
        return Err(NoteError::TitleEmpty);
    }
    if title.len() > MAX_TITLE_LEN {
        return Err(NoteError::TitleTooLong);
    }
    Ok(())
}

pub fn validate_content(content: &[u8]) -> Result<(), NoteError> {
    if content.is_empty() {
        return Err(NoteError::ContentEmpty);
    }
    if content.len() > MAX_CONTENT_LEN {
        return Err(NoteError::ContentTooLong);
    }
    Ok(())
}

fn create_note(
    ctx: InstructionContext<'_>,
    title: String,
    content: Vec<u8>,
) -> Result<Vec<AccountChange>, NoteError> {
    let author = *ctx.signer.key();
    let (expected, bump) =
        derive_note_address(ctx.program_id, &author).map_err(|_| NoteError::InvalidAddress)?;
    if expected != ctx.note_address {
        return Err(NoteError::InvalidAddress);
    }
    if ctx.note_account.is_some() {
        return Err(NoteError::AccountAlreadyExists);
    }

    validate_title(&title)?;
    validate_content(&content)?;

    let required = ctx.rent.minimum_balance(Note::SPACE);
    if ctx.payer_lamports < required {
        return Err(NoteError::InsufficientFunds {
            required,
            available: ctx.payer_lamports,
        });
    }

    let note = Note {
        author,
        title,
        content,
        bump,
        created_at: ctx.unix_timestamp,
        last_updated: ctx.unix_timestamp,
    };

    tracing::info!(
        "Note created! Title: {}, Author: {}, Bump: {}",
        note.title,
        note.author,
        note.bump
    );

    Ok(vec![AccountChange::Create {
        address: ctx.note_address,
        owner: *ctx.program_id,
        lamports: required,
        data: note.encode()?,
        payer: ctx.signer.wallet(),
    }])
}

fn update_note(
    ctx: InstructionContext<'_>,
    content: Vec<u8>,
) -> Result<Vec<AccountChange>, NoteError> {
    let (account, mut note) = load_live_note(&ctx)?;
    validate_content(&content)?;

    note.content = content;
    note.last_updated = ctx.unix_timestamp;

    tracing::info!(
        "Note updated! Title: {}, Author: {}",
        note.title,
        note.author
    );

    Ok(vec![AccountChange::Write {
        address: ctx.note_address,
        expected: account.data.clone(),
        data: note.encode()?,
    }])
}

fn delete_note(ctx: InstructionContext<'_>) -> Result<Vec<AccountChange>, NoteError> {
    let (account, note) = load_live_note(&ctx)?;

    tracing::info!(
        "Note deleted! Title: {}, Author: {}",
        note.title,
        note.author
    );

    Ok(vec![AccountChange::Close {
        address: ctx.note_address,
        expected: account.data.clone(),
        beneficiary: ctx.signer.wallet(),
    }])
}

/// Checks shared by every instruction acting on an existing note.
///
/// Hands back the account as it was read so the resulting change only
///  applies if nobody replaced the record in the meantime.
fn load_live_note<'c>(ctx: &'c InstructionContext<'_>) -> Result<(&'c Account, Note), NoteError> {
    let account = ctx
        .note_account
        .as_ref()
        .ok_or(NoteError::AccountNotFound)?;
    if account.owner != *ctx.program_id {
        return Err(NoteError::InvalidAccountOwner);
    }

    let note = Note::decode(&account.data)?;

    let seeds: &[&[u8]] = &[NOTE_SEED, note.author.as_ref()];
    let address = create_program_address(seeds, note.bump, ctx.program_id)
        .map_err(|_| NoteError::InvalidAddress)?;
    if address != ctx.note_address {
        return Err(NoteError::InvalidAddress);
    }

    if note.author != *ctx.signer.key() {
        return Err(NoteError::Unauthorized);
    }

    Ok((account, note))
}
