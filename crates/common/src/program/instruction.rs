use serde::{Deserialize, Serialize};

use crate::address::{Address, AddressError};
use crate::crypto::PublicKey;
use crate::runtime::Message;

use super::derive_note_address;

/// Operations the note program accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteInstruction {
    /// Allocate the signer's note
    CreateNote { title: String, content: Vec<u8> },
    /// Replace the content of the signer's note
    UpdateNote { content: Vec<u8> },
    /// Close the signer's note, refunding its deposit
    DeleteNote,
}

impl NoteInstruction {
    pub fn name(&self) -> &'static str {
        match self {
            NoteInstruction::CreateNote { .. } => "create_note",
            NoteInstruction::UpdateNote { .. } => "update_note",
            NoteInstruction::DeleteNote => "delete_note",
        }
    }
}

/// Build an unsigned create message targeting `author`'s derived address
pub fn create_note(
    program_id: &Address,
    author: &PublicKey,
    title: impl Into<String>,
    content: impl Into<Vec<u8>>,
) -> Result<Message, AddressError> {
    Ok(Message {
        program_id: *program_id,
        signer: *author,
        note: derive_note_address(program_id, author)?.0,
        instruction: NoteInstruction::CreateNote {
            title: title.into(),
            content: content.into(),
        },
    })
}

pub fn update_note(
    program_id: &Address,
    author: &PublicKey,
    content: impl Into<Vec<u8>>,
) -> Result<Message, AddressError> {
    Ok(Message {
        program_id: *program_id,
        signer: *author,
        note: derive_note_address(program_id, author)?.0,
        instruction: NoteInstruction::UpdateNote {
            content: content.into(),
        },
    })
}

pub fn delete_note(program_id: &Address, author: &PublicKey) -> Result<Message, AddressError> {
    Ok(Message {
        program_id: *program_id,
        signer: *author,
        note: derive_note_address(program_id, author)?.0,
        instruction: NoteInstruction::DeleteNote,
    })
}
