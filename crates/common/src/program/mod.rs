//! # Note Program
//!
//! Every identity owns at most one note, stored at an address derived from
//! `[b"note", author]` under the program id. The program is a pure function
//! from an [`InstructionContext`] to a list of account changes; loading,
//! locking and committing belong to the runtime.
//!
//! ```text
//!  Absent --create--> Live --update--> Live
//!    ^                  |
//!    +------delete------+
//! ```

mod error;
pub mod instruction;
mod processor;
mod state;

use crate::address::{find_program_address, Address, AddressError};
use crate::crypto::PublicKey;

pub use error::{NoteError, ERROR_CODE_OFFSET};
pub use instruction::NoteInstruction;
pub use processor::{process, validate_content, validate_title, InstructionContext};
pub use state::{Note, DISCRIMINATOR_LEN, MAX_CONTENT_LEN, MAX_TITLE_LEN};

/// Seed prefix of every note address
pub const NOTE_SEED: &[u8] = b"note";

/// Id the note program is deployed under
pub const NOTES_PROGRAM_ID: Address = Address::new([
    174, 48, 58, 158, 47, 253, 50, 245, 102, 142, 162, 136, 241, 202, 217, 113, 92, 68, 230, 183,
    82, 118, 126, 102, 244, 157, 112, 0, 1, 113, 233, 203,
]);

/// Where `owner`'s note lives under `program_id`, and the bump that puts it
///  off the curve
pub fn derive_note_address(
    program_id: &Address,
    owner: &PublicKey,
) -> Result<(Address, u8), AddressError> {
    let seeds: &[&[u8]] = &[NOTE_SEED, owner.as_ref()];
    find_program_address(seeds, program_id).ok_or(AddressError::NoViableBump)
}
