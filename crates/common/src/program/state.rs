//! # Note record layout
//!
//! A note account is always allocated at [`Note::SPACE`] bytes, large enough
//! for the longest legal title and content. Fields are written from the
//! start of the account and the remainder is zero padding. All integers are
//! little endian.
//!
//! ```text
//! offset  size  field
//! 0       8     discriminator  sha256("account:Note")[..8]
//! 8       32    author         ed25519 public key
//! 40      8     title length   u64
//! 48      n     title          utf-8, n <= 100
//! 48+n    8     content length u64
//! 56+n    m     content        bytes, m <= 1000
//! 56+n+m  1     bump
//! 57+n+m  8     created_at     i64 unix seconds
//! 65+n+m  8     last_updated   i64 unix seconds
//! ```

use bincode::Options;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::error::NoteError;
use crate::crypto::{PublicKey, PUBLIC_KEY_SIZE};

pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_CONTENT_LEN: usize = 1000;
pub const DISCRIMINATOR_LEN: usize = 8;

const LEN_PREFIX: usize = 8;

/// A single note, stored at the address derived from its author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Creator of the note; the only identity allowed to change it
    pub author: PublicKey,
    /// Set once at creation
    pub title: String,
    /// Replaced wholesale by updates
    pub content: Vec<u8>,
    /// Bump found when the address was derived
    pub bump: u8,
    pub created_at: i64,
    pub last_updated: i64,
}

fn codec() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
        .with_limit((Note::SPACE - DISCRIMINATOR_LEN) as u64)
        .allow_trailing_bytes()
}

impl Note {
    /// Bytes allocated for every note account
    pub const SPACE: usize = DISCRIMINATOR_LEN
        + PUBLIC_KEY_SIZE
        + LEN_PREFIX
        + MAX_TITLE_LEN
        + LEN_PREFIX
        + MAX_CONTENT_LEN
        + 1
        + 8
        + 8;

    /// Tag identifying note accounts among other account types
    pub fn discriminator() -> [u8; DISCRIMINATOR_LEN] {
        let hash = Sha256::digest(b"account:Note");
        let mut discriminator = [0u8; DISCRIMINATOR_LEN];
        discriminator.copy_from_slice(&hash[..DISCRIMINATOR_LEN]);
        discriminator
    }

    /// Serialize into a zero padded buffer of exactly [`Note::SPACE`] bytes
    pub fn encode(&self) -> Result<Vec<u8>, NoteError> {
        let body = codec().serialize(self).map_err(|e| {
            tracing::error!("failed to encode note: {}", e);
            NoteError::InvalidAccountData
        })?;

        let mut data = vec![0u8; Note::SPACE];
        data[..DISCRIMINATOR_LEN].copy_from_slice(&Self::discriminator());
        data[DISCRIMINATOR_LEN..DISCRIMINATOR_LEN + body.len()].copy_from_slice(&body);
        Ok(data)
    }

    /// Read a note back from raw account data
    pub fn decode(data: &[u8]) -> Result<Self, NoteError> {
        if data.len() < DISCRIMINATOR_LEN || data[..DISCRIMINATOR_LEN] != Self::discriminator() {
            return Err(NoteError::InvalidAccountData);
        }

        codec()
            .deserialize(&data[DISCRIMINATOR_LEN..])
            .map_err(|e| {
                tracing::warn!("failed to decode note account: {}", e);
                NoteError::InvalidAccountData
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::SecretKey;

    fn sample(title: &str, content: &[u8]) -> Note {
        Note {
            author: SecretKey::generate().public(),
            title: title.to_string(),
            content: content.to_vec(),
            bump: 3,
            created_at: 1_700_000_000,
            last_updated: 1_700_000_500,
        }
    }

    #[test]
    fn test_space() {
        assert_eq!(Note::SPACE, 1173);
    }

    #[test]
    fn test_layout_offsets() {
        let note = sample("delhi-weather", b"This is my first note");
        let data = note.encode().unwrap();
        assert_eq!(data.len(), Note::SPACE);

        assert_eq!(&data[..8], &Note::discriminator());
        assert_eq!(&data[8..40], &note.author.to_bytes());

        let n = note.title.len();
        assert_eq!(&data[40..48], &(n as u64).to_le_bytes());
        assert_eq!(&data[48..48 + n], note.title.as_bytes());

        let m = note.content.len();
        assert_eq!(&data[48 + n..56 + n], &(m as u64).to_le_bytes());
        assert_eq!(&data[56 + n..56 + n + m], &note.content[..]);

        let tail = 56 + n + m;
        assert_eq!(data[tail], 3);
        assert_eq!(&data[tail + 1..tail + 9], &1_700_000_000i64.to_le_bytes());
        assert_eq!(&data[tail + 9..tail + 17], &1_700_000_500i64.to_le_bytes());
        assert!(data[tail + 17..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_largest_note_fits() {
        let note = sample(&"t".repeat(MAX_TITLE_LEN), &[9u8; MAX_CONTENT_LEN]);
        let data = note.encode().unwrap();
        assert_eq!(data.len(), Note::SPACE);
        assert_eq!(Note::decode(&data).unwrap(), note);
    }

    #[test]
    fn test_decode_rejects_foreign_data() {
        assert_eq!(Note::decode(&[]), Err(NoteError::InvalidAccountData));
        assert_eq!(
            Note::decode(&[0u8; Note::SPACE]),
            Err(NoteError::InvalidAccountData)
        );

        // Right tag, truncated body
        let data = sample("title", b"body").encode().unwrap();
        assert_eq!(Note::decode(&data[..20]), Err(NoteError::InvalidAccountData));
    }

    #[test]
    fn test_decode_ignores_padding_changes() {
        let note = sample("title", b"body");
        let mut data = note.encode().unwrap();
        data.truncate(8 + 32 + 8 + 5 + 8 + 4 + 1 + 8 + 8);
        assert_eq!(Note::decode(&data).unwrap(), note);
    }
}
