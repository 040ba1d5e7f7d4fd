/// Offset of custom note program error codes
pub const ERROR_CODE_OFFSET: u32 = 6000;

/// Every way a note instruction can be rejected.
///
/// Each condition is its own variant; callers match on them rather than on
/// messages. A rejected instruction never leaves a partial write behind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NoteError {
    #[error("Title cannot be longer than 100 chars")]
    TitleTooLong,
    #[error("Content cannot be longer than 1000 chars")]
    ContentTooLong,
    #[error("Title cannot be empty")]
    TitleEmpty,
    #[error("Content cannot be empty")]
    ContentEmpty,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("note account already exists")]
    AccountAlreadyExists,
    #[error("note account not found")]
    AccountNotFound,
    #[error("note account is not at the address derived for its author")]
    InvalidAddress,
    #[error("note account is not owned by the notes program")]
    InvalidAccountOwner,
    #[error("note account data is malformed")]
    InvalidAccountData,
    #[error("insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: u64, available: u64 },
}

impl NoteError {
    /// Stable numeric code for the condition.
    ///
    /// Validation and authorization errors raised by the program itself
    ///  count up from 6000; account level conditions sit in the 3000 range.
    pub fn code(&self) -> u32 {
        match self {
            NoteError::TitleTooLong => ERROR_CODE_OFFSET,
            NoteError::ContentTooLong => ERROR_CODE_OFFSET + 1,
            NoteError::TitleEmpty => ERROR_CODE_OFFSET + 2,
            NoteError::ContentEmpty => ERROR_CODE_OFFSET + 3,
            NoteError::Unauthorized => ERROR_CODE_OFFSET + 4,
            NoteError::AccountAlreadyExists => 3000,
            NoteError::AccountNotFound => 3001,
            NoteError::InvalidAddress => 3002,
            NoteError::InvalidAccountOwner => 3003,
            NoteError::InvalidAccountData => 3004,
            NoteError::InsufficientFunds { .. } => 3005,
        }
    }

    /// Name of the condition, as shown to users
    pub fn name(&self) -> &'static str {
        match self {
            NoteError::TitleTooLong => "TitleTooLong",
            NoteError::ContentTooLong => "ContentTooLong",
            NoteError::TitleEmpty => "TitleEmpty",
            NoteError::ContentEmpty => "ContentEmpty",
            NoteError::Unauthorized => "Unauthorized",
            NoteError::AccountAlreadyExists => "AccountAlreadyExists",
            NoteError::AccountNotFound => "AccountNotFound",
            NoteError::InvalidAddress => "InvalidAddress",
            NoteError::InvalidAccountOwner => "InvalidAccountOwner",
            NoteError::InvalidAccountData => "InvalidAccountData",
            NoteError::InsufficientFunds { .. } => "InsufficientFunds",
        }
    }
}
