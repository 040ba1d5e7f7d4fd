pub mod args;
pub mod op;
pub mod ops;

pub use ops::{Address, Airdrop, Balance, Init, Note, Version};
