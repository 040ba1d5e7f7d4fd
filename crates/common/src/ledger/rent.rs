use serde::{Deserialize, Serialize};

/// Bytes of bookkeeping charged for every account on top of its data
pub const ACCOUNT_STORAGE_OVERHEAD: u64 = 128;
/// Default price of one byte for one year
pub const DEFAULT_LAMPORTS_PER_BYTE_YEAR: u64 = 3_480;
/// Default number of years an account must prepay to be exempt
pub const DEFAULT_EXEMPTION_THRESHOLD_YEARS: u64 = 2;
/// Lamports in one whole token, handy for funding wallets
pub const LAMPORTS_PER_TOKEN: u64 = 1_000_000_000;

/// Storage pricing.
///
/// Accounts must be funded with at least [`Rent::minimum_balance`] for their
/// data length when they are created; the deposit is handed back in full
/// when the account is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rent {
    pub lamports_per_byte_year: u64,
    pub exemption_threshold_years: u64,
}

impl Default for Rent {
    fn default() -> Self {
        Self {
            lamports_per_byte_year: DEFAULT_LAMPORTS_PER_BYTE_YEAR,
            exemption_threshold_years: DEFAULT_EXEMPTION_THRESHOLD_YEARS,
        }
    }
}

impl Rent {
    /// Deposit required to store `data_len` bytes
    pub fn minimum_balance(&self, data_len: usize) -> u64 {
        (ACCOUNT_STORAGE_OVERHEAD + data_len as u64)
            .saturating_mul(self.lamports_per_byte_year)
            .saturating_mul(self.exemption_threshold_years)
    }

    pub fn is_exempt(&self, lamports: u64, data_len: usize) -> bool {
        lamports >= self.minimum_balance(data_len)
    }
}
