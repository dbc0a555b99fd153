//! Bet entry line editor.
//!
//! Collects digits typed at the betting prompt and validates the result
//! against the table limits on submit. A rejected bet keeps the buffer cleared
//! so the next attempt starts fresh.

/// Longest bet the editor accepts, in digits.
const MAX_DIGITS: usize = 9;

/// Why a submitted bet was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BetError {
    #[error("bet is not an integer")]
    NotANumber,
    #[error("bet {bet} outside {min}..={max}")]
    OutOfRange { bet: i64, min: i64, max: i64 },
}

/// Digits typed so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BetEntry {
    digits: String,
}

impl BetEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.digits
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Append a digit. Non-digits and digits past the limit are ignored.
    pub fn push(&mut self, c: char) {
        if c.is_ascii_digit() && self.digits.len() < MAX_DIGITS {
            self.digits.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.digits.pop();
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    /// Parse and validate, clearing the buffer either way.
    pub fn submit(&mut self, min: i64, max: i64) -> Result<i64, BetError> {
        let digits = std::mem::take(&mut self.digits);
        let bet: i64 = digits.parse().map_err(|_| BetError::NotANumber)?;
        if bet < min || bet > max {
            return Err(BetError::OutOfRange { bet, min, max });
        }
        Ok(bet)
    }
}
