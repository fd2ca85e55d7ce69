//! Value types exchanged during a QR transfer.
//!
//! A transfer is proposed by the receiver as a [`PendingTransaction`] (it
//! knows who it is and how much it wants, not who will pay) and completed
//! by the sender into a [`CompleteTransaction`] by attaching its identity.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// PendingTransaction
// ---------------------------------------------------------------------------

/// A receiver-initiated transfer proposal with no source yet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PendingTransaction {
    /// Identity of the receiving wallet.
    pub destination: String,
    /// Amount of tokens requested.
    pub amount: f64,
    /// Unix time in milliseconds at which the proposal was made.
    pub datetime: i64,
}

impl PendingTransaction {
    pub fn new(destination: impl Into<String>, amount: f64, datetime: i64) -> Self {
        Self {
            destination: destination.into(),
            amount,
            datetime,
        }
    }

    /// A proposal stamped with the current wall-clock time.
    pub fn now(destination: impl Into<String>, amount: f64) -> Self {
        Self::new(destination, amount, chrono::Utc::now().timestamp_millis())
    }

    /// Attach the sender's identity, producing the transaction it will show.
    pub fn with_source(&self, source: impl Into<String>) -> CompleteTransaction {
        CompleteTransaction {
            source: source.into(),
            destination: self.destination.clone(),
            amount: self.amount,
            datetime: self.datetime,
        }
    }
}

impl fmt::Display for PendingTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "? -> {} : {} @ {}", self.destination, self.amount, self.datetime)
    }
}

// ---------------------------------------------------------------------------
// CompleteTransaction
// ---------------------------------------------------------------------------

/// A transfer with both parties known, ready for the receiver to accept.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompleteTransaction {
    /// Identity of the paying wallet.
    pub source: String,
    /// Identity of the receiving wallet.
    pub destination: String,
    pub amount: f64,
    pub datetime: i64,
}

impl CompleteTransaction {
    pub fn new(
        source: impl Into<String>,
        destination: impl Into<String>,
        amount: f64,
        datetime: i64,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            amount,
            datetime,
        }
    }

    /// The proposal this transaction completes.
    pub fn pending_transaction(&self) -> PendingTransaction {
        PendingTransaction {
            destination: self.destination.clone(),
            amount: self.amount,
            datetime: self.datetime,
        }
    }
}

impl fmt::Display for CompleteTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} : {} @ {}",
            self.source, self.destination, self.amount, self.datetime
        )
    }
}

// ---------------------------------------------------------------------------
// Amount input
// ---------------------------------------------------------------------------

/// Rejections of a user-typed amount.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("not a number: {0:?}")]
    Invalid(String),

    #[error("amount must be a positive finite number, got {0}")]
    NotPositive(String),
}

/// Parse an amount typed by the user.
///
/// Surrounding whitespace is ignored. The value must be finite and
/// strictly positive.
pub fn parse_amount(input: &str) -> Result<f64, AmountError> {
    let trimmed = input.trim();
    let amount: f64 = trimmed
        .parse()
        .map_err(|_| AmountError::Invalid(input.to_string()))?;

    if !amount.is_finite() || amount <= 0.0 {
        return Err(AmountError::NotPositive(trimmed.to_string()));
    }

    Ok(amount)
}
