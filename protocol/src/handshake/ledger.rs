//! Side effects of a finished transfer.
//!
//! The state manager reports every completed send and receive to a
//! [`TransferLedger`]. The default ledger only logs; a wallet plugs in one
//! that updates balances.

use parking_lot::Mutex;
use serde::Serialize;

use crate::transaction::CompleteTransaction;

/// Receives the terminal events of the handshake.
pub trait TransferLedger: Send + Sync {
    /// This device paid `transaction.amount` to `transaction.destination`.
    fn record_send(&self, transaction: &CompleteTransaction);

    /// This device was paid `transaction.amount` by `transaction.source`.
    fn record_receive(&self, transaction: &CompleteTransaction);
}

/// Writes each transfer as a structured `info` event.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingLedger;

impl TransferLedger for LoggingLedger {
    fn record_send(&self, tx: &CompleteTransaction) {
        tracing::info!(
            source = %tx.source,
            destination = %tx.destination,
            amount = tx.amount,
            datetime = tx.datetime,
            "tokens sent"
        );
    }

    fn record_receive(&self, tx: &CompleteTransaction) {
        tracing::info!(
            source = %tx.source,
            destination = %tx.destination,
            amount = tx.amount,
            datetime = tx.datetime,
            "tokens received"
        );
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferDirection {
    Sent,
    Received,
}

/// One row of a [`MemoryLedger`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LedgerEntry {
    pub direction: TransferDirection,
    pub transaction: CompleteTransaction,
}

/// Keeps every transfer in memory, in order.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    entries: Mutex<Vec<LedgerEntry>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the history.
    pub fn entries(&self) -> Vec<LedgerEntry> {
        self.entries.lock().clone()
    }

    /// Net token movement: received minus sent.
    pub fn balance(&self) -> f64 {
        self.entries
            .lock()
            .iter()
            .map(|e| match e.direction {
                TransferDirection::Sent => -e.transaction.amount,
                TransferDirection::Received => e.transaction.amount,
            })
            .sum()
    }

    fn push(&self, direction: TransferDirection, transaction: &CompleteTransaction) {
        self.entries.lock().push(LedgerEntry {
            direction,
            transaction: transaction.clone(),
        });
    }
}

impl TransferLedger for MemoryLedger {
    fn record_send(&self, transaction: &CompleteTransaction) {
        self.push(TransferDirection::Sent, transaction);
    }

    fn record_receive(&self, transaction: &CompleteTransaction) {
        self.push(TransferDirection::Received, transaction);
    }
}
