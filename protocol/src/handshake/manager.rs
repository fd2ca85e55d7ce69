//! The single owner of a device's [`TransactionState`].

use std::sync::Arc;

use tokio::sync::watch;

use crate::transaction::{CompleteTransaction, PendingTransaction};

use super::error::HandshakeError;
use super::ledger::{LoggingLedger, TransferLedger};
use super::state::TransactionState;

/// Guards the transfer handshake of one device.
///
/// Every operation checks the full current state value before replacing
/// it, inside one `send_if_modified` call, so a check and its replacement
/// can never interleave with another transition. UI layers observe the
/// state through [`subscribe`](Self::subscribe).
pub struct TransactionStateManager {
    state: watch::Sender<TransactionState>,
    ledger: Arc<dyn TransferLedger>,
}

impl Default for TransactionStateManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionStateManager {
    /// A manager at [`TransactionState::None`] that logs finished transfers.
    pub fn new() -> Self {
        Self::with_ledger(Arc::new(LoggingLedger))
    }

    pub fn with_ledger(ledger: Arc<dyn TransferLedger>) -> Self {
        let (state, _) = watch::channel(TransactionState::None);
        Self { state, ledger }
    }

    /// A receiver that sees every state this manager publishes.
    ///
    /// The receiver holds the latest value, not a queue: rapid transitions
    /// may be observed only as their final state.
    pub fn subscribe(&self) -> watch::Receiver<TransactionState> {
        self.state.subscribe()
    }

    /// A copy of the current state.
    pub fn current(&self) -> TransactionState {
        self.state.borrow().clone()
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// `None` to `SenderRead`.
    pub fn start_sending_transaction(&self) -> Result<(), HandshakeError> {
        self.transition(
            "start sending",
            TransactionState::None,
            TransactionState::SenderRead,
        )
    }

    /// `None` to `ReceiverShow(pending)`.
    pub fn start_receiving_transaction(
        &self,
        pending: PendingTransaction,
    ) -> Result<(), HandshakeError> {
        self.transition(
            "start receiving",
            TransactionState::None,
            TransactionState::ReceiverShow(pending),
        )
    }

    /// `SenderRead` to `SenderShow(complete)`.
    pub fn show_complete_transaction(
        &self,
        complete: CompleteTransaction,
    ) -> Result<(), HandshakeError> {
        self.transition(
            "show complete transaction",
            TransactionState::SenderRead,
            TransactionState::SenderShow(complete),
        )
    }

    /// `ReceiverShow(pending)` to `ReceiverRead(pending)`.
    pub fn read_complete_transaction(
        &self,
        pending: PendingTransaction,
    ) -> Result<(), HandshakeError> {
        self.transition(
            "read complete transaction",
            TransactionState::ReceiverShow(pending.clone()),
            TransactionState::ReceiverRead { expected: pending },
        )
    }

    /// `SenderShow(complete)` to `None`, then records the send.
    pub fn complete_sending(&self, complete: &CompleteTransaction) -> Result<(), HandshakeError> {
        self.transition(
            "complete sending",
            TransactionState::SenderShow(complete.clone()),
            TransactionState::None,
        )?;
        self.ledger.record_send(complete);
        Ok(())
    }

    /// `ReceiverRead(complete.pending_transaction())` to `None`, then records
    /// the receive.
    pub fn complete_receiving(
        &self,
        complete: &CompleteTransaction,
    ) -> Result<(), HandshakeError> {
        self.transition(
            "complete receiving",
            TransactionState::ReceiverRead {
                expected: complete.pending_transaction(),
            },
            TransactionState::None,
        )?;
        self.ledger.record_receive(complete);
        Ok(())
    }

    /// Abandon whatever is in progress. Never fails.
    ///
    /// Subscribers are only notified if a transfer was actually cancelled.
    pub fn cancel_transaction(&self) {
        let mut previous = None;
        self.state.send_if_modified(|state| {
            if state.is_idle() {
                return false;
            }
            previous = Some(std::mem::take(state));
            true
        });

        if let Some(previous) = previous {
            tracing::info!(from = previous.name(), "transaction cancelled");
        }
    }

    fn transition(
        &self,
        operation: &'static str,
        expected: TransactionState,
        next: TransactionState,
    ) -> Result<(), HandshakeError> {
        let to = next.name();
        let mut rejected = None;

        self.state.send_if_modified(|state| {
            if *state != expected {
                rejected = Some(state.clone());
                return false;
            }
            *state = next;
            true
        });

        match rejected {
            None => {
                tracing::info!(operation, from = expected.name(), to, "handshake transition");
                Ok(())
            }
            Some(actual) => {
                tracing::error!(
                    operation,
                    expected = %expected,
                    actual = %actual,
                    "invalid handshake transition"
                );
                Err(HandshakeError::InvalidTransition {
                    operation,
                    expected,
                    actual,
                })
            }
        }
    }
}
