//! A wallet's view of the handshake: screen actions and QR scans in,
//! transitions and QR payloads out.

use std::sync::Arc;

use thiserror::Error;

use crate::transaction::{CompleteTransaction, PendingTransaction, WireCodec, WireError};

use super::error::HandshakeError;
use super::manager::TransactionStateManager;
use super::state::TransactionState;

#[derive(Debug, Error)]
pub enum SessionError {
    /// The scanned or emitted payload is invalid data.
    #[error(transparent)]
    Wire(#[from] WireError),

    /// The payload was valid but does not fit the current transfer.
    #[error(transparent)]
    Handshake(#[from] HandshakeError),

    /// The show-screen action was used while nothing is shown.
    #[error("nothing to confirm in state {0}")]
    NothingShown(TransactionState),
}

/// What a scan did.
#[derive(Clone, Debug, PartialEq)]
pub enum ScanOutcome {
    /// The device was not waiting for a scan; nothing changed.
    Ignored,
    /// Sender read a proposal and now shows it completed with its identity.
    ShowingComplete(CompleteTransaction),
    /// Receiver read back its completed proposal; the transfer is done.
    Received(CompleteTransaction),
}

/// One device taking part in QR transfers.
pub struct WalletSession {
    identity: String,
    manager: Arc<TransactionStateManager>,
    codec: WireCodec,
}

impl WalletSession {
    pub fn new(
        identity: impl Into<String>,
        manager: Arc<TransactionStateManager>,
        codec: WireCodec,
    ) -> Self {
        Self {
            identity: identity.into(),
            manager,
            codec,
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn manager(&self) -> &Arc<TransactionStateManager> {
        &self.manager
    }

    /// Receiver: propose a transfer of `amount` to this wallet, timestamped
    /// now. The proposal is checked against the wire schema before the
    /// state changes, so an amount that could not be shown is refused.
    pub fn request_payment(&self, amount: f64) -> Result<PendingTransaction, SessionError> {
        let pending = PendingTransaction::now(self.identity.as_str(), amount);
        self.codec.encode(&pending)?;
        self.manager.start_receiving_transaction(pending.clone())?;
        Ok(pending)
    }

    /// Sender: get ready to scan a proposal.
    pub fn start_sending(&self) -> Result<(), SessionError> {
        Ok(self.manager.start_sending_transaction()?)
    }

    /// The QR payload the device should display, if it is showing one.
    pub fn qr_payload(&self) -> Result<Option<String>, SessionError> {
        let payload = match self.manager.current() {
            TransactionState::ReceiverShow(pending) => Some(self.codec.encode(&pending)?),
            TransactionState::SenderShow(complete) => Some(self.codec.encode(&complete)?),
            _ => None,
        };
        Ok(payload)
    }

    /// The OK button under a displayed QR code.
    ///
    /// A receiver moves on to scanning the completion; a sender finishes
    /// its side of the transfer.
    pub fn confirm_shown(&self) -> Result<(), SessionError> {
        match self.manager.current() {
            TransactionState::ReceiverShow(pending) => {
                self.manager.read_complete_transaction(pending)?;
            }
            TransactionState::SenderShow(complete) => {
                self.manager.complete_sending(&complete)?;
            }
            other => return Err(SessionError::NothingShown(other)),
        }
        Ok(())
    }

    /// Handle a decoded QR code.
    ///
    /// A payload that fails to decode leaves the state untouched so the
    /// camera can keep scanning.
    pub fn on_scan(&self, payload: &str) -> Result<ScanOutcome, SessionError> {
        match self.manager.current() {
            TransactionState::SenderRead => {
                let pending: PendingTransaction = self.codec.decode(payload)?;
                let complete = pending.with_source(self.identity.as_str());
                self.manager.show_complete_transaction(complete.clone())?;
                Ok(ScanOutcome::ShowingComplete(complete))
            }
            TransactionState::ReceiverRead { .. } => {
                let complete: CompleteTransaction = self.codec.decode(payload)?;
                self.manager.complete_receiving(&complete)?;
                Ok(ScanOutcome::Received(complete))
            }
            state => {
                tracing::debug!(state = state.name(), "scan ignored");
                Ok(ScanOutcome::Ignored)
            }
        }
    }

    /// Drop the transfer in progress, if any.
    pub fn cancel(&self) {
        self.manager.cancel_transaction();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(identity: &str) -> WalletSession {
        WalletSession::new(
            identity,
            Arc::new(TransactionStateManager::new()),
            WireCodec::new().unwrap(),
        )
    }

    #[test]
    fn receiver_shows_its_proposal() {
        let receiver = session("alice");
        let pending = receiver.request_payment(3.5).unwrap();
        assert_eq!(pending.destination, "alice");

        let payload = receiver.qr_payload().unwrap().unwrap();
        let shown: PendingTransaction = WireCodec::new().unwrap().decode(&payload).unwrap();
        assert_eq!(shown, pending);
    }

    #[test]
    fn invalid_amount_leaves_state_idle() {
        let receiver = session("alice");
        assert!(matches!(
            receiver.request_payment(-1.0),
            Err(SessionError::Wire(WireError::Validation { .. }))
        ));
        assert!(receiver.manager().current().is_idle());
    }

    #[test]
    fn sender_attaches_identity_on_scan() {
        let sender = session("bob");
        sender.start_sending().unwrap();

        let payload = r#"{"destination":"alice","amount":2.0,"datetime":5}"#;
        let outcome = sender.on_scan(payload).unwrap();
        assert_eq!(
            outcome,
            ScanOutcome::ShowingComplete(CompleteTransaction::new("bob", "alice", 2.0, 5))
        );
    }

    #[test]
    fn bad_scan_keeps_scanning() {
        let sender = session("bob");
        sender.start_sending().unwrap();

        assert!(matches!(sender.on_scan("{}"), Err(SessionError::Wire(_))));
        assert!(matches!(sender.on_scan("garbage"), Err(SessionError::Wire(_))));
        assert_eq!(sender.manager().current(), TransactionState::SenderRead);
    }

    #[test]
    fn scans_are_ignored_when_not_reading() {
        let idle = session("carol");
        assert_eq!(idle.on_scan("anything").unwrap(), ScanOutcome::Ignored);
        assert_eq!(idle.qr_payload().unwrap(), None);
    }

    #[test]
    fn confirm_requires_a_shown_code() {
        let idle = session("carol");
        assert!(matches!(
            idle.confirm_shown(),
            Err(SessionError::NothingShown(TransactionState::None))
        ));
    }
}
