//! The handshake state held by one device.

use std::fmt;

use crate::transaction::{CompleteTransaction, PendingTransaction};

/// Where this device is in a QR transfer.
///
/// Each variant carries the data its screen needs, so a state can never be
/// paired with the wrong transaction.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum TransactionState {
    /// No transfer in progress.
    #[default]
    None,
    /// Sender waits to scan the receiver's pending transaction.
    SenderRead,
    /// Receiver shows its proposal.
    ReceiverShow(PendingTransaction),
    /// Sender shows the proposal with its identity attached.
    SenderShow(CompleteTransaction),
    /// Receiver waits to scan back the completion of `expected`.
    ReceiverRead { expected: PendingTransaction },
}

impl TransactionState {
    /// Short variant name, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            TransactionState::None => "none",
            TransactionState::SenderRead => "sender_read",
            TransactionState::ReceiverShow(_) => "receiver_show",
            TransactionState::SenderShow(_) => "sender_show",
            TransactionState::ReceiverRead { .. } => "receiver_read",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, TransactionState::None)
    }
}

impl fmt::Display for TransactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionState::None | TransactionState::SenderRead => f.write_str(self.name()),
            TransactionState::ReceiverShow(pending) => write!(f, "receiver_show({pending})"),
            TransactionState::SenderShow(complete) => write!(f, "sender_show({complete})"),
            TransactionState::ReceiverRead { expected } => write!(f, "receiver_read({expected})"),
        }
    }
}
