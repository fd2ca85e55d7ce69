//! Error types for the transfer handshake.

use thiserror::Error;

use super::state::TransactionState;

/// Errors raised by [`TransactionStateManager`](super::TransactionStateManager).
#[derive(Clone, Debug, Error, PartialEq)]
pub enum HandshakeError {
    /// A transition was requested from a state it does not start from.
    ///
    /// Correct local code never triggers this, but a scanned payload from a
    /// buggy or hostile peer can. The state is left untouched.
    #[error("cannot {operation}: expected state {expected}, found {actual}")]
    InvalidTransition {
        /// Name of the rejected operation.
        operation: &'static str,
        /// The state the operation requires.
        expected: TransactionState,
        /// The state the manager was in.
        actual: TransactionState,
    },
}
