//! # QR Transfer Handshake
//!
//! Two wallets move tokens by showing each other QR codes. Neither device
//! talks to a network: each one runs its own [`TransactionStateManager`]
//! and the camera is the only link.
//!
//! ```text
//!   ┌──────────┐                              ┌──────────┐
//!   │ Receiver │                              │  Sender  │
//!   └────┬─────┘                              └────┬─────┘
//!        │ start_receiving        start_sending    │
//!        │ ReceiverShow(p)           SenderRead    │
//!        │                                         │
//!        │  1. QR: PendingTransaction p            │
//!        ├────────────────────────────────────────►│
//!        │ read_complete    show_complete(p+source)│
//!        │ ReceiverRead(p)         SenderShow(c)   │
//!        │                                         │
//!        │  2. QR: CompleteTransaction c           │
//!        │◄────────────────────────────────────────┤
//!        │ complete_receiving     complete_sending │
//!        │ None + receive           None + send    │
//! ```
//!
//! ## Transition table
//!
//! | Operation                     | From                    | To                 |
//! |-------------------------------|-------------------------|--------------------|
//! | `start_sending_transaction`   | `None`                  | `SenderRead`       |
//! | `start_receiving_transaction` | `None`                  | `ReceiverShow(p)`  |
//! | `show_complete_transaction`   | `SenderRead`            | `SenderShow(c)`    |
//! | `read_complete_transaction`   | `ReceiverShow(p)`       | `ReceiverRead(p)`  |
//! | `complete_sending`            | `SenderShow(c)`         | `None`, send       |
//! | `complete_receiving`          | `ReceiverRead(c's p)`   | `None`, receive    |
//! | `cancel_transaction`          | any                     | `None`             |
//!
//! Source states are compared by value, payload included. Anything else is
//! a [`HandshakeError::InvalidTransition`]; it is logged as a defect and
//! returned, never panicked on, because scanned payloads from the other
//! device can drive transitions.
//!
//! [`WalletSession`] maps screen actions and scan results onto these
//! operations and renders the payload to show.

mod error;
pub mod ledger;
mod manager;
mod session;
mod state;

pub use error::HandshakeError;
pub use ledger::{LedgerEntry, LoggingLedger, MemoryLedger, TransferDirection, TransferLedger};
pub use manager::TransactionStateManager;
pub use session::{ScanOutcome, SessionError, WalletSession};
pub use state::TransactionState;
