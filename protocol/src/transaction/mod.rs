//! # Transaction Module
//!
//! The values two wallets exchange during a QR transfer, and the codec
//! that moves them across the camera link.
//!
//! ## Architecture
//!
//! ```text
//! types.rs   : PendingTransaction, CompleteTransaction, amount parsing
//! schema.rs  : embedded JSON schemas and their validator
//! wire.rs    : WireCodec, schema-checked JSON encode/decode
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Request**: the receiver builds a [`PendingTransaction`] (its own
//!    identity, the amount, the current time) and shows it as a QR code.
//! 2. **Complete**: the sender scans it and calls
//!    [`PendingTransaction::with_source`] to attach its own identity.
//! 3. **Confirm**: the receiver scans the [`CompleteTransaction`] back and
//!    checks it against the proposal it showed.
//!
//! ## Design Decisions
//!
//! - Amounts are `f64` and timestamps are Unix milliseconds, matching the
//!   JSON wallets already exchange.
//! - Both directions go through the schema. An emitted payload that would
//!   be rejected on the other side is an error on this side too.

mod schema;
pub mod types;
pub mod wire;

pub use schema::{MessageKind, MessageSchema};
pub use types::{parse_amount, AmountError, CompleteTransaction, PendingTransaction};
pub use wire::{WireCodec, WireError, WireMessage};
