// Copyright (c) 2026 DEDIS HBT Team. MIT License.
// See LICENSE for details.

//! # HBT Wallet Core
//!
//! The portable half of the HBT wallet: everything that does not need a
//! camera, an NFC antenna or a screen.
//!
//! ## Architecture
//!
//! - **mrz**: Passport machine-readable zone extraction and check-digit
//!   validation, from raw OCR text to a validated record.
//! - **transaction**: Transfer values and the schema-checked JSON they
//!   travel as inside QR codes.
//! - **handshake**: The two-device transfer state machine, its side
//!   effects, and the session layer the screens drive.
//! - **config**: Format constants and defaults.
//!
//! The two halves are independent. Both take text that crossed a trust
//! boundary (OCR output, a scanned QR code) and turn it into validated
//! domain data or a typed error.

pub mod config;
pub mod handshake;
pub mod mrz;
pub mod transaction;
