//! # Passport MRZ Extraction
//!
//! Reads the machine-readable zone printed at the bottom of a passport data
//! page (ICAO 9303, TD3 format) out of OCR text and validates it.
//!
//! ```text
//! PXABCDUMMY<<BOB<SMITH<<<<<<<<<<<<<<<<<<<<<<<   line 1: type, country, name
//! A1234567<6ABC0102030X0405063<<<<<<<<<<<<<<<0   line 2: number, dates, checks
//! ```
//!
//! ## Pipeline
//!
//! 1. [`normalize_ocr`] removes whitespace and repairs `«` into `<<`.
//! 2. [`layout`] locates each line by fixed-width field classes.
//! 3. [`checksum`] validates the number, birth date, expiry date and the
//!    composite of the three against their check digits. The personal
//!    number is only checked when its check position holds a digit.
//! 4. The document number is stripped of trailing fillers; a filler in the
//!    middle rejects the read.
//! 5. If line 1 was captured, the holder name is split into surname and
//!    given names.
//!
//! Any failure is an [`MrzError`]. None of them are fatal: the camera
//! pipeline calls [`extract`] again on the next frame.

pub mod checksum;
pub mod layout;

mod error;
mod extractor;
mod info;

pub use checksum::{check_digit, weight};
pub use error::{MrzError, MrzField, MrzLine};
pub use extractor::{extract, extract_full, normalize_ocr};
pub use info::{BacData, MrzInfo};
