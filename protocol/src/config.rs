//! # Constants
//!
//! Every fixed number the wallet core relies on lives here: the geometry of
//! an ICAO 9303 passport MRZ, the check digit weight cycle, the identifiers
//! of the QR wire schemas and the default log filter used by the binary.
//!
//! The MRZ values are dictated by ICAO Doc 9303 part 4 (TD3 documents).
//! Changing them does not make the parser more lenient, it makes it wrong.

// ---------------------------------------------------------------------------
// MRZ Geometry
// ---------------------------------------------------------------------------

/// Width of each TD3 MRZ line in characters.
pub const MRZ_LINE_LENGTH: usize = 44;

/// The filler character. Stands in for spaces and unused positions.
pub const MRZ_FILLER: char = '<';

/// Document-type marker that opens line 1 of a passport MRZ.
pub const PASSPORT_DOCUMENT_MARKER: char = 'P';

/// Length of the document number field on line 2.
pub const DOCUMENT_NUMBER_LENGTH: usize = 9;

/// Length of a `YYMMDD` date field.
pub const DATE_FIELD_LENGTH: usize = 6;

/// Length of the optional personal number field on line 2.
pub const PERSONAL_NUMBER_LENGTH: usize = 14;

/// Length of the holder name field on line 1.
pub const HOLDER_NAME_LENGTH: usize = 39;

/// Length of a three-letter country code.
pub const COUNTRY_CODE_LENGTH: usize = 3;

// ---------------------------------------------------------------------------
// Check Digits
// ---------------------------------------------------------------------------

/// Repeating weight cycle applied to each character position (ICAO 9303 §4.9).
pub const CHECK_DIGIT_WEIGHTS: [u32; 3] = [7, 3, 1];

/// Check digits are the weighted sum reduced modulo this value.
pub const CHECK_DIGIT_MODULUS: u32 = 10;

/// Numeric value of `A`. Letters map to `ordinal + 10`, so `Z` is 35.
pub const LETTER_VALUE_OFFSET: u32 = 10;

// ---------------------------------------------------------------------------
// OCR Normalisation
// ---------------------------------------------------------------------------

/// Text recognisers regularly read a double filler `<<` as a guillemet.
pub const OCR_GUILLEMET: char = '«';

/// What an [`OCR_GUILLEMET`] is replaced with before matching.
pub const OCR_GUILLEMET_REPLACEMENT: &str = "<<";

// ---------------------------------------------------------------------------
// Wire Protocol
// ---------------------------------------------------------------------------

/// Schema identifier of the pending-transaction QR payload.
pub const PENDING_TRANSACTION_SCHEMA_ID: &str = "protocol/pending_transaction.json";

/// Schema identifier of the complete-transaction QR payload.
pub const COMPLETE_TRANSACTION_SCHEMA_ID: &str = "protocol/complete_transaction.json";

/// Draft the embedded schemas are written against.
pub const JSON_SCHEMA_DRAFT: &str = "http://json-schema.org/draft-07/schema#";

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Filter used by the binary when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "hbt_cli=info,hbt_protocol=info";
