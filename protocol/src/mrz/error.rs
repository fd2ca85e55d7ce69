//! Error types for MRZ extraction.
//!
//! Every variant is recoverable. A camera pipeline feeds the extractor one
//! frame at a time, and a frame that only captured half the zone is normal,
//! not exceptional.

use std::fmt;

use thiserror::Error;

/// Which of the two MRZ lines a match attempt was looking for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MrzLine {
    /// Document type, issuing country and holder name.
    Line1,
    /// Document number, dates, sex, personal number and check digits.
    Line2,
}

impl fmt::Display for MrzLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MrzLine::Line1 => write!(f, "line1"),
            MrzLine::Line2 => write!(f, "line2"),
        }
    }
}

/// A named MRZ field, used to report where validation failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MrzField {
    DocumentNumber,
    DateOfBirth,
    DateOfExpiry,
    PersonalNumber,
    /// The aggregate of number, birth date and expiry with their check digits.
    Composite,
    HolderName,
}

impl fmt::Display for MrzField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MrzField::DocumentNumber => "document number",
            MrzField::DateOfBirth => "date of birth",
            MrzField::DateOfExpiry => "date of expiry",
            MrzField::PersonalNumber => "personal number",
            MrzField::Composite => "composite",
            MrzField::HolderName => "holder name",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while extracting an MRZ.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MrzError {
    /// No window of the input matches the fixed-width layout of `line`.
    #[error("failed to match {line} in {text:?}")]
    NoMatch {
        /// The line that could not be located.
        line: MrzLine,
        /// The full input text.
        text: String,
    },

    /// A check digit does not match the data it protects.
    #[error("could not validate {field} check digit on {data:?}: computed {computed} but expected {expected}")]
    ChecksumMismatch {
        /// The field whose check digit failed.
        field: MrzField,
        /// The data the check digit was computed over.
        data: String,
        /// The check digit computed from `data`.
        computed: u8,
        /// The check digit declared in the MRZ.
        expected: u8,
    },

    /// Filler characters appear where the field layout forbids them.
    #[error("malformed {field} {value:?}: {reason}")]
    MalformedField {
        /// The offending field.
        field: MrzField,
        /// The raw field content.
        value: String,
        /// What is wrong with it.
        reason: &'static str,
    },
}
