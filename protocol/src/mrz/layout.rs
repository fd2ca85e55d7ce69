//! Fixed-width field tables for the two TD3 MRZ lines.
//!
//! A line is located by sliding a 44-character window over the input and
//! accepting the first window in which every field's characters belong to
//! that field's character class. This is the explicit equivalent of
//! searching for a fixed-width pattern, and it does not care whether the
//! lines are separated by a newline, a space, or nothing.

use crate::config::{
    COUNTRY_CODE_LENGTH, DATE_FIELD_LENGTH, DOCUMENT_NUMBER_LENGTH, HOLDER_NAME_LENGTH,
    MRZ_FILLER, MRZ_LINE_LENGTH, PASSPORT_DOCUMENT_MARKER, PERSONAL_NUMBER_LENGTH,
};

use super::error::MrzLine;

/// Characters admitted at a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharClass {
    /// Exactly this character.
    Literal(char),
    /// `A-Z`.
    Alpha,
    /// `A-Z` or `<`.
    AlphaOrFiller,
    /// `A-Z`, `0-9` or `<`.
    AlphaNumOrFiller,
    /// `0-9`.
    Digit,
    /// `0-9` or `<`.
    DigitOrFiller,
}

impl CharClass {
    /// Whether `b` belongs to this class. Non-ASCII bytes never do.
    pub fn admits(self, b: u8) -> bool {
        let filler = b == MRZ_FILLER as u8;
        match self {
            CharClass::Literal(c) => b == c as u8,
            CharClass::Alpha => b.is_ascii_uppercase(),
            CharClass::AlphaOrFiller => b.is_ascii_uppercase() || filler,
            CharClass::AlphaNumOrFiller => {
                b.is_ascii_uppercase() || b.is_ascii_digit() || filler
            }
            CharClass::Digit => b.is_ascii_digit(),
            CharClass::DigitOrFiller => b.is_ascii_digit() || filler,
        }
    }
}

/// Position, width and character class of one field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub offset: usize,
    pub len: usize,
    pub class: CharClass,
}

impl FieldSpec {
    const fn new(offset: usize, len: usize, class: CharClass) -> Self {
        Self { offset, len, class }
    }

    const fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// Line 1: `P`, subtype, issuing country, holder name.
pub mod line1 {
    use super::*;

    pub const MARKER: FieldSpec = FieldSpec::new(0, 1, CharClass::Literal(PASSPORT_DOCUMENT_MARKER));
    pub const SUBTYPE: FieldSpec = FieldSpec::new(MARKER.end(), 1, CharClass::AlphaOrFiller);
    pub const COUNTRY: FieldSpec =
        FieldSpec::new(SUBTYPE.end(), COUNTRY_CODE_LENGTH, CharClass::AlphaOrFiller);
    pub const NAME: FieldSpec =
        FieldSpec::new(COUNTRY.end(), HOLDER_NAME_LENGTH, CharClass::AlphaOrFiller);

    pub const FIELDS: [FieldSpec; 4] = [MARKER, SUBTYPE, COUNTRY, NAME];
}

/// Line 2: number, nationality, dates, sex, personal number, check digits.
pub mod line2 {
    use super::*;

    pub const NUMBER: FieldSpec =
        FieldSpec::new(0, DOCUMENT_NUMBER_LENGTH, CharClass::AlphaNumOrFiller);
    pub const NUMBER_CHECK: FieldSpec = FieldSpec::new(NUMBER.end(), 1, CharClass::Digit);
    pub const NATIONALITY: FieldSpec =
        FieldSpec::new(NUMBER_CHECK.end(), COUNTRY_CODE_LENGTH, CharClass::Alpha);
    pub const BIRTH: FieldSpec =
        FieldSpec::new(NATIONALITY.end(), DATE_FIELD_LENGTH, CharClass::Digit);
    pub const BIRTH_CHECK: FieldSpec = FieldSpec::new(BIRTH.end(), 1, CharClass::Digit);
    pub const SEX: FieldSpec = FieldSpec::new(BIRTH_CHECK.end(), 1, CharClass::Alpha);
    pub const EXPIRY: FieldSpec = FieldSpec::new(SEX.end(), DATE_FIELD_LENGTH, CharClass::Digit);
    pub const EXPIRY_CHECK: FieldSpec = FieldSpec::new(EXPIRY.end(), 1, CharClass::Digit);
    pub const PERSONAL: FieldSpec =
        FieldSpec::new(EXPIRY_CHECK.end(), PERSONAL_NUMBER_LENGTH, CharClass::AlphaNumOrFiller);
    pub const PERSONAL_CHECK: FieldSpec =
        FieldSpec::new(PERSONAL.end(), 1, CharClass::DigitOrFiller);
    pub const COMPOSITE_CHECK: FieldSpec =
        FieldSpec::new(PERSONAL_CHECK.end(), 1, CharClass::Digit);

    pub const FIELDS: [FieldSpec; 11] = [
        NUMBER,
        NUMBER_CHECK,
        NATIONALITY,
        BIRTH,
        BIRTH_CHECK,
        SEX,
        EXPIRY,
        EXPIRY_CHECK,
        PERSONAL,
        PERSONAL_CHECK,
        COMPOSITE_CHECK,
    ];
}

/// The field table of one MRZ line.
#[derive(Clone, Copy, Debug)]
pub struct LineLayout {
    pub line: MrzLine,
    pub fields: &'static [FieldSpec],
}

pub const LINE1: LineLayout = LineLayout {
    line: MrzLine::Line1,
    fields: &line1::FIELDS,
};

pub const LINE2: LineLayout = LineLayout {
    line: MrzLine::Line2,
    fields: &line2::FIELDS,
};

impl LineLayout {
    /// Whether a 44-byte window satisfies every field of this layout.
    fn admits(&self, window: &[u8]) -> bool {
        self.fields.iter().all(|field| {
            window[field.offset..field.end()]
                .iter()
                .all(|&b| field.class.admits(b))
        })
    }

    /// Find the first window of `text` that matches this layout.
    pub fn locate<'a>(&self, text: &'a str) -> Option<MatchedLine<'a>> {
        let start = text
            .as_bytes()
            .windows(MRZ_LINE_LENGTH)
            .position(|window| self.admits(window))?;

        // Every byte of a matching window is ASCII, so both ends of the
        // slice fall on char boundaries.
        Some(MatchedLine {
            text: &text[start..start + MRZ_LINE_LENGTH],
        })
    }
}

/// A 44-character window that matched a [`LineLayout`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchedLine<'a> {
    text: &'a str,
}

impl<'a> MatchedLine<'a> {
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    pub fn field(&self, spec: FieldSpec) -> &'a str {
        &self.text[spec.offset..spec.end()]
    }

    /// The numeric value of a one-character check field, `None` for `<`.
    pub fn digit(&self, spec: FieldSpec) -> Option<u8> {
        self.field(spec)
            .chars()
            .next()
            .and_then(|c| c.to_digit(10))
            .map(|d| d as u8)
    }
}
