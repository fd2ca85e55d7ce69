//! Turns raw OCR text into a validated [`MrzInfo`].

use crate::config::{MRZ_FILLER, OCR_GUILLEMET, OCR_GUILLEMET_REPLACEMENT};

use super::checksum::verify;
use super::error::{MrzError, MrzField};
use super::info::{DocumentLine, HolderLine, MrzInfo};
use super::layout::{line1, line2, FieldSpec, LineLayout, MatchedLine, LINE1, LINE2};

/// Clean up text recognition output before matching.
///
/// Removes every whitespace character and replaces `«`, which recognisers
/// produce for a double filler, with `<<`.
pub fn normalize_ocr(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .replace(OCR_GUILLEMET, OCR_GUILLEMET_REPLACEMENT)
}

/// Extract a passport MRZ from `text`.
///
/// Line 2 is required. Line 1 is optional: when it is found, the issuing
/// country and holder name are filled in; otherwise those fields are
/// `None`. Expects text already passed through [`normalize_ocr`].
pub fn extract(text: &str) -> Result<MrzInfo, MrzError> {
    let document = locate(text, LINE2)?;
    let validated = validate_document(&document)?;
    let holder = LINE1.locate(text).map(|line| parse_holder(&line)).transpose()?;

    tracing::debug!(
        line1 = holder.as_ref().map(|_| "matched").unwrap_or("absent"),
        line2 = document.as_str(),
        "validated passport MRZ"
    );

    Ok(MrzInfo::new(validated, holder))
}

/// Extract a passport MRZ, requiring both lines.
///
/// Registration needs the holder's name, so a frame in which only the
/// document line was captured fails with [`MrzError::NoMatch`] on line 1.
pub fn extract_full(text: &str) -> Result<MrzInfo, MrzError> {
    let document = locate(text, LINE2)?;
    let holder_line = locate(text, LINE1)?;

    let validated = validate_document(&document)?;
    let holder = parse_holder(&holder_line)?;

    tracing::debug!(
        line1 = holder_line.as_str(),
        line2 = document.as_str(),
        "validated full passport MRZ"
    );

    Ok(MrzInfo::new(validated, Some(holder)))
}

fn locate<'a>(text: &'a str, layout: LineLayout) -> Result<MatchedLine<'a>, MrzError> {
    layout.locate(text).ok_or_else(|| {
        tracing::debug!(line = %layout.line, "no MRZ match");
        MrzError::NoMatch {
            line: layout.line,
            text: text.to_string(),
        }
    })
}

/// Check a single field against the digit that follows it.
fn checked<'a>(
    line: &MatchedLine<'a>,
    field: MrzField,
    data: FieldSpec,
    check: FieldSpec,
) -> Result<(&'a str, u8), MrzError> {
    let value = line.field(data);
    let digit = declared_digit(line, field, check)?;
    verify(field, value, digit)?;
    Ok((value, digit))
}

fn declared_digit(
    line: &MatchedLine<'_>,
    field: MrzField,
    check: FieldSpec,
) -> Result<u8, MrzError> {
    line.digit(check).ok_or_else(|| MrzError::MalformedField {
        field,
        value: line.field(check).to_string(),
        reason: "check digit is not a digit",
    })
}

fn validate_document(line: &MatchedLine<'_>) -> Result<DocumentLine, MrzError> {
    let (number, number_check) =
        checked(line, MrzField::DocumentNumber, line2::NUMBER, line2::NUMBER_CHECK)?;
    let (birth, birth_check) =
        checked(line, MrzField::DateOfBirth, line2::BIRTH, line2::BIRTH_CHECK)?;
    let (expiry, expiry_check) =
        checked(line, MrzField::DateOfExpiry, line2::EXPIRY, line2::EXPIRY_CHECK)?;

    let composite = format!(
        "{number}{number_check}{birth}{birth_check}{expiry}{expiry_check}"
    );
    let composite_check = declared_digit(line, MrzField::Composite, line2::COMPOSITE_CHECK)?;
    verify(MrzField::Composite, &composite, composite_check)?;

    let personal = line.field(line2::PERSONAL);
    if let Some(personal_check) = line.digit(line2::PERSONAL_CHECK) {
        verify(MrzField::PersonalNumber, personal, personal_check)?;
    }

    Ok(DocumentLine {
        number: strip_number(number)?,
        date_of_birth: birth.to_string(),
        expiration: expiry.to_string(),
        nationality: line.field(line2::NATIONALITY).to_string(),
        sex: line.field(line2::SEX).chars().next().unwrap_or(MRZ_FILLER),
        personal_number: strip_personal(personal),
    })
}

/// Drop trailing fillers from the document number. A filler before the
/// last significant character means the number is corrupted, not short.
fn strip_number(raw: &str) -> Result<String, MrzError> {
    let stripped = raw.trim_end_matches(MRZ_FILLER);
    if stripped.is_empty() {
        return Err(MrzError::MalformedField {
            field: MrzField::DocumentNumber,
            value: raw.to_string(),
            reason: "empty document number",
        });
    }
    if stripped.contains(MRZ_FILLER) {
        return Err(MrzError::MalformedField {
            field: MrzField::DocumentNumber,
            value: raw.to_string(),
            reason: "filler characters inside the document number",
        });
    }
    Ok(stripped.to_string())
}

fn strip_personal(raw: &str) -> Option<String> {
    let stripped = raw.trim_end_matches(MRZ_FILLER);
    if stripped.is_empty() {
        None
    } else {
        Some(stripped.replace(MRZ_FILLER, " "))
    }
}

fn parse_holder(line: &MatchedLine<'_>) -> Result<HolderLine, MrzError> {
    let (surname, name) = split_name(line.field(line1::NAME))?;
    Ok(HolderLine {
        country: line.field(line1::COUNTRY).to_string(),
        surname,
        name,
    })
}

/// Split the holder name field into surname and given names.
///
/// Fillers become spaces; the first double space separates the primary
/// identifier from the secondary one. A single token is a given name.
fn split_name(raw: &str) -> Result<(Option<String>, String), MrzError> {
    let spaced = raw.replace(MRZ_FILLER, " ");
    let spaced = spaced.trim_end();

    if spaced.is_empty() {
        return Err(MrzError::MalformedField {
            field: MrzField::HolderName,
            value: raw.to_string(),
            reason: "no name information",
        });
    }

    match spaced.split_once("  ") {
        Some((surname, given)) => {
            let surname = (!surname.is_empty()).then(|| surname.to_string());
            Ok((surname, given.to_string()))
        }
        None => {
            tracing::debug!("holder has no surname");
            Ok((None, spaced.to_string()))
        }
    }
}
