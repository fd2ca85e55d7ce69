//! The validated result of an MRZ extraction.

use serde::Serialize;

use crate::config::{DOCUMENT_NUMBER_LENGTH, MRZ_FILLER};

use super::checksum::check_digit;

/// A passport MRZ whose check digits have all been validated.
///
/// There is no public constructor: the only way to obtain one is through
/// [`extract`](super::extract) or [`extract_full`](super::extract_full),
/// which build it after every check has passed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MrzInfo {
    number: String,
    date_of_birth: String,
    expiration: String,
    nationality: String,
    sex: char,
    personal_number: Option<String>,
    country: Option<String>,
    surname: Option<String>,
    name: Option<String>,
}

/// Line-1 data, present only when the holder line was captured.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct HolderLine {
    pub country: String,
    pub surname: Option<String>,
    pub name: String,
}

/// Line-2 data, after validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DocumentLine {
    pub number: String,
    pub date_of_birth: String,
    pub expiration: String,
    pub nationality: String,
    pub sex: char,
    pub personal_number: Option<String>,
}

impl MrzInfo {
    pub(crate) fn new(document: DocumentLine, holder: Option<HolderLine>) -> Self {
        let (country, surname, name) = match holder {
            Some(h) => (Some(h.country), h.surname, Some(h.name)),
            None => (None, None, None),
        };

        Self {
            number: document.number,
            date_of_birth: document.date_of_birth,
            expiration: document.expiration,
            nationality: document.nationality,
            sex: document.sex,
            personal_number: document.personal_number,
            country,
            surname,
            name,
        }
    }

    /// Document number without trailing fillers.
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Birth date as `YYMMDD`.
    pub fn date_of_birth(&self) -> &str {
        &self.date_of_birth
    }

    /// Expiry date as `YYMMDD`.
    pub fn expiration(&self) -> &str {
        &self.expiration
    }

    pub fn nationality(&self) -> &str {
        &self.nationality
    }

    pub fn sex(&self) -> char {
        self.sex
    }

    /// Optional personal number; `None` when the field is all fillers.
    pub fn personal_number(&self) -> Option<&str> {
        self.personal_number.as_deref()
    }

    /// Issuing country, from line 1.
    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    /// Primary identifier. `None` without line 1 or for single-token names.
    pub fn surname(&self) -> Option<&str> {
        self.surname.as_deref()
    }

    /// Secondary identifier (given names), from line 1.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The three fields a chip reader needs to derive BAC keys.
    pub fn bac_data(&self) -> BacData {
        BacData {
            number: self.number.clone(),
            date_of_birth: self.date_of_birth.clone(),
            expiration: self.expiration.clone(),
        }
    }
}

/// Inputs of the Basic Access Control key derivation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BacData {
    pub number: String,
    pub date_of_birth: String,
    pub expiration: String,
}

impl BacData {
    /// The "MRZ information" string BAC hashes into a key seed:
    /// number padded to 9 characters, then each field followed by its
    /// check digit.
    ///
    /// Returns `None` if a field holds characters outside the MRZ alphabet.
    pub fn mrz_information(&self) -> Option<String> {
        let mut number = self.number.clone();
        while number.len() < DOCUMENT_NUMBER_LENGTH {
            number.push(MRZ_FILLER);
        }

        let mut out = String::with_capacity(number.len() + 15);
        for field in [&number, &self.date_of_birth, &self.expiration] {
            let digit = check_digit(field)?;
            out.push_str(field);
            out.push(char::from(b'0' + digit));
        }
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mrz_information_pads_and_appends_digits() {
        let bac = BacData {
            number: "A1234567".to_string(),
            date_of_birth: "010203".to_string(),
            expiration: "040506".to_string(),
        };
        assert_eq!(
            bac.mrz_information().as_deref(),
            Some("A1234567<601020300405063")
        );
    }

    #[test]
    fn mrz_information_rejects_bad_characters() {
        let bac = BacData {
            number: "a".to_string(),
            date_of_birth: "010203".to_string(),
            expiration: "040506".to_string(),
        };
        assert!(bac.mrz_information().is_none());
    }

    #[test]
    fn info_without_holder_line() {
        let info = MrzInfo::new(
            DocumentLine {
                number: "A1234567".to_string(),
                date_of_birth: "010203".to_string(),
                expiration: "040506".to_string(),
                nationality: "ABC".to_string(),
                sex: 'X',
                personal_number: None,
            },
            None,
        );
        assert!(info.country().is_none());
        assert!(info.surname().is_none());
        assert!(info.name().is_none());
        assert_eq!(info.bac_data().number, "A1234567");
    }
}
