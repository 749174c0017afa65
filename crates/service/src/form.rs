//! Input layer between submitted form values and the stored record.
//!
//! The constraints the edit page's widgets advertise (age range, gender
//! choices, picture extensions) are enforced here again, so a hand-crafted
//! request cannot put values into the store that the page itself would refuse.

use crate::parser::profile::{BiographyRecord, Field, Gender, DEFAULT_AGE, MAX_AGE, MIN_AGE};
use image::ImageFormat;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

pub const PICTURE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("age must be between {min} and {max}, got {0}", min = MIN_AGE, max = MAX_AGE)]
    AgeOutOfRange(i64),

    #[error("age must be a whole number, got {0:?}")]
    InvalidAge(String),

    #[error("unknown gender {0:?}, expected one of Male, Female, Other")]
    UnknownGender(String),

    #[error("unsupported picture {0:?}, expected a png, jpg or jpeg file")]
    UnsupportedPicture(String),
}

pub fn validate_age(age: i64) -> Result<u8, FormError> {
    if (i64::from(MIN_AGE)..=i64::from(MAX_AGE)).contains(&age) {
        u8::try_from(age).map_err(|_| FormError::AgeOutOfRange(age))
    } else {
        Err(FormError::AgeOutOfRange(age))
    }
}

pub fn parse_age(raw: &str) -> Result<u8, FormError> {
    let age = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| FormError::InvalidAge(raw.to_string()))?;
    validate_age(age)
}

/// Checks a record that arrived already typed, e.g. as JSON.
pub fn validate_record(record: &BiographyRecord) -> Result<(), FormError> {
    if let Some(age) = record.age {
        validate_age(i64::from(age))?;
    }
    Ok(())
}

/// Accepts only the picture types the upload control offers.
pub fn check_picture_name(file_name: &str) -> Result<ImageFormat, FormError> {
    let unsupported = || FormError::UnsupportedPicture(file_name.to_string());

    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(unsupported)?;

    if !PICTURE_EXTENSIONS.contains(&extension.to_ascii_lowercase().as_str()) {
        return Err(unsupported());
    }

    match ImageFormat::from_extension(extension) {
        Some(format @ (ImageFormat::Png | ImageFormat::Jpeg)) => Ok(format),
        _ => Err(unsupported()),
    }
}

/// Raw values of one edit-page submission.
#[derive(Debug, Default)]
pub struct BiographyForm {
    values: HashMap<Field, String>,
}

impl BiographyForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: Field, value: String) {
        self.values.insert(field, value);
    }

    /// Builds the complete record to save. Every key is filled in: the save
    /// always replaces the whole stored record, so fields missing from the
    /// submission fall back to the edit page's defaults instead of being dropped.
    pub fn to_record(&self) -> Result<BiographyRecord, FormError> {
        let age = match self.values.get(&Field::Age) {
            Some(raw) => parse_age(raw)?,
            None => DEFAULT_AGE,
        };
        let gender = match self.values.get(&Field::Gender) {
            Some(raw) => raw
                .parse::<Gender>()
                .map_err(FormError::UnknownGender)?,
            None => Gender::default(),
        };

        Ok(self.record_with(age, gender))
    }

    /// The submission as typed, for showing the form again after a rejected
    /// save. An age or gender that fails validation shows its edit default.
    pub fn draft_record(&self) -> BiographyRecord {
        let age = self
            .values
            .get(&Field::Age)
            .and_then(|raw| parse_age(raw).ok())
            .unwrap_or(DEFAULT_AGE);
        let gender = self
            .values
            .get(&Field::Gender)
            .and_then(|raw| raw.parse::<Gender>().ok())
            .unwrap_or_default();

        self.record_with(age, gender)
    }

    fn record_with(&self, age: u8, gender: Gender) -> BiographyRecord {
        let mut record = BiographyRecord {
            age: Some(age),
            gender: Some(gender),
            ..BiographyRecord::default()
        };

        for field in Field::ALL {
            if matches!(field, Field::Age | Field::Gender) {
                continue;
            }
            let value = self.values.get(&field).cloned().unwrap_or_default();
            record.set_text(field, value);
        }

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> BiographyForm {
        let mut form = BiographyForm::new();
        for (field, value) in [
            (Field::Name, "Ada"),
            (Field::Age, "30"),
            (Field::Gender, "Female"),
            (Field::Course, "CS"),
            (Field::University, "X"),
            (Field::Country, "Y"),
            (Field::Nationality, "Z"),
            (Field::AboutMe, "hi"),
            (Field::Hobbies, "math"),
            (Field::FavoriteQuotes, "q"),
            (Field::Motto, "m"),
            (Field::FuturePlans, "p"),
        ] {
            form.set(field, value.to_string());
        }
        form
    }

    #[test]
    fn test_age_bounds() {
        assert_eq!(validate_age(1), Ok(1));
        assert_eq!(validate_age(120), Ok(120));
        assert_eq!(validate_age(0), Err(FormError::AgeOutOfRange(0)));
        assert_eq!(validate_age(121), Err(FormError::AgeOutOfRange(121)));
        assert_eq!(validate_age(-5), Err(FormError::AgeOutOfRange(-5)));
    }

    #[test]
    fn test_parse_age() {
        assert_eq!(parse_age(" 42 "), Ok(42));
        assert_eq!(parse_age("121"), Err(FormError::AgeOutOfRange(121)));
        assert_eq!(
            parse_age("forty"),
            Err(FormError::InvalidAge("forty".to_string()))
        );
        assert_eq!(parse_age("3.5"), Err(FormError::InvalidAge("3.5".to_string())));
    }

    #[test]
    fn test_full_form_to_record() {
        let record = filled_form().to_record().unwrap();

        assert_eq!(record.name.as_deref(), Some("Ada"));
        assert_eq!(record.age, Some(30));
        assert_eq!(record.gender, Some(Gender::Female));
        assert_eq!(record.future_plans.as_deref(), Some("p"));
    }

    #[test]
    fn test_empty_form_gets_edit_defaults() {
        let record = BiographyForm::new().to_record().unwrap();

        assert_eq!(record.age, Some(18));
        assert_eq!(record.gender, Some(Gender::Male));
        for field in Field::ALL {
            assert!(record.value(field).is_some(), "{} left out", field.key());
        }
        assert_eq!(record.name.as_deref(), Some(""));
        assert!(!record.is_empty());
    }

    #[test]
    fn test_form_rejects_out_of_range_age() {
        let mut form = filled_form();
        form.set(Field::Age, "0".to_string());

        assert_eq!(form.to_record(), Err(FormError::AgeOutOfRange(0)));
    }

    #[test]
    fn test_form_rejects_unknown_gender() {
        let mut form = filled_form();
        form.set(Field::Gender, "Unknown".to_string());

        assert_eq!(
            form.to_record(),
            Err(FormError::UnknownGender("Unknown".to_string()))
        );
    }

    #[test]
    fn test_draft_keeps_submitted_text() {
        let mut form = filled_form();
        form.set(Field::Name, "Grace".to_string());
        form.set(Field::Age, "0".to_string());
        form.set(Field::Gender, "Robot".to_string());

        assert!(form.to_record().is_err());

        let draft = form.draft_record();
        assert_eq!(draft.name.as_deref(), Some("Grace"));
        assert_eq!(draft.age, Some(18));
        assert_eq!(draft.gender, Some(Gender::Male));
        assert_eq!(draft.hobbies.as_deref(), Some("math"));
    }

    #[test]
    fn test_draft_of_valid_form_matches_record() {
        let form = filled_form();

        assert_eq!(form.to_record(), Ok(form.draft_record()));
    }

    #[test]
    fn test_validate_record() {
        let mut record = BiographyRecord::default();
        assert!(validate_record(&record).is_ok());

        record.age = Some(120);
        assert!(validate_record(&record).is_ok());

        record.age = Some(121);
        assert_eq!(validate_record(&record), Err(FormError::AgeOutOfRange(121)));

        record.age = Some(0);
        assert_eq!(validate_record(&record), Err(FormError::AgeOutOfRange(0)));
    }

    #[test]
    fn test_picture_extensions() {
        assert_eq!(check_picture_name("me.png"), Ok(ImageFormat::Png));
        assert_eq!(check_picture_name("me.JPG"), Ok(ImageFormat::Jpeg));
        assert_eq!(check_picture_name("me.jpeg"), Ok(ImageFormat::Jpeg));
        assert!(check_picture_name("me.gif").is_err());
        assert!(check_picture_name("me").is_err());
        assert!(check_picture_name("").is_err());
    }
}
