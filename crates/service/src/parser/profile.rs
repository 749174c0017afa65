use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_AGE: u8 = 18;
pub const MIN_AGE: u8 = 1;
pub const MAX_AGE: u8 = 120;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|gender| gender.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// The one stored biography.
///
/// Every key is optional so that a record read from disk keeps exactly the
/// keys it had; absent keys are left out when the record is written back.
/// Keys outside the twelve fields are refused rather than dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BiographyRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about_me: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hobbies: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite_quotes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motto: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub future_plans: Option<String>,
}

/// The twelve keys of a [`BiographyRecord`], in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Age,
    Gender,
    Course,
    University,
    Country,
    Nationality,
    AboutMe,
    Hobbies,
    FavoriteQuotes,
    Motto,
    FuturePlans,
}

impl Field {
    pub const ALL: [Field; 12] = [
        Field::Name,
        Field::Age,
        Field::Gender,
        Field::Course,
        Field::University,
        Field::Country,
        Field::Nationality,
        Field::AboutMe,
        Field::Hobbies,
        Field::FavoriteQuotes,
        Field::Motto,
        Field::FuturePlans,
    ];

    /// Key used in the JSON file and as the form field name.
    pub fn key(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Age => "age",
            Field::Gender => "gender",
            Field::Course => "course",
            Field::University => "university",
            Field::Country => "country",
            Field::Nationality => "nationality",
            Field::AboutMe => "about_me",
            Field::Hobbies => "hobbies",
            Field::FavoriteQuotes => "favorite_quotes",
            Field::Motto => "motto",
            Field::FuturePlans => "future_plans",
        }
    }

    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.key() == key)
    }

    /// Heading used on the home page.
    pub fn title(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Age => "Age",
            Field::Gender => "Gender",
            Field::Course => "Course",
            Field::University => "University",
            Field::Country => "Country",
            Field::Nationality => "Nationality",
            Field::AboutMe => "About Me",
            Field::Hobbies => "Hobbies",
            Field::FavoriteQuotes => "Favorite Quotes",
            Field::Motto => "Motto",
            Field::FuturePlans => "Future Plans",
        }
    }

    /// Prompt shown next to the input on the edit page.
    pub fn prompt(&self) -> &'static str {
        match self {
            Field::University => "Name of University",
            Field::AboutMe => "Tell us about yourself",
            Field::Hobbies => "List your hobbies",
            Field::FavoriteQuotes => "Your favorite quotes",
            Field::Motto => "Your motto in life",
            Field::FuturePlans => "Your plans for the future",
            other => other.title(),
        }
    }

    /// Free text long enough to warrant a multi-line input.
    pub fn is_long_text(&self) -> bool {
        matches!(
            self,
            Field::AboutMe | Field::Hobbies | Field::FavoriteQuotes | Field::FuturePlans
        )
    }

    /// Part of the short "basic information" block rather than its own section.
    pub fn is_basic(&self) -> bool {
        matches!(
            self,
            Field::Name
                | Field::Age
                | Field::Gender
                | Field::Course
                | Field::University
                | Field::Country
                | Field::Nationality
        )
    }
}

impl BiographyRecord {
    /// True when no key is present at all, e.g. before the first save. A key
    /// stored as `null` counts as absent.
    pub fn is_empty(&self) -> bool {
        *self == BiographyRecord::default()
    }

    /// Stored value of `field` as text, `None` when the key is absent.
    pub fn value(&self, field: Field) -> Option<String> {
        match field {
            Field::Age => self.age.map(|age| age.to_string()),
            Field::Gender => self.gender.map(|gender| gender.to_string()),
            _ => self.text(field).map(str::to_string),
        }
    }

    /// Value for read-only display; absent keys show as `N/A`.
    pub fn display_value(&self, field: Field) -> String {
        self.value(field).unwrap_or_else(|| "N/A".to_string())
    }

    /// Age to pre-fill the edit form with.
    pub fn age_or_default(&self) -> u8 {
        self.age.unwrap_or(DEFAULT_AGE)
    }

    pub fn gender_or_default(&self) -> Gender {
        self.gender.unwrap_or_default()
    }

    /// Text to pre-fill the edit form with; absent keys start empty.
    pub fn text_or_default(&self, field: Field) -> &str {
        self.text(field).unwrap_or("")
    }

    pub fn text(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::Name => &self.name,
            Field::Course => &self.course,
            Field::University => &self.university,
            Field::Country => &self.country,
            Field::Nationality => &self.nationality,
            Field::AboutMe => &self.about_me,
            Field::Hobbies => &self.hobbies,
            Field::FavoriteQuotes => &self.favorite_quotes,
            Field::Motto => &self.motto,
            Field::FuturePlans => &self.future_plans,
            Field::Age | Field::Gender => return None,
        };
        value.as_deref()
    }

    /// Sets a text key. Age and gender have typed setters of their own.
    pub fn set_text(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Course => &mut self.course,
            Field::University => &mut self.university,
            Field::Country => &mut self.country,
            Field::Nationality => &mut self.nationality,
            Field::AboutMe => &mut self.about_me,
            Field::Hobbies => &mut self.hobbies,
            Field::FavoriteQuotes => &mut self.favorite_quotes,
            Field::Motto => &mut self.motto,
            Field::FuturePlans => &mut self.future_plans,
            Field::Age | Field::Gender => return,
        };
        *slot = Some(value);
    }
}
