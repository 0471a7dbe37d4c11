//! Account entity for the signed-in drinker.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A BeerDrinkin account as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    id: String,
    first_name: String,
    last_name: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    is_male: bool,
}

impl Account {
    /// Creates a new account.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: None,
            date_of_birth: None,
            is_male: false,
        }
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub const fn with_date_of_birth(mut self, date_of_birth: NaiveDate) -> Self {
        self.date_of_birth = Some(date_of_birth);
        self
    }

    #[must_use]
    pub const fn with_is_male(mut self, is_male: bool) -> Self {
        self.is_male = is_male;
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    #[must_use]
    pub const fn date_of_birth(&self) -> Option<NaiveDate> {
        self.date_of_birth
    }

    #[must_use]
    pub const fn is_male(&self) -> bool {
        self.is_male
    }

    /// Returns "First Last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Age as the difference of calendar years between birth and `today`.
    /// Birthdays later in the year are not accounted for.
    #[must_use]
    pub fn age_on(&self, today: NaiveDate) -> Option<i32> {
        self.date_of_birth.map(|dob| today.year() - dob.year())
    }

    /// Gender label used for analytics traits.
    #[must_use]
    pub const fn gender(&self) -> &'static str {
        if self.is_male { "Male" } else { "Female" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let account = Account::new("1", "Mike", "James");
        assert_eq!(account.full_name(), "Mike James");
        assert_eq!(Account::new("2", "Mike", "").full_name(), "Mike");
    }

    #[test]
    fn test_age_uses_calendar_years() {
        let account = Account::new("1", "Mike", "James")
            .with_date_of_birth(NaiveDate::from_ymd_opt(1990, 12, 31).unwrap());
        let today = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert_eq!(account.age_on(today), Some(30));
        assert_eq!(Account::new("2", "A", "B").age_on(today), None);
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "id": "abc",
            "firstName": "Mike",
            "lastName": "James",
            "email": "mike@example.com",
            "dateOfBirth": "1988-04-02",
            "isMale": true
        }"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.first_name(), "Mike");
        assert_eq!(account.email(), Some("mike@example.com"));
        assert_eq!(account.gender(), "Male");
    }
}
