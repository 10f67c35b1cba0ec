//! Lead contact details

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// Whether a string looks like a deliverable email address
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(email))
}

/// Contact details a visitor leaves before taking the quiz
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl Lead {
    /// Trim and validate contact details
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Result<Self> {
        let lead = Self {
            name: name.into().trim().to_string(),
            email: email.into().trim().to_string(),
            phone: phone.into().trim().to_string(),
        };
        lead.validate()?;
        Ok(lead)
    }

    /// Check that every field is filled and the email is well formed
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::MissingField("name"));
        }
        if self.email.trim().is_empty() {
            return Err(Error::MissingField("email"));
        }
        if self.phone.trim().is_empty() {
            return Err(Error::MissingField("phone"));
        }
        if !is_valid_email(self.email.trim()) {
            return Err(Error::InvalidEmail(self.email.clone()));
        }
        Ok(())
    }

    /// Split the full name into first name and the rest
    pub fn split_name(&self) -> (&str, &str) {
        let name = self.name.trim();
        match name.split_once(char::is_whitespace) {
            Some((first, rest)) => (first, rest.trim()),
            None => (name, ""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("ana@example.com"));
        assert!(is_valid_email("a.b+tag@sub.example.co"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("ana"));
        assert!(!is_valid_email("ana@example"));
        assert!(!is_valid_email("ana smith@example.com"));
        assert!(!is_valid_email("ana@@example.com"));
    }

    #[test]
    fn new_trims_fields() {
        let lead = Lead::new("  Ana Lopez ", " ana@example.com", "555-0100 ").unwrap();
        assert_eq!(lead.name, "Ana Lopez");
        assert_eq!(lead.email, "ana@example.com");
        assert_eq!(lead.phone, "555-0100");
    }

    #[test]
    fn blank_fields_are_rejected_in_order() {
        assert_eq!(
            Lead::new(" ", "ana@example.com", "1").unwrap_err(),
            Error::MissingField("name")
        );
        assert_eq!(Lead::new("Ana", "", "1").unwrap_err(), Error::MissingField("email"));
        assert_eq!(
            Lead::new("Ana", "ana@example.com", "").unwrap_err(),
            Error::MissingField("phone")
        );
    }

    #[test]
    fn bad_email_is_rejected() {
        assert_eq!(
            Lead::new("Ana", "not-an-email", "1").unwrap_err(),
            Error::InvalidEmail("not-an-email".to_string())
        );
    }

    #[test]
    fn split_name_separates_first_name() {
        let lead = Lead::new("Ana Maria Lopez", "ana@example.com", "1").unwrap();
        assert_eq!(lead.split_name(), ("Ana", "Maria Lopez"));

        let single = Lead::new("Ana", "ana@example.com", "1").unwrap();
        assert_eq!(single.split_name(), ("Ana", ""));
    }
}
