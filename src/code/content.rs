//! Code content: the text payload that gets encoded into the symbol
//!
//! The payload is `<identifier>/<YYYY-MM-DD>/<role tag>`, rebuilt every time
//! the code is shown so the date always reflects today.

use chrono::{Local, NaiveDate};

/// Role tag appended to every payload unless the settings override it
pub const DEFAULT_ROLE_TAG: &str = "student";

/// Date format used inside the payload and on screen
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Source of "today"
pub trait DateProvider {
    fn today(&self) -> NaiveDate;
}

/// Today's date in the local time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalDate;

impl DateProvider for LocalDate {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Render a date as `YYYY-MM-DD`
pub fn iso_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Combines identifier, date and role tag into a payload string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeFormatter {
    role_tag: String,
}

impl Default for CodeFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_ROLE_TAG)
    }
}

impl CodeFormatter {
    pub fn new(role_tag: impl Into<String>) -> Self {
        Self {
            role_tag: role_tag.into(),
        }
    }

    pub fn role_tag(&self) -> &str {
        &self.role_tag
    }

    /// Build the payload. Pure and total: the identifier is used verbatim.
    pub fn format(&self, identifier: &str, date: &str) -> String {
        format!("{}/{}/{}", identifier, date, self.role_tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_payload() {
        assert_eq!(
            CodeFormatter::default().format("224195", "2025-01-01"),
            "224195/2025-01-01/student"
        );
    }

    #[test]
    fn test_format_is_deterministic() {
        let formatter = CodeFormatter::default();
        let first = formatter.format("abc", "2025-06-01");
        let second = formatter.format("abc", "2025-06-01");
        assert_eq!(first, second);
    }

    #[test]
    fn test_identifier_kept_verbatim() {
        // Slashes and surrounding spaces are not escaped or trimmed
        assert_eq!(
            CodeFormatter::default().format(" a/b ", "2025-06-01"),
            " a/b /2025-06-01/student"
        );
    }

    #[test]
    fn test_custom_role_tag() {
        let formatter = CodeFormatter::new("staff");
        assert_eq!(formatter.role_tag(), "staff");
        assert_eq!(formatter.format("42", "2024-02-29"), "42/2024-02-29/staff");
    }

    #[test]
    fn test_iso_date_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(iso_date(date), "2025-03-07");
    }
}
