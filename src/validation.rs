use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$").unwrap());

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i)https?://[^\s/?#.]+(\.[^\s/?#.]+)*(:\d+)?([/?#]\S*)?$").unwrap());

/// Per-field validation messages, keyed by payload field name.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

pub fn required(errors: &mut FieldErrors, field: &str) {
    errors.add(field, "This field is required.");
}

/// Non-blank text of at most `max` characters.
pub fn text(errors: &mut FieldErrors, field: &str, value: &str, max: usize) {
    if value.trim().is_empty() {
        errors.add(field, "This field may not be blank.");
    } else {
        max_length(errors, field, value, max);
    }
}

/// Postgres text columns cannot store U+0000.
pub fn no_null_chars(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.contains('\0') {
        errors.add(field, "Null characters are not allowed.");
    }
}

pub fn max_length(errors: &mut FieldErrors, field: &str, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.add(
            field,
            format!("Ensure this field has no more than {max} characters."),
        );
    }
}

pub fn email(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, "This field may not be blank.");
    } else if !EMAIL_RE.is_match(value) {
        errors.add(field, "Enter a valid email address.");
    } else {
        max_length(errors, field, value, 254);
    }
}

/// Blank is allowed; anything else must be an http(s) URL.
pub fn optional_url(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    if !URL_RE.is_match(value) {
        errors.add(field, "Enter a valid URL.");
    } else {
        max_length(errors, field, value, 200);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_format() {
        let mut errors = FieldErrors::new();
        email(&mut errors, "email", "jane@example.com");
        assert!(errors.is_empty());

        email(&mut errors, "email", "not-an-email");
        email(&mut errors, "email", "");
        assert_eq!(
            errors.get("email").unwrap(),
            ["Enter a valid email address.", "This field may not be blank."]
        );
    }

    #[test]
    fn url_format() {
        let mut errors = FieldErrors::new();
        optional_url(&mut errors, "github", "");
        optional_url(&mut errors, "github", "https://github.com/jane");
        optional_url(&mut errors, "github", "http://localhost:8000/me?tab=1");
        assert!(errors.is_empty());

        optional_url(&mut errors, "github", "github.com/jane");
        optional_url(&mut errors, "github", "ftp://example.com");
        assert_eq!(errors.get("github").unwrap().len(), 2);
    }

    #[test]
    fn text_length_counts_characters() {
        let mut errors = FieldErrors::new();
        text(&mut errors, "name", &"é".repeat(150), 150);
        assert!(errors.is_empty());

        text(&mut errors, "name", &"é".repeat(151), 150);
        text(&mut errors, "title", "   ", 200);
        assert_eq!(
            errors.get("name").unwrap(),
            ["Ensure this field has no more than 150 characters."]
        );
        assert_eq!(errors.get("title").unwrap(), ["This field may not be blank."]);
    }

    #[test]
    fn null_characters_rejected() {
        let mut errors = FieldErrors::new();
        no_null_chars(&mut errors, "work", "Acme\nInc");
        assert!(errors.is_empty());

        no_null_chars(&mut errors, "work", "Ac\0me");
        assert_eq!(errors.get("work").unwrap(), ["Null characters are not allowed."]);
    }

    #[test]
    fn serializes_as_plain_map() {
        let mut errors = FieldErrors::new();
        required(&mut errors, "name");
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            serde_json::json!({ "name": ["This field is required."] })
        );
        assert!(errors.into_result().is_err());
    }
}
