//! Write shapes for profiles and projects.
//!
//! Payloads deserialize leniently (unknown and read-only keys are ignored)
//! and are then checked into either a `New*` value for creation or a
//! `*Changes` value for partial updates.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::validation::{self, FieldErrors};

const SKILL_NAME_MAX: usize = 100;

/// A scalar that may be missing from the payload, explicitly `null`, or set.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    Absent,
    Null,
    Value(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Absent
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Field::Value(value),
            None => Field::Null,
        })
    }
}

/// A relationship set in a write payload.
///
/// Missing or `null` means "leave the current set alone"; any list,
/// including an empty one, replaces the set entirely.
#[derive(Debug, Clone, PartialEq)]
pub enum Relation<T> {
    Keep,
    Replace(Vec<T>),
}

impl<T> Default for Relation<T> {
    fn default() -> Self {
        Relation::Keep
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Relation<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Vec<T>>::deserialize(deserializer)? {
            Some(items) => Relation::Replace(items),
            None => Relation::Keep,
        })
    }
}

impl<T> Relation<T> {
    /// The list to apply on creation, where "keep" means no members.
    pub fn into_initial(self) -> Vec<T> {
        match self {
            Relation::Keep => Vec::new(),
            Relation::Replace(items) => items,
        }
    }

    fn map(self, f: impl FnOnce(Vec<T>) -> Vec<T>) -> Self {
        match self {
            Relation::Keep => Relation::Keep,
            Relation::Replace(items) => Relation::Replace(f(items)),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProfilePayload {
    pub name: Field<String>,
    pub email: Field<String>,
    pub education: Field<String>,
    pub work: Field<String>,
    pub github: Field<String>,
    pub linkedin: Field<String>,
    pub portfolio: Field<String>,
    pub skill_names: Relation<String>,
    pub project_ids: Relation<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProfile {
    pub name: String,
    pub email: String,
    pub education: String,
    pub work: String,
    pub github: String,
    pub linkedin: String,
    pub portfolio: String,
    pub skill_names: Vec<String>,
    pub project_ids: Vec<i64>,
}

/// Partial profile update. `None` leaves the stored column unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub education: Option<String>,
    pub work: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
    pub skill_names: Relation<String>,
    pub project_ids: Relation<i64>,
}

impl ProfilePayload {
    pub fn into_new(self) -> Result<NewProfile, FieldErrors> {
        let mut errors = FieldErrors::new();
        let changes = self.check(&mut errors, true);
        errors.into_result()?;

        Ok(NewProfile {
            name: changes.name.unwrap_or_default(),
            email: changes.email.unwrap_or_default(),
            education: changes.education.unwrap_or_default(),
            work: changes.work.unwrap_or_default(),
            github: changes.github.unwrap_or_default(),
            linkedin: changes.linkedin.unwrap_or_default(),
            portfolio: changes.portfolio.unwrap_or_default(),
            skill_names: changes.skill_names.into_initial(),
            project_ids: changes.project_ids.into_initial(),
        })
    }

    pub fn into_changes(self) -> Result<ProfileChanges, FieldErrors> {
        let mut errors = FieldErrors::new();
        let changes = self.check(&mut errors, false);
        errors.into_result()?;
        Ok(changes)
    }

    fn check(self, errors: &mut FieldErrors, creating: bool) -> ProfileChanges {
        let name = scalar(errors, "name", self.name, creating);
        if let Some(name) = &name {
            validation::text(errors, "name", name, 150);
        }

        let email = scalar(errors, "email", self.email, creating);
        if let Some(email) = &email {
            validation::email(errors, "email", email);
        }

        let education = scalar(errors, "education", self.education, false);
        let work = scalar(errors, "work", self.work, false);

        let github = scalar(errors, "github", self.github, false);
        let linkedin = scalar(errors, "linkedin", self.linkedin, false);
        let portfolio = scalar(errors, "portfolio", self.portfolio, false);
        for (field, value) in [
            ("github", &github),
            ("linkedin", &linkedin),
            ("portfolio", &portfolio),
        ] {
            if let Some(url) = value {
                validation::optional_url(errors, field, url);
            }
        }

        ProfileChanges {
            name,
            email,
            education,
            work,
            github,
            linkedin,
            portfolio,
            skill_names: self
                .skill_names
                .map(|names| normalize_skill_names(errors, names)),
            project_ids: self.project_ids.map(dedup_ids),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProjectPayload {
    pub title: Field<String>,
    pub description: Field<String>,
    pub links: Field<Value>,
    pub skill_names: Relation<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub links: Value,
    pub skill_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub links: Option<Value>,
    pub skill_names: Relation<String>,
}

impl ProjectPayload {
    pub fn into_new(self) -> Result<NewProject, FieldErrors> {
        let mut errors = FieldErrors::new();
        let changes = self.check(&mut errors, true);
        errors.into_result()?;

        Ok(NewProject {
            title: changes.title.unwrap_or_default(),
            description: changes.description.unwrap_or_default(),
            links: changes
                .links
                .unwrap_or_else(|| Value::Object(Default::default())),
            skill_names: changes.skill_names.into_initial(),
        })
    }

    pub fn into_changes(self) -> Result<ProjectChanges, FieldErrors> {
        let mut errors = FieldErrors::new();
        let changes = self.check(&mut errors, false);
        errors.into_result()?;
        Ok(changes)
    }

    fn check(self, errors: &mut FieldErrors, creating: bool) -> ProjectChanges {
        let title = scalar(errors, "title", self.title, creating);
        if let Some(title) = &title {
            validation::text(errors, "title", title, 200);
        }

        let description = scalar(errors, "description", self.description, false);

        let links = match self.links {
            Field::Absent => None,
            Field::Null => {
                errors.add("links", "This field may not be null.");
                None
            }
            Field::Value(links) if !links.is_object() => {
                errors.add("links", "Expected a JSON object of link names to URLs.");
                None
            }
            Field::Value(links) if contains_null_char(&links) => {
                errors.add("links", "Null characters are not allowed.");
                None
            }
            Field::Value(links) => Some(links),
        };

        ProjectChanges {
            title,
            description,
            links,
            skill_names: self
                .skill_names
                .map(|names| normalize_skill_names(errors, names)),
        }
    }
}

/// Resolve a scalar field, trimming surrounding whitespace.
fn scalar(
    errors: &mut FieldErrors,
    field: &str,
    value: Field<String>,
    required: bool,
) -> Option<String> {
    match value {
        Field::Absent => {
            if required {
                validation::required(errors, field);
            }
            None
        }
        Field::Null => {
            errors.add(field, "This field may not be null.");
            None
        }
        Field::Value(value) => {
            validation::no_null_chars(errors, field, &value);
            Some(value.trim().to_string())
        }
    }
}

fn contains_null_char(value: &Value) -> bool {
    match value {
        Value::String(s) => s.contains('\0'),
        Value::Array(items) => items.iter().any(contains_null_char),
        Value::Object(map) => map
            .iter()
            .any(|(key, item)| key.contains('\0') || contains_null_char(item)),
        _ => false,
    }
}

/// Trim each name and drop exact repeats, keeping first-seen order.
/// Comparison is case-sensitive: "Go" and "go" are distinct skills.
pub fn normalize_skill_names(errors: &mut FieldErrors, names: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for (index, raw) in names.iter().enumerate() {
        let name = raw.trim();
        if name.is_empty() {
            errors.add(
                "skill_names",
                format!("Item {index}: This field may not be blank."),
            );
        } else if name.contains('\0') {
            errors.add(
                "skill_names",
                format!("Item {index}: Null characters are not allowed."),
            );
        } else if name.chars().count() > SKILL_NAME_MAX {
            errors.add(
                "skill_names",
                format!("Item {index}: Ensure this field has no more than {SKILL_NAME_MAX} characters."),
            );
        } else if !out.iter().any(|seen| seen == name) {
            out.push(name.to_string());
        }
    }
    out
}

fn dedup_ids(ids: Vec<i64>) -> Vec<i64> {
    let mut out: Vec<i64> = Vec::with_capacity(ids.len());
    for id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile(body: Value) -> ProfilePayload {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn relation_distinguishes_absent_null_and_empty() {
        assert_eq!(profile(json!({})).skill_names, Relation::Keep);
        assert_eq!(profile(json!({ "skill_names": null })).skill_names, Relation::Keep);
        assert_eq!(
            profile(json!({ "skill_names": [] })).skill_names,
            Relation::Replace(vec![])
        );
        assert_eq!(
            profile(json!({ "project_ids": [3, 1] })).project_ids,
            Relation::Replace(vec![3, 1])
        );
    }

    #[test]
    fn create_requires_name_and_email() {
        let errors = profile(json!({ "work": "Acme" })).into_new().unwrap_err();
        assert_eq!(errors.get("name").unwrap(), ["This field is required."]);
        assert_eq!(errors.get("email").unwrap(), ["This field is required."]);
    }

    #[test]
    fn create_fills_defaults() {
        let new = profile(json!({ "name": " Jane ", "email": "jane@example.com" }))
            .into_new()
            .unwrap();
        assert_eq!(new.name, "Jane");
        assert_eq!(new.github, "");
        assert!(new.skill_names.is_empty());
        assert!(new.project_ids.is_empty());
    }

    #[test]
    fn update_allows_partial_payloads() {
        let changes = profile(json!({ "work": "Freelance" })).into_changes().unwrap();
        assert_eq!(changes.work.as_deref(), Some("Freelance"));
        assert_eq!(changes.name, None);
        assert_eq!(changes.skill_names, Relation::Keep);
    }

    #[test]
    fn update_rejects_null_scalars_and_bad_urls() {
        let errors = profile(json!({ "name": null, "github": "not a url" }))
            .into_changes()
            .unwrap_err();
        assert_eq!(errors.get("name").unwrap(), ["This field may not be null."]);
        assert_eq!(errors.get("github").unwrap(), ["Enter a valid URL."]);
    }

    #[test]
    fn skill_names_trimmed_and_deduplicated_case_sensitively() {
        let mut errors = FieldErrors::new();
        let names = normalize_skill_names(
            &mut errors,
            vec!["Go".into(), " Go ".into(), "go".into(), "Rust".into()],
        );
        assert!(errors.is_empty());
        assert_eq!(names, ["Go", "go", "Rust"]);
    }

    #[test]
    fn blank_skill_names_rejected() {
        let errors = profile(json!({ "skill_names": ["Rust", "  "] }))
            .into_changes()
            .unwrap_err();
        assert_eq!(
            errors.get("skill_names").unwrap(),
            ["Item 1: This field may not be blank."]
        );
    }

    #[test]
    fn null_characters_rejected_in_every_text_field() {
        let errors = profile(json!({
            "name": "Ja\0ne",
            "email": "jane@example.com",
            "skill_names": ["Rust", "G\0o"],
        }))
        .into_new()
        .unwrap_err();
        assert_eq!(errors.get("name").unwrap(), ["Null characters are not allowed."]);
        assert_eq!(
            errors.get("skill_names").unwrap(),
            ["Item 1: Null characters are not allowed."]
        );

        let payload: ProjectPayload = serde_json::from_value(json!({
            "title": "CLI",
            "description": "a\0b",
            "links": { "repo": ["https://x.dev/\0"] },
        }))
        .unwrap();
        let errors = payload.into_new().unwrap_err();
        assert!(errors.get("title").is_none());
        assert_eq!(errors.get("description").unwrap(), ["Null characters are not allowed."]);
        assert_eq!(errors.get("links").unwrap(), ["Null characters are not allowed."]);
    }

    #[test]
    fn project_ids_deduplicated() {
        let changes = profile(json!({ "project_ids": [2, 1, 2] })).into_changes().unwrap();
        assert_eq!(changes.project_ids, Relation::Replace(vec![2, 1]));
    }

    #[test]
    fn project_links_must_be_an_object() {
        let payload: ProjectPayload =
            serde_json::from_value(json!({ "title": "CLI", "links": ["https://x.dev"] })).unwrap();
        let errors = payload.into_new().unwrap_err();
        assert!(errors.get("links").is_some());
    }

    #[test]
    fn project_create_defaults_links_to_empty_object() {
        let payload: ProjectPayload = serde_json::from_value(json!({ "title": "CLI" })).unwrap();
        let new = payload.into_new().unwrap();
        assert_eq!(new.links, json!({}));
        assert_eq!(new.description, "");
    }
}
