use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One of the four user editable inputs of the contact form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ContactFormField {
    Name,
    Email,
    Subject,
    Message,
}

impl ContactFormField {
    /// All fields in the order they appear in the form.
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    /// The path of the field in the validation schema.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }
}

impl std::fmt::Display for ContactFormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The raw, unvalidated values currently entered into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFormFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactFormFields {
    pub fn get(&self, field: ContactFormField) -> &str {
        match field {
            ContactFormField::Name => &self.name,
            ContactFormField::Email => &self.email,
            ContactFormField::Subject => &self.subject,
            ContactFormField::Message => &self.message,
        }
    }

    /// Set the value of `field`. Returns `false` if the field already had this
    /// value.
    pub fn set(&mut self, field: ContactFormField, value: String) -> bool {
        let slot = match field {
            ContactFormField::Name => &mut self.name,
            ContactFormField::Email => &mut self.email,
            ContactFormField::Subject => &mut self.subject,
            ContactFormField::Message => &mut self.message,
        };
        if *slot == value {
            return false;
        }
        *slot = value;
        true
    }

    pub fn is_empty(&self) -> bool {
        ContactFormField::ALL
            .into_iter()
            .all(|field| self.get(field).is_empty())
    }
}

/// Validation messages of the last submit attempt. A field without an entry is
/// valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMap(BTreeMap<ContactFormField, String>);

impl ErrorMap {
    pub fn get(&self, field: ContactFormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: ContactFormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn insert(&mut self, field: ContactFormField, message: String) {
        self.0.insert(field, message);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContactFormField, &str)> {
        self.0.iter().map(|(&field, message)| (field, message.as_str()))
    }
}

impl FromIterator<(ContactFormField, String)> for ErrorMap {
    fn from_iter<T: IntoIterator<Item = (ContactFormField, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl std::fmt::Display for ErrorMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (_, message)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(message)?;
        }
        Ok(())
    }
}

/// Result of the last submit attempt that reached the mail relay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionOutcome {
    #[default]
    Idle,
    Success,
    Error,
}

/// Everything needed to render the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFormState {
    pub fields: ContactFormFields,
    pub errors: ErrorMap,
    pub outcome: SubmissionOutcome,
    pub submitting: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_reports_changes() {
        let mut fields = ContactFormFields::default();

        assert!(fields.set(ContactFormField::Name, "Jo".into()));
        assert!(!fields.set(ContactFormField::Name, "Jo".into()));
        assert_eq!(fields.get(ContactFormField::Name), "Jo");
        assert!(!fields.is_empty());
    }

    #[test]
    fn error_map_serializes_by_field_path() {
        let errors = [
            (ContactFormField::Message, "message is a required field".into()),
            (ContactFormField::Email, "email must be a valid email".into()),
        ]
        .into_iter()
        .collect::<ErrorMap>();

        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            serde_json::json!({
                "email": "email must be a valid email",
                "message": "message is a required field",
            })
        );
        assert_eq!(
            errors.to_string(),
            "email must be a valid email, message is a required field"
        );
    }

    #[test]
    fn outcome_defaults_to_idle() {
        let state = ContactFormState::default();

        assert_eq!(state.outcome, SubmissionOutcome::Idle);
        assert!(state.fields.is_empty());
        assert!(state.errors.is_empty());
        assert!(!state.submitting);
    }
}
