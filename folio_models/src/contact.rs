use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{macros::nutype_string, validation::FieldError};

/// Storage key of the timestamp of the last successful submission.
pub const LAST_SUBMISSION_KEY: &str = "lastContactSubmit";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    Name,
    Email,
    Message,
}

impl FormField {
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown form field {0:?}")]
pub struct UnknownFormField(pub String);

impl FromStr for FormField {
    type Err = UnknownFormField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownFormField(s.into()))
    }
}

/// One value per form field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerField<T> {
    pub name: T,
    pub email: T,
    pub message: T,
}

impl<T> PerField<T> {
    pub fn from_fn(mut f: impl FnMut(FormField) -> T) -> Self {
        Self {
            name: f(FormField::Name),
            email: f(FormField::Email),
            message: f(FormField::Message),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &T)> {
        FormField::ALL.into_iter().map(|field| (field, &self[field]))
    }
}

impl<T> Index<FormField> for PerField<T> {
    type Output = T;

    fn index(&self, field: FormField) -> &Self::Output {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Message => &self.message,
        }
    }
}

impl<T> IndexMut<FormField> for PerField<T> {
    fn index_mut(&mut self, field: FormField) -> &mut Self::Output {
        match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Message => &mut self.message,
        }
    }
}

/// The raw values entered by the user.
pub type FormFields = PerField<String>;

/// Whether the user has left (blurred) a field at least once.
pub type TouchedState = PerField<bool>;

/// The current validation error of each field, `None` if the field is valid.
pub type FieldErrors = PerField<Option<FieldError>>;

impl PerField<bool> {
    pub fn touch_all(&mut self) {
        *self = Self::from_fn(|_| true);
    }
}

impl PerField<Option<FieldError>> {
    pub fn has_errors(&self) -> bool {
        self.iter().any(|(_, error)| error.is_some())
    }

    /// Returns the error message of `field`, or an empty string if the field
    /// is valid.
    pub fn message(&self, field: FormField) -> String {
        self[field]
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}

/// Outcome of the most recent submission attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Success(String),
    Error(String),
}

impl SubmissionStatus {
    pub fn message(&self) -> &str {
        match self {
            Self::Idle => "",
            Self::Success(message) | Self::Error(message) => message,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFormState {
    pub fields: FormFields,
    pub errors: FieldErrors,
    pub touched: TouchedState,
    pub status: SubmissionStatus,
    pub submitting: bool,
}

impl ContactFormState {
    /// Returns the error of `field` if it should be shown to the user, i.e.
    /// if the field has been touched.
    pub fn visible_error(&self, field: FormField) -> Option<&FieldError> {
        self.touched[field]
            .then_some(self.errors[field].as_ref())
            .flatten()
    }

    /// Number of characters entered into the message field.
    pub fn message_char_count(&self) -> usize {
        self.fields.message.chars().count()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    /// Clears fields, errors and touched state. The submission status is kept.
    pub fn clear_form(&mut self) {
        self.fields = Default::default();
        self.errors = Default::default();
        self.touched = Default::default();
    }
}

nutype_string!(
    /// Sender name, trimmed.
    ContactName(sanitize(trim))
);

nutype_string!(
    /// Sender email address, trimmed and lowercased.
    ContactEmail(sanitize(trim, lowercase))
);

nutype_string!(
    /// Message body, trimmed.
    ContactMessageContent(sanitize(trim))
);

/// The message handed to the mail relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPayload {
    pub from_name: ContactName,
    pub from_email: ContactEmail,
    pub message: ContactMessageContent,
    /// Human readable time of the submission.
    pub time: String,
    /// Label of the recipient.
    pub to_name: String,
}

impl ContactPayload {
    /// Builds a normalized payload from the raw form values.
    pub fn from_fields(fields: &FormFields, time: String, to_name: String) -> Self {
        Self {
            from_name: ContactName::new(fields.name.clone()),
            from_email: ContactEmail::new(fields.email.clone()),
            message: ContactMessageContent::new(fields.message.clone()),
            time,
            to_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::validation::NameError;

    #[test]
    fn form_field_from_str() {
        for field in FormField::ALL {
            assert_eq!(field.as_str().parse::<FormField>().unwrap(), field);
        }
        assert_eq!(
            "phone".parse::<FormField>(),
            Err(UnknownFormField("phone".into()))
        );
    }

    #[test]
    fn per_field_index() {
        let mut fields = FormFields::default();
        fields[FormField::Email] = "jane@example.com".into();

        assert_eq!(fields.email, "jane@example.com");
        assert_eq!(fields[FormField::Name], "");
        assert_eq!(
            fields.iter().map(|(field, _)| field).collect::<Vec<_>>(),
            FormField::ALL
        );
    }

    #[test]
    fn field_errors() {
        let mut errors = FieldErrors::default();
        assert!(!errors.has_errors());
        assert_eq!(errors.message(FormField::Name), "");

        errors.name = Some(NameError::Required.into());
        assert!(errors.has_errors());
        assert_eq!(errors.message(FormField::Name), "Name is required");
    }

    #[test]
    fn submission_status() {
        let idle = SubmissionStatus::default();
        assert!(idle.is_idle());
        assert!(!idle.is_error());
        assert_eq!(idle.message(), "");

        let error = SubmissionStatus::Error("nope".into());
        assert!(error.is_error());
        assert!(!error.is_success());
        assert_eq!(error.message(), "nope");

        let success = SubmissionStatus::Success("yay".into());
        assert!(success.is_success());
        assert!(!success.is_idle());
    }

    #[test]
    fn visible_error_requires_touch() {
        let mut state = ContactFormState::default();
        state.errors.name = Some(NameError::TooShort.into());

        assert_eq!(state.visible_error(FormField::Name), None);

        state.touched.name = true;
        assert_eq!(
            state.visible_error(FormField::Name),
            Some(&FieldError::Name(NameError::TooShort))
        );
        assert_eq!(state.visible_error(FormField::Email), None);
    }

    #[test]
    fn clear_form_keeps_status() {
        let mut state = ContactFormState {
            fields: PerField::from_fn(|field| field.to_string()),
            errors: PerField::from_fn(|_| Some(NameError::Required.into())),
            touched: PerField::from_fn(|_| true),
            status: SubmissionStatus::Success("ok".into()),
            submitting: false,
        };

        state.clear_form();

        assert_eq!(
            state,
            ContactFormState {
                status: SubmissionStatus::Success("ok".into()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn message_char_count() {
        let mut state = ContactFormState::default();
        state.fields.message = "Grüße".into();
        assert_eq!(state.message_char_count(), 5);
    }

    #[test]
    fn payload_is_normalized() {
        let fields = FormFields {
            name: "  Jane Doe ".into(),
            email: " Jane@Example.COM ".into(),
            message: "\n Let's build something together  ".into(),
        };

        let payload = ContactPayload::from_fields(&fields, "now".into(), "Folio Owner".into());

        assert_eq!(&*payload.from_name, "Jane Doe");
        assert_eq!(&*payload.from_email, "jane@example.com");
        assert_eq!(&*payload.message, "Let's build something together");
    }

    #[test]
    fn payload_serialization() {
        let payload = ContactPayload::from_fields(
            &FormFields {
                name: "Jane Doe".into(),
                email: "jane@example.com".into(),
                message: "Hello there".into(),
            },
            "2024-01-01 12:00:00 UTC".into(),
            "Folio Owner".into(),
        );

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({
                "from_name": "Jane Doe",
                "from_email": "jane@example.com",
                "message": "Hello there",
                "time": "2024-01-01 12:00:00 UTC",
                "to_name": "Folio Owner",
            })
        );
    }
}
