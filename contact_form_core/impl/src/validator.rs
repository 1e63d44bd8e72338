//! Field rules of the contact form.
//!
//! Every field is required. A field that is present is then checked against its
//! constraint. Each field yields at most one message.

use contact_form_models::{
    contact::{
        ContactEmail, ContactEmailError, ContactMessageContent, ContactMessageContentError,
        ContactName, ContactSubject, ContactSubmission, MESSAGE_MAX_LENGTH,
    },
    form::{ContactFormField, ContactFormFields, ErrorMap},
};

/// Compute the validation messages for `fields`. An empty map means the fields
/// can be submitted.
pub fn validate(fields: &ContactFormFields) -> ErrorMap {
    parse(fields).err().unwrap_or_default()
}

/// Turn the raw field values into a submission, or report every invalid field.
pub fn parse(fields: &ContactFormFields) -> Result<ContactSubmission, ErrorMap> {
    let mut errors = ErrorMap::default();

    let name = check(&mut errors, ContactFormField::Name, &fields.name, |x| {
        ContactName::try_new(x).map_err(|_| None)
    });

    let email = check(&mut errors, ContactFormField::Email, &fields.email, |x| {
        ContactEmail::try_new(x).map_err(|err| match err {
            ContactEmailError::RegexViolated => Some("email must be a valid email".into()),
            _ => None,
        })
    });

    let subject = check(&mut errors, ContactFormField::Subject, &fields.subject, |x| {
        ContactSubject::try_new(x).map_err(|_| None)
    });

    let message = check(&mut errors, ContactFormField::Message, &fields.message, |x| {
        ContactMessageContent::try_new(x).map_err(|err| match err {
            ContactMessageContentError::PredicateViolated => Some(format!(
                "message must be at most {MESSAGE_MAX_LENGTH} characters"
            )),
            _ => None,
        })
    });

    match (name, email, subject, message) {
        (Some(name), Some(email), Some(subject), Some(message)) => Ok(ContactSubmission {
            name,
            email,
            subject,
            message,
        }),
        _ => Err(errors),
    }
}

/// Run the rule for a single field. `parse` reports a constraint violation
/// with its message, or `None` if the value was missing.
fn check<T>(
    errors: &mut ErrorMap,
    field: ContactFormField,
    value: &str,
    parse: impl FnOnce(String) -> Result<T, Option<String>>,
) -> Option<T> {
    if value.is_empty() {
        errors.insert(field, required(field));
        return None;
    }

    parse(value.to_owned())
        .map_err(|message| errors.insert(field, message.unwrap_or_else(|| required(field))))
        .ok()
}

fn required(field: ContactFormField) -> String {
    format!("{field} is a required field")
}
