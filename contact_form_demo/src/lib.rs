use std::sync::LazyLock;

use contact_form_models::{
    contact::{ContactSubmission, MESSAGE_MAX_LENGTH},
    form::ContactFormFields,
};

pub static JO: LazyLock<ContactFormFields> = LazyLock::new(|| ContactFormFields {
    name: "Jo".into(),
    email: "jo@x.com".into(),
    subject: "Hi".into(),
    message: "Hello".into(),
});

pub static JO_SUBMISSION: LazyLock<ContactSubmission> = LazyLock::new(|| ContactSubmission {
    name: "Jo".try_into().unwrap(),
    email: "jo@x.com".try_into().unwrap(),
    subject: "Hi".try_into().unwrap(),
    message: "Hello".try_into().unwrap(),
});

/// A submission the testing relay is configured to reject.
pub static REJECTED: LazyLock<ContactFormFields> = LazyLock::new(|| ContactFormFields {
    name: "Max Mustermann".into(),
    email: "max.mustermann@example.de".into(),
    subject: "fail".into(),
    message: "Please bounce this one.".into(),
});

pub static REJECTED_SUBMISSION: LazyLock<ContactSubmission> =
    LazyLock::new(|| ContactSubmission {
        name: "Max Mustermann".try_into().unwrap(),
        email: "max.mustermann@example.de".try_into().unwrap(),
        subject: "fail".try_into().unwrap(),
        message: "Please bounce this one.".try_into().unwrap(),
    });

pub static INVALID: LazyLock<ContactFormFields> = LazyLock::new(|| ContactFormFields {
    name: String::new(),
    email: "not-an-email".into(),
    subject: "Hi".into(),
    message: "x".repeat(MESSAGE_MAX_LENGTH + 1),
});
