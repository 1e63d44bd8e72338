use std::future::Future;

use contact_form_models::form::{ContactFormField, ContactFormState, ErrorMap};
use thiserror::Error;
use tokio::sync::watch;

/// Owns the state of a single contact form and drives the
/// validate-submit-reset cycle.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFormService: Send + Sync + 'static {
    /// A snapshot of the current form state.
    fn state(&self) -> ContactFormState;

    /// Subscribe to state changes. The receiver is notified after every
    /// mutation and can be used to re-render the form.
    fn subscribe(&self) -> watch::Receiver<ContactFormState>;

    /// Set the value of a single field. Does not trigger validation.
    fn update_field(&self, field: ContactFormField, value: String);

    /// Validate the current field values and, if they are valid, send them to
    /// the mail relay.
    ///
    /// On success the fields are cleared. On failure the fields are kept so
    /// that the user can submit again.
    fn submit(&self) -> impl Future<Output = Result<(), ContactFormSubmitError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactFormSubmitError {
    #[error("Invalid form input: {0}")]
    Validation(ErrorMap),
    #[error("A submission is already in progress.")]
    InFlight,
    #[error("Failed to send message.")]
    Send,
}
