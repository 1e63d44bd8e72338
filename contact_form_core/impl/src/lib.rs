use std::sync::Arc;

use contact_form_core_contracts::{ContactFormService, ContactFormSubmitError};
use contact_form_di::Build;
use contact_form_extern_contracts::submission::SubmissionApiService;
use contact_form_models::{
    contact::ContactSubmission,
    form::{ContactFormField, ContactFormState, ErrorMap, SubmissionOutcome},
};
use contact_form_utils::trace_instrument;
use tokio::sync::watch;
use tracing::{debug, trace, warn};

pub mod validator;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Build)]
pub struct ContactFormServiceImpl<SubmissionApi> {
    submission_api: SubmissionApi,
    #[state]
    state: FormState,
}

#[derive(Debug, Clone)]
struct FormState(Arc<watch::Sender<ContactFormState>>);

impl Default for FormState {
    fn default() -> Self {
        Self(watch::Sender::new(ContactFormState::default()).into())
    }
}

impl<SubmissionApi> ContactFormService for ContactFormServiceImpl<SubmissionApi>
where
    SubmissionApi: SubmissionApiService,
{
    fn state(&self) -> ContactFormState {
        self.state.0.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<ContactFormState> {
        self.state.0.subscribe()
    }

    fn update_field(&self, field: ContactFormField, value: String) {
        self.state
            .0
            .send_if_modified(|state| state.fields.set(field, value));
    }

    #[trace_instrument(skip(self))]
    async fn submit(&self) -> Result<(), ContactFormSubmitError> {
        let submission = self.begin_submission()?;
        let in_flight = InFlight::new(&self.state.0);

        trace!("send submission");
        match self.submission_api.submit(submission).await {
            Ok(()) => {
                in_flight.finish(SubmissionOutcome::Success);
                Ok(())
            }
            Err(err) => {
                warn!("Failed to send contact form submission: {err:#}");
                in_flight.finish(SubmissionOutcome::Error);
                Err(ContactFormSubmitError::Send)
            }
        }
    }
}

impl<SubmissionApi> ContactFormServiceImpl<SubmissionApi> {
    /// Validate the current fields and mark the form as submitting if they are
    /// valid and no other submission is outstanding.
    fn begin_submission(&self) -> Result<ContactSubmission, ContactFormSubmitError> {
        let mut result = Err(ContactFormSubmitError::InFlight);

        self.state.0.send_if_modified(|state| {
            if state.submitting {
                debug!("rejecting submit while another submission is in flight");
                return false;
            }

            match validator::parse(&state.fields) {
                Ok(submission) => {
                    state.errors = ErrorMap::default();
                    state.submitting = true;
                    result = Ok(submission);
                }
                Err(errors) => {
                    debug!(%errors, "contact form is invalid");
                    state.errors = errors.clone();
                    result = Err(ContactFormSubmitError::Validation(errors));
                }
            }

            true
        });

        result
    }
}

/// Clears the `submitting` flag when the submission finishes or is dropped.
struct InFlight<'a> {
    state: &'a watch::Sender<ContactFormState>,
    finished: bool,
}

impl<'a> InFlight<'a> {
    fn new(state: &'a watch::Sender<ContactFormState>) -> Self {
        Self {
            state,
            finished: false,
        }
    }

    fn finish(mut self, outcome: SubmissionOutcome) {
        self.finished = true;
        self.state.send_modify(|state| {
            state.submitting = false;
            state.outcome = outcome;
            if outcome == SubmissionOutcome::Success {
                state.fields = Default::default();
                state.errors = Default::default();
            }
        });
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.finished {
            debug!("submission cancelled");
            self.state.send_modify(|state| state.submitting = false);
        }
    }
}
