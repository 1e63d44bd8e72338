use std::future::Future;

use contact_form_models::contact::ContactSubmission;
use thiserror::Error;

/// Client for the mail relay endpoint that forwards contact requests.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait SubmissionApiService: Send + Sync + 'static {
    /// Send a validated contact request to the mail relay.
    fn submit(
        &self,
        submission: ContactSubmission,
    ) -> impl Future<Output = Result<(), SubmissionApiError>> + Send;
}

#[derive(Debug, Error)]
pub enum SubmissionApiError {
    #[error("The mail relay rejected the message: {0}")]
    Rejected(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockSubmissionApiService {
    pub fn with_submit(mut self, submission: ContactSubmission, result: Result<(), String>) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| {
                Box::pin(std::future::ready(
                    result.map_err(SubmissionApiError::Rejected),
                ))
            });
        self
    }

    pub fn with_submit_failure(
        mut self,
        submission: ContactSubmission,
        error: anyhow::Error,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| Box::pin(std::future::ready(Err(error.into()))));
        self
    }
}
