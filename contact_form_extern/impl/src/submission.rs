use std::sync::Arc;

use anyhow::{anyhow, Context};
use contact_form_di::Build;
use contact_form_extern_contracts::submission::{SubmissionApiError, SubmissionApiService};
use contact_form_models::contact::ContactSubmission;
use contact_form_utils::trace_instrument;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::trace;
use url::Url;

use crate::http::HttpClient;

pub const SUBMISSION_ENDPOINT: &str = "/api/sendgrid";

#[derive(Debug, Clone, Build)]
pub struct SubmissionApiServiceImpl {
    config: SubmissionApiServiceConfig,
    #[state]
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct SubmissionApiServiceConfig {
    endpoint: Arc<Url>,
}

impl SubmissionApiServiceConfig {
    /// Resolve the relay endpoint relative to `origin` unless an explicit
    /// endpoint is given.
    pub fn new(origin: &Url, endpoint_override: Option<Url>) -> anyhow::Result<Self> {
        let endpoint = match endpoint_override {
            Some(endpoint) => endpoint,
            None => origin
                .join(SUBMISSION_ENDPOINT)
                .with_context(|| format!("Failed to resolve {SUBMISSION_ENDPOINT} on {origin}"))?,
        };

        Ok(Self {
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl SubmissionApiService for SubmissionApiServiceImpl {
    #[trace_instrument(skip(self, submission))]
    async fn submit(&self, submission: ContactSubmission) -> Result<(), SubmissionApiError> {
        let response = self
            .client
            .post((*self.config.endpoint).clone())
            .json(&SubmissionRequest::from(&submission))
            .send()
            .await
            .context("Failed to send request to mail relay")?;

        let status = response.status();
        trace!(%status, "received response from mail relay");

        let mut body = response
            .json::<Map<String, Value>>()
            .await
            .context("Failed to parse mail relay response")?;

        if let Some(error) = body.remove("error").filter(is_truthy) {
            return Err(SubmissionApiError::Rejected(match error {
                Value::String(error) => error,
                error => error.to_string(),
            }));
        }

        if !status.is_success() {
            return Err(anyhow!("Mail relay responded with status {status}").into());
        }

        Ok(())
    }
}

#[derive(Serialize)]
struct SubmissionRequest<'a> {
    email: &'a str,
    fullname: &'a str,
    subject: &'a str,
    message: &'a str,
}

impl<'a> From<&'a ContactSubmission> for SubmissionRequest<'a> {
    fn from(value: &'a ContactSubmission) -> Self {
        Self {
            email: &value.email,
            fullname: &value.name,
            subject: &value.subject,
            message: &value.message,
        }
    }
}

/// Whether a JSON value would be considered `true` in a boolean context by the
/// relay's JavaScript clients.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn truthiness() {
        for (value, expected) in [
            (json!(null), false),
            (json!(false), false),
            (json!(0), false),
            (json!(0.0), false),
            (json!(""), false),
            (json!(true), true),
            (json!(1), true),
            (json!("boom"), true),
            (json!([]), true),
            (json!({}), true),
        ] {
            assert_eq!(is_truthy(&value), expected, "{value}");
        }
    }

    #[test]
    fn request_body_shape() {
        // Arrange
        let submission = ContactSubmission {
            name: "Jo".try_into().unwrap(),
            email: "jo@x.com".try_into().unwrap(),
            subject: "Hi".try_into().unwrap(),
            message: "Hello".try_into().unwrap(),
        };

        // Act
        let result = serde_json::to_value(SubmissionRequest::from(&submission)).unwrap();

        // Assert
        assert_eq!(
            result,
            json!({
                "email": "jo@x.com",
                "fullname": "Jo",
                "subject": "Hi",
                "message": "Hello",
            })
        );
    }

    #[test]
    fn endpoint_relative_to_origin() {
        let origin = "http://127.0.0.1:8003/contact/".parse().unwrap();

        let config = SubmissionApiServiceConfig::new(&origin, None).unwrap();

        assert_eq!(config.endpoint().as_str(), "http://127.0.0.1:8003/api/sendgrid");
    }

    #[test]
    fn endpoint_override() {
        let origin = "http://127.0.0.1:8003".parse().unwrap();
        let endpoint: Url = "http://relay.internal/send".parse().unwrap();

        let config = SubmissionApiServiceConfig::new(&origin, Some(endpoint.clone())).unwrap();

        assert_eq!(*config.endpoint(), endpoint);
    }
}
