use anyhow::bail;
use clap::Args;
use contact_form_config::Config;
use contact_form_core_contracts::{ContactFormService, ContactFormSubmitError};
use contact_form_di::Provide;
use contact_form_models::form::{ContactFormField, ContactFormFields, ContactFormState};
use tokio::sync::watch;
use tracing::{debug, info};

use super::FieldArgs;
use crate::environment::{types::ContactForm, ConfigProvider};

#[derive(Debug, Args)]
pub struct SubmitArgs {
    #[command(flatten)]
    pub fields: FieldArgs,
}

impl SubmitArgs {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let mut provider = ConfigProvider::new(&config)?;
        let form: ContactForm = provider.provide();

        info!("Submitting contact form");
        let message = submit(&form, self.fields.into_fields()).await?;
        println!("{message}");

        Ok(())
    }
}

/// Enter `fields` into the form and submit it. Returns the success banner or
/// fails with the text shown to the user.
pub async fn submit(
    form: &impl ContactFormService,
    fields: ContactFormFields,
) -> anyhow::Result<&'static str> {
    let watcher = tokio::spawn(log_changes(form.subscribe()));

    for field in ContactFormField::ALL {
        form.update_field(field, fields.get(field).to_owned());
    }
    let result = form.submit().await;

    watcher.abort();

    match result {
        Ok(()) => Ok("Message successfully sent!"),
        Err(ContactFormSubmitError::Validation(errors)) => {
            for (field, message) in errors.iter() {
                eprintln!("{field}: {message}");
            }
            bail!("Invalid form input")
        }
        Err(ContactFormSubmitError::InFlight) => bail!("A submission is already in progress"),
        Err(ContactFormSubmitError::Send) => bail!("Something went wrong!"),
    }
}

async fn log_changes(mut changes: watch::Receiver<ContactFormState>) {
    while changes.changed().await.is_ok() {
        let state = changes.borrow_and_update().clone();
        debug!(
            outcome = ?state.outcome,
            submitting = state.submitting,
            errors = state.errors.len(),
            "form state changed"
        );
    }
}
