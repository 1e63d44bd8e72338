use clap::Args;
use contact_form_models::form::ContactFormFields;
use contact_form_utils::Apply;

pub mod render;
pub mod submit;

/// Values for the inputs of the contact form. Omitted values are left empty.
#[derive(Debug, Clone, Default, Args)]
pub struct FieldArgs {
    /// Full name of the sender
    #[arg(long)]
    pub name: Option<String>,
    /// Email address of the sender
    #[arg(long)]
    pub email: Option<String>,
    /// Subject of the message
    #[arg(long)]
    pub subject: Option<String>,
    /// The message itself
    #[arg(long)]
    pub message: Option<String>,
}

impl FieldArgs {
    pub fn into_fields(self) -> ContactFormFields {
        ContactFormFields::default()
            .apply_map(self.name, |fields, name| ContactFormFields { name, ..fields })
            .apply_map(self.email, |fields, email| ContactFormFields { email, ..fields })
            .apply_map(self.subject, |fields, subject| ContactFormFields {
                subject,
                ..fields
            })
            .apply_map(self.message, |fields, message| ContactFormFields {
                message,
                ..fields
            })
    }
}
