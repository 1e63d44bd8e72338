use clap::Args;
use contact_form_core_impl::validator;
use contact_form_models::form::ContactFormState;
use contact_form_templates_contracts::{ContactFormTemplate, TemplateService};
use contact_form_utils::Apply;

use super::FieldArgs;

#[derive(Debug, Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub fields: FieldArgs,
    /// Show the validation messages for the given values
    #[arg(long)]
    pub validate: bool,
}

impl RenderArgs {
    pub fn invoke(self, templates: &impl TemplateService) -> anyhow::Result<()> {
        println!("{}", render(templates, self)?);
        Ok(())
    }
}

/// Render the form markup for the given field values.
pub fn render(templates: &impl TemplateService, args: RenderArgs) -> anyhow::Result<String> {
    let state = ContactFormState {
        fields: args.fields.into_fields(),
        ..Default::default()
    }
    .with(|state| {
        if args.validate {
            state.errors = validator::validate(&state.fields);
        }
    });

    templates.render(&ContactFormTemplate::from(state))
}
