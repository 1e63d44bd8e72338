use contact_form_models::{
    contact::MESSAGE_MAX_LENGTH,
    form::{ContactFormFields, ContactFormState, ErrorMap, SubmissionOutcome},
};
use serde::Serialize;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TemplateService: Send + Sync + 'static {
    /// Render the given template.
    fn render<T: Template + 'static>(&self, template: &T) -> anyhow::Result<String>;
}

#[cfg(feature = "mock")]
impl MockTemplateService {
    pub fn with_render<T: Template + Send + PartialEq + std::fmt::Debug + 'static>(
        mut self,
        template: T,
        result: String,
    ) -> Self {
        self.expect_render()
            .once()
            .with(mockall::predicate::eq(template))
            .return_once(|_| Ok(result));
        self
    }
}

pub trait Template: Serialize {
    /// Name of the template. Names ending in `.html` are rendered with HTML
    /// escaping.
    const NAME: &'static str;
    const TEMPLATE: &'static str;
}

macro_rules! templates {
    ($( $ident:ident ( $path:literal ), )* ) => {
        $(
            impl Template for $ident {
                const NAME: &'static str = $path;
                const TEMPLATE: &'static str = include_str!(concat!("../templates/", $path));
            }
        )*

        pub const TEMPLATES: &[(&str, &str)] = &[
            $( ($ident::NAME, $ident::TEMPLATE) ),*
        ];
    };
}

templates! {
    ContactFormTemplate("contact_form.html"),
}

/// The markup of the contact form including inline validation messages and the
/// outcome banner of the last submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactFormTemplate {
    pub fields: ContactFormFields,
    pub errors: ErrorMap,
    pub outcome: SubmissionOutcome,
    pub submitting: bool,
    pub message_max_length: usize,
}

impl From<ContactFormState> for ContactFormTemplate {
    fn from(value: ContactFormState) -> Self {
        Self {
            fields: value.fields,
            errors: value.errors,
            outcome: value.outcome,
            submitting: value.submitting,
            message_max_length: MESSAGE_MAX_LENGTH,
        }
    }
}
