use std::sync::Arc;

use contact_form_di::Build;
use contact_form_templates_contracts::{Template, TemplateService, TEMPLATES};
use contact_form_utils::trace_instrument;
use tera::Tera;

#[derive(Debug, Clone, Build)]
pub struct TemplateServiceImpl {
    #[state]
    state: State,
}

#[derive(Debug, Clone)]
struct State(Arc<Tera>);

impl Default for State {
    fn default() -> Self {
        let mut tera = Tera::default();

        tera.add_raw_templates(TEMPLATES.iter().copied()).unwrap();

        Self(tera.into())
    }
}

impl TemplateService for TemplateServiceImpl {
    #[trace_instrument(skip(self, template), fields(name = T::NAME))]
    fn render<T: Template + 'static>(&self, template: &T) -> anyhow::Result<String> {
        let context = tera::Context::from_serialize(template)?;
        self.state.0.render(T::NAME, &context).map_err(Into::into)
    }
}
