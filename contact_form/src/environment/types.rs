use contact_form_core_impl::ContactFormServiceImpl;
use contact_form_extern_impl::submission::SubmissionApiServiceImpl;
use contact_form_templates_impl::TemplateServiceImpl;

// Extern
pub type SubmissionApi = SubmissionApiServiceImpl;

// Core
pub type ContactForm = ContactFormServiceImpl<SubmissionApi>;

// Templates
pub type Templates = TemplateServiceImpl;
