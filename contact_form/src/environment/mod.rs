use contact_form_config::Config;
use contact_form_di::provider;
use contact_form_extern_impl::submission::SubmissionApiServiceConfig;

pub mod types;

provider! {
    /// Provider for all services of the contact form, built from the configuration
    pub ConfigProvider {
        submission_api_service_config: SubmissionApiServiceConfig,
    }
}

impl ConfigProvider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let submission_api_service_config = SubmissionApiServiceConfig::new(
            &config.submission.origin,
            config.submission.endpoint_override.clone(),
        )?;

        Ok(Self {
            _cache: Default::default(),
            submission_api_service_config,
        })
    }
}
