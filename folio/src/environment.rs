use folio_config::Config;
use folio_core_contact_impl::{ContactFormServiceConfig, ContactFormServiceImpl};
use folio_extern_impl::{
    http::HttpClient,
    relay::{MailRelayApiServiceConfig, MailRelayApiServiceImpl},
};
use folio_models::validation::ValidationRules;
use folio_shared_impl::time::TimeServiceImpl;
use folio_storage_file::FileStore;

/// The contact form wired to its production collaborators.
pub type ContactForm = ContactFormServiceImpl<MailRelayApiServiceImpl, FileStore, TimeServiceImpl>;

pub fn contact_form(config: &Config) -> anyhow::Result<ContactForm> {
    let mail_relay_api = MailRelayApiServiceImpl::new(mail_relay_config(config), HttpClient::new()?);

    Ok(ContactFormServiceImpl::new(
        mail_relay_api,
        store(config),
        TimeServiceImpl,
        contact_form_config(config),
    ))
}

pub fn store(config: &Config) -> FileStore {
    FileStore::new(&config.storage.path)
}

pub fn contact_form_config(config: &Config) -> ContactFormServiceConfig {
    ContactFormServiceConfig {
        recipient_name: config.contact.recipient_name.clone(),
        fallback_email: config.contact.fallback_email.clone(),
        rate_limit: config.contact.rate_limit.into(),
        validation: validation_rules(config),
    }
}

pub fn validation_rules(config: &Config) -> ValidationRules {
    ValidationRules {
        message_min_len: config.contact.message_min_len,
    }
}

fn mail_relay_config(config: &Config) -> MailRelayApiServiceConfig {
    MailRelayApiServiceConfig {
        send_endpoint: config.relay.endpoint.clone().into(),
        service_id: config.relay.service_id.clone(),
        template_id: config.relay.template_id.clone(),
        public_key: config.relay.public_key.clone(),
        private_key: config.relay.private_key.clone(),
    }
}
