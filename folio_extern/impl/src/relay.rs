use std::sync::Arc;

use folio_extern_contracts::relay::MailRelayApiService;
use folio_models::contact::ContactPayload;
use folio_utils::trace_instrument;
use serde::Serialize;
use tracing::warn;
use url::Url;

use crate::http::HttpClient;

/// Body the relay answers with when it accepted a message.
const ACCEPTED_RESPONSE: &str = "OK";

/// Client for an EmailJS compatible mail relay.
#[derive(Debug, Clone)]
pub struct MailRelayApiServiceImpl {
    config: MailRelayApiServiceConfig,
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct MailRelayApiServiceConfig {
    pub send_endpoint: Arc<Url>,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub private_key: Option<String>,
}

impl MailRelayApiServiceImpl {
    pub fn new(config: MailRelayApiServiceConfig, client: HttpClient) -> Self {
        Self { config, client }
    }
}

impl MailRelayApiService for MailRelayApiServiceImpl {
    #[trace_instrument(skip(self))]
    async fn send(&self, payload: ContactPayload) -> anyhow::Result<bool> {
        let response = self
            .client
            .post((*self.config.send_endpoint).clone())
            .json(&SendRequest {
                service_id: &self.config.service_id,
                template_id: &self.config.template_id,
                user_id: &self.config.public_key,
                access_token: self.config.private_key.as_deref(),
                template_params: &payload,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        let accepted = status.is_success() && body.trim() == ACCEPTED_RESPONSE;
        if !accepted {
            warn!(%status, %body, "Mail relay did not accept the message");
        }

        Ok(accepted)
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
    template_params: &'a ContactPayload,
}
