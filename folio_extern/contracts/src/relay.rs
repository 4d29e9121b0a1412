use std::future::Future;

use folio_models::contact::ContactPayload;

/// Third-party transactional email API that delivers contact messages.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait MailRelayApiService: Send + Sync + 'static {
    /// Hands `payload` to the relay.
    ///
    /// Returns `Ok(false)` if the relay answered but did not accept the
    /// message, and an error if it could not be reached.
    fn send(&self, payload: ContactPayload) -> impl Future<Output = anyhow::Result<bool>> + Send;
}

#[cfg(feature = "mock")]
impl MockMailRelayApiService {
    pub fn with_send(mut self, payload: ContactPayload, result: bool) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(payload))
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_send_error(mut self, payload: ContactPayload) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(payload))
            .return_once(|_| {
                Box::pin(std::future::ready(Err(anyhow::anyhow!(
                    "connection refused"
                ))))
            });
        self
    }
}
