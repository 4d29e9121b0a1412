use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use folio_core_contact_contracts::{ContactFormService, SubmissionError, SubmissionOutcome};
use folio_extern_contracts::relay::MailRelayApiService;
use folio_models::{
    contact::{
        ContactFormState, ContactPayload, FormField, SubmissionStatus, LAST_SUBMISSION_KEY,
    },
    validation::{validate_field, FieldError, ValidationRules},
};
use folio_shared_contracts::time::TimeService;
use folio_storage_contracts::KeyValueStore;
use folio_utils::trace_instrument;
use tracing::{error, warn};


pub const VALIDATION_FAILED_MESSAGE: &str = "Please fix the errors before submitting.";
pub const RATE_LIMITED_MESSAGE: &str = "Please wait a minute before sending another message.";
pub const SUCCESS_MESSAGE: &str = "Message sent successfully! I'll get back to you soon.";

/// Format of the submission time in the relay payload.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

#[derive(Debug, Clone)]
pub struct ContactFormServiceImpl<MailRelayApi, Store, Time> {
    mail_relay_api: MailRelayApi,
    store: Store,
    time: Time,
    config: ContactFormServiceConfig,
    state: ContactFormState,
}

#[derive(Debug, Clone)]
pub struct ContactFormServiceConfig {
    /// Label of the person receiving the messages.
    pub recipient_name: String,
    /// Address shown to the user when the relay fails.
    pub fallback_email: String,
    /// Minimum time between two successful submissions.
    pub rate_limit: Duration,
    pub validation: ValidationRules,
}

impl ContactFormServiceConfig {
    pub fn delivery_failed_message(&self) -> String {
        format!(
            "Failed to send message. Please email me directly at {}",
            self.fallback_email
        )
    }
}

impl<MailRelayApi, Store, Time> ContactFormServiceImpl<MailRelayApi, Store, Time>
where
    MailRelayApi: MailRelayApiService,
    Store: KeyValueStore,
    Time: TimeService,
{
    pub fn new(
        mail_relay_api: MailRelayApi,
        store: Store,
        time: Time,
        config: ContactFormServiceConfig,
    ) -> Self {
        Self {
            mail_relay_api,
            store,
            time,
            config,
            state: ContactFormState::default(),
        }
    }

    pub fn config(&self) -> &ContactFormServiceConfig {
        &self.config
    }

    /// Returns when the next message may be sent, `None` if right now.
    #[trace_instrument(skip(self))]
    pub async fn rate_limit_status(&self) -> Option<DateTime<Utc>> {
        self.rate_limited_until(self.time.now()).await
    }

    fn validate(&self, field: FormField) -> Option<FieldError> {
        validate_field(field, &self.state.fields[field], &self.config.validation).err()
    }

    async fn try_submit(&mut self) -> Result<SubmissionOutcome, SubmissionError> {
        self.state.touched.touch_all();
        for field in FormField::ALL {
            self.state.errors[field] = self.validate(field);
        }
        if self.state.errors.has_errors() {
            return Err(SubmissionError::ValidationFailed);
        }

        let now = self.time.now();
        if let Some(until) = self.rate_limited_until(now).await {
            return Err(SubmissionError::RateLimited { until });
        }

        let payload = ContactPayload::from_fields(
            &self.state.fields,
            now.format(TIME_FORMAT).to_string(),
            self.config.recipient_name.clone(),
        );

        if !self.deliver(payload.clone()).await {
            return Err(SubmissionError::DeliveryFailed);
        }

        self.state.clear_form();

        let timestamp = now.timestamp_millis().to_string();
        if let Err(err) = self.store.set(LAST_SUBMISSION_KEY, &timestamp).await {
            error!("Failed to store time of last submission: {err:#}");
        }

        Ok(SubmissionOutcome {
            payload,
            sent_at: now,
        })
    }

    /// Returns the end of the current rate limit window, if any.
    ///
    /// A missing, unreadable or malformed timestamp does not limit.
    async fn rate_limited_until(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let last_submission = self
            .store
            .get::<String>(LAST_SUBMISSION_KEY)
            .await
            .unwrap_or_else(|err| {
                warn!("Failed to read time of last submission: {err:#}");
                None
            })?;

        let Some(last_submission) = last_submission
            .trim()
            .parse()
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
        else {
            warn!(%last_submission, "Ignoring malformed time of last submission");
            return None;
        };

        let until = TimeDelta::from_std(self.config.rate_limit)
            .ok()
            .and_then(|window| last_submission.checked_add_signed(window))?;
        (now < until).then_some(until)
    }

    async fn deliver(&self, payload: ContactPayload) -> bool {
        match self.mail_relay_api.send(payload).await {
            Ok(true) => true,
            Ok(false) => {
                warn!("Mail relay rejected the contact message");
                false
            }
            Err(err) => {
                error!("Failed to reach mail relay: {err:#}");
                false
            }
        }
    }

    fn status_for(&self, result: &Result<SubmissionOutcome, SubmissionError>) -> SubmissionStatus {
        match result {
            Ok(_) => SubmissionStatus::Success(SUCCESS_MESSAGE.into()),
            Err(SubmissionError::ValidationFailed) => {
                SubmissionStatus::Error(VALIDATION_FAILED_MESSAGE.into())
            }
            Err(SubmissionError::RateLimited { .. }) => {
                SubmissionStatus::Error(RATE_LIMITED_MESSAGE.into())
            }
            Err(SubmissionError::DeliveryFailed) => {
                SubmissionStatus::Error(self.config.delivery_failed_message())
            }
        }
    }
}

impl<MailRelayApi, Store, Time> ContactFormService
    for ContactFormServiceImpl<MailRelayApi, Store, Time>
where
    MailRelayApi: MailRelayApiService,
    Store: KeyValueStore,
    Time: TimeService,
{
    fn state(&self) -> &ContactFormState {
        &self.state
    }

    #[trace_instrument(skip(self))]
    fn update_field(&mut self, field: FormField, value: String) {
        self.state.fields[field] = value;
        if self.state.touched[field] {
            self.state.errors[field] = self.validate(field);
        }
    }

    #[trace_instrument(skip(self))]
    fn blur_field(&mut self, field: FormField, value: String) {
        self.state.fields[field] = value;
        self.state.touched[field] = true;
        self.state.errors[field] = self.validate(field);
    }

    #[trace_instrument(skip(self))]
    async fn submit(&mut self) -> Result<SubmissionOutcome, SubmissionError> {
        self.state.submitting = true;
        self.state.status = SubmissionStatus::Idle;

        let result = self.try_submit().await;

        self.state.status = self.status_for(&result);
        self.state.submitting = false;

        result
    }

    #[trace_instrument(skip(self))]
    fn reset(&mut self) {
        self.state = ContactFormState::default();
    }
}
