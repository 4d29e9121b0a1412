use std::future::Future;

use chrono::{DateTime, Utc};
use folio_models::contact::{ContactFormState, ContactPayload, FormField};
use thiserror::Error;

/// The contact form: field state, validation and submission.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFormService: Send + Sync + 'static {
    /// Returns the current state of the form.
    fn state(&self) -> &ContactFormState;

    /// Stores the value of `field` as the user types.
    ///
    /// The field is revalidated only if it has been touched before.
    fn update_field(&mut self, field: FormField, value: String);

    /// Stores the value of `field`, marks it as touched and validates it.
    fn blur_field(&mut self, field: FormField, value: String);

    /// Validates the whole form and hands the message to the mail relay.
    ///
    /// The outcome is also reflected in the submission status of
    /// [`state`](Self::state). On success the form is cleared, otherwise the
    /// entered values are kept.
    fn submit(
        &mut self,
    ) -> impl Future<Output = Result<SubmissionOutcome, SubmissionError>> + Send;

    /// Clears fields, errors, touched state and submission status.
    fn reset(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub payload: ContactPayload,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("The form contains invalid fields.")]
    ValidationFailed,
    #[error("Another message was sent recently, retry after {until}.")]
    RateLimited { until: DateTime<Utc> },
    #[error("Failed to deliver message.")]
    DeliveryFailed,
}

#[cfg(feature = "mock")]
impl MockContactFormService {
    pub fn with_state(mut self, state: ContactFormState) -> Self {
        self.expect_state().return_const(state);
        self
    }

    pub fn with_update_field(mut self, field: FormField, value: String) -> Self {
        self.expect_update_field()
            .once()
            .with(
                mockall::predicate::eq(field),
                mockall::predicate::eq(value),
            )
            .return_const(());
        self
    }

    pub fn with_blur_field(mut self, field: FormField, value: String) -> Self {
        self.expect_blur_field()
            .once()
            .with(
                mockall::predicate::eq(field),
                mockall::predicate::eq(value),
            )
            .return_const(());
        self
    }

    pub fn with_submit(mut self, result: Result<SubmissionOutcome, SubmissionError>) -> Self {
        self.expect_submit()
            .once()
            .return_once(move || Box::pin(std::future::ready(result)));
        self
    }
}
