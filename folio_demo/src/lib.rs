use std::sync::LazyLock;

use chrono::{DateTime, TimeZone, Utc};
use folio_models::contact::{ContactPayload, FormFields};

pub const RECIPIENT_NAME: &str = "Folio Owner";
pub const FALLBACK_EMAIL: &str = "owner@example.com";

pub static NOW: LazyLock<DateTime<Utc>> =
    LazyLock::new(|| Utc.with_ymd_and_hms(2024, 5, 4, 13, 37, 0).unwrap());

/// `NOW` as rendered into the relay payload.
pub const NOW_DISPLAY: &str = "2024-05-04 13:37:00 UTC";

pub static JANE: LazyLock<FormFields> = LazyLock::new(|| FormFields {
    name: "Jane Doe".into(),
    email: "jane@example.com".into(),
    message: "Let's build something together".into(),
});

/// Same contact as [`JANE`], typed sloppily.
pub static JANE_UNTRIMMED: LazyLock<FormFields> = LazyLock::new(|| FormFields {
    name: "  Jane Doe ".into(),
    email: " Jane@Example.COM  ".into(),
    message: "\n Let's build something together \n".into(),
});

pub static JANE_PAYLOAD: LazyLock<ContactPayload> = LazyLock::new(|| {
    ContactPayload::from_fields(&JANE, NOW_DISPLAY.into(), RECIPIENT_NAME.into())
});

pub static JOHN: LazyLock<FormFields> = LazyLock::new(|| FormFields {
    name: "John Smith".into(),
    email: "john@example.com".into(),
    message: "Do you have time for a quick call next week?".into(),
});
