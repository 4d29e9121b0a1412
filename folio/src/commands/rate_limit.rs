use std::io::Write;

use clap::Subcommand;
use folio_config::Config;
use folio_core_contact_impl::ContactFormServiceImpl;
use folio_extern_contracts::relay::MailRelayApiService;
use folio_models::contact::LAST_SUBMISSION_KEY;
use folio_shared_contracts::time::TimeService;
use folio_storage_contracts::KeyValueStore;
use tracing::info;

use crate::environment;

#[derive(Debug, Subcommand)]
pub enum RateLimitCommand {
    /// Show whether a message may be sent right now
    #[command(aliases(["s"]))]
    Status,
    /// Forget the time of the last submission
    Reset,
}

impl RateLimitCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            RateLimitCommand::Status => {
                let form = environment::contact_form(&config)?;
                status(&form, &mut std::io::stdout()).await
            }
            RateLimitCommand::Reset => {
                reset(&environment::store(&config)).await?;
                println!("Rate limit has been reset");
                Ok(())
            }
        }
    }
}

pub async fn status<MailRelayApi, Store, Time>(
    form: &ContactFormServiceImpl<MailRelayApi, Store, Time>,
    out: &mut impl Write,
) -> anyhow::Result<()>
where
    MailRelayApi: MailRelayApiService,
    Store: KeyValueStore,
    Time: TimeService,
{
    match form.rate_limit_status().await {
        Some(until) => writeln!(out, "Rate limited until {until}")?,
        None => writeln!(out, "Not rate limited")?,
    }
    Ok(())
}

pub async fn reset(store: &impl KeyValueStore) -> anyhow::Result<()> {
    store.remove(LAST_SUBMISSION_KEY).await?;
    info!("Removed time of last submission");
    Ok(())
}
