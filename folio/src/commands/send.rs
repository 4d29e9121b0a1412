use std::io::Write;

use folio_config::Config;
use folio_core_contact_contracts::ContactFormService;
use folio_models::{contact::FormFields, theme::ThemeContext};
use tracing::info;

use super::FieldArgs;
use crate::{environment, render::Renderer};

pub async fn invoke(args: FieldArgs, config: Config, theme: ThemeContext) -> anyhow::Result<()> {
    let mut form = environment::contact_form(&config)?;
    send(
        &mut form,
        args.into(),
        &Renderer::stdout(theme),
        &mut std::io::stdout(),
    )
    .await
}

/// Fills in all fields at once and submits the form.
pub async fn send(
    form: &mut impl ContactFormService,
    fields: FormFields,
    renderer: &Renderer,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    for (field, value) in fields.iter() {
        form.update_field(field, value.clone());
    }

    let result = form.submit().await;
    renderer.write_state(out, form.state())?;

    let outcome = result?;
    info!(sent_at = %outcome.sent_at, "Contact message sent");

    Ok(())
}
