use std::io::{BufRead, Write};

use anyhow::bail;
use folio_config::Config;
use folio_core_contact_contracts::ContactFormService;
use folio_models::{contact::FormField, theme::ThemeContext};
use tracing::info;

use crate::{
    environment,
    render::{self, Renderer},
};

pub async fn invoke(config: Config, theme: ThemeContext) -> anyhow::Result<()> {
    let mut form = environment::contact_form(&config)?;
    compose(
        &mut form,
        &mut std::io::stdin().lock(),
        &mut std::io::stdout(),
        &Renderer::stdout(theme),
    )
    .await
}

/// Asks for one field after the other and submits the form.
///
/// A field is asked for again until it is valid. The message may span
/// multiple lines and is terminated by an empty line.
pub async fn compose(
    form: &mut impl ContactFormService,
    input: &mut impl BufRead,
    out: &mut impl Write,
    renderer: &Renderer,
) -> anyhow::Result<()> {
    for field in FormField::ALL {
        loop {
            write!(out, "{}", prompt(field))?;
            out.flush()?;

            let value = read_value(field, input)?;
            form.blur_field(field, value);

            let state = form.state();
            if field == FormField::Message {
                writeln!(out, "({})", render::char_counter(state))?;
            }
            match state.visible_error(field) {
                Some(error) => writeln!(out, "{}", renderer.field_error(field, error))?,
                None => break,
            }
        }
    }

    let result = form.submit().await;
    renderer.write_state(out, form.state())?;

    let outcome = result?;
    info!(sent_at = %outcome.sent_at, "Contact message sent");

    Ok(())
}

fn prompt(field: FormField) -> &'static str {
    match field {
        FormField::Name => "Name: ",
        FormField::Email => "Email: ",
        FormField::Message => "Message (end with an empty line):\n",
    }
}

fn read_value(field: FormField, input: &mut impl BufRead) -> anyhow::Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("Input ended before the {field} was entered");
    }
    if field != FormField::Message {
        return Ok(line.trim_end_matches(['\r', '\n']).into());
    }

    let mut message = String::new();
    while !line.trim().is_empty() {
        message.push_str(&line);
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
    }
    Ok(message.trim_end_matches(['\r', '\n']).into())
}
