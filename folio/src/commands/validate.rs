use std::io::Write;

use anyhow::ensure;
use folio_config::Config;
use folio_models::{
    contact::FormFields,
    theme::ThemeContext,
    validation::{validate_field, ValidationRules},
};

use super::FieldArgs;
use crate::{environment, render::Renderer};

pub fn invoke(args: FieldArgs, config: Config, theme: ThemeContext) -> anyhow::Result<()> {
    validate(
        &args.into(),
        &environment::validation_rules(&config),
        &Renderer::stdout(theme),
        &mut std::io::stdout(),
    )
}

/// Checks all fields without contacting the relay.
pub fn validate(
    fields: &FormFields,
    rules: &ValidationRules,
    renderer: &Renderer,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut valid = true;
    for (field, value) in fields.iter() {
        match validate_field(field, value, rules) {
            Ok(()) => writeln!(out, "{}", renderer.success(&format!("{field}: ok")))?,
            Err(error) => {
                valid = false;
                writeln!(out, "{}", renderer.field_error(field, &error))?;
            }
        }
    }

    ensure!(valid, "The form contains invalid fields");

    Ok(())
}

#[cfg(test)]
mod tests {
    use folio_demo::JANE;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn valid() {
        let mut out = Vec::new();

        validate(
            &JANE,
            &ValidationRules::default(),
            &Renderer::new(ThemeContext::default(), true),
            &mut out,
        )
        .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\x1b[32mname: ok\x1b[0m\n\x1b[32memail: ok\x1b[0m\n\x1b[32mmessage: ok\x1b[0m\n"
        );
    }

    #[test]
    fn invalid() {
        let fields = FormFields {
            message: "Claim your prize now, you are a winner!".into(),
            ..JANE.clone()
        };
        let mut out = Vec::new();

        let result = validate(
            &fields,
            &ValidationRules::default(),
            &Renderer::new(ThemeContext::new(true), true),
            &mut out,
        );

        assert!(result.is_err());
        assert!(String::from_utf8(out)
            .unwrap()
            .ends_with("\x1b[91mmessage: Message contains suspicious content\x1b[0m\n"));
    }

    #[test]
    fn custom_min_len() {
        let fields = FormFields {
            message: "Hey".into(),
            ..JANE.clone()
        };

        let result = validate(
            &fields,
            &ValidationRules { message_min_len: 10 },
            &Renderer::new(ThemeContext::default(), true),
            &mut std::io::sink(),
        );

        assert!(result.is_err());
    }
}
