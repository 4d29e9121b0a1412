use std::io::{self, IsTerminal, Write};

use folio_models::{
    contact::{ContactFormState, FormField},
    theme::{FeedbackStyle, FeedbackTone, ThemeContext},
    validation::{FieldError, MESSAGE_MAX_LEN},
};

const RESET: &str = "\x1b[0m";

fn color(style: FeedbackStyle) -> &'static str {
    match (style.tone, style.dark_mode) {
        (FeedbackTone::Success, false) => "\x1b[32m",
        (FeedbackTone::Success, true) => "\x1b[92m",
        (FeedbackTone::Error, false) => "\x1b[31m",
        (FeedbackTone::Error, true) => "\x1b[91m",
    }
}

/// Formats user feedback in the colors of a [`ThemeContext`].
///
/// Without `ansi` all text is written plain.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    theme: ThemeContext,
    ansi: bool,
}

impl Renderer {
    pub fn new(theme: ThemeContext, ansi: bool) -> Self {
        Self { theme, ansi }
    }

    /// Colors output only if stdout is a terminal.
    pub fn stdout(theme: ThemeContext) -> Self {
        Self::new(theme, io::stdout().is_terminal())
    }

    pub fn theme(&self) -> &ThemeContext {
        &self.theme
    }

    pub fn paint(&self, text: &str, style: FeedbackStyle) -> String {
        if self.ansi {
            format!("{}{text}{RESET}", color(style))
        } else {
            text.into()
        }
    }

    pub fn success(&self, text: &str) -> String {
        self.paint(text, FeedbackStyle::new(FeedbackTone::Success, &self.theme))
    }

    pub fn field_error(&self, field: FormField, error: &FieldError) -> String {
        self.paint(
            &format!("{field}: {error}"),
            FeedbackStyle::field_error(&self.theme),
        )
    }

    /// Writes the visible field errors followed by the submission status.
    pub fn write_state(&self, out: &mut impl Write, state: &ContactFormState) -> io::Result<()> {
        for field in FormField::ALL {
            if let Some(error) = state.visible_error(field) {
                writeln!(out, "{}", self.field_error(field, error))?;
            }
        }

        if let Some(style) = state.status().feedback_style(&self.theme) {
            writeln!(out, "{}", self.paint(state.status().message(), style))?;
        }

        Ok(())
    }
}

pub fn char_counter(state: &ContactFormState) -> String {
    format!("{}/{MESSAGE_MAX_LEN}", state.message_char_count())
}
