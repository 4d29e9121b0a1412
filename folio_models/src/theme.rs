use crate::contact::SubmissionStatus;

/// Light/dark mode flag shared by everything that renders feedback.
///
/// Passed explicitly to whatever needs it. It only selects a visual variant
/// and never changes behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeContext {
    dark_mode: bool,
}

impl ThemeContext {
    pub fn new(dark_mode: bool) -> Self {
        Self { dark_mode }
    }

    pub fn is_dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn toggle(&mut self) {
        self.dark_mode = !self.dark_mode;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackTone {
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackStyle {
    pub tone: FeedbackTone,
    pub dark_mode: bool,
}

impl FeedbackStyle {
    pub fn new(tone: FeedbackTone, theme: &ThemeContext) -> Self {
        Self {
            tone,
            dark_mode: theme.is_dark_mode(),
        }
    }

    /// Style of an inline field error.
    pub fn field_error(theme: &ThemeContext) -> Self {
        Self::new(FeedbackTone::Error, theme)
    }
}

impl SubmissionStatus {
    /// Returns the style used to render this status, `None` while idle.
    pub fn feedback_style(&self, theme: &ThemeContext) -> Option<FeedbackStyle> {
        let tone = match self {
            Self::Idle => return None,
            Self::Success(_) => FeedbackTone::Success,
            Self::Error(_) => FeedbackTone::Error,
        };
        Some(FeedbackStyle::new(tone, theme))
    }
}
