use contact_core::{ContactFormView, Field, FormData};

use super::constants::{MISSING_FIELDS_PREFIX, SUBMIT_LABEL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Heading,
    Hint,
    Field,
    Acknowledgment,
    Status,
    Notice,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenLine {
    pub style: LineStyle,
    pub text: String,
}

impl ScreenLine {
    pub fn new(style: LineStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }
}

/// Full form: fields, then feedback.
pub fn render(view: &ContactFormView) -> Vec<ScreenLine> {
    let mut lines: Vec<ScreenLine> = Field::ALL
        .into_iter()
        .map(|field| render_field(field, &view.form))
        .collect();
    let button = if view.submitting {
        format!("[{SUBMIT_LABEL}] (envoi...)")
    } else {
        format!("[{SUBMIT_LABEL}]")
    };
    lines.push(ScreenLine::new(LineStyle::Hint, button));
    lines.extend(render_feedback(view));
    lines
}

/// Acknowledgment and status lines only; empty when there is nothing to say.
pub fn render_feedback(view: &ContactFormView) -> Vec<ScreenLine> {
    let mut lines = Vec::new();
    if let Some(text) = view.acknowledgment {
        lines.push(ScreenLine::new(LineStyle::Acknowledgment, text));
    }
    if !view.status.is_empty() {
        lines.push(ScreenLine::new(LineStyle::Status, view.status.clone()));
    }
    lines
}

pub fn render_field(field: Field, form: &FormData) -> ScreenLine {
    let value = form.get(field);
    let text = if value.is_empty() {
        format!("{:<8}: <{}>", field.label(), field.placeholder())
    } else {
        format!("{:<8}: {}", field.label(), value)
    };
    ScreenLine::new(LineStyle::Field, text)
}

pub fn render_missing(fields: &[Field]) -> ScreenLine {
    let names: Vec<&str> = fields.iter().map(|field| field.label()).collect();
    ScreenLine::new(
        LineStyle::Notice,
        format!("{MISSING_FIELDS_PREFIX}{}", names.join(", ")),
    )
}
