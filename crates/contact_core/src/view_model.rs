use crate::FormData;

/// Immutable snapshot handed to the rendering surface.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactFormView {
    pub form: FormData,
    /// Success flag; never true while a later attempt is running or has failed.
    pub sent: bool,
    /// Status line; empty when there is nothing to report.
    pub status: String,
    pub acknowledgment: Option<&'static str>,
    pub submitting: bool,
    pub dirty: bool,
}
