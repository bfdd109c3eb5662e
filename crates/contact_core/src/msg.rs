use crate::{Field, SubmissionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited one of the three form fields.
    FieldEdited { field: Field, value: String },
    /// User submitted the form.
    SubmitClicked,
    /// Engine finished (or gave up on) a submission.
    SubmissionFinished {
        submission_id: SubmissionId,
        outcome: SubmitOutcome,
    },
    /// The success acknowledgment display period elapsed.
    AcknowledgmentExpired { submission_id: SubmissionId },
    /// The view went away; anything in flight is abandoned.
    ViewClosed,
}

/// How a submission ended, as far as the form is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 2xx from the endpoint.
    Delivered,
    /// The endpoint answered but declined; `reason` comes from its `message` field.
    Rejected { reason: Option<String> },
    /// No interpretable response: network failure, timeout, unreadable body.
    TransportFailed,
}
