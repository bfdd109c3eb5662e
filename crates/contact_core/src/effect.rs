use crate::{FormData, SubmissionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST the captured form snapshot to the email endpoint.
    SendSubmission {
        submission_id: SubmissionId,
        form: FormData,
    },
    /// Abort an outstanding request; its result must no longer reach the state.
    CancelSubmission { submission_id: SubmissionId },
    /// Arrange for `Msg::AcknowledgmentExpired` to be delivered later, if configured.
    ScheduleAcknowledgmentExpiry { submission_id: SubmissionId },
}
