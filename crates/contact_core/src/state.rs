use crate::messages::{
    ACKNOWLEDGMENT, STATUS_REJECTED_FALLBACK, STATUS_SENDING, STATUS_SUCCESS,
    STATUS_TRANSPORT_FAILURE,
};
use crate::view_model::ContactFormView;
use crate::{Field, FormData, SubmitOutcome};

pub type SubmissionId = u64;

/// Where the current (or most recent) submit cycle stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    form: FormData,
    submission: SubmissionState,
    in_flight: Option<SubmissionId>,
    last_submission_id: SubmissionId,
    acknowledgment_visible: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> ContactFormView {
        ContactFormView {
            form: self.form.clone(),
            sent: self.sent(),
            status: self.status().to_string(),
            acknowledgment: self.sent().then_some(ACKNOWLEDGMENT),
            submitting: self.is_submitting(),
            dirty: self.dirty,
        }
    }

    pub fn form(&self) -> &FormData {
        &self.form
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    pub fn in_flight(&self) -> Option<SubmissionId> {
        self.in_flight
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Returns whether the state changed since the last call, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn sent(&self) -> bool {
        self.submission == SubmissionState::Succeeded && self.acknowledgment_visible
    }

    fn status(&self) -> &str {
        match &self.submission {
            SubmissionState::Idle => "",
            SubmissionState::Submitting => STATUS_SENDING,
            SubmissionState::Succeeded => STATUS_SUCCESS,
            SubmissionState::Failed(reason) => reason,
        }
    }

    pub(crate) fn set_field(&mut self, field: Field, value: String) {
        self.form.set(field, value);
        self.dirty = true;
    }

    /// Enters `Submitting` and hands out the id and data snapshot for the request.
    pub(crate) fn begin_submission(&mut self) -> (SubmissionId, FormData) {
        self.last_submission_id += 1;
        let submission_id = self.last_submission_id;
        self.in_flight = Some(submission_id);
        self.submission = SubmissionState::Submitting;
        self.acknowledgment_visible = false;
        self.dirty = true;
        (submission_id, self.form.clone())
    }

    pub(crate) fn is_current(&self, submission_id: SubmissionId) -> bool {
        self.in_flight == Some(submission_id)
    }

    pub(crate) fn finish_submission(&mut self, outcome: SubmitOutcome) {
        self.in_flight = None;
        self.submission = match outcome {
            SubmitOutcome::Delivered => {
                self.form.clear();
                self.acknowledgment_visible = true;
                SubmissionState::Succeeded
            }
            SubmitOutcome::Rejected { reason } => {
                let reason = reason
                    .filter(|text| !text.trim().is_empty())
                    .unwrap_or_else(|| STATUS_REJECTED_FALLBACK.to_string());
                SubmissionState::Failed(reason)
            }
            SubmitOutcome::TransportFailed => {
                SubmissionState::Failed(STATUS_TRANSPORT_FAILURE.to_string())
            }
        };
        self.dirty = true;
    }

    pub(crate) fn expire_acknowledgment(&mut self, submission_id: SubmissionId) {
        let applies = submission_id == self.last_submission_id
            && self.submission == SubmissionState::Succeeded
            && self.acknowledgment_visible;
        if applies {
            self.acknowledgment_visible = false;
            self.dirty = true;
        }
    }

    /// Drops the in-flight request, if any, returning its id so it can be cancelled.
    pub(crate) fn abandon_submission(&mut self) -> Option<SubmissionId> {
        let submission_id = self.in_flight.take()?;
        self.submission = SubmissionState::Idle;
        self.dirty = true;
        Some(submission_id)
    }
}
