use crate::{AppState, Effect, Msg, SubmitOutcome};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FieldEdited { field, value } => {
            // The in-flight request (if any) already owns its snapshot.
            state.set_field(field, value);
            Vec::new()
        }
        Msg::SubmitClicked => {
            if state.is_submitting() {
                return (state, Vec::new());
            }
            let (submission_id, form) = state.begin_submission();
            vec![Effect::SendSubmission {
                submission_id,
                form,
            }]
        }
        Msg::SubmissionFinished {
            submission_id,
            outcome,
        } => {
            if !state.is_current(submission_id) {
                return (state, Vec::new());
            }
            let delivered = outcome == SubmitOutcome::Delivered;
            state.finish_submission(outcome);
            if delivered {
                vec![Effect::ScheduleAcknowledgmentExpiry { submission_id }]
            } else {
                Vec::new()
            }
        }
        Msg::AcknowledgmentExpired { submission_id } => {
            state.expire_acknowledgment(submission_id);
            Vec::new()
        }
        Msg::ViewClosed => match state.abandon_submission() {
            Some(submission_id) => vec![Effect::CancelSubmission { submission_id }],
            None => Vec::new(),
        },
    };

    (state, effects)
}
