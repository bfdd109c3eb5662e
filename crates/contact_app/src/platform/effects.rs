use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use contact_core::{Effect, FormData, Msg, SubmissionId, SubmitOutcome};
use contact_engine::{
    ContactRequest, EngineEvent, EngineHandle, FailureKind, SubmitError, SubmitReceipt,
};
use contact_logging::{contact_debug, contact_error, contact_info};

pub struct EffectRunner {
    engine: EngineHandle,
    msg_tx: mpsc::Sender<Msg>,
    acknowledgment: Option<Duration>,
}

impl EffectRunner {
    pub fn new(
        mut engine: EngineHandle,
        msg_tx: mpsc::Sender<Msg>,
        acknowledgment: Option<Duration>,
    ) -> Self {
        match engine.take_event_receiver() {
            Some(events) => spawn_event_loop(events, msg_tx.clone()),
            None => contact_error!("Engine events already taken; submissions will not complete"),
        }
        Self {
            engine,
            msg_tx,
            acknowledgment,
        }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SendSubmission {
                    submission_id,
                    form,
                } => {
                    contact_info!(
                        "SendSubmission id={} name_len={} email_len={} message_len={}",
                        submission_id,
                        form.name.len(),
                        form.email.len(),
                        form.message.len()
                    );
                    self.engine.submit(submission_id, to_request(form));
                }
                Effect::CancelSubmission { submission_id } => {
                    contact_debug!("CancelSubmission id={}", submission_id);
                    self.engine.cancel(submission_id);
                }
                Effect::ScheduleAcknowledgmentExpiry { submission_id } => {
                    let Some(delay) = self.acknowledgment else {
                        continue;
                    };
                    let msg_tx = self.msg_tx.clone();
                    thread::spawn(move || {
                        thread::sleep(delay);
                        let _ = msg_tx.send(Msg::AcknowledgmentExpired { submission_id });
                    });
                }
            }
        }
    }
}

fn spawn_event_loop(events: mpsc::Receiver<EngineEvent>, msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        while let Ok(event) = events.recv() {
            let msg = match event {
                EngineEvent::SubmissionCompleted {
                    submission_id,
                    result,
                } => Msg::SubmissionFinished {
                    submission_id,
                    outcome: map_result(submission_id, result),
                },
            };
            if msg_tx.send(msg).is_err() {
                break;
            }
        }
    });
}

fn to_request(form: FormData) -> ContactRequest {
    ContactRequest {
        name: form.name,
        email: form.email,
        message: form.message,
    }
}

fn map_result(
    submission_id: SubmissionId,
    result: Result<SubmitReceipt, SubmitError>,
) -> SubmitOutcome {
    match result {
        Ok(receipt) => {
            contact_debug!("Submission {} delivered ({})", submission_id, receipt.status);
            SubmitOutcome::Delivered
        }
        Err(SubmitError {
            kind: FailureKind::Rejected { status, reason },
            ..
        }) => {
            contact_debug!("Submission {} declined with status {}", submission_id, status);
            SubmitOutcome::Rejected { reason }
        }
        Err(err) if err.kind == FailureKind::Cancelled => {
            contact_debug!("Submission {} cancelled", submission_id);
            SubmitOutcome::TransportFailed
        }
        Err(err) => {
            contact_error!("Submission {} failed: {}", submission_id, err);
            SubmitOutcome::TransportFailed
        }
    }
}
