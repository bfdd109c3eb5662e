use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use contact_logging::{contact_debug, contact_error};
use tokio_util::sync::CancellationToken;

use crate::submit::{ReqwestSubmitter, SubmitSettings, Submitter};
use crate::{ContactRequest, EngineEvent, FailureKind, SubmissionId, SubmitError};

enum EngineCommand {
    Submit {
        submission_id: SubmissionId,
        request: ContactRequest,
    },
    Cancel {
        submission_id: SubmissionId,
    },
}

type ActiveSubmissions = Arc<Mutex<HashMap<SubmissionId, CancellationToken>>>;

/// Runs submissions on a background tokio runtime and reports completions over a channel.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Option<mpsc::Receiver<EngineEvent>>,
}

impl EngineHandle {
    pub fn new(settings: SubmitSettings) -> Result<Self, SubmitError> {
        let submitter = ReqwestSubmitter::new(settings)?;
        Ok(Self::with_submitter(Arc::new(submitter)))
    }

    pub fn with_submitter(submitter: Arc<dyn Submitter>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || run_engine(submitter, cmd_rx, event_tx));

        Self {
            cmd_tx,
            event_rx: Some(event_rx),
        }
    }

    /// Takes the completion stream. Only the first call returns `Some`.
    pub fn take_event_receiver(&mut self) -> Option<mpsc::Receiver<EngineEvent>> {
        self.event_rx.take()
    }

    pub fn submit(&self, submission_id: SubmissionId, request: ContactRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Submit {
            submission_id,
            request,
        });
    }

    /// Cancels an outstanding submission; it then completes with `FailureKind::Cancelled`.
    pub fn cancel(&self, submission_id: SubmissionId) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { submission_id });
    }
}

fn run_engine(
    submitter: Arc<dyn Submitter>,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            contact_error!("Failed to start engine runtime: {}", err);
            fail_all(cmd_rx, event_tx, &err.to_string());
            return;
        }
    };
    let active: ActiveSubmissions = Arc::new(Mutex::new(HashMap::new()));

    while let Ok(command) = cmd_rx.recv() {
        match command {
            EngineCommand::Submit {
                submission_id,
                request,
            } => {
                let token = CancellationToken::new();
                if let Ok(mut map) = active.lock() {
                    map.insert(submission_id, token.clone());
                }
                let submitter = submitter.clone();
                let event_tx = event_tx.clone();
                let active = active.clone();
                runtime.spawn(async move {
                    let result = tokio::select! {
                        biased;
                        _ = token.cancelled() => Err(SubmitError::new(
                            FailureKind::Cancelled,
                            "submission cancelled",
                        )),
                        result = submitter.submit(&request) => result,
                    };
                    if let Ok(mut map) = active.lock() {
                        map.remove(&submission_id);
                    }
                    let _ = event_tx.send(EngineEvent::SubmissionCompleted {
                        submission_id,
                        result,
                    });
                });
            }
            EngineCommand::Cancel { submission_id } => {
                let token = active
                    .lock()
                    .ok()
                    .and_then(|mut map| map.remove(&submission_id));
                match token {
                    Some(token) => token.cancel(),
                    None => contact_debug!(
                        "Cancel for submission {} ignored: not in flight",
                        submission_id
                    ),
                }
            }
        }
    }
}

/// Without a runtime every submission fails as a transport error so callers never hang.
fn fail_all(
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
    reason: &str,
) {
    while let Ok(command) = cmd_rx.recv() {
        if let EngineCommand::Submit { submission_id, .. } = command {
            let _ = event_tx.send(EngineEvent::SubmissionCompleted {
                submission_id,
                result: Err(SubmitError::new(
                    FailureKind::Network,
                    format!("engine runtime unavailable: {reason}"),
                )),
            });
        }
    }
}
