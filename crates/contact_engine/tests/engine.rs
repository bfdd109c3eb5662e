use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use contact_engine::{
    ContactRequest, EngineEvent, EngineHandle, FailureKind, SubmitError, SubmitReceipt, Submitter,
};
use pretty_assertions::assert_eq;

const WAIT: Duration = Duration::from_secs(5);

fn request() -> ContactRequest {
    ContactRequest {
        name: "Alice".to_string(),
        email: "a@x.com".to_string(),
        message: "Hi".to_string(),
    }
}

/// Accepts everything and counts calls.
#[derive(Default)]
struct CountingSubmitter {
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl Submitter for CountingSubmitter {
    async fn submit(&self, _request: &ContactRequest) -> Result<SubmitReceipt, SubmitError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(SubmitReceipt { status: 200 })
    }
}

/// Never answers, like an endpoint that hangs forever.
struct PendingSubmitter;

#[async_trait::async_trait]
impl Submitter for PendingSubmitter {
    async fn submit(&self, _request: &ContactRequest) -> Result<SubmitReceipt, SubmitError> {
        std::future::pending().await
    }
}

#[test]
fn completion_is_reported_with_submission_id() {
    let submitter = Arc::new(CountingSubmitter::default());
    let mut engine = EngineHandle::with_submitter(submitter.clone());
    let events = engine.take_event_receiver().expect("receiver");

    engine.submit(7, request());

    let event = events.recv_timeout(WAIT).expect("completion");
    assert_eq!(
        event,
        EngineEvent::SubmissionCompleted {
            submission_id: 7,
            result: Ok(SubmitReceipt { status: 200 }),
        }
    );
    assert_eq!(submitter.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn event_receiver_can_only_be_taken_once() {
    let mut engine = EngineHandle::with_submitter(Arc::new(CountingSubmitter::default()));

    assert!(engine.take_event_receiver().is_some());
    assert!(engine.take_event_receiver().is_none());
}

#[test]
fn cancel_ends_a_hanging_submission() {
    let mut engine = EngineHandle::with_submitter(Arc::new(PendingSubmitter));
    let events = engine.take_event_receiver().expect("receiver");

    engine.submit(1, request());
    assert!(events.recv_timeout(Duration::from_millis(100)).is_err());

    engine.cancel(1);

    match events.recv_timeout(WAIT).expect("cancellation event") {
        EngineEvent::SubmissionCompleted {
            submission_id,
            result: Err(err),
        } => {
            assert_eq!(submission_id, 1);
            assert_eq!(err.kind, FailureKind::Cancelled);
            assert!(err.kind.is_transport());
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn cancel_of_unknown_submission_is_harmless() {
    let submitter = Arc::new(CountingSubmitter::default());
    let mut engine = EngineHandle::with_submitter(submitter);
    let events = engine.take_event_receiver().expect("receiver");

    engine.cancel(99);
    engine.submit(2, request());

    let event = events.recv_timeout(WAIT).expect("completion");
    assert!(matches!(
        event,
        EngineEvent::SubmissionCompleted {
            submission_id: 2,
            result: Ok(_),
        }
    ));
}
