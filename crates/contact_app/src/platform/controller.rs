//! The contact form controller.
//!
//! Owns the form state and is the only place it is mutated: user intents and
//! engine completions are both turned into `Msg`s and applied one at a time on
//! the caller's thread. Dropping the controller cancels any in-flight request.

use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::Context;
use contact_core::{update, AppState, ContactFormView, Field, Msg, SubmissionState};
use contact_engine::EngineHandle;

use super::config::AppConfig;
use super::effects::EffectRunner;

const SETTLE_POLL: Duration = Duration::from_millis(25);

pub struct ContactFormController {
    state: AppState,
    effects: EffectRunner,
    // Held so the inbox never disconnects while the controller lives.
    _msg_tx: mpsc::Sender<Msg>,
    msg_rx: mpsc::Receiver<Msg>,
}

impl ContactFormController {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let engine = EngineHandle::new(config.submit_settings())
            .with_context(|| format!("cannot submit to endpoint `{}`", config.endpoint))?;
        Ok(Self::with_engine(engine, config.acknowledgment_duration()))
    }

    pub fn with_engine(engine: EngineHandle, acknowledgment: Option<Duration>) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        let effects = EffectRunner::new(engine, msg_tx.clone(), acknowledgment);
        Self {
            state: AppState::new(),
            effects,
            _msg_tx: msg_tx,
            msg_rx,
        }
    }

    pub fn view(&self) -> ContactFormView {
        self.state.view()
    }

    pub fn submission(&self) -> &SubmissionState {
        self.state.submission()
    }

    pub fn is_submitting(&self) -> bool {
        self.state.is_submitting()
    }

    /// Returns whether the view changed.
    pub fn edit_field(&mut self, field: Field, value: impl Into<String>) -> bool {
        self.dispatch(Msg::FieldEdited {
            field,
            value: value.into(),
        })
    }

    /// Returns `false` when the intent was ignored because a send is already in flight.
    pub fn submit(&mut self) -> bool {
        self.dispatch(Msg::SubmitClicked)
    }

    pub fn close(&mut self) -> bool {
        self.dispatch(Msg::ViewClosed)
    }

    /// Waits up to `wait` for engine/timer messages, applies everything queued,
    /// and returns the new view if anything changed.
    pub fn pump(&mut self, wait: Duration) -> Option<ContactFormView> {
        let Ok(first) = self.msg_rx.recv_timeout(wait) else {
            return None;
        };
        let mut changed = self.dispatch(first);
        while let Ok(msg) = self.msg_rx.try_recv() {
            changed |= self.dispatch(msg);
        }
        changed.then(|| self.view())
    }

    /// Blocks until no submission is in flight or `limit` elapses.
    pub fn wait_until_settled(&mut self, limit: Option<Duration>) -> ContactFormView {
        let deadline = limit.map(|limit| Instant::now() + limit);
        while self.state.is_submitting() {
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                break;
            }
            self.pump(SETTLE_POLL);
        }
        self.view()
    }

    fn dispatch(&mut self, msg: Msg) -> bool {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.effects.enqueue(effects);
        was_dirty
    }
}

impl Drop for ContactFormController {
    fn drop(&mut self) {
        self.close();
    }
}
