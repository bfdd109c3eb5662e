//! Contact form core: pure state machine and view-model helpers.
mod effect;
mod form;
mod messages;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use form::{Field, FormData, UnknownField};
pub use messages::{
    ACKNOWLEDGMENT, STATUS_REJECTED_FALLBACK, STATUS_SENDING, STATUS_SUCCESS,
    STATUS_TRANSPORT_FAILURE,
};
pub use msg::{Msg, SubmitOutcome};
pub use state::{AppState, SubmissionId, SubmissionState};
pub use update::update;
pub use view_model::ContactFormView;
