//! Contact engine: outbound email-endpoint IO and effect execution.
mod engine;
mod submit;
mod types;

pub use engine::EngineHandle;
pub use submit::{
    parse_endpoint, ReqwestSubmitter, SubmitSettings, Submitter, DEFAULT_CONNECT_TIMEOUT_MS,
    DEFAULT_ENDPOINT, DEFAULT_REQUEST_TIMEOUT_MS,
};
pub use types::{
    ContactRequest, EngineEvent, FailureKind, SubmissionId, SubmitError, SubmitReceipt,
};
