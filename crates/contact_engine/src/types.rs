use std::fmt;

use serde::Serialize;
use thiserror::Error;

pub type SubmissionId = u64;

/// JSON body posted to the endpoint: `{"name": .., "email": .., "message": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub status: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    SubmissionCompleted {
        submission_id: SubmissionId,
        result: Result<SubmitReceipt, SubmitError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct SubmitError {
    pub kind: FailureKind,
    pub message: String,
}

impl SubmitError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The endpoint answered with a non-2xx status.
    Rejected { status: u16, reason: Option<String> },
    InvalidEndpoint,
    /// The endpoint answered but its body was not JSON.
    MalformedBody { status: u16 },
    Timeout,
    Network,
    Cancelled,
}

impl FailureKind {
    /// True when no interpretable answer was obtained from the endpoint.
    pub fn is_transport(&self) -> bool {
        !matches!(self, FailureKind::Rejected { .. })
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Rejected { status, .. } => write!(f, "rejected with http status {status}"),
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::MalformedBody { status } => {
                write!(f, "malformed response body (http status {status})")
            }
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Cancelled => write!(f, "cancelled"),
        }
    }
}
