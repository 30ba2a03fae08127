//! Error types exposed by the adapter.

use crate::level::CapabilityLevel;
use std::error::Error;
use std::io;

/// Failure returned by capability-gated operations.
///
/// Callers are expected to check availability first; receiving this error
/// means the call was made against a level that cannot honor it.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum CompatError {
    #[error("{message}")]
    Unsupported {
        /// Stable catalog key, safe to match on.
        key: &'static str,
        message: String,
        required: CapabilityLevel,
        active: CapabilityLevel,
    },
}

impl CompatError {
    pub fn key(&self) -> &'static str {
        match self {
            CompatError::Unsupported { key, .. } => key,
        }
    }
}

/// Raised by host code when a member cannot be made accessible.
///
/// Only a Level9 adapter recognizes this condition; lower levels cannot
/// produce it and report every error as unrelated.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unable to make {member} accessible: {reason}")]
pub struct InaccessibleObjectError {
    pub member: String,
    pub reason: String,
}

impl InaccessibleObjectError {
    pub fn new(member: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            member: member.into(),
            reason: reason.into(),
        }
    }
}

/// Type classification used by the Level9 adapter.
///
/// Matches the error itself, or an `io::Error` whose custom payload is an
/// [`InaccessibleObjectError`]. Source chains are not walked.
pub(crate) fn is_inaccessible_object(err: &(dyn Error + 'static)) -> bool {
    if err.is::<InaccessibleObjectError>() {
        return true;
    }
    err.downcast_ref::<io::Error>()
        .and_then(|io_err| io_err.get_ref())
        .is_some_and(|inner| inner.is::<InaccessibleObjectError>())
}
