//! Exit codes for factcheckctl

use factcheck_common::{CheckError, CheckSession};

/// Exit code for success
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for general errors
pub const EXIT_GENERAL_ERROR: i32 = 1;

/// Exit code when the endpoint could not be reached or answered non-2xx
pub const EXIT_TRANSPORT: i32 = 2;

/// Exit code for empty or whitespace-only input
pub const EXIT_VALIDATION: i32 = 64;

/// Exit code when the selected model has no implementation
pub const EXIT_UNSUPPORTED_MODEL: i32 = 69;

/// Exit code for configuration problems (missing token, bad config file)
pub const EXIT_CONFIG: i32 = 78;

pub fn for_error(err: &CheckError) -> i32 {
    match err {
        CheckError::EmptyInput => EXIT_VALIDATION,
        CheckError::UnsupportedModel { .. } => EXIT_UNSUPPORTED_MODEL,
        CheckError::Transport(_) => EXIT_TRANSPORT,
        CheckError::Config(_) => EXIT_CONFIG,
        CheckError::CheckInFlight => EXIT_GENERAL_ERROR,
    }
}

pub fn for_session(session: &CheckSession) -> i32 {
    match session {
        CheckSession::Completed { .. } => EXIT_SUCCESS,
        CheckSession::NotImplemented { .. } => EXIT_UNSUPPORTED_MODEL,
        CheckSession::Invalid { .. } => EXIT_VALIDATION,
        CheckSession::Failed { .. } => EXIT_TRANSPORT,
        CheckSession::Idle | CheckSession::InFlight { .. } => EXIT_GENERAL_ERROR,
    }
}
