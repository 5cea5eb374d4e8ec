use thiserror::*;

/// Why a single lookup could not produce an answer.
///
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Something went wrong: {0}")]
    Unknown(String),

    #[error("Could not run {command:?}: {err}")]
    CouldNotSpawn {
        command: String,
        err: std::io::Error,
    },

    #[error("{command:?} exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("The lookup was cancelled")]
    Cancelled,

    #[error("The lookup panicked: {0}")]
    Panicked(String),
}

impl From<tokio::task::JoinError> for LookupError {
    fn from(err: tokio::task::JoinError) -> Self {
        if err.is_cancelled() {
            Self::Cancelled
        } else {
            Self::Panicked(err.to_string())
        }
    }
}

#[derive(Error, Debug)]
pub enum ResolverError {
    #[error("The resolution was cancelled before any lookup was accepted")]
    Cancelled,

    #[error("All {failures} lookups failed, the last one with: {last}")]
    AllLookupsFailed { failures: usize, last: LookupError },
}
