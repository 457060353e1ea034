use std::io;
use std::process::ExitStatus;

use thiserror::Error;

/// Failure modes of an edit session.
///
/// An edit that leaves the text untouched is not an error; see
/// [`EditOutcome`](crate::EditOutcome).
#[derive(Debug, Error)]
pub enum HoteditError {
    /// No usable editor command could be determined.
    #[error("no usable editor: {0}")]
    Configuration(String),

    /// The editor process could not be started at all.
    #[error("failed to launch editor `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The editor ran but exited with a non-zero status.
    #[error("editor `{program}` exited with {status}")]
    Editing { program: String, status: ExitStatus },

    /// The scratch file could not be created, read back or removed.
    #[error("scratch file: {0}")]
    Scratch(#[from] io::Error),
}
