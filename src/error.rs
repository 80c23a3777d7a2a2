use std::{io, path::PathBuf, process::ExitCode, process::ExitStatus};

/// Errors that stop the run before any test executes.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("test discovery failed")]
    Discovery(#[from] DiscoveryError),

    #[error("detected circular dependency in the tests in `{origin_file}`: {}", .tests.join(", "))]
    TestCycle {
        origin_file: String,
        tests: Vec<String>,
    },

    #[error("detected circular dependency between groups: {}", .groups.join(", "))]
    GroupCycle { groups: Vec<String> },
}

impl Error {
    /// Exit code for structural failures.
    ///
    /// Kept apart from the code a [`TestReport`](crate::TestReport) uses for
    /// failing checks, so callers can tell both situations apart.
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(2)
    }
}

/// Failures of symbol table discovery.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("could not locate the running executable")]
    CurrentExe(#[source] io::Error),

    #[error("executable path `{}` is {len} bytes, at most {limit} are supported", .path.display())]
    PathTooLong {
        path: PathBuf,
        len: usize,
        limit: usize,
    },

    #[error("failed to start symbol dump tool `{tool}`")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    #[error("symbol dump tool `{tool}` exited with {status}")]
    ToolFailed { tool: String, status: ExitStatus },

    #[error("anchor symbol `{anchor}` not found in the symbol table")]
    AnchorNotFound { anchor: String },
}
