use thiserror::Error;

/// Failures that terminate an AGI invocation.
///
/// All of these exit the process with status 1; the dialplan only sees
/// that the dialogue never reached a RESOLVED/UNRESOLVED status.
#[derive(Error, Debug)]
pub enum AgiError {
    /// A required preamble argument was absent or empty.
    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),

    /// The resolver process exited non-zero (or died on a signal,
    /// reported as -1).
    #[error("resolver exited with status {0}")]
    ResolverFailed(i32),

    /// The first resolver output line carried a scheme prefix we do not
    /// know how to dial.
    #[error("unknown method for URI {0}")]
    UnknownScheme(String),

    /// I/O on the AGI channel or while spawning the resolver.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AgiError>;
