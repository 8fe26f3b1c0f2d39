use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised by the rendering pipeline.
///
/// `Aborted` is the cooperative cancellation signal: every surface
/// primitive raises it once the surface's flag is set, and
/// [`Renderer::render`](crate::Renderer::render) swallows it to resolve
/// the render as "superseded" rather than failed. Everything else is a
/// genuine failure and propagates.
#[derive(Debug, Error)]
pub enum Error {
    #[error("render aborted")]
    Aborted,

    #[error("there is no text command called '{0}'")]
    UnknownCommand(String),

    #[error("mismatched or unclosed tag '{0}'")]
    MismatchedTag(String),

    #[error("no font matched the family '{0}' and no fallback is loaded")]
    FontNotFound(String),

    #[error("invalid color '{0}'")]
    InvalidColor(String),

    #[error("invalid argument '{arg}' for text command '{command}'")]
    InvalidCommandArgument { command: String, arg: String },

    #[error("backend error: {0}")]
    Backend(&'static str),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error is the cancellation signal rather than a failure.
    pub fn is_aborted(&self) -> bool {
        matches!(self, Error::Aborted)
    }
}
