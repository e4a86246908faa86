use std::io;

/// Failures that end the interactive session
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// Standard input was closed.
    #[error("end of input")]
    EndOfInput,

    #[error("console I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;
