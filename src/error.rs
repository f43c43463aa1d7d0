use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError
{
    #[error("Failed to initialize terminal: {0}")]
    TerminalInit(#[source] io::Error),
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("Unexpected argument '{0}'")]
    UnexpectedArgument(String),
}
