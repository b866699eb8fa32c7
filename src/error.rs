use std::fmt;
use std::io;

/// An error that can occur during template compilation or rendering.
///
/// Everything this crate raises is an internal compiler error: either a tree
/// violated a serialization precondition at compile time, or the renderer met
/// bytecode it could not decode. Render errors carry the byte offset at which
/// decoding failed.
pub struct Error {
    kind: ErrorKind,
    offset: Option<usize>,
}

#[derive(Debug)]
enum ErrorKind {
    Io(io::Error),
    Msg(String),
}

impl Error {
    pub(crate) fn new(msg: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Msg(msg.into()),
            offset: None,
        }
    }

    pub(crate) fn render(msg: impl Into<String>, offset: usize) -> Self {
        Self {
            kind: ErrorKind::Msg(msg.into()),
            offset: Some(offset),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self {
            kind: ErrorKind::Io(err),
            offset: None,
        }
    }
}

#[cfg(feature = "serde")]
impl serde::ser::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: fmt::Display,
    {
        Self::new(msg.to_string())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Io(err) => Some(err),
            ErrorKind::Msg(_) => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::Io(_) => write!(f, "io error")?,
            ErrorKind::Msg(msg) => write!(f, "internal compiler error: {msg}")?,
        }
        if let Some(offset) = self.offset {
            write!(f, " (bytecode offset {offset})")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("kind", &self.kind)
            .field("offset", &self.offset)
            .finish()
    }
}
