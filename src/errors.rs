use std::fmt;
use std::io;

/// An error that can occur when decoding or encoding a save
#[derive(Debug)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub(crate) fn new(kind: ErrorKind) -> Error {
        Error(Box::new(kind))
    }

    /// Return the specific type of error
    pub fn kind(&self) -> &ErrorKind {
        &self.0
    }

    /// Consume the error and return the specific type of error
    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    /// Returns the byte offset that the error occurs (if available)
    pub fn offset(&self) -> Option<usize> {
        self.0.offset()
    }
}

/// Specific type of error
#[derive(Debug)]
pub enum ErrorKind {
    /// The input does not start with the save file magic
    Magic {
        /// The four bytes found where the magic should be
        found: [u8; 4],
    },

    /// Unexpected end of input
    Eof {
        /// Offset where more input was needed
        offset: usize,
    },

    /// Input continued after the declared end of the payload
    TrailingData {
        /// Number of unconsumed bytes
        count: usize,
    },

    /// A string field was not terminated by a nul byte
    UnterminatedString {
        /// Offset where the string data starts
        offset: usize,
    },

    /// A string field contained invalid utf-8
    InvalidUtf8 {
        /// Offset where the string data starts
        offset: usize,

        /// The underlying utf-8 error
        source: std::str::Utf8Error,
    },

    /// A field exceeded what its length prefix can represent
    TooLong {
        /// Name of the offending field
        field: &'static str,

        /// Actual length of the field
        len: usize,
    },

    /// An io error from the underlying reader or writer
    Io(io::Error),
}

impl ErrorKind {
    pub fn offset(&self) -> Option<usize> {
        match *self {
            ErrorKind::Eof { offset } => Some(offset),
            ErrorKind::UnterminatedString { offset } => Some(offset),
            ErrorKind::InvalidUtf8 { offset, .. } => Some(offset),
            _ => None,
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self.0 {
            ErrorKind::InvalidUtf8 { ref source, .. } => Some(source),
            ErrorKind::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self.0 {
            ErrorKind::Magic { found } => {
                write!(f, "unrecognized magic: {:02x?}, expected GVAS", found)
            }
            ErrorKind::Eof { offset } => {
                write!(f, "unexpected end of input (offset: {})", offset)
            }
            ErrorKind::TrailingData { count } => {
                write!(f, "{} bytes remain after the declared payload", count)
            }
            ErrorKind::UnterminatedString { offset } => {
                write!(f, "string field missing nul terminator (offset: {})", offset)
            }
            ErrorKind::InvalidUtf8 { offset, .. } => {
                write!(f, "string field is not valid utf-8 (offset: {})", offset)
            }
            ErrorKind::TooLong { field, len } => {
                write!(f, "{} length {} exceeds the u32 length prefix", field, len)
            }
            ErrorKind::Io(ref err) => write!(f, "io error: {}", err),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error::new(kind)
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::new(ErrorKind::Io(error))
    }
}
