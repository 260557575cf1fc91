//! Errors and warnings raised while loading, tokenizing and counting text
use std::io;
use std::result;
use std::error;
use std::fmt;
use regex;

/// Type alias for tidytext errors
pub type Result<X> = result::Result<X, Error>;

/// Wrapper for many kinds of errors occuring as part of a text mining run
#[derive(Debug)]
pub enum Error {
    /// Unsupported tokenization unit, bad n-gram width and the like
    Configuration(String),
    /// A work could not be retrieved from an archive. Never retried.
    DataRetrieval { id: u32, reason: String },
    IOError(io::Error),
    RegexError(regex::Error),
    Other(String),
}

impl Error {
    pub fn configuration<S: Into<String>>(info: S) -> Self {
        Error::Configuration(info.into())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Configuration(ref info) => write!(f, "Configuration error: {}", info),
            Error::DataRetrieval { id, ref reason } => {
                write!(f, "Could not retrieve work #{}: {}", id, reason)
            }
            Error::IOError(ref err) => write!(f, "IO error: {}", err),
            Error::RegexError(ref err) => write!(f, "Invalid pattern: {}", err),
            Error::Other(ref info) => write!(f, "{}", info),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::IOError(ref err) => Some(err),
            Error::RegexError(ref err) => Some(err),
            Error::Configuration(_)
            | Error::DataRetrieval { .. }
            | Error::Other(_) => None,
        }
    }
}

//
// Convert everything else into Error
//
impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::IOError(err)
    }
}
impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::RegexError(err)
    }
}

//
// Convert Error into a general io Error
//
impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::IOError(inner) => inner,
            other => io::Error::new(io::ErrorKind::Other, other),
        }
    }
}

/// Something odd about the input that does not stop the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// There were no documents at all, so every table is empty
    EmptyInput,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Warning::EmptyInput => write!(f, "No documents were given; all tables are empty"),
        }
    }
}
