use std::error;
use std::fmt;
use std::result;

/// Convenience `Error` enum for the collections in this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The requested key does not exist in the collection.
    KeyNotFound,
    /// The collection has no elements.
    EmptyTree,
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::KeyNotFound => write!(f, "key does not exist"),
            Error::EmptyTree => write!(f, "tree is empty"),
        }
    }
}

/// Convenience `Result` type for the collections in this crate.
pub type Result<T> = result::Result<T, Error>;
