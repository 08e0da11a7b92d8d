//! Error types that can be emitted from this library
//!

use std::io::{self, SeekFrom};

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent warpper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] io::Error),

    /// The source had no bytes left where a chunk header was expected
    #[error("end of stream reached, no chunk header left")]
    EndOfStream,

    /// The source ended part way through a chunk header
    #[error("truncated chunk header, read {read} of 8 bytes")]
    #[diagnostic(help("the file is probably cut short or the declared size of a parent chunk is wrong"))]
    ShortHeader {
        /// Number of header bytes that were available
        read: usize,
    },

    /// A seek would have left the bounds of the chunk
    #[error("invalid seek offset {pos:?} in chunk of size {size}, position stays at {position}")]
    InvalidSeekOffset {
        /// The requested seek
        pos: SeekFrom,
        /// Chunk relative position, unchanged by the failed seek
        position: u64,
        /// Declared size of the chunk
        size: u32,
    },
}

impl Error {
    /// Recover a library error that travelled through an [`io::Error`].
    ///
    /// [`std::io::Seek`] can only report [`io::Error`]s, so an out of bounds seek on a
    /// [`crate::Chunk`] arrives as an [`io::ErrorKind::InvalidInput`] error carrying an
    /// [`Error::InvalidSeekOffset`]. Any other error is wrapped in [`Error::IOError`].
    pub fn from_io(err: io::Error) -> Self {
        match err.downcast::<Error>() {
            Ok(err) => err,
            Err(err) => Error::IOError(err),
        }
    }

    /// Whether this is the clean end of a sequence of chunks
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, Error::EndOfStream)
    }
}

impl From<Error> for io::Error {
    fn from(value: Error) -> Self {
        match value {
            Error::IOError(err) => err,
            Error::EndOfStream | Error::ShortHeader { .. } => {
                io::Error::new(io::ErrorKind::UnexpectedEof, value)
            }
            Error::InvalidSeekOffset { .. } => io::Error::new(io::ErrorKind::InvalidInput, value),
        }
    }
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
