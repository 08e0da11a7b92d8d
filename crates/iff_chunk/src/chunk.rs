//! Types for reading a single chunk
//!

use byteorder::{BigEndian, ByteOrder};
use std::{
    fmt::{self, Debug, Display},
    io::{self, Read, Seek, SeekFrom},
};
use tracing::{debug, instrument};

use crate::error::{Error, Result};

/// Length of a chunk header, the tag followed by the size
pub const HEADER_LEN: usize = 8;

/// The 4 byte identifier at the start of every chunk
///
/// The bytes are kept exactly as they were read. Nothing requires them to be
/// printable, so [`Display`] escapes anything outside of printable ASCII.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Tag(pub [u8; 4]);

impl Tag {
    /// Get the raw bytes of the tag
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl From<[u8; 4]> for Tag {
    fn from(value: [u8; 4]) -> Self {
        Tag(value)
    }
}

impl PartialEq<[u8; 4]> for Tag {
    fn eq(&self, other: &[u8; 4]) -> bool {
        self.0 == *other
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in &self.0 {
            if byte.is_ascii_graphic() || byte == b' ' {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "\\x{byte:02x}")?;
            }
        }
        Ok(())
    }
}

impl Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag(\"{self}\")")
    }
}

/// A bounded view over one chunk of an IFF style stream
///
/// A chunk starts with a [`Tag`] and a big-endian `u32` size, followed by that many
/// bytes of payload and a single pad byte when the size is odd. Reads and seeks on a
/// [`Chunk`] are relative to the start of the payload and never leave it.
///
/// [`Chunk`] implements [`Read`] and [`Seek`] itself, so a chunk can be the source of
/// another chunk. Every level of nesting checks its own bounds.
///
/// ```no_run
/// use std::io::prelude::*;
///
/// fn list_chunks(mut reader: impl Read + Seek) -> iff_chunk::error::Result<()> {
///     loop {
///         let mut chunk = match iff_chunk::Chunk::new(&mut reader) {
///             Ok(chunk) => chunk,
///             Err(e) if e.is_end_of_stream() => return Ok(()),
///             Err(e) => return Err(e),
///         };
///
///         println!("{}: {} bytes", chunk.tag(), chunk.size());
///         chunk.skip()?;
///     }
/// }
/// ```
pub struct Chunk<R> {
    reader: R,
    tag: Tag,
    size: u32,
    base: u64,
    offset: u32,
}

impl<R> Debug for Chunk<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Chunk")
            .field("tag", &self.tag)
            .field("size", &self.size)
            .field("base", &self.base)
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}

/// Methods for retrieving information on a chunk
impl<R> Chunk<R> {
    /// Get the tag of the chunk
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Get the size of the payload as declared in the header
    ///
    /// The size is not checked against the length of the source.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Get the size of the payload including the pad byte of odd sized chunks
    pub fn padded_size(&self) -> u64 {
        u64::from(self.size) + u64::from(self.size & 1)
    }

    /// Get the position of the payload in the coordinates of the source
    pub fn base(&self) -> u64 {
        self.base
    }

    /// Get the current position relative to the start of the payload
    pub fn position(&self) -> u64 {
        u64::from(self.offset)
    }

    /// Number of payload bytes left before the end of the chunk
    pub fn remaining(&self) -> u32 {
        self.size - self.offset
    }

    /// A chunk is never attached to a terminal
    pub fn is_terminal(&self) -> bool {
        false
    }

    /// Unwrap and return the inner reader object
    ///
    /// The reader is left wherever the last operation on the chunk put it.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Position in the source right after this chunk and its pad byte
    fn end(&self) -> u64 {
        self.base + self.padded_size()
    }
}

impl<R: Read + Seek> Chunk<R> {
    /// Read a chunk header from the current position of `reader`.
    ///
    /// `reader` is left at the start of the payload. Fails with [`Error::EndOfStream`]
    /// when no header bytes are left at all and [`Error::ShortHeader`] when only some
    /// of them are.
    #[instrument(skip(reader), err(level = "debug"))]
    pub fn new(mut reader: R) -> Result<Chunk<R>> {
        let header = read_header(&mut reader)?;
        let base = reader.stream_position()?;

        Ok(Chunk {
            reader,
            tag: Tag([header[0], header[1], header[2], header[3]]),
            size: BigEndian::read_u32(&header[4..]),
            base,
            offset: 0,
        })
    }

    /// Skip to the end of the chunk.
    ///
    /// The source is moved past the payload and the pad byte so that it points at the
    /// header of the next chunk. All further reads return 0 bytes.
    ///
    /// When the source refuses to move past the pad byte, as a parent chunk does when
    /// the pad byte is outside of it, the source is left right after the payload. When
    /// the source cannot be moved at all, the position of the chunk is left as it was.
    #[instrument(skip(self), fields(tag = %self.tag, size = self.size), err(level = "debug"))]
    pub fn skip(&mut self) -> Result<()> {
        match self.reader.seek(SeekFrom::Start(self.end())) {
            Ok(_) => {}
            Err(e) if self.size & 1 == 1 => {
                debug!("unable to skip pad byte after {}: {e}", self.tag);
                self.reader
                    .seek(SeekFrom::Start(self.base + u64::from(self.size)))?;
            }
            Err(e) => return Err(e.into()),
        }
        self.offset = self.size;
        Ok(())
    }
}

fn read_header<R: Read>(reader: &mut R) -> Result<[u8; HEADER_LEN]> {
    let mut header = [0u8; HEADER_LEN];
    let mut read = 0;
    while read < HEADER_LEN {
        match reader.read(&mut header[read..]) {
            Ok(0) => break,
            Ok(n) => read += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }

    match read {
        0 => Err(Error::EndOfStream),
        HEADER_LEN => Ok(header),
        read => Err(Error::ShortHeader { read }),
    }
}

impl<R: Read + Seek> Read for Chunk<R> {
    #[instrument(skip_all, fields(tag = %self.tag, offset = self.offset), err(level = "debug"))]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = self.remaining();
        if remaining == 0 {
            return Ok(0);
        }

        let len = buf.len().min(usize::try_from(remaining).unwrap_or(usize::MAX));
        self.reader
            .seek(SeekFrom::Start(self.base + self.position()))?;
        let read = self.reader.read(&mut buf[..len])?;
        // `read` is at most `remaining`, which is a u32
        self.offset += read as u32;

        if self.offset == self.size && self.size & 1 == 1 {
            if let Err(e) = self.reader.seek(SeekFrom::Start(self.end())) {
                debug!("unable to skip pad byte after {}: {e}", self.tag);
            }
        }

        Ok(read)
    }
}

impl<R: Read + Seek> Seek for Chunk<R> {
    #[instrument(skip(self), fields(tag = %self.tag, offset = self.offset), err(level = "debug"))]
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(offset) => i64::try_from(offset).ok(),
            SeekFrom::Current(delta) => i64::from(self.offset).checked_add(delta),
            SeekFrom::End(delta) => i64::from(self.size).checked_add(delta),
        };

        let Some(target) = target
            .and_then(|t| u32::try_from(t).ok())
            .filter(|t| *t <= self.size)
        else {
            return Err(Error::InvalidSeekOffset {
                pos,
                position: self.position(),
                size: self.size,
            }
            .into());
        };

        self.reader
            .seek(SeekFrom::Start(self.base + u64::from(target)))?;
        self.offset = target;
        Ok(u64::from(target))
    }

    fn stream_position(&mut self) -> io::Result<u64> {
        Ok(self.position())
    }
}
