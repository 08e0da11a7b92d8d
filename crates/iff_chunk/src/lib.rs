//! This library reads chunks out of **IFF** style container files.
//!
//! # IFF Chunk Format Documentation
//!
//! IFF (Interchange File Format) and the formats derived from it (AIFF, 8SVX, ILBM,
//! the game data files of many engines) store everything as a sequence of chunks.
//! Chunks can contain other chunks, so a file is a tree of them.
//!
//! ## Chunk Structure
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Tag                    | 4 bytes: Identifier of the chunk, e.g. "FORM"              |
//! | 0x0004         | Size                   | 4 bytes: Length of the payload in bytes                    |
//! | 0x0008         | Payload                | (Size) bytes: Data of the chunk                            |
//! | 0x0008 + Size  | Pad                    | 1 byte: Only present when Size is odd                      |
//!
//! - **Tag**: 4 raw bytes. They are usually printable ASCII but nothing here relies on it.
//! - **Size**: A 4-byte unsigned integer. It does not include the header or the pad byte.
//! - **Pad**: A filler byte so that the next chunk starts on an even offset.
//!
//! ## Reading
//!
//! [`Chunk`] wraps any [`std::io::Read`] + [`std::io::Seek`] source positioned at a header.
//! It reads and seeks within the payload only and implements both traits itself, so the
//! payload of a chunk can be handed to [`Chunk::new`] again to read the chunks nested in it.
//!
//! Once a chunk has been read to the end, or [`Chunk::skip`] has been called, the source
//! points at the header of the next chunk. [`visit_chunks`] runs that loop for you.
//!
//! ## Additional Information
//!
//! - **Endianness**: Big-endian for the size field
//! - **Alignment**: Chunks start on even offsets
//!

pub mod chunk;
pub mod error;
pub mod visit;

pub use chunk::{Chunk, Tag};
pub use visit::visit_chunks;
