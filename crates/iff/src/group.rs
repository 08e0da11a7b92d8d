//! Group chunks hold a 4 byte form type followed by more chunks

use std::io::{self, Read, Seek};

use iff_chunk::Tag;

/// Anything a chunk can be read from, usable as a trait object when descending into
/// nested chunks
pub trait Source: Read + Seek {}

impl<T: Read + Seek> Source for T {}

const GROUP_TAGS: [Tag; 4] = [Tag(*b"FORM"), Tag(*b"LIST"), Tag(*b"CAT "), Tag(*b"PROP")];

/// Whether a chunk with this tag and size holds a form type and nested chunks
pub fn is_group(tag: Tag, size: u32) -> bool {
    size >= 4 && GROUP_TAGS.contains(&tag)
}

/// Read the form type at the start of a group chunk's payload
pub fn read_form_type<R: Read>(reader: &mut R) -> io::Result<Tag> {
    let mut form_type = [0u8; 4];
    reader.read_exact(&mut form_type)?;
    Ok(Tag(form_type))
}
