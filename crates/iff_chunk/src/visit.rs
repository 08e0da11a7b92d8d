//! Walking over sibling chunks

use std::io::{Read, Seek};

use tracing::{instrument, trace};

use crate::{chunk::Chunk, error::Result};

/// Call `f` with every chunk from the current position of `reader` until it runs out.
///
/// Each chunk is skipped once `f` returns, whether or not its payload was read, so
/// `f` only has to look at the chunks it cares about. Passing a [`Chunk`] as `reader`
/// walks the children of that chunk.
///
/// ```no_run
/// use std::fs::File;
///
/// fn count_chunks(file: &mut File) -> iff_chunk::error::Result<usize> {
///     let mut count = 0;
///     iff_chunk::visit_chunks(file, |_| {
///         count += 1;
///         Ok(())
///     })?;
///     Ok(count)
/// }
/// ```
#[instrument(skip_all, err(level = "debug"))]
pub fn visit_chunks<R, F>(mut reader: R, mut f: F) -> Result<()>
where
    R: Read + Seek,
    F: FnMut(&mut Chunk<&mut R>) -> Result<()>,
{
    loop {
        let mut chunk = match Chunk::new(&mut reader) {
            Ok(chunk) => chunk,
            Err(e) if e.is_end_of_stream() => return Ok(()),
            Err(e) => return Err(e),
        };
        trace!("visiting {} ({} bytes)", chunk.tag(), chunk.size());

        f(&mut chunk)?;
        chunk.skip()?;
    }
}
