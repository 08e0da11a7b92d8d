use clap::Args;
use iff_chunk::Chunk;
use itertools::Itertools;
use miette::{miette, Context, IntoDiagnostic, Result};
use std::{
    fmt::{self, Display},
    fs::File,
    io::{self, Read},
    path::PathBuf,
    str::FromStr,
};
use tracing::{debug, info};

use crate::group::{self, Source};

/// Sibling indices leading from the top level of a file to one chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkPath(Vec<usize>);

impl FromStr for ChunkPath {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let indices = s
            .split('/')
            .map(|part| {
                part.trim()
                    .parse::<usize>()
                    .map_err(|e| format!("invalid index {part:?}: {e}"))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(ChunkPath(indices))
    }
}

impl Display for ChunkPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join("/"))
    }
}

#[derive(Args)]
pub struct ExtractArgs {
    /// An input IFF file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Index of the chunk among its siblings at every level, e.g. `0/2`
    #[arg(short, long, value_name = "PATH")]
    path: ChunkPath,

    /// Where to write the payload
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Allow overwriting the output
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl ExtractArgs {
    pub fn handle(&self) -> Result<()> {
        let mut f = File::open(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;

        let written = extract(&mut f, &self.path.0, &mut |payload| {
            let mut out = self.create_output()?;
            io::copy(payload, &mut out).into_diagnostic()
        })
        .context(format!("extracting chunk {}", self.path))?;
        info!("wrote {written} bytes to {}", self.output.display());
        Ok(())
    }

    fn create_output(&self) -> Result<File> {
        if !self.overwrite {
            File::create_new(&self.output)
                .into_diagnostic()
                .context(format!("creating {}", &self.output.display()))
        } else {
            File::create(&self.output)
                .into_diagnostic()
                .context(format!("creating {}", &self.output.display()))
        }
    }
}

/// Find the chunk at `path` below the current position of `reader` and hand its payload
/// to `write`, which is only called once the chunk has been found
fn extract(
    reader: &mut dyn Source,
    path: &[usize],
    write: &mut dyn FnMut(&mut dyn Read) -> Result<u64>,
) -> Result<u64> {
    let Some((&index, rest)) = path.split_first() else {
        return Err(miette!("empty chunk path"));
    };

    for _ in 0..index {
        let mut sibling = Chunk::new(&mut *reader)?;
        debug!("skipping {} ({} bytes)", sibling.tag(), sibling.size());
        sibling.skip()?;
    }

    let mut chunk = Chunk::new(&mut *reader)?;
    debug!("found {} ({} bytes)", chunk.tag(), chunk.size());

    if rest.is_empty() {
        return write(&mut chunk);
    }

    if !group::is_group(chunk.tag(), chunk.size()) {
        return Err(miette!("{} does not contain other chunks", chunk.tag()));
    }
    group::read_form_type(&mut chunk).into_diagnostic()?;
    extract(&mut chunk, rest, write)
}
