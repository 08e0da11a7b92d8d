use clap::Args;
use iff_chunk::{chunk::HEADER_LEN, error::Result as ChunkResult, visit_chunks, Tag};
use miette::{Context, IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use std::{
    fs::File,
    io::{self, IsTerminal, Write},
    path::PathBuf,
};

use crate::group::{self, Source};

#[derive(Args)]
pub struct ListArgs {
    /// An input IFF file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Do not descend into group chunks deeper than this
    #[arg(long, value_name = "DEPTH")]
    max_depth: Option<usize>,
}

impl ListArgs {
    pub fn handle(&self) -> Result<()> {
        let mut f = File::open(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;

        let stdout = io::stdout();
        let mut lister = Lister {
            styled: stdout.is_terminal(),
            out: &mut stdout.lock(),
            max_depth: self.max_depth,
        };
        lister
            .level(&mut f, 0, 0)
            .context(format!("listing {}", &self.file.display()))?;
        Ok(())
    }
}

/// Prints one line per chunk, indented by nesting depth
struct Lister<'a> {
    out: &'a mut dyn Write,
    max_depth: Option<usize>,
    styled: bool,
}

impl Lister<'_> {
    /// Print every chunk readable from `reader`, whose position 0 lies at `origin` in the file
    fn level(&mut self, reader: &mut dyn Source, origin: u64, depth: usize) -> ChunkResult<()> {
        let indent = "  ".repeat(depth);

        visit_chunks(reader, |chunk| {
            let child_origin = origin + chunk.base();
            let offset = child_origin - HEADER_LEN as u64;
            let tag = self.paint(chunk.tag(), false);

            if !group::is_group(chunk.tag(), chunk.size()) {
                writeln!(self.out, "{indent}{tag} {} @{offset}", chunk.size())?;
                return Ok(());
            }

            let form_type = self.paint(group::read_form_type(chunk)?, true);
            writeln!(
                self.out,
                "{indent}{tag}:{form_type} {} @{offset}",
                chunk.size()
            )?;

            if self.max_depth.map_or(true, |max| depth < max) {
                self.level(chunk, child_origin, depth + 1)?;
            }
            Ok(())
        })
    }

    fn paint(&self, tag: Tag, form_type: bool) -> String {
        match (self.styled, form_type) {
            (false, _) => tag.to_string(),
            (true, false) => tag.bold().to_string(),
            (true, true) => tag.cyan().to_string(),
        }
    }
}
