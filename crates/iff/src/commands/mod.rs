pub mod extract;
pub mod list;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Print the chunk tree of an IFF file
    List(list::ListArgs),
    /// Write the payload of a single chunk to a file
    Extract(extract::ExtractArgs),
}

impl Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Commands::List(list) => list.handle(),
            Commands::Extract(extract) => extract.handle(),
        }
    }
}
