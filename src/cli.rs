// src/cli.rs
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "waoc-site", version, about = "WAOC bilingual site server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default).
    Serve,
    /// Render every page in every locale and validate links, then exit.
    Check,
    /// Print the official link registry with explorer URLs.
    Links,
    /// Copy an official value to the system clipboard.
    Copy {
        /// Registry id, e.g. `solMint`.
        id: String,
        /// Copy the explorer URL instead of the raw address.
        #[arg(long)]
        explorer: bool,
    },
}

impl Cli {
    pub fn into_command(self) -> Commands {
        self.command.unwrap_or(Commands::Serve)
    }
}
