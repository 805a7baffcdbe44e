use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI definition. The tool has a single job, so there are no
/// subcommands: running it with no arguments reads `setup.yaml` from the
/// current directory and builds the described tree next to it.
#[derive(Parser, Debug)]
#[command(
    name = "mkproj",
    version,
    about = "Materialize a project tree from setup.yaml"
)]
pub struct Cli {
    /// Change to this directory before locating the setup file or creating
    /// the project root.
    #[arg(short = 'C', long = "chdir")]
    pub chdir: Option<PathBuf>,

    /// Explicit path to the setup document, overriding convention lookup.
    #[arg(short = 'f', long = "file")]
    pub file: Option<PathBuf>,
}

/// Helper entry point so `main` can stay minimal.
pub fn parse() -> Cli {
    Cli::parse()
}
