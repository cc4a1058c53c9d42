use camino::Utf8PathBuf;
use clap::Parser;

/// Writes the order service source skeleton into a directory.
#[derive(Parser, Debug)]
#[command(name = "scaffold-tree", version, about = "Create the order service source skeleton")]
pub struct Cli {
    /// Directory to create the skeleton in.
    #[arg(short = 'C', long = "chdir", default_value = ".")]
    pub chdir: Utf8PathBuf,
    /// Print what would be created without touching the filesystem.
    #[arg(short = 'n', long = "dry-run")]
    pub dry_run: bool,
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Helper entry point so `main` can stay minimal.
pub fn parse() -> Cli {
    Cli::parse()
}
