use anyhow::{Context, Result};
use camino::Utf8Path;

use crate::cli::Cli;
use crate::layout::Layout;
use crate::manifest;
use crate::materialize::{self, Options, Summary};

const CREATED_MESSAGE: &str = "Project structure created successfully.";

pub fn run(cli: Cli) -> Result<()> {
    let layout = Layout::builtin()?;
    if cli.dry_run {
        print!("{}", manifest::render(&layout, cli.chdir.as_str()));
        let summary = materialize_into(&cli.chdir, &layout, true)?;
        println!(
            "Dry run: would create {} directories and {} files.",
            summary.directories, summary.files
        );
        return Ok(());
    }

    materialize_into(&cli.chdir, &layout, false)?;
    println!("{}", CREATED_MESSAGE);
    Ok(())
}

fn materialize_into(base: &Utf8Path, layout: &Layout, dry_run: bool) -> Result<Summary> {
    materialize::materialize(base, layout, Options { dry_run })
        .with_context(|| format!("materializing layout `{}` into {}", layout.name(), base))
}
