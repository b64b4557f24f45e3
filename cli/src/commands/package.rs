use anyhow::{Context, Result};
use amapshp::package_levels;

use crate::cli::{Cli, PackageArgs};

pub fn run(cli: &Cli, args: &PackageArgs) -> Result<()> {
    let archive = package_levels(&cli.output, args.clean)
        .with_context(|| format!("package level files in {}", cli.output.display()))?;
    log::info!("[package] -> {}", archive.display());
    Ok(())
}
