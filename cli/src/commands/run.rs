use anyhow::Result;

use crate::cli::{Cli, RunArgs};

pub fn run(cli: &Cli, args: &RunArgs) -> Result<()> {
    let mut config = super::load_config(cli)?;
    super::apply_pipeline_overrides(&mut config, &args.pipeline)?;

    let raws = super::download::fetch(cli, &args.download, &mut config)?;
    super::build::build(cli, &config, &raws, true, args.pipeline.clean)
}
