use anyhow::{Context, Result};
use amapshp::{
    amap::{read_raw_districts, RawDistrict, RAW_DISTRICT_FILE},
    build_levels, package_levels, require_file_exists, write_levels, PipelineConfig,
};

use crate::cli::{BuildArgs, Cli};

/// Validate and write every level, then bundle them if asked.
pub fn build(cli: &Cli, config: &PipelineConfig, raws: &[RawDistrict], zip: bool, clean: bool) -> Result<()> {
    let levels = build_levels(raws, config).context("build boundary levels")?;
    let manifest = write_levels(&cli.output, &levels)
        .with_context(|| format!("write levels to {}", cli.output.display()))?;
    log::info!("[build] counts {:?}", manifest.counts);

    if zip {
        let archive = package_levels(&cli.output, clean)?;
        log::info!("[build] bundled -> {}", archive.display());
    }
    Ok(())
}

pub fn run(cli: &Cli, args: &BuildArgs) -> Result<()> {
    let mut config = super::load_config(cli)?;
    super::apply_pipeline_overrides(&mut config, &args.pipeline)?;

    let raw_path = cli.output.join(RAW_DISTRICT_FILE);
    require_file_exists(&raw_path).context("run `amapshp download` first")?;
    let raws = read_raw_districts(&raw_path)
        .with_context(|| format!("read {}", raw_path.display()))?;
    log::info!("[build] loaded {} raw districts from {}", raws.len(), raw_path.display());

    build(cli, &config, &raws, args.zip, args.pipeline.clean)
}
