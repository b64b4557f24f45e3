pub mod build;
#[cfg(feature = "download")]
pub mod download;
pub mod package;
#[cfg(feature = "download")]
pub mod run;

use anyhow::{Context, Result};
use amapshp::{Adcode, PipelineConfig};

use crate::cli::{Cli, PipelineArgs};

/// Config file (if any) with no overrides applied.
pub fn load_config(cli: &Cli) -> Result<PipelineConfig> {
    let config = match &cli.config {
        Some(path) => PipelineConfig::from_json_file(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    log::debug!("pipeline config: {config:?}");
    Ok(config)
}

/// Apply the pipeline flags on top of `config`.
pub fn apply_pipeline_overrides(config: &mut PipelineConfig, args: &PipelineArgs) -> Result<()> {
    if let Some(precision) = args.precision {
        config.precision = precision;
    }
    if let Some(defective) = &args.defective {
        config.defective_adcodes = defective.iter().copied().map(Adcode).collect();
    }
    config.validate().context("invalid pipeline settings")?;
    Ok(())
}
