use anyhow::{Context, Result};
use amapshp::{
    amap::{write_nine_line, write_raw_districts, AmapClient, RawDistrict, RAW_DISTRICT_FILE},
    ensure_dir_exists, PipelineConfig,
};

use crate::cli::{Cli, DownloadArgs};

/// Fetch the nine-dash line and every district, persisting both; returns the
/// raw district records for reuse.
pub fn fetch(cli: &Cli, args: &DownloadArgs, config: &mut PipelineConfig) -> Result<Vec<RawDistrict>> {
    if let Some(delay) = args.request_delay_ms {
        config.request_delay_ms = delay;
    }
    ensure_dir_exists(&cli.output)?;

    let client = AmapClient::new(args.key.clone(), config)?;

    let nine_line = client.nine_line(config.precision).context("download nine-dash line")?;
    let nine_line_path = write_nine_line(&cli.output, &nine_line)?;
    log::info!("[download] nine-dash line -> {}", nine_line_path.display());

    let districts = client.fetch_raw_districts().context("download district polylines")?;

    let out_path = cli.output.join(RAW_DISTRICT_FILE);
    write_raw_districts(&out_path, &districts)
        .with_context(|| format!("write {}", out_path.display()))?;
    log::info!("[download] {} districts -> {}", districts.len(), out_path.display());
    Ok(districts)
}

pub fn run(cli: &Cli, args: &DownloadArgs) -> Result<()> {
    let mut config = super::load_config(cli)?;
    fetch(cli, args, &mut config)?;
    Ok(())
}
