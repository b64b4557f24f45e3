use std::path::PathBuf;

/// China administrative boundaries from AMap (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "amapshp", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Pipeline settings as JSON; absent fields keep their defaults
    #[arg(short, long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Output directory for raw records, level files, and the archive
    #[arg(short, long, global = true, default_value = "output", value_hint = clap::ValueHint::DirPath)]
    pub output: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Fetch the nine-dash line and the district polylines into the output directory
    #[cfg(feature = "download")]
    Download(DownloadArgs),

    /// Build the four validated level files from cn_district_raw.json
    Build(BuildArgs),

    /// Bundle the level files into geojson.zip
    Package(PackageArgs),

    /// Download, build, and package in one go
    #[cfg(feature = "download")]
    Run(RunArgs),
}

#[cfg(feature = "download")]
#[derive(clap::Args, Debug)]
pub struct DownloadArgs {
    /// AMap web-service key
    #[arg(long, env = "AMAP_KEY", hide_env_values = true)]
    pub key: String,

    /// Pause between district requests in milliseconds (overrides config)
    #[arg(long)]
    pub request_delay_ms: Option<u64>,
}

/// Settings shared by `build` and `run`.
#[derive(clap::Args, Debug)]
pub struct PipelineArgs {
    /// Decimal digits kept after coordinate correction (overrides config)
    #[arg(long)]
    pub precision: Option<u32>,

    /// Comma-separated adcodes repaired from their neighbors (overrides config)
    #[arg(long, value_delimiter = ',')]
    pub defective: Option<Vec<u32>>,

    /// Delete the bundled level files once zipped
    #[arg(long)]
    pub clean: bool,
}

#[derive(clap::Args, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Also bundle the level files into geojson.zip
    #[arg(long)]
    pub zip: bool,
}

#[derive(clap::Args, Debug)]
pub struct PackageArgs {
    /// Delete the bundled level files afterwards
    #[arg(long)]
    pub clean: bool,
}

#[cfg(feature = "download")]
#[derive(clap::Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub download: DownloadArgs,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn build_accepts_zip() {
        let cli = Cli::try_parse_from(["amapshp", "build", "--zip", "--clean", "--defective", "360822,360983"]).unwrap();
        match cli.command {
            Commands::Build(args) => {
                assert!(args.zip && args.pipeline.clean);
                assert_eq!(args.pipeline.defective, Some(vec![360822, 360983]));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[cfg(feature = "download")]
    #[test]
    fn run_has_no_zip_flag() {
        assert!(Cli::try_parse_from(["amapshp", "run", "--key", "k", "--zip"]).is_err());
        assert!(Cli::try_parse_from(["amapshp", "run", "--key", "k", "--clean"]).is_ok());
    }
}
