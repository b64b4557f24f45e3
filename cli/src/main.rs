mod cli;
mod commands;

use cli::{Cli, Commands};

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        #[cfg(feature = "download")]
        Commands::Download(args) => commands::download::run(&cli, args),
        Commands::Build(args) => commands::build::run(&cli, args),
        Commands::Package(args) => commands::package::run(&cli, args),
        #[cfg(feature = "download")]
        Commands::Run(args) => commands::run::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
