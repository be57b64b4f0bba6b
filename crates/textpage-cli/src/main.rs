mod browse;
mod commands;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use textpage_config::Config;

use commands::{BlogCommand, ConfigCommand, ConvertArgs, HistoryCommand, RemoteCommand};

/// Turn plain notes into HTML pages and manage the pages you generated.
#[derive(Parser)]
#[command(name = "textpage", author, version, about)]
struct Cli {
    /// More logging: -v for info, -vv for debug. RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Data directory for history and blog posts (default from config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a text file (or stdin) to HTML
    Convert(ConvertArgs),
    /// Inspect and manage saved pages
    #[command(subcommand)]
    History(HistoryCommand),
    /// Publish converted text as blog posts
    #[command(subcommand)]
    Blog(BlogCommand),
    /// Browse saved pages in a terminal UI
    Browse,
    /// Create or locate the config file
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Talk to the remote generator without generating
    #[command(subcommand)]
    Remote(RemoteCommand),
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default()?;
    log::info!("Config path: {}", Config::config_path().display());
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    log::info!("Data directory: {}", config.data_dir.display());

    match cli.command {
        Command::Convert(args) => commands::convert(&config, args),
        Command::History(command) => commands::history(&config, command),
        Command::Blog(command) => commands::blog(&config, command),
        Command::Browse => browse::run(&config),
        Command::Config(command) => commands::config(command),
        Command::Remote(command) => commands::remote(&config, command),
    }
}
