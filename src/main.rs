//! browscap command line.
//!
//! # Subcommands
//! - `lookup <USER_AGENT>`: classify one user agent, print JSON
//! - `version`: print the dataset version
//! - `check`: build the catalog and print its size figures
//! - `serve`: classify user agents read from stdin, one JSON line each

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;

use browscap::config::watcher::DataWatcher;
use browscap::config::{load_config, BrowscapConfig};
use browscap::observability::logging;
use browscap::{Browscap, BrowserMatch, Capabilities};

#[derive(Parser)]
#[command(name = "browscap")]
#[command(about = "Classify user agents against the browscap dataset", long_about = None)]
struct Cli {
    /// Optional toml configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Browscap ini file (overrides data.ini_path).
    #[arg(short, long)]
    ini: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a single user agent
    Lookup {
        /// The user-agent string
        user_agent: String,
    },
    /// Print the dataset version
    Version,
    /// Build the catalog and print its size
    Check,
    /// Classify user agents from stdin, one per line. Reloads the dataset
    /// on change when data.watch is set.
    Serve,
}

/// JSON view of a match: resolved attributes plus derived predicates.
#[derive(Serialize)]
struct Report<'a> {
    pattern: &'a str,
    #[serde(flatten)]
    capabilities: &'a Capabilities,
    platform_short: String,
    is_crawler: bool,
    is_mobile: bool,
    is_tablet: bool,
    is_desktop: bool,
    is_console: bool,
    is_tv: bool,
}

impl<'a> Report<'a> {
    fn new(hit: &'a BrowserMatch) -> Self {
        let caps = hit.capabilities();
        Self {
            pattern: hit.name(),
            capabilities: caps,
            platform_short: caps.platform_short(),
            is_crawler: caps.is_crawler(),
            is_mobile: caps.is_mobile(),
            is_tablet: caps.is_tablet(),
            is_desktop: caps.is_desktop(),
            is_console: caps.is_console(),
            is_tv: caps.is_tv(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => BrowscapConfig::default(),
    };
    if let Some(ini) = cli.ini {
        config.data.ini_path = ini;
    }

    logging::init(&config.observability.log_filter);

    match run(cli.command, &config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, config: &BrowscapConfig) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let service = Arc::new(Browscap::from_config(&config.lookup));
    service.init_from_file(&config.data.ini_path, false)?;

    match command {
        Commands::Lookup { user_agent } => match service.lookup(&user_agent)? {
            Some(hit) => {
                println!("{}", serde_json::to_string_pretty(&Report::new(&hit))?);
            }
            None => {
                eprintln!("No match for {:?}", user_agent);
                return Ok(ExitCode::FAILURE);
            }
        },
        Commands::Version => {
            println!("{}", service.current_version().unwrap_or_else(|| "unknown".into()));
        }
        Commands::Check => {
            if let Some(catalog) = service.catalog() {
                println!("{}", serde_json::to_string_pretty(&catalog.stats())?);
            }
        }
        Commands::Serve => {
            let _watcher = if config.data.watch {
                Some(DataWatcher::new(&config.data.ini_path, service.clone()).run()?)
            } else {
                None
            };
            let stdout = io::stdout();
            let mut out = stdout.lock();
            for line in io::stdin().lock().lines() {
                let line = line?;
                match service.lookup(line.trim())? {
                    Some(hit) => serde_json::to_writer(&mut out, &Report::new(&hit))?,
                    None => write!(out, "null")?,
                }
                writeln!(out)?;
                out.flush()?;
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
