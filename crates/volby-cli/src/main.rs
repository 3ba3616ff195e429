use std::fs::File;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use volby::scraper::ElectionScraper;
use volby::utils::ScrapeStats;
use volby::{ScrapeConfig, export};

#[derive(Parser)]
#[command(name = "volby")]
#[command(about = "A volby.cz election results scraper", long_about = None)]
struct Cli {
    #[arg(help = "URL of the municipality index page")]
    index_url: String,

    #[arg(help = "Path of the delimited output file to write")]
    output: PathBuf,

    #[arg(
        short = 'l',
        long = "log-level",
        value_enum,
        default_value = "info",
        help = "Set the logging level"
    )]
    log_level: LogLevel,

    #[arg(
        short = 'd',
        long,
        default_value = ",",
        value_parser = parse_delimiter,
        help = "Field delimiter for the output file"
    )]
    delimiter: u8,
}

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s.as_bytes() {
        [b] => Ok(*b),
        _ => Err(format!(
            "Delimiter must be a single ASCII character, got '{s}'"
        )),
    }
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.clone().into())
        .init();

    let scraper = ElectionScraper::new(ScrapeConfig::default()).unwrap_or_else(|e| {
        log::error!("Error creating scraper: {e}");
        process::exit(1);
    });

    let municipalities = scraper
        .fetch_municipalities(&cli.index_url)
        .unwrap_or_else(|e| {
            log::error!("Error fetching municipality index: {e}");
            process::exit(1);
        });

    if municipalities.is_empty() {
        log::error!("No municipalities found at {}", cli.index_url);
        process::exit(1);
    }

    log::info!("Found {} municipalities", municipalities.len());

    let report = scraper.scrape_all(&municipalities);

    let file = File::create(&cli.output).unwrap_or_else(|e| {
        log::error!("Cannot create {}: {e}", cli.output.display());
        process::exit(1);
    });

    export::write_csv(file, &report.records, cli.delimiter).unwrap_or_else(|e| {
        log::error!("Error writing {}: {e}", cli.output.display());
        process::exit(1);
    });

    for failure in &report.failures {
        log::warn!("Failed: {failure}");
    }

    print!("{}", ScrapeStats::from_report(&report));
    println!("Results written to {}", cli.output.display());
}
