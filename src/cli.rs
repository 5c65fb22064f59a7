//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;
use std::time::Duration;

use clap::parser::ValueSource;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};

use pdf_scraper::ScraperConfig;
use pdf_scraper::config::{DEFAULT_CACHE_FILE, DEFAULT_OUTPUT_DIR, DEFAULT_SOURCE_URL};
use pdf_scraper::download::DOWNLOAD_TIMEOUT_SECS;

/// Scrape a web page for PDF links and download each file once.
///
/// Fetches the source page (or reuses its local cache), extracts every
/// `http(s)://...pdf` link, and saves each PDF into the output folder,
/// skipping files that are already there.
#[derive(Parser, Debug, Clone)]
#[command(name = "pdf-scraper")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Page to scan for PDF links
    #[arg(short = 'u', long, default_value = DEFAULT_SOURCE_URL)]
    pub source_url: String,

    /// Local cache of the page; reused on later runs when present
    #[arg(long, default_value = DEFAULT_CACHE_FILE)]
    pub cache_file: PathBuf,

    /// Folder receiving downloaded PDFs (created if missing)
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Timeout for each PDF download in seconds (1-3600)
    #[arg(
        short = 't',
        long,
        default_value_t = DOWNLOAD_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..=3600)
    )]
    pub timeout: u64,
}

impl Args {
    /// Builds the library run configuration from the parsed arguments.
    #[must_use]
    pub fn to_config(&self) -> ScraperConfig {
        ScraperConfig {
            source_url: self.source_url.clone(),
            cache_file: self.cache_file.clone(),
            output_dir: self.output_dir.clone(),
            download_timeout: Duration::from_secs(self.timeout),
        }
    }

    /// Default tracing filter derived from `--quiet` and `--verbose`.
    #[must_use]
    pub fn default_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }
}

/// Which arguments were given explicitly on the command line.
///
/// Only these win over the config file; clap defaults do not.
#[derive(Debug, Clone, Copy, Default)]
pub struct CliValueSources {
    pub source_url: bool,
    pub cache_file: bool,
    pub output_dir: bool,
    pub timeout: bool,
    pub verbose: bool,
    pub quiet: bool,
}

/// Parses process arguments, recording which values came from the command line.
pub fn parse_cli_with_sources() -> (Args, CliValueSources) {
    let matches = Args::command().get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());
    (args, sources_from_matches(&matches))
}

fn sources_from_matches(matches: &ArgMatches) -> CliValueSources {
    CliValueSources {
        source_url: is_commandline_value(matches, "source_url"),
        cache_file: is_commandline_value(matches, "cache_file"),
        output_dir: is_commandline_value(matches, "output_dir"),
        timeout: is_commandline_value(matches, "timeout"),
        verbose: is_commandline_value(matches, "verbose"),
        quiet: is_commandline_value(matches, "quiet"),
    }
}

fn is_commandline_value(matches: &ArgMatches, id: &str) -> bool {
    matches.value_source(id) == Some(ValueSource::CommandLine)
}
