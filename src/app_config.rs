//! Optional config file supplying defaults for command-line options.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use pdf_scraper::download::MAX_DOWNLOAD_TIMEOUT_SECS;

use crate::cli::{Args, CliValueSources};

/// File-backed defaults for a scrape run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    /// Page to scan for PDF links.
    pub source_url: Option<String>,
    /// Local cache of the page.
    pub cache_file: Option<PathBuf>,
    /// Folder receiving downloaded PDFs.
    pub output_dir: Option<PathBuf>,
    /// Per-PDF download timeout in seconds (same range as the CLI).
    pub download_timeout_secs: Option<u64>,
    /// Default verbosity mode.
    pub verbosity: Option<VerbositySetting>,
}

impl FileConfig {
    /// Validates config values against CLI constraints.
    pub fn validate(&self) -> Result<()> {
        if let Some(source_url) = &self.source_url
            && source_url.trim().is_empty()
        {
            bail!("Invalid config value for `source_url`: must not be empty");
        }

        if let Some(timeout) = self.download_timeout_secs
            && !(1..=MAX_DOWNLOAD_TIMEOUT_SECS).contains(&timeout)
        {
            bail!(
                "Invalid config value for `download_timeout_secs`: {timeout}. \
                 Expected range: 1..={MAX_DOWNLOAD_TIMEOUT_SECS}"
            );
        }

        Ok(())
    }
}

/// Supported config verbosity labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbositySetting {
    Default,
    Verbose,
    Quiet,
    Debug,
}

/// Loaded config metadata.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Resolved config path if a base directory is known.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists and was valid.
    pub config: Option<FileConfig>,
}

/// Resolves the default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/pdf-scraper/config.toml`
/// 2. `$HOME/.config/pdf-scraper/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("pdf-scraper")
                .join("config.toml"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("pdf-scraper")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from the default path if present.
pub fn load_default_file_config() -> Result<LoadedConfig> {
    let path = resolve_default_config_path();
    let config = match path.as_deref() {
        Some(path_ref) if path_ref.is_file() => Some(load_file_config(path_ref)?),
        _ => None,
    };
    Ok(LoadedConfig { path, config })
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line_no = line_index + 1;
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!("Invalid config syntax on line {line_no}: expected key = value");
        };

        let key = raw_key.trim();
        let value = raw_value.trim();

        match key {
            "source_url" => {
                let parsed = parse_quoted(value)
                    .with_context(|| format!("Invalid `source_url` value on line {line_no}"))?;
                cfg.source_url = Some(parsed);
            }
            "cache_file" => {
                let parsed = parse_quoted(value)
                    .with_context(|| format!("Invalid `cache_file` value on line {line_no}"))?;
                cfg.cache_file = Some(PathBuf::from(parsed));
            }
            "output_dir" => {
                let parsed = parse_quoted(value)
                    .with_context(|| format!("Invalid `output_dir` value on line {line_no}"))?;
                cfg.output_dir = Some(PathBuf::from(parsed));
            }
            "download_timeout_secs" => {
                let parsed = parse_seconds(value).with_context(|| {
                    format!("Invalid `download_timeout_secs` value on line {line_no}")
                })?;
                cfg.download_timeout_secs = Some(parsed);
            }
            "verbosity" => {
                let parsed = parse_quoted(value)
                    .with_context(|| format!("Invalid `verbosity` value on line {line_no}"))?;
                cfg.verbosity = Some(parse_verbosity(&parsed).with_context(|| {
                    format!("Invalid `verbosity` value '{parsed}' on line {line_no}")
                })?);
            }
            unknown => {
                bail!("Unknown configuration key: '{unknown}' on line {line_no}");
            }
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

/// Cuts a trailing `# comment`, ignoring `#` inside double quotes.
fn strip_inline_comment(line: &str) -> &str {
    let mut quoted = false;
    let cut = line.char_indices().find_map(|(index, ch)| {
        if ch == '"' {
            quoted = !quoted;
        }
        (ch == '#' && !quoted).then_some(index)
    });
    cut.map_or(line, |index| &line[..index])
}

fn parse_quoted(raw_value: &str) -> Result<String> {
    raw_value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .map(str::to_string)
        .context("Expected double-quoted string")
}

fn parse_seconds(raw_value: &str) -> Result<u64> {
    let token = raw_value.trim();
    if token.starts_with('-') {
        bail!("Expected non-negative integer");
    }
    token
        .parse::<u64>()
        .with_context(|| format!("Expected whole seconds, found '{token}'"))
}

fn parse_verbosity(value: &str) -> Result<VerbositySetting> {
    match value {
        "default" => Ok(VerbositySetting::Default),
        "verbose" => Ok(VerbositySetting::Verbose),
        "quiet" => Ok(VerbositySetting::Quiet),
        "debug" => Ok(VerbositySetting::Debug),
        _ => bail!("Expected one of: default, verbose, quiet, debug"),
    }
}

/// Fills every option not given on the command line from `file_config`.
pub fn apply_config_defaults(
    mut args: Args,
    cli_sources: &CliValueSources,
    file_config: Option<&FileConfig>,
) -> Args {
    let Some(file_config) = file_config else {
        return args;
    };

    if !cli_sources.source_url
        && let Some(source_url) = &file_config.source_url
    {
        args.source_url.clone_from(source_url);
    }

    if !cli_sources.cache_file
        && let Some(cache_file) = &file_config.cache_file
    {
        args.cache_file.clone_from(cache_file);
    }

    if !cli_sources.output_dir
        && let Some(output_dir) = &file_config.output_dir
    {
        args.output_dir.clone_from(output_dir);
    }

    if !cli_sources.timeout
        && let Some(timeout) = file_config.download_timeout_secs
    {
        args.timeout = timeout;
    }

    if !cli_sources.verbose
        && !cli_sources.quiet
        && let Some(verbosity) = file_config.verbosity
    {
        apply_config_verbosity(&mut args, verbosity);
    }

    args
}

fn apply_config_verbosity(args: &mut Args, verbosity: VerbositySetting) {
    let (quiet, verbose) = match verbosity {
        VerbositySetting::Default => (false, 0),
        VerbositySetting::Verbose => (false, 1),
        VerbositySetting::Quiet => (true, 0),
        VerbositySetting::Debug => (false, 2),
    };
    args.quiet = quiet;
    args.verbose = verbose;
}
