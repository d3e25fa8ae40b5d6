//! cotary CLI
//!
//! Entry point for the `cotary` command-line tool: computes the checksum of
//! a file (or stdin) and publishes it on Twitter.

use chrono::TimeZone;
use clap::Parser;
use cotary::checksum::{read_chunks, Checksum, ChecksumError};
use cotary::config::{Config, CONFIG_TEMPLATE};
use cotary::publisher::{PublishError, Publisher};
use cotary_twitter::{OauthKeys, TwitterClient};
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Exit code when the input file (or config) cannot be used.
const EXIT_FILE_NOT_FOUND: i32 = 1;
/// Exit code when the input yields no bytes.
const EXIT_EMPTY_INPUT: i32 = 2;
/// Exit code when the user interrupts the checksum computation.
const EXIT_INTERRUPTED: i32 = 3;
/// Exit code when the Twitter credentials are incomplete.
const EXIT_NOT_CONFIGURED: i32 = 4;

#[derive(Parser)]
#[command(name = "cotary")]
#[command(about = "Publish the checksum of a file on Twitter", version)]
struct Cli {
    /// File for which to publish the checksum; reads stdin when omitted or "-"
    file: Option<PathBuf>,

    /// Only calculate and print the checksum, do not publish it
    #[arg(short = 'c', long)]
    calc_only: bool,

    /// Use the given config instead of ~/.config/cotary/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Do not print any messages
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let flag = interrupted.clone();
        let _ = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst));
    }

    let config_path = effective_config_path(&cli);
    let config = load_config(&cli, config_path.as_deref());

    let checksum = compute_checksum(&cli, &interrupted);
    echo(&cli, &format!("checksum: {}", checksum));

    if cli.calc_only {
        process::exit(0);
    }

    publish_checksum(&cli, &config, config_path.as_deref(), &checksum);
}

fn echo(cli: &Cli, message: &str) {
    if !cli.quiet {
        println!("{}", message);
    }
}

fn fail(cli: &Cli, code: i32, message: &str) -> ! {
    if !cli.quiet {
        eprintln!("{}", message);
    }
    process::exit(code);
}

/// Default config location under $HOME.
fn default_config_path() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(|home| {
        PathBuf::from(home)
            .join(".config")
            .join("cotary")
            .join("config.toml")
    })
}

fn effective_config_path(cli: &Cli) -> Option<PathBuf> {
    cli.config.clone().or_else(default_config_path)
}

/// Read configuration, creating a template config on first run.
///
/// The template is only written when the default path is in use; an
/// explicitly given --config path is never created. When no config file
/// can be found or created, the built-in defaults apply.
fn load_config(cli: &Cli, path: Option<&Path>) -> Config {
    let Some(path) = path else {
        return Config::from_defaults();
    };

    if cli.config.is_none() && !path.exists() {
        write_config_template(path);
    }
    if cli.config.is_none() && !path.exists() {
        return Config::from_defaults();
    }

    match Config::load(path) {
        Ok(config) => config,
        Err(e) => fail(cli, EXIT_FILE_NOT_FOUND, &format!("Error loading config: {}", e)),
    }
}

/// Best-effort template write; unwritable locations are not fatal.
fn write_config_template(path: &Path) {
    if let Some(dir) = path.parent() {
        if fs::create_dir_all(dir).is_err() {
            return;
        }
    }
    let _ = fs::write(path, CONFIG_TEMPLATE);
}

/// Open the input source and stream it into the checksum.
fn compute_checksum(cli: &Cli, interrupted: &Arc<AtomicBool>) -> Checksum {
    let result = match &cli.file {
        None => read_stdin(cli, interrupted),
        Some(path) if path.as_os_str() == "-" => read_stdin(cli, interrupted),
        Some(path) => match File::open(path) {
            Ok(file) => checksum_from(file, interrupted),
            Err(e) => fail(
                cli,
                EXIT_FILE_NOT_FOUND,
                &format!("{}: {}", path.display(), e),
            ),
        },
    };

    match result {
        Ok(checksum) => checksum,
        Err(ChecksumError::EmptyInput) => fail(cli, EXIT_EMPTY_INPUT, "Input is empty. Aborting."),
        Err(ChecksumError::Io(e)) if e.kind() == io::ErrorKind::Interrupted => {
            fail(cli, EXIT_INTERRUPTED, "Aborted by the user.")
        }
        Err(ChecksumError::Io(e)) => fail(
            cli,
            EXIT_FILE_NOT_FOUND,
            &format!("Error reading input: {}", e),
        ),
    }
}

fn read_stdin(cli: &Cli, interrupted: &Arc<AtomicBool>) -> Result<Checksum, ChecksumError> {
    echo(cli, "Reading from stdin.");
    checksum_from(io::stdin().lock(), interrupted)
}

/// Stream a reader into the checksum, honoring the interrupt flag between
/// chunks.
fn checksum_from<R: Read>(
    reader: R,
    interrupted: &Arc<AtomicBool>,
) -> Result<Checksum, ChecksumError> {
    let flag = interrupted.clone();
    let chunks = read_chunks(reader).map(move |chunk| {
        if flag.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted"));
        }
        chunk
    });
    Checksum::from_chunks(chunks)
}

/// Publish the checksum and report the outcome.
fn publish_checksum(cli: &Cli, config: &Config, config_path: Option<&Path>, checksum: &Checksum) {
    let publisher = match Publisher::from_config(config) {
        Ok(p) => p,
        Err(e) => fail(cli, EXIT_FILE_NOT_FOUND, &format!("Error in config: {}", e)),
    };

    let Some(credentials) = publisher.credentials() else {
        let message = match config_path {
            Some(path) => format!("Config file {} is not set up correctly.", path.display()),
            None => "No Twitter credentials are configured.".to_string(),
        };
        fail(cli, EXIT_NOT_CONFIGURED, &message);
    };

    let client = TwitterClient::new(OauthKeys {
        consumer_key: credentials.consumer_key.clone(),
        consumer_secret: credentials.consumer_secret.clone(),
        token: credentials.access_token_key.clone(),
        token_secret: credentials.access_token_secret.clone(),
    });

    match publisher.publish(&client, checksum) {
        Ok(published) => {
            let when = chrono::Local
                .timestamp_opt(published.created_at, 0)
                .single()
                .map(|t| t.to_string())
                .unwrap_or_else(|| published.created_at.to_string());
            echo(cli, &format!("Status published at {}", when));
            process::exit(0);
        }
        Err(PublishError::NotConfigured) => {
            fail(cli, EXIT_NOT_CONFIGURED, "Twitter credentials are not configured.")
        }
        Err(PublishError::Remote { code, message }) => fail(cli, code as i32, &message),
    }
}
