//! Command-line front end.
//!
//! `newspaper parse <URL>...` prints one JSON record per article on stdout.
//! `newspaper worker` reads JSON work messages from stdin, one per line, and
//! writes parsed messages to stdout. Logs go to stderr; set `RUST_LOG` to tune.

use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;

use clap::{Parser, Subcommand};
use rs_newspaper::{Article, Components, Configuration, Worker};

#[derive(Debug, Parser)]
#[command(name = "newspaper", version, about = "Download and parse news articles")]
struct Cli {
    /// TOML configuration file. Missing keys keep their defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Download and parse articles.
    Parse {
        #[arg(required = true)]
        urls: Vec<String>,

        /// Also extract keywords and a summary.
        #[arg(long)]
        nlp: bool,

        /// Article language, overriding the configuration.
        #[arg(long)]
        language: Option<String>,
    },
    /// Process JSON work messages from stdin.
    Worker,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match cli.config.as_deref().map(Configuration::from_file).transpose() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("newspaper: {e}");
            return ExitCode::FAILURE;
        }
    };

    let outcome = match cli.command {
        Command::Parse { urls, nlp, language } => parse_urls(config, &urls, nlp, language),
        Command::Worker => run_worker(config),
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            eprintln!("newspaper: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` when at least one article failed.
fn parse_urls(
    mut config: Configuration,
    urls: &[String],
    nlp: bool,
    language: Option<String>,
) -> Result<bool, Box<dyn std::error::Error>> {
    if let Some(language) = language {
        config.language = language;
    }
    let components = Components::from_config(&config)?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut all_ok = true;

    for url in urls {
        let result = Article::builder(url.as_str())
            .config(config.clone())
            .components(components.clone())
            .build()
            .and_then(|mut article| {
                article.download()?;
                article.parse()?;
                if nlp {
                    article.nlp()?;
                }
                Ok(article.to_record())
            });

        match result {
            Ok(record) => {
                serde_json::to_writer(&mut out, &record)?;
                writeln!(out)?;
            }
            Err(e) => {
                tracing::error!(url = %url, error = %e, "article failed");
                all_ok = false;
            }
        }
    }

    out.flush()?;
    Ok(all_ok)
}

fn run_worker(config: Configuration) -> Result<bool, Box<dyn std::error::Error>> {
    let worker = Worker::new(config)?;
    let (in_tx, in_rx) = mpsc::channel::<String>();
    let (out_tx, out_rx) = mpsc::channel::<String>();

    let handle = thread::spawn(move || worker.run(&in_rx, &out_tx));

    let writer = thread::spawn(move || -> io::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        for line in out_rx {
            writeln!(out, "{line}")?;
            out.flush()?;
        }
        Ok(())
    });

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if in_tx.send(line).is_err() {
            break;
        }
    }
    drop(in_tx);

    let published = handle.join().map_err(|_| "worker thread panicked")?;
    writer.join().map_err(|_| "writer thread panicked")??;
    tracing::info!(published, "worker finished");
    Ok(true)
}
