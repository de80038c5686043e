//! patterndex CLI: check, new pattern / category, index.
//!
//! Findings go to stdout, logs to stderr. Set `RUST_LOG=patterndex=debug`
//! (or pass `--verbose`) to see scan and rule diagnostics.
//!
//! Exit codes: 0 clean, 1 findings, 2 I/O, usage, configuration or
//! interrupted run.

mod cli;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use patterndex_authoring::index::{ALPHABETICAL_BLOCK, CATEGORIES_BLOCK, close_marker, open_marker};
use patterndex_authoring::{Authoring, generate_index, write_index};
use patterndex_scanner::{Corpus, CorpusConfig, CorpusScanner};
use patterndex_types::{CancelFlag, CorpusResult, ValidationReport, finding_schema};
use patterndex_validator::{ReportFormat, render_report, validate};

use crate::cli::{Cli, Command, NewTarget};

const EXIT_FINDINGS: u8 = 1;
const EXIT_ERROR: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            "patterndex=debug"
        } else {
            "patterndex=warn"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    match run(cli).await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("patterndex: {error:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Check { schema: true, .. } => {
            println!("{}", finding_schema());
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { format, .. } => {
            let config = load_config(&cli.root, cli.config_file.as_deref())?;
            run_check(cli.root, config, format.into()).await
        }
        Command::New { target } => {
            let config = load_config(&cli.root, cli.config_file.as_deref())?;
            run_new(&Authoring::new(cli.root, config), target)
        }
        Command::Index { write } => {
            let config = load_config(&cli.root, cli.config_file.as_deref())?;
            let corpus = scan(&cli.root, config, &CancelFlag::new())?;
            run_index(&corpus, write)
        }
    }
}

fn load_config(root: &Path, explicit: Option<&Path>) -> Result<CorpusConfig> {
    CorpusConfig::load(root, explicit).context("failed to load configuration")
}

fn scan(root: &Path, config: CorpusConfig, cancel: &CancelFlag) -> Result<Corpus> {
    CorpusScanner::new(config)
        .scan(root, cancel)
        .with_context(|| format!("failed to scan {}", root.display()))
}

async fn run_check(root: PathBuf, config: CorpusConfig, format: ReportFormat) -> Result<ExitCode> {
    let cancel = CancelFlag::new();
    let worker_cancel = cancel.clone();
    let mut task = tokio::task::spawn_blocking(move || -> CorpusResult<ValidationReport> {
        let corpus = CorpusScanner::new(config).scan(&root, &worker_cancel)?;
        validate(&corpus, &worker_cancel)
    });

    let joined = tokio::select! {
        joined = &mut task => joined,
        signal = tokio::signal::ctrl_c() => {
            match signal {
                Ok(()) => {
                    tracing::warn!("interrupt received, cancelling validation");
                    cancel.cancel();
                }
                Err(error) => tracing::debug!(%error, "ctrl-c handler unavailable"),
            }
            task.await
        }
    };
    let report = joined
        .context("validation task failed")?
        .context("validation did not complete")?;

    print!("{}", render_report(&report, format));
    if report.is_clean() {
        Ok(ExitCode::SUCCESS)
    } else {
        for (rule, count) in report.rule_counts() {
            tracing::debug!(%rule, summary = rule.summary(), findings = count, "rule findings");
        }
        tracing::info!(findings = report.len(), "corpus has findings");
        Ok(ExitCode::from(EXIT_FINDINGS))
    }
}

fn run_new(tool: &Authoring, target: NewTarget) -> Result<ExitCode> {
    let created = match target {
        NewTarget::Pattern {
            category,
            name,
            intent,
        } => tool
            .new_pattern(&category, &name, intent.as_deref())
            .with_context(|| format!("cannot create pattern '{name}' in '{category}'"))?,
        NewTarget::Category { name, description } => tool
            .new_category(&name, description.as_deref())
            .with_context(|| format!("cannot create category '{name}'"))?,
    };
    println!("{}", created.rel_path);
    if !created.placeholders.is_empty() {
        eprintln!("fill in: {}", created.placeholders.join(", "));
    }
    Ok(ExitCode::SUCCESS)
}

fn run_index(corpus: &Corpus, write: bool) -> Result<ExitCode> {
    if write {
        for path in write_index(corpus).context("failed to rewrite index")? {
            println!("{path}");
        }
        return Ok(ExitCode::SUCCESS);
    }
    let generated = generate_index(corpus);
    for (name, body) in [
        (CATEGORIES_BLOCK, &generated.categories),
        (ALPHABETICAL_BLOCK, &generated.alphabetical),
    ] {
        println!("{}\n\n{body}\n{}\n", open_marker(name), close_marker(name));
    }
    Ok(ExitCode::SUCCESS)
}
