//! pdfstack - Collect, reorder and merge PDF files into a single document.

use clap::Parser;
use std::path::Path;
use std::process;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use pdfstack::cli::Cli;
use pdfstack::collection::Collection;
use pdfstack::config::{Config, OverwriteMode};
use pdfstack::io::{OutputWriter, read_sources};
use pdfstack::merge::MergePipeline;
use pdfstack::output::{OutputFormatter, ProgressBar, RunReport, display_merge_statistics};
use pdfstack::session::{Flow, Session, SessionCommand};
use pdfstack::{Error, Result};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Log to stderr; `RUST_LOG` wins over the verbosity flag.
fn init_tracing(verbose: bool) {
    let default = if verbose { "pdfstack=debug" } else { "pdfstack=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Main application logic.
async fn run(cli: Cli) -> Result<()> {
    let config = Config::try_from(&cli)?;
    debug!(?config, "configuration");

    let formatter = OutputFormatter::from_config(&config);

    if config.interactive {
        return run_interactive(config).await;
    }

    if formatter.should_print() {
        formatter.section(&format!("{} v{}", pdfstack::NAME, pdfstack::VERSION));
        formatter.blank_line();
    }

    formatter.info(&format!("Reading {} file(s)...", config.inputs.len()));
    let files = read_sources(config.inputs(), config.effective_jobs()).await?;

    let mut collection = Collection::new();
    let report = collection.add(files)?;
    if report.has_rejections() {
        formatter.warning(&format!(
            "Skipped {} file(s) that are not PDFs: {}",
            report.rejected.len(),
            report.rejected.join(", ")
        ));
    }

    collection.settle().await;
    formatter.collection(collection.items(), &collection.summary());

    if config.dry_run {
        if config.json {
            print_report(&collection, None)?;
        }
        formatter.blank_line();
        formatter.success("Dry run completed successfully");
        formatter.info(&format!("  Output would be: {}", config.output_path().display()));
        formatter.info("  Run without --dry-run to create the merged PDF");
        return Ok(());
    }

    let target = config.output_path();
    handle_output_overwrite(&target, &config, &formatter).await?;

    formatter.blank_line();
    formatter.info("Merging documents...");

    let pipeline = MergePipeline::with_compression(config.compression);
    let mut progress = ProgressBar::unless_quiet(formatter.is_quiet());
    let merged = pipeline
        .merge(&collection.snapshot(), &config.output_name, &mut progress)
        .await;
    progress.finish();
    let outcome = merged?;

    let write_stats = OutputWriter::new()
        .write(&outcome.bytes, config.out_dir(), &outcome.name)
        .await?;

    display_merge_statistics(&formatter, &outcome.statistics, &write_stats);
    if config.json {
        print_report(
            &collection,
            Some((&outcome.statistics, write_stats.output_path.as_path())),
        )?;
    }

    Ok(())
}

fn print_report(
    collection: &Collection,
    merged: Option<(&pdfstack::merge::MergeStatistics, &Path)>,
) -> Result<()> {
    let report = RunReport {
        items: collection.items(),
        summary: collection.summary(),
        merge: merged.map(|(stats, _)| stats),
        output: merged.map(|(_, path)| path),
    };
    println!("{}", report.to_json()?);
    Ok(())
}

/// Read commands from stdin until `quit` or end of input.
async fn run_interactive(config: Config) -> Result<()> {
    let inputs = config.inputs.clone();
    let quiet = config.quiet;
    let mut session = Session::new(config);

    if !inputs.is_empty() {
        session.add_paths(&inputs).await?;
    }
    session.execute(SessionCommand::Help).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        if !quiet {
            stdout.write_all(b"pdfstack> ").await?;
            stdout.flush().await?;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if session.run_line(&line).await == Flow::Quit {
            break;
        }
    }

    Ok(())
}

/// Handle output file overwrite scenarios.
async fn handle_output_overwrite(
    target: &Path,
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<()> {
    if !OutputWriter::exists(target).await {
        return Ok(());
    }

    match config.overwrite_mode {
        OverwriteMode::Force => Ok(()),
        OverwriteMode::NoClobber => Err(Error::output_exists(target.to_path_buf())),
        OverwriteMode::Prompt => {
            // Nobody to ask in quiet mode
            if formatter.is_quiet() {
                return Err(Error::output_exists(target.to_path_buf()));
            }

            formatter.warning(&format!("Output file already exists: {}", target.display()));

            use std::io::{self, Write};
            print!("Overwrite? [y/N]: ");
            io::stdout().flush().ok();

            let mut response = String::new();
            io::stdin()
                .read_line(&mut response)
                .map_err(|err| Error::other(format!("Failed to read input: {err}")))?;

            let response = response.trim().to_lowercase();
            if response == "y" || response == "yes" {
                Ok(())
            } else {
                Err(Error::Cancelled)
            }
        }
    }
}
