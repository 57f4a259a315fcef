//! Interactive editing session.
//!
//! A [`Session`] owns one collection, one merge pipeline and the current
//! output name, and executes [`SessionCommand`]s read from a line of text.
//! Positions typed by the user are 1-based.
//!
//! # Examples
//!
//! ```no_run
//! use pdfstack::config::Config;
//! use pdfstack::session::{Flow, Session};
//!
//! # async fn example() {
//! let mut session = Session::new(Config::default());
//! for line in ["add a.pdf b.pdf", "down 1", "merge Combined", "quit"] {
//!     if session.run_line(line).await == Flow::Quit {
//!         break;
//!     }
//! }
//! # }
//! ```

use anyhow::{Context, anyhow, bail};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;

use crate::collection::{Collection, Direction, RawFile};
use crate::config::{Config, OverwriteMode};
use crate::error::{Error, Result};
use crate::io::{OutputWriter, WriteStatistics, read_sources};
use crate::merge::{DEFAULT_OUTPUT_NAME, MIN_SOURCES, MergeOutcome, MergePipeline, sanitize};
use crate::output::{OutputFormatter, ProgressBar, display_merge_statistics};
use crate::utils::collect_paths_for_patterns;

/// Help text listing every command.
pub const HELP: &str = "\
Commands:
  add <file>...      add files (glob patterns allowed)
  list, ls           show the files in merge order
  remove <n>, rm <n> remove file n
  up <n>             move file n one place up
  down <n>           move file n one place down
  clear              remove all files
  name <text>        set the output name
  merge [name]       merge the files into <name>.pdf
  new                clear the list and reset the output name
  help               show this help
  quit, exit         leave";

/// A parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Add the files matching these patterns.
    Add(Vec<String>),
    /// Show the list and its summary.
    List,
    /// Remove the item at a 1-based position.
    Remove(usize),
    /// Move the item at a 1-based position one place up.
    Up(usize),
    /// Move the item at a 1-based position one place down.
    Down(usize),
    /// Remove every item.
    Clear,
    /// Set the output name.
    Name(String),
    /// Merge, optionally setting the output name first.
    Merge(Option<String>),
    /// Clear the list and reset the output name.
    New,
    /// Show the help text.
    Help,
    /// Leave the session.
    Quit,
}

impl FromStr for SessionCommand {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        parse_command(line).map_err(|e| Error::invalid_command(format!("{e:#}")))
    }
}

fn parse_command(line: &str) -> anyhow::Result<SessionCommand> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "" => bail!("empty command, type 'help' for a list of commands"),
        "add" => {
            let patterns: Vec<String> = rest.split_whitespace().map(String::from).collect();
            if patterns.is_empty() {
                bail!("usage: add <file>...");
            }
            SessionCommand::Add(patterns)
        }
        "list" | "ls" => SessionCommand::List,
        "remove" | "rm" => SessionCommand::Remove(parse_position(rest).context("usage: remove <n>")?),
        "up" => SessionCommand::Up(parse_position(rest).context("usage: up <n>")?),
        "down" => SessionCommand::Down(parse_position(rest).context("usage: down <n>")?),
        "clear" => SessionCommand::Clear,
        "name" => {
            if rest.is_empty() {
                bail!("usage: name <text>");
            }
            SessionCommand::Name(rest.to_string())
        }
        "merge" => SessionCommand::Merge((!rest.is_empty()).then(|| rest.to_string())),
        "new" => SessionCommand::New,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" | "q" => SessionCommand::Quit,
        other => bail!("unknown command '{other}', type 'help' for a list of commands"),
    };

    Ok(command)
}

/// Parse a 1-based position into a 0-based index.
fn parse_position(arg: &str) -> anyhow::Result<usize> {
    let position: usize = arg
        .parse()
        .with_context(|| format!("'{arg}' is not a position"))?;
    position
        .checked_sub(1)
        .ok_or_else(|| anyhow!("positions start at 1"))
}

/// Whether the session keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next command.
    Continue,
    /// Leave the session.
    Quit,
}

/// An interactive editing session.
#[derive(Debug)]
pub struct Session {
    collection: Collection,
    pipeline: MergePipeline,
    writer: OutputWriter,
    output_name: String,
    config: Config,
    formatter: OutputFormatter,
}

impl Session {
    /// Create a session with an empty list.
    ///
    /// The initial output name is the configured one.
    pub fn new(config: Config) -> Self {
        let formatter = OutputFormatter::from_config(&config);
        Self::with_formatter(config, formatter)
    }

    /// Create a session that prints through `formatter`.
    pub fn with_formatter(config: Config, formatter: OutputFormatter) -> Self {
        Self {
            collection: Collection::new(),
            pipeline: MergePipeline::with_compression(config.compression),
            writer: OutputWriter::new(),
            output_name: config.output_name.clone(),
            config,
            formatter,
        }
    }

    /// The list being edited.
    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    /// Mutable access to the list.
    pub fn collection_mut(&mut self) -> &mut Collection {
        &mut self.collection
    }

    /// Current output name as typed, before sanitizing.
    pub fn output_name(&self) -> &str {
        &self.output_name
    }

    /// Parse and execute one line, reporting any error.
    ///
    /// Blank lines are ignored.
    pub async fn run_line(&mut self, line: &str) -> Flow {
        if line.trim().is_empty() {
            return Flow::Continue;
        }

        let result = match line.parse::<SessionCommand>() {
            Ok(command) => self.execute(command).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(flow) => flow,
            Err(err) => {
                self.formatter.error(&err.to_string());
                Flow::Continue
            }
        }
    }

    /// Execute one command.
    ///
    /// # Errors
    ///
    /// Returns the error of the failed operation; the list is unchanged by
    /// a failed merge.
    pub async fn execute(&mut self, command: SessionCommand) -> Result<Flow> {
        debug!(?command, "session command");
        self.refresh();

        match command {
            SessionCommand::Add(patterns) => {
                let paths = collect_paths_for_patterns(&patterns)?;
                self.add_paths(&paths).await?;
            }
            SessionCommand::List => self.list(),
            SessionCommand::Remove(index) => {
                let removed = self.collection.remove(index)?;
                self.formatter.info(&format!("Removed {}", removed.name()));
            }
            SessionCommand::Up(index) => self.shift(index, Direction::Up)?,
            SessionCommand::Down(index) => self.shift(index, Direction::Down)?,
            SessionCommand::Clear => {
                self.collection.clear();
                self.formatter.info("Cleared the list");
            }
            SessionCommand::Name(name) => self.set_name(name),
            SessionCommand::Merge(name) => {
                if let Some(name) = name {
                    self.set_name(name);
                }
                self.merge_and_write().await?;
            }
            SessionCommand::New => {
                self.collection.clear();
                self.output_name = DEFAULT_OUTPUT_NAME.to_string();
                self.formatter.info("Started over");
            }
            SessionCommand::Help => self.formatter.text(HELP),
            SessionCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    /// Read `paths` and add them to the list.
    ///
    /// Files that are not PDFs are skipped with a warning.
    pub async fn add_paths(&mut self, paths: &[PathBuf]) -> Result<()> {
        let files: Vec<RawFile> = read_sources(paths, self.config.effective_jobs()).await?;
        let report = self.collection.add(files)?;

        if report.has_rejections() {
            self.formatter.warning(&format!(
                "Skipped {} file(s) that are not PDFs: {}",
                report.rejected.len(),
                report.rejected.join(", ")
            ));
        }
        self.formatter
            .info(&format!("Added {} file(s)", report.added.len()));
        self.list();
        Ok(())
    }

    fn shift(&mut self, index: usize, direction: Direction) -> Result<()> {
        if !self.collection.move_item(index, direction)? {
            self.formatter.info("Already at the edge of the list");
        }
        self.list();
        Ok(())
    }

    fn set_name(&mut self, name: String) {
        self.formatter
            .info(&format!("Output will be written as {}.pdf", sanitize(&name)));
        self.output_name = name;
    }

    /// Apply finished page counts.
    fn refresh(&mut self) {
        let changed = self.collection.poll_enrichment();
        if !changed.is_empty() {
            debug!(count = changed.len(), "page counts updated");
        }
    }

    fn list(&mut self) {
        self.refresh();
        self.formatter
            .collection(self.collection.items(), &self.collection.summary());
    }

    /// Merge the current list and write it to the output directory.
    pub async fn merge_and_write(&mut self) -> Result<(MergeOutcome, WriteStatistics)> {
        if self.collection.len() < MIN_SOURCES {
            return Err(Error::InsufficientInput {
                count: self.collection.len(),
            });
        }

        let target = self.config.output_path_for(&self.output_name);
        if OutputWriter::exists(&target).await && self.config.overwrite_mode != OverwriteMode::Force {
            return Err(Error::output_exists(target));
        }

        let snapshot = self.collection.snapshot();
        let mut progress = ProgressBar::unless_quiet(self.formatter.is_quiet());
        let merged = self
            .pipeline
            .merge(&snapshot, &self.output_name, &mut progress)
            .await;
        progress.finish();
        let outcome = merged?;

        let stats = self
            .writer
            .write(&outcome.bytes, &self.config.out_dir, &outcome.name)
            .await?;
        display_merge_statistics(&self.formatter, &outcome.statistics, &stats);

        Ok((outcome, stats))
    }
}
