//! objclint - A fast Objective-C style checker with auto-fix support.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use objclint_config::{ObjclintConfig, find_config};
use objclint_linter::{FileReport, Linter, LinterSettings, Report, Rule};
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// Extensions of the files the linter reads.
const SOURCE_EXTENSIONS: &[&str] = &["h", "m", "mm"];

#[derive(Parser)]
#[command(name = "objclint")]
#[command(about = "A fast Objective-C style checker with auto-fix support", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check files for violations
    Check {
        /// Files or directories to check
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Path to objclint.toml
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Fix violations in files
    Fix {
        /// Files or directories to fix
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Path to objclint.toml
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Show diff without applying fixes
        #[arg(long)]
        diff: bool,

        /// Apply unsafe fixes
        #[arg(long)]
        r#unsafe: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { paths, config } => run_check(&paths, config.as_deref()),
        Commands::Fix {
            paths,
            config,
            diff,
            r#unsafe: allow_unsafe,
        } => run_fix(&paths, config.as_deref(), diff, allow_unsafe),
    }
}

/// Run the check command.
fn run_check(paths: &[PathBuf], config_path: Option<&Path>) -> Result<()> {
    let linter = Linter::new(load_settings(config_path)?).context("Invalid configuration")?;
    announce_rules("Checking", &linter);

    let files = collect_source_files(paths);
    let reports = files
        .par_iter()
        .map(|path| check_file(&linter, path))
        .collect::<Result<Vec<_>>>()?;
    let report = Report::from_files(reports);

    for (path, message) in report.messages() {
        println!(
            "{}:{}: {} {}",
            path.display(),
            message.span.start,
            format!("[{}]", message.rule).blue(),
            message.body()
        );
    }

    if report.is_empty() {
        println!("{}", "No violations found".green());
    } else {
        println!(
            "\nFound {} violations ({} fixable)",
            report.violation_count().to_string().red(),
            report.fixable_count().to_string().yellow()
        );
        std::process::exit(1);
    }

    Ok(())
}

/// Lint a single file.
fn check_file(linter: &Linter, path: &Path) -> Result<FileReport> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let result = linter.lint_source(&source);
    tracing::debug!(path = %path.display(), messages = result.messages.len(), "checked file");
    Ok(FileReport::new(path, result.messages))
}

/// The outcome of fixing one file.
struct FixedFile {
    path: PathBuf,
    original: String,
    fixed: String,
    applied: usize,
    unfixable: usize,
}

impl FixedFile {
    fn changed(&self) -> bool {
        self.original != self.fixed
    }
}

/// Run the fix command.
fn run_fix(
    paths: &[PathBuf],
    config_path: Option<&Path>,
    diff_only: bool,
    allow_unsafe: bool,
) -> Result<()> {
    let mut settings = load_settings(config_path)?.with_autofix(true);
    if allow_unsafe {
        settings = settings.with_unsafe_fixes(true);
    }
    let linter = Linter::new(settings).context("Invalid configuration")?;
    announce_rules("Fixing", &linter);

    let files = collect_source_files(paths);
    let mut outcomes = files
        .par_iter()
        .map(|path| fix_file(&linter, path))
        .collect::<Result<Vec<_>>>()?;
    outcomes.sort_by(|a, b| a.path.cmp(&b.path));

    let mut total_fixed = 0;
    let mut total_unfixable = 0;
    let mut files_changed = 0;

    for outcome in &outcomes {
        total_fixed += outcome.applied;
        total_unfixable += outcome.unfixable;
        if !outcome.changed() {
            continue;
        }
        files_changed += 1;
        if diff_only {
            print!("{}", render_diff(&outcome.path, &outcome.original, &outcome.fixed));
        } else {
            std::fs::write(&outcome.path, &outcome.fixed)
                .with_context(|| format!("Failed to write {}", outcome.path.display()))?;
        }
    }

    if diff_only {
        println!(
            "\n{} fix(es) available in {} file(s)",
            total_fixed.to_string().green(),
            files_changed
        );
    } else if total_fixed > 0 {
        println!(
            "\n{} fix(es) applied in {} file(s)",
            total_fixed.to_string().green(),
            files_changed
        );
    } else {
        println!("{}", "No fixes to apply".green());
    }

    if total_unfixable > 0 {
        eprintln!(
            "{} violation(s) could not be fixed automatically",
            total_unfixable.to_string().yellow()
        );
    }

    Ok(())
}

/// Fix a single file in memory.
fn fix_file(linter: &Linter, path: &Path) -> Result<FixedFile> {
    let original = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let fixed = linter.fix_source(&original);
    tracing::debug!(
        path = %path.display(),
        applied = fixed.applied,
        passes = fixed.passes,
        "fixed file"
    );
    Ok(FixedFile {
        path: path.to_path_buf(),
        applied: fixed.applied,
        unfixable: fixed.remaining.len(),
        fixed: fixed.source,
        original,
    })
}

fn announce_rules(action: &str, linter: &Linter) {
    let rule_names: Vec<_> = linter.rules().map(Rule::name).collect();
    if rule_names.is_empty() {
        eprintln!("{}", "Warning: No rules enabled".yellow());
    } else {
        eprintln!(
            "{action} with {} rule(s): {}",
            rule_names.len(),
            rule_names.join(", ")
        );
    }
}

/// Settings from `--config`, or from a config file found in the working
/// directory, or the defaults.
fn load_settings(config_path: Option<&Path>) -> Result<LinterSettings> {
    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let cwd = std::env::current_dir().context("Failed to read working directory")?;
            find_config(&cwd)
        }
    };

    let Some(path) = path else {
        tracing::debug!("no configuration file, using defaults");
        return Ok(LinterSettings::default());
    };
    let config = ObjclintConfig::from_file(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    eprintln!("Using config: {}", path.display());
    Ok(LinterSettings::from_config(&config))
}

/// Collect Objective-C sources, walking directories recursively.
fn collect_source_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() && is_source_file(path) {
            files.push(path.clone());
        } else if path.is_dir() {
            files.extend(
                WalkDir::new(path)
                    .into_iter()
                    .filter_map(Result::ok)
                    .filter(|entry| entry.file_type().is_file() && is_source_file(entry.path()))
                    .map(walkdir::DirEntry::into_path),
            );
        }
    }
    files.sort();
    files.dedup();
    files
}

fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// A unified-style diff of `original` against `fixed`.
fn render_diff(path: &Path, original: &str, fixed: &str) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "--- a/{}", path.display());
    let _ = writeln!(output, "+++ b/{}", path.display());

    let original_lines: Vec<&str> = original.lines().collect();
    let fixed_lines: Vec<&str> = fixed.lines().collect();

    let mut hunk = Hunk::default();
    let mut i = 0;
    let mut j = 0;

    while i < original_lines.len() || j < fixed_lines.len() {
        match (original_lines.get(i), fixed_lines.get(j)) {
            (Some(&o), Some(&f)) if o == f => {
                if hunk.is_open() {
                    hunk.lines.push(DiffLine::Context(o));
                }
                i += 1;
                j += 1;
            }
            (Some(&o), Some(&f)) => {
                hunk.open(i, j);
                hunk.lines.push(DiffLine::Removed(o));
                hunk.lines.push(DiffLine::Added(f));
                i += 1;
                j += 1;
            }
            (Some(&o), None) => {
                hunk.open(i, j);
                hunk.lines.push(DiffLine::Removed(o));
                i += 1;
            }
            (None, Some(&f)) => {
                hunk.open(i, j);
                hunk.lines.push(DiffLine::Added(f));
                j += 1;
            }
            (None, None) => break,
        }

        // Flush once three unchanged lines follow the change.
        if hunk.lines.len() > 6 && hunk.trailing_context() >= 3 {
            hunk.flush(&mut output);
        }
    }

    hunk.flush(&mut output);
    output
}

enum DiffLine<'a> {
    Context(&'a str),
    Removed(&'a str),
    Added(&'a str),
}

#[derive(Default)]
struct Hunk<'a> {
    /// One-based first line in the original and fixed text.
    start: Option<(usize, usize)>,
    lines: Vec<DiffLine<'a>>,
}

impl Hunk<'_> {
    fn is_open(&self) -> bool {
        self.start.is_some()
    }

    fn open(&mut self, original: usize, fixed: usize) {
        if self.start.is_none() {
            self.start = Some((original + 1, fixed + 1));
        }
    }

    fn trailing_context(&self) -> usize {
        self.lines
            .iter()
            .rev()
            .take_while(|line| matches!(line, DiffLine::Context(_)))
            .count()
    }

    fn flush(&mut self, output: &mut String) {
        let Some((original, fixed)) = self.start.take() else {
            return;
        };
        let before = self
            .lines
            .iter()
            .filter(|line| !matches!(line, DiffLine::Added(_)))
            .count();
        let after = self
            .lines
            .iter()
            .filter(|line| !matches!(line, DiffLine::Removed(_)))
            .count();
        let _ = writeln!(output, "@@ -{original},{before} +{fixed},{after} @@");
        for line in self.lines.drain(..) {
            let _ = match line {
                DiffLine::Context(text) => writeln!(output, " {text}"),
                DiffLine::Removed(text) => writeln!(output, "{}{text}", "-".red()),
                DiffLine::Added(text) => writeln!(output, "{}{text}", "+".green()),
            };
        }
    }
}
