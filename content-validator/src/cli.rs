use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use content_schema::{Collection, SchemaVariant};
use content_validator::output::{write_entries_json, write_human, write_json};
use content_validator::{
    ContentSourceConfig, UnknownCollectionPolicy, ValidationConfig, ValidationReport, load_fs,
    validate_fs,
};

use crate::logging;

/// Validate static-site content collections against their schemas.
#[derive(Parser, Debug)]
#[command(name = "content-validator", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging. Repeat for more (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate every entry and print the report.
    Check(SourceArgs),

    /// Validate every entry and write the normalized records as JSON.
    Export {
        #[command(flatten)]
        source: SourceArgs,

        /// Write entries to this file instead of stdout.
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// List the registered collections and their schemas.
    Collections,
}

#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Content roots, collection directories or single files.
    #[arg(default_value = "src/content")]
    pub paths: Vec<PathBuf>,

    /// Glob pattern of files to skip. Repeatable.
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Validate this collection directory with the case-study schema. Repeatable.
    #[arg(long = "case-study", value_name = "NAME")]
    pub case_study: Vec<String>,

    /// Report files outside any known collection instead of skipping them.
    #[arg(long)]
    pub strict_collections: bool,

    /// Report format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Human)]
    pub format: ReportFormat,

    /// Largest file that will be read, in bytes.
    #[arg(long, value_name = "BYTES")]
    pub max_file_size: Option<u64>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Human,
    Json,
}

impl SourceArgs {
    fn source_config(&self) -> ContentSourceConfig {
        let mut source = ContentSourceConfig::default();
        source.paths.clone_from(&self.paths);
        source.exclude.clone_from(&self.exclude);
        if let Some(max) = self.max_file_size {
            source.max_file_size = max;
        }
        source
    }

    fn validation_config(&self) -> ValidationConfig {
        let mut config = ValidationConfig::default();
        config.case_study_collections.clone_from(&self.case_study);
        if self.strict_collections {
            config.unknown_collection = UnknownCollectionPolicy::Error;
        }
        config
    }
}

/// Parse arguments and run the selected command.
///
/// Returns `Ok(false)` when content failed validation.
pub fn run() -> anyhow::Result<bool> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if cli.no_color || !io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    match cli.command {
        Command::Check(args) => check(&args),
        Command::Export { source, output } => export(&source, output.as_deref()),
        Command::Collections => {
            write_collections(&mut io::stdout().lock())?;
            Ok(true)
        }
    }
}

fn check(args: &SourceArgs) -> anyhow::Result<bool> {
    let report = validate_fs(&args.source_config(), &args.validation_config())?;
    let mut stdout = io::stdout().lock();
    write_report(&report, args.format, &mut stdout)?;
    Ok(report.ok)
}

fn export(args: &SourceArgs, output: Option<&Path>) -> anyhow::Result<bool> {
    let loaded = load_fs(&args.source_config(), &args.validation_config())?;

    if !loaded.report.ok {
        // Entries go nowhere when anything failed; the report explains why.
        write_report(&loaded.report, args.format, &mut io::stderr().lock())?;
        return Ok(false);
    }

    match output {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_entries_json(&loaded.entries, &mut file)?;
            eprintln!(
                "{} {} entries to {}",
                "Exported".green().bold(),
                loaded.entries.len(),
                path.display()
            );
        }
        None => write_entries_json(&loaded.entries, &mut io::stdout().lock())?,
    }
    Ok(true)
}

fn write_report(
    report: &ValidationReport,
    format: ReportFormat,
    writer: &mut dyn Write,
) -> anyhow::Result<()> {
    match format {
        ReportFormat::Json => write_json(report, writer),
        ReportFormat::Human => {
            write_human(report, writer)?;
            writeln!(writer, "{}", summary_line(report))?;
            Ok(())
        }
    }
}

fn summary_line(report: &ValidationReport) -> String {
    if report.ok {
        format!(
            "{} {} valid entr(y/ies)",
            "PASSED".green().bold(),
            report.valid_entries
        )
    } else {
        format!(
            "{} {} validation error(s), {} scan error(s)",
            "FAILED".red().bold(),
            report.errors_count(),
            report.scan_errors.len()
        )
    }
}

fn write_collections(writer: &mut dyn Write) -> anyhow::Result<()> {
    for collection in Collection::ALL {
        writeln!(
            writer,
            "{:<20} {}",
            collection.as_str().bold(),
            collection.schema()
        )?;
    }
    writeln!(writer)?;
    writeln!(
        writer,
        "Pass --case-study NAME to validate a directory with the {} schema.",
        SchemaVariant::CaseStudy
    )?;
    Ok(())
}
