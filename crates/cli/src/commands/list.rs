use std::{
    io::{Stderr, Stdout},
    path::PathBuf,
    process::ExitCode,
    time::Instant,
};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use dirscan_fs::{
    Direction, DirEntryRecord, MetadataPolicy, OrderingPolicy, ScanError, ScanOptions, SortKey,
    scan_directory_with,
};
use dirscan_runtime::{PROGRAM_NAME, default_scan_root, default_sort_name, strict_from_env};
use log::{error, warn};

use crate::printer::{
    ColorChoice, HumanPrinter, JsonPrinter, ListPrintContext, ListingPrinter, OutputFormat,
    PrinterConfig,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortField {
    Name,
    Size,
    Time,
}

impl From<SortField> for SortKey {
    fn from(field: SortField) -> Self {
        match field {
            SortField::Name => SortKey::Name,
            SortField::Size => SortKey::Size,
            SortField::Time => SortKey::Time,
        }
    }
}

#[derive(Debug, Args)]
pub struct OutputOptions {
    /// Output entries as NDJSON (one JSON object per line)
    #[arg(long)]
    pub json: bool,

    /// When to use colors
    #[arg(long, value_name = "WHEN", value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Suppress the summary line on stderr
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl OutputOptions {
    pub fn printer_config(&self) -> PrinterConfig {
        let format = if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        };

        PrinterConfig {
            format,
            color: self.color,
            show_summary: !self.quiet,
        }
    }

    /// Create a printer based on the output options.
    pub fn make_printer(&self) -> Box<dyn ListingPrinter> {
        let cfg = self.printer_config();

        match cfg.format {
            OutputFormat::Human => Box::new(HumanPrinter::<Stdout, Stderr>::stdout(cfg)),
            OutputFormat::Json => Box::new(JsonPrinter::<Stdout, Stderr>::stdout(cfg)),
        }
    }
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Directory to list (defaults to the current directory)
    pub dir: Option<PathBuf>,

    /// Sort key
    #[arg(long, short = 's', value_enum, conflicts_with = "policy")]
    pub sort: Option<SortField>,

    /// Reverse the sort direction
    #[arg(long, short = 'r', conflicts_with = "policy")]
    pub reverse: bool,

    /// Named ordering policy, e.g. nameAsc, size-desc, -time.
    /// Falls back to $DIRSCAN_SORT, then nameAsc.
    #[arg(long, short = 'p', value_parser = parse_policy, allow_hyphen_values = true)]
    pub policy: Option<OrderingPolicy>,

    /// Fail if any entry cannot be stat'ed instead of skipping it
    #[arg(long)]
    pub strict: bool,

    /// Include `.` and `..`
    #[arg(long, short = 'a')]
    pub all: bool,

    /// Output formatting options
    #[command(flatten)]
    pub output: OutputOptions,
}

fn parse_policy(s: &str) -> Result<OrderingPolicy, String> {
    s.parse::<OrderingPolicy>().map_err(|e| e.to_string())
}

impl ListArgs {
    /// Flags win over the environment; `--reverse` flips whichever policy
    /// came from the environment or the default.
    pub fn resolve_policy(&self, env_sort: Option<&str>) -> OrderingPolicy {
        if let Some(policy) = self.policy {
            return policy;
        }

        let direction = if self.reverse {
            Direction::Descending
        } else {
            Direction::Ascending
        };

        if let Some(field) = self.sort {
            return OrderingPolicy::from_parts(field.into(), direction);
        }

        let base = match env_sort.map(str::parse::<OrderingPolicy>) {
            Some(Ok(policy)) => policy,
            Some(Err(e)) => {
                warn!("[list] ignoring $DIRSCAN_SORT: {e}");
                OrderingPolicy::default()
            }
            None => OrderingPolicy::default(),
        };

        if self.reverse { base.reversed() } else { base }
    }

    pub fn scan_options(&self, env_strict: bool) -> ScanOptions {
        let metadata_policy = if self.strict || env_strict {
            MetadataPolicy::Strict
        } else {
            MetadataPolicy::Lenient
        };

        ScanOptions {
            metadata_policy,
            include_dot_entries: self.all,
        }
    }
}

pub fn run(args: ListArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            error!("[error] {e:#}");
            eprintln!("[{PROGRAM_NAME}] {e:#}");
            ExitCode::from(exit_code_for(&e))
        }
    }
}

/// 1 when the directory could not be opened, 2 for anything else.
fn exit_code_for(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<ScanError>() {
        Some(scan_err) if scan_err.is_open_failure() => 1,
        _ => 2,
    }
}

fn execute(args: ListArgs) -> Result<ExitCode> {
    let dir = args.dir.clone().unwrap_or_else(default_scan_root);
    let policy = args.resolve_policy(default_sort_name().as_deref());
    let opts = args.scan_options(strict_from_env());

    let started = Instant::now();
    let records = scan_directory_with(&dir, &opts, |a, b| policy.compare(a, b))?;
    let elapsed = started.elapsed();

    let mut printer = args.output.make_printer();
    print_listing(printer.as_mut(), &dir, policy, &records, Some(elapsed))
        .context("failed to write listing")?;

    Ok(ExitCode::SUCCESS)
}

pub fn print_listing(
    printer: &mut dyn ListingPrinter,
    dir: &std::path::Path,
    policy: OrderingPolicy,
    records: &[DirEntryRecord],
    elapsed: Option<std::time::Duration>,
) -> std::io::Result<()> {
    let dir_display = dir.display().to_string();
    let ctx = ListPrintContext {
        dir: &dir_display,
        policy: policy.name(),
        total: records.len(),
        elapsed,
    };

    printer.begin(&ctx)?;
    for rec in records {
        printer.print_row(rec, &ctx)?;
    }
    printer.finish(&ctx)
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
