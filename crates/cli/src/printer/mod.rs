use clap::ValueEnum;
use dirscan_fs::DirEntryRecord;
use dirscan_runtime::PROGRAM_NAME;
use std::{
    io::{self, Write},
    time::Duration,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `<type> <name> <size>M` lines, optionally colored.
    #[default]
    Human,
    /// NDJSON (newline-delimited JSON) for machine consumption.
    Json,
}

/// Color handling strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Automatically detect TTY and enable colors if appropriate.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

/// Configuration for printing a listing.
#[derive(Debug, Clone)]
pub struct PrinterConfig {
    /// Output format (human or JSON).
    pub format: OutputFormat,
    /// Color handling strategy.
    pub color: ColorChoice,
    /// Whether to write the entry count (and timing) to stderr.
    pub show_summary: bool,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Human,
            color: ColorChoice::Auto,
            show_summary: true,
        }
    }
}

/// Human-readable printer with optional color support.
pub struct HumanPrinter<W: Write, E: Write> {
    out: W,
    err: E,
    cfg: PrinterConfig,
    use_color: bool,
}

impl<W: Write, E: Write> HumanPrinter<W, E> {
    /// `Auto` resolves to no color here; only `stdout` can see a terminal.
    pub fn new(out: W, err: E, cfg: PrinterConfig) -> Self {
        let use_color = matches!(cfg.color, ColorChoice::Always);

        Self {
            out,
            err,
            cfg,
            use_color,
        }
    }

    /// Create a printer that writes to stdout and stderr with TTY detection.
    pub fn stdout(cfg: PrinterConfig) -> HumanPrinter<io::Stdout, io::Stderr> {
        use std::io::IsTerminal;

        let use_color = match cfg.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => io::stdout().is_terminal(),
        };

        HumanPrinter {
            out: io::stdout(),
            err: io::stderr(),
            cfg,
            use_color,
        }
    }

    #[inline]
    fn format_name(&self, rec: &DirEntryRecord) -> String {
        if self.use_color && rec.is_dir() {
            format!("\x1b[34m{}\x1b[0m", rec.name)
        } else {
            rec.name.clone()
        }
    }

    #[cfg(test)]
    pub(crate) fn into_parts(self) -> (W, E) {
        (self.out, self.err)
    }
}

pub struct JsonPrinter<W: Write, E: Write> {
    out: W,
    err: E,
    cfg: PrinterConfig,
}

impl<W: Write, E: Write> JsonPrinter<W, E> {
    pub fn new(out: W, err: E, cfg: PrinterConfig) -> Self {
        Self { out, err, cfg }
    }

    /// Create a printer that writes to stdout and stderr.
    pub fn stdout(cfg: PrinterConfig) -> JsonPrinter<io::Stdout, io::Stderr> {
        JsonPrinter {
            out: io::stdout(),
            err: io::stderr(),
            cfg,
        }
    }

    #[cfg(test)]
    pub(crate) fn into_parts(self) -> (W, E) {
        (self.out, self.err)
    }
}

/// Static context about one listing.
#[derive(Debug)]
pub struct ListPrintContext<'a> {
    /// Directory as given on the command line.
    pub dir: &'a str,
    /// Canonical name of the ordering policy applied.
    pub policy: &'a str,
    /// Number of entries in the listing.
    pub total: usize,
    /// Time spent scanning and sorting, if measured.
    pub elapsed: Option<Duration>,
}

/// Trait for printing a sorted listing.
///
/// Implementations receive every record in order and are responsible for
/// formatting and outputting them.
pub trait ListingPrinter {
    /// Called once before any rows are printed.
    fn begin(&mut self, ctx: &ListPrintContext) -> io::Result<()>;

    /// Called for each record, in sorted order.
    fn print_row(&mut self, rec: &DirEntryRecord, ctx: &ListPrintContext) -> io::Result<()>;

    /// Called once after all rows are printed.
    ///
    /// Use this for footers and summaries.
    fn finish(&mut self, ctx: &ListPrintContext) -> io::Result<()>;
}

impl<W: Write, E: Write> ListingPrinter for HumanPrinter<W, E> {
    fn begin(&mut self, _ctx: &ListPrintContext) -> io::Result<()> {
        Ok(())
    }

    fn print_row(&mut self, rec: &DirEntryRecord, _ctx: &ListPrintContext) -> io::Result<()> {
        let name = self.format_name(rec);
        writeln!(
            self.out,
            "{} {} {:.1}M",
            rec.type_char(),
            name,
            rec.size_mib()
        )
    }

    fn finish(&mut self, ctx: &ListPrintContext) -> io::Result<()> {
        self.out.flush()?;

        if !self.cfg.show_summary {
            return Ok(());
        }

        match ctx.elapsed {
            Some(t) => writeln!(
                self.err,
                "\n[{}] {} entries in {} ({}) in {:.2}ms",
                PROGRAM_NAME,
                ctx.total,
                ctx.dir,
                ctx.policy,
                t.as_secs_f64() * 1000.0,
            ),
            None => writeln!(
                self.err,
                "\n[{}] {} entries in {} ({})",
                PROGRAM_NAME, ctx.total, ctx.dir, ctx.policy,
            ),
        }
    }
}

impl<W: Write, E: Write> ListingPrinter for JsonPrinter<W, E> {
    fn begin(&mut self, _ctx: &ListPrintContext) -> io::Result<()> {
        Ok(())
    }

    fn print_row(&mut self, rec: &DirEntryRecord, _ctx: &ListPrintContext) -> io::Result<()> {
        let line = serde_json::to_string(rec).map_err(io::Error::other)?;
        writeln!(self.out, "{}", line)
    }

    fn finish(&mut self, ctx: &ListPrintContext) -> io::Result<()> {
        self.out.flush()?;

        if self.cfg.show_summary {
            let obj = serde_json::json!({
                "type": "summary",
                "dir": ctx.dir,
                "policy": ctx.policy,
                "total": ctx.total,
                "elapsed_ms": ctx.elapsed.map(|t| t.as_secs_f64() * 1000.0),
            });
            writeln!(self.err, "{}", obj)?;
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "printer_tests.rs"]
mod tests;
