use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use gcemit::{dump, init_logging, load_trace, write_document, Config, Exporter};

/// Emit a minimal G-code instruction document from an executed machine-state trace
#[derive(Parser, Debug)]
#[command(name = "gcemit", version, about)]
struct Cli {
    /// Trace file: JSON array of position records
    trace: PathBuf,

    /// Write the document here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file (.toml or .json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dump the trace to stderr before exporting
    #[arg(long)]
    dump: bool,

    /// Leave the units word out of the preamble
    #[arg(long)]
    no_units: bool,

    /// Header comment text
    #[arg(long)]
    comment: Option<String>,

    /// Pretty-print the document
    #[arg(long)]
    pretty: bool,

    /// Log as JSON lines
    #[arg(long)]
    json_logs: bool,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if self.dump {
            config.output.dump = true;
        }
        if self.no_units {
            config.export.emit_units = false;
        }
        if let Some(comment) = &self.comment {
            config.export.header_comment = comment.clone();
        }
        if self.pretty {
            config.output.pretty = true;
        }
        if self.json_logs {
            config.output.json_logs = true;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;
    cli.apply(&mut config);
    config.validate().context("invalid configuration")?;

    init_logging(config.output.json_logs)?;
    tracing::info!(
        version = gcemit::VERSION,
        built = gcemit::BUILD_DATE,
        "starting gcemit"
    );

    let trace = load_trace(&cli.trace)?;

    if config.output.dump {
        if let Err(e) = dump(&trace, &mut io::stderr().lock()) {
            tracing::warn!("trace dump failed: {}", e);
        }
    }

    let document = Exporter::new(config.export.clone())
        .export(&trace)
        .with_context(|| format!("failed to export {}", cli.trace.display()))?;

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_document(&document, &mut BufWriter::new(file), config.output.pretty)?;
        }
        None => write_document(&document, &mut io::stdout().lock(), config.output.pretty)?,
    }

    Ok(())
}
