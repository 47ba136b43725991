//! # gcemit
//!
//! The final stage of a CNC toolpath compiler: takes the ordered trace of
//! machine states produced by executing a motion program and emits a
//! minimal, modally-correct instruction document that reproduces the same
//! machine behaviour on a controller.
//!
//! ## Architecture
//!
//! gcemit is organized as a workspace with multiple crates:
//!
//! 1. **gcemit-core** - Machine state model, instruction documents, errors
//! 2. **gcemit-export** - Change detection, emission, assembly, trace dump
//! 3. **gcemit-settings** - Configuration files
//! 4. **gcemit** - This facade and the command-line binary

use std::io::Write;
use std::path::Path;

pub use gcemit_core::{
    ArcAxis, Axis, Block, CoolantCommand, Document, Error, ExportError, MachineState, MotionMode,
    Plane, PositionRecord, Result, SpindleCommand, Token, Trace, TraceError, Wire,
};

pub use gcemit_export::{
    dump, dump_to_log, ChangeDetector, DocumentAssembler, EmittedState, ExportOptions,
    ExportSession, ExportStats, Exporter, InstructionEmitter, Verdict,
};

pub use gcemit_settings::{default_config_path, Config, OutputSettings, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging on stderr with:
/// - RUST_LOG environment variable support (INFO by default)
/// - Human-readable formatting, or JSON lines when `json` is set
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true)
                    .with_line_number(true),
            )
            .try_init()
    };

    result.map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))
}

/// Read a trace written by the execution engine as a JSON array of records
pub fn load_trace(path: &Path) -> Result<Trace> {
    let content = std::fs::read_to_string(path).map_err(|e| TraceError::Read {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let trace: Trace = serde_json::from_str(&content).map_err(|e| TraceError::Decode {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    tracing::debug!(records = trace.len(), path = %path.display(), "loaded trace");
    Ok(trace)
}

/// Write a document as JSON for the downstream serializer
pub fn write_document<W: Write>(document: &Document, out: &mut W, pretty: bool) -> Result<()> {
    let encoded = if pretty {
        serde_json::to_string_pretty(document)
    } else {
        serde_json::to_string(document)
    }
    .map_err(|e| Error::other(format!("Failed to encode document: {}", e)))?;

    writeln!(out, "{}", encoded)?;
    out.flush()?;
    Ok(())
}
