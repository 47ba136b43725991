//! Human-readable trace dump
//!
//! Stateless per record and independent of any export pass. Failures here
//! are returned to the caller and never reach a document.

use std::io::{self, Write};

use gcemit_core::PositionRecord;
use tracing::debug;

/// Render one record as a single line
pub fn format_record(record: &PositionRecord) -> String {
    format!(
        "{}, feedrate: {:.6}, spindle: {:.6}, X: {:.6}, Y: {:.6}, Z: {:.6}, I: {:.6}, J: {:.6}, K: {:.6}",
        record.state.motion_mode.label(),
        record.state.feedrate,
        record.state.spindle_speed,
        record.x,
        record.y,
        record.z,
        record.i,
        record.j,
        record.k,
    )
}

/// Write every record of `trace` to `out`, one line each
pub fn dump<W: Write>(trace: &[PositionRecord], out: &mut W) -> io::Result<()> {
    for record in trace {
        writeln!(out, "{}", format_record(record))?;
    }
    out.flush()
}

/// Emit every record of `trace` as a debug event
pub fn dump_to_log(trace: &[PositionRecord]) {
    for (index, record) in trace.iter().enumerate() {
        debug!(index, "{}", format_record(record));
    }
}
