//! Export passes
//!
//! An export is a strictly sequential fold over the trace: every record's
//! verdict depends on what all earlier records emitted. [`ExportSession`]
//! holds that fold's state and can be fed one record at a time;
//! [`Exporter`] runs a fresh session over a whole trace.

use gcemit_core::{Block, Document, ExportError, PositionRecord};
use tracing::{debug, info};

use crate::assembler::{DocumentAssembler, ExportOptions};
use crate::detector::{ChangeDetector, EmittedState};
use crate::emitter::InstructionEmitter;

/// Counters for one export pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExportStats {
    /// Records pushed into the session
    pub records_seen: usize,
    /// Records skipped as initial conditions
    pub records_skipped: usize,
    /// Groups emitted, preamble excluded
    pub blocks_emitted: usize,
}

/// Streaming export state
///
/// Owns the emitted-state memory for a single pass. Records must be pushed
/// in trace order; a session is never shared between passes.
#[derive(Debug, Clone, Default)]
pub struct ExportSession {
    detector: ChangeDetector,
    emitter: InstructionEmitter,
    stats: ExportStats,
}

impl ExportSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next record and return the groups it produces
    ///
    /// On error the session state is left as it was before the call.
    pub fn push(&mut self, record: &PositionRecord) -> Result<Vec<Block>, ExportError> {
        let index = self.stats.records_seen;
        let verdict = self.detector.detect(index, record)?;
        self.stats.records_seen += 1;

        let Some(verdict) = verdict else {
            self.stats.records_skipped += 1;
            return Ok(Vec::new());
        };

        let blocks = self.emitter.emit(&verdict);
        self.stats.blocks_emitted += blocks.len();
        debug!(
            index,
            mode = ?record.state.motion_mode,
            groups = blocks.len(),
            "record emitted"
        );
        Ok(blocks)
    }

    /// Counters so far
    pub fn stats(&self) -> ExportStats {
        self.stats
    }

    /// Emitted-state memory as of the last record
    pub fn emitted(&self) -> &EmittedState {
        self.detector.emitted()
    }
}

/// Batch exporter
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    options: ExportOptions,
}

impl Exporter {
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Export a whole trace
    ///
    /// Every call starts from a fresh emitted state. The first malformed
    /// record aborts the export.
    pub fn export(&self, trace: &[PositionRecord]) -> Result<Document, ExportError> {
        self.export_with_stats(trace).map(|(document, _)| document)
    }

    /// Export a whole trace and report pass counters
    pub fn export_with_stats(
        &self,
        trace: &[PositionRecord],
    ) -> Result<(Document, ExportStats), ExportError> {
        let mut session = ExportSession::new();
        let mut assembler = DocumentAssembler::new(&self.options);

        for record in trace {
            assembler.append(session.push(record)?);
        }

        let stats = session.stats();
        info!(
            records = stats.records_seen,
            skipped = stats.records_skipped,
            groups = stats.blocks_emitted,
            "export complete"
        );
        Ok((assembler.finish(), stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gcemit_core::{MachineState, MotionMode, Token};

    fn linear(x: f64) -> PositionRecord {
        PositionRecord::new(x, 0.0, 0.0, MachineState::new(MotionMode::Linear))
    }

    #[test]
    fn test_session_counts() {
        let mut session = ExportSession::new();
        session.push(&PositionRecord::initial()).unwrap();
        let blocks = session.push(&linear(1.0)).unwrap();
        session.push(&linear(1.0)).unwrap();

        assert_eq!(blocks.len(), 1);
        assert_eq!(
            session.stats(),
            ExportStats {
                records_seen: 3,
                records_skipped: 1,
                blocks_emitted: 1,
            }
        );
    }

    #[test]
    fn test_session_error_reports_trace_index() {
        let mut session = ExportSession::new();
        session.push(&linear(1.0)).unwrap();
        session.push(&linear(2.0)).unwrap();

        let err = session.push(&linear(f64::INFINITY)).unwrap_err();
        assert_eq!(err.record_index(), 2);
        assert_eq!(session.stats().records_seen, 2);
    }

    #[test]
    fn test_exports_are_independent() {
        let exporter = Exporter::default();
        let trace = vec![linear(5.0)];

        let first = exporter.export(&trace).unwrap();
        let second = exporter.export(&trace).unwrap();
        assert_eq!(first, second);
        assert!(first
            .tokens()
            .any(|t| *t == Token::Motion(MotionMode::Linear)));
    }

    #[test]
    fn test_batch_matches_streaming() {
        let trace = vec![PositionRecord::initial(), linear(1.0), linear(2.0), linear(2.0)];
        let (document, stats) = Exporter::default().export_with_stats(&trace).unwrap();

        let mut session = ExportSession::new();
        let streamed: Vec<_> = trace
            .iter()
            .flat_map(|r| session.push(r).unwrap())
            .collect();

        assert_eq!(&document.blocks()[2..], streamed.as_slice());
        assert_eq!(stats.blocks_emitted, streamed.len());
    }
}
