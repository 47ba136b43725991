//! # gcemit Export
//!
//! Turns an executed machine-state trace into a minimal, modally-correct
//! instruction document.
//!
//! Records flow once, in order, through three stages:
//!
//! 1. [`ChangeDetector`] compares each record with the last *emitted* state
//!    and schedules only what must change.
//! 2. [`InstructionEmitter`] turns a [`Verdict`] into instruction groups.
//! 3. [`DocumentAssembler`] writes the preamble and appends the groups.
//!
//! [`ExportSession`] drives the first two stages one record at a time and
//! [`Exporter`] runs the whole pass over a trace. The [`dump`] module
//! renders a trace for humans and never touches export state.

pub mod assembler;
pub mod detector;
pub mod dump;
pub mod emitter;
pub mod session;

pub use assembler::{DocumentAssembler, ExportOptions, DEFAULT_HEADER_COMMENT};
pub use detector::{ArcParams, ChangeDetector, EmittedState, Verdict};
pub use dump::{dump, dump_to_log, format_record};
pub use emitter::InstructionEmitter;
pub use session::{ExportSession, ExportStats, Exporter};
