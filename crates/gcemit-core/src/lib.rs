//! # gcemit Core
//!
//! Core types for gcemit.
//! Provides the machine state model consumed by the exporter, the typed
//! instruction tokens and documents it produces, and the error taxonomy
//! shared by every crate in the workspace.

pub mod document;
pub mod error;
pub mod state;

pub use document::{ArcAxis, Axis, Block, CoolantCommand, Document, SpindleCommand, Token, Wire};

pub use error::{Error, ExportError, Result, TraceError};

pub use state::{MachineState, MotionMode, Plane, PositionRecord, Trace};
