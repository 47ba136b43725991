//! Change detection against the last emitted machine state
//!
//! Rules are applied in a fixed priority order because later rules read
//! caches that earlier ones may have invalidated:
//!
//! 1. Skip records in [`MotionMode::Initial`].
//! 2. Spindle enable/direction change: schedule M3/M4/M5, forget motion mode.
//! 3. Coolant change: schedule M9 if a channel turned off, then M8 or M7,
//!    forget motion mode.
//! 4. Feed rate and spindle speed, except on rapid moves.
//! 5. Plane.
//! 6. Motion mode, restated on every arc.
//! 7. X, Y, Z independently.
//! 8. Arc offsets (non-zero only) and turn count (only when not 1).
//!
//! Reordering these changes the emitted document.

use gcemit_core::{CoolantCommand, ExportError, MotionMode, Plane, PositionRecord, SpindleCommand};
use smallvec::SmallVec;
use tracing::trace;

/// Last value emitted for every tracked attribute
///
/// Owned by a single export pass. Motion mode starts as rapid, the
/// controller's power-on mode, so a first rapid move does not restate it.
/// Plane starts unknown and is stated by the first move. Positions, feed rate
/// and spindle speed start at zero; spindle and coolant start off.
#[derive(Debug, Clone, PartialEq)]
pub struct EmittedState {
    feedrate: f64,
    spindle_speed: f64,
    x: f64,
    y: f64,
    z: f64,
    motion: Option<MotionMode>,
    plane: Option<Plane>,
    spindle_enabled: bool,
    spindle_clockwise: bool,
    flood_coolant: bool,
    mist_coolant: bool,
}

impl Default for EmittedState {
    fn default() -> Self {
        Self {
            feedrate: 0.0,
            spindle_speed: 0.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
            motion: Some(MotionMode::Rapid),
            plane: None,
            spindle_enabled: false,
            spindle_clockwise: false,
            flood_coolant: false,
            mist_coolant: false,
        }
    }
}

impl EmittedState {
    /// Fresh state for a new export pass
    pub fn new() -> Self {
        Self::default()
    }

    /// Last emitted motion mode, `None` when unknown
    pub fn motion_mode(&self) -> Option<MotionMode> {
        self.motion
    }

    /// Last emitted plane, `None` before the first move
    pub fn plane(&self) -> Option<Plane> {
        self.plane
    }

    pub fn feedrate(&self) -> f64 {
        self.feedrate
    }

    pub fn spindle_speed(&self) -> f64 {
        self.spindle_speed
    }

    /// Last emitted X, Y, Z
    pub fn position(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }

    /// Spindle (enabled, clockwise) flags as last commanded
    pub fn spindle(&self) -> (bool, bool) {
        (self.spindle_enabled, self.spindle_clockwise)
    }

    /// Coolant (flood, mist) flags as last commanded, never both set
    pub fn coolant(&self) -> (bool, bool) {
        (self.flood_coolant, self.mist_coolant)
    }

    /// Forget the motion mode so the next move restates it
    ///
    /// M-codes may disturb the controller's modal context.
    pub fn invalidate_motion(&mut self) {
        self.motion = None;
    }
}

/// Arc parameters scheduled for a move
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ArcParams {
    pub i: Option<f64>,
    pub j: Option<f64>,
    pub k: Option<f64>,
    /// Turn count, only when other than one
    pub turns: Option<i32>,
}

impl ArcParams {
    pub fn is_empty(&self) -> bool {
        self.i.is_none() && self.j.is_none() && self.k.is_none() && self.turns.is_none()
    }
}

/// Everything one record requires to be emitted
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Verdict {
    pub spindle: Option<SpindleCommand>,
    /// Up to two commands: an optional all-off followed by one channel on
    pub coolant: SmallVec<[CoolantCommand; 2]>,
    pub feedrate: Option<f64>,
    pub spindle_speed: Option<f64>,
    pub plane: Option<Plane>,
    pub motion: Option<MotionMode>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    /// Present only for arc records
    pub arc: Option<ArcParams>,
}

impl Verdict {
    /// Whether the record needs nothing emitted at all
    pub fn is_empty(&self) -> bool {
        self.spindle.is_none()
            && self.coolant.is_empty()
            && self.feedrate.is_none()
            && self.spindle_speed.is_none()
            && !self.has_move()
    }

    /// Whether the combined move group would carry any token
    pub fn has_move(&self) -> bool {
        self.plane.is_some()
            || self.motion.is_some()
            || self.x.is_some()
            || self.y.is_some()
            || self.z.is_some()
            || self.arc.is_some_and(|arc| !arc.is_empty())
    }
}

/// Decides, per record, which attributes must be (re-)emitted
#[derive(Debug, Clone, Default)]
pub struct ChangeDetector {
    emitted: EmittedState,
}

impl ChangeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// The state as of the last detected record
    pub fn emitted(&self) -> &EmittedState {
        &self.emitted
    }

    /// Run the rules for one record
    ///
    /// Returns `Ok(None)` for skipped records. A malformed record is rejected
    /// before any cache is touched.
    pub fn detect(
        &mut self,
        index: usize,
        record: &PositionRecord,
    ) -> Result<Option<Verdict>, ExportError> {
        let s = &record.state;
        let mode = s.motion_mode;

        if mode == MotionMode::Initial {
            trace!(index, "skipping initial record");
            return Ok(None);
        }

        validate(index, record)?;

        let e = &mut self.emitted;
        let mut verdict = Verdict::default();

        if s.spindle_enabled != e.spindle_enabled || s.spindle_clockwise != e.spindle_clockwise {
            let command = match (s.spindle_enabled, s.spindle_clockwise) {
                (true, true) => SpindleCommand::Clockwise,
                (true, false) => SpindleCommand::CounterClockwise,
                (false, _) => SpindleCommand::Stop,
            };
            verdict.spindle = Some(command);
            e.spindle_enabled = s.spindle_enabled;
            e.spindle_clockwise = s.spindle_clockwise;
            e.invalidate_motion();
            trace!(index, ?command, "spindle change invalidates motion mode");
        }

        // Flood wins when both are requested; mist is never asserted alongside it.
        let flood = s.flood_coolant;
        let mist = s.mist_coolant && !flood;
        if flood != e.flood_coolant || mist != e.mist_coolant {
            if (e.flood_coolant && !flood) || (e.mist_coolant && !mist) {
                verdict.coolant.push(CoolantCommand::AllOff);
            }
            if flood {
                verdict.coolant.push(CoolantCommand::Flood);
            } else if mist {
                verdict.coolant.push(CoolantCommand::Mist);
            }
            e.flood_coolant = flood;
            e.mist_coolant = mist;
            e.invalidate_motion();
            trace!(index, commands = ?verdict.coolant, "coolant change invalidates motion mode");
        }

        if mode != MotionMode::Rapid {
            if s.feedrate != e.feedrate {
                verdict.feedrate = Some(s.feedrate);
                e.feedrate = s.feedrate;
            }
            if s.spindle_speed != e.spindle_speed {
                verdict.spindle_speed = Some(s.spindle_speed);
                e.spindle_speed = s.spindle_speed;
            }
        }

        if e.plane != Some(s.plane) {
            verdict.plane = Some(s.plane);
            e.plane = Some(s.plane);
        }

        if mode.is_arc() || e.motion != Some(mode) {
            verdict.motion = Some(mode);
            e.motion = Some(mode);
        }

        if record.x != e.x {
            verdict.x = Some(record.x);
            e.x = record.x;
        }
        if record.y != e.y {
            verdict.y = Some(record.y);
            e.y = record.y;
        }
        if record.z != e.z {
            verdict.z = Some(record.z);
            e.z = record.z;
        }

        if mode.is_arc() {
            let non_zero = |v: f64| (v != 0.0).then_some(v);
            verdict.arc = Some(ArcParams {
                i: non_zero(record.i),
                j: non_zero(record.j),
                k: non_zero(record.k),
                turns: (record.rot != 1).then_some(record.rot),
            });
        }

        Ok(Some(verdict))
    }
}

fn validate(index: usize, record: &PositionRecord) -> Result<(), ExportError> {
    let is_arc = record.state.motion_mode.is_arc();
    for (field, value) in record.numeric_fields() {
        let arc_only = matches!(field, "i" | "j" | "k");
        if (is_arc || !arc_only) && !value.is_finite() {
            return Err(ExportError::NonFiniteValue { index, field });
        }
    }
    Ok(())
}
