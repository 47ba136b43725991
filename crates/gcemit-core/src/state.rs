//! Machine state model
//!
//! The modal context and positional record produced by the execution engine
//! for every step of a motion program. Pure data: the exporter reads these
//! records and never mutates them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Active move type
///
/// `Initial` marks the machine's starting condition before any move was
/// executed. It carries no actionable command and has no wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionMode {
    /// Pre-program machine condition
    #[default]
    Initial,
    /// Rapid positioning (G0)
    Rapid,
    /// Linear interpolation (G1)
    Linear,
    /// Clockwise arc (G2)
    ArcCw,
    /// Counter-clockwise arc (G3)
    ArcCcw,
}

impl MotionMode {
    /// G-code number for this mode, `None` for [`MotionMode::Initial`]
    pub fn gcode_number(self) -> Option<u8> {
        match self {
            Self::Initial => None,
            Self::Rapid => Some(0),
            Self::Linear => Some(1),
            Self::ArcCw => Some(2),
            Self::ArcCcw => Some(3),
        }
    }

    /// Whether this mode interpolates an arc
    pub fn is_arc(self) -> bool {
        matches!(self, Self::ArcCw | Self::ArcCcw)
    }

    /// Label used by the diagnostic dump
    pub fn label(self) -> &'static str {
        match self {
            Self::Initial => "initial pos",
            Self::Rapid => "rapid move",
            Self::Linear => "linear move",
            Self::ArcCw => "clockwise arc",
            Self::ArcCcw => "counterclockwise arc",
        }
    }
}

impl fmt::Display for MotionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.gcode_number() {
            Some(n) => write!(f, "G{}", n),
            None => write!(f, "Initial"),
        }
    }
}

/// Arc interpolation plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Plane {
    /// XY plane (G17)
    #[default]
    Xy,
    /// XZ plane (G18)
    Xz,
    /// YZ plane (G19)
    Yz,
}

impl Plane {
    /// G-code number for this plane
    pub fn gcode_number(self) -> u8 {
        match self {
            Self::Xy => 17,
            Self::Xz => 18,
            Self::Yz => 19,
        }
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G{}", self.gcode_number())
    }
}

/// Modal machine context active for a record
///
/// `spindle_clockwise` only matters while `spindle_enabled` is set.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineState {
    /// Motion mode
    pub motion_mode: MotionMode,
    /// Arc plane
    pub plane: Plane,
    /// Feed rate (units per minute)
    pub feedrate: f64,
    /// Spindle speed (RPM)
    pub spindle_speed: f64,
    /// Spindle running
    pub spindle_enabled: bool,
    /// Spindle direction when running
    pub spindle_clockwise: bool,
    /// Flood coolant on
    pub flood_coolant: bool,
    /// Mist coolant on
    pub mist_coolant: bool,
}

impl MachineState {
    /// Create a state in the given motion mode with everything else at rest
    pub fn new(motion_mode: MotionMode) -> Self {
        Self {
            motion_mode,
            ..Self::default()
        }
    }

    /// Set the plane
    pub fn with_plane(mut self, plane: Plane) -> Self {
        self.plane = plane;
        self
    }

    /// Set the feed rate
    pub fn with_feedrate(mut self, feedrate: f64) -> Self {
        self.feedrate = feedrate;
        self
    }

    /// Start the spindle at `speed` in the given direction
    pub fn with_spindle(mut self, speed: f64, clockwise: bool) -> Self {
        self.spindle_speed = speed;
        self.spindle_enabled = true;
        self.spindle_clockwise = clockwise;
        self
    }

    /// Set both coolant flags
    pub fn with_coolant(mut self, flood: bool, mist: bool) -> Self {
        self.flood_coolant = flood;
        self.mist_coolant = mist;
        self
    }
}

fn default_rot() -> i32 {
    1
}

/// Absolute position plus the modal context it was reached under
///
/// `i`, `j`, `k` and `rot` are only meaningful for arc motion modes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Arc center offset along X, relative to the start point
    #[serde(default)]
    pub i: f64,
    /// Arc center offset along Y, relative to the start point
    #[serde(default)]
    pub j: f64,
    /// Arc center offset along Z, relative to the start point
    #[serde(default)]
    pub k: f64,
    /// Number of full turns for an arc
    #[serde(default = "default_rot")]
    pub rot: i32,
    /// Modal context for this record
    #[serde(default)]
    pub state: MachineState,
}

impl PositionRecord {
    /// Create a record with no arc parameters
    pub fn new(x: f64, y: f64, z: f64, state: MachineState) -> Self {
        Self {
            x,
            y,
            z,
            i: 0.0,
            j: 0.0,
            k: 0.0,
            rot: default_rot(),
            state,
        }
    }

    /// Record for the machine's starting condition
    pub fn initial() -> Self {
        Self::new(0.0, 0.0, 0.0, MachineState::new(MotionMode::Initial))
    }

    /// Set the arc center offsets and turn count
    pub fn with_arc(mut self, i: f64, j: f64, k: f64, rot: i32) -> Self {
        self.i = i;
        self.j = j;
        self.k = k;
        self.rot = rot;
        self
    }

    /// Numeric fields paired with their names, in a fixed order
    pub fn numeric_fields(&self) -> [(&'static str, f64); 8] {
        [
            ("x", self.x),
            ("y", self.y),
            ("z", self.z),
            ("i", self.i),
            ("j", self.j),
            ("k", self.k),
            ("feedrate", self.state.feedrate),
            ("spindle_speed", self.state.spindle_speed),
        ]
    }
}

impl Default for PositionRecord {
    fn default() -> Self {
        Self::initial()
    }
}

/// Ordered sequence of records produced by the execution engine
pub type Trace = Vec<PositionRecord>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motion_mode_numbers() {
        assert_eq!(MotionMode::Initial.gcode_number(), None);
        assert_eq!(MotionMode::Rapid.gcode_number(), Some(0));
        assert_eq!(MotionMode::Linear.gcode_number(), Some(1));
        assert_eq!(MotionMode::ArcCw.gcode_number(), Some(2));
        assert_eq!(MotionMode::ArcCcw.gcode_number(), Some(3));
    }

    #[test]
    fn test_enum_defaults() {
        assert_eq!(MotionMode::default(), MotionMode::Initial);
        assert_eq!(Plane::default(), Plane::Xy);
        assert_eq!(MachineState::default().plane, Plane::Xy);
    }

    #[test]
    fn test_only_arcs_are_arcs() {
        assert!(MotionMode::ArcCw.is_arc());
        assert!(MotionMode::ArcCcw.is_arc());
        assert!(!MotionMode::Linear.is_arc());
        assert!(!MotionMode::Rapid.is_arc());
        assert!(!MotionMode::Initial.is_arc());
    }

    #[test]
    fn test_plane_numbers() {
        assert_eq!(Plane::Xy.gcode_number(), 17);
        assert_eq!(Plane::Xz.gcode_number(), 18);
        assert_eq!(Plane::Yz.gcode_number(), 19);
        assert_eq!(Plane::Yz.to_string(), "G19");
    }

    #[test]
    fn test_record_defaults_from_json() {
        let json = r#"{"x": 1.0, "y": 2.0, "z": 3.0,
            "state": {"motion_mode": "arc_cw", "plane": "xz", "feedrate": 50.0}}"#;
        let record: PositionRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.rot, 1);
        assert_eq!(record.i, 0.0);
        assert_eq!(record.state.motion_mode, MotionMode::ArcCw);
        assert_eq!(record.state.plane, Plane::Xz);
        assert!(!record.state.spindle_enabled);
    }

    #[test]
    fn test_unknown_motion_mode_is_rejected() {
        let json = r#"{"x": 0, "y": 0, "z": 0, "state": {"motion_mode": "helix"}}"#;
        assert!(serde_json::from_str::<PositionRecord>(json).is_err());
    }

    #[test]
    fn test_builders() {
        let state = MachineState::new(MotionMode::Linear)
            .with_feedrate(100.0)
            .with_spindle(1000.0, false)
            .with_coolant(true, false);
        assert_eq!(state.feedrate, 100.0);
        assert!(state.spindle_enabled);
        assert!(!state.spindle_clockwise);
        assert!(state.flood_coolant);

        let record = PositionRecord::new(1.0, 2.0, 3.0, state).with_arc(0.0, 5.0, 0.0, 2);
        assert_eq!(record.j, 5.0);
        assert_eq!(record.rot, 2);
    }
}
