//! Instruction tokens, groups and documents
//!
//! The exporter produces typed tokens. Modal attributes stay as closed enums
//! until [`Token::wire`] converts them to the `<Letter><Number>` pairs an
//! external serializer writes out.

use serde::{Deserialize, Serialize};

use crate::state::{MotionMode, Plane};

/// Linear axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Word letter for this axis
    pub fn letter(self) -> char {
        match self {
            Self::X => 'X',
            Self::Y => 'Y',
            Self::Z => 'Z',
        }
    }
}

/// Arc center offset axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArcAxis {
    I,
    J,
    K,
}

impl ArcAxis {
    /// Word letter for this offset
    pub fn letter(self) -> char {
        match self {
            Self::I => 'I',
            Self::J => 'J',
            Self::K => 'K',
        }
    }
}

/// Spindle control command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpindleCommand {
    /// Start clockwise (M3)
    Clockwise,
    /// Start counter-clockwise (M4)
    CounterClockwise,
    /// Stop (M5)
    Stop,
}

impl SpindleCommand {
    /// M-code number
    pub fn mcode(self) -> u8 {
        match self {
            Self::Clockwise => 3,
            Self::CounterClockwise => 4,
            Self::Stop => 5,
        }
    }
}

/// Coolant control command
///
/// Controllers only offer a joint "all off"; there is no per-channel disable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoolantCommand {
    /// Mist on (M7)
    Mist,
    /// Flood on (M8)
    Flood,
    /// All coolant off (M9)
    AllOff,
}

impl CoolantCommand {
    /// M-code number
    pub fn mcode(self) -> u8 {
        match self {
            Self::Mist => 7,
            Self::Flood => 8,
            Self::AllOff => 9,
        }
    }
}

/// Wire form of a token as consumed by a serializer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Wire<'a> {
    /// `<Letter><Number>` word
    Word { letter: char, value: f64 },
    /// Free-text comment
    Comment(&'a str),
}

/// A single command unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Token {
    /// Free-text comment
    Comment(String),
    /// Millimeter units (G21)
    MetricUnits,
    /// Absolute distance mode (G90)
    AbsoluteDistance,
    /// Units-per-minute feed rate mode (G94)
    FeedPerMinute,
    /// Cutter radius compensation off (G40)
    CutterCompensationOff,
    /// Spindle start/stop
    Spindle(SpindleCommand),
    /// Coolant on/off
    Coolant(CoolantCommand),
    /// Feed rate (F)
    Feedrate(f64),
    /// Spindle speed (S)
    SpindleSpeed(f64),
    /// Plane selection
    Plane(Plane),
    /// Motion mode
    Motion(MotionMode),
    /// Absolute axis coordinate
    Axis(Axis, f64),
    /// Relative arc center offset
    ArcOffset(ArcAxis, f64),
    /// Arc turn count (P)
    Turns(i32),
}

impl Token {
    /// Create a comment token
    pub fn comment(text: impl Into<String>) -> Self {
        Self::Comment(text.into())
    }

    /// Convert to the serializer's wire form
    ///
    /// Returns `None` only for `Motion(MotionMode::Initial)`, which the
    /// exporter never produces.
    pub fn wire(&self) -> Option<Wire<'_>> {
        let word = |letter: char, value: f64| Some(Wire::Word { letter, value });
        match self {
            Self::Comment(text) => Some(Wire::Comment(text.as_str())),
            Self::MetricUnits => word('G', 21.0),
            Self::AbsoluteDistance => word('G', 90.0),
            Self::FeedPerMinute => word('G', 94.0),
            Self::CutterCompensationOff => word('G', 40.0),
            Self::Spindle(cmd) => word('M', f64::from(cmd.mcode())),
            Self::Coolant(cmd) => word('M', f64::from(cmd.mcode())),
            Self::Feedrate(value) => word('F', *value),
            Self::SpindleSpeed(value) => word('S', *value),
            Self::Plane(plane) => word('G', f64::from(plane.gcode_number())),
            Self::Motion(mode) => mode.gcode_number().and_then(|n| word('G', f64::from(n))),
            Self::Axis(axis, value) => word(axis.letter(), *value),
            Self::ArcOffset(axis, value) => word(axis.letter(), *value),
            Self::Turns(turns) => word('P', f64::from(*turns)),
        }
    }

    /// Whether this is a comment
    pub fn is_comment(&self) -> bool {
        matches!(self, Self::Comment(_))
    }
}

/// Instruction group: tokens emitted together as one line
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Block {
    tokens: Vec<Token>,
}

impl Block {
    /// Create an empty block
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a block holding exactly one token
    pub fn single(token: Token) -> Self {
        Self {
            tokens: vec![token],
        }
    }

    /// Append a token
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Tokens in emission order
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }
}

impl From<Vec<Token>> for Block {
    fn from(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }
}

impl<'a> IntoIterator for &'a Block {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// Ordered sequence of instruction groups
///
/// Append-only while being assembled; read-only once handed out.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block
    pub fn append_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Blocks in output order
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    /// All tokens of all blocks, in order
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.blocks.iter().flat_map(Block::iter)
    }

    /// Consume the document, returning its blocks
    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
