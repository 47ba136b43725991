//! Instruction group emission
//!
//! Standalone modal commands each get their own single-token group so they
//! stay visible as independent commands. Everything belonging to the move
//! itself goes into one combined group, which is dropped when empty.

use gcemit_core::{ArcAxis, Axis, Block, Token};

use crate::detector::Verdict;

/// Turns detector verdicts into instruction groups
#[derive(Debug, Clone, Copy, Default)]
pub struct InstructionEmitter;

impl InstructionEmitter {
    pub fn new() -> Self {
        Self
    }

    /// Groups for one record, in output order
    ///
    /// Standalone groups come first: spindle, coolant, feed rate, spindle
    /// speed. The move group follows with plane, motion mode, X/Y/Z and, for
    /// arcs, I/J/K and turn count.
    pub fn emit(&self, verdict: &Verdict) -> Vec<Block> {
        let mut blocks = Vec::new();

        if let Some(command) = verdict.spindle {
            blocks.push(Block::single(Token::Spindle(command)));
        }
        for &command in &verdict.coolant {
            blocks.push(Block::single(Token::Coolant(command)));
        }
        if let Some(feedrate) = verdict.feedrate {
            blocks.push(Block::single(Token::Feedrate(feedrate)));
        }
        if let Some(speed) = verdict.spindle_speed {
            blocks.push(Block::single(Token::SpindleSpeed(speed)));
        }

        let move_block = self.move_block(verdict);
        if !move_block.is_empty() {
            blocks.push(move_block);
        }

        blocks
    }

    fn move_block(&self, verdict: &Verdict) -> Block {
        let mut block = Block::new();

        if let Some(plane) = verdict.plane {
            block.push(Token::Plane(plane));
        }
        if let Some(mode) = verdict.motion {
            block.push(Token::Motion(mode));
        }

        let axes = [(Axis::X, verdict.x), (Axis::Y, verdict.y), (Axis::Z, verdict.z)];
        for (axis, value) in axes {
            if let Some(value) = value {
                block.push(Token::Axis(axis, value));
            }
        }

        if let Some(arc) = verdict.arc {
            let offsets = [(ArcAxis::I, arc.i), (ArcAxis::J, arc.j), (ArcAxis::K, arc.k)];
            for (axis, value) in offsets {
                if let Some(value) = value {
                    block.push(Token::ArcOffset(axis, value));
                }
            }
            if let Some(turns) = arc.turns {
                block.push(Token::Turns(turns));
            }
        }

        block
    }
}
