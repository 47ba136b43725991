//! Document assembly
//!
//! Writes the fixed preamble and appends emitted groups in trace order.

use gcemit_core::{Block, Document, Token};
use serde::{Deserialize, Serialize};

/// Comment written at the top of every exported document
pub const DEFAULT_HEADER_COMMENT: &str = "Exported by gcemit";

/// Preamble options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Identifying comment, first group of the document
    pub header_comment: String,
    /// Emit the millimeter units word (G21)
    pub emit_units: bool,
    /// Emit cutter compensation off (G40)
    pub emit_cutter_compensation_off: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            header_comment: DEFAULT_HEADER_COMMENT.to_string(),
            emit_units: true,
            emit_cutter_compensation_off: false,
        }
    }
}

/// Append-only document builder
#[derive(Debug, Clone)]
pub struct DocumentAssembler {
    document: Document,
}

impl DocumentAssembler {
    /// Start a document with the preamble for `options`
    pub fn new(options: &ExportOptions) -> Self {
        let mut document = Document::new();
        document.append_block(Block::single(Token::comment(options.header_comment.as_str())));

        let mut header = Block::new();
        if options.emit_units {
            header.push(Token::MetricUnits);
        }
        if options.emit_cutter_compensation_off {
            header.push(Token::CutterCompensationOff);
        }
        header.push(Token::AbsoluteDistance);
        header.push(Token::FeedPerMinute);
        document.append_block(header);

        Self { document }
    }

    /// Append groups verbatim, skipping empty ones
    pub fn append<I>(&mut self, blocks: I)
    where
        I: IntoIterator<Item = Block>,
    {
        for block in blocks.into_iter().filter(|b| !b.is_empty()) {
            self.document.append_block(block);
        }
    }

    /// Number of groups appended so far, preamble included
    pub fn len(&self) -> usize {
        self.document.len()
    }

    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    /// Finish assembly
    pub fn finish(self) -> Document {
        self.document
    }
}
