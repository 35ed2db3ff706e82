//! Round-trip diagnostics
//!
//! Serializes a document to HTML, parses it back and reports where the block
//! structure changed. Header, list, delimiter and image blocks come back as
//! the same kind, as do paragraphs with visible text. Every other block is
//! listed with the reason.

use crate::block_model::{Block, BlockDocument, BlockKind};
use crate::html_exporter::blocks_to_html;
use crate::html_parser::html_to_blocks;
use itertools::{EitherOrBoth, Itertools};
use std::fmt;

/// A block that does not survive an HTML round trip as-is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LossyBlock {
    /// Position of the block in the original document
    pub index: usize,
    /// Kind of the original block
    pub kind: BlockKind,
    /// What happens to it
    pub reason: &'static str,
}

/// Outcome of [`check`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundTripReport {
    /// Block kinds of the original document
    pub original: Vec<BlockKind>,
    /// Block kinds after HTML serialization and re-parsing
    pub reparsed: Vec<BlockKind>,
    /// Original blocks whose kind is not round-trip safe
    pub lossy: Vec<LossyBlock>,
}

impl RoundTripReport {
    /// True when the re-parsed document has the same kind sequence
    pub fn is_structurally_stable(&self) -> bool {
        self.original == self.reparsed
    }

    /// Index of the first position where the kind sequences differ
    pub fn first_divergence(&self) -> Option<usize> {
        self.original
            .iter()
            .zip_longest(self.reparsed.iter())
            .position(|pair| match pair {
                EitherOrBoth::Both(a, b) => a != b,
                EitherOrBoth::Left(_) | EitherOrBoth::Right(_) => true,
            })
    }
}

impl fmt::Display for RoundTripReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} blocks in, {} blocks out",
            self.original.len(),
            self.reparsed.len()
        )?;
        match self.first_divergence() {
            None => writeln!(f, "Block structure is stable")?,
            Some(index) => writeln!(f, "Block structure diverges at index {}", index)?,
        }
        for block in &self.lossy {
            writeln!(f, "  [{}] {}: {}", block.index, block.kind, block.reason)?;
        }
        Ok(())
    }
}

/// Run a document through HTML and back
pub fn check(doc: &BlockDocument) -> RoundTripReport {
    let reparsed = html_to_blocks(&blocks_to_html(doc));

    let lossy = doc
        .iter()
        .enumerate()
        .filter_map(|(index, block)| {
            lossy_reason(block).map(|reason| LossyBlock {
                index,
                kind: block.kind(),
                reason,
            })
        })
        .collect();

    RoundTripReport {
        original: doc.kinds(),
        reparsed: reparsed.kinds(),
        lossy,
    }
}

/// Why a block is not preserved, or `None` if it is
fn lossy_reason(block: &Block) -> Option<&'static str> {
    match block.kind() {
        BlockKind::Paragraph => match block {
            Block::Paragraph { text } if text.trim().is_empty() => {
                Some("blank paragraphs are dropped when parsed")
            }
            _ => None,
        },
        BlockKind::Header | BlockKind::List | BlockKind::Delimiter | BlockKind::Image => None,
        BlockKind::Quote => Some("empty quote text is replaced by the citation text"),
        BlockKind::Checklist => Some("checklist markup parses back as a plain unordered list"),
        BlockKind::Code => Some("language survives only through the language- class prefix"),
        BlockKind::Table => Some("table cells parse back as separate paragraphs"),
        BlockKind::Warning => Some("callout parses back as a heading and a paragraph"),
        BlockKind::Unknown => Some("unknown blocks are rendered as paragraphs"),
    }
}
