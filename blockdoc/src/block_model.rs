//! Block document model
//!
//! This module defines the ordered block list exchanged with editor widgets
//! and produced by the HTML parser.

use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

// Submodules
mod blocks;
mod error;
mod json;
mod kind;

// Re-export public types
pub use blocks::{Block, ChecklistItem, ListStyle, DEFAULT_CODE_LANGUAGE, DEFAULT_HEADER_LEVEL};
pub use error::DocumentJsonError;
pub use json::RawBlock;
pub(crate) use json::unknown_text;
pub use kind::BlockKind;

/// An ordered sequence of blocks in reading order
///
/// JSON form: `{"blocks": [...]}`. Extra top-level keys written by editors
/// (`time`, `version`) are ignored, and a missing, `null` or non-array
/// `blocks` reads as an empty document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockDocument {
    /// Blocks in document order
    #[serde(default, deserialize_with = "lenient_blocks")]
    pub blocks: Vec<Block>,
}

impl BlockDocument {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from a list of blocks
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Parse a document from its JSON form
    ///
    /// # Returns
    /// * `Ok(BlockDocument)` - Parsed document; malformed blocks degrade to defaults
    /// * `Err(DocumentJsonError)` - Input is not JSON or not a JSON object
    pub fn from_json(input: &str) -> Result<Self, DocumentJsonError> {
        let value: serde_json::Value = serde_json::from_str(input)?;
        let found = match &value {
            serde_json::Value::Object(_) => return Ok(serde_json::from_value(value)?),
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "a boolean",
            serde_json::Value::Number(_) => "a number",
            serde_json::Value::String(_) => "a string",
            serde_json::Value::Array(_) => "an array",
        };
        Err(DocumentJsonError::NotAnObject { found })
    }

    /// Render the document as JSON
    pub fn to_json(&self, pretty: bool) -> String {
        let rendered = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        // Serializing string-keyed maps and plain values cannot fail
        rendered.unwrap_or_default()
    }

    /// Number of blocks
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document has no blocks
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterate over the blocks in order
    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    /// Kinds of all blocks, in order
    pub fn kinds(&self) -> Vec<BlockKind> {
        self.blocks.iter().map(Block::kind).collect()
    }

    /// Count the blocks of one kind
    pub fn count(&self, kind: BlockKind) -> usize {
        self.blocks.iter().filter(|b| b.kind() == kind).count()
    }

    /// Count blocks per kind (kinds with no blocks are omitted)
    pub fn kind_counts(&self) -> BTreeMap<BlockKind, usize> {
        self.blocks.iter().map(Block::kind).counts().into_iter().collect()
    }

    /// Count whitespace-separated words across all text fields
    pub fn word_count(&self) -> usize {
        self.blocks
            .iter()
            .flat_map(Block::text_fields)
            .map(|text| text.split_whitespace().count())
            .sum()
    }
}

impl From<Vec<Block>> for BlockDocument {
    fn from(blocks: Vec<Block>) -> Self {
        Self::from_blocks(blocks)
    }
}

impl<'a> IntoIterator for &'a BlockDocument {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Read `blocks` leniently: anything but an array is an empty document
fn lenient_blocks<'de, D>(deserializer: D) -> Result<Vec<Block>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Array(entries) => entries.into_iter().map(Block::from).collect(),
        _ => Vec::new(),
    })
}
