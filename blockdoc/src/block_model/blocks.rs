//! Block-level content elements
//!
//! This module defines the structured representation of a post body at the
//! block level (headers, paragraphs, lists, code, images, etc.). Each variant
//! carries only the fields of its own block type.

use super::json::{unknown_text, RawBlock};
use super::kind::BlockKind;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Default heading level when none (or an invalid one) is given
pub const DEFAULT_HEADER_LEVEL: u8 = 2;

/// Default language for code blocks without a language
pub const DEFAULT_CODE_LANGUAGE: &str = "javascript";

/// A single structural unit of content
///
/// The JSON form is `{"type": "<kind>", "data": {...}}`, the shape editor
/// widgets exchange. Deserialization never rejects a block for missing or
/// mistyped fields; those take the defaults documented on each variant.
/// Entries with a missing or non-string `type`, and entries that are not
/// objects at all, read as [`Block::Unknown`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "RawBlock")]
pub enum Block {
    /// A section heading
    Header {
        /// Heading text
        text: String,
        /// Heading level, always within 1..=6 (defaults to 2)
        level: u8,
    },

    /// A plain text block
    Paragraph {
        /// Paragraph text
        text: String,
    },

    /// A bullet or numbered list
    List {
        /// Item texts in source order
        items: Vec<String>,
        /// Ordered or unordered
        style: ListStyle,
    },

    /// A task list
    Checklist {
        /// Checklist entries in source order
        items: Vec<ChecklistItem>,
    },

    /// A blockquote with an optional citation
    Quote {
        /// Quoted text
        text: String,
        /// Citation (empty when absent)
        caption: String,
    },

    /// A callout box
    Warning {
        /// Callout title
        title: String,
        /// Callout body
        message: String,
    },

    /// A fenced code block
    Code {
        /// Raw code content
        code: String,
        /// Language name (defaults to "javascript")
        language: String,
    },

    /// A horizontal rule / section break
    Delimiter,

    /// A single image reference
    Image {
        /// Image source URL
        url: String,
        /// Caption, emitted as alt text
        caption: String,
    },

    /// A row-major grid of cell text
    Table {
        /// Rows of cells
        content: Vec<Vec<String>>,
    },

    /// A block whose type is not recognized
    ///
    /// Kept verbatim so the document re-serializes to JSON without loss.
    Unknown {
        /// The original `type` value
        kind: String,
        /// The original `data` object
        data: serde_json::Map<String, serde_json::Value>,
    },
}

impl Block {
    /// Create a paragraph block
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph { text: text.into() }
    }

    /// Create a header block, clamping the level into 1..=6
    ///
    /// A level of 0 is treated as missing and becomes the default level 2.
    pub fn header(text: impl Into<String>, level: u8) -> Self {
        Block::Header {
            text: text.into(),
            level: normalize_level(u64::from(level)),
        }
    }

    /// Create a list block
    pub fn list<I, S>(items: I, style: ListStyle) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Block::List {
            items: items.into_iter().map(Into::into).collect(),
            style,
        }
    }

    /// Create an image block
    pub fn image(url: impl Into<String>, caption: impl Into<String>) -> Self {
        Block::Image {
            url: url.into(),
            caption: caption.into(),
        }
    }

    /// Get the kind of this block
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Header { .. } => BlockKind::Header,
            Block::Paragraph { .. } => BlockKind::Paragraph,
            Block::List { .. } => BlockKind::List,
            Block::Checklist { .. } => BlockKind::Checklist,
            Block::Quote { .. } => BlockKind::Quote,
            Block::Warning { .. } => BlockKind::Warning,
            Block::Code { .. } => BlockKind::Code,
            Block::Delimiter => BlockKind::Delimiter,
            Block::Image { .. } => BlockKind::Image,
            Block::Table { .. } => BlockKind::Table,
            Block::Unknown { .. } => BlockKind::Unknown,
        }
    }

    /// Collect every human-readable text field of this block
    ///
    /// Used for word counts. URLs and code languages are not text.
    pub fn text_fields(&self) -> Vec<Cow<'_, str>> {
        match self {
            Block::Header { text, .. } | Block::Paragraph { text } => {
                vec![Cow::Borrowed(text.as_str())]
            }
            Block::List { items, .. } => items
                .iter()
                .map(|item| Cow::Borrowed(item.as_str()))
                .collect(),
            Block::Checklist { items } => items
                .iter()
                .map(|item| Cow::Borrowed(item.text.as_str()))
                .collect(),
            Block::Quote { text, caption } => {
                vec![Cow::Borrowed(text.as_str()), Cow::Borrowed(caption.as_str())]
            }
            Block::Warning { title, message } => {
                vec![Cow::Borrowed(title.as_str()), Cow::Borrowed(message.as_str())]
            }
            Block::Code { code, .. } => vec![Cow::Borrowed(code.as_str())],
            Block::Delimiter => Vec::new(),
            Block::Image { caption, .. } => vec![Cow::Borrowed(caption.as_str())],
            Block::Table { content } => content
                .iter()
                .flatten()
                .map(|cell| Cow::Borrowed(cell.as_str()))
                .collect(),
            Block::Unknown { data, .. } => vec![Cow::Owned(unknown_text(data))],
        }
    }
}

/// List numbering style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    /// Numbered list (`<ol>`)
    Ordered,
    /// Bullet list (`<ul>`)
    #[default]
    Unordered,
}

impl ListStyle {
    /// Name used in block JSON
    pub fn as_str(self) -> &'static str {
        match self {
            ListStyle::Ordered => "ordered",
            ListStyle::Unordered => "unordered",
        }
    }

    /// HTML list element for this style
    pub fn tag(self) -> &'static str {
        match self {
            ListStyle::Ordered => "ol",
            ListStyle::Unordered => "ul",
        }
    }
}

/// One entry of a checklist
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// Entry text
    pub text: String,
    /// Whether the entry is ticked
    pub checked: bool,
}

impl ChecklistItem {
    /// Create a checklist item
    pub fn new(text: impl Into<String>, checked: bool) -> Self {
        Self {
            text: text.into(),
            checked,
        }
    }
}

/// Map a raw heading level onto 1..=6
///
/// 0 means "missing" and yields the default level; anything above 6 is
/// clamped to 6.
pub(crate) fn normalize_level(level: u64) -> u8 {
    match u8::try_from(level) {
        Ok(0) => DEFAULT_HEADER_LEVEL,
        Ok(level @ 1..=6) => level,
        _ => 6,
    }
}
