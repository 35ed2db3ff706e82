//! Block kind discriminator

use std::fmt;

/// The kind of a block, without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BlockKind {
    /// `header`
    Header,
    /// `paragraph`
    Paragraph,
    /// `list`
    List,
    /// `checklist`
    Checklist,
    /// `quote`
    Quote,
    /// `warning`
    Warning,
    /// `code`
    Code,
    /// `delimiter`
    Delimiter,
    /// `image`
    Image,
    /// `table`
    Table,
    /// Any unrecognized `type`
    Unknown,
}

impl BlockKind {
    /// All kinds, in declaration order
    pub const ALL: [BlockKind; 11] = [
        BlockKind::Header,
        BlockKind::Paragraph,
        BlockKind::List,
        BlockKind::Checklist,
        BlockKind::Quote,
        BlockKind::Warning,
        BlockKind::Code,
        BlockKind::Delimiter,
        BlockKind::Image,
        BlockKind::Table,
        BlockKind::Unknown,
    ];

    /// Look up a kind by its JSON `type` name
    ///
    /// Returns `Unknown` for names that are not recognized.
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "header" => BlockKind::Header,
            "paragraph" => BlockKind::Paragraph,
            "list" => BlockKind::List,
            "checklist" => BlockKind::Checklist,
            "quote" => BlockKind::Quote,
            "warning" => BlockKind::Warning,
            "code" => BlockKind::Code,
            "delimiter" => BlockKind::Delimiter,
            "image" => BlockKind::Image,
            "table" => BlockKind::Table,
            _ => BlockKind::Unknown,
        }
    }

    /// JSON `type` name of this kind
    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::Header => "header",
            BlockKind::Paragraph => "paragraph",
            BlockKind::List => "list",
            BlockKind::Checklist => "checklist",
            BlockKind::Quote => "quote",
            BlockKind::Warning => "warning",
            BlockKind::Code => "code",
            BlockKind::Delimiter => "delimiter",
            BlockKind::Image => "image",
            BlockKind::Table => "table",
            BlockKind::Unknown => "unknown",
        }
    }

    /// Whether HTML serialization of this kind can parse back to the same kind
    ///
    /// Only header, paragraph, list, delimiter and image qualify. A paragraph
    /// still disappears when its text is blank, since `<p></p>` yields no
    /// block.
    pub fn is_round_trip_safe(self) -> bool {
        matches!(
            self,
            BlockKind::Header
                | BlockKind::Paragraph
                | BlockKind::List
                | BlockKind::Delimiter
                | BlockKind::Image
        )
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
