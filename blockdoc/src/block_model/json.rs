//! Lenient JSON mapping for blocks
//!
//! Editor widgets hand over loosely shaped `data` objects. A block is first
//! read as a [`RawBlock`] (type name plus untyped data) and then mapped onto
//! [`Block`], taking a fixed default for every field that is missing or of
//! the wrong JSON type.

use super::blocks::{
    normalize_level, Block, ChecklistItem, ListStyle, DEFAULT_CODE_LANGUAGE, DEFAULT_HEADER_LEVEL,
};
use super::kind::BlockKind;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Wire form of a block: `{"type": ..., "data": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawBlock {
    /// Block type name (missing type reads as "")
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Untyped payload
    #[serde(default)]
    pub data: Value,
}

impl From<Value> for RawBlock {
    /// Read any JSON value as a block: a non-string `type` reads as "" and a
    /// value that is not an object is a block with no type and no data
    fn from(value: Value) -> Self {
        match value {
            Value::Object(mut map) => RawBlock {
                kind: map
                    .get("type")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                data: map.remove("data").unwrap_or_default(),
            },
            _ => RawBlock {
                kind: String::new(),
                data: Value::Null,
            },
        }
    }
}

impl From<Value> for Block {
    fn from(value: Value) -> Self {
        Block::from(RawBlock::from(value))
    }
}

impl From<RawBlock> for Block {
    fn from(raw: RawBlock) -> Self {
        let data = &raw.data;
        match BlockKind::from_type_name(&raw.kind) {
            BlockKind::Header => Block::Header {
                text: string_field(data, "text"),
                level: level_field(data),
            },
            BlockKind::Paragraph => Block::Paragraph {
                text: string_field(data, "text"),
            },
            BlockKind::List => Block::List {
                items: array_field(data, "items").iter().map(list_item_text).collect(),
                style: if data.get("style").and_then(Value::as_str) == Some("ordered") {
                    ListStyle::Ordered
                } else {
                    ListStyle::Unordered
                },
            },
            BlockKind::Checklist => Block::Checklist {
                items: array_field(data, "items")
                    .iter()
                    .map(|item| ChecklistItem {
                        text: string_field(item, "text"),
                        checked: item.get("checked").is_some_and(is_truthy),
                    })
                    .collect(),
            },
            BlockKind::Quote => Block::Quote {
                text: string_field(data, "text"),
                caption: string_field(data, "caption"),
            },
            BlockKind::Warning => Block::Warning {
                title: string_field(data, "title"),
                message: string_field(data, "message"),
            },
            BlockKind::Code => Block::Code {
                code: string_field(data, "code"),
                language: non_empty_field(data, "language")
                    .unwrap_or_else(|| DEFAULT_CODE_LANGUAGE.to_string()),
            },
            BlockKind::Delimiter => Block::Delimiter,
            BlockKind::Image => Block::Image {
                url: non_empty_field(data, "url")
                    .or_else(|| data.get("file").and_then(|file| non_empty_field(file, "url")))
                    .unwrap_or_default(),
                caption: non_empty_field(data, "caption")
                    .or_else(|| non_empty_field(data, "alt"))
                    .unwrap_or_default(),
            },
            BlockKind::Table => Block::Table {
                content: array_field(data, "content")
                    .iter()
                    .map(|row| {
                        row.as_array()
                            .map(|cells| cells.iter().map(scalar_text).collect())
                            .unwrap_or_default()
                    })
                    .collect(),
            },
            BlockKind::Unknown => Block::Unknown {
                kind: raw.kind,
                data: match raw.data {
                    Value::Object(map) => map,
                    _ => Map::new(),
                },
            },
        }
    }
}

impl From<Block> for RawBlock {
    fn from(block: Block) -> Self {
        let kind = block.kind();
        let data = match block {
            Block::Header { text, level } => json!({ "text": text, "level": level }),
            Block::Paragraph { text } => json!({ "text": text }),
            Block::List { items, style } => json!({ "items": items, "style": style.as_str() }),
            Block::Checklist { items } => json!({ "items": items }),
            Block::Quote { text, caption } => json!({ "text": text, "caption": caption }),
            Block::Warning { title, message } => json!({ "title": title, "message": message }),
            Block::Code { code, language } => json!({ "code": code, "language": language }),
            Block::Delimiter => json!({}),
            Block::Image { url, caption } => json!({ "url": url, "caption": caption }),
            Block::Table { content } => json!({ "content": content }),
            Block::Unknown { kind, data } => {
                return RawBlock {
                    kind,
                    data: Value::Object(data),
                }
            }
        };
        RawBlock {
            kind: kind.as_str().to_string(),
            data,
        }
    }
}

/// Text form of a scalar JSON value; objects, arrays and null read as ""
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Fallback text of an unrecognized block: `data.text` as a scalar, or ""
pub(crate) fn unknown_text(data: &Map<String, Value>) -> String {
    data.get("text").map(scalar_text).unwrap_or_default()
}

/// Read a text field, "" when missing
fn string_field(data: &Value, key: &str) -> String {
    data.get(key).map(scalar_text).unwrap_or_default()
}

/// Read a text field, `None` when missing or empty
fn non_empty_field(data: &Value, key: &str) -> Option<String> {
    Some(string_field(data, key)).filter(|s| !s.is_empty())
}

fn array_field<'a>(data: &'a Value, key: &str) -> &'a [Value] {
    data.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Heading level from a number or numeric string
fn level_field(data: &Value) -> u8 {
    let level = match data.get("level") {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 1.0).map(|f| f as u64)),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    level.map_or(DEFAULT_HEADER_LEVEL, normalize_level)
}

/// A list item is either a plain string or an object with `text`/`content`
fn list_item_text(item: &Value) -> String {
    match item {
        Value::String(s) => s.clone(),
        Value::Object(_) => non_empty_field(item, "text")
            .or_else(|| non_empty_field(item, "content"))
            .unwrap_or_default(),
        _ => String::new(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
        Value::Null => false,
    }
}
