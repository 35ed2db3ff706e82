//! Block document to HTML serialization
//!
//! Each block is serialized on its own and the results are concatenated with
//! no separator. The markup mirrors what the post pages style (Tailwind
//! classes on images and tables).
//!
//! Text is interpolated verbatim unless [`HtmlOptions::escape_text`] is set:
//! stored posts rely on inline markup (links, emphasis) inside block text
//! surviving the trip.

use crate::block_model::{unknown_text, Block, BlockDocument, ChecklistItem, ListStyle};
use std::borrow::Cow;

/// Classes applied to every serialized image
pub const IMAGE_CLASSES: &str = "rounded-lg shadow-md my-6 max-w-full h-auto";

/// Classes applied to every serialized table
pub const TABLE_CLASSES: &str = "table-auto w-full border-collapse border border-gray-300";

/// Options for HTML serialization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HtmlOptions {
    /// HTML-escape interpolated text and attribute values
    pub escape_text: bool,
}

impl HtmlOptions {
    /// Options with escaping enabled
    pub fn escaped() -> Self {
        Self { escape_text: true }
    }

    /// Prepare element text for output
    fn text<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.escape_text {
            html_escape::encode_text(text)
        } else {
            Cow::Borrowed(text)
        }
    }

    /// Prepare a double-quoted attribute value for output
    fn attr<'a>(&self, value: &'a str) -> Cow<'a, str> {
        if self.escape_text {
            html_escape::encode_double_quoted_attribute(value)
        } else {
            Cow::Borrowed(value)
        }
    }
}

/// Serialize a block document to an HTML fragment without escaping
///
/// # Parameters
/// * `doc` - The document to serialize
///
/// # Returns
/// * `String` - Concatenated HTML of all blocks ("" for an empty document)
pub fn blocks_to_html(doc: &BlockDocument) -> String {
    blocks_to_html_with(doc, &HtmlOptions::default())
}

/// Serialize a block document to an HTML fragment with explicit options
pub fn blocks_to_html_with(doc: &BlockDocument, options: &HtmlOptions) -> String {
    let mut output = String::new();
    for block in doc {
        write_block(&mut output, block, options);
    }
    output
}

/// Serialize a single block
pub fn block_to_html(block: &Block, options: &HtmlOptions) -> String {
    let mut output = String::new();
    write_block(&mut output, block, options);
    output
}

/// Write a single block to the output
fn write_block(output: &mut String, block: &Block, options: &HtmlOptions) {
    match block {
        Block::Header { text, level } => {
            output.push_str(&format!(
                "<h{}>{}</h{}>",
                level,
                options.text(text),
                level
            ));
        }

        Block::Paragraph { text } => {
            output.push_str(&format!("<p>{}</p>", options.text(text)));
        }

        Block::List { items, style } => write_list(output, items, *style, options),

        Block::Checklist { items } => write_checklist(output, items, options),

        Block::Quote { text, caption } => {
            output.push_str(&format!(
                "<blockquote><p>{}</p><cite>{}</cite></blockquote>",
                options.text(text),
                options.text(caption)
            ));
        }

        Block::Warning { title, message } => {
            output.push_str(&format!(
                "<div class=\"warning\"><h4>{}</h4><p>{}</p></div>",
                options.text(title),
                options.text(message)
            ));
        }

        Block::Code { code, language } => {
            output.push_str(&format!(
                "<pre><code class=\"language-{}\">{}</code></pre>",
                options.attr(language),
                options.text(code)
            ));
        }

        Block::Delimiter => output.push_str("<hr>"),

        Block::Image { url, caption } => {
            output.push_str(&format!(
                "<img src=\"{}\" alt=\"{}\" class=\"{}\">",
                options.attr(url),
                options.attr(caption),
                IMAGE_CLASSES
            ));
        }

        Block::Table { content } => write_table(output, content, options),

        Block::Unknown { kind, data } => {
            log::debug!("Rendering unknown block type '{}' as a paragraph", kind);
            let text = unknown_text(data);
            output.push_str(&format!("<p>{}</p>", options.text(&text)));
        }
    }
}

/// Write a bullet or numbered list
fn write_list(output: &mut String, items: &[String], style: ListStyle, options: &HtmlOptions) {
    let tag = style.tag();
    output.push_str(&format!("<{}>", tag));
    for item in items {
        output.push_str(&format!("<li>{}</li>", options.text(item)));
    }
    output.push_str(&format!("</{}>", tag));
}

/// Write a checklist as a classed list of disabled checkboxes
fn write_checklist(output: &mut String, items: &[ChecklistItem], options: &HtmlOptions) {
    output.push_str("<ul class=\"checklist\">");
    for item in items {
        let checked = if item.checked { "checked" } else { "" };
        output.push_str(&format!(
            "<li><input type=\"checkbox\" {} disabled> {}</li>",
            checked,
            options.text(&item.text)
        ));
    }
    output.push_str("</ul>");
}

/// Write a table as body rows only
fn write_table(output: &mut String, content: &[Vec<String>], options: &HtmlOptions) {
    output.push_str(&format!("<table class=\"{}\"><tbody>", TABLE_CLASSES));
    for row in content {
        output.push_str("<tr>");
        for cell in row {
            output.push_str(&format!("<td>{}</td>", options.text(cell)));
        }
        output.push_str("</tr>");
    }
    output.push_str("</tbody></table>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(block: Block) -> String {
        blocks_to_html(&BlockDocument::from_blocks(vec![block]))
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(blocks_to_html(&BlockDocument::new()), "");
    }

    #[test]
    fn test_header() {
        assert_eq!(render(Block::header("Hi", 1)), "<h1>Hi</h1>");
    }

    #[test]
    fn test_paragraph() {
        assert_eq!(render(Block::paragraph("Body")), "<p>Body</p>");
    }

    #[test]
    fn test_lists() {
        assert_eq!(
            render(Block::list(["A", "B"], ListStyle::Unordered)),
            "<ul><li>A</li><li>B</li></ul>"
        );
        assert_eq!(
            render(Block::list(["1"], ListStyle::Ordered)),
            "<ol><li>1</li></ol>"
        );
        assert_eq!(
            render(Block::list(Vec::<String>::new(), ListStyle::Ordered)),
            "<ol></ol>"
        );
    }

    #[test]
    fn test_checklist() {
        let block = Block::Checklist {
            items: vec![
                ChecklistItem::new("Done", true),
                ChecklistItem::new("Todo", false),
            ],
        };
        assert_eq!(
            render(block),
            "<ul class=\"checklist\">\
             <li><input type=\"checkbox\" checked disabled> Done</li>\
             <li><input type=\"checkbox\"  disabled> Todo</li>\
             </ul>"
        );
    }

    #[test]
    fn test_quote() {
        let block = Block::Quote {
            text: "Words".to_string(),
            caption: String::new(),
        };
        assert_eq!(
            render(block),
            "<blockquote><p>Words</p><cite></cite></blockquote>"
        );
    }

    #[test]
    fn test_warning() {
        let block = Block::Warning {
            title: "Careful".to_string(),
            message: "Hot".to_string(),
        };
        assert_eq!(
            render(block),
            "<div class=\"warning\"><h4>Careful</h4><p>Hot</p></div>"
        );
    }

    #[test]
    fn test_code() {
        let block = Block::Code {
            code: "fn main() {}".to_string(),
            language: "rust".to_string(),
        };
        assert_eq!(
            render(block),
            "<pre><code class=\"language-rust\">fn main() {}</code></pre>"
        );
    }

    #[test]
    fn test_delimiter() {
        assert_eq!(render(Block::Delimiter), "<hr>");
    }

    #[test]
    fn test_image() {
        assert_eq!(
            render(Block::image("https://x/y.png", "alt")),
            "<img src=\"https://x/y.png\" alt=\"alt\" class=\"rounded-lg shadow-md my-6 max-w-full h-auto\">"
        );
    }

    #[test]
    fn test_table() {
        let block = Block::Table {
            content: vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["c".to_string(), "d".to_string()],
            ],
        };
        assert_eq!(
            render(block),
            "<table class=\"table-auto w-full border-collapse border border-gray-300\"><tbody>\
             <tr><td>a</td><td>b</td></tr><tr><td>c</td><td>d</td></tr>\
             </tbody></table>"
        );
    }

    #[test]
    fn test_unknown_block_falls_back_to_paragraph() {
        let block: Block = serde_json::from_value(json!({"type": "foo", "data": {"text": "x"}}))
            .unwrap();
        assert_eq!(render(block), "<p>x</p>");

        let block: Block = serde_json::from_value(json!({"type": "embed", "data": {}})).unwrap();
        assert_eq!(render(block), "<p></p>");

        let block: Block =
            serde_json::from_value(json!({"type": "foo", "data": {"text": 5}})).unwrap();
        assert_eq!(render(block), "<p>5</p>");
    }

    #[test]
    fn test_blocks_are_concatenated_without_separator() {
        let doc = BlockDocument::from_blocks(vec![
            Block::header("T", 2),
            Block::paragraph("a"),
            Block::Delimiter,
        ]);
        assert_eq!(blocks_to_html(&doc), "<h2>T</h2><p>a</p><hr>");
    }

    #[test]
    fn test_markup_in_text_is_kept_by_default() {
        assert_eq!(
            render(Block::paragraph("a <b>bold</b> & more")),
            "<p>a <b>bold</b> & more</p>"
        );
    }

    #[test]
    fn test_escaping_when_enabled() {
        let options = HtmlOptions::escaped();
        assert_eq!(
            block_to_html(&Block::paragraph("a <b>bold</b> & more"), &options),
            "<p>a &lt;b&gt;bold&lt;/b&gt; &amp; more</p>"
        );
        assert_eq!(
            block_to_html(&Block::image("/x.png?a=1&b=\"2\"", "say \"hi\""), &options),
            "<img src=\"/x.png?a=1&amp;b=&quot;2&quot;\" alt=\"say &quot;hi&quot;\" class=\"rounded-lg shadow-md my-6 max-w-full h-auto\">"
        );
    }
}
