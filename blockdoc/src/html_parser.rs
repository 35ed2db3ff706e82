//! HTML to block document conversion
//!
//! The input fragment is parsed by html5ever the way a browser parses a
//! document, so malformed markup is repaired rather than rejected. The
//! children of `<body>` are then walked depth-first and each recognized
//! element becomes one block. Unrecognized elements emit nothing themselves;
//! their children are walked in their place.

use crate::block_model::{Block, BlockDocument, ListStyle, DEFAULT_CODE_LANGUAGE};
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{parse_document, Attribute, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use std::cell::RefCell;

/// Convert an HTML fragment into a block document
///
/// Never fails: empty input yields an empty document and markup that cannot
/// be interpreted degrades to text or is recursed into.
///
/// # Parameters
/// * `html` - HTML fragment (or full document)
///
/// # Returns
/// * `BlockDocument` - Blocks in document order
pub fn html_to_blocks(html: &str) -> BlockDocument {
    if html.is_empty() {
        return BlockDocument::new();
    }

    // Scripting off, so <noscript> content is parsed as markup
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            scripting_enabled: false,
            ..Default::default()
        },
        ..Default::default()
    };
    let dom = parse_document(RcDom::default(), opts).one(html);

    let mut blocks = Vec::new();
    if let Some(body) = find_body(&dom.document) {
        for child in body.children.borrow().iter() {
            process_node(child, &mut blocks);
        }
    }

    log::debug!(
        "Converted {} bytes of HTML into {} blocks",
        html.len(),
        blocks.len()
    );

    BlockDocument::from_blocks(blocks)
}

/// Elements with a block conversion rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HtmlTag {
    Heading(u8),
    Paragraph,
    List(ListStyle),
    BlockQuote,
    Pre,
    Image,
    Rule,
    /// Anything else: recurse into children
    Other,
}

impl HtmlTag {
    /// Classify a lowercase local tag name
    fn from_name(name: &str) -> Self {
        match name {
            "h1" => HtmlTag::Heading(1),
            "h2" => HtmlTag::Heading(2),
            "h3" => HtmlTag::Heading(3),
            "h4" => HtmlTag::Heading(4),
            "h5" => HtmlTag::Heading(5),
            "h6" => HtmlTag::Heading(6),
            "p" => HtmlTag::Paragraph,
            "ul" => HtmlTag::List(ListStyle::Unordered),
            "ol" => HtmlTag::List(ListStyle::Ordered),
            "blockquote" => HtmlTag::BlockQuote,
            "pre" => HtmlTag::Pre,
            "img" => HtmlTag::Image,
            "hr" => HtmlTag::Rule,
            _ => HtmlTag::Other,
        }
    }
}

/// Locate the `<body>` element under the document root
///
/// The HTML5 tree builder always synthesizes `html` and `body`, so this only
/// returns `None` for documents whose body was replaced by a frameset.
fn find_body(document: &Handle) -> Option<Handle> {
    let children = document.children.borrow();
    let html = children.iter().find(|node| element_name(node) == Some("html"))?;
    let html_children = html.children.borrow();
    let body = html_children
        .iter()
        .find(|node| element_name(node) == Some("body"))
        .cloned();
    body
}

/// Convert one node, appending any resulting blocks
fn process_node(node: &Handle, blocks: &mut Vec<Block>) {
    match node.data {
        NodeData::Text { ref contents } => {
            let contents = contents.borrow();
            let text = contents.trim();
            if !text.is_empty() {
                blocks.push(Block::paragraph(text));
            }
        }
        NodeData::Element {
            ref name,
            ref attrs,
            ..
        } => {
            process_element(node, HtmlTag::from_name(name.local.as_ref()), attrs, blocks);
        }
        // Comments, doctypes and processing instructions carry no content
        _ => {}
    }
}

/// Convert one element according to its tag
fn process_element(
    element: &Handle,
    tag: HtmlTag,
    attrs: &RefCell<Vec<Attribute>>,
    blocks: &mut Vec<Block>,
) {
    match tag {
        HtmlTag::Heading(level) => {
            blocks.push(Block::Header {
                text: text_content(element),
                level,
            });
        }

        HtmlTag::Paragraph => {
            let text = text_content(element);
            if !text.trim().is_empty() {
                blocks.push(Block::Paragraph { text });
            }
        }

        HtmlTag::List(style) => {
            let items = element
                .children
                .borrow()
                .iter()
                .filter(|child| matches!(child.data, NodeData::Element { .. }))
                .map(text_content)
                .collect();
            blocks.push(Block::List { items, style });
        }

        HtmlTag::BlockQuote => {
            let text = find_descendant(element, "p")
                .map(|p| text_content(&p))
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| text_content(element));
            let caption = find_descendant(element, "cite")
                .map(|cite| text_content(&cite))
                .unwrap_or_default();
            blocks.push(Block::Quote { text, caption });
        }

        HtmlTag::Pre => {
            // A pre without a code element is dropped, children included
            if let Some(code) = find_descendant(element, "code") {
                blocks.push(Block::Code {
                    code: text_content(&code),
                    language: code_language(&code),
                });
            }
        }

        HtmlTag::Image => {
            blocks.push(Block::Image {
                url: attribute(attrs, "src").unwrap_or_default(),
                caption: attribute(attrs, "alt").unwrap_or_default(),
            });
        }

        HtmlTag::Rule => blocks.push(Block::Delimiter),

        HtmlTag::Other => {
            for child in element.children.borrow().iter() {
                process_node(child, blocks);
            }
        }
    }
}

/// Language of a code element from its `language-*` class
///
/// The first occurrence of `language-` is removed from the class attribute;
/// an empty result means the default language.
fn code_language(code: &Handle) -> String {
    let class = match code.data {
        NodeData::Element { ref attrs, .. } => attribute(attrs, "class").unwrap_or_default(),
        _ => String::new(),
    };
    let language = class.replacen("language-", "", 1);
    if language.is_empty() {
        DEFAULT_CODE_LANGUAGE.to_string()
    } else {
        language
    }
}

/// Local name of an element node
fn element_name(node: &Handle) -> Option<&str> {
    match node.data {
        NodeData::Element { ref name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

/// Value of an attribute by local name
fn attribute(attrs: &RefCell<Vec<Attribute>>, name: &str) -> Option<String> {
    attrs
        .borrow()
        .iter()
        .find(|attr| attr.name.local.as_ref() == name)
        .map(|attr| attr.value.to_string())
}

/// First descendant element with the given tag, in document order
fn find_descendant(node: &Handle, tag: &str) -> Option<Handle> {
    for child in node.children.borrow().iter() {
        if element_name(child) == Some(tag) {
            return Some(child.clone());
        }
        if let Some(found) = find_descendant(child, tag) {
            return Some(found);
        }
    }
    None
}

/// Concatenated text of all descendant text nodes
fn text_content(node: &Handle) -> String {
    let mut output = String::new();
    collect_text(node, &mut output);
    output
}

fn collect_text(node: &Handle, output: &mut String) {
    for child in node.children.borrow().iter() {
        match child.data {
            NodeData::Text { ref contents } => output.push_str(&contents.borrow()),
            NodeData::Element { .. } => collect_text(child, output),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block_model::BlockKind;

    fn blocks(html: &str) -> Vec<Block> {
        html_to_blocks(html).blocks
    }

    #[test]
    fn test_empty_input() {
        assert!(html_to_blocks("").is_empty());
        assert!(html_to_blocks("   \n\t ").is_empty());
    }

    #[test]
    fn test_heading_and_paragraph() {
        // Arrange / Act
        let result = blocks("<h2>Title</h2><p>Body text</p>");

        // Assert
        assert_eq!(
            result,
            vec![
                Block::Header {
                    text: "Title".to_string(),
                    level: 2
                },
                Block::paragraph("Body text"),
            ]
        );
    }

    #[test]
    fn test_every_heading_level_is_kept() {
        for level in 1..=6u8 {
            let html = format!("<h{level}>H</h{level}>");
            assert_eq!(
                blocks(&html),
                vec![Block::Header {
                    text: "H".to_string(),
                    level
                }]
            );
        }
    }

    #[test]
    fn test_heading_text_strips_inline_tags() {
        assert_eq!(
            blocks("<h3>Hello <em>big</em> <strong>world</strong></h3>"),
            vec![Block::Header {
                text: "Hello big world".to_string(),
                level: 3
            }]
        );
    }

    #[test]
    fn test_paragraph_text_is_not_trimmed() {
        assert_eq!(
            blocks("<p>  padded  </p>"),
            vec![Block::paragraph("  padded  ")]
        );
    }

    #[test]
    fn test_empty_paragraphs_are_dropped() {
        assert!(blocks("<p></p><p>   </p><p><br></p>").is_empty());
    }

    #[test]
    fn test_bare_text_is_trimmed() {
        assert_eq!(
            blocks("  loose text  <p>para</p>"),
            vec![Block::paragraph("loose text"), Block::paragraph("para")]
        );
    }

    #[test]
    fn test_unordered_list() {
        assert_eq!(
            blocks("<ul><li>A</li><li>B</li></ul>"),
            vec![Block::list(["A", "B"], ListStyle::Unordered)]
        );
    }

    #[test]
    fn test_ordered_list() {
        assert_eq!(
            blocks("<ol>\n  <li>first</li>\n  <li>second</li>\n</ol>"),
            vec![Block::list(["first", "second"], ListStyle::Ordered)]
        );
    }

    #[test]
    fn test_nested_list_is_flattened_into_item_text() {
        assert_eq!(
            blocks("<ul><li>outer<ul><li>inner</li></ul></li><li>next</li></ul>"),
            vec![Block::list(["outerinner", "next"], ListStyle::Unordered)]
        );
    }

    #[test]
    fn test_empty_list_is_kept() {
        assert_eq!(
            blocks("<ul></ul>"),
            vec![Block::List {
                items: Vec::new(),
                style: ListStyle::Unordered
            }]
        );
    }

    #[test]
    fn test_blockquote_with_cite() {
        assert_eq!(
            blocks("<blockquote><p>Stay hungry</p><cite>Jobs</cite></blockquote>"),
            vec![Block::Quote {
                text: "Stay hungry".to_string(),
                caption: "Jobs".to_string()
            }]
        );
    }

    #[test]
    fn test_blockquote_without_paragraph_uses_full_text() {
        assert_eq!(
            blocks("<blockquote>Just words</blockquote>"),
            vec![Block::Quote {
                text: "Just words".to_string(),
                caption: String::new()
            }]
        );
    }

    #[test]
    fn test_blockquote_with_empty_paragraph_falls_back_to_full_text() {
        assert_eq!(
            blocks("<blockquote><p></p>Outer<cite>C</cite></blockquote>"),
            vec![Block::Quote {
                text: "OuterC".to_string(),
                caption: "C".to_string()
            }]
        );
    }

    #[test]
    fn test_code_block_language() {
        assert_eq!(
            blocks("<pre><code class=\"language-rust\">fn main() {}</code></pre>"),
            vec![Block::Code {
                code: "fn main() {}".to_string(),
                language: "rust".to_string()
            }]
        );
    }

    #[test]
    fn test_code_block_defaults_to_javascript() {
        assert_eq!(
            blocks("<pre><code>let a = 1;</code></pre>"),
            vec![Block::Code {
                code: "let a = 1;".to_string(),
                language: "javascript".to_string()
            }]
        );
    }

    #[test]
    fn test_code_class_without_prefix_is_used_as_is() {
        let result = blocks("<pre><code class=\"hljs language-go\">x</code></pre>");
        assert!(matches!(
            &result[..],
            [Block::Code { language, .. }] if language == "hljs go"
        ));
    }

    #[test]
    fn test_pre_without_code_emits_nothing() {
        // A bare pre is neither converted nor recursed into
        assert!(blocks("<pre>plain preformatted</pre>").is_empty());
    }

    #[test]
    fn test_image_attributes() {
        assert_eq!(
            blocks("<img src=\"https://x/y.png\" alt=\"A cat\">"),
            vec![Block::image("https://x/y.png", "A cat")]
        );
        assert_eq!(blocks("<img>"), vec![Block::image("", "")]);
    }

    #[test]
    fn test_image_inside_paragraph_is_dropped_with_the_paragraph() {
        // The paragraph rule uses text content only, so an image-only
        // paragraph produces no block at all
        assert!(blocks("<p><img src=\"a.png\"></p>").is_empty());
    }

    #[test]
    fn test_horizontal_rule() {
        assert_eq!(blocks("<hr>"), vec![Block::Delimiter]);
    }

    #[test]
    fn test_wrapper_elements_are_discarded() {
        assert_eq!(
            blocks("<div><p>Nested</p></div>"),
            vec![Block::paragraph("Nested")]
        );
        assert_eq!(
            blocks("<article><section><h1>T</h1><span>inline</span></section></article>"),
            vec![
                Block::Header {
                    text: "T".to_string(),
                    level: 1
                },
                Block::paragraph("inline"),
            ]
        );
    }

    #[test]
    fn test_comments_are_ignored() {
        assert_eq!(
            blocks("<!-- note --><p>kept</p>"),
            vec![Block::paragraph("kept")]
        );
    }

    #[test]
    fn test_uppercase_tags() {
        assert_eq!(
            blocks("<H1>Loud</H1><P>quiet</P>"),
            vec![
                Block::Header {
                    text: "Loud".to_string(),
                    level: 1
                },
                Block::paragraph("quiet"),
            ]
        );
    }

    #[test]
    fn test_malformed_html_is_repaired() {
        // Unclosed tags are closed by the tree builder
        let result = html_to_blocks("<p>one<p>two<div>three");
        assert_eq!(
            result.kinds(),
            vec![BlockKind::Paragraph, BlockKind::Paragraph, BlockKind::Paragraph]
        );
    }

    #[test]
    fn test_table_cells_become_paragraphs() {
        assert_eq!(
            blocks("<table><tbody><tr><td>a</td><td>b</td></tr></tbody></table>"),
            vec![Block::paragraph("a"), Block::paragraph("b")]
        );
    }

    #[test]
    fn test_checklist_markup_parses_as_plain_list() {
        let result = blocks(
            "<ul class=\"checklist\"><li><input type=\"checkbox\" checked disabled> Done</li></ul>",
        );
        assert_eq!(result, vec![Block::list([" Done"], ListStyle::Unordered)]);
    }

    #[test]
    fn test_full_document_input() {
        let html = "<!DOCTYPE html><html><head><title>ignored</title></head>\
                    <body><h1>Doc</h1></body></html>";
        assert_eq!(
            blocks(html),
            vec![Block::Header {
                text: "Doc".to_string(),
                level: 1
            }]
        );
    }

    #[test]
    fn test_noscript_content_is_parsed() {
        assert_eq!(
            blocks("<noscript><p>x</p></noscript>"),
            vec![Block::paragraph("x")]
        );
    }
}
