//! blockdoc - HTML ⇄ block document converter
//!
//! Converts post bodies between the HTML stored for rendering and the block
//! list (`{"blocks": [...]}`) that block-based editors load and save.
//!
//! ```
//! use blockdoc::{blocks_to_html, html_to_blocks};
//!
//! let doc = html_to_blocks("<h2>Title</h2><p>Body text</p>");
//! assert_eq!(doc.len(), 2);
//! assert_eq!(blocks_to_html(&doc), "<h2>Title</h2><p>Body text</p>");
//! ```

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::pedantic))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(missing_docs))]
// Allow some pedantic lints that are too strict for this project
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::enum_variant_names)]

pub mod block_model;
pub mod converter_config;
pub mod html_exporter;
pub mod html_parser;
pub mod pipeline;
pub mod round_trip;

pub use block_model::{Block, BlockDocument, BlockKind, ChecklistItem, ListStyle};
pub use converter_config::ConverterConfig;
pub use html_exporter::{blocks_to_html, blocks_to_html_with, HtmlOptions};
pub use html_parser::html_to_blocks;
