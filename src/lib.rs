mod block;
mod config;
mod error;
mod heading;
mod html;
pub mod logging;
mod page;
mod parser;
mod toc;

pub use block::{Block, List, ListItem, Span, TableCell};
pub use config::{Config, PageConfig};
pub use error::{Error, Result};
pub use heading::{HEADING_PATTERN, Heading, anchor};
pub use page::assemble;
pub use toc::{anchored_heading, generate_toc, headings, rewrite_body, toc_line};

use std::fs;
use std::path::Path;

use log::debug;

/// Parse Textile text into a vector of blocks.
pub fn parse(textile: &str) -> Vec<Block> {
    parser::parse(textile)
}

/// Render Textile text to HTML.
pub fn textile_to_html(textile: &str) -> String {
    let blocks = parse(textile);
    html::blocks_to_html(&blocks)
}

/// Build the full page for an in-memory document.
pub fn generate_page(file_name: &str, document: &str, config: &Config) -> String {
    debug!(
        "Found {} headings in {} ({} bytes)",
        headings(document, &HEADING_PATTERN).len(),
        file_name,
        document.len()
    );

    let toc = textile_to_html(&generate_toc(document, &HEADING_PATTERN));
    let body = textile_to_html(&rewrite_body(document, &HEADING_PATTERN));

    assemble(file_name, &toc, &body, &config.page)
}

/// Read a document from disk and build its page. The page title is the path as given.
pub fn generate_page_from_file(path: &Path, config: &Config) -> Result<String> {
    let document = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(generate_page(&path.display().to_string(), &document, config))
}
