use html_escape::encode_double_quoted_attribute;
use regex::{Captures, Regex};

use crate::heading::{Heading, anchor};

/// Extract headings from a Textile document, in document order.
pub fn headings(document: &str, pattern: &Regex) -> Vec<Heading> {
    pattern
        .captures_iter(document)
        .filter_map(|caps| Heading::from_captures(&caps))
        .collect()
}

/// Build the table of contents as Textile: one nested list item per heading,
/// each linking to the heading's anchor.
pub fn generate_toc(document: &str, pattern: &Regex) -> String {
    let mut toc = String::new();

    for heading in headings(document, pattern) {
        toc.push_str(&toc_line(heading.level, &heading.title));
    }

    toc
}

/// One table of contents line, e.g. `## "Hello World":#Hello+World`.
pub fn toc_line(level: u8, title: &str) -> String {
    format!(
        "{} \"{}\":#{}\n",
        "#".repeat(level as usize),
        title,
        anchor(title)
    )
}

/// Rewrite every heading line of the document into a heading that carries a
/// named anchor. Everything else is copied as is.
pub fn rewrite_body(document: &str, pattern: &Regex) -> String {
    pattern
        .replace_all(document, |caps: &Captures| match Heading::from_captures(caps) {
            Some(heading) => anchored_heading(heading.level, &heading.title),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Replacement for a heading line, e.g. `\nh2. <a name="Hello+World">Hello World</a>`.
///
/// The anchor is attribute-encoded the same way link targets are, so
/// `Say "hi"` becomes `name="Say+&quot;hi&quot;"`.
pub fn anchored_heading(level: u8, title: &str) -> String {
    format!(
        "\nh{}. <a name=\"{}\">{}</a>",
        level,
        encode_double_quoted_attribute(&anchor(title)),
        title
    )
}
