use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::block::{Block, List, Span, TableCell};

/// Convert blocks to HTML
pub fn blocks_to_html(blocks: &[Block]) -> String {
    let mut out = String::new();

    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        emit_block(block, &mut out);
    }

    out
}

fn emit_block(block: &Block, out: &mut String) {
    match block {
        Block::Heading { level, content } => {
            out.push_str(&format!("<h{level}>"));
            spans_to_html(content, out);
            out.push_str(&format!("</h{level}>"));
        }
        Block::Paragraph { content } => {
            out.push_str("<p>");
            spans_to_html(content, out);
            out.push_str("</p>");
        }
        Block::BlockQuote { content } => {
            out.push_str("<blockquote>\n\t<p>");
            spans_to_html(content, out);
            out.push_str("</p>\n</blockquote>");
        }
        Block::CodeBlock { content } => {
            out.push_str("<pre><code>");
            out.push_str(&encode_text(content));
            out.push_str("</code></pre>");
        }
        Block::List(list) => {
            list_to_html(list, 0, out);
        }
        Block::Table { rows } => {
            table_to_html(rows, out);
        }
        Block::Html(raw) => {
            out.push_str(raw);
        }
    }
}

fn spans_to_html(spans: &[Span], out: &mut String) {
    for span in spans {
        span_to_html(span, out);
    }
}

fn span_to_html(span: &Span, out: &mut String) {
    match span {
        Span::Text(text) => {
            out.push_str(&encode_text(text));
        }
        Span::Html(raw) => {
            out.push_str(raw);
        }
        Span::Bold(inner) => {
            out.push_str("<strong>");
            spans_to_html(inner, out);
            out.push_str("</strong>");
        }
        Span::Italic(inner) => {
            out.push_str("<em>");
            spans_to_html(inner, out);
            out.push_str("</em>");
        }
        Span::Code(text) => {
            out.push_str("<code>");
            out.push_str(&encode_text(text));
            out.push_str("</code>");
        }
        Span::Link { url, content } => {
            out.push_str("<a href=\"");
            out.push_str(&encode_double_quoted_attribute(url));
            out.push_str("\">");
            spans_to_html(content, out);
            out.push_str("</a>");
        }
        Span::LineBreak => {
            out.push_str("<br />\n");
        }
    }
}

fn list_to_html(list: &List, indent: usize, out: &mut String) {
    let tag = if list.ordered { "ol" } else { "ul" };
    let indent_str = "\t".repeat(indent);

    out.push_str(&indent_str);
    out.push_str(&format!("<{tag}>\n"));

    for item in &list.items {
        out.push_str(&indent_str);
        out.push_str("\t<li>");
        spans_to_html(&item.content, out);

        if let Some(ref nested) = item.nested {
            out.push('\n');
            list_to_html(nested, indent + 1, out);
        }
        out.push_str("</li>\n");
    }

    out.push_str(&indent_str);
    out.push_str(&format!("</{tag}>"));
}

fn table_to_html(rows: &[Vec<TableCell>], out: &mut String) {
    out.push_str("<table>\n");

    for row in rows {
        out.push_str("\t<tr>\n");
        for cell in row {
            let tag = if cell.header { "th" } else { "td" };
            out.push_str(&format!("\t\t<{tag}>"));
            spans_to_html(&cell.content, out);
            out.push_str(&format!("</{tag}>\n"));
        }
        out.push_str("\t</tr>\n");
    }

    out.push_str("</table>");
}
