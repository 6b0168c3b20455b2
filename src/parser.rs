use once_cell::sync::Lazy;
use regex::Regex;

use crate::block::{Block, List, ListItem, Span, TableCell};

static BLOCK_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^h([1-6])\.[ \t]+(.*)$").unwrap());

static LIST_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#+|\*+)[ \t]+(.*)$").unwrap());

static HTML_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:<!--|</?(?:div|p|pre|table|ul|ol|dl|blockquote|h[1-6]|hr|section|article|nav|header|footer)\b)",
    )
    .unwrap()
});

/// Inline HTML elements passed through as markup. Anything else that looks
/// like a tag (`Vec<T>`) is text.
const INLINE_TAGS: &[&str] = &[
    "a", "abbr", "b", "br", "cite", "code", "del", "em", "i", "img", "ins", "kbd", "mark", "q",
    "s", "small", "span", "strong", "sub", "sup", "u", "var",
];

static INLINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        // Quoted attribute values may contain `<`, `>` and the other quote
        r#"(?P<tag></?(?P<tag_name>[A-Za-z][A-Za-z0-9]*)(?:[^<>"']|"[^"]*"|'[^']*')*>)"#,
        r#"|(?P<entity>&(?:[A-Za-z][A-Za-z0-9]*|#[0-9]+|#[xX][0-9A-Fa-f]+);)"#,
        // A label may hold quoted words (`"Say "hi"":#...`); fragment targets run to whitespace
        r#"|"(?P<label>(?:[^"]|"[^"\s][^"]*")+?)":(?P<href>#\S+|[^\s<>"]+)"#,
        r#"|@(?P<code>[^@]+)@"#,
        r#"|(?P<lead>^|[^\w])(?:\*(?P<strong>[^\s*](?:[^*]*[^\s*])?)\*|_(?P<em>[^\s_](?:[^_]*[^\s_])?)_)"#,
    ))
    .unwrap()
});

/// Parse Textile text into a list of blocks
pub fn parse(textile: &str) -> Vec<Block> {
    let lines: Vec<&str> = textile.lines().collect();
    let mut blocks = Vec::new();

    // Blank lines separate blocks
    for chunk in lines.split(|line| line.trim().is_empty()) {
        parse_chunk(chunk, &mut blocks);
    }

    blocks
}

fn parse_chunk(mut lines: &[&str], blocks: &mut Vec<Block>) {
    while let Some(first) = lines.first() {
        let consumed = if let Some(caps) = BLOCK_HEADING.captures(first) {
            // Only the signature line belongs to the heading
            let level = caps[1].parse().unwrap_or(1);
            blocks.push(Block::Heading {
                level,
                content: parse_inline(caps[2].trim_end()),
            });
            1
        } else if let Some(rest) = first.strip_prefix("bc. ") {
            let mut content = rest.to_string();
            for line in &lines[1..] {
                content.push('\n');
                content.push_str(line);
            }
            blocks.push(Block::CodeBlock { content });
            lines.len()
        } else if let Some(rest) = first.strip_prefix("bq. ") {
            blocks.push(Block::BlockQuote {
                content: line_spans(rest, &lines[1..]),
            });
            lines.len()
        } else if let Some(rest) = first.strip_prefix("p. ") {
            blocks.push(Block::Paragraph {
                content: line_spans(rest, &lines[1..]),
            });
            lines.len()
        } else if LIST_LINE.is_match(first) {
            let count = lines
                .iter()
                .take_while(|line| LIST_LINE.is_match(line))
                .count();
            blocks.push(Block::List(parse_list(&lines[..count])));
            count
        } else if first.starts_with('|') {
            let count = lines
                .iter()
                .take_while(|line| line.starts_with('|'))
                .count();
            let rows = lines[..count].iter().map(|line| parse_row(line)).collect();
            blocks.push(Block::Table { rows });
            count
        } else if HTML_BLOCK.is_match(first) {
            blocks.push(Block::Html(lines.join("\n")));
            lines.len()
        } else {
            // A paragraph runs until the next heading line
            let count = 1 + lines[1..]
                .iter()
                .take_while(|line| !BLOCK_HEADING.is_match(line))
                .count();
            blocks.push(Block::Paragraph {
                content: line_spans(first, &lines[1..count]),
            });
            count
        };

        lines = &lines[consumed..];
    }
}

/// Inline content of a multi-line block; line breaks are kept.
fn line_spans(first: &str, rest: &[&str]) -> Vec<Span> {
    let mut spans = parse_inline(first.trim_end());
    for line in rest {
        spans.push(Span::LineBreak);
        spans.extend(parse_inline(line.trim_end()));
    }
    spans
}

struct ListEntry<'a> {
    depth: usize,
    ordered: bool,
    text: &'a str,
}

fn parse_list(lines: &[&str]) -> List {
    let mut entries = Vec::with_capacity(lines.len());
    let mut previous_depth = 0;

    for line in lines {
        if let Some(caps) = LIST_LINE.captures(line) {
            let marker = caps.get(1).map_or("", |m| m.as_str());
            // Nesting can only go one level deeper than the previous item
            let depth = marker.len().min(previous_depth + 1);
            previous_depth = depth;
            entries.push(ListEntry {
                depth,
                ordered: marker.starts_with('#'),
                text: caps.get(2).map_or("", |m| m.as_str()),
            });
        }
    }

    let mut pos = 0;
    build_list(&entries, &mut pos, 1)
}

fn build_list(entries: &[ListEntry], pos: &mut usize, depth: usize) -> List {
    let ordered = entries.get(*pos).is_some_and(|entry| entry.ordered);
    let mut items: Vec<ListItem> = Vec::new();

    while let Some(entry) = entries.get(*pos) {
        if entry.depth < depth {
            break;
        }
        if entry.depth == depth {
            items.push(ListItem {
                content: parse_inline(entry.text.trim_end()),
                nested: None,
            });
            *pos += 1;
        } else {
            let nested = build_list(entries, pos, depth + 1);
            if items.is_empty() {
                items.push(ListItem {
                    content: Vec::new(),
                    nested: None,
                });
            }
            if let Some(last) = items.last_mut() {
                last.nested = Some(Box::new(nested));
            }
        }
    }

    List { ordered, items }
}

fn parse_row(line: &str) -> Vec<TableCell> {
    let line = line.trim_end();
    let inner = line.strip_prefix('|').unwrap_or(line);
    let inner = inner.strip_suffix('|').unwrap_or(inner);

    inner
        .split('|')
        .map(|cell| {
            let cell = cell.trim();
            match cell.strip_prefix("_.") {
                Some(rest) => TableCell {
                    header: true,
                    content: parse_inline(rest.trim_start()),
                },
                None => TableCell {
                    header: false,
                    content: parse_inline(cell),
                },
            }
        })
        .collect()
}

/// Parse one line of inline Textile into spans
pub(crate) fn parse_inline(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in INLINE.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        push_text(&mut spans, &text[last..whole.start()]);

        if let Some(tag) = caps.name("tag") {
            let known = caps
                .name("tag_name")
                .is_some_and(|name| is_inline_tag(name.as_str()));
            if known {
                spans.push(Span::Html(tag.as_str().to_string()));
            } else {
                push_text(&mut spans, tag.as_str());
            }
        } else if let Some(entity) = caps.name("entity") {
            spans.push(Span::Html(entity.as_str().to_string()));
        } else if let (Some(label), Some(href)) = (caps.name("label"), caps.name("href")) {
            let (url, trailing) = split_trailing_punctuation(href.as_str());
            spans.push(Span::Link {
                url: url.to_string(),
                content: parse_inline(label.as_str()),
            });
            push_text(&mut spans, trailing);
        } else if let Some(code) = caps.name("code") {
            spans.push(Span::Code(code.as_str().to_string()));
        } else {
            if let Some(lead) = caps.name("lead") {
                push_text(&mut spans, lead.as_str());
            }
            if let Some(strong) = caps.name("strong") {
                spans.push(Span::Bold(parse_inline(strong.as_str())));
            } else if let Some(em) = caps.name("em") {
                spans.push(Span::Italic(parse_inline(em.as_str())));
            }
        }

        last = whole.end();
    }

    push_text(&mut spans, &text[last..]);
    spans
}

fn is_inline_tag(name: &str) -> bool {
    INLINE_TAGS
        .iter()
        .any(|tag| tag.eq_ignore_ascii_case(name))
}

/// Sentence punctuation after a link is not part of the url. Fragment links
/// are kept whole since anchor names may end in punctuation.
fn split_trailing_punctuation(href: &str) -> (&str, &str) {
    if href.starts_with('#') {
        return (href, "");
    }
    let url = href.trim_end_matches(['.', ',', ';', ':', '!', '?']);
    if url.is_empty() {
        return (href, "");
    }
    (url, &href[url.len()..])
}

fn push_text(spans: &mut Vec<Span>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Span::Text(previous)) = spans.last_mut() {
        previous.push_str(text);
    } else {
        spans.push(Span::Text(text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Span {
        Span::Text(s.to_string())
    }

    #[test]
    fn heading_takes_only_its_line() {
        assert_eq!(
            parse("h1. Title\nBody text."),
            vec![
                Block::Heading {
                    level: 1,
                    content: vec![text("Title")],
                },
                Block::Paragraph {
                    content: vec![text("Body text.")],
                },
            ]
        );
    }

    #[test]
    fn paragraph_stops_at_heading() {
        let blocks = parse("one\ntwo\nh2. Next");
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph {
                    content: vec![text("one"), Span::LineBreak, text("two")],
                },
                Block::Heading {
                    level: 2,
                    content: vec![text("Next")],
                },
            ]
        );
    }

    #[test]
    fn blank_lines_split_blocks() {
        assert_eq!(parse("a\n\n\nb").len(), 2);
        assert!(parse("").is_empty());
        assert!(parse("\n  \n").is_empty());
    }

    #[test]
    fn nested_list() {
        let blocks = parse("# one\n## two\n# three");
        let expected = List {
            ordered: true,
            items: vec![
                ListItem {
                    content: vec![text("one")],
                    nested: Some(Box::new(List {
                        ordered: true,
                        items: vec![ListItem {
                            content: vec![text("two")],
                            nested: None,
                        }],
                    })),
                },
                ListItem {
                    content: vec![text("three")],
                    nested: None,
                },
            ],
        };
        assert_eq!(blocks, vec![Block::List(expected)]);
    }

    #[test]
    fn list_depth_jumps_are_clamped() {
        // Starts at level 2 and then skips a level
        let Block::List(list) = &parse("## a\n#### b")[0] else {
            panic!("expected a list");
        };
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].content, vec![text("a")]);
        let nested = list.items[0].nested.as_ref().unwrap();
        assert_eq!(nested.items[0].content, vec![text("b")]);
    }

    #[test]
    fn unordered_list() {
        let Block::List(list) = &parse("* a\n* b")[0] else {
            panic!("expected a list");
        };
        assert!(!list.ordered);
        assert_eq!(list.items.len(), 2);
    }

    #[test]
    fn table_with_header_row() {
        let blocks = parse("|_. Name |_. Value |\n| a | 1 |");
        let Block::Table { rows } = &blocks[0] else {
            panic!("expected a table");
        };
        assert_eq!(rows.len(), 2);
        assert!(rows[0].iter().all(|cell| cell.header));
        assert_eq!(rows[0][0].content, vec![text("Name")]);
        assert!(!rows[1][1].header);
        assert_eq!(rows[1][1].content, vec![text("1")]);
    }

    #[test]
    fn explicit_signatures() {
        assert_eq!(
            parse("bc. let x = 1;\nlet y = <2>;"),
            vec![Block::CodeBlock {
                content: "let x = 1;\nlet y = <2>;".to_string()
            }]
        );
        assert_eq!(
            parse("bq. quoted"),
            vec![Block::BlockQuote {
                content: vec![text("quoted")]
            }]
        );
        assert_eq!(
            parse("p. h1. not a heading"),
            vec![Block::Paragraph {
                content: vec![text("h1. not a heading")]
            }]
        );
    }

    #[test]
    fn html_block_passes_through() {
        assert_eq!(
            parse("<div class=\"x\">\n*raw*\n</div>"),
            vec![Block::Html("<div class=\"x\">\n*raw*\n</div>".to_string())]
        );
    }

    #[test]
    fn inline_anchor_tag_passes_through() {
        assert_eq!(
            parse_inline("<a name=\"Hello+World\">Hello World</a>"),
            vec![
                Span::Html("<a name=\"Hello+World\">".to_string()),
                text("Hello World"),
                Span::Html("</a>".to_string()),
            ]
        );
    }

    #[test]
    fn fragment_link() {
        assert_eq!(
            parse_inline("\"Hello World\":#Hello+World"),
            vec![Span::Link {
                url: "#Hello+World".to_string(),
                content: vec![text("Hello World")],
            }]
        );
    }

    #[test]
    fn anchor_tag_with_markup_in_attribute() {
        assert_eq!(
            parse_inline("<a name=\"Vec&lt;T&gt;+basics\">Vec<T> basics</a>"),
            vec![
                Span::Html("<a name=\"Vec&lt;T&gt;+basics\">".to_string()),
                text("Vec<T> basics"),
                Span::Html("</a>".to_string()),
            ]
        );
        assert_eq!(
            parse_inline("<span title=\"a > b\">x</span>"),
            vec![
                Span::Html("<span title=\"a > b\">".to_string()),
                text("x"),
                Span::Html("</span>".to_string()),
            ]
        );
    }

    #[test]
    fn unknown_tags_are_text() {
        assert_eq!(parse_inline("Option<T>"), vec![text("Option<T>")]);
        assert_eq!(
            parse_inline("<EM>x</em>"),
            vec![
                Span::Html("<EM>".to_string()),
                text("x"),
                Span::Html("</em>".to_string()),
            ]
        );
    }

    #[test]
    fn fragment_link_keeps_markup_characters() {
        assert_eq!(
            parse_inline("\"Vec<T> basics\":#Vec<T>+basics"),
            vec![Span::Link {
                url: "#Vec<T>+basics".to_string(),
                content: vec![text("Vec<T> basics")],
            }]
        );
        assert_eq!(
            parse_inline("\"Say \"hi\"\":#Say+\"hi\""),
            vec![Span::Link {
                url: "#Say+\"hi\"".to_string(),
                content: vec![text("Say \"hi\"")],
            }]
        );
    }

    #[test]
    fn quoted_prose_before_a_link() {
        assert_eq!(
            parse_inline("he said \"no\" and \"docs\":https://example.com"),
            vec![
                text("he said \"no\" and "),
                Span::Link {
                    url: "https://example.com".to_string(),
                    content: vec![text("docs")],
                },
            ]
        );
    }

    #[test]
    fn link_trailing_punctuation() {
        assert_eq!(
            parse_inline("see \"docs\":https://example.com/a."),
            vec![
                text("see "),
                Span::Link {
                    url: "https://example.com/a".to_string(),
                    content: vec![text("docs")],
                },
                text("."),
            ]
        );
        assert_eq!(
            parse_inline("\"Why?\":#Why?"),
            vec![Span::Link {
                url: "#Why?".to_string(),
                content: vec![text("Why?")],
            }]
        );
    }

    #[test]
    fn phrase_modifiers() {
        assert_eq!(
            parse_inline("a *b _c_* @d@"),
            vec![
                text("a "),
                Span::Bold(vec![text("b "), Span::Italic(vec![text("c")])]),
                text(" "),
                Span::Code("d".to_string()),
            ]
        );
    }

    #[test]
    fn underscores_inside_words_are_text() {
        assert_eq!(parse_inline("snake_case_name"), vec![text("snake_case_name")]);
        assert_eq!(parse_inline("2 * 3 * 4"), vec![text("2 * 3 * 4")]);
    }

    #[test]
    fn entities_pass_through() {
        assert_eq!(
            parse_inline("a &amp; b & c"),
            vec![
                text("a "),
                Span::Html("&amp;".to_string()),
                text(" b & c"),
            ]
        );
    }
}
