/// Inline text spans with formatting
#[derive(Debug, Clone, PartialEq)]
pub enum Span {
    Text(String),
    /// Raw HTML tag or character entity, emitted unescaped
    Html(String),
    Bold(Vec<Span>),
    Italic(Vec<Span>),
    Code(String),
    Link { url: String, content: Vec<Span> },
    LineBreak,
}

/// A single list item, which can contain a nested list
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub content: Vec<Span>,
    pub nested: Option<Box<List>>,
}

/// A list (ordered or unordered)
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    pub ordered: bool,
    pub items: Vec<ListItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub header: bool,
    pub content: Vec<Span>,
}

/// Block-level elements parsed from Textile
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading {
        level: u8,
        content: Vec<Span>,
    },
    Paragraph {
        content: Vec<Span>,
    },
    BlockQuote {
        content: Vec<Span>,
    },
    CodeBlock {
        content: String,
    },
    List(List),
    Table {
        rows: Vec<Vec<TableCell>>,
    },
    /// Block-level HTML passed through untouched
    Html(String),
}
