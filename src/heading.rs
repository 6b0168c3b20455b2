use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// A heading line: optional leading blanks, `h`, a level digit 1-6, a period,
/// at least one blank, then the title up to the end of the line.
///
/// Blanks are spaces and tabs only, so a match never spans lines, and trailing
/// blanks are not part of the title (`h1. A ` gives `A`, not `A+`).
pub static HEADING_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*h([1-6])\.[ \t]+(\S.*?)[ \t\r]*$").unwrap());

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// A heading found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: u8,
    pub title: String,
}

impl Heading {
    /// Build a heading from a match of [`HEADING_PATTERN`] (or any pattern with
    /// the same two capture groups). Returns `None` when a group is missing or
    /// the level is not a number from 1 to 6.
    pub fn from_captures(caps: &Captures) -> Option<Self> {
        let level: u8 = caps.get(1)?.as_str().parse().ok()?;
        if !(1..=6).contains(&level) {
            return None;
        }
        Some(Self {
            level,
            title: caps.get(2)?.as_str().to_string(),
        })
    }

    pub fn anchor(&self) -> String {
        anchor(&self.title)
    }
}

/// Anchor name for a heading title: each whitespace run becomes a single `+`.
pub fn anchor(title: &str) -> String {
    WHITESPACE_RUN.replace_all(title, "+").into_owned()
}
