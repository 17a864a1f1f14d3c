// Presentation: everything the loop prints goes through here so that the
// output can be captured in tests with colours switched off.

use crate::model::{ArticlePage, SearchResponse};
use crossterm::style::Stylize;
use std::io::{self, Write};

pub const RULE: &str =
    "================================================================================";
pub const SUB_RULE: &str =
    "--------------------------------------------------------------------------------";

const BANNER: [&str; 6] = [
    r"|=============================================================|",
    r"|                                                             |",
    r"|                           w i k i                           |",
    r"|    -- a command line reader for the free encyclopedia --    |",
    r"|                                                             |",
    r"|=============================================================|",
];

/// Colours for the three kinds of output line. With `color` off every
/// method returns the text unchanged.
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    color: bool,
}

impl Painter {
    pub fn new(color: bool) -> Self {
        Painter { color }
    }

    pub fn plain() -> Self {
        Painter { color: false }
    }

    pub fn title(&self, text: &str) -> String {
        if self.color {
            text.green().bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn info(&self, text: &str) -> String {
        if self.color {
            text.blue().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn input(&self, text: &str) -> String {
        if self.color {
            text.dark_red().to_string()
        } else {
            text.to_string()
        }
    }
}

pub fn print_header(out: &mut impl Write, painter: &Painter) -> io::Result<()> {
    for line in BANNER {
        writeln!(out, "{}", painter.info(line))?;
    }
    writeln!(out)
}

/// Numbered listing of every hit: index and title, link in parentheses,
/// a rule, then the description between blank lines.
pub fn print_results(
    out: &mut impl Write,
    painter: &Painter,
    results: &SearchResponse,
) -> io::Result<()> {
    writeln!(out)?;
    for hit in results.hits() {
        writeln!(out, "{}", painter.title(&format!("{}: {}", hit.index, hit.title)))?;
        writeln!(out, "{}", painter.title(&format!("({})", hit.link)))?;
        writeln!(out, "{}", painter.title(RULE))?;
        writeln!(out)?;
        writeln!(out, "{}", painter.info(hit.description))?;
        writeln!(out)?;
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    /// `== x ==`
    Section,
    /// `=== x ===`
    Subsection,
    /// Four or more `=`.
    Deeper,
}

/// Heading level of an extract line, judged only by which runs of `=` it
/// contains.
pub fn classify(line: &str) -> Option<HeadingLevel> {
    if !line.contains("==") {
        None
    } else if !line.contains("===") {
        Some(HeadingLevel::Section)
    } else if !line.contains("====") {
        Some(HeadingLevel::Subsection)
    } else {
        Some(HeadingLevel::Deeper)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleLine {
    Heading { level: HeadingLevel, text: String },
    Body(String),
}

/// Split an extract into headings and body lines.
///
/// The line after every heading belongs to that heading: it is emitted as
/// body text without being classified itself. A heading directly followed
/// by another heading therefore shows the second one as plain text, and a
/// heading on the last line consumes nothing.
pub fn parse_extract(extract: &str) -> Vec<ArticleLine> {
    let mut lines = extract.lines();
    let mut parsed = Vec::new();
    while let Some(line) = lines.next() {
        if let Some(level) = classify(line) {
            parsed.push(ArticleLine::Heading {
                level,
                text: line.replace('=', ""),
            });
            match lines.next() {
                Some(paired) => parsed.push(ArticleLine::Body(paired.to_string())),
                None => break,
            }
        } else {
            parsed.push(ArticleLine::Body(line.to_string()));
        }
    }
    parsed
}

/// The extract with headings highlighted.
pub fn print_extract(out: &mut impl Write, painter: &Painter, extract: &str) -> io::Result<()> {
    for line in parse_extract(extract) {
        match line {
            ArticleLine::Heading { level, text } => match level {
                HeadingLevel::Section => {
                    writeln!(out, "{}", painter.title(&text))?;
                    writeln!(out, "{}", painter.title(SUB_RULE))?;
                }
                HeadingLevel::Subsection => {
                    writeln!(out, "{}", painter.title(&format!(">{text}")))?;
                }
                HeadingLevel::Deeper => {
                    writeln!(out, "{}", painter.title(&format!("   >>{text}")))?;
                }
            },
            ArticleLine::Body(text) => writeln!(out, "{}", painter.info(&text))?,
        }
    }
    Ok(())
}

/// Title banner followed by the highlighted extract.
pub fn print_article(
    out: &mut impl Write,
    painter: &Painter,
    page: &ArticlePage,
) -> io::Result<()> {
    writeln!(out, "{}", painter.title(RULE))?;
    writeln!(out, "{}", painter.title(&format!("= {}", page.title)))?;
    writeln!(out, "{}", painter.title(RULE))?;
    print_extract(out, painter, &page.extract)
}
