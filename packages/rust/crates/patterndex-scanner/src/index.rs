//! Reading what the index documents declare.
//!
//! The root README declares categories with their file counts and an
//! alphabetical list of patterns; each category README carries a
//! `File | Content | Usage` table and a sentence stating its pattern count.

use regex::Regex;
use std::sync::LazyLock;

use patterndex_types::normalize_heading;

use crate::markdown::{BlockKind, MarkdownDocument, Table, TableCell};
use crate::paths::{LinkTarget, resolve_link};
use crate::regex_util::compile_regex;

static COUNT_STATEMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex(r"(?i)\b(\d+)\s+(?:design\s+)?(?:pattern\s+files|patterns?|files)\b")
});

/// Header the category index table must carry.
pub const CATEGORY_INDEX_HEADER: [&str; 3] = ["File", "Content", "Usage"];

/// A category row in a root README table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredCategory {
    /// Folder name the row points at.
    pub name: String,
    /// Declared file count, if the row has one.
    pub declared: Option<usize>,
    /// 1-based line of the row.
    pub line: usize,
}

/// One link of the alphabetical index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphabeticalEntry {
    /// Link text.
    pub text: String,
    /// Destination as written.
    pub url: String,
    /// 1-based line.
    pub line: usize,
}

/// What the root README declares.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootIndex {
    /// Category rows across every table, in document order.
    pub categories: Vec<DeclaredCategory>,
    /// Count in a `Total` row, with its line.
    pub declared_total: Option<(usize, usize)>,
    /// Links under the alphabetical heading; `None` without such a heading.
    pub alphabetical: Option<Vec<AlphabeticalEntry>>,
}

fn single_segment(path: &str) -> Option<&str> {
    (!path.is_empty() && !path.contains('/')).then_some(path)
}

fn category_from_cell(cell: &TableCell) -> Option<String> {
    for url in &cell.links {
        match resolve_link("README.md", url) {
            LinkTarget::Relative { path, is_dir } => {
                if let Some(name) = path.strip_suffix("/README.md") {
                    return single_segment(name).map(ToString::to_string);
                }
                if is_dir || !path.contains('.') {
                    return single_segment(&path).map(ToString::to_string);
                }
            }
            _ => {}
        }
    }
    let text = cell.bare_text();
    let name = text.strip_prefix("./").unwrap_or(text).strip_suffix('/')?;
    if name.is_empty() || name.contains(char::is_whitespace) {
        return None;
    }
    single_segment(name).map(ToString::to_string)
}

fn first_count(cells: &[TableCell]) -> Option<usize> {
    cells.iter().skip(1).find_map(TableCell::as_count)
}

impl RootIndex {
    /// Read declarations out of the root README.
    #[must_use]
    pub fn parse(doc: &MarkdownDocument) -> Self {
        let mut index = Self::default();
        for table in &doc.tables {
            for (line, cells) in &table.rows {
                let Some(first) = cells.first() else {
                    continue;
                };
                if first.bare_text().eq_ignore_ascii_case("total") {
                    if index.declared_total.is_none() {
                        index.declared_total = first_count(cells).map(|count| (count, *line));
                    }
                    continue;
                }
                if let Some(name) = category_from_cell(first) {
                    index.categories.push(DeclaredCategory {
                        name,
                        declared: first_count(cells),
                        line: *line,
                    });
                }
            }
        }

        let heading = doc
            .headings
            .iter()
            .position(|heading| normalize_heading(&heading.text).contains("alphabetical"));
        index.alphabetical = heading.map(|heading| {
            doc.links_in_section(heading)
                .filter(|link| !link.is_image)
                .map(|link| AlphabeticalEntry {
                    text: link.text.clone(),
                    url: link.url.clone(),
                    line: link.line,
                })
                .collect()
        });
        index
    }

    /// Folder names declared anywhere in the root README.
    pub fn declared_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|category| category.name.as_str())
    }
}

/// A row of the category index table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRow {
    /// First link of the `File` cell.
    pub url: Option<String>,
    /// Text of the `File` cell.
    pub text: String,
    /// 1-based line.
    pub line: usize,
}

/// The `File | Content | Usage` table of a category README.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexTable {
    /// Header labels as written.
    pub header: Vec<String>,
    /// 1-based line of the header.
    pub line: usize,
    /// Body rows.
    pub rows: Vec<IndexRow>,
}

impl IndexTable {
    /// Header is exactly `File | Content | Usage`.
    #[must_use]
    pub fn has_expected_header(&self) -> bool {
        self.header.len() == CATEGORY_INDEX_HEADER.len()
            && self
                .header
                .iter()
                .zip(CATEGORY_INDEX_HEADER)
                .all(|(label, wanted)| label.eq_ignore_ascii_case(wanted))
    }

    fn from_table(table: &Table) -> Self {
        Self {
            header: table
                .header
                .iter()
                .map(|cell| cell.bare_text().to_string())
                .collect(),
            line: table.line,
            rows: table
                .rows
                .iter()
                .filter_map(|(line, cells)| {
                    let first = cells.first()?;
                    Some(IndexRow {
                        url: first.links.first().cloned(),
                        text: first.bare_text().to_string(),
                        line: *line,
                    })
                })
                .collect(),
        }
    }
}

/// What a category README declares.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryIndex {
    /// First table whose first column is `File`.
    pub table: Option<IndexTable>,
    /// First `<N> patterns` statement with its line.
    pub count_statement: Option<(usize, usize)>,
}

impl CategoryIndex {
    /// Read declarations out of a category README.
    #[must_use]
    pub fn parse(doc: &MarkdownDocument) -> Self {
        let table = doc
            .tables
            .iter()
            .find(|table| {
                table
                    .header
                    .first()
                    .is_some_and(|cell| cell.bare_text().eq_ignore_ascii_case("file"))
            })
            .map(IndexTable::from_table);

        let intent_block = match (doc.blocks.first(), doc.blocks.get(1)) {
            (Some(title), Some(next))
                if title.kind == BlockKind::Heading(1) && next.kind == BlockKind::BlockQuote =>
            {
                Some(1)
            }
            _ => None,
        };
        let statements: Vec<(usize, usize, usize)> = doc
            .blocks
            .iter()
            .enumerate()
            .filter(|(_, block)| {
                matches!(
                    block.kind,
                    BlockKind::Heading(_)
                        | BlockKind::Paragraph
                        | BlockKind::BlockQuote
                        | BlockKind::List
                )
            })
            .filter_map(|(position, block)| {
                let caps = COUNT_STATEMENT_REGEX.captures(&block.text)?;
                let count = caps.get(1)?.as_str().parse::<usize>().ok()?;
                Some((position, count, block.line))
            })
            .collect();

        // Nearest statement above the index table, else the first one outside
        // the description blockquote.
        let table_line = table.as_ref().map(|table| table.line);
        let count_statement = table_line
            .and_then(|line| statements.iter().rev().find(|(_, _, at)| *at < line))
            .or_else(|| {
                statements
                    .iter()
                    .find(|(position, _, _)| Some(*position) != intent_block)
            })
            .or_else(|| statements.first())
            .map(|(_, count, line)| (*count, *line));

        Self {
            table,
            count_statement,
        }
    }
}
