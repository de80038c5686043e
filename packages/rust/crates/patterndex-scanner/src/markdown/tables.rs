use comrak::nodes::{AstNode, NodeValue};

use super::nodes::{collect_text, node_line};

/// One cell of a pipe table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableCell {
    /// Plain text of the cell.
    pub text: String,
    /// Link destinations inside the cell, in order.
    pub links: Vec<String>,
}

impl TableCell {
    /// Text with emphasis markers, backticks and surrounding space removed.
    #[must_use]
    pub fn bare_text(&self) -> &str {
        self.text
            .trim()
            .trim_matches(|c: char| c == '*' || c == '_' || c == '`')
            .trim()
    }

    /// Cell parsed as a non-negative integer, if that is all it holds.
    #[must_use]
    pub fn as_count(&self) -> Option<usize> {
        self.bare_text().parse::<usize>().ok()
    }
}

/// A pipe table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Header row.
    pub header: Vec<TableCell>,
    /// Body rows with their source lines.
    pub rows: Vec<(usize, Vec<TableCell>)>,
    /// 1-based source line of the header.
    pub line: usize,
    /// Index of the enclosing heading.
    pub heading: Option<usize>,
}

impl Table {
    /// Lowercased header labels.
    #[must_use]
    pub fn header_labels(&self) -> Vec<String> {
        self.header
            .iter()
            .map(|cell| cell.bare_text().to_lowercase())
            .collect()
    }

    /// Position of the column whose header equals `label` (case-insensitive).
    #[must_use]
    pub fn column(&self, label: &str) -> Option<usize> {
        let wanted = label.to_lowercase();
        self.header_labels()
            .iter()
            .position(|candidate| *candidate == wanted)
    }
}

fn collect_cell_links<'a>(node: &'a AstNode<'a>, out: &mut Vec<String>) {
    for child in node.children() {
        if let NodeValue::Link(link) = &child.data.borrow().value {
            out.push(link.url.clone());
        }
        collect_cell_links(child, out);
    }
}

fn parse_cell<'a>(node: &'a AstNode<'a>) -> TableCell {
    let mut links = Vec::new();
    collect_cell_links(node, &mut links);
    TableCell {
        text: collect_text(node),
        links,
    }
}

pub(super) fn parse_table<'a>(node: &'a AstNode<'a>, heading: Option<usize>) -> Table {
    let mut table = Table {
        line: node_line(node),
        heading,
        ..Table::default()
    };
    for row in node.children() {
        let is_header = matches!(row.data.borrow().value, NodeValue::TableRow(true));
        let cells: Vec<TableCell> = row.children().map(parse_cell).collect();
        if is_header {
            table.header = cells;
        } else {
            table.rows.push((node_line(row), cells));
        }
    }
    table
}
