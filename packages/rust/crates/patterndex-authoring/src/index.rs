//! Taxonomy / index generator.
//!
//! Renders the root category table, the alphabetical index and each
//! category's `File | Content | Usage` table from the files on disk, and
//! splices them between `<!-- patterndex:NAME -->` / `<!-- /patterndex:NAME -->`
//! markers.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::PathBuf;

use patterndex_scanner::{CategoryFolder, Corpus, LinkTarget, MarkdownFile, resolve_link};

use crate::atomic::atomic_write_text;
use crate::error::{AuthoringError, AuthoringResult};

/// Marker name of the root category table.
pub const CATEGORIES_BLOCK: &str = "categories";
/// Marker name of the root alphabetical index.
pub const ALPHABETICAL_BLOCK: &str = "alphabetical";
/// Marker name of a category README's pattern index.
pub const CATEGORY_INDEX_BLOCK: &str = "index";

/// Opening marker comment of block `name`.
#[must_use]
pub fn open_marker(name: &str) -> String {
    format!("<!-- patterndex:{name} -->")
}

/// Closing marker comment of block `name`.
#[must_use]
pub fn close_marker(name: &str) -> String {
    format!("<!-- /patterndex:{name} -->")
}

fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// `| Category | Files | Description |` with a `**Total**` row.
#[must_use]
pub fn render_category_table(corpus: &Corpus) -> String {
    let mut out = String::from("| Category | Files | Description |\n|----------|-------|-------------|\n");
    for folder in &corpus.categories {
        let description = folder
            .readme
            .as_ref()
            .and_then(|readme| readme.doc.intent())
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "| [{name}/](./{name}/README.md) | {count} | {description} |",
            name = folder.name,
            count = folder.patterns.len(),
            description = cell(description),
        );
    }
    let _ = writeln!(out, "| **Total** | **{}** | |", corpus.pattern_total());
    out
}

/// `- [Title](./cat/slug.md) — cat`, sorted by title then path.
#[must_use]
pub fn render_alphabetical_index(corpus: &Corpus) -> String {
    let mut entries: Vec<(String, &str, &str, &str)> = corpus
        .patterns()
        .map(|pattern| {
            (
                pattern.title().to_lowercase(),
                pattern.title(),
                pattern.rel_path(),
                pattern.category.as_str(),
            )
        })
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.2.cmp(b.2)));

    let mut out = String::new();
    for (_, title, path, category) in entries {
        let _ = writeln!(out, "- [{title}](./{path}) — {category}");
    }
    out
}

fn existing_usage(readme: &MarkdownFile) -> BTreeMap<String, String> {
    let mut usage = BTreeMap::new();
    let Some(table) = readme.doc.tables.iter().find(|table| {
        table
            .header
            .first()
            .is_some_and(|first| first.bare_text().eq_ignore_ascii_case("file"))
    }) else {
        return usage;
    };
    let Some(column) = table.column("Usage") else {
        return usage;
    };
    for (_line, cells) in &table.rows {
        let (Some(first), Some(usage_cell)) = (cells.first(), cells.get(column)) else {
            continue;
        };
        let Some(url) = first.links.first() else {
            continue;
        };
        if let LinkTarget::Relative { path, .. } = resolve_link(&readme.rel_path, url) {
            usage.insert(path, usage_cell.text.clone());
        }
    }
    usage
}

/// Count statement plus `| File | Content | Usage |` rows for one category.
///
/// Usage cells already present in the README are carried over.
#[must_use]
pub fn render_category_index(folder: &CategoryFolder) -> String {
    let usage = folder.readme.as_ref().map(existing_usage).unwrap_or_default();
    let count = folder.patterns.len();
    let noun = if count == 1 { "pattern" } else { "patterns" };
    let mut out = format!(
        "This category holds {count} {noun}.\n\n| File | Content | Usage |\n|------|---------|-------|\n"
    );
    for pattern in &folder.patterns {
        let file = format!("{}.md", pattern.stem);
        let _ = writeln!(
            out,
            "| [{file}](./{file}) | {} | {} |",
            cell(pattern.intent().unwrap_or(pattern.title())),
            cell(usage.get(pattern.rel_path()).map_or("", String::as_str)),
        );
    }
    out
}

/// Replace the body of block `name` in `content`; `None` without markers.
#[must_use]
pub fn replace_block(content: &str, name: &str, body: &str) -> Option<String> {
    let open = open_marker(name);
    let close = close_marker(name);
    let open_at = content.find(&open)?;
    let body_start = open_at + open.len();
    let close_at = body_start + content[body_start..].find(&close)?;
    Some(format!(
        "{}\n\n{}\n{}",
        &content[..body_start],
        body.trim_end_matches('\n').to_string() + "\n",
        &content[close_at..]
    ))
}

/// Rendered root blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedIndex {
    /// Body of the `categories` block.
    pub categories: String,
    /// Body of the `alphabetical` block.
    pub alphabetical: String,
}

/// Render both root blocks from `corpus`.
#[must_use]
pub fn generate_index(corpus: &Corpus) -> GeneratedIndex {
    GeneratedIndex {
        categories: render_category_table(corpus),
        alphabetical: render_alphabetical_index(corpus),
    }
}

fn missing_marker(path: PathBuf, name: &str) -> AuthoringError {
    AuthoringError::MissingMarker {
        path,
        marker: open_marker(name),
    }
}

/// Rewrite the generated blocks on disk and return the root-relative paths
/// that changed.
///
/// The root README must carry both root markers; category READMEs are
/// rewritten only when they carry an `index` block.
///
/// # Errors
///
/// `MissingMarker` when the root README lacks a marker pair, `Io` when it
/// is missing or a write fails.
pub fn write_index(corpus: &Corpus) -> AuthoringResult<Vec<String>> {
    let root_path = corpus.root.join("README.md");
    let Some(root_readme) = &corpus.root_readme else {
        return Err(AuthoringError::io(
            root_path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "root README.md not found"),
        ));
    };

    let generated = generate_index(corpus);
    let with_categories =
        replace_block(&root_readme.content, CATEGORIES_BLOCK, &generated.categories)
            .ok_or_else(|| missing_marker(root_path.clone(), CATEGORIES_BLOCK))?;
    let rewritten = replace_block(&with_categories, ALPHABETICAL_BLOCK, &generated.alphabetical)
        .ok_or_else(|| missing_marker(root_path.clone(), ALPHABETICAL_BLOCK))?;

    let mut changed = Vec::new();
    if rewritten != root_readme.content {
        atomic_write_text(&root_path, &rewritten)?;
        changed.push(root_readme.rel_path.clone());
    }

    for folder in &corpus.categories {
        let Some(readme) = &folder.readme else {
            continue;
        };
        let Some(updated) = replace_block(
            &readme.content,
            CATEGORY_INDEX_BLOCK,
            &render_category_index(folder),
        ) else {
            tracing::debug!(path = %readme.rel_path, "no index markers; left untouched");
            continue;
        };
        if updated != readme.content {
            atomic_write_text(&readme.abs_path, &updated)?;
            changed.push(readme.rel_path.clone());
        }
    }

    tracing::info!(changed = changed.len(), "index regenerated");
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_block_keeps_surroundings() {
        let content = "# Top\n\n<!-- patterndex:categories -->\nold\n<!-- /patterndex:categories -->\n\nTail\n";
        let replaced = replace_block(content, CATEGORIES_BLOCK, "| a |\n").unwrap();
        assert_eq!(
            replaced,
            "# Top\n\n<!-- patterndex:categories -->\n\n| a |\n\n<!-- /patterndex:categories -->\n\nTail\n"
        );
        assert_eq!(
            replace_block(&replaced, CATEGORIES_BLOCK, "| a |\n").unwrap(),
            replaced
        );
    }

    #[test]
    fn test_replace_block_needs_both_markers() {
        assert!(replace_block("<!-- patterndex:index -->", CATEGORY_INDEX_BLOCK, "x").is_none());
        assert!(replace_block("nothing", CATEGORY_INDEX_BLOCK, "x").is_none());
    }

    #[test]
    fn test_cell_escapes_pipes() {
        assert_eq!(cell("a | b"), "a \\| b");
    }
}
