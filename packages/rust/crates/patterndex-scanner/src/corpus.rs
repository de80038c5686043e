//! Immutable snapshot of a pattern corpus.

use std::path::PathBuf;

use crate::config::CorpusConfig;
use crate::markdown::MarkdownDocument;

/// One loaded Markdown file.
#[derive(Debug, Clone)]
pub struct MarkdownFile {
    /// Root-relative, `/`-separated path (`cloud/cache.md`).
    pub rel_path: String,
    /// Absolute path on disk.
    pub abs_path: PathBuf,
    /// Raw file text.
    pub content: String,
    /// Parsed structure.
    pub doc: MarkdownDocument,
}

/// A pattern file: `<category>/<slug>.md`.
#[derive(Debug, Clone)]
pub struct PatternFile {
    /// Loaded file.
    pub file: MarkdownFile,
    /// Containing folder name.
    pub category: String,
    /// File stem (the slug, when well-formed).
    pub stem: String,
}

impl PatternFile {
    /// Root-relative path.
    #[must_use]
    pub fn rel_path(&self) -> &str {
        &self.file.rel_path
    }

    /// First level-1 heading, falling back to the stem.
    #[must_use]
    pub fn title(&self) -> &str {
        self.file.doc.title().unwrap_or(&self.stem)
    }

    /// The blockquote or paragraph directly under a leading title.
    #[must_use]
    pub fn intent(&self) -> Option<&str> {
        self.file.doc.intent()
    }
}

/// A category folder with its README and pattern files.
#[derive(Debug, Clone)]
pub struct CategoryFolder {
    /// Folder name.
    pub name: String,
    /// `<name>/README.md`, when present.
    pub readme: Option<MarkdownFile>,
    /// Pattern files sorted by path.
    pub patterns: Vec<PatternFile>,
}

impl CategoryFolder {
    /// Root-relative path of the category README.
    #[must_use]
    pub fn readme_path(&self) -> String {
        format!("{}/README.md", self.name)
    }
}

/// Everything the validator and index generator look at.
#[derive(Debug, Clone)]
pub struct Corpus {
    /// Corpus root directory.
    pub root: PathBuf,
    /// Effective configuration.
    pub config: CorpusConfig,
    /// Root `README.md`, when present.
    pub root_readme: Option<MarkdownFile>,
    /// Category folders sorted by name.
    pub categories: Vec<CategoryFolder>,
}

impl Corpus {
    /// Every pattern file, in path order.
    pub fn patterns(&self) -> impl Iterator<Item = &PatternFile> {
        self.categories
            .iter()
            .flat_map(|category| category.patterns.iter())
    }

    /// Number of pattern files across all categories.
    #[must_use]
    pub fn pattern_total(&self) -> usize {
        self.categories
            .iter()
            .map(|category| category.patterns.len())
            .sum()
    }

    /// Category by folder name.
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&CategoryFolder> {
        self.categories.iter().find(|category| category.name == name)
    }

    /// Pattern at root-relative `rel_path`.
    #[must_use]
    pub fn pattern_by_path(&self, rel_path: &str) -> Option<&PatternFile> {
        let (category, _file) = rel_path.split_once('/')?;
        self.category(category)?
            .patterns
            .iter()
            .find(|pattern| pattern.rel_path() == rel_path)
    }

    /// `rel_path` names a pattern file of this corpus.
    #[must_use]
    pub fn is_pattern_path(&self, rel_path: &str) -> bool {
        self.pattern_by_path(rel_path).is_some()
    }

    /// Every loaded Markdown file: root README, then per category its
    /// README followed by its patterns.
    pub fn documents(&self) -> impl Iterator<Item = &MarkdownFile> {
        self.root_readme.iter().chain(self.categories.iter().flat_map(|category| {
            category
                .readme
                .iter()
                .chain(category.patterns.iter().map(|pattern| &pattern.file))
        }))
    }

    /// Absolute path of root-relative `rel_path`.
    #[must_use]
    pub fn absolute(&self, rel_path: &str) -> PathBuf {
        rel_path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.root.clone(), |acc, segment| acc.join(segment))
    }

    /// Root-relative `rel_path` exists on disk (file or folder).
    #[must_use]
    pub fn exists(&self, rel_path: &str) -> bool {
        self.absolute(rel_path).exists()
    }
}
