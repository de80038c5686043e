//! Corpus walker.
//!
//! Discovers category folders and Markdown files with `walkdir` (two levels
//! deep, single-threaded), then reads and parses every file in parallel with
//! `rayon`. The cancel flag is checked before each file.

use std::path::{Path, PathBuf};

use patterndex_types::{CancelFlag, CorpusError, CorpusResult};
use rayon::prelude::*;
use walkdir::{DirEntry, WalkDir};

use crate::config::CorpusConfig;
use crate::corpus::{CategoryFolder, Corpus, MarkdownFile, PatternFile};
use crate::markdown::parse_markdown;
use crate::paths::relative_to_root;

/// Where a discovered file belongs.
#[derive(Debug, Clone)]
enum Slot {
    RootReadme,
    CategoryReadme(String),
    Pattern { category: String, stem: String },
}

fn is_readme(name: &str) -> bool {
    name.eq_ignore_ascii_case("README.md")
}

fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "md")
}

/// Walks a corpus root into a [`Corpus`].
#[derive(Debug, Clone, Default)]
pub struct CorpusScanner {
    config: CorpusConfig,
}

impl CorpusScanner {
    /// Scanner with the given effective configuration.
    #[must_use]
    pub fn new(config: CorpusConfig) -> Self {
        Self { config }
    }

    /// Effective configuration.
    #[must_use]
    pub fn config(&self) -> &CorpusConfig {
        &self.config
    }

    fn keep_entry(&self, entry: &DirEntry) -> bool {
        if entry.depth() != 1 || !entry.file_type().is_dir() {
            return true;
        }
        let name = entry.file_name().to_string_lossy();
        !self.config.is_ignored_dir(&name)
    }

    fn discover(&self, root: &Path) -> CorpusResult<(Vec<String>, Vec<(Slot, PathBuf)>)> {
        let mut categories = Vec::new();
        let mut files = Vec::new();

        let walker = WalkDir::new(root)
            .min_depth(1)
            .max_depth(2)
            .follow_links(false)
            .sort_by(|a, b| a.file_name().cmp(b.file_name()))
            .into_iter()
            .filter_entry(|entry| self.keep_entry(entry));

        for entry in walker {
            let entry = entry.map_err(|error| {
                let path = error
                    .path()
                    .map_or_else(|| root.to_path_buf(), Path::to_path_buf);
                match error.into_io_error() {
                    Some(source) => CorpusError::io(path, source),
                    None => CorpusError::Io {
                        path,
                        source: std::io::Error::other("filesystem loop"),
                    },
                }
            })?;
            let name = entry.file_name().to_string_lossy().to_string();

            if entry.depth() == 1 {
                if entry.file_type().is_dir() {
                    categories.push(name);
                } else if is_readme(&name) {
                    files.push((Slot::RootReadme, entry.into_path()));
                }
                continue;
            }

            if !entry.file_type().is_file() || !is_markdown(entry.path()) {
                continue;
            }
            let Some(category) = entry
                .path()
                .parent()
                .and_then(Path::file_name)
                .map(|folder| folder.to_string_lossy().to_string())
            else {
                continue;
            };
            if is_readme(&name) {
                files.push((Slot::CategoryReadme(category), entry.into_path()));
            } else {
                let stem = entry
                    .path()
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().to_string())
                    .unwrap_or_default();
                files.push((Slot::Pattern { category, stem }, entry.into_path()));
            }
        }
        Ok((categories, files))
    }

    /// Load the corpus under `root`.
    ///
    /// # Errors
    ///
    /// Returns `CorpusError::RootNotFound` when `root` is not a directory,
    /// `CorpusError::Io`/`Encoding` for the first unreadable file, and
    /// `CorpusError::Cancelled` when `cancel` was raised.
    pub fn scan(&self, root: &Path, cancel: &CancelFlag) -> CorpusResult<Corpus> {
        if !root.is_dir() {
            return Err(CorpusError::RootNotFound(root.to_path_buf()));
        }
        cancel.check()?;

        let (category_names, files) = self.discover(root)?;
        tracing::debug!(
            root = %root.display(),
            categories = category_names.len(),
            files = files.len(),
            "discovered corpus files"
        );

        let loaded: Vec<(Slot, MarkdownFile)> = files
            .into_par_iter()
            .map(|(slot, abs_path)| {
                cancel.check()?;
                let content = std::fs::read_to_string(&abs_path)
                    .map_err(|error| CorpusError::io(&abs_path, error))?;
                let rel_path = relative_to_root(&abs_path, root);
                tracing::debug!(path = %rel_path, "parsed markdown file");
                let doc = parse_markdown(&content);
                Ok((
                    slot,
                    MarkdownFile {
                        rel_path,
                        abs_path,
                        content,
                        doc,
                    },
                ))
            })
            .collect::<CorpusResult<Vec<_>>>()?;
        cancel.check()?;

        let mut corpus = Corpus {
            root: root.to_path_buf(),
            config: self.config.clone(),
            root_readme: None,
            categories: category_names
                .into_iter()
                .map(|name| CategoryFolder {
                    name,
                    readme: None,
                    patterns: Vec::new(),
                })
                .collect(),
        };

        for (slot, file) in loaded {
            match slot {
                Slot::RootReadme => corpus.root_readme = Some(file),
                Slot::CategoryReadme(category) => {
                    if let Some(folder) = corpus.categories.iter_mut().find(|c| c.name == category)
                    {
                        folder.readme = Some(file);
                    }
                }
                Slot::Pattern { category, stem } => {
                    if let Some(folder) = corpus.categories.iter_mut().find(|c| c.name == category)
                    {
                        folder.patterns.push(PatternFile {
                            file,
                            category,
                            stem,
                        });
                    }
                }
            }
        }

        for folder in &mut corpus.categories {
            folder
                .patterns
                .sort_by(|a, b| a.file.rel_path.cmp(&b.file.rel_path));
            if folder.readme.is_none() && folder.patterns.is_empty() {
                tracing::warn!(category = %folder.name, "category folder holds no markdown files");
            }
        }

        tracing::info!(
            root = %root.display(),
            categories = corpus.categories.len(),
            patterns = corpus.pattern_total(),
            "corpus scanned"
        );
        Ok(corpus)
    }
}
