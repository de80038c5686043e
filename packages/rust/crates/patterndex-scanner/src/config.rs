//! Corpus configuration loader.
//!
//! Loads and merges, later layers winning key by key:
//! - Built-in defaults
//! - `<root>/.patterndex.yaml` (optional)
//! - An explicit file passed by the caller (`--conf`, must exist)

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use patterndex_types::{CorpusError, CorpusResult};
use serde::Deserialize;

/// File name of the per-corpus configuration at the root.
pub const CONFIG_FILE_NAME: &str = ".patterndex.yaml";

const DEFAULT_DIAGRAM_FENCES: &[&str] = &["text", "ascii", "txt", "plaintext", "diagram"];
const DEFAULT_IGNORE_DIRS: &[&str] = &["target", "node_modules", ".git"];
const DEFAULT_DTO_CATEGORIES: &[&str] = &["enterprise"];
const DEFAULT_PATTERN_TEMPLATE: &str = "TEMPLATE-PATTERN.md";
const DEFAULT_README_TEMPLATE: &str = "TEMPLATE-README.md";

/// One configuration layer as written on disk; every key optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorpusConfigFile {
    /// Expected fence tag for V8.
    pub exemplar_language: Option<String>,
    /// Fence tags treated as diagrams.
    pub diagram_fences: Option<Vec<String>>,
    /// Additional fence tags tolerated by V8.
    pub extra_fences: Option<Vec<String>>,
    /// Globs of top-level folders that are not categories.
    pub ignore_dirs: Option<Vec<String>>,
    /// Categories whose patterns carry DTO tags.
    pub dto_categories: Option<Vec<String>>,
    /// Category READMEs must state their pattern count.
    pub require_count_statement: Option<bool>,
    /// Pattern template file name at the root.
    pub pattern_template: Option<String>,
    /// Category README template file name at the root.
    pub readme_template: Option<String>,
}

impl CorpusConfigFile {
    fn merge(self, overlay: Self) -> Self {
        Self {
            exemplar_language: overlay.exemplar_language.or(self.exemplar_language),
            diagram_fences: overlay.diagram_fences.or(self.diagram_fences),
            extra_fences: overlay.extra_fences.or(self.extra_fences),
            ignore_dirs: overlay.ignore_dirs.or(self.ignore_dirs),
            dto_categories: overlay.dto_categories.or(self.dto_categories),
            require_count_statement: overlay
                .require_count_statement
                .or(self.require_count_statement),
            pattern_template: overlay.pattern_template.or(self.pattern_template),
            readme_template: overlay.readme_template.or(self.readme_template),
        }
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

fn lowercase_all(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|value| value.trim().to_lowercase())
        .filter(|value| !value.is_empty())
        .collect()
}

/// Resolved configuration for one corpus.
#[derive(Debug, Clone)]
pub struct CorpusConfig {
    /// Expected fence tag; `None` means infer from the corpus.
    pub exemplar_language: Option<String>,
    /// Fence tags treated as diagrams (lowercase).
    pub diagram_fences: Vec<String>,
    /// Additional fence tags tolerated by V8 (lowercase).
    pub extra_fences: Vec<String>,
    /// Categories subject to V7.
    pub dto_categories: Vec<String>,
    /// Category READMEs must state their pattern count.
    pub require_count_statement: bool,
    /// Pattern template file name at the root.
    pub pattern_template: String,
    /// Category README template file name at the root.
    pub readme_template: String,
    ignore_set: GlobSet,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        let ignore_dirs = owned(DEFAULT_IGNORE_DIRS);
        let ignore_set = build_ignore_set(&ignore_dirs, Path::new(CONFIG_FILE_NAME))
            .unwrap_or_else(|_| GlobSet::empty());
        Self {
            exemplar_language: None,
            diagram_fences: owned(DEFAULT_DIAGRAM_FENCES),
            extra_fences: Vec::new(),
            dto_categories: owned(DEFAULT_DTO_CATEGORIES),
            require_count_statement: true,
            pattern_template: DEFAULT_PATTERN_TEMPLATE.to_string(),
            readme_template: DEFAULT_README_TEMPLATE.to_string(),
            ignore_set,
        }
    }
}

fn build_ignore_set(patterns: &[String], origin: &Path) -> CorpusResult<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|error| CorpusError::Config {
            path: origin.to_path_buf(),
            message: format!("invalid ignore_dirs glob '{pattern}': {error}"),
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|error| CorpusError::Config {
        path: origin.to_path_buf(),
        message: error.to_string(),
    })
}

impl CorpusConfig {
    /// Load defaults, then `<root>/.patterndex.yaml`, then `explicit`.
    ///
    /// # Errors
    ///
    /// Returns `CorpusError::Config` when a present file is unreadable,
    /// unparsable, or carries an invalid ignore glob; an explicit file that
    /// does not exist is also an error.
    pub fn load(root: &Path, explicit: Option<&Path>) -> CorpusResult<Self> {
        let root_file = root.join(CONFIG_FILE_NAME);
        let mut merged = if root_file.is_file() {
            load_one(&root_file)?
        } else {
            CorpusConfigFile::default()
        };
        let mut origin = root_file;
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(CorpusError::Config {
                    path: path.to_path_buf(),
                    message: "configuration file does not exist".to_string(),
                });
            }
            merged = merged.merge(load_one(path)?);
            origin = path.to_path_buf();
        }
        Self::resolve(merged, &origin)
    }

    /// Build a resolved configuration from one merged layer.
    ///
    /// # Errors
    ///
    /// Returns `CorpusError::Config` when an ignore glob does not compile.
    pub fn resolve(file: CorpusConfigFile, origin: &Path) -> CorpusResult<Self> {
        let ignore_dirs = file
            .ignore_dirs
            .unwrap_or_else(|| owned(DEFAULT_IGNORE_DIRS));
        let ignore_set = build_ignore_set(&ignore_dirs, origin)?;

        Ok(Self {
            exemplar_language: file
                .exemplar_language
                .map(|value| value.trim().to_lowercase())
                .filter(|value| !value.is_empty()),
            diagram_fences: lowercase_all(
                file.diagram_fences
                    .unwrap_or_else(|| owned(DEFAULT_DIAGRAM_FENCES)),
            ),
            extra_fences: lowercase_all(file.extra_fences.unwrap_or_default()),
            dto_categories: file
                .dto_categories
                .unwrap_or_else(|| owned(DEFAULT_DTO_CATEGORIES)),
            require_count_statement: file.require_count_statement.unwrap_or(true),
            pattern_template: file
                .pattern_template
                .unwrap_or_else(|| DEFAULT_PATTERN_TEMPLATE.to_string()),
            readme_template: file
                .readme_template
                .unwrap_or_else(|| DEFAULT_README_TEMPLATE.to_string()),
            ignore_set,
        })
    }

    /// Top-level folder `name` is not a category.
    #[must_use]
    pub fn is_ignored_dir(&self, name: &str) -> bool {
        name.starts_with('.') || self.ignore_set.is_match(name)
    }

    /// `category` is subject to the DTO-tag grammar.
    #[must_use]
    pub fn is_dto_category(&self, category: &str) -> bool {
        self.dto_categories.iter().any(|name| name == category)
    }

    /// Fence tag `language` marks a diagram.
    #[must_use]
    pub fn is_diagram_fence(&self, language: &str) -> bool {
        let wanted = language.to_lowercase();
        self.diagram_fences.iter().any(|fence| *fence == wanted)
    }

    /// Fence tag `language` is tolerated besides the exemplar language.
    #[must_use]
    pub fn is_extra_fence(&self, language: &str) -> bool {
        let wanted = language.to_lowercase();
        self.extra_fences.iter().any(|fence| *fence == wanted)
    }
}

fn load_one(path: &Path) -> CorpusResult<CorpusConfigFile> {
    let raw = std::fs::read_to_string(path).map_err(|error| CorpusError::Config {
        path: PathBuf::from(path),
        message: error.to_string(),
    })?;
    if raw.trim().is_empty() {
        return Ok(CorpusConfigFile::default());
    }
    let parsed = serde_yaml::from_str::<CorpusConfigFile>(&raw).map_err(|error| {
        CorpusError::Config {
            path: PathBuf::from(path),
            message: error.to_string(),
        }
    })?;
    tracing::debug!(path = %path.display(), "loaded corpus configuration layer");
    Ok(parsed)
}
