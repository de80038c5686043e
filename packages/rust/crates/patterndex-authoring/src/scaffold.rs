//! New pattern files and category folders from the templates.

use std::path::{Path, PathBuf};

use patterndex_scanner::{CorpusConfig, CorpusScanner};
use patterndex_types::{CancelFlag, Slug};
use patterndex_validator::infer_exemplar_language;

use crate::atomic::atomic_write_text;
use crate::error::{AuthoringError, AuthoringResult};
use crate::template::{
    BUILTIN_PATTERN_TEMPLATE, BUILTIN_README_TEMPLATE, leftover_placeholders, load_template,
    pascal_case, substitute, title_case,
};

/// Fence tag used when neither the configuration nor the corpus names one.
pub const DEFAULT_EXEMPLAR_LANGUAGE: &str = "go";

/// A file written from a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scaffolded {
    /// Absolute path of the new file.
    pub path: PathBuf,
    /// Root-relative path of the new file.
    pub rel_path: String,
    /// Placeholders left for the author.
    pub placeholders: Vec<String>,
}

/// Template-driven authoring over one corpus root.
#[derive(Debug, Clone)]
pub struct Authoring {
    root: PathBuf,
    config: CorpusConfig,
}

impl Authoring {
    /// Authoring rooted at `root` with the effective configuration.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, config: CorpusConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Configured exemplar language, else the one the corpus already uses,
    /// else [`DEFAULT_EXEMPLAR_LANGUAGE`].
    ///
    /// # Errors
    ///
    /// Propagates scan failures when the language has to be inferred.
    pub fn exemplar_language(&self) -> AuthoringResult<String> {
        if let Some(language) = &self.config.exemplar_language {
            return Ok(language.clone());
        }
        let corpus = CorpusScanner::new(self.config.clone()).scan(&self.root, &CancelFlag::new())?;
        Ok(infer_exemplar_language(&corpus)
            .unwrap_or_else(|| DEFAULT_EXEMPLAR_LANGUAGE.to_string()))
    }

    /// Write `<category>/<slug(name)>.md` from the pattern template.
    ///
    /// # Errors
    ///
    /// `InvalidName` when `name` yields no slug, `UnknownCategory` when the
    /// folder is missing, `TargetExists` when the file is already there, and
    /// `Io` for filesystem failures.
    pub fn new_pattern(
        &self,
        category: &str,
        name: &str,
        intent: Option<&str>,
    ) -> AuthoringResult<Scaffolded> {
        let name = name.trim();
        let slug = Slug::from_name(name).map_err(|source| AuthoringError::InvalidName {
            name: name.to_string(),
            source,
        })?;
        let folder = self.root.join(category);
        let nested = category.contains(['/', '\\']);
        if category.is_empty() || category.starts_with('.') || nested || !folder.is_dir() {
            return Err(AuthoringError::UnknownCategory {
                category: category.to_string(),
                folder,
            });
        }
        let target = folder.join(slug.file_name());
        if target.exists() {
            return Err(AuthoringError::TargetExists(target));
        }

        let template = load_template(
            &self.root,
            &self.config.pattern_template,
            BUILTIN_PATTERN_TEMPLATE,
        )?;
        let language = self.exemplar_language()?;
        let pattern_type = pascal_case(name);
        let category_title = title_case(category);
        let mut values = vec![
            ("PatternName", name),
            ("PatternType", pattern_type.as_str()),
            ("pattern-slug", slug.as_str()),
            ("Category", category_title.as_str()),
            ("category", category),
            ("language", language.as_str()),
        ];
        if let Some(intent) = intent.map(str::trim).filter(|intent| !intent.is_empty()) {
            values.push(("Intent", intent));
        }
        let content = substitute(&template, &values);
        write_new(&target, &content, format!("{category}/{}", slug.file_name()))
    }

    /// Create `<name>/README.md` from the category template.
    ///
    /// # Errors
    ///
    /// `InvalidName` when `name` is not a kebab-case slug, `TargetExists`
    /// when the README is already there, and `Io` for filesystem failures.
    pub fn new_category(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> AuthoringResult<Scaffolded> {
        let slug = Slug::new(name.trim()).map_err(|source| AuthoringError::InvalidName {
            name: name.to_string(),
            source,
        })?;
        let target = self.root.join(slug.as_str()).join("README.md");
        if target.exists() {
            return Err(AuthoringError::TargetExists(target));
        }

        let template = load_template(
            &self.root,
            &self.config.readme_template,
            BUILTIN_README_TEMPLATE,
        )?;
        let category_title = title_case(slug.as_str());
        let mut values = vec![
            ("CategoryName", category_title.as_str()),
            ("category", slug.as_str()),
        ];
        if let Some(description) = description.map(str::trim).filter(|text| !text.is_empty()) {
            values.push(("Description", description));
        }
        let content = substitute(&template, &values);
        write_new(&target, &content, format!("{}/README.md", slug.as_str()))
    }
}

fn write_new(
    target: &Path,
    content: &str,
    rel_path: String,
) -> AuthoringResult<Scaffolded> {
    atomic_write_text(target, content)?;
    let placeholders = leftover_placeholders(content);
    if !placeholders.is_empty() {
        tracing::info!(
            path = %rel_path,
            placeholders = %placeholders.join(", "),
            "placeholders left for the author"
        );
    }
    Ok(Scaffolded {
        path: target.to_path_buf(),
        rel_path,
        placeholders,
    })
}
