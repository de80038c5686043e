use patterndex_scanner::{Corpus, RootIndex};

use crate::language::infer_exemplar_language;

/// Read-only inputs shared by every rule of one run.
#[derive(Debug)]
pub struct RuleContext<'a> {
    /// Scanned corpus.
    pub corpus: &'a Corpus,
    /// Declarations of the root README; `None` when it is missing.
    pub root_index: Option<RootIndex>,
    /// Configured or inferred exemplar fence tag.
    pub exemplar_language: Option<String>,
}

impl<'a> RuleContext<'a> {
    /// Parse the root index once and settle the exemplar language.
    #[must_use]
    pub fn new(corpus: &'a Corpus) -> Self {
        let root_index = corpus
            .root_readme
            .as_ref()
            .map(|readme| RootIndex::parse(&readme.doc));
        let exemplar_language = corpus
            .config
            .exemplar_language
            .clone()
            .or_else(|| infer_exemplar_language(corpus));
        if let Some(language) = &exemplar_language {
            tracing::debug!(language = %language, "exemplar language");
        }
        Self {
            corpus,
            root_index,
            exemplar_language,
        }
    }
}
