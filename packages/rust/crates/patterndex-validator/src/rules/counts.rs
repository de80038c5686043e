use std::collections::BTreeSet;

use patterndex_scanner::CategoryIndex;
use patterndex_types::{CancelFlag, CorpusResult, Finding, RuleId};

use super::Rule;
use crate::context::RuleContext;

const ROOT_README: &str = "README.md";

/// V1: declared counts match the files on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryCountRule;

impl Rule for CategoryCountRule {
    fn id(&self) -> RuleId {
        RuleId::V1
    }

    fn check(&self, ctx: &RuleContext<'_>, cancel: &CancelFlag) -> CorpusResult<Vec<Finding>> {
        let corpus = ctx.corpus;
        let mut findings = Vec::new();
        let mut push = |path: &str, reason: String| {
            findings.push(Finding::new(path, RuleId::V1, reason));
        };

        match &ctx.root_index {
            None => push(ROOT_README, "root index README.md missing".to_string()),
            Some(index) => {
                let mut listed = BTreeSet::new();
                for declared in &index.categories {
                    listed.insert(declared.name.as_str());
                    let Some(folder) = corpus.category(&declared.name) else {
                        push(
                            ROOT_README,
                            format!(
                                "category '{}' listed at line {} has no folder",
                                declared.name, declared.line
                            ),
                        );
                        continue;
                    };
                    if let Some(count) = declared.declared {
                        let found = folder.patterns.len();
                        if count != found {
                            push(
                                ROOT_README,
                                format!(
                                    "category '{}' declared {count}, found {found}",
                                    declared.name
                                ),
                            );
                        }
                    }
                }

                for folder in &corpus.categories {
                    if !listed.contains(folder.name.as_str()) {
                        push(
                            ROOT_README,
                            format!("category '{}' is not listed in the root index", folder.name),
                        );
                    }
                }

                if let Some((declared, _line)) = index.declared_total {
                    let found = corpus.pattern_total();
                    if declared != found {
                        push(ROOT_README, format!("declared total {declared}, found {found}"));
                    }
                }
            }
        }

        if corpus.config.require_count_statement {
            for folder in &corpus.categories {
                cancel.check()?;
                let Some(readme) = &folder.readme else {
                    continue;
                };
                let found = folder.patterns.len();
                match CategoryIndex::parse(&readme.doc).count_statement {
                    None => push(
                        &readme.rel_path,
                        format!("pattern count not stated (expected '{found} patterns')"),
                    ),
                    Some((stated, line)) if stated != found => push(
                        &readme.rel_path,
                        format!("line {line} states {stated} patterns, found {found}"),
                    ),
                    Some(_) => {}
                }
            }
        }

        Ok(findings)
    }
}
