use std::collections::BTreeMap;

use patterndex_types::{CancelFlag, CorpusResult, Finding, RuleId, Slug};

use super::Rule;
use crate::context::RuleContext;

/// V5: slugs are kebab-case and unique across the corpus.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlugUniquenessRule;

impl Rule for SlugUniquenessRule {
    fn id(&self) -> RuleId {
        RuleId::V5
    }

    fn check(&self, ctx: &RuleContext<'_>, cancel: &CancelFlag) -> CorpusResult<Vec<Finding>> {
        let mut findings = Vec::new();
        let mut by_slug: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

        for pattern in ctx.corpus.patterns() {
            cancel.check()?;
            if let Err(error) = Slug::new(pattern.stem.as_str()) {
                findings.push(Finding::new(
                    pattern.rel_path(),
                    RuleId::V5,
                    format!("file name is not a valid slug: {error}"),
                ));
            }
            by_slug
                .entry(pattern.stem.as_str())
                .or_default()
                .push(pattern.rel_path());
        }

        for (slug, paths) in by_slug {
            if paths.len() < 2 {
                continue;
            }
            for path in &paths {
                let others: Vec<&str> = paths
                    .iter()
                    .copied()
                    .filter(|other| other != path)
                    .collect();
                findings.push(Finding::new(
                    *path,
                    RuleId::V5,
                    format!("slug '{slug}' also used by {}", others.join(", ")),
                ));
            }
        }
        Ok(findings)
    }
}
