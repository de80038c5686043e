use patterndex_types::{CancelFlag, CorpusResult, Finding, RuleId};

use super::Rule;
use crate::context::RuleContext;
use crate::language::looks_like_diagram;

/// V8: every non-diagram fenced block uses the exemplar language.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExemplarLanguageRule;

impl Rule for ExemplarLanguageRule {
    fn id(&self) -> RuleId {
        RuleId::V8
    }

    fn check(&self, ctx: &RuleContext<'_>, cancel: &CancelFlag) -> CorpusResult<Vec<Finding>> {
        let config = &ctx.corpus.config;
        let expected = ctx.exemplar_language.as_deref();
        let mut findings = Vec::new();

        for file in ctx.corpus.documents() {
            cancel.check()?;
            for block in file.doc.code_blocks.iter().filter(|block| block.fenced) {
                let language = block.language.to_lowercase();
                let reason = if language.is_empty() {
                    if looks_like_diagram(&block.literal) {
                        continue;
                    }
                    match expected {
                        Some(expected) => format!(
                            "code block at line {} has no language tag (expected '{expected}')",
                            block.line
                        ),
                        None => format!("code block at line {} has no language tag", block.line),
                    }
                } else if config.is_diagram_fence(&language)
                    || config.is_extra_fence(&language)
                    || expected == Some(language.as_str())
                {
                    continue;
                } else {
                    format!(
                        "code block at line {} tagged '{}', expected '{}'",
                        block.line,
                        block.language,
                        expected.unwrap_or_default()
                    )
                };
                findings.push(Finding::new(&file.rel_path, RuleId::V8, reason));
            }
        }
        Ok(findings)
    }
}
