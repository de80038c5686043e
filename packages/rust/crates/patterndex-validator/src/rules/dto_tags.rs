use patterndex_scanner::markdown::extract_dto_tags;
use patterndex_types::{CancelFlag, CorpusResult, DtoTag, Finding, RuleId};

use super::Rule;
use crate::context::RuleContext;

/// V7: `dto:"direction,context,security"` tags inside fenced code blocks
/// use the frozen vocabulary. Tags quoted in prose are not checked.
#[derive(Debug, Clone, Copy, Default)]
pub struct DtoTagRule;

impl Rule for DtoTagRule {
    fn id(&self) -> RuleId {
        RuleId::V7
    }

    fn check(&self, ctx: &RuleContext<'_>, cancel: &CancelFlag) -> CorpusResult<Vec<Finding>> {
        let config = &ctx.corpus.config;
        let mut findings = Vec::new();
        for pattern in ctx
            .corpus
            .patterns()
            .filter(|pattern| config.is_dto_category(&pattern.category))
        {
            cancel.check()?;
            let fenced = pattern.file.doc.code_blocks.iter().filter(|block| block.fenced);
            for block in fenced {
                for occurrence in extract_dto_tags(&block.literal) {
                    let Err(error) = DtoTag::parse(&occurrence.raw) else {
                        continue;
                    };
                    tracing::debug!(
                        path = %pattern.rel_path(),
                        line = block.line + occurrence.line,
                        tag = %occurrence.raw,
                        "malformed dto tag"
                    );
                    findings.push(Finding::new(pattern.rel_path(), RuleId::V7, error.to_string()));
                }
            }
        }
        Ok(findings)
    }
}
