//! patterndex-validator - Taxonomy rules V1-V8 over a scanned corpus.
//!
//! # Architecture
//!
//! ```text
//! patterndex-validator/src/
//! ├── lib.rs         # validate() entry point (this file)
//! ├── context.rs     # RuleContext: corpus + root index + exemplar language
//! ├── language.rs    # Exemplar language inference, diagram detection
//! ├── render.rs      # Text / JSON-lines output
//! └── rules/         # One module per rule, behind the Rule trait
//! ```
//!
//! The validator only reads. Every rule runs to completion and the merged
//! findings are stable-sorted by (path, rule), so two runs over the same
//! tree print the same bytes.

mod context;
mod language;
mod render;
pub mod rules;

#[cfg(test)]
mod test_support;

use patterndex_scanner::Corpus;
use patterndex_types::{CancelFlag, CorpusResult, Finding, ValidationReport};
use rayon::prelude::*;

pub use context::RuleContext;
pub use language::{infer_exemplar_language, looks_like_diagram};
pub use render::{ReportFormat, render_report};
pub use rules::{Rule, all_rules, check_skeleton};

/// Run every rule over `corpus`.
///
/// # Errors
///
/// Returns `CorpusError::Cancelled` when `cancel` is raised before all rules
/// finish; partial findings are dropped.
pub fn validate(corpus: &Corpus, cancel: &CancelFlag) -> CorpusResult<ValidationReport> {
    validate_with(corpus, &all_rules(), cancel)
}

/// Run the given rules over `corpus`.
///
/// # Errors
///
/// Returns `CorpusError::Cancelled` when `cancel` is raised before all rules
/// finish.
pub fn validate_with(
    corpus: &Corpus,
    rules: &[Box<dyn Rule>],
    cancel: &CancelFlag,
) -> CorpusResult<ValidationReport> {
    let ctx = RuleContext::new(corpus);
    let batches: Vec<Vec<Finding>> = rules
        .par_iter()
        .map(|rule| {
            cancel.check()?;
            let findings = rule.check(&ctx, cancel)?;
            tracing::debug!(rule = %rule.id(), findings = findings.len(), "rule finished");
            Ok(findings)
        })
        .collect::<CorpusResult<_>>()?;
    cancel.check()?;

    let mut report = ValidationReport::new();
    for batch in batches {
        report.extend(batch);
    }
    report.finalize();
    tracing::info!(
        findings = report.len(),
        patterns = corpus.pattern_total(),
        "validation finished"
    );
    Ok(report)
}
