//! The eight taxonomy rules.
//!
//! Each rule reads the shared [`RuleContext`] and returns its findings in
//! discovery order. Rules never fail on corpus content; the only error they
//! surface is cancellation.

mod counts;
mod dto_tags;
mod fences;
mod links;
mod orphans;
mod related;
mod skeleton;
mod slugs;

use patterndex_types::{CancelFlag, CorpusResult, Finding, RuleId};

use crate::context::RuleContext;

pub use self::counts::CategoryCountRule;
pub use self::dto_tags::DtoTagRule;
pub use self::fences::ExemplarLanguageRule;
pub use self::links::LinkResolvabilityRule;
pub use self::orphans::OrphanPatternRule;
pub use self::related::RelatedPatternRule;
pub use self::skeleton::{SkeletonRule, check_skeleton};
pub use self::slugs::SlugUniquenessRule;

/// One validation rule.
pub trait Rule: Send + Sync {
    /// Identifier reported with every finding.
    fn id(&self) -> RuleId;

    /// Inspect the corpus.
    ///
    /// # Errors
    ///
    /// Returns `CorpusError::Cancelled` once `cancel` is raised.
    fn check(&self, ctx: &RuleContext<'_>, cancel: &CancelFlag) -> CorpusResult<Vec<Finding>>;
}

/// Every rule, in `RuleId` order.
#[must_use]
pub fn all_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(CategoryCountRule),
        Box::new(OrphanPatternRule),
        Box::new(LinkResolvabilityRule),
        Box::new(RelatedPatternRule),
        Box::new(SlugUniquenessRule),
        Box::new(SkeletonRule),
        Box::new(DtoTagRule),
        Box::new(ExemplarLanguageRule),
    ]
}
