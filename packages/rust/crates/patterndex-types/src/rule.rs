//! Validation rule identifiers.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Identifier of one taxonomy rule.
///
/// Ordering follows the numeric suffix so reports sort as V1 < V2 < ... < V8.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum RuleId {
    /// Category count accuracy.
    V1,
    /// No orphan patterns.
    V2,
    /// Link resolvability.
    V3,
    /// Related-pattern directed closure.
    V4,
    /// Slug uniqueness.
    V5,
    /// Skeleton compliance.
    V6,
    /// DTO-tag grammar.
    V7,
    /// Exemplar-language uniformity.
    V8,
}

impl RuleId {
    /// All rules in report order.
    pub const ALL: [Self; 8] = [
        Self::V1,
        Self::V2,
        Self::V3,
        Self::V4,
        Self::V5,
        Self::V6,
        Self::V7,
        Self::V8,
    ];

    /// Short code printed in reports.
    #[must_use]
    pub const fn as_code(self) -> &'static str {
        match self {
            Self::V1 => "V1",
            Self::V2 => "V2",
            Self::V3 => "V3",
            Self::V4 => "V4",
            Self::V5 => "V5",
            Self::V6 => "V6",
            Self::V7 => "V7",
            Self::V8 => "V8",
        }
    }

    /// One-line description of what the rule guards.
    #[must_use]
    pub const fn summary(self) -> &'static str {
        match self {
            Self::V1 => "category count accuracy",
            Self::V2 => "no orphan patterns",
            Self::V3 => "link resolvability",
            Self::V4 => "related-pattern closure",
            Self::V5 => "slug uniqueness",
            Self::V6 => "skeleton compliance",
            Self::V7 => "DTO-tag grammar",
            Self::V8 => "exemplar-language uniformity",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}
