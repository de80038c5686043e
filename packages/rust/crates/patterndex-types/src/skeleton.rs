//! Pattern file skeleton - the ordered level-2 sections every pattern carries.
//!
//! The title (level-1 heading) and the one-line intent are not listed here;
//! they are positional and checked separately.

use std::fmt;

/// One level-2 section of a pattern file, in skeleton order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionKind {
    /// Principle / Concept.
    Principle,
    /// Problem Solved.
    ProblemSolved,
    /// Solution, with the canonical code example.
    Solution,
    /// Complete Example (optional).
    CompleteExample,
    /// Variants (optional).
    Variants,
    /// When to Use.
    WhenToUse,
    /// When Not to Use.
    WhenNotToUse,
    /// Advantages / Disadvantages.
    AdvantagesDisadvantages,
    /// Anti-patterns.
    AntiPatterns,
    /// Related Patterns.
    RelatedPatterns,
    /// Framework Implementations / Recommended Libraries (optional).
    FrameworkImplementations,
    /// Tests (optional).
    Tests,
    /// Sources.
    Sources,
}

impl SectionKind {
    /// Every section in the order it must appear.
    pub const SKELETON: [Self; 13] = [
        Self::Principle,
        Self::ProblemSolved,
        Self::Solution,
        Self::CompleteExample,
        Self::Variants,
        Self::WhenToUse,
        Self::WhenNotToUse,
        Self::AdvantagesDisadvantages,
        Self::AntiPatterns,
        Self::RelatedPatterns,
        Self::FrameworkImplementations,
        Self::Tests,
        Self::Sources,
    ];

    /// Canonical heading text, as written by the templates.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Principle => "Principle",
            Self::ProblemSolved => "Problem Solved",
            Self::Solution => "Solution",
            Self::CompleteExample => "Complete Example",
            Self::Variants => "Variants",
            Self::WhenToUse => "When to Use",
            Self::WhenNotToUse => "When Not to Use",
            Self::AdvantagesDisadvantages => "Advantages / Disadvantages",
            Self::AntiPatterns => "Anti-patterns",
            Self::RelatedPatterns => "Related Patterns",
            Self::FrameworkImplementations => "Framework Implementations",
            Self::Tests => "Tests",
            Self::Sources => "Sources",
        }
    }

    /// Whether a pattern file must carry the section.
    #[must_use]
    pub const fn is_required(self) -> bool {
        !matches!(
            self,
            Self::CompleteExample | Self::Variants | Self::FrameworkImplementations | Self::Tests
        )
    }

    /// Position in `SKELETON`.
    #[must_use]
    pub fn order(self) -> usize {
        Self::SKELETON
            .iter()
            .position(|kind| *kind == self)
            .unwrap_or(usize::MAX)
    }

    /// Accepted headings, already normalised with `normalize_heading`.
    #[must_use]
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Principle => &[
                "principle",
                "concept",
                "principle / concept",
                "concept / principle",
                "core concept",
                "principle and concept",
            ],
            Self::ProblemSolved => &[
                "problem solved",
                "problems solved",
                "problem",
                "the problem",
            ],
            Self::Solution => &["solution", "the solution"],
            Self::CompleteExample => &[
                "complete example",
                "full example",
                "complete implementation",
                "worked example",
            ],
            Self::Variants => &["variants", "variations", "variants and use cases"],
            Self::WhenToUse => &["when to use", "when to use it"],
            Self::WhenNotToUse => &["when not to use", "when not to use it", "when to avoid"],
            Self::AdvantagesDisadvantages => &[
                "advantages / disadvantages",
                "advantages and disadvantages",
                "pros / cons",
                "pros and cons",
                "trade-offs",
                "tradeoffs",
            ],
            Self::AntiPatterns => &[
                "anti-patterns",
                "antipatterns",
                "anti patterns",
                "common anti-patterns",
                "anti-patterns to avoid",
            ],
            Self::RelatedPatterns => &["related patterns", "related", "see also"],
            Self::FrameworkImplementations => &[
                "framework implementations",
                "recommended libraries",
                "framework implementations / recommended libraries",
                "libraries",
            ],
            Self::Tests => &["tests", "testing", "test sketch"],
            Self::Sources => &["sources", "references", "further reading", "bibliography"],
        }
    }

    /// Recognise a level-2 heading; `None` for free-form sections.
    #[must_use]
    pub fn from_heading(text: &str) -> Option<Self> {
        let normalized = normalize_heading(text);
        Self::SKELETON
            .into_iter()
            .find(|kind| kind.aliases().contains(&normalized.as_str()))
    }

    /// Every section a level-2 heading covers: one for a plain heading,
    /// two for a combined one such as `When to Use / When Not to Use`.
    #[must_use]
    pub fn sections_for_heading(text: &str) -> Vec<Self> {
        let normalized = normalize_heading(text);
        if let Some((_, kinds)) = COMBINED_SECTIONS
            .iter()
            .find(|(alias, _)| *alias == normalized)
        {
            return kinds.to_vec();
        }
        Self::from_heading(text).into_iter().collect()
    }
}

/// Headings that stand for several consecutive sections.
const COMBINED_SECTIONS: &[(&str, &[SectionKind])] = &[
    (
        "when to use / when not to use",
        &[SectionKind::WhenToUse, SectionKind::WhenNotToUse],
    ),
    (
        "when to use and when not to use",
        &[SectionKind::WhenToUse, SectionKind::WhenNotToUse],
    ),
    (
        "when to use / when to avoid",
        &[SectionKind::WhenToUse, SectionKind::WhenNotToUse],
    ),
];

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Normalise heading text for alias lookup.
///
/// Lowercases, turns `&` into `and`, spaces out `/`, drops punctuation other
/// than `-`, and strips leading section numbers (`4.2 Solution`) and emoji.
#[must_use]
pub fn normalize_heading(text: &str) -> String {
    let mut mapped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => mapped.push_str(" and "),
            '/' => mapped.push_str(" / "),
            '-' => mapped.push('-'),
            c if c.is_alphanumeric() => mapped.extend(c.to_lowercase()),
            _ => mapped.push(' '),
        }
    }
    let tokens: Vec<&str> = mapped
        .split_whitespace()
        .skip_while(|token| token.chars().all(|c| c.is_ascii_digit()))
        .collect();
    tokens.join(" ")
}
