use patterndex_scanner::MarkdownDocument;
use patterndex_scanner::markdown::BlockKind;
use patterndex_types::{CancelFlag, CorpusResult, Finding, RuleId, SectionKind};

use super::Rule;
use crate::context::RuleContext;

/// V6: title, intent and the ordered section skeleton.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkeletonRule;

fn check_title(doc: &MarkdownDocument, problems: &mut Vec<String>) {
    match doc.headings.first() {
        None => {
            problems.push("no level-1 title heading".to_string());
            return;
        }
        Some(first) if first.level != 1 => problems.push(format!(
            "first heading '{}' at line {} is level {}, expected the level-1 title",
            first.text, first.line, first.level
        )),
        Some(_) => {}
    }

    let titles = doc.headings.iter().filter(|h| h.level == 1).count();
    if titles > 1 {
        problems.push(format!("{titles} level-1 headings, expected exactly one title"));
    }

    let Some(title_block) = doc
        .blocks
        .iter()
        .position(|block| block.kind == BlockKind::Heading(1))
    else {
        return;
    };
    let has_intent = doc.blocks.get(title_block + 1).is_some_and(|block| {
        matches!(block.kind, BlockKind::BlockQuote | BlockKind::Paragraph) && !block.text.is_empty()
    });
    if !has_intent {
        problems.push("one-line intent missing directly below the title".to_string());
    }
}

/// Skeleton problems of one pattern document, in document order.
#[must_use]
pub fn check_skeleton(doc: &MarkdownDocument) -> Vec<String> {
    let mut problems = Vec::new();
    check_title(doc, &mut problems);

    let mut seen: Vec<SectionKind> = Vec::new();
    let mut furthest: Option<SectionKind> = None;
    for heading in doc.headings.iter().filter(|h| h.level == 2) {
        for kind in SectionKind::sections_for_heading(&heading.text) {
            check_section(kind, heading.line, &mut seen, &mut furthest, &mut problems);
        }
    }

    for kind in SectionKind::SKELETON {
        if kind.is_required() && !seen.contains(&kind) {
            problems.push(format!("required section '{}' missing", kind.title()));
        }
    }
    problems
}

fn check_section(
    kind: SectionKind,
    line: usize,
    seen: &mut Vec<SectionKind>,
    furthest: &mut Option<SectionKind>,
    problems: &mut Vec<String>,
) {
    if seen.contains(&kind) {
        problems.push(format!(
            "section '{}' repeated at line {line}",
            kind.title()
        ));
        return;
    }
    seen.push(kind);
    match *furthest {
        Some(previous) if kind.order() < previous.order() => problems.push(format!(
            "section '{}' at line {line} must come before '{}'",
            kind.title(),
            previous.title()
        )),
        _ => *furthest = Some(kind),
    }
}

impl Rule for SkeletonRule {
    fn id(&self) -> RuleId {
        RuleId::V6
    }

    fn check(&self, ctx: &RuleContext<'_>, cancel: &CancelFlag) -> CorpusResult<Vec<Finding>> {
        let mut findings = Vec::new();
        for pattern in ctx.corpus.patterns() {
            cancel.check()?;
            findings.extend(
                check_skeleton(&pattern.file.doc)
                    .into_iter()
                    .map(|reason| Finding::new(pattern.rel_path(), RuleId::V6, reason)),
            );
        }
        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{CorpusFixture, pattern_file};
    use patterndex_scanner::parse_markdown;

    #[test]
    fn test_complete_pattern_passes() {
        assert!(check_skeleton(&parse_markdown(&pattern_file("Actor", &[]))).is_empty());
    }

    #[test]
    fn test_missing_when_to_use() {
        let content = pattern_file("Actor", &[]).replace("## When to Use\n\n- Often\n\n", "");
        let mut fixture = CorpusFixture::new();
        fixture.file("concurrency/actor.md", &content);
        assert_eq!(
            fixture.run(&SkeletonRule),
            vec![Finding::new(
                "concurrency/actor.md",
                RuleId::V6,
                "required section 'When to Use' missing"
            )]
        );
    }

    #[test]
    fn test_combined_when_to_use_heading_satisfies_both_sections() {
        let content = pattern_file("Actor", &[]).replace(
            "## When to Use\n\n- Often\n\n## When Not to Use\n\n- Rarely\n\n",
            "## When to Use / When Not to Use\n\n- Often, rarely\n\n",
        );
        assert!(content.contains("## When to Use / When Not to Use"));
        assert!(check_skeleton(&parse_markdown(&content)).is_empty());
    }

    #[test]
    fn test_misordered_and_duplicate_sections() {
        let content = "# Actor\n\n> Intent.\n\n## Principle\n\n## Solution\n\n## Problem Solved\n\n\
## When to Use\n\n## When Not to Use\n\n## Advantages / Disadvantages\n\n## Pros & Cons\n\n\
## Anti-patterns\n\n## Related Patterns\n\n## Sources\n";
        let problems = check_skeleton(&parse_markdown(content));
        assert_eq!(
            problems,
            vec![
                "section 'Problem Solved' at line 9 must come before 'Solution'".to_string(),
                "section 'Advantages / Disadvantages' repeated at line 17".to_string(),
            ]
        );
    }

    #[test]
    fn test_optional_sections_may_be_absent_or_present() {
        let content = pattern_file("Actor", &[]).replace(
            "## When to Use",
            "## Complete Example\n\n```go\npackage main\n```\n\n## Variants\n\n| Variant | Use |\n|---|---|\n| A | B |\n\n## When to Use",
        );
        assert!(check_skeleton(&parse_markdown(&content)).is_empty());
    }

    #[test]
    fn test_title_and_intent() {
        let problems = check_skeleton(&parse_markdown(
            "## Principle\n\n# Actor\n\n## Problem Solved\n\n# Again\n",
        ));
        assert!(problems[0].starts_with("first heading 'Principle' at line 1 is level 2"));
        assert_eq!(problems[1], "2 level-1 headings, expected exactly one title");
        assert_eq!(problems[2], "one-line intent missing directly below the title");
    }
}
