use patterndex_scanner::{LinkTarget, MarkdownFile, PatternFile, resolve_link};
use patterndex_types::{CancelFlag, CorpusResult, Finding, RuleId, SectionKind};

use super::Rule;
use crate::context::RuleContext;

/// V4: every Related Patterns entry and every category decision-table
/// entry links to an existing pattern.
///
/// Symmetry is not required. Targets that do not exist at all are left to
/// V3 so a dangling link is reported once.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelatedPatternRule;

fn check_pattern(ctx: &RuleContext<'_>, pattern: &PatternFile, findings: &mut Vec<Finding>) {
    let doc = &pattern.file.doc;
    let path = pattern.rel_path();
    let Some(section) = doc.find_heading(2, |text| {
        SectionKind::from_heading(text) == Some(SectionKind::RelatedPatterns)
    }) else {
        // Missing section is a V6 finding.
        return;
    };

    let mut push = |reason: String| findings.push(Finding::new(path, RuleId::V4, reason));
    let tables: Vec<_> = doc.tables_in_section(section).collect();
    if tables.is_empty() {
        push("Related Patterns section has no table".to_string());
        return;
    }

    for table in tables {
        let (Some(pattern_col), Some(_relation_col)) =
            (table.column("Pattern"), table.column("Relation"))
        else {
            push(format!(
                "Related Patterns table at line {} needs Pattern and Relation columns",
                table.line
            ));
            continue;
        };

        for (line, cells) in &table.rows {
            let Some(cell) = cells.get(pattern_col) else {
                continue;
            };
            let Some(url) = cell.links.first() else {
                push(format!(
                    "related entry '{}' at line {line} is not a link",
                    cell.bare_text()
                ));
                continue;
            };
            if let Some(reason) = non_pattern_target(ctx, path, url, "related entry") {
                push(reason);
            }
        }
    }
}

/// Why `url` (linked from `from`) is not a pattern, or `None` when it is one
/// or is left to V3.
fn non_pattern_target(ctx: &RuleContext<'_>, from: &str, url: &str, label: &str) -> Option<String> {
    match resolve_link(from, url) {
        LinkTarget::Relative { path: target, .. } => {
            if ctx.corpus.is_pattern_path(&target) || !ctx.corpus.exists(&target) {
                return None;
            }
            Some(format!("{label} {url} is not a pattern file"))
        }
        LinkTarget::External(_) | LinkTarget::Anchor => Some(format!(
            "{label} {url} does not point to a pattern in the corpus"
        )),
        LinkTarget::RootAbsolute
        | LinkTarget::EscapesRoot
        | LinkTarget::Empty
        | LinkTarget::Malformed(_) => None,
    }
}

/// Decision tables of a category README: any table with a Pattern column
/// other than the File index.
fn check_decision_tables(
    ctx: &RuleContext<'_>,
    readme: &MarkdownFile,
    findings: &mut Vec<Finding>,
) {
    let path = readme.rel_path.as_str();
    let mut push = |reason: String| findings.push(Finding::new(path, RuleId::V4, reason));
    for table in &readme.doc.tables {
        let is_file_index = table
            .header
            .first()
            .is_some_and(|cell| cell.bare_text().eq_ignore_ascii_case("file"));
        let Some(pattern_col) = table.column("Pattern").filter(|_| !is_file_index) else {
            continue;
        };
        for (line, cells) in &table.rows {
            let Some(cell) = cells.get(pattern_col) else {
                continue;
            };
            let Some(url) = cell.links.first() else {
                push(format!(
                    "decision table entry '{}' at line {line} is not a link",
                    cell.bare_text()
                ));
                continue;
            };
            if let Some(reason) = non_pattern_target(ctx, path, url, "decision table entry") {
                push(reason);
            }
        }
    }
}

impl Rule for RelatedPatternRule {
    fn id(&self) -> RuleId {
        RuleId::V4
    }

    fn check(&self, ctx: &RuleContext<'_>, cancel: &CancelFlag) -> CorpusResult<Vec<Finding>> {
        let mut findings = Vec::new();
        for pattern in ctx.corpus.patterns() {
            cancel.check()?;
            check_pattern(ctx, pattern, &mut findings);
        }
        for readme in ctx.corpus.categories.iter().filter_map(|folder| folder.readme.as_ref()) {
            cancel.check()?;
            check_decision_tables(ctx, readme, &mut findings);
        }
        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{CorpusFixture, category_readme, pattern_file};

    #[test]
    fn test_one_directional_reference_is_fine() {
        let mut fixture = CorpusFixture::new();
        fixture.file("structural/facade.md", &pattern_file("Facade", &[]));
        fixture.file(
            "structural/adapter.md",
            &pattern_file("Adapter", &[("Facade", "./facade.md")]),
        );
        assert!(fixture.run(&RelatedPatternRule).is_empty());
    }

    #[test]
    fn test_dangling_target_left_to_link_rule() {
        let mut fixture = CorpusFixture::new();
        fixture.file(
            "structural/adapter.md",
            &pattern_file("Adapter", &[("Widget Wrapper", "./widget-wrapper.md")]),
        );
        assert!(fixture.run(&RelatedPatternRule).is_empty());
    }

    #[test]
    fn test_non_pattern_targets() {
        let mut fixture = CorpusFixture::new();
        fixture.file("structural/README.md", "# Structural\n");
        fixture.file(
            "structural/adapter.md",
            &pattern_file(
                "Adapter",
                &[
                    ("Overview", "./README.md"),
                    ("GoF", "https://example.com/gof"),
                ],
            ),
        );
        let reasons: Vec<String> = fixture
            .run(&RelatedPatternRule)
            .into_iter()
            .map(|finding| finding.reason)
            .collect();
        assert_eq!(
            reasons,
            vec![
                "related entry ./README.md is not a pattern file".to_string(),
                "related entry https://example.com/gof does not point to a pattern in the corpus"
                    .to_string(),
            ]
        );
    }

    #[test]
    fn test_table_shape() {
        let mut fixture = CorpusFixture::new();
        fixture.file(
            "cloud/cache.md",
            "# Cache\n\n> Keep hot data close.\n\n## Related Patterns\n\n\
             | Name | Why |\n|---|---|\n| [Proxy](./proxy.md) | Wraps |\n",
        );
        fixture.file(
            "cloud/proxy.md",
            "# Proxy\n\n> Stand in.\n\n## Related Patterns\n\n\
             | Pattern | Relation |\n|---|---|\n| Cache | Often paired |\n",
        );
        let findings = fixture.run(&RelatedPatternRule);
        assert_eq!(
            findings,
            vec![
                Finding::new(
                    "cloud/cache.md",
                    RuleId::V4,
                    "Related Patterns table at line 7 needs Pattern and Relation columns"
                ),
                Finding::new(
                    "cloud/proxy.md",
                    RuleId::V4,
                    "related entry 'Cache' at line 9 is not a link"
                ),
            ]
        );
    }

    #[test]
    fn test_decision_table_entries_must_be_patterns() {
        let mut fixture = CorpusFixture::new();
        fixture.file("cloud/cache.md", &pattern_file("Cache", &[]));
        fixture.file(
            "cloud/README.md",
            &format!(
                "{}\n## Decision Table\n\n| Need | Pattern |\n|---|---|\n\
                 | Slow reads | [Cache](./cache.md) |\n\
                 | Wrap a widget | Widget Wrapper |\n\
                 | Overview | [Cloud](./README.md) |\n",
                category_readme("Cloud", &[("cache.md", "Cache")])
            ),
        );
        let findings = fixture.run(&RelatedPatternRule);
        assert_eq!(
            findings,
            vec![
                Finding::new(
                    "cloud/README.md",
                    RuleId::V4,
                    "decision table entry 'Widget Wrapper' at line 14 is not a link"
                ),
                Finding::new(
                    "cloud/README.md",
                    RuleId::V4,
                    "decision table entry ./README.md is not a pattern file"
                ),
            ]
        );
    }
}
