use std::collections::BTreeSet;

use patterndex_scanner::{CATEGORY_INDEX_HEADER, CategoryIndex, Corpus, LinkTarget, resolve_link};
use patterndex_types::{CancelFlag, CorpusResult, Finding, RuleId};

use super::Rule;
use crate::context::RuleContext;

/// V2: every pattern is listed in its category index and in the root
/// alphabetical index; index entries point at real patterns.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrphanPatternRule;

enum EntryTarget {
    Pattern(String),
    /// Missing target; reported by V3.
    Broken,
    NotPattern,
    Ignored,
}

fn classify(corpus: &Corpus, source: &str, url: &str) -> EntryTarget {
    match resolve_link(source, url) {
        LinkTarget::Relative { path, .. } => {
            if corpus.is_pattern_path(&path) {
                EntryTarget::Pattern(path)
            } else if corpus.exists(&path) {
                EntryTarget::NotPattern
            } else {
                EntryTarget::Broken
            }
        }
        LinkTarget::Anchor => EntryTarget::Ignored,
        LinkTarget::RootAbsolute
        | LinkTarget::EscapesRoot
        | LinkTarget::Empty
        | LinkTarget::Malformed(_) => EntryTarget::Broken,
        LinkTarget::External(_) => EntryTarget::NotPattern,
    }
}

fn check_alphabetical(ctx: &RuleContext<'_>, findings: &mut Vec<Finding>) {
    let corpus = ctx.corpus;
    let Some(index) = &ctx.root_index else {
        // Missing root README is a V1 finding.
        return;
    };
    let Some(entries) = &index.alphabetical else {
        findings.push(Finding::new(
            "README.md",
            RuleId::V2,
            "alphabetical index section missing",
        ));
        return;
    };

    let mut listed = BTreeSet::new();
    for entry in entries {
        match classify(corpus, "README.md", &entry.url) {
            EntryTarget::Pattern(path) => {
                listed.insert(path);
            }
            EntryTarget::NotPattern => findings.push(Finding::new(
                "README.md",
                RuleId::V2,
                format!(
                    "alphabetical entry '{}' ({}) is not a pattern file",
                    entry.text, entry.url
                ),
            )),
            EntryTarget::Broken | EntryTarget::Ignored => {}
        }
    }

    for pattern in corpus.patterns() {
        if !listed.contains(pattern.rel_path()) {
            findings.push(Finding::new(
                pattern.rel_path(),
                RuleId::V2,
                "missing from root alphabetical index",
            ));
        }
    }
}

impl Rule for OrphanPatternRule {
    fn id(&self) -> RuleId {
        RuleId::V2
    }

    fn check(&self, ctx: &RuleContext<'_>, cancel: &CancelFlag) -> CorpusResult<Vec<Finding>> {
        let corpus = ctx.corpus;
        let mut findings = Vec::new();
        check_alphabetical(ctx, &mut findings);

        for folder in &corpus.categories {
            cancel.check()?;
            let Some(readme) = &folder.readme else {
                findings.push(Finding::new(
                    folder.readme_path(),
                    RuleId::V2,
                    format!("category '{}' has no README.md", folder.name),
                ));
                continue;
            };
            let Some(table) = CategoryIndex::parse(&readme.doc).table else {
                findings.push(Finding::new(
                    &readme.rel_path,
                    RuleId::V2,
                    format!(
                        "pattern index table ({}) missing",
                        CATEGORY_INDEX_HEADER.join(" | ")
                    ),
                ));
                continue;
            };
            if !table.has_expected_header() {
                findings.push(Finding::new(
                    &readme.rel_path,
                    RuleId::V2,
                    format!(
                        "index table header is '{}', expected '{}'",
                        table.header.join(" | "),
                        CATEGORY_INDEX_HEADER.join(" | ")
                    ),
                ));
            }

            let mut listed = BTreeSet::new();
            for row in &table.rows {
                let target = match &row.url {
                    Some(url) => classify(corpus, &readme.rel_path, url),
                    None if row.text.ends_with(".md") => {
                        classify(corpus, &readme.rel_path, &row.text)
                    }
                    None => {
                        findings.push(Finding::new(
                            &readme.rel_path,
                            RuleId::V2,
                            format!("index row '{}' at line {} names no file", row.text, row.line),
                        ));
                        continue;
                    }
                };
                match target {
                    EntryTarget::Pattern(path)
                        if path.split_once('/').map(|(cat, _)| cat) == Some(folder.name.as_str()) =>
                    {
                        if !listed.insert(path.clone()) {
                            findings.push(Finding::new(
                                &readme.rel_path,
                                RuleId::V2,
                                format!("index lists {path} more than once"),
                            ));
                        }
                    }
                    EntryTarget::Pattern(_) | EntryTarget::NotPattern => {
                        findings.push(Finding::new(
                            &readme.rel_path,
                            RuleId::V2,
                            format!(
                                "index row '{}' at line {} is not a pattern file of this folder",
                                row.text, row.line
                            ),
                        ));
                    }
                    EntryTarget::Broken | EntryTarget::Ignored => {}
                }
            }

            for pattern in &folder.patterns {
                if !listed.contains(pattern.rel_path()) {
                    findings.push(Finding::new(
                        pattern.rel_path(),
                        RuleId::V2,
                        format!("missing from {} index table", readme.rel_path),
                    ));
                }
            }
        }
        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{CorpusFixture, category_readme, pattern_file};

    fn reasons_for(findings: &[Finding], path: &str) -> Vec<String> {
        findings
            .iter()
            .filter(|finding| finding.path == path)
            .map(|finding| finding.reason.clone())
            .collect()
    }

    #[test]
    fn test_listed_everywhere_is_clean() {
        let mut fixture = CorpusFixture::new();
        fixture.root_readme(&[("cloud", 1)], &[("Cache", "cloud/cache.md")]);
        fixture.file("cloud/README.md", &category_readme("Cloud", &[("cache.md", "Caching")]));
        fixture.file("cloud/cache.md", &pattern_file("Cache", &[]));
        assert!(fixture.run(&OrphanPatternRule).is_empty());
    }

    #[test]
    fn test_orphan_pattern_reported_twice() {
        let mut fixture = CorpusFixture::new();
        fixture.root_readme(&[("cloud", 2)], &[("Cache", "cloud/cache.md")]);
        fixture.file("cloud/README.md", &category_readme("Cloud", &[("cache.md", "Caching")]));
        fixture.file("cloud/cache.md", &pattern_file("Cache", &[]));
        fixture.file("cloud/sidecar.md", &pattern_file("Sidecar", &[]));
        let findings = fixture.run(&OrphanPatternRule);
        assert_eq!(
            reasons_for(&findings, "cloud/sidecar.md"),
            vec![
                "missing from root alphabetical index".to_string(),
                "missing from cloud/README.md index table".to_string(),
            ]
        );
    }

    #[test]
    fn test_index_problems_reported_on_readme() {
        let mut fixture = CorpusFixture::new();
        fixture.root_readme(&[("cloud", 1)], &[("Cache", "cloud/cache.md"), ("Cloud", "cloud/README.md")]);
        fixture.file(
            "cloud/README.md",
            "# Cloud\n\n1 pattern.\n\n| File | Summary |\n|---|---|\n\
             | [cache.md](./cache.md) | Caching |\n\
             | [cache.md](./cache.md) | Again |\n\
             | [overview](./README.md) | Self |\n",
        );
        fixture.file("cloud/cache.md", &pattern_file("Cache", &[]));
        let findings = fixture.run(&OrphanPatternRule);
        assert_eq!(
            reasons_for(&findings, "cloud/README.md"),
            vec![
                "index table header is 'File | Summary', expected 'File | Content | Usage'"
                    .to_string(),
                "index lists cloud/cache.md more than once".to_string(),
                "index row 'overview' at line 9 is not a pattern file of this folder".to_string(),
            ]
        );
        assert_eq!(
            reasons_for(&findings, "README.md"),
            vec!["alphabetical entry 'Cloud' (./cloud/README.md) is not a pattern file".to_string()]
        );
    }

    #[test]
    fn test_missing_readme_and_alphabetical_section() {
        let mut fixture = CorpusFixture::new();
        fixture.file("README.md", "# Library\n");
        fixture.file("cloud/cache.md", &pattern_file("Cache", &[]));
        let findings = fixture.run(&OrphanPatternRule);
        assert_eq!(
            findings,
            vec![
                Finding::new("README.md", RuleId::V2, "alphabetical index section missing"),
                Finding::new(
                    "cloud/README.md",
                    RuleId::V2,
                    "category 'cloud' has no README.md"
                ),
            ]
        );
    }
}
