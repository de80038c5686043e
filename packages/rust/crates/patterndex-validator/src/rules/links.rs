use std::collections::BTreeSet;

use patterndex_scanner::{LinkTarget, resolve_link};
use patterndex_types::{CancelFlag, CorpusResult, Finding, RuleId};
use url::Url;

use super::Rule;
use crate::context::RuleContext;

/// V3: relative links resolve to existing files; external links parse.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkResolvabilityRule;

fn external_problem(raw: &str) -> Option<String> {
    let candidate = if raw.starts_with("//") {
        format!("https:{raw}")
    } else {
        raw.to_string()
    };
    match Url::parse(&candidate) {
        Ok(url) if url.cannot_be_a_base() || url.host_str().is_some() => None,
        Ok(_) => Some(format!("malformed URL {raw}: missing host")),
        Err(error) => Some(format!("malformed URL {raw}: {error}")),
    }
}

impl Rule for LinkResolvabilityRule {
    fn id(&self) -> RuleId {
        RuleId::V3
    }

    fn check(&self, ctx: &RuleContext<'_>, cancel: &CancelFlag) -> CorpusResult<Vec<Finding>> {
        let corpus = ctx.corpus;
        let mut findings = Vec::new();

        for file in corpus.documents() {
            cancel.check()?;
            let mut reported = BTreeSet::new();
            for link in &file.doc.links {
                let reason = match resolve_link(&file.rel_path, &link.url) {
                    LinkTarget::Anchor => None,
                    LinkTarget::Empty => Some(format!("empty link target for '{}'", link.text)),
                    LinkTarget::External(raw) => external_problem(&raw),
                    LinkTarget::RootAbsolute => Some(format!(
                        "root-absolute link {} (use a relative path)",
                        link.url
                    )),
                    LinkTarget::EscapesRoot => {
                        Some(format!("link {} escapes the corpus root", link.url))
                    }
                    LinkTarget::Malformed(error) => {
                        Some(format!("undecodable link {}: {error}", link.url))
                    }
                    LinkTarget::Relative { path, .. } => (!corpus.exists(&path))
                        .then(|| format!("broken relative link {}", link.url)),
                };
                let Some(reason) = reason else {
                    continue;
                };
                if reported.insert(reason.clone()) {
                    findings.push(Finding::new(&file.rel_path, RuleId::V3, reason));
                }
            }
        }
        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{CorpusFixture, pattern_file};

    #[test]
    fn test_dangling_related_pattern() {
        let mut fixture = CorpusFixture::new();
        fixture.file(
            "structural/adapter.md",
            &pattern_file("Adapter", &[("Widget Wrapper", "./widget-wrapper.md")]),
        );
        let findings = fixture.run(&LinkResolvabilityRule);
        assert_eq!(
            findings,
            vec![Finding::new(
                "structural/adapter.md",
                RuleId::V3,
                "broken relative link ./widget-wrapper.md"
            )]
        );
    }

    #[test]
    fn test_cross_category_and_anchor_links_resolve() {
        let mut fixture = CorpusFixture::new();
        fixture.file("behavioral/observer.md", &pattern_file("Observer", &[]));
        fixture.file(
            "structural/adapter.md",
            &pattern_file(
                "Adapter",
                &[("Observer", "../behavioral/observer.md#variants"), ("Top", "#principle")],
            ),
        );
        assert!(fixture.run(&LinkResolvabilityRule).is_empty());
    }

    #[test]
    fn test_absolute_escaping_and_malformed_links() {
        let mut fixture = CorpusFixture::new();
        fixture.file(
            "cloud/cache.md",
            "# Cache\n\n[a](/cloud/x.md) [b](../../etc/passwd) [c](https://)\n\
             ![diagram](./img/missing.png) [a again](/cloud/x.md)\n",
        );
        let reasons: Vec<String> = fixture
            .run(&LinkResolvabilityRule)
            .into_iter()
            .map(|finding| finding.reason)
            .collect();
        assert_eq!(reasons.len(), 4, "{reasons:?}");
        assert!(reasons.contains(&"root-absolute link /cloud/x.md (use a relative path)".to_string()));
        assert!(reasons.contains(&"link ../../etc/passwd escapes the corpus root".to_string()));
        assert!(reasons.iter().any(|r| r.starts_with("malformed URL https://")));
        assert!(reasons.contains(&"broken relative link ./img/missing.png".to_string()));
    }

    #[test]
    fn test_percent_escaped_links_resolve_to_files() {
        let mut fixture = CorpusFixture::new();
        fixture.file("cloud/retry-(backoff).md", "# Retry
");
        fixture.file(
            "cloud/cache.md",
            "# Cache

[retry](./retry-%28backoff%29.md) [bad](./x-%FF.md)
",
        );
        let reasons: Vec<String> = fixture
            .run(&LinkResolvabilityRule)
            .into_iter()
            .map(|finding| finding.reason)
            .collect();
        assert_eq!(reasons.len(), 1, "{reasons:?}");
        assert!(reasons[0].starts_with("undecodable link ./x-%FF.md: "));
    }
}
