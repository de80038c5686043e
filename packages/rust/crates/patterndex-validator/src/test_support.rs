use std::fmt::Write as _;
use std::fs;

use patterndex_scanner::{Corpus, CorpusConfig, CorpusScanner};
use patterndex_types::{CancelFlag, Finding, ValidationReport};
use tempfile::TempDir;

use crate::context::RuleContext;
use crate::rules::Rule;

pub(crate) struct CorpusFixture {
    dir: TempDir,
}

impl CorpusFixture {
    pub(crate) fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub(crate) fn file(&mut self, rel: &str, content: &str) {
        let path = self.dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// Root README with a category table (plus matching Total row) and an
    /// alphabetical index of `(title, path)` entries.
    pub(crate) fn root_readme(&mut self, categories: &[(&str, usize)], patterns: &[(&str, &str)]) {
        let mut out = String::from(
            "# Pattern Library\n\n| Category | Files | Description |\n|---|---|---|\n",
        );
        for (name, count) in categories {
            let _ = writeln!(out, "| [{name}/](./{name}/README.md) | {count} | {name} |");
        }
        let total: usize = categories.iter().map(|(_, count)| count).sum();
        let _ = writeln!(out, "| **Total** | **{total}** | |");
        out.push_str("\n## Alphabetical Index\n\n");
        for (title, path) in patterns {
            let _ = writeln!(out, "- [{title}](./{path})");
        }
        self.file("README.md", &out);
    }

    pub(crate) fn corpus(&self) -> Corpus {
        let config = CorpusConfig::load(self.dir.path(), None).unwrap();
        CorpusScanner::new(config)
            .scan(self.dir.path(), &CancelFlag::new())
            .unwrap()
    }

    pub(crate) fn run(&self, rule: &dyn Rule) -> Vec<Finding> {
        let corpus = self.corpus();
        let ctx = RuleContext::new(&corpus);
        rule.check(&ctx, &CancelFlag::new()).unwrap()
    }

    pub(crate) fn validate(&self) -> ValidationReport {
        crate::validate(&self.corpus(), &CancelFlag::new()).unwrap()
    }
}

/// Category README listing `(file, title)` rows and stating the count.
pub(crate) fn category_readme(title: &str, rows: &[(&str, &str)]) -> String {
    let mut out = format!(
        "# {title}\n\nThis category holds {} patterns.\n\n| File | Content | Usage |\n|---|---|---|\n",
        rows.len()
    );
    for (file, content) in rows {
        let _ = writeln!(out, "| [{file}](./{file}) | {content} | Reach for it |");
    }
    out
}

/// Skeleton-complete pattern file with Go examples and the given
/// `(name, url)` related rows.
pub(crate) fn pattern_file(title: &str, related: &[(&str, &str)]) -> String {
    let mut out = format!(
        "# {title}\n\n> One-line intent of {title}.\n\n\
## Principle\n\nHow it works.\n\n\
```text\n+---+\n| A |\n+---+\n```\n\n\
## Problem Solved\n\n- A force\n\n\
## Solution\n\n```go\npackage main\n\nfunc main() {{}}\n```\n\n\
## When to Use\n\n- Often\n\n\
## When Not to Use\n\n- Rarely\n\n\
## Advantages / Disadvantages\n\n| Advantages | Disadvantages |\n|---|---|\n| Simple | Rigid |\n\n\
## Anti-patterns\n\n| Problem | Solution |\n|---|---|\n| Overuse | Restraint |\n\n\
## Related Patterns\n\n| Pattern | Relation |\n|---------|----------|\n"
    );
    for (name, url) in related {
        let _ = writeln!(out, "| [{name}]({url}) | Complements |");
    }
    out.push_str("\n## Sources\n\n- [Reference](https://example.com/patterns)\n");
    out
}
