//! Validator findings and the accumulated report.

use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::rule::RuleId;

/// One structural problem found in the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Finding {
    /// Root-relative, `/`-separated path of the offending file.
    pub path: String,
    /// Rule that failed.
    pub rule: RuleId,
    /// One-line human-readable reason.
    pub reason: String,
}

impl Finding {
    /// Create a new finding.
    #[must_use]
    pub fn new(path: impl Into<String>, rule: RuleId, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            rule,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.path, self.rule, self.reason)
    }
}

/// Every finding of one validator run.
///
/// Rules push in whatever order they discover problems; `finalize` gives the
/// deterministic (path, rule) order the report is printed in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Findings, sorted once `finalize` has run.
    pub findings: Vec<Finding>,
}

impl ValidationReport {
    /// Empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one finding.
    pub fn push(&mut self, path: impl Into<String>, rule: RuleId, reason: impl Into<String>) {
        self.findings.push(Finding::new(path, rule, reason));
    }

    /// Merge another batch of findings.
    pub fn extend(&mut self, findings: impl IntoIterator<Item = Finding>) {
        self.findings.extend(findings);
    }

    /// Stable-sort by (path, rule); findings of the same file and rule keep
    /// discovery order.
    pub fn finalize(&mut self) {
        self.findings
            .sort_by(|a, b| a.path.cmp(&b.path).then(a.rule.cmp(&b.rule)));
    }

    /// Whether the run found nothing.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Number of findings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// Whether there are no findings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Finding count per rule (rules without findings omitted).
    #[must_use]
    pub fn rule_counts(&self) -> BTreeMap<RuleId, usize> {
        let mut counts = BTreeMap::new();
        for finding in &self.findings {
            *counts.entry(finding.rule).or_insert(0) += 1;
        }
        counts
    }

    /// Iterate findings in current order.
    pub fn iter(&self) -> std::slice::Iter<'_, Finding> {
        self.findings.iter()
    }
}

impl IntoIterator for ValidationReport {
    type Item = Finding;
    type IntoIter = std::vec::IntoIter<Finding>;

    fn into_iter(self) -> Self::IntoIter {
        self.findings.into_iter()
    }
}
