//! Path helpers: root-relative names and link target resolution.

use std::path::{Component, Path};

/// Where a Markdown link points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// `#anchor` inside the same file.
    Anchor,
    /// Destination with a URL scheme (`https:`, `mailto:`) or `//host`.
    External(String),
    /// Relative path, resolved against the linking file's folder.
    Relative {
        /// Root-relative, `/`-separated target (`""` is the root itself).
        path: String,
        /// Written with a trailing `/`.
        is_dir: bool,
    },
    /// `/absolute/path` destination.
    RootAbsolute,
    /// Relative path that climbs above the corpus root.
    EscapesRoot,
    /// Empty destination.
    Empty,
    /// Percent escapes that do not decode to UTF-8; carries the decode error.
    Malformed(String),
}

pub(crate) fn normalize_slashes(raw: &str) -> String {
    raw.replace('\\', "/")
}

/// Root-relative `/`-separated form of `path`.
#[must_use]
pub fn relative_to_root(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let parts: Vec<String> = rel
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_string_lossy().to_string()),
            _ => None,
        })
        .collect();
    parts.join("/")
}

fn has_scheme(raw: &str) -> bool {
    let Some((scheme, _rest)) = raw.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn strip_suffixes(raw: &str) -> &str {
    let without_fragment = raw.split_once('#').map_or(raw, |(left, _)| left);
    without_fragment
        .split_once('?')
        .map_or(without_fragment, |(left, _)| left)
}


/// Classify a link written in the file at root-relative `source` and, for
/// relative links, resolve it to a root-relative target.
#[must_use]
pub fn resolve_link(source: &str, raw: &str) -> LinkTarget {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return LinkTarget::Empty;
    }
    if trimmed.starts_with('#') {
        return LinkTarget::Anchor;
    }
    if trimmed.starts_with("//") || has_scheme(trimmed) {
        return LinkTarget::External(trimmed.to_string());
    }

    let candidate = match urlencoding::decode(&normalize_slashes(strip_suffixes(trimmed))) {
        Ok(decoded) => decoded.into_owned(),
        Err(error) => return LinkTarget::Malformed(error.to_string()),
    };
    if candidate.starts_with('/') {
        return LinkTarget::RootAbsolute;
    }
    if candidate.is_empty() {
        // `?query` only: points back at the file itself.
        return LinkTarget::Anchor;
    }

    let mut parts: Vec<String> = source
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(ToString::to_string)
        .collect();
    // Drop the file name; links resolve against its folder.
    parts.pop();

    for segment in candidate.split('/') {
        let cleaned = segment.trim();
        if cleaned.is_empty() || cleaned == "." {
            continue;
        }
        if cleaned == ".." {
            if parts.pop().is_none() {
                return LinkTarget::EscapesRoot;
            }
            continue;
        }
        parts.push(cleaned.to_string());
    }

    LinkTarget::Relative {
        path: parts.join("/"),
        is_dir: candidate.ends_with('/'),
    }
}
