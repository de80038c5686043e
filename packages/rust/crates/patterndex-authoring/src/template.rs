//! Placeholder substitution for the corpus templates.
//!
//! Templates are plain Markdown with bracketed tokens (`[PatternName]`,
//! `[Method]`). Substitution is literal text replacement; tokens without a
//! value stay in place for the author to fill in.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use crate::error::{AuthoringError, AuthoringResult};

/// Pattern template used when the corpus root has none.
pub const BUILTIN_PATTERN_TEMPLATE: &str = include_str!("../templates/TEMPLATE-PATTERN.md");

/// Category README template used when the corpus root has none.
pub const BUILTIN_README_TEMPLATE: &str = include_str!("../templates/TEMPLATE-README.md");

static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([A-Za-z][A-Za-z0-9_-]*)\]").unwrap_or_else(|_| {
        // The literal above always compiles; keep a never-matching fallback.
        Regex::new(r"$^").unwrap_or_else(|error| panic!("fallback regex: {error}"))
    })
});

/// Read `<root>/<file_name>`, or return `builtin` when it does not exist.
///
/// # Errors
///
/// Returns `AuthoringError::Io` when the file exists but cannot be read.
pub fn load_template(root: &Path, file_name: &str, builtin: &str) -> AuthoringResult<String> {
    let path = root.join(file_name);
    if !path.is_file() {
        tracing::debug!(template = %file_name, "using built-in template");
        return Ok(builtin.to_string());
    }
    std::fs::read_to_string(&path).map_err(|error| AuthoringError::io(path, error))
}

/// Replace every `[token]` listed in `values`.
#[must_use]
pub fn substitute(template: &str, values: &[(&str, &str)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |text, (token, value)| {
            text.replace(&format!("[{token}]"), value)
        })
}

/// Bracketed tokens still present in `text`, deduplicated in first-seen
/// order. `[text](link)` and `[text][ref]` are links, not placeholders.
#[must_use]
pub fn leftover_placeholders(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for caps in PLACEHOLDER_REGEX.captures_iter(text) {
        let (Some(whole), Some(token)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let mut after = text[whole.end()..].chars();
        match (after.next(), after.next()) {
            // `[x](dest)` and `[x][ref]`; `[Method]()` is a call, not a link.
            (Some('('), Some(next)) if next != ')' => continue,
            (Some('['), _) => continue,
            _ => {}
        }
        let token = token.as_str().to_string();
        if !found.contains(&token) {
            found.push(token);
        }
    }
    found
}

/// `concurrency` -> `Concurrency`, `anti-corruption` -> `Anti Corruption`.
#[must_use]
pub fn title_case(name: &str) -> String {
    name.split(['-', '_', ' '])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// `Foo Bar` -> `FooBar`, `circuit-breaker` -> `CircuitBreaker`.
#[must_use]
pub fn pascal_case(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
