use regex::Regex;
use std::sync::LazyLock;

use crate::regex_util::compile_regex;

static DTO_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| compile_regex(r#"dto:"([^"\n]*)""#));

/// One `dto:"..."` annotation found in raw file text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DtoOccurrence {
    /// Value between the quotes.
    pub raw: String,
    /// 1-based line.
    pub line: usize,
}

/// Every `dto:"..."` annotation in `content`, code blocks included.
#[must_use]
pub fn extract_dto_tags(content: &str) -> Vec<DtoOccurrence> {
    DTO_TAG_REGEX
        .captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let value = caps.get(1)?;
            let line = content[..whole.start()].matches('\n').count() + 1;
            Some(DtoOccurrence {
                raw: value.as_str().to_string(),
                line,
            })
        })
        .collect()
}
