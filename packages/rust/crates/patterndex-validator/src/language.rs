use std::collections::BTreeMap;

use patterndex_scanner::Corpus;

/// Box-drawing block (U+2500-U+257F): an untagged block made of these is a
/// diagram, not code.
#[must_use]
pub fn looks_like_diagram(literal: &str) -> bool {
    literal.chars().any(|c| ('\u{2500}'..='\u{257f}').contains(&c))
}

/// Most frequent non-diagram fence tag across the corpus; ties go to the
/// alphabetically first tag.
#[must_use]
pub fn infer_exemplar_language(corpus: &Corpus) -> Option<String> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for file in corpus.documents() {
        for block in &file.doc.code_blocks {
            if !block.fenced || block.language.is_empty() {
                continue;
            }
            let language = block.language.to_lowercase();
            if corpus.config.is_diagram_fence(&language) || corpus.config.is_extra_fence(&language)
            {
                continue;
            }
            *counts.entry(language).or_insert(0) += 1;
        }
    }

    let mut best: Option<(String, usize)> = None;
    for (language, count) in counts {
        if best.as_ref().is_none_or(|(_, top)| count > *top) {
            best = Some((language, count));
        }
    }
    best.map(|(language, _)| language)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_drawing_detection() {
        assert!(looks_like_diagram("┌──┐\n│ A │\n└──┘"));
        assert!(!looks_like_diagram("+--+\n| A |\n+--+"));
        assert!(!looks_like_diagram("func main() {}"));
    }
}
