//! Batch driver: runs the per-law driver across a whole corpus and
//! assembles the final amendment-bill text, one circled-digit-numbered
//! entry per affected law.

use super::driver::amend_law;
use super::model::LawDocument;

const CIRCLED_DIGITS: &[char] = &[
    '①', '②', '③', '④', '⑤', '⑥', '⑦', '⑧', '⑨', '⑩', '⑪', '⑫', '⑬', '⑭', '⑮', '⑯', '⑰', '⑱', '⑲', '⑳',
];

const NO_MATCH_PLACEHOLDER: &str = "⚠️ 개정 대상 조문이 없습니다.";

fn circled(n: usize) -> String {
    CIRCLED_DIGITS
        .get(n - 1)
        .map(|c| c.to_string())
        .unwrap_or_else(|| format!("({n})"))
}

/// `amend(find, replace, corpus)`: spec.md §5's batch entry point.
///
/// Every law in `corpus` is walked independently; laws with no hits
/// are dropped, and if none produce any amendment text at all the
/// result is the single placeholder sentence rather than an empty list.
pub fn amend(search_word: &str, replace_word: &str, corpus: &[LawDocument]) -> Vec<String> {
    let mut entries = Vec::new();

    for law in corpus {
        let clauses = amend_law(law, search_word, replace_word);
        if clauses.is_empty() {
            continue;
        }
        let body = clauses.join("<br>");
        let prefix = circled(entries.len() + 1);
        entries.push(format!("{prefix} {} 일부를 다음과 같이 개정한다.<br>{body}", law.name));
    }

    if entries.is_empty() {
        vec![NO_MATCH_PLACEHOLDER.to_string()]
    } else {
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{Article, LawDocument, Paragraph};

    fn law_with_hit(name: &str) -> LawDocument {
        LawDocument {
            name: name.to_string(),
            articles: vec![Article {
                number: 1,
                branch_number: 0,
                title: None,
                content: String::new(),
                paragraphs: vec![Paragraph {
                    number: 1,
                    content: "지방법원을 둔다.".to_string(),
                    items: vec![],
                }],
                is_addendum: false,
            }],
        }
    }

    #[test]
    fn empty_corpus_yields_placeholder() {
        let result = amend("지방법원", "지역법원", &[]);
        assert_eq!(result, vec![NO_MATCH_PLACEHOLDER.to_string()]);
    }

    #[test]
    fn no_hits_anywhere_yields_placeholder() {
        let corpus = vec![law_with_hit("가나다법")];
        let result = amend("존재하지않는단어", "대체어", &corpus);
        assert_eq!(result, vec![NO_MATCH_PLACEHOLDER.to_string()]);
    }

    #[test]
    fn matching_laws_are_numbered_with_circled_digits() {
        let corpus = vec![law_with_hit("가나다법"), law_with_hit("마바사법")];
        let result = amend("지방법원", "지역법원", &corpus);
        assert_eq!(result.len(), 2);
        assert!(result[0].starts_with("① 가나다법"));
        assert!(result[1].starts_with("② 마바사법"));
    }
}
