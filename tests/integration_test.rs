use amendlaw::core::amend;
use amendlaw::core::model::{Article, Item, LawDocument, Paragraph};
use amendlaw::search::search;

fn gu_beop_won() -> LawDocument {
    LawDocument {
        name: "법원조직법".to_string(),
        articles: vec![
            Article {
                number: 3,
                branch_number: 0,
                title: Some("지방법원".to_string()),
                content: "지방법원을 둔다.".to_string(),
                paragraphs: vec![Paragraph {
                    number: 1,
                    content: "지방법원 관할구역은 대법원규칙으로 정한다.".to_string(),
                    items: vec![Item {
                        number: 1,
                        content: "「지방법원」에서 심판한다.".to_string(),
                        sub_items: vec![],
                    }],
                }],
                is_addendum: false,
            },
            Article {
                number: 1,
                branch_number: 0,
                title: Some("부칙".to_string()),
                content: "이 법은 공포한 날부터 시행하되, 지방법원에 관한 규정은 따로 정한다.".to_string(),
                paragraphs: vec![],
                is_addendum: true,
            },
        ],
    }
}

fn min_beop() -> LawDocument {
    LawDocument {
        name: "민법".to_string(),
        articles: vec![Article {
            number: 10,
            branch_number: 0,
            title: None,
            content: "성년자는 법률행위를 할 수 있다.".to_string(),
            paragraphs: vec![],
            is_addendum: false,
        }],
    }
}

fn gasa_sosong_beop() -> LawDocument {
    LawDocument {
        name: "가사소송법".to_string(),
        articles: vec![Article {
            number: 2,
            branch_number: 0,
            title: None,
            content: "지방법원 본원 합의부가 관할한다.".to_string(),
            paragraphs: vec![],
            is_addendum: false,
        }],
    }
}

#[test]
fn amend_consolidates_and_marks_gakgak_across_a_law() {
    let corpus = vec![gu_beop_won()];
    let result = amend("지방법원", "지역법원", &corpus);

    assert_eq!(result.len(), 1);
    let entry = &result[0];
    assert!(entry.starts_with("① 법원조직법 일부를 다음과 같이 개정한다."));
    assert!(entry.contains("각각"));
    // The addendum article's own occurrence of the search word must not
    // surface as a separate amendment clause.
    assert!(!entry.contains("공포한 날"));
    // The title match and paragraph 1 match share a rewrite key, so
    // they consolidate into one title-and-body location.
    assert!(entry.contains("제3조 제목 및 본문제1항"));
}

#[test]
fn amend_numbers_multiple_matching_laws_with_circled_digits() {
    let corpus = vec![gu_beop_won(), min_beop(), gasa_sosong_beop()];
    let result = amend("지방법원", "지역법원", &corpus);

    // 민법 has no hits at all and is dropped; the other two are
    // numbered ①/② in corpus order, skipping the non-matching law.
    assert_eq!(result.len(), 2);
    assert!(result[0].starts_with("① 법원조직법"));
    assert!(result[1].starts_with("② 가사소송법"));
}

#[test]
fn amend_returns_placeholder_when_nothing_in_the_corpus_matches() {
    let corpus = vec![min_beop()];
    let result = amend("지방법원", "지역법원", &corpus);
    assert_eq!(result.len(), 1);
    assert!(result[0].contains("개정 대상 조문이 없습니다"));
}

#[test]
fn search_highlights_hits_and_excludes_addenda() {
    let corpus = vec![gu_beop_won()];
    let results = search("지방법원", &corpus);

    let snippets = results.get("법원조직법").expect("법원조직법 should have hits");
    assert!(snippets.iter().all(|s| s.contains("<mark>지방법원</mark>")));
    // Article body, paragraph, and item each mention the word once; the
    // addendum article does too but must not be counted.
    assert_eq!(snippets.len(), 3);
}

#[test]
fn search_across_corpus_omits_laws_with_no_hits() {
    let corpus = vec![gu_beop_won(), min_beop()];
    let results = search("지방법원", &corpus);

    assert!(results.contains_key("법원조직법"));
    assert!(!results.contains_key("민법"));
}
