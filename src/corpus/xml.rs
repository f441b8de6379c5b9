//! XML → `LawDocument` parsing.
//!
//! `law.go.kr`'s `lawService.do` response is a flat-ish tree of
//! 조문단위/항/호/목 elements. We read it as a stream of start/text/end
//! events rather than building a DOM, mirroring how the rest of this
//! crate favors single-pass, allocation-light processing.

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::core::model::{Article, Item, LawDocument, Paragraph, SubItem};
use crate::error::{AmendError, Result};

#[derive(Default)]
struct ArticleBuilder {
    number: u32,
    branch_number: u32,
    /// 조문명 — only ever consulted for the 부칙 check below.
    heading: Option<String>,
    /// 조문제목 — carried into `Article.title` for title-text matching.
    title: Option<String>,
    content: String,
    paragraphs: Vec<Paragraph>,
    is_addendum: bool,
}

#[derive(Default)]
struct ParagraphBuilder {
    number: u32,
    content: String,
    items: Vec<Item>,
}

#[derive(Default)]
struct ItemBuilder {
    number: u32,
    content: String,
    sub_items: Vec<SubItem>,
}

/// Parse one law's raw XML bytes (as returned by `lawService.do`) into
/// a `LawDocument`. Returns `Err` on malformed XML or a document
/// missing every 조문단위 element, matching spec.md §7's contract:
/// the caller treats this as a skip-with-diagnostic, not a panic.
pub fn parse_law_xml(name: &str, xml: &str) -> Result<LawDocument> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut articles = Vec::new();
    let mut current_article: Option<ArticleBuilder> = None;
    let mut current_paragraph: Option<ParagraphBuilder> = None;
    let mut current_item: Option<ItemBuilder> = None;
    let mut current_sub_item: Option<SubItem> = None;
    let mut path: Vec<String> = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if tag == "조문단위" {
                    current_article = Some(ArticleBuilder::default());
                } else if tag == "항" && current_article.is_some() {
                    current_paragraph = Some(ParagraphBuilder::default());
                } else if tag == "호" && current_paragraph.is_some() {
                    current_item = Some(ItemBuilder::default());
                } else if tag == "목" && current_item.is_some() {
                    current_sub_item = Some(SubItem {
                        number: 0,
                        content: String::new(),
                    });
                }
                path.push(tag);
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().map_err(|err| AmendError::Xml(err.to_string()))?.to_string();
                match path.last().map(String::as_str) {
                    Some("조문번호") => {
                        if let Some(a) = current_article.as_mut() {
                            a.number = text.trim().parse().unwrap_or(0);
                        }
                    }
                    Some("조문가지번호") => {
                        if let Some(a) = current_article.as_mut() {
                            a.branch_number = text.trim().parse().unwrap_or(0);
                        }
                    }
                    Some("조문제목") => {
                        if let Some(a) = current_article.as_mut() {
                            a.title = Some(text.trim().to_string());
                        }
                    }
                    Some("조문명") => {
                        if let Some(a) = current_article.as_mut() {
                            if text.contains("부칙") {
                                a.is_addendum = true;
                            }
                            a.heading = Some(text.trim().to_string());
                        }
                    }
                    Some("조문내용") => {
                        if let Some(a) = current_article.as_mut() {
                            a.content = text.trim().to_string();
                        }
                    }
                    Some("항번호") => {
                        if let Some(p) = current_paragraph.as_mut() {
                            p.number = text.trim().trim_start_matches(['①', '제']).parse().unwrap_or(0);
                        }
                    }
                    Some("항내용") => {
                        if let Some(p) = current_paragraph.as_mut() {
                            p.content = text.trim().to_string();
                        }
                    }
                    Some("호번호") => {
                        if let Some(i) = current_item.as_mut() {
                            i.number = text.trim().parse().unwrap_or(0);
                        }
                    }
                    Some("호내용") => {
                        if let Some(i) = current_item.as_mut() {
                            i.content = text.trim().to_string();
                        }
                    }
                    Some("목번호") => {
                        if let Some(s) = current_sub_item.as_mut() {
                            s.number = text.trim().parse().unwrap_or(0);
                        }
                    }
                    Some("목내용") => {
                        if let Some(s) = current_sub_item.as_mut() {
                            s.content = text.trim().to_string();
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::End(e)) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                path.pop();

                match tag.as_str() {
                    "목" => {
                        if let (Some(item), Some(sub)) = (current_item.as_mut(), current_sub_item.take()) {
                            item.sub_items.push(sub);
                        }
                    }
                    "호" => {
                        if let (Some(para), Some(item)) = (current_paragraph.as_mut(), current_item.take()) {
                            para.items.push(Item {
                                number: item.number,
                                content: item.content,
                                sub_items: item.sub_items,
                            });
                        }
                    }
                    "항" => {
                        if let (Some(article), Some(para)) = (current_article.as_mut(), current_paragraph.take()) {
                            article.paragraphs.push(Paragraph {
                                number: para.number,
                                content: para.content,
                                items: para.items,
                            });
                        }
                    }
                    "조문단위" => {
                        if let Some(article) = current_article.take() {
                            articles.push(Article {
                                number: article.number,
                                branch_number: article.branch_number,
                                title: article.title,
                                content: article.content,
                                paragraphs: article.paragraphs,
                                is_addendum: article.is_addendum,
                            });
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(AmendError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    if articles.is_empty() {
        return Err(AmendError::MalformedDocument(format!("{name}: no 조문단위 elements found")));
    }

    Ok(LawDocument {
        name: name.to_string(),
        articles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        <Law>
          <조문단위>
            <조문번호>3</조문번호>
            <조문가지번호>0</조문가지번호>
            <조문제목>(목적)</조문제목>
            <조문내용>이 법은 지방법원을 둔다.</조문내용>
            <항>
              <항번호>1</항번호>
              <항내용>지방법원은 관할구역을 정한다.</항내용>
              <호>
                <호번호>1</호번호>
                <호내용>지방법원에서 심판한다.</호내용>
              </호>
            </항>
          </조문단위>
        </Law>
    "#;

    #[test]
    fn parses_article_tree() {
        let law = parse_law_xml("샘플법", SAMPLE).unwrap();
        assert_eq!(law.name, "샘플법");
        assert_eq!(law.articles.len(), 1);
        let article = &law.articles[0];
        assert_eq!(article.number, 3);
        assert_eq!(article.paragraphs.len(), 1);
        assert_eq!(article.paragraphs[0].items.len(), 1);
        assert!(article.content.contains("지방법원"));
    }

    #[test]
    fn title_and_heading_do_not_clobber_each_other() {
        const ADDENDUM_FIRST: &str = r#"
            <Law>
              <조문단위>
                <조문번호>1</조문번호>
                <조문가지번호>0</조문가지번호>
                <조문명>부칙</조문명>
                <조문제목>(시행일)</조문제목>
                <조문내용>이 법은 공포한 날부터 시행한다.</조문내용>
              </조문단위>
            </Law>
        "#;
        let law = parse_law_xml("샘플법", ADDENDUM_FIRST).unwrap();
        let article = &law.articles[0];
        assert!(article.is_addendum, "조문명 of 부칙 must still flag the article as an addendum");
        assert_eq!(article.title.as_deref(), Some("(시행일)"), "조문제목 text must survive alongside 조문명");
    }

    #[test]
    fn empty_document_is_malformed() {
        let result = parse_law_xml("빈법", "<Law></Law>");
        assert!(result.is_err());
    }

    #[test]
    fn invalid_xml_is_malformed() {
        let result = parse_law_xml("깨진법", "<Law><조문단위>");
        assert!(result.is_err());
    }
}
