//! Location model & aggregator: turn a set of citation paths into the
//! formal Korean enumeration used to introduce an amendment sentence,
//! e.g. "제3조제1항제2호ㆍ제3호 및 제4항".
//!
//! Grouping happens bottom-up: sub-items group under their item, items
//! under their paragraph, paragraphs under their article. Within one
//! group, entries are joined with the middle dot (ㆍ); the last group
//! at a level is joined to the rest with " 및 " instead — except at
//! item level, where the legacy original never appends " 및 " even
//! when there is more than one item, only the middle dot. That
//! inconsistency is preserved rather than "fixed".

use super::model::{Locus, TitleFlag};

fn korean_ordinal(prefix: &str, n: u32) -> String {
    format!("제{n}{prefix}")
}

/// Join a run of same-level numbers the "각각" way: middle-dot between
/// all but the last pair, " 및 " before the very last one.
fn join_with_and(rendered: &[String]) -> String {
    match rendered.len() {
        0 => String::new(),
        1 => rendered[0].clone(),
        _ => {
            let (last, rest) = rendered.split_last().unwrap();
            format!("{} 및 {}", rest.join("ㆍ"), last)
        }
    }
}

/// Same joining rule but never inserting " 및 " — the item-level
/// legacy behavior.
fn join_middle_dot_only(rendered: &[String]) -> String {
    rendered.join("ㆍ")
}

#[derive(Debug, Default)]
struct ItemGroup {
    item_no: u32,
    sub_items: Vec<u32>,
}

#[derive(Debug, Default)]
struct ParagraphGroup {
    paragraph_no: Option<u32>,
    items: Vec<ItemGroup>,
    /// paragraph-level hits with no item/sub-item underneath
    bare: bool,
}

#[derive(Debug, Default)]
struct ArticleGroup {
    article: u32,
    branch: u32,
    paragraphs: Vec<ParagraphGroup>,
    /// article-level hits with no paragraph underneath
    bare: bool,
    /// 조문제목 match on this article, possibly upgraded to
    /// `TitleAndBody` once a body match on the same article is seen.
    title: TitleFlag,
}

fn group(loci: &[Locus]) -> Vec<ArticleGroup> {
    let mut articles: Vec<ArticleGroup> = Vec::new();

    for locus in loci {
        let art = match articles
            .iter_mut()
            .find(|a| a.article == locus.article && a.branch == locus.article_branch)
        {
            Some(a) => a,
            None => {
                articles.push(ArticleGroup {
                    article: locus.article,
                    branch: locus.article_branch,
                    ..Default::default()
                });
                articles.last_mut().unwrap()
            }
        };

        if locus.title != TitleFlag::None {
            if locus.title > art.title {
                art.title = locus.title;
            }
            continue;
        }

        let Some(p_no) = locus.paragraph else {
            art.bare = true;
            continue;
        };

        let para = match art.paragraphs.iter_mut().find(|p| p.paragraph_no == Some(p_no)) {
            Some(p) => p,
            None => {
                art.paragraphs.push(ParagraphGroup {
                    paragraph_no: Some(p_no),
                    ..Default::default()
                });
                art.paragraphs.last_mut().unwrap()
            }
        };

        let Some(i_no) = locus.item else {
            para.bare = true;
            continue;
        };

        let item = match para.items.iter_mut().find(|i| i.item_no == i_no) {
            Some(i) => i,
            None => {
                para.items.push(ItemGroup {
                    item_no: i_no,
                    ..Default::default()
                });
                para.items.last_mut().unwrap()
            }
        };

        if let Some(s_no) = locus.sub_item {
            item.sub_items.push(s_no);
        }
    }

    articles.sort_by_key(|a| (a.article, a.branch));
    for art in &mut articles {
        // A title match and a body match on the same article combine
        // into " 제목 및 본문" (spec.md §4.4's edge policy); paragraph
        // hits count as body even though they render after the suffix.
        if art.title == TitleFlag::Title && (art.bare || !art.paragraphs.is_empty()) {
            art.title = TitleFlag::TitleAndBody;
        }
        art.paragraphs.sort_by_key(|p| p.paragraph_no);
        for para in &mut art.paragraphs {
            para.items.sort_by_key(|i| i.item_no);
            for item in &mut para.items {
                item.sub_items.sort_unstable();
            }
        }
    }
    articles
}

fn render_item(item: &ItemGroup) -> String {
    if item.sub_items.is_empty() {
        korean_ordinal("호", item.item_no)
    } else {
        let subs: Vec<String> = item.sub_items.iter().map(|n| korean_ordinal("목", *n)).collect();
        format!("{}{}", korean_ordinal("호", item.item_no), join_middle_dot_only(&subs))
    }
}

fn render_paragraph(para: &ParagraphGroup) -> String {
    let p_no = para.paragraph_no.expect("grouped paragraphs always carry a number");
    let head = korean_ordinal("항", p_no);
    if para.items.is_empty() {
        head
    } else {
        let items: Vec<String> = para.items.iter().map(render_item).collect();
        // Item-level join never appends " 및 ", matching the legacy
        // original; see module docs.
        format!("{head}{}", join_middle_dot_only(&items))
    }
}

fn render_article(art: &ArticleGroup) -> String {
    let head = if art.branch == 0 {
        korean_ordinal("조", art.article)
    } else {
        format!("제{}조의{}", art.article, art.branch)
    };
    let title_suffix = art.title.as_suffix();
    if art.paragraphs.is_empty() {
        format!("{head}{title_suffix}")
    } else {
        let paras: Vec<String> = art.paragraphs.iter().map(render_paragraph).collect();
        format!("{head}{title_suffix}{}", join_with_and(&paras))
    }
}

/// Render a full set of loci into one citation string, e.g.
/// "제3조제1항제2호ㆍ제3호 및 제2조".
pub fn render(loci: &[Locus]) -> String {
    let articles = group(loci);
    let rendered: Vec<String> = articles.iter().map(render_article).collect();
    join_with_and(&rendered)
}

/// Count of distinct loci, used to decide whether a consolidated rule
/// needs a "각각" insertion (spec.md §4.4 step 5: more than one
/// distinct locus).
pub fn distinct_locus_count(loci: &[Locus]) -> usize {
    let mut seen: Vec<&Locus> = Vec::new();
    for l in loci {
        if !seen.contains(&l) {
            seen.push(l);
        }
    }
    seen.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_article_renders_bare() {
        let loci = vec![Locus::article(3, 0)];
        assert_eq!(render(&loci), "제3조");
    }

    #[test]
    fn article_with_branch() {
        let loci = vec![Locus::article(3, 2)];
        assert_eq!(render(&loci), "제3조의2");
    }

    #[test]
    fn two_items_join_with_middle_dot_only() {
        let loci = vec![
            Locus::article(3, 0).paragraph(1).item(2),
            Locus::article(3, 0).paragraph(1).item(3),
        ];
        assert_eq!(render(&loci), "제3조제1항제2호ㆍ제3호");
    }

    #[test]
    fn two_paragraphs_join_with_and() {
        let loci = vec![Locus::article(3, 0).paragraph(1), Locus::article(3, 0).paragraph(2)];
        assert_eq!(render(&loci), "제3조제1항 및 제2항");
    }

    #[test]
    fn title_only_match_renders_suffix() {
        let loci = vec![Locus::article(3, 0).title(TitleFlag::Title)];
        assert_eq!(render(&loci), "제3조 제목");
    }

    #[test]
    fn title_and_paragraph_match_combine_into_title_and_body() {
        let loci = vec![
            Locus::article(3, 0).title(TitleFlag::Title),
            Locus::article(3, 0).paragraph(1),
        ];
        assert_eq!(render(&loci), "제3조 제목 및 본문제1항");
    }

    #[test]
    fn title_and_bare_body_match_combine_without_paragraph_tail() {
        let loci = vec![Locus::article(3, 0).title(TitleFlag::Title), Locus::article(3, 0)];
        assert_eq!(render(&loci), "제3조 제목 및 본문");
    }

    #[test]
    fn distinct_locus_count_dedupes() {
        let loci = vec![
            Locus::article(1, 0).paragraph(1),
            Locus::article(1, 0).paragraph(1),
            Locus::article(1, 0).paragraph(2),
        ];
        assert_eq!(distinct_locus_count(&loci), 2);
    }
}
