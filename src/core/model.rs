//! The law document data model: the in-memory tree the driver walks,
//! and the citation path used to locate and group matches within it.

use std::cmp::Ordering;

/// One statute, as a tree of articles. Mirrors the XML shape in
/// spec.md §5 (조문단위/항/호/목), already parsed and owned.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LawDocument {
    pub name: String,
    pub articles: Vec<Article>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub number: u32,
    pub branch_number: u32,
    /// 조문제목 — the article's own heading text, searched independently
    /// of its content and paragraphs (never 조문명, which only feeds
    /// `is_addendum`).
    pub title: Option<String>,
    pub content: String,
    pub paragraphs: Vec<Paragraph>,
    /// 부칙 (addenda) articles are walked for text but excluded from
    /// amendment output per spec.md §4.4 step 1.
    pub is_addendum: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub number: u32,
    pub content: String,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub number: u32,
    pub content: String,
    pub sub_items: Vec<SubItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubItem {
    pub number: u32,
    pub content: String,
}

/// Whether a locus fell on an article's 조문제목 (title), its body, or
/// both — spec.md §3's 5th citation coordinate. " 제목 및 본문"
/// overrides " 제목" whenever a title match and a body match land on
/// the same article (spec.md §4.4's edge policy); paragraphs never
/// carry a title of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum TitleFlag {
    #[default]
    None,
    Title,
    TitleAndBody,
}

impl TitleFlag {
    /// The literal suffix spec.md §4.4/§4.5 append to the article head.
    pub fn as_suffix(self) -> &'static str {
        match self {
            TitleFlag::None => "",
            TitleFlag::Title => " 제목",
            TitleFlag::TitleAndBody => " 제목 및 본문",
        }
    }
}

/// A 조/항/호/목 citation path: the coordinates of one text node in
/// the tree, used to key and sort rewrite groups.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locus {
    pub article: u32,
    pub article_branch: u32,
    pub paragraph: Option<u32>,
    pub item: Option<u32>,
    pub sub_item: Option<u32>,
    pub title: TitleFlag,
}

impl Locus {
    pub fn article(article: u32, branch: u32) -> Self {
        Locus {
            article,
            article_branch: branch,
            paragraph: None,
            item: None,
            sub_item: None,
            title: TitleFlag::None,
        }
    }

    pub fn paragraph(mut self, n: u32) -> Self {
        self.paragraph = Some(n);
        self
    }

    pub fn item(mut self, n: u32) -> Self {
        self.item = Some(n);
        self
    }

    pub fn sub_item(mut self, n: u32) -> Self {
        self.sub_item = Some(n);
        self
    }

    pub fn title(mut self, flag: TitleFlag) -> Self {
        self.title = flag;
        self
    }

    /// Sort key: lexicographic by (조, 조가지, 항, 호, 목, 제목-flag),
    /// absent levels sort before present ones at the same depth.
    fn sort_key(&self) -> (u32, u32, i64, i64, i64, TitleFlag) {
        (
            self.article,
            self.article_branch,
            self.paragraph.map(|p| p as i64).unwrap_or(-1),
            self.item.map(|i| i as i64).unwrap_or(-1),
            self.sub_item.map(|s| s as i64).unwrap_or(-1),
            self.title,
        )
    }
}

impl PartialOrd for Locus {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Locus {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

/// The key a set of identical rewrites at possibly-different loci are
/// bucketed under: same original chunk, replacement chunk, particle,
/// and suffix always produce the same sentence, so spec.md §4.4
/// groups them before rendering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RewriteKey {
    pub original: String,
    pub replaced: String,
    pub particle: Option<&'static str>,
    pub suffix: Option<&'static str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locus_ordering_is_lexicographic() {
        let a = Locus::article(3, 0).paragraph(1);
        let b = Locus::article(3, 0).paragraph(2);
        let c = Locus::article(4, 0);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn absent_levels_sort_before_present() {
        let article_only = Locus::article(5, 0);
        let with_paragraph = Locus::article(5, 0).paragraph(1);
        assert!(article_only < with_paragraph);
    }

    #[test]
    fn branch_number_breaks_ties() {
        let plain = Locus::article(3, 0);
        let branch = Locus::article(3, 2);
        assert!(plain < branch);
    }
}
