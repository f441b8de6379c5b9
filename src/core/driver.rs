//! Per-law driver: walks one `LawDocument`, finds every token matching
//! the search word, classifies it, runs it through the rule engine,
//! and consolidates same-sentence hits across loci into one amendment
//! clause per law.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use super::classifier::classify;
use super::location::{distinct_locus_count, render};
use super::model::{Article, LawDocument, Locus, Paragraph, RewriteKey, TitleFlag};
use super::rules::{apply_rule, Particle};

static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[가-힣A-Za-z0-9]+").unwrap());

/// Splits article/paragraph/item/sub-item text into maximal runs of
/// Hangul syllables, ASCII letters, and digits. Punctuation and
/// brackets that statutory text attaches directly to a word (e.g.
/// 「지방법원」에) are boundary characters, not part of the token, so a
/// defined term keeps matching even with no surrounding whitespace.
fn tokenize(text: &str) -> Vec<&str> {
    TOKEN_PATTERN.find_iter(text).map(|m| m.as_str()).collect()
}

struct Hit {
    locus: Locus,
    key: RewriteKey,
}

fn scan_text(text: &str, locus: &Locus, search_word: &str, out: &mut Vec<Hit>) {
    for token in tokenize(text) {
        // A mid-token substring that isn't a prefix (e.g. 특별+지방법원)
        // is not a match; only tokens starting with the search word are.
        if !token.starts_with(search_word) {
            continue;
        }

        let classification = classify(token, search_word);
        out.push(Hit {
            locus: locus.clone(),
            key: RewriteKey {
                original: classification.chunk.clone(),
                replaced: String::new(), // filled in by the caller once substitution is known
                particle: classification.particle,
                suffix: classification.suffix,
            },
        });
    }
}

fn substitute(chunk: &str, search_word: &str, replace_word: &str) -> String {
    chunk.replacen(search_word, replace_word, 1)
}

fn walk_paragraph(article_locus: &Locus, paragraph: &Paragraph, search_word: &str, replace_word: &str, hits: &mut Vec<Hit>) {
    let locus = article_locus.clone().paragraph(paragraph.number);
    let mut raw = Vec::new();
    scan_text(&paragraph.content, &locus, search_word, &mut raw);
    finish_hits(raw, search_word, replace_word, hits);

    for item in &paragraph.items {
        let item_locus = locus.clone().item(item.number);
        let mut raw = Vec::new();
        scan_text(&item.content, &item_locus, search_word, &mut raw);
        finish_hits(raw, search_word, replace_word, hits);

        for sub in &item.sub_items {
            let sub_locus = item_locus.clone().sub_item(sub.number);
            let mut raw = Vec::new();
            scan_text(&sub.content, &sub_locus, search_word, &mut raw);
            finish_hits(raw, search_word, replace_word, hits);
        }
    }
}

fn finish_hits(raw: Vec<Hit>, search_word: &str, replace_word: &str, hits: &mut Vec<Hit>) {
    for mut hit in raw {
        hit.key.replaced = substitute(&hit.key.original, search_word, replace_word);
        hits.push(hit);
    }
}

/// Walk one article (skipping 부칙 per spec.md §4.4 step 1) and
/// collect every hit beneath it, including its 조문제목 — titles are
/// searched independently of body content and flagged on their own
/// loci, per spec.md §4.5 step 2.
fn walk_article(article: &Article, search_word: &str, replace_word: &str, hits: &mut Vec<Hit>) {
    if article.is_addendum {
        return;
    }

    let locus = Locus::article(article.number, article.branch_number);

    if let Some(title_text) = &article.title {
        let title_locus = locus.clone().title(TitleFlag::Title);
        let mut raw = Vec::new();
        scan_text(title_text, &title_locus, search_word, &mut raw);
        finish_hits(raw, search_word, replace_word, hits);
    }

    let mut raw = Vec::new();
    scan_text(&article.content, &locus, search_word, &mut raw);
    finish_hits(raw, search_word, replace_word, hits);

    for paragraph in &article.paragraphs {
        walk_paragraph(&locus, paragraph, search_word, replace_word, hits);
    }
}

static EACH_ANCHOR: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]+)"(\S*) "([^"]+)"(\S*) 한다\."#).unwrap());

/// Insert "각각" right before "한다" in a consolidated sentence whose
/// locus set spans more than one distinct location. When the anchor
/// pattern doesn't match (a sentence shape the regex wasn't built for
/// — e.g. the degenerate identity case), the sentence passes through
/// unmodified rather than erroring.
fn insert_gakgak(sentence: &str) -> String {
    if EACH_ANCHOR.is_match(sentence) {
        EACH_ANCHOR
            .replace(sentence, |caps: &regex::Captures| {
                format!("\"{}\"{} \"{}\"{} 각각 한다.", &caps[1], &caps[2], &caps[3], &caps[4])
            })
            .to_string()
    } else {
        sentence.to_string()
    }
}

/// Run the full per-law pipeline for one document, producing the
/// final amendment clause list for this law (one string per distinct
/// rewrite, already consolidated and 각각-annotated).
pub fn amend_law(law: &LawDocument, search_word: &str, replace_word: &str) -> Vec<String> {
    let mut hits = Vec::new();
    for article in &law.articles {
        walk_article(article, search_word, replace_word, &mut hits);
    }

    if hits.is_empty() {
        return Vec::new();
    }

    // Bucket by rewrite key, preserving first-seen order of distinct
    // keys so output is deterministic across runs.
    let mut order: Vec<RewriteKey> = Vec::new();
    let mut buckets: BTreeMap<usize, Vec<Locus>> = BTreeMap::new();

    for hit in hits {
        let idx = match order.iter().position(|k| *k == hit.key) {
            Some(i) => i,
            None => {
                order.push(hit.key.clone());
                order.len() - 1
            }
        };
        buckets.entry(idx).or_default().push(hit.locus);
    }

    let mut out = Vec::with_capacity(order.len());
    for (idx, key) in order.into_iter().enumerate() {
        let loci = &buckets[&idx];
        let particle = key.particle.and_then(Particle::from_str);
        let body = apply_rule(&key.original, &key.replaced, particle, key.suffix);
        let location = render(loci);
        let mut clause = format!("{location} 중 {body}");
        if distinct_locus_count(loci) > 1 {
            clause = insert_gakgak(&clause);
        }
        out.push(clause);
    }
    out
}
