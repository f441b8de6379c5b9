//! Hangul syllable morphology: batchim (final-consonant) detection.
//!
//! Korean particle allomorphy hinges on whether the preceding syllable
//! carries a final consonant (받침), and specifically whether that
//! consonant is ㄹ. Both questions reduce to arithmetic on the
//! Unicode codepoint of a precomposed Hangul syllable block, which
//! starts at U+AC00 (가) and is laid out as
//! `(initial * 21 + medial) * 28 + final`.

const HANGUL_BASE: u32 = 0xAC00;
const HANGUL_LAST: u32 = 0xD7A3;
const FINAL_COUNT: u32 = 28;
const RIEUL_FINAL: u32 = 8;

fn syllable_code(word: &str) -> Option<u32> {
    let last = word.chars().last()?;
    let code = last as u32;
    if (HANGUL_BASE..=HANGUL_LAST).contains(&code) {
        Some(code - HANGUL_BASE)
    } else {
        None
    }
}

/// True iff `word`'s last character is a Hangul syllable with a final consonant.
///
/// Non-Hangul tails (digits, Latin letters, punctuation) and the empty
/// string are treated as having no final consonant.
pub fn has_final(word: &str) -> bool {
    match syllable_code(word) {
        Some(code) => code % FINAL_COUNT != 0,
        None => false,
    }
}

/// True iff `word`'s last character is a Hangul syllable whose final consonant is ㄹ.
pub fn has_rieul_final(word: &str) -> bool {
    match syllable_code(word) {
        Some(code) => code % FINAL_COUNT == RIEUL_FINAL,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn final_consonant_detection() {
        assert!(has_final("강"));
        assert!(!has_final("바"));
        assert!(has_final("물"));
    }

    #[test]
    fn rieul_final_detection() {
        assert!(has_rieul_final("물"));
        assert!(!has_rieul_final("강"));
    }

    #[test]
    fn empty_and_non_hangul_tails_are_safe() {
        assert!(!has_final(""));
        assert!(!has_final("A"));
        assert!(!has_rieul_final(""));
        assert!(!has_rieul_final("9"));
    }

    #[test]
    fn multi_char_words_look_at_last_syllable_only() {
        assert!(has_final("지방법원")); // 원 has final ㄴ
        assert!(!has_rieul_final("지방법원"));
        assert!(has_rieul_final("서울"));
    }
}
