//! Token classification: given a matched word inside a whitespace-free
//! token, decide whether the tail is a particle, an excluded suffix, a
//! compound continuation, or nothing.

/// Particle set, longest-first so a substring member never shadows a
/// longer one sharing its prefix (e.g. "이란" before "이").
const PARTICLES: &[&str] = &[
    "이란", "으로서", "으로써", "이나", "이라", "로서", "로써", "으로", "은", "는", "을", "를",
    "과", "와", "이", "가", "나", "로", "란", "라",
];

/// Excluded-suffix set: dropped from the rewrite unit but kept as
/// context for rule selection. Checked before the particle set.
const SUFFIXES: &[&str] = &[
    "으로서", "으로써", "에서", "에게", "로서", "로써", "등의", "등인", "등만", "등에", "만을",
    "만이", "만은", "만에", "만으로", "의", "에", "등", "만",
];

/// Result of classifying one token against the search word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// The rewrite unit: the search word alone, or the whole token for compounds.
    pub chunk: String,
    pub particle: Option<&'static str>,
    pub suffix: Option<&'static str>,
}

fn longest_match<'a>(tail: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter(|c| **c == tail)
        .max_by_key(|c| c.len())
        .copied()
}

/// Classify `token` against `search_word` per the contract in spec.md §4.2.
pub fn classify(token: &str, search_word: &str) -> Classification {
    let plain = |chunk: &str| Classification {
        chunk: chunk.to_string(),
        particle: None,
        suffix: None,
    };

    if token == search_word {
        return plain(token);
    }
    if !token.contains(search_word) {
        return plain(token);
    }
    if !token.starts_with(search_word) {
        return plain(token);
    }

    let tail = &token[search_word.len()..];

    if let Some(suffix) = longest_match(tail, SUFFIXES) {
        return Classification {
            chunk: search_word.to_string(),
            particle: None,
            suffix: Some(suffix),
        };
    }
    if let Some(particle) = longest_match(tail, PARTICLES) {
        return Classification {
            chunk: search_word.to_string(),
            particle: Some(particle),
            suffix: None,
        };
    }

    // Compound: search word continues into an unrecognized tail, the
    // whole token becomes the rewrite unit.
    plain(token)
}
