//! The rule engine: from (original chunk, replacement chunk, particle,
//! suffix) produce one formal amendment sentence.
//!
//! The ~80-entry decision table is driven by three Hangul features —
//! "original has batchim", "replacement has batchim", "replacement's
//! batchim is ㄹ" — crossed with the particle the chunk was found
//! bound to. Each particle is a tagged variant so the table is a
//! closed match rather than string comparisons scattered through the
//! caller.

use super::morphology::{has_final, has_rieul_final};

/// The 20 particles spec.md §4.2 recognizes, in their canonical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Particle {
    Eul,      // 을
    Reul,     // 를
    Gwa,      // 과
    Wa,       // 와
    I,        // 이
    Ga,       // 가
    Ina,      // 이나
    Na,       // 나
    Euro,     // 으로
    Ro,       // 로
    Eun,      // 은
    Neun,     // 는
    Ran,      // 란
    Iran,     // 이란
    Ra,       // 라
    Ira,      // 이라
    Roseo,    // 로서
    Euroseo,  // 으로서
    Rosseo,   // 로써
    Eurosseo, // 으로써
}

impl Particle {
    pub fn as_str(self) -> &'static str {
        match self {
            Particle::Eul => "을",
            Particle::Reul => "를",
            Particle::Gwa => "과",
            Particle::Wa => "와",
            Particle::I => "이",
            Particle::Ga => "가",
            Particle::Ina => "이나",
            Particle::Na => "나",
            Particle::Euro => "으로",
            Particle::Ro => "로",
            Particle::Eun => "은",
            Particle::Neun => "는",
            Particle::Ran => "란",
            Particle::Iran => "이란",
            Particle::Ra => "라",
            Particle::Ira => "이라",
            Particle::Roseo => "로서",
            Particle::Euroseo => "으로서",
            Particle::Rosseo => "로써",
            Particle::Eurosseo => "으로써",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        use Particle::*;
        Some(match s {
            "을" => Eul,
            "를" => Reul,
            "과" => Gwa,
            "와" => Wa,
            "이" => I,
            "가" => Ga,
            "이나" => Ina,
            "나" => Na,
            "으로" => Euro,
            "로" => Ro,
            "은" => Eun,
            "는" => Neun,
            "란" => Ran,
            "이란" => Iran,
            "라" => Ra,
            "이라" => Ira,
            "로서" => Roseo,
            "으로서" => Euroseo,
            "로써" => Rosseo,
            "으로써" => Eurosseo,
            _ => return None,
        })
    }
}

fn quote(s: &str) -> String {
    format!("\"{s}\"")
}

fn sentence(orig_eojeol: &str, orig_particle: &str, repl_eojeol: &str, repl_particle: &str) -> String {
    format!(
        "{}{} {}{} 한다.",
        quote(orig_eojeol),
        orig_particle,
        quote(repl_eojeol),
        repl_particle
    )
}

/// Rule 0: no particle attached. Dispatches on (oF, rF, rR).
fn rule0(original: &str, replaced: &str) -> String {
    let o_final = has_final(original);
    let r_final = has_final(replaced);
    let r_rieul = has_rieul_final(replaced);

    match (o_final, r_final, r_rieul) {
        (false, false, _) => sentence(original, "를", replaced, "로"),
        (false, true, true) => sentence(original, "를", replaced, "로"),
        (false, true, false) => sentence(original, "를", replaced, "으로"),
        (true, false, _) => sentence(original, "을", replaced, "로"),
        (true, true, true) => sentence(original, "을", replaced, "로"),
        (true, true, false) => sentence(original, "을", replaced, "으로"),
    }
}

/// The suffix-carrying instrumental rules (15/16): 로서/로써 pair with
/// 으로서/으로써ᅟ depending on batchim, with the 서/써 carrier kept
/// whenever the eojeol as a whole is rewritten.
fn rule_instrumental_suffixed(original: &str, replaced: &str, particle: Particle) -> String {
    let o_final = has_final(original);
    let r_final = has_final(replaced);
    let r_rieul = has_rieul_final(replaced);

    match particle {
        Particle::Roseo | Particle::Rosseo => {
            // Rule 15: the whole particle ("로서"/"로써") rides along after
            // the inserted 으, since 로 on its own is never a valid carrier.
            let full = particle.as_str();
            if o_final {
                if r_final {
                    if r_rieul {
                        sentence(original, "을", replaced, "로")
                    } else {
                        sentence(
                            &format!("{original}{full}"),
                            "를",
                            &format!("{replaced}으{full}"),
                            "로",
                        )
                    }
                } else {
                    sentence(original, "을", replaced, "로")
                }
            } else if r_final {
                if r_rieul {
                    sentence(original, "를", replaced, "로")
                } else {
                    sentence(
                        &format!("{original}{full}"),
                        "를",
                        &format!("{replaced}으{full}"),
                        "로",
                    )
                }
            } else {
                sentence(original, "를", replaced, "로")
            }
        }
        Particle::Euroseo | Particle::Eurosseo => {
            // Rule 16: 으로 gets replaced by 로 outright, so only the
            // trailing 서/써 carries over — the leading 으로 is dropped,
            // not just its first syllable.
            let carrier: String = particle.as_str().chars().skip(2).collect();
            if r_final {
                if r_rieul {
                    sentence(
                        &format!("{original}{}", particle.as_str()),
                        "를",
                        &format!("{replaced}로{carrier}"),
                        "로",
                    )
                } else {
                    sentence(original, "을", replaced, "으로")
                }
            } else {
                sentence(
                    &format!("{original}{}", particle.as_str()),
                    "를",
                    &format!("{replaced}로{carrier}"),
                    "로",
                )
            }
        }
        _ => unreachable!("rule_instrumental_suffixed called with non-instrumental particle"),
    }
}

/// Rules 1-14, 17-18: the bare particle table.
fn apply_particle(original: &str, replaced: &str, particle: Particle) -> String {
    let r_final = has_final(replaced);
    let r_rieul = has_rieul_final(replaced);
    let o_final = has_final(original);

    match particle {
        Particle::Eul => {
            if r_final {
                if r_rieul {
                    sentence(original, "을", replaced, "로")
                } else {
                    sentence(original, "을", replaced, "으로")
                }
            } else {
                sentence(&format!("{original}을"), "을", &format!("{replaced}를"), "로")
            }
        }
        Particle::Reul => {
            if r_final {
                sentence(&format!("{original}를"), "을", &format!("{replaced}을"), "로")
            } else {
                sentence(original, "를", replaced, "로")
            }
        }
        Particle::Gwa => {
            if r_final {
                if r_rieul {
                    sentence(original, "을", replaced, "로")
                } else {
                    sentence(original, "을", replaced, "으로")
                }
            } else {
                sentence(&format!("{original}과"), "를", &format!("{replaced}와"), "로")
            }
        }
        Particle::Wa => {
            if r_final {
                sentence(&format!("{original}와"), "를", &format!("{replaced}과"), "로")
            } else {
                sentence(original, "를", replaced, "로")
            }
        }
        Particle::I => {
            if r_final {
                if r_rieul {
                    sentence(original, "을", replaced, "로")
                } else {
                    sentence(original, "을", replaced, "으로")
                }
            } else {
                sentence(&format!("{original}이"), "를", &format!("{replaced}가"), "로")
            }
        }
        Particle::Ga => {
            if r_final {
                sentence(&format!("{original}가"), "를", &format!("{replaced}이"), "로")
            } else {
                sentence(original, "를", replaced, "로")
            }
        }
        Particle::Ina => {
            if r_final {
                if r_rieul {
                    sentence(original, "을", replaced, "로")
                } else {
                    sentence(original, "을", replaced, "으로")
                }
            } else {
                sentence(&format!("{original}이나"), "를", &format!("{replaced}나"), "로")
            }
        }
        Particle::Na => {
            if r_final {
                sentence(&format!("{original}나"), "를", &format!("{replaced}이나"), "로")
            } else {
                sentence(original, "를", replaced, "로")
            }
        }
        Particle::Euro => {
            if r_final {
                if r_rieul {
                    sentence(&format!("{original}으로"), "를", &format!("{replaced}로"), "로")
                } else {
                    sentence(original, "을", replaced, "으로")
                }
            } else {
                sentence(&format!("{original}으로"), "를", &format!("{replaced}로"), "로")
            }
        }
        Particle::Ro => {
            if o_final {
                if r_final {
                    if r_rieul {
                        sentence(original, "을", replaced, "로")
                    } else {
                        sentence(&format!("{original}로"), "를", &format!("{replaced}으로"), "로")
                    }
                } else {
                    sentence(original, "을", replaced, "로")
                }
            } else if r_final {
                if r_rieul {
                    sentence(original, "를", replaced, "로")
                } else {
                    sentence(&format!("{original}로"), "를", &format!("{replaced}으로"), "로")
                }
            } else {
                sentence(original, "를", replaced, "로")
            }
        }
        Particle::Neun => {
            if r_final {
                sentence(&format!("{original}는"), "을", &format!("{replaced}은"), "으로")
            } else {
                sentence(original, "를", replaced, "로")
            }
        }
        Particle::Eun => {
            if r_final {
                if r_rieul {
                    sentence(original, "을", replaced, "로")
                } else {
                    sentence(original, "을", replaced, "으로")
                }
            } else {
                sentence(&format!("{original}은"), "을", &format!("{replaced}는"), "으로")
            }
        }
        Particle::Ran => {
            if r_final {
                sentence(&format!("{original}란"), "을", &format!("{replaced}이란"), "으로")
            } else {
                sentence(original, "를", replaced, "로")
            }
        }
        Particle::Iran => {
            if r_final {
                if r_rieul {
                    sentence(original, "을", replaced, "로")
                } else {
                    sentence(original, "을", replaced, "으로")
                }
            } else {
                sentence(&format!("{original}이란"), "을", &format!("{replaced}란"), "으로")
            }
        }
        Particle::Ra => {
            if r_final {
                sentence(&format!("{original}라"), "를", &format!("{replaced}이라"), "로")
            } else {
                sentence(original, "를", replaced, "로")
            }
        }
        Particle::Ira => {
            if r_final {
                if r_rieul {
                    sentence(original, "을", replaced, "로")
                } else {
                    sentence(original, "을", replaced, "으로")
                }
            } else {
                sentence(&format!("{original}이라"), "를", &format!("{replaced}라"), "로")
            }
        }
        Particle::Roseo | Particle::Rosseo | Particle::Euroseo | Particle::Eurosseo => {
            rule_instrumental_suffixed(original, replaced, particle)
        }
    }
}

/// The drop-suffixes that fall through to Rule 0 untouched, matching
/// the original implementation (excludes "에서", which is concatenated
/// into the stem instead — see `apply_rule`).
const ROUTE_TO_RULE0: &[&str] = &[
    "등", "등의", "등인", "등만", "등에", "에", "에게", "만", "만을", "만이", "만은", "만에",
    "만으로",
];

/// Top-level entry: builds the amendment sentence for one rewrite key.
///
/// `particle` and `suffix` are mutually exclusive per the classifier's
/// contract; this function still honors whichever is set and falls
/// back to the no-particle Rule 0 when neither is.
pub fn apply_rule(original: &str, replaced: &str, particle: Option<Particle>, suffix: Option<&str>) -> String {
    if let Some(suf) = suffix {
        if matches!(suf, "으로서" | "으로써" | "로서" | "로써") {
            let p = Particle::from_str(suf).expect("recognized instrumental suffix");
            return rule_instrumental_suffixed(original, replaced, p);
        }
        if ROUTE_TO_RULE0.contains(&suf) || suf == "의" {
            return identity_or(original, replaced, || rule0(original, replaced));
        }
        // Only "에서" reaches here: folded into the stem, per the
        // original implementation's fallthrough branch.
        let orig_with = format!("{original}{suf}");
        let repl_with = format!("{replaced}{suf}");
        return identity_or(&orig_with, &repl_with, || rule0(&orig_with, &repl_with));
    }

    match particle {
        None => identity_or(original, replaced, || rule0(original, replaced)),
        Some(p) => identity_or(original, replaced, || apply_particle(original, replaced, p)),
    }
}

/// Degenerate case (spec.md §4.3): identical original/replacement
/// always produces the plain passthrough sentence, bypassing whichever
/// particle rule would otherwise apply.
fn identity_or(original: &str, replaced: &str, build: impl FnOnce() -> String) -> String {
    if original == replaced {
        sentence(original, "를", replaced, "로")
    } else {
        build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule0_no_final_to_final_rieul() {
        assert_eq!(apply_rule("바다", "강", None, None), "\"바다\"를 \"강\"로 한다.");
    }

    #[test]
    fn rule0_no_final_to_final_non_rieul() {
        assert_eq!(apply_rule("바다", "산", None, None), "\"바다\"를 \"산\"으로 한다.");
    }

    #[test]
    fn eul_to_final_non_rieul() {
        assert_eq!(
            apply_rule("학교", "집", Some(Particle::Eul), None),
            "\"학교\"을 \"집\"으로 한다."
        );
    }

    #[test]
    fn eul_to_no_final() {
        assert_eq!(
            apply_rule("책", "바다", Some(Particle::Eul), None),
            "\"책을\"을 \"바다를\"로 한다."
        );
    }

    #[test]
    fn eul_to_final_rieul() {
        assert_eq!(
            apply_rule("책", "물", Some(Particle::Eul), None),
            "\"책\"을 \"물\"로 한다."
        );
    }

    #[test]
    fn i_ga_symmetry() {
        assert_eq!(
            apply_rule("학생", "소", Some(Particle::I), None),
            "\"학생이\"를 \"소가\"로 한다."
        );
    }

    #[test]
    fn identity_passthrough_ignores_particle() {
        assert_eq!(
            apply_rule("법원", "법원", Some(Particle::Reul), None),
            "\"법원\"를 \"법원\"로 한다."
        );
    }

    #[test]
    fn suffix_ui_falls_to_rule0() {
        assert_eq!(
            apply_rule("지방법원", "지역법원", None, Some("의")),
            rule0("지방법원", "지역법원")
        );
    }

    #[test]
    fn suffix_eseo_folds_into_stem() {
        let direct = apply_rule("지방법원", "지역법원", None, Some("에서"));
        let manual = rule0("지방법원에서", "지역법원에서");
        assert_eq!(direct, manual);
    }

    #[test]
    fn suffix_euroseo_rule16() {
        // 원 has final ㄴ, not 최, not ㄹ -> "을"/"으로"
        assert_eq!(
            apply_rule("지방법원", "지역법원", None, Some("으로서")),
            "\"지방법원\"을 \"지역법원\"으로 한다."
        );
    }

    #[test]
    fn suffix_euroseo_rule16_keeps_seo_carrier() {
        // 울 carries a ㄹ final, so 으로 collapses to 로 but 서 must survive.
        assert_eq!(
            apply_rule("바다", "서울", None, Some("으로서")),
            "\"바다으로서\"를 \"서울로서\"로 한다."
        );
    }

    #[test]
    fn suffix_roseo_rule15_keeps_full_particle() {
        // Neither final is ㄹ, so 으 is inserted but the whole 로서 rides along.
        assert_eq!(
            apply_rule("법원", "법정", None, Some("로서")),
            "\"법원로서\"를 \"법정으로서\"로 한다."
        );
    }
}
