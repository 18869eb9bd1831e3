use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

/// How much trust to put in an estimated year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodEstimate {
    pub year: i32,
    pub confidence: Confidence,
}

/* -------------------------------------------------------------------------- */
/* Lookup tables                                                              */
/* -------------------------------------------------------------------------- */

/// One keyword → base-year rule. Entries are matched by substring against the
/// folded period label; within a table the FIRST match wins, so overlapping
/// keywords must be listed most-specific-first ("haut moyen âge" before
/// "moyen âge", "qing" before "qin", "shang" before "han").
struct PeriodEntry {
    keyword: &'static str,
    base_year: i32,
    confidence: Confidence,
}

const fn entry(keyword: &'static str, base_year: i32, confidence: Confidence) -> PeriodEntry {
    PeriodEntry { keyword, base_year, confidence }
}

/// Per-culture dictionary. `step` spreads same-period items apart when several
/// share one label (year = base + index × step).
struct CultureTable {
    culture_keys: &'static [&'static str],
    step: i32,
    entries: &'static [PeriodEntry],
}

use Confidence::{High, Low, Medium};

static CULTURE_TABLES: &[CultureTable] = &[
    CultureTable {
        culture_keys: &["égypt", "egypt"],
        step: 50,
        entries: &[
            entry("ancien empire", -2600, High),
            entry("moyen empire", -2000, High),
            entry("nouvel empire", -1500, High),
            entry("basse époque", -650, Medium),
            entry("époque tardive", -650, Medium),
            entry("ptoléma", -300, High),
            entry("pharaon", -1500, Medium),
        ],
    },
    CultureTable {
        culture_keys: &["grec", "grèce", "hellén"],
        step: 25,
        entries: &[
            entry("mycénien", -1400, High),
            entry("géométrique", -850, Medium),
            entry("archaïque", -700, High),
            entry("classique", -450, High),
            entry("hellénistique", -250, High),
        ],
    },
    CultureTable {
        culture_keys: &["romain", "rome"],
        step: 20,
        entries: &[
            entry("royauté", -600, Medium),
            entry("république", -300, High),
            entry("haut-empire", 100, High),
            entry("bas-empire", 350, High),
            entry("antiquité tardive", 400, Medium),
            entry("empire", 150, Medium),
        ],
    },
    CultureTable {
        culture_keys: &["franc", "français", "france", "gaul"],
        step: 15,
        entries: &[
            entry("haut moyen âge", 700, High),
            entry("mérovingien", 550, High),
            entry("carolingien", 800, High),
            entry("capétien", 1100, High),
            entry("moyen âge", 1100, Medium),
            entry("renaissance", 1520, High),
            entry("ancien régime", 1700, Medium),
            entry("révolution", 1790, High),
            entry("belle époque", 1900, High),
        ],
    },
    CultureTable {
        culture_keys: &["chin"],
        step: 30,
        entries: &[
            entry("shang", -1300, High),
            entry("zhou", -800, High),
            entry("qing", 1750, High),
            entry("qin", -220, High),
            entry("han", 0, Medium),
            entry("tang", 700, High),
            entry("song", 1100, High),
            entry("yuan", 1300, High),
            entry("ming", 1450, High),
        ],
    },
    CultureTable {
        culture_keys: &["japon"],
        step: 20,
        entries: &[
            entry("jōmon", -3000, Medium),
            entry("jomon", -3000, Medium),
            entry("yayoi", -100, High),
            entry("kofun", 400, High),
            entry("nara", 730, High),
            entry("heian", 1000, High),
            entry("kamakura", 1250, High),
            entry("muromachi", 1450, High),
            entry("edo", 1700, High),
            entry("meiji", 1880, High),
        ],
    },
];

/// Culture-agnostic fallback dictionary, also ordered most-specific-first.
static GENERIC_ENTRIES: &[PeriodEntry] = &[
    entry("préhisto", -10000, Medium),
    entry("néolithique", -4500, Medium),
    entry("âge du bronze", -1800, Medium),
    entry("âge du fer", -700, Medium),
    entry("antiquité", -200, Medium),
    entry("haut moyen âge", 700, Medium),
    entry("moyen âge", 1100, Medium),
    entry("médiéval", 1100, Medium),
    entry("renaissance", 1520, Medium),
    entry("première guerre", 1914, High),
    entry("seconde guerre", 1939, High),
    entry("contemporain", 1950, Medium),
    entry("moderne", 1750, Medium),
];

/// Last resort: deterministic base-year cycle keyed on the ordinal index.
static FALLBACK_CYCLE: [i32; 8] = [-3000, -1500, -800, -200, 500, 1100, 1600, 1900];

/// Centuries I..XXI; anything else fails the century branch and falls through.
static ROMAN_CENTURIES: &[&str] = &[
    "i", "ii", "iii", "iv", "v", "vi", "vii", "viii", "ix", "x", "xi", "xii", "xiii", "xiv", "xv",
    "xvi", "xvii", "xviii", "xix", "xx", "xxi",
];

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{4})\b").unwrap());
static CENTURY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([ivx]+)(?:ème|eme|e)\s*si[èe]cle").unwrap());

/* -------------------------------------------------------------------------- */
/* Mapping                                                                    */
/* -------------------------------------------------------------------------- */

/// NFC-fold and lowercase, so "Moyen Âge" matches "moyen âge" regardless of
/// how the backend normalized the label.
fn fold(s: &str) -> String {
    s.nfc().collect::<String>().to_lowercase()
}

/// Map a free-text period label plus a culture hint to an approximate year.
///
/// Precedence, first match wins:
/// 1. a literal 4-digit year in the label,
/// 2. a Roman-numeral century ("XVe siècle" → mid-century 1450),
/// 3. the matching culture dictionary (index spreads same-label items),
/// 4. the generic dictionary, else a fixed cycle keyed on `index % 8`.
///
/// Total over all inputs; same inputs always yield the same estimate apart
/// from branch 3/4, which consume `index` deterministically.
pub fn map_period_to_year(period: &str, culture: &str, index: usize) -> PeriodEstimate {
    if let Some(cap) = YEAR_RE.captures(period) {
        if let Ok(year) = cap[1].parse::<i32>() {
            return PeriodEstimate { year, confidence: High };
        }
    }

    let period_folded = fold(period);
    let culture_folded = fold(culture);

    if let Some(cap) = CENTURY_RE.captures(&period_folded) {
        if let Some(pos) = ROMAN_CENTURIES.iter().position(|n| *n == &cap[1]) {
            let century = pos as i32 + 1;
            return PeriodEstimate { year: (century - 1) * 100 + 50, confidence: High };
        }
        // numeral outside I..XXI: fall through
    }

    for table in CULTURE_TABLES {
        if !table.culture_keys.iter().any(|k| culture_folded.contains(k)) {
            continue;
        }
        for e in table.entries {
            if period_folded.contains(e.keyword) {
                return PeriodEstimate {
                    year: e.base_year + index as i32 * table.step,
                    confidence: e.confidence,
                };
            }
        }
    }

    for e in GENERIC_ENTRIES {
        if period_folded.contains(e.keyword) {
            return PeriodEstimate { year: e.base_year, confidence: e.confidence };
        }
    }

    PeriodEstimate { year: FALLBACK_CYCLE[index % 8], confidence: Low }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_year_wins() {
        let est = map_period_to_year("vers 1515", "Française", 3);
        assert_eq!(est.year, 1515);
        assert_eq!(est.confidence, High);
    }

    #[test]
    fn roman_century_maps_to_mid_century() {
        let est = map_period_to_year("XVe siècle", "", 0);
        assert_eq!(est.year, 1450);
        assert_eq!(est.confidence, High);

        let est = map_period_to_year("IIIème siècle", "", 0);
        assert_eq!(est.year, 250);
    }

    #[test]
    fn unknown_numeral_falls_through() {
        // XXV is outside the I..XXI table; nothing else matches either.
        let est = map_period_to_year("XXVe siècle", "", 0);
        assert_eq!(est.confidence, Low);
        assert_eq!(est.year, FALLBACK_CYCLE[0]);
    }

    #[test]
    fn culture_dictionary_is_most_specific_first() {
        let est = map_period_to_year("Haut Moyen Âge", "Française", 0);
        assert_eq!(est.year, 700);
        let est = map_period_to_year("Moyen Âge", "Française", 0);
        assert_eq!(est.year, 1100);
        // "qing" must not be shadowed by its own substring "qin"
        let est = map_period_to_year("dynastie Qing", "Chinoise", 0);
        assert_eq!(est.year, 1750);
    }

    #[test]
    fn index_perturbs_by_culture_step() {
        let base = map_period_to_year("Nouvel Empire", "Égyptienne", 0);
        let third = map_period_to_year("Nouvel Empire", "Égyptienne", 2);
        assert_eq!(base.year, -1500);
        assert_eq!(third.year, -1500 + 2 * 50);
        assert_eq!(base.confidence, third.confidence);
    }

    #[test]
    fn generic_fallback_and_wars() {
        assert_eq!(map_period_to_year("première guerre mondiale", "", 0).year, 1914);
        assert_eq!(map_period_to_year("seconde guerre mondiale", "", 0).year, 1939);
        assert_eq!(map_period_to_year("époque contemporaine", "", 0).year, 1950);
    }

    #[test]
    fn unmatched_input_cycles_deterministically() {
        for idx in 0..16 {
            let est = map_period_to_year("???", "Atlante", idx);
            assert_eq!(est.year, FALLBACK_CYCLE[idx % 8]);
            assert_eq!(est.confidence, Low);
            // pure: same input, same output
            assert_eq!(est, map_period_to_year("???", "Atlante", idx));
        }
    }
}
