//! `RuleTransliterator` — built-in grapheme-to-phoneme backend.
//!
//! ## Algorithm
//!
//! ```text
//! word ──► greedy longest-match over the language rule table ──► segments
//!                                                                   │
//!                              vowel runs become syllable nuclei ◄──┘
//!                                                                   │
//!                   stress rule picks a nucleus, `ˈ` goes before ◄──┘
//!                   its onset (one consonant, two for C + liquid)
//! ```
//!
//! Letters with no rule pass through unchanged. Words with fewer than two
//! syllables carry no stress marker.

use tracing::trace;

use crate::error::{Result, RimaError};
use crate::language::Language;
use crate::provider::tables::{self, Context, GraphemeRule, LanguageTable, StressRule};
use crate::provider::Transliterator;
use crate::rhyme::PRIMARY_STRESS;

pub const BACKEND_NAME: &str = "rules";

const IPA_VOWELS: &str = "aeiouyɛɔəɪʊæʌɑɒɐɜɝɚøœɘɵɤʉɨɯʏ";
const ONSET_LIQUIDS: &str = "rlɾʁɹjwʎ";

fn is_ipa_vowel(c: char) -> bool {
    IPA_VOWELS.contains(c)
}

/// One matched grapheme and its IPA output.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Segment {
    ipa: String,
    vowel: bool,
    /// The source grapheme carried a stress-pinning accent.
    accented: bool,
}

impl Segment {
    fn new(ipa: &str, accented: bool) -> Self {
        Self {
            ipa: ipa.to_string(),
            vowel: ipa.chars().any(is_ipa_vowel),
            accented,
        }
    }

    fn starts_with_vowel(&self) -> bool {
        self.ipa.chars().next().map(is_ipa_vowel).unwrap_or(false)
    }

    fn is_liquid(&self) -> bool {
        self.ipa
            .chars()
            .next()
            .map(|c| ONSET_LIQUIDS.contains(c))
            .unwrap_or(false)
    }
}

pub struct RuleTransliterator {
    language: Language,
    table: &'static LanguageTable,
}

impl RuleTransliterator {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            table: tables::table(language),
        }
    }

    fn rule_matches(rule: &GraphemeRule, rest: &str, at_start: bool) -> bool {
        let Some(after) = rest.strip_prefix(rule.grapheme) else {
            return false;
        };
        let next = after.chars().next();
        match rule.context {
            Context::Any => true,
            Context::Before(set) => next.map(|c| set.contains(c)).unwrap_or(false),
            Context::Final => next.is_none(),
            Context::BeforeOrFinal(set) => next.map(|c| set.contains(c)).unwrap_or(true),
            Context::Initial => at_start,
        }
    }

    /// Longest matching rule at the head of `rest`; ties go to the earlier rule.
    fn best_rule(&self, rest: &str, at_start: bool) -> Option<&'static GraphemeRule> {
        let mut best: Option<&'static GraphemeRule> = None;
        for rule in self.table.rules {
            if !Self::rule_matches(rule, rest, at_start) {
                continue;
            }
            let len = rule.grapheme.chars().count();
            if best.map_or(true, |b| len > b.grapheme.chars().count()) {
                best = Some(rule);
            }
        }
        best
    }

    fn segment(&self, word: &str) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut pos = 0usize;

        while pos < word.len() {
            let rest = &word[pos..];
            match self.best_rule(rest, pos == 0) {
                Some(rule) => {
                    let accented = rule
                        .grapheme
                        .chars()
                        .any(|c| self.table.stress_accents.contains(c));
                    pos += rule.grapheme.len();

                    let segment = Segment::new(rule.ipa, accented);
                    if self.table.collapse_doubles
                        && !segment.vowel
                        && rule.grapheme.chars().count() == 1
                        && word[pos..].starts_with(rule.grapheme)
                    {
                        pos += rule.grapheme.len();
                    }
                    if !segment.ipa.is_empty() {
                        segments.push(segment);
                    }
                }
                None => {
                    // Unmapped character: pass through.
                    let c = rest.chars().next().unwrap_or_default();
                    pos += c.len_utf8();
                    segments.push(Segment::new(&c.to_string(), false));
                }
            }
        }

        segments
    }

    /// `[start, end)` segment ranges of each syllable nucleus. A vowel
    /// segment joins the previous nucleus only if it starts with a vowel.
    fn nuclei(segments: &[Segment]) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        let mut i = 0;
        while i < segments.len() {
            if segments[i].vowel {
                let start = i;
                i += 1;
                while i < segments.len() && segments[i].starts_with_vowel() {
                    i += 1;
                }
                out.push((start, i));
            } else {
                i += 1;
            }
        }
        out
    }

    fn stressed_nucleus(&self, word: &str, segments: &[Segment], nuclei: &[(usize, usize)]) -> usize {
        let last = nuclei.len() - 1;

        if let Some(idx) = nuclei
            .iter()
            .position(|&(start, end)| segments[start..end].iter().any(|s| s.accented))
        {
            return idx;
        }

        match self.table.stress {
            StressRule::Initial => 0,
            StressRule::Final => last,
            StressRule::ItalianLike => {
                let ends_in_consonant = segments.last().map(|s| !s.vowel).unwrap_or(false);
                if ends_in_consonant {
                    last
                } else {
                    last - 1
                }
            }
            StressRule::SpanishLike => {
                let penultimate = word
                    .chars()
                    .last()
                    .map(|c| "aeiouns".contains(c))
                    .unwrap_or(false);
                if penultimate {
                    last - 1
                } else {
                    last
                }
            }
        }
    }

    /// Index of the first segment of the stressed syllable's onset.
    fn onset_start(segments: &[Segment], nucleus_start: usize, is_first: bool) -> usize {
        if is_first {
            return 0;
        }
        let consonants = segments[..nucleus_start]
            .iter()
            .rev()
            .take_while(|s| !s.vowel)
            .count();
        match consonants {
            0 => nucleus_start,
            1 => nucleus_start - 1,
            _ => {
                let second = &segments[nucleus_start - 1];
                let first = &segments[nucleus_start - 2];
                if second.is_liquid() && !first.is_liquid() {
                    nucleus_start - 2
                } else {
                    nucleus_start - 1
                }
            }
        }
    }

    fn render(&self, word: &str) -> String {
        let segments = self.segment(word);
        let nuclei = Self::nuclei(&segments);

        let marker_at = if nuclei.len() >= 2 {
            let idx = self.stressed_nucleus(word, &segments, &nuclei);
            Some(Self::onset_start(&segments, nuclei[idx].0, idx == 0))
        } else {
            None
        };

        let mut out = String::with_capacity(word.len() * 2);
        for (i, segment) in segments.iter().enumerate() {
            if marker_at == Some(i) {
                out.push(PRIMARY_STRESS);
            }
            out.push_str(&segment.ipa);
        }
        out
    }
}

impl Transliterator for RuleTransliterator {
    fn language(&self) -> Language {
        self.language
    }

    fn warm_up(&self) -> Result<()> {
        if self.table.rules.iter().any(|r| r.grapheme.is_empty()) {
            return Err(RimaError::ProviderUnavailable {
                backend: BACKEND_NAME,
                detail: format!("empty grapheme in {} table", self.language.script_id()),
            });
        }
        trace!(language = %self.language, rules = self.table.rules.len(), "rule table loaded");
        Ok(())
    }

    fn transliterate(&self, word: &str) -> Result<String> {
        Ok(self.render(word))
    }

    fn backend_name(&self) -> &'static str {
        BACKEND_NAME
    }
}
