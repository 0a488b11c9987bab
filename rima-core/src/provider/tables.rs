//! Grapheme → IPA rule tables for the built-in transliterator.
//!
//! Rules are tried at every position; the longest matching grapheme wins and
//! ties go to the rule listed first, so context-restricted rules precede
//! their unrestricted fallbacks.

use crate::language::Language;

/// Where a rule is allowed to fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Context {
    Any,
    /// The next letter must be one of these characters.
    Before(&'static str),
    /// The grapheme must end the word.
    Final,
    /// Either followed by one of these characters, or at the end of the word.
    BeforeOrFinal(&'static str),
    /// The grapheme must start the word.
    Initial,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct GraphemeRule {
    pub grapheme: &'static str,
    pub ipa: &'static str,
    pub context: Context,
}

const fn r(grapheme: &'static str, ipa: &'static str) -> GraphemeRule {
    GraphemeRule {
        grapheme,
        ipa,
        context: Context::Any,
    }
}

const fn before(grapheme: &'static str, ipa: &'static str, next: &'static str) -> GraphemeRule {
    GraphemeRule {
        grapheme,
        ipa,
        context: Context::Before(next),
    }
}

const fn fin(grapheme: &'static str, ipa: &'static str) -> GraphemeRule {
    GraphemeRule {
        grapheme,
        ipa,
        context: Context::Final,
    }
}

const fn before_or_fin(grapheme: &'static str, ipa: &'static str, next: &'static str) -> GraphemeRule {
    GraphemeRule {
        grapheme,
        ipa,
        context: Context::BeforeOrFinal(next),
    }
}

const fn init(grapheme: &'static str, ipa: &'static str) -> GraphemeRule {
    GraphemeRule {
        grapheme,
        ipa,
        context: Context::Initial,
    }
}

/// How the stressed syllable is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StressRule {
    /// First syllable.
    Initial,
    /// Last syllable.
    Final,
    /// Penultimate, unless the word ends in a consonant sound.
    ItalianLike,
    /// Penultimate when the word ends in a vowel, `n` or `s`, else last.
    SpanishLike,
}

#[derive(Debug)]
pub(crate) struct LanguageTable {
    pub rules: &'static [GraphemeRule],
    pub stress: StressRule,
    /// Written accents that pin stress to their syllable.
    pub stress_accents: &'static str,
    /// Collapse a doubled consonant letter into one segment.
    pub collapse_doubles: bool,
}

const FRONT_VOWELS: &str = "eiyéèêëíì";
const BACK_VOWELS: &str = "aouáàóòúù";
const CONSONANTS: &str = "bcdfghjklmnpqrstvwxzç";
/// Consonants after which a French vowel + `n` reads as a nasal vowel.
const NASAL_CODA: &str = "bcdfghjklpqrstvwxzç";

static ENGLISH: LanguageTable = LanguageTable {
    rules: &[
        r("tion", "ʃən"),
        r("sion", "ʒən"),
        r("igh", "aɪ"),
        r("sch", "sk"),
        init("kn", "n"),
        init("wr", "ɹ"),
        r("sh", "ʃ"),
        r("ch", "tʃ"),
        r("th", "θ"),
        r("ph", "f"),
        r("wh", "w"),
        r("ck", "k"),
        r("ng", "ŋ"),
        r("qu", "kw"),
        r("ee", "iː"),
        r("ea", "iː"),
        r("oo", "uː"),
        r("ou", "aʊ"),
        fin("ow", "oʊ"),
        r("ow", "aʊ"),
        r("oa", "oʊ"),
        r("ai", "eɪ"),
        r("ay", "eɪ"),
        r("oi", "ɔɪ"),
        r("oy", "ɔɪ"),
        r("au", "ɔ"),
        r("aw", "ɔ"),
        r("ar", "ɑɹ"),
        r("er", "ɚ"),
        r("ir", "ɝ"),
        r("ur", "ɝ"),
        r("or", "ɔɹ"),
        before("c", "s", "eiy"),
        r("c", "k"),
        before("g", "dʒ", "eiy"),
        r("g", "ɡ"),
        r("j", "dʒ"),
        r("x", "ks"),
        fin("y", "i"),
        r("y", "j"),
        r("r", "ɹ"),
        fin("e", ""),
        r("a", "æ"),
        r("e", "ɛ"),
        r("i", "ɪ"),
        r("o", "ɑ"),
        r("u", "ʌ"),
        r("b", "b"),
        r("d", "d"),
        r("f", "f"),
        r("h", "h"),
        r("k", "k"),
        r("l", "l"),
        r("m", "m"),
        r("n", "n"),
        r("p", "p"),
        r("s", "s"),
        r("t", "t"),
        r("v", "v"),
        r("w", "w"),
        r("z", "z"),
    ],
    stress: StressRule::Initial,
    stress_accents: "",
    collapse_doubles: true,
};

static ITALIAN: LanguageTable = LanguageTable {
    rules: &[
        before("gl", "ʎ", "i"),
        r("gn", "ɲ"),
        before("sci", "ʃ", BACK_VOWELS),
        before("sc", "ʃ", FRONT_VOWELS),
        r("ch", "k"),
        r("gh", "ɡ"),
        before("ci", "tʃ", BACK_VOWELS),
        before("gi", "dʒ", BACK_VOWELS),
        before("c", "tʃ", FRONT_VOWELS),
        r("c", "k"),
        before("g", "dʒ", FRONT_VOWELS),
        r("g", "ɡ"),
        r("qu", "kw"),
        r("zz", "tts"),
        r("z", "ts"),
        r("h", ""),
        r("x", "ks"),
        r("j", "j"),
        r("y", "i"),
        r("a", "a"),
        r("à", "a"),
        r("e", "e"),
        r("è", "ɛ"),
        r("é", "e"),
        r("i", "i"),
        r("ì", "i"),
        r("í", "i"),
        r("o", "o"),
        r("ò", "ɔ"),
        r("ó", "o"),
        r("u", "u"),
        r("ù", "u"),
        r("ú", "u"),
        r("b", "b"),
        r("d", "d"),
        r("f", "f"),
        r("k", "k"),
        r("l", "l"),
        r("m", "m"),
        r("n", "n"),
        r("p", "p"),
        r("r", "r"),
        r("s", "s"),
        r("t", "t"),
        r("v", "v"),
        r("w", "w"),
    ],
    stress: StressRule::ItalianLike,
    stress_accents: "àèéìíòóùú",
    collapse_doubles: false,
};

static SPANISH: LanguageTable = LanguageTable {
    rules: &[
        r("ch", "tʃ"),
        r("ll", "ʝ"),
        r("rr", "r"),
        init("r", "r"),
        r("ñ", "ɲ"),
        before("qu", "k", FRONT_VOWELS),
        before("gu", "ɡ", FRONT_VOWELS),
        r("gü", "ɡw"),
        before("c", "θ", FRONT_VOWELS),
        r("c", "k"),
        before("g", "x", FRONT_VOWELS),
        r("g", "ɡ"),
        r("z", "θ"),
        r("j", "x"),
        r("h", ""),
        r("v", "b"),
        r("x", "ks"),
        fin("y", "i"),
        r("y", "ʝ"),
        r("r", "ɾ"),
        r("a", "a"),
        r("á", "a"),
        r("e", "e"),
        r("é", "e"),
        r("i", "i"),
        r("í", "i"),
        r("o", "o"),
        r("ó", "o"),
        r("u", "u"),
        r("ú", "u"),
        r("ü", "w"),
        r("b", "b"),
        r("d", "d"),
        r("f", "f"),
        r("k", "k"),
        r("l", "l"),
        r("m", "m"),
        r("n", "n"),
        r("p", "p"),
        r("s", "s"),
        r("t", "t"),
        r("w", "w"),
    ],
    stress: StressRule::SpanishLike,
    stress_accents: "áéíóú",
    collapse_doubles: false,
};

static FRENCH: LanguageTable = LanguageTable {
    rules: &[
        r("eaux", "o"),
        r("eau", "o"),
        before_or_fin("ain", "ɛ̃", NASAL_CODA),
        before_or_fin("ein", "ɛ̃", NASAL_CODA),
        fin("ent", "ɑ̃"),
        fin("er", "e"),
        fin("ez", "e"),
        fin("es", ""),
        r("au", "o"),
        r("ou", "u"),
        r("oi", "wa"),
        r("ai", "ɛ"),
        r("ei", "ɛ"),
        r("œu", "œ"),
        r("eu", "ø"),
        before_or_fin("an", "ɑ̃", NASAL_CODA),
        before_or_fin("am", "ɑ̃", "bp"),
        before_or_fin("en", "ɑ̃", NASAL_CODA),
        before_or_fin("em", "ɑ̃", "bp"),
        before_or_fin("on", "ɔ̃", NASAL_CODA),
        before_or_fin("om", "ɔ̃", "bp"),
        before_or_fin("in", "ɛ̃", NASAL_CODA),
        before_or_fin("im", "ɛ̃", "bp"),
        before_or_fin("un", "œ̃", NASAL_CODA),
        r("ch", "ʃ"),
        r("gn", "ɲ"),
        r("ph", "f"),
        r("qu", "k"),
        r("th", "t"),
        before("c", "s", FRONT_VOWELS),
        r("ç", "s"),
        r("c", "k"),
        before("g", "ʒ", FRONT_VOWELS),
        r("g", "ɡ"),
        r("j", "ʒ"),
        r("r", "ʁ"),
        r("h", ""),
        fin("s", ""),
        fin("t", ""),
        fin("d", ""),
        fin("x", ""),
        fin("z", ""),
        fin("p", ""),
        fin("e", ""),
        r("x", "ks"),
        r("é", "e"),
        r("è", "ɛ"),
        r("ê", "ɛ"),
        r("ë", "ɛ"),
        r("e", "ə"),
        r("a", "a"),
        r("à", "a"),
        r("â", "ɑ"),
        r("i", "i"),
        r("î", "i"),
        r("ï", "i"),
        r("o", "o"),
        r("ô", "o"),
        r("u", "y"),
        r("û", "y"),
        r("ù", "y"),
        r("y", "i"),
        r("b", "b"),
        r("d", "d"),
        r("f", "f"),
        r("k", "k"),
        r("l", "l"),
        r("m", "m"),
        r("n", "n"),
        r("p", "p"),
        r("s", "s"),
        r("t", "t"),
        r("v", "v"),
        r("w", "w"),
        r("z", "z"),
    ],
    stress: StressRule::Final,
    stress_accents: "",
    collapse_doubles: true,
};

static GERMAN: LanguageTable = LanguageTable {
    rules: &[
        r("tsch", "tʃ"),
        r("auch", "aʊx"),
        r("sch", "ʃ"),
        r("ach", "ax"),
        r("och", "ɔx"),
        r("uch", "ux"),
        r("ch", "ç"),
        r("ck", "k"),
        r("ng", "ŋ"),
        r("pf", "pf"),
        r("ph", "f"),
        r("qu", "kv"),
        r("th", "t"),
        r("tz", "ts"),
        r("ie", "iː"),
        r("ei", "aɪ"),
        r("ai", "aɪ"),
        r("eu", "ɔʏ"),
        r("äu", "ɔʏ"),
        r("au", "aʊ"),
        r("aa", "aː"),
        r("ee", "eː"),
        r("oo", "oː"),
        before_or_fin("ah", "aː", CONSONANTS),
        before_or_fin("eh", "eː", CONSONANTS),
        before_or_fin("ih", "iː", CONSONANTS),
        before_or_fin("oh", "oː", CONSONANTS),
        before_or_fin("uh", "uː", CONSONANTS),
        fin("er", "ɐ"),
        fin("en", "ən"),
        fin("el", "əl"),
        fin("e", "ə"),
        fin("b", "p"),
        fin("d", "t"),
        fin("g", "k"),
        init("sp", "ʃp"),
        init("st", "ʃt"),
        before("s", "z", "aeiouäöü"),
        r("ß", "s"),
        r("z", "ts"),
        r("v", "f"),
        r("w", "v"),
        r("j", "j"),
        r("r", "ʁ"),
        r("x", "ks"),
        r("a", "a"),
        r("ä", "ɛ"),
        r("e", "ɛ"),
        r("i", "ɪ"),
        r("o", "ɔ"),
        r("ö", "ø"),
        r("u", "ʊ"),
        r("ü", "y"),
        r("y", "y"),
        r("b", "b"),
        r("c", "k"),
        r("d", "d"),
        r("f", "f"),
        r("g", "ɡ"),
        r("h", "h"),
        r("k", "k"),
        r("l", "l"),
        r("m", "m"),
        r("n", "n"),
        r("p", "p"),
        r("s", "s"),
        r("t", "t"),
    ],
    stress: StressRule::Initial,
    stress_accents: "",
    collapse_doubles: true,
};

pub(crate) fn table(language: Language) -> &'static LanguageTable {
    match language {
        Language::En => &ENGLISH,
        Language::It => &ITALIAN,
        Language::Es => &SPANISH,
        Language::Fr => &FRENCH,
        Language::De => &GERMAN,
    }
}
