//! Stress-tail extraction and word normalisation.
//!
//! The stress tail is a coarse rhyme proxy: everything after the final
//! primary-stress marker, or the last three characters of an unmarked
//! transcription. Two words "rhyme" when their tails are equal.

/// IPA primary-stress marker (U+02C8).
pub const PRIMARY_STRESS: char = '\u{02C8}';

/// Tail length used when a transcription carries no stress marker.
const UNSTRESSED_TAIL_CHARS: usize = 3;

/// Trim surrounding whitespace and lower-case.
pub fn normalize_word(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Derive the stress tail of an IPA transcription.
///
/// Lengths are counted in Unicode scalar values, not bytes.
pub fn stress_tail(ipa: &str) -> &str {
    if let Some(idx) = ipa.rfind(PRIMARY_STRESS) {
        return &ipa[idx + PRIMARY_STRESS.len_utf8()..];
    }

    let len = ipa.chars().count();
    if len > UNSTRESSED_TAIL_CHARS {
        let skip = len - UNSTRESSED_TAIL_CHARS;
        // char_indices().nth(skip) always exists because skip < len
        let start = ipa
            .char_indices()
            .nth(skip)
            .map(|(i, _)| i)
            .unwrap_or(0);
        &ipa[start..]
    } else {
        ipa
    }
}

/// `true` when both transcriptions share a stress tail.
pub fn tails_rhyme(ipa1: &str, ipa2: &str) -> bool {
    stress_tail(ipa1) == stress_tail(ipa2)
}
