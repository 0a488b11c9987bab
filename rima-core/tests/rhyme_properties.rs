use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use rima_core::error::Result;
use rima_core::service::resolve_language;
use rima_core::{
    stress_tail, BackendKind, Language, ProviderHandle, ProviderRegistry, RhymeService,
    RimaError, Transliterator, PRIMARY_STRESS,
};

/// Deterministic provider that counts calls and returns a canned mapping.
struct CountingProvider {
    language: Language,
    calls: Arc<AtomicUsize>,
}

impl Transliterator for CountingProvider {
    fn language(&self) -> Language {
        self.language
    }

    fn warm_up(&self) -> Result<()> {
        Ok(())
    }

    fn transliterate(&self, word: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(match word {
            "palun" => "paˈlun".to_string(),
            "kalun" => "kaˈlun".to_string(),
            "casa" => "kasa".to_string(),
            other => other.to_string(),
        })
    }

    fn backend_name(&self) -> &'static str {
        "counting"
    }
}

fn counting_service() -> (RhymeService, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = ProviderRegistry::new();
    for language in Language::ALL {
        registry = registry.with(ProviderHandle::new(CountingProvider {
            language,
            calls: Arc::clone(&calls),
        }));
    }
    (RhymeService::new(registry), calls)
}

const SAMPLE_IPA: &[&str] = &[
    "",
    "a",
    "ab",
    "abc",
    "abcd",
    "kasa",
    "baˈlun",
    "ˈkaza",
    "poˈ",
    "ˈ",
    "ʃʒŋɔ",
    "ɛ̃tɛʁnasjɔnal",
    "ˌsɛkənˈdɛɹi",
    "aˈbˈc",
];

#[test]
fn tail_is_segment_after_last_marker() {
    for ipa in SAMPLE_IPA.iter().filter(|s| s.contains(PRIMARY_STRESS)) {
        let expected = ipa.rsplit(PRIMARY_STRESS).next().unwrap_or_default();
        assert_eq!(stress_tail(ipa), expected, "ipa={ipa}");
    }
}

#[test]
fn unmarked_tail_is_last_three_chars_or_whole() {
    for ipa in SAMPLE_IPA.iter().filter(|s| !s.contains(PRIMARY_STRESS)) {
        let tail = stress_tail(ipa);
        let len = ipa.chars().count();
        if len > 3 {
            assert_eq!(tail.chars().count(), 3, "ipa={ipa}");
            assert!(ipa.ends_with(tail), "ipa={ipa}");
        } else {
            assert_eq!(tail, *ipa);
        }
    }
}

#[test]
fn short_marker_free_tails_are_fixed_points() {
    for ipa in SAMPLE_IPA {
        let tail = stress_tail(ipa);
        if !tail.contains(PRIMARY_STRESS) && tail.chars().count() <= 3 {
            assert_eq!(stress_tail(tail), tail, "ipa={ipa}");
        }
    }
}

#[test]
fn concrete_scenarios() {
    assert_eq!(stress_tail("baˈlun"), "lun");
    assert_eq!(stress_tail("kasa"), "asa");

    let (service, _) = counting_service();
    let out = service
        .detect_rhyme("palun", "kalun", Language::It)
        .expect("detect rhyme");
    assert_eq!(out.stress_tail1, "lun");
    assert_eq!(out.stress_tail2, "lun");
    assert!(out.rhyme);
}

#[test]
fn detect_rhyme_is_reflexive() {
    let (service, _) = counting_service();
    for word in ["palun", "casa", "x", "", "ʃɔ"] {
        for language in Language::ALL {
            let out = service.detect_rhyme(word, word, language).expect("detect rhyme");
            assert!(out.rhyme, "word={word:?} language={language}");
        }
    }
}

#[test]
fn detect_rhyme_is_symmetric() {
    let (service, _) = counting_service();
    let pairs = [("palun", "kalun"), ("palun", "casa"), ("abcd", "xbcd")];
    for (a, b) in pairs {
        let ab = service.detect_rhyme(a, b, Language::It).expect("ab");
        let ba = service.detect_rhyme(b, a, Language::It).expect("ba");
        assert_eq!(ab.ipa1, ba.ipa2);
        assert_eq!(ab.ipa2, ba.ipa1);
        assert_eq!(ab.stress_tail1, ba.stress_tail2);
        assert_eq!(ab.stress_tail2, ba.stress_tail1);
        assert_eq!(ab.rhyme, ba.rhyme);
    }
}

#[test]
fn unsupported_language_never_reaches_a_provider() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = ProviderRegistry::new();
    for language in [Language::En, Language::It] {
        registry = registry.with(ProviderHandle::new(CountingProvider {
            language,
            calls: Arc::clone(&calls),
        }));
    }
    let service = RhymeService::new(registry);

    for language in [Language::Es, Language::Fr, Language::De] {
        let err = service.transliterate("casa", language).unwrap_err();
        assert!(matches!(err, RimaError::UnsupportedLanguage(_)), "{language}");
        let err = service.stress_tail("casa", language).unwrap_err();
        assert!(matches!(err, RimaError::UnsupportedLanguage(_)), "{language}");
        let err = service.detect_rhyme("casa", "masa", language).unwrap_err();
        assert!(matches!(err, RimaError::UnsupportedLanguage(_)), "{language}");
    }
    for code in ["zz", "pt", "", "english"] {
        let err = resolve_language(Some(code)).unwrap_err();
        assert!(matches!(err, RimaError::UnsupportedLanguage(_)));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn each_operation_calls_the_provider_the_expected_number_of_times() {
    let (service, calls) = counting_service();
    service.transliterate("casa", Language::Es).expect("transliterate");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    service.stress_tail("casa", Language::Es).expect("stress tail");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    service
        .detect_rhyme("casa", "palun", Language::Es)
        .expect("detect rhyme");
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[test]
fn rule_backend_is_deterministic_across_languages() {
    let service = RhymeService::new(ProviderRegistry::build(&BackendKind::Rules).expect("build"));
    for language in Language::ALL {
        for word in ["amore", "station", "wasser", "bonsoir", "canción"] {
            let a = service.transliterate(word, language).expect("first");
            let b = service.transliterate(word, language).expect("second");
            assert_eq!(a, b);
            assert!(
                a.ipa.matches(PRIMARY_STRESS).count() <= 1,
                "at most one marker: {}",
                a.ipa
            );
        }
    }
}
