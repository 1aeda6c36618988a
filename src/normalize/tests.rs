use super::*;

fn hindi() -> IndicNormalizer {
    IndicNormalizer::new("hi", NormalizerOptions::default()).expect("hi is supported")
}

#[test]
fn test_plain_hindi_is_unchanged() {
    let text = "यह एक परीक्षण है";
    assert_eq!(hindi().normalize(text).unwrap(), text);
}

#[test]
fn test_empty_input_rejected() {
    assert_eq!(hindi().normalize(""), Err(NormalizeError::EmptyInput));
    assert_eq!(hindi().normalize("   \n\t"), Err(NormalizeError::EmptyInput));
}

#[test]
fn test_wrong_script_rejected() {
    let err = hindi().normalize("this is a test").unwrap_err();
    assert_eq!(
        err,
        NormalizeError::WrongScript {
            language: "hi".to_string(),
            script: "Devanagari",
        }
    );

    // Tamil text is not Devanagari either.
    assert!(matches!(
        hindi().normalize("இது ஒரு சோதனை"),
        Err(NormalizeError::WrongScript { .. })
    ));
}

#[test]
fn test_mixed_script_accepted() {
    let out = hindi().normalize("यह GPU test है").unwrap();
    assert_eq!(out, "यह GPU test है");
}

#[test]
fn test_unsupported_language() {
    let err = IndicNormalizer::new("fr", NormalizerOptions::default()).unwrap_err();
    assert_eq!(
        err,
        NormalizeError::UnsupportedLanguage {
            language: "fr".to_string()
        }
    );
}

#[test]
fn test_language_code_is_case_insensitive() {
    let normalizer = IndicNormalizer::new(" MR ", NormalizerOptions::default()).unwrap();
    assert_eq!(normalizer.language(), "mr");
    assert_eq!(normalizer.script(), Script::Devanagari);
}

#[test]
fn test_precomposed_nukta_decomposed() {
    // U+095B (za) becomes U+091C + U+093C.
    let out = hindi().normalize("\u{095B}रूर").unwrap();
    assert_eq!(out, "\u{091C}\u{093C}रूर");

    let decomposed = hindi().normalize("\u{091C}\u{093C}रूर").unwrap();
    assert_eq!(out, decomposed);
}

#[test]
fn test_all_precomposed_nukta_letters_decompose() {
    let pairs = [
        ('\u{0929}', '\u{0928}'),
        ('\u{0931}', '\u{0930}'),
        ('\u{0934}', '\u{0933}'),
        ('\u{0958}', '\u{0915}'),
        ('\u{0959}', '\u{0916}'),
        ('\u{095A}', '\u{0917}'),
        ('\u{095B}', '\u{091C}'),
        ('\u{095C}', '\u{0921}'),
        ('\u{095D}', '\u{0922}'),
        ('\u{095E}', '\u{092B}'),
        ('\u{095F}', '\u{092F}'),
    ];
    for (composed, base) in pairs {
        let out = hindi().normalize(&composed.to_string()).unwrap();
        assert_eq!(out, format!("{base}\u{093C}"), "for {composed:?}");
    }
}

#[test]
fn test_remove_nuktas() {
    let normalizer = IndicNormalizer::new(
        "hi",
        NormalizerOptions {
            remove_nuktas: true,
            ..Default::default()
        },
    )
    .unwrap();

    assert_eq!(normalizer.normalize("\u{095B}रा").unwrap(), "\u{091C}रा");
    assert_eq!(normalizer.normalize("\u{091C}\u{093C}रा").unwrap(), "\u{091C}रा");
}

#[test]
fn test_pipe_becomes_danda() {
    assert_eq!(hindi().normalize("यह सही है|").unwrap(), "यह सही है।");
}

#[test]
fn test_colon_after_devanagari_becomes_visarga() {
    assert_eq!(hindi().normalize("दु:ख").unwrap(), "दुःख");
}

#[test]
fn test_colon_after_space_is_kept() {
    assert_eq!(hindi().normalize("उत्तर : हाँ").unwrap(), "उत्तर : हाँ");
}

#[test]
fn test_double_colon_only_first_becomes_visarga() {
    assert_eq!(hindi().normalize("क::").unwrap(), "कः:");
}

#[test]
fn test_marathi_chandra_a() {
    let normalizer = IndicNormalizer::new("mr", NormalizerOptions::default()).unwrap();
    assert_eq!(normalizer.normalize("\u{0972}ॅपल").unwrap(), "\u{0905}ॅपल");
}

#[test]
fn test_punctuation_normalized() {
    let out = hindi().normalize("“नमस्ते” – ‘दोस्त’…").unwrap();
    assert_eq!(out, "\"नमस्ते\" - 'दोस्त'...");
}

#[test]
fn test_double_curly_quote_collapses() {
    assert_eq!(hindi().normalize("’’राम’’").unwrap(), "\"राम\"");
}

#[test]
fn test_em_dash_spaced() {
    assert_eq!(hindi().normalize("राम—श्याम").unwrap(), "राम - श्याम");
}

#[test]
fn test_byte_order_mark_stripped() {
    assert_eq!(hindi().normalize("\u{FEFF}नमस्ते").unwrap(), "नमस्ते");
}

#[test]
fn test_joiners_and_soft_hyphen_dropped() {
    assert_eq!(hindi().normalize("नमस्ते\u{200D}").unwrap(), "नमस्ते");
    assert_eq!(hindi().normalize("नमस्ते\u{200C}").unwrap(), "नमस्ते");
    assert_eq!(hindi().normalize("नम\u{AD}स्ते").unwrap(), "नमस्ते");
    assert_eq!(hindi().normalize("नम\u{2060}स्ते\u{FFFE}").unwrap(), "नमस्ते");
}

#[test]
fn test_half_form_joiner_variants_collapse() {
    // क्‍ष with an explicit ZWJ and plain क्ष normalize to the same text.
    assert_eq!(
        hindi().normalize("क्\u{200D}ष").unwrap(),
        hindi().normalize("क्ष").unwrap()
    );
}

#[test]
fn test_space_variants_become_ascii_space() {
    assert_eq!(hindi().normalize("यह\u{A0}है").unwrap(), "यह है");
    assert_eq!(hindi().normalize("यह\u{200B}है").unwrap(), "यह है");
}

#[test]
fn test_chandras_untouched_by_default() {
    assert_eq!(hindi().normalize("हँसना").unwrap(), "हँसना");
}

#[test]
fn test_chandras_folded_when_enabled() {
    let normalizer = IndicNormalizer::new(
        "hi",
        NormalizerOptions {
            normalize_chandras: true,
            ..Default::default()
        },
    )
    .unwrap();

    // candrabindu -> anusvara, candra o sign -> o sign, independent candra o -> o
    assert_eq!(normalizer.normalize("हँसना").unwrap(), "हंसना");
    assert_eq!(normalizer.normalize("डॉक्टर").unwrap(), "डोक्टर");
    assert_eq!(normalizer.normalize("ऑफिस").unwrap(), "ओफिस");
}

#[test]
fn test_non_devanagari_script_gets_base_rules_only() {
    let normalizer = IndicNormalizer::new("ta", NormalizerOptions::default()).unwrap();
    assert_eq!(normalizer.script(), Script::Tamil);

    // No danda or visarga rewriting outside Devanagari.
    assert_eq!(
        normalizer.normalize("இது: ஒரு சோதனை|").unwrap(),
        "இது: ஒரு சோதனை|"
    );
    assert_eq!(normalizer.normalize("“சோதனை”").unwrap(), "\"சோதனை\"");
}

#[test]
fn test_script_for_language() {
    assert_eq!(Script::for_language("hi"), Some(Script::Devanagari));
    assert_eq!(Script::for_language("as"), Some(Script::Bengali));
    assert_eq!(Script::for_language("pa"), Some(Script::Gurmukhi));
    assert_eq!(Script::for_language("ml"), Some(Script::Malayalam));
    assert_eq!(Script::for_language("en"), None);
    assert_eq!(Script::for_language("kok"), Some(Script::Devanagari));
    // Kazakh, not Konkani.
    assert_eq!(Script::for_language("kk"), None);
}

#[test]
fn test_script_contains() {
    assert!(Script::Devanagari.contains('क'));
    assert!(!Script::Devanagari.contains('a'));
    assert!(Script::Bengali.contains('ক'));
    assert!(!Script::Bengali.contains('क'));
}
