use once_cell::sync::Lazy;
use pretty_assertions::assert_eq;

use label_inspector::fonts::FontSupport;
use label_inspector::models::CharType;
use label_inspector::punycode::PunycodeCompatibility;
use label_inspector::{AnalysisOptions, Inspector, InspectorResult};

static INSPECTOR: Lazy<Inspector> = Lazy::new(|| Inspector::new().unwrap());

fn analyse(label: &str) -> InspectorResult {
    INSPECTOR
        .analyse_label(label, &AnalysisOptions::new())
        .unwrap()
}

fn analyse_normalized(label: &str) -> label_inspector::InspectorResultNormalized {
    match analyse(label) {
        InspectorResult::Normalized(result) => *result,
        InspectorResult::Unnormalized(result) => {
            panic!("{label:?} unexpectedly unnormalized: {result:?}")
        }
    }
}

fn analyse_unnormalized(label: &str) -> label_inspector::InspectorResultUnnormalized {
    match analyse(label) {
        InspectorResult::Unnormalized(result) => *result,
        InspectorResult::Normalized(result) => {
            panic!("{label:?} unexpectedly normalized: {result:?}")
        }
    }
}

#[test]
fn simple_ascii_label() {
    let result = analyse_normalized("cat");
    assert_eq!(result.label, "cat");
    assert_eq!(result.status, "normalized");
    assert_eq!(result.version, env!("CARGO_PKG_VERSION"));
    assert_eq!(result.char_length, 3);
    assert_eq!(result.grapheme_length, 3);
    assert_eq!(result.all_type, Some(CharType::SimpleLetter));
    assert_eq!(result.any_types, [CharType::SimpleLetter]);
    assert_eq!(result.all_script.as_deref(), Some("Latin"));
    assert_eq!(result.any_scripts, ["Latin"]);
    assert_eq!(result.confusable_count, 0);
    assert_eq!(result.beautiful_label, "cat");
    assert_eq!(result.canonical_confusable_label.as_deref(), Some("cat"));
    assert_eq!(
        result.beautiful_canonical_confusable_label.as_deref(),
        Some("cat")
    );
    assert!(result.dns_hostname_support);
    assert_eq!(
        result.punycode_compatibility,
        PunycodeCompatibility::Compatible
    );
    assert_eq!(result.punycode_encoding.as_deref(), Some("cat"));
    assert_eq!(result.font_support_all_os, FontSupport::Supported);

    let c = &result.graphemes[0];
    assert_eq!(c.grapheme.value, "c");
    assert_eq!(c.grapheme.name, "LATIN SMALL LETTER C");
    assert_eq!(c.grapheme.codepoint.as_deref(), Some("0x63"));
    assert_eq!(
        c.grapheme.link.as_deref(),
        Some("https://unicodeplus.com/U+0063")
    );
    assert_eq!(c.grapheme.description, "A-Z letter");
    assert_eq!(c.grapheme.unicode_version.as_deref(), Some("1.1"));
    assert_eq!(c.grapheme.emoji_version, None);
    assert!(c.confusables_canonical.is_none());
    assert!(c.confusables_other.is_empty());
}

#[test]
fn non_confusable_label_canonicalizes_to_itself() {
    let result = analyse_normalized("abc123");
    assert_eq!(result.confusable_count, 0);
    assert_eq!(result.canonical_confusable_label.as_deref(), Some("abc123"));
    assert_eq!(result.all_type, None);
    assert_eq!(
        result.any_types,
        [CharType::SimpleLetter, CharType::SimpleNumber]
    );
}

#[test]
fn latin_diacritics_label() {
    let result = analyse_normalized("\u{0105}\u{0119}\u{0107}\u{017C}abc\u{0144}");
    assert_eq!(result.char_length, 8);
    assert_eq!(result.grapheme_length, 8);
    assert_eq!(result.confusable_count, 5);
    assert_eq!(result.all_script.as_deref(), Some("Latin"));
    assert_eq!(
        result.canonical_confusable_label.as_deref(),
        Some("aeczabcn")
    );
    assert_eq!(
        result.beautiful_canonical_confusable_label.as_deref(),
        Some("aeczabcn")
    );

    let first = &result.graphemes[0];
    assert_eq!(first.grapheme.name, "LATIN SMALL LETTER A WITH OGONEK");
    assert_eq!(first.grapheme.grapheme_type, CharType::OtherLetter);
    assert_eq!(first.grapheme.description, "Latin letter");
    let canonical = first.confusables_canonical.as_ref().unwrap();
    assert_eq!(canonical.value(), "a");
}

#[test]
fn emoji_zwj_label() {
    let zombie = "\u{1F9DF}\u{200D}\u{2642}";
    let label = zombie.repeat(3);
    let result = analyse_normalized(&label);
    assert_eq!(result.char_length, 9);
    assert_eq!(result.grapheme_length, 3);
    assert_eq!(result.all_type, Some(CharType::Emoji));
    assert_eq!(result.any_scripts, ["Common"]);
    assert_eq!(result.all_script.as_deref(), Some("Common"));
    assert_eq!(result.confusable_count, 3);
    assert_eq!(
        result.canonical_confusable_label.as_deref(),
        Some("\u{1F9DF}\u{1F9DF}\u{1F9DF}")
    );
    assert_eq!(
        result.beautiful_label,
        "\u{1F9DF}\u{200D}\u{2642}\u{FE0F}".repeat(3)
    );

    let grapheme = &result.graphemes[0].grapheme;
    assert_eq!(grapheme.name, "MAN ZOMBIE");
    assert_eq!(grapheme.grapheme_type, CharType::Emoji);
    assert_eq!(grapheme.description, "Emoji");
    assert_eq!(grapheme.codepoint, None);
    assert_eq!(grapheme.link.as_deref(), Some("http://\u{1F4D9}.la/\u{1F9DF}\u{200D}\u{2642}"));
    assert_eq!(grapheme.emoji_version.as_deref(), Some("E5.0"));
    assert_eq!(grapheme.unicode_version.as_deref(), Some("10.0"));
    assert_eq!(grapheme.font_support_all_os, FontSupport::Supported);

    // the ZWJ inside the sequence counts as emoji
    assert_eq!(grapheme.chars.len(), 3);
    assert_eq!(grapheme.chars[1].value, "\u{200D}");
    assert_eq!(grapheme.chars[1].char_type, CharType::Emoji);

    let canonical = result.graphemes[0].confusables_canonical.as_ref().unwrap();
    assert_eq!(canonical.value(), "\u{1F9DF}");
    let others = &result.graphemes[0].confusables_other;
    assert_eq!(others.len(), 1);
    assert_eq!(others[0].value(), "\u{1F9DF}\u{200D}\u{2640}");
}

#[test]
fn holding_hands_sequence_name() {
    let label = "\u{1F469}\u{1F3FB}\u{200D}\u{1F91D}\u{200D}\u{1F469}\u{1F3FC}";
    let result = analyse_normalized(label);
    assert_eq!(result.grapheme_length, 1);
    assert_eq!(
        result.graphemes[0].grapheme.name,
        "WOMEN HOLDING HANDS: LIGHT SKIN TONE, MEDIUM-LIGHT SKIN TONE"
    );
}

#[test]
fn combining_mark_grapheme() {
    let result = analyse_normalized("b\u{0328}c");
    assert_eq!(result.char_length, 3);
    assert_eq!(result.grapheme_length, 2);
    let grapheme = &result.graphemes[0].grapheme;
    assert_eq!(grapheme.value, "b\u{0328}");
    assert_eq!(grapheme.name, "Combined Character");
    assert_eq!(grapheme.codepoint, None);
    assert_eq!(
        grapheme.link.as_deref(),
        Some("https://unicode.link/inspect/utf8:62.cc.a8")
    );
    assert_eq!(grapheme.script, "Latin");
    assert_eq!(result.confusable_count, 1);
    assert_eq!(
        result.graphemes[0].confusables_canonical.as_ref().unwrap().value(),
        "b"
    );
}

#[test]
fn arabic_script_label() {
    let result = analyse_normalized("\u{0661}\u{0662}");
    assert_eq!(result.all_script.as_deref(), Some("Arabic"));
    assert_eq!(result.all_type, Some(CharType::OtherNumber));
    let grapheme = &result.graphemes[0].grapheme;
    assert_eq!(grapheme.name, "ARABIC-INDIC DIGIT ONE");
    assert_eq!(grapheme.description, "Arabic number");
}

#[test]
fn donkey_is_new_enough_to_carry_versions() {
    let result = analyse_normalized("\u{1FACF}");
    let grapheme = &result.graphemes[0].grapheme;
    assert_eq!(grapheme.name, "DONKEY");
    assert_eq!(grapheme.emoji_version.as_deref(), Some("E15.0"));
    assert_eq!(grapheme.unicode_version.as_deref(), Some("15.0"));
}

#[test]
fn unsupported_font_label() {
    // HANUNOO LETTER GA has no default font coverage
    let result = analyse_normalized("\u{1722}");
    assert_eq!(result.font_support_all_os, FontSupport::Unsupported);
    assert_eq!(
        result.graphemes[0].grapheme.font_support_all_os,
        FontSupport::Unsupported
    );
}

#[test]
fn long_label_is_punycode_incompatible() {
    let result = analyse_normalized(&"x".repeat(64));
    assert_eq!(
        result.punycode_compatibility,
        PunycodeCompatibility::LabelTooLong
    );
    assert_eq!(result.punycode_encoding, None);
    assert!(!result.dns_hostname_support);
}

#[test]
fn unicode_label_punycode() {
    let result = analyse_normalized("\u{0105}laptop");
    assert_eq!(
        result.punycode_compatibility,
        PunycodeCompatibility::Compatible
    );
    assert_eq!(result.punycode_encoding.as_deref(), Some("xn--laptop-v0a"));
    assert!(!result.dns_hostname_support);
}

#[test]
fn truncation_only_affects_lists() {
    let label = "\u{0105}laptop";
    let full = analyse_normalized(label);
    let truncated = match INSPECTOR
        .analyse_label(
            label,
            &AnalysisOptions::new()
                .truncate_graphemes(2)
                .truncate_chars(0)
                .truncate_confusables(1),
        )
        .unwrap()
    {
        InspectorResult::Normalized(result) => *result,
        InspectorResult::Unnormalized(_) => unreachable!(),
    };

    assert_eq!(full.graphemes.len(), 7);
    assert_eq!(truncated.graphemes.len(), 2);
    assert!(truncated.graphemes[0].grapheme.chars.is_empty());
    assert_eq!(truncated.graphemes[0].confusables_other.len(), 1);
    assert!(full.graphemes[0].confusables_other.len() > 1);

    assert_eq!(full.char_length, truncated.char_length);
    assert_eq!(full.grapheme_length, truncated.grapheme_length);
    assert_eq!(full.confusable_count, truncated.confusable_count);
    assert_eq!(full.all_script, truncated.all_script);
    assert_eq!(full.any_types, truncated.any_types);
    assert_eq!(
        full.canonical_confusable_label,
        truncated.canonical_confusable_label
    );
    assert_eq!(full.font_support_all_os, truncated.font_support_all_os);
}

#[test]
fn char_truncation_keeps_joiner_label_aggregates() {
    // invisible joiners and selectors surface only through the per-grapheme
    // char lists, so dropping those lists must not change any count
    let label = "\u{1F9DF}\u{200D}\u{2642}\u{1F9CC}\u{FE0F}";
    let full = analyse_normalized(label);
    let truncated = match INSPECTOR
        .analyse_label(label, &AnalysisOptions::new().truncate_chars(0))
        .unwrap()
    {
        InspectorResult::Normalized(result) => *result,
        InspectorResult::Unnormalized(_) => unreachable!(),
    };

    assert_eq!(full.char_length, 5);
    assert_eq!(full.grapheme_length, 2);
    assert_eq!(full.graphemes[0].grapheme.chars.len(), 3);
    assert!(truncated
        .graphemes
        .iter()
        .all(|g| g.grapheme.chars.is_empty()));

    assert_eq!(full.char_length, truncated.char_length);
    assert_eq!(full.grapheme_length, truncated.grapheme_length);
    assert_eq!(full.all_type, truncated.all_type);
    assert_eq!(full.any_types, truncated.any_types);
    assert_eq!(full.confusable_count, truncated.confusable_count);
    assert_eq!(truncated.confusable_count, 1);
    assert_eq!(
        full.canonical_confusable_label,
        truncated.canonical_confusable_label
    );
}

#[test]
fn uppercase_label_is_unnormalized() {
    let result = analyse_unnormalized("Cat");
    assert_eq!(result.status, "unnormalized");
    assert_eq!(result.normalization_error_code, "mapped");
    assert_eq!(result.canonical_confusable_label.as_deref(), Some("cat"));
    assert_eq!(
        result.beautiful_canonical_confusable_label.as_deref(),
        Some("cat")
    );
    assert_eq!(result.cured_label.as_deref(), Some("cat"));
    assert_eq!(result.disallowed_sequence_start, Some(0));
    let sequence = result.disallowed_sequence.unwrap();
    assert_eq!(sequence.len(), 1);
    assert_eq!(sequence[0].value, "C");
    let suggested = result.suggested_replacement.unwrap();
    assert_eq!(suggested.len(), 1);
    assert_eq!(suggested[0].value, "c");
}

#[test]
fn stray_joiner_is_unnormalized() {
    let result = analyse_unnormalized("a\u{200D}b");
    assert_eq!(result.normalization_error_code, "invisible");
    assert_eq!(result.canonical_confusable_label, None);
    assert_eq!(result.cured_label.as_deref(), Some("ab"));
    assert_eq!(result.disallowed_sequence_start, Some(1));
    let sequence = result.disallowed_sequence.unwrap();
    assert_eq!(sequence.len(), 1);
    assert_eq!(sequence[0].value, "\u{200D}");
    // outside an emoji the joiner is just an invisible character
    assert_eq!(sequence[0].char_type, CharType::Invisible);
    assert_eq!(result.suggested_replacement.unwrap().len(), 0);
}

#[test]
fn empty_label_is_disallowed() {
    let result = analyse_unnormalized("");
    assert_eq!(result.normalization_error_code, "empty");
    assert_eq!(result.canonical_confusable_label, None);
    assert_eq!(result.cured_label, None);
    assert_eq!(result.disallowed_sequence_start, None);
    assert_eq!(result.disallowed_sequence, None);
    assert_eq!(result.suggested_replacement, None);
}

#[test]
fn omit_cure_skips_curing() {
    let result = match INSPECTOR
        .analyse_label("a_b", &AnalysisOptions::new().omit_cure(true))
        .unwrap()
    {
        InspectorResult::Unnormalized(result) => *result,
        InspectorResult::Normalized(_) => unreachable!(),
    };
    assert_eq!(result.normalization_error_code, "underscore");
    assert_eq!(result.cured_label, None);
}

#[test]
fn simple_confusables_view() {
    let result = match INSPECTOR
        .analyse_label("\u{0105}", &AnalysisOptions::new().simple_confusables(true))
        .unwrap()
    {
        InspectorResult::Normalized(result) => *result,
        InspectorResult::Unnormalized(_) => unreachable!(),
    };
    // single-grapheme normalized confusables survive the filtered view
    assert_eq!(result.confusable_count, 1);
    assert_eq!(
        result.graphemes[0]
            .confusables_canonical
            .as_ref()
            .unwrap()
            .value(),
        "a"
    );
}

#[test]
fn serialization_round_trip() {
    let result = analyse_normalized("\u{0105}laptop");
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["status"], "normalized");
    assert_eq!(json["graphemes"][0]["type"], "other_letter");
    assert_eq!(json["punycode_compatibility"], "COMPATIBLE");
    assert_eq!(json["font_support_all_os"], "supported");
}
