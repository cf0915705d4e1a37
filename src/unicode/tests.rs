use super::*;

use pretty_assertions::assert_eq;

fn data() -> UnicodeData {
    UnicodeData::load().unwrap()
}

#[test]
fn character_names() {
    let u = data();
    assert_eq!(u.name('a').unwrap(), "LATIN SMALL LETTER A");
    assert_eq!(u.name('\u{0661}').unwrap(), "ARABIC-INDIC DIGIT ONE");
    assert_eq!(u.name('\u{4E00}').unwrap(), "CJK UNIFIED IDEOGRAPH-4E00");
    assert_eq!(u.name('\u{AC00}').unwrap(), "HANGUL SYLLABLE GA");
    assert_eq!(u.name('\u{D4DB}').unwrap(), "HANGUL SYLLABLE PWILH");
    assert!(u.name('\u{E000}').is_err()); // private use
    assert_eq!(u.name_or('\u{E000}', "fallback"), "fallback");
}

#[test]
fn categories_and_combining() {
    let u = data();
    assert_eq!(u.category('a'), "Ll");
    assert_eq!(u.category('1'), "Nd");
    assert_eq!(u.category('\u{200D}'), "Cf");
    assert_eq!(u.category('\u{4E00}'), "Lo");
    assert_eq!(u.category('\u{10FFFE}'), "Cn");
    assert_eq!(u.combining('a'), 0);
    assert_eq!(u.combining('\u{0328}'), 202);
    assert_eq!(u.combining('\u{0301}'), 230);
}

#[test]
fn blocks() {
    let u = data();
    assert_eq!(u.block_of('a'), Some("Basic Latin"));
    assert_eq!(u.block_of('\u{1100}'), Some("Hangul Jamo"));
    assert!(u.is_hangul_jamo('\u{1100}'));
    assert!(u.is_hangul_jamo('\u{11A8}'));
    // precomposed syllables are not jamo
    assert!(!u.is_hangul_jamo('\u{AC00}'));
}

#[test]
fn script_of_single_chars() {
    let u = data();
    assert_eq!(u.script_of_char('a'), "Latin");
    assert_eq!(u.script_of_char('\u{0661}'), "Arabic");
    assert_eq!(u.script_of_char('-'), "Common");
    assert_eq!(u.script_of_char('\u{0328}'), "Inherited");
}

#[test]
fn script_resolution() {
    let u = data();
    assert_eq!(u.script_of("abcd"), Some("Latin"));
    assert_eq!(u.script_of("\u{306E}.tak"), None);
    assert_eq!(u.script_of("-"), Some("Common"));
    assert_eq!(u.script_of(""), None);
    // Inherited + Common resolves to Common
    assert_eq!(u.script_of("\u{0485}."), Some("Common"));
    // Common overridden by a non-neutral script
    assert_eq!(u.script_of("-a-"), Some("Latin"));
    // Inherited overridden by anything
    assert_eq!(u.script_of("\u{0328}a"), Some("Latin"));
    assert_eq!(u.script_of("\u{0661}-\u{0610}\u{0661}\u{0661}"), Some("Arabic"));
}

#[test]
fn emoji_membership() {
    let u = data();
    assert!(u.is_emoji_char('\u{1F9DF}'));
    assert!(u.is_emoji_char('\u{1F3FB}')); // skin tone modifier
    assert!(u.is_emoji_char('\u{FE0F}'));
    assert!(!u.is_emoji_char('a'));
    assert!(!u.is_emoji_char('\u{200D}')); // ZWJ is excluded on purpose

    assert!(u.is_emoji("\u{1F9DF}"));
    assert!(u.is_emoji("\u{1F9DF}\u{200D}\u{2642}"));
    // trailing FE0F still resolves through the stripped key
    assert!(u.is_emoji("\u{1F9DF}\u{200D}\u{2642}\u{FE0F}"));
    assert!(u.is_emoji("\u{1F1FA}\u{1F1E6}"));
    assert!(!u.is_emoji("ab"));
    assert!(!u.is_emoji("a"));
}

#[test]
fn sequence_names() {
    let u = data();
    assert_eq!(
        u.emoji_zwj_sequence_name("\u{1F9DF}\u{200D}\u{2642}"),
        Some("MAN ZOMBIE".to_owned())
    );
    assert_eq!(
        u.emoji_zwj_sequence_name("\u{1F9DF}\u{200D}\u{2642}\u{FE0F}"),
        Some("MAN ZOMBIE WITH VARIATIONAL SELECTOR(S)".to_owned())
    );
    assert_eq!(
        u.emoji_sequence_name("\u{1F469}\u{1F3FB}\u{200D}\u{1F91D}\u{200D}\u{1F469}\u{1F3FC}"),
        None
    );
    assert_eq!(
        u.emoji_zwj_sequence_name(
            "\u{1F469}\u{1F3FB}\u{200D}\u{1F91D}\u{200D}\u{1F469}\u{1F3FC}"
        ),
        Some("WOMEN HOLDING HANDS: LIGHT SKIN TONE, MEDIUM-LIGHT SKIN TONE".to_owned())
    );
    assert_eq!(
        u.emoji_sequence_name("\u{1F1FA}\u{1F1E6}"),
        Some("FLAG: UKRAINE".to_owned())
    );
    assert_eq!(u.emoji_sequence_name("ab"), None);
}

#[test]
fn versions() {
    let u = data();
    assert_eq!(u.unicode_version('\u{1FACF}'), Some("15.0"));
    assert_eq!(u.emoji_version("\u{1FACF}"), Some("E15.0"));
    assert_eq!(
        u.emoji_version("\u{1F9D1}\u{200D}\u{1F9D1}\u{200D}\u{1F9D2}"),
        Some("E15.1")
    );
    // explicit character version wins
    assert_eq!(u.unicode_min_version("\u{1FACF}"), Some("15.0".to_owned()));
}

#[test]
fn emoji_version_to_unicode_version() {
    let u = data();
    // man zombie has no per-character version entry (multi-char), so the
    // E5.0 emoji version maps to Unicode 10.0
    assert_eq!(
        u.unicode_min_version("\u{1F9DF}\u{200D}\u{2642}"),
        Some("10.0".to_owned())
    );
    // E13.1 maps to 13.0
    assert_eq!(
        u.unicode_min_version("\u{1F635}\u{200D}\u{1F4AB}"),
        Some("13.0".to_owned())
    );
    // E15.1 is past the alignment point and maps to itself
    assert_eq!(
        u.unicode_min_version("\u{1F9D1}\u{200D}\u{1F9D1}\u{200D}\u{1F9D2}"),
        Some("15.1".to_owned())
    );
    assert_eq!(u.unicode_min_version("ab"), None);
}

#[test]
fn version_keys() {
    assert_eq!(version_key("15.1"), (15, 1));
    assert_eq!(version_key("8.0"), (8, 0));
    assert!(version_key("15.1") > version_key("9.0"));
}
