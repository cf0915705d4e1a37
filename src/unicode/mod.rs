//! Query-only Unicode property store.
//!
//! [`UnicodeData`] wraps the bundled data tables and answers the property
//! questions the analysis pipeline needs: character names, general
//! categories, combining classes, blocks, scripts, emoji membership and
//! version information. All lookups are binary searches over
//! range-compressed tables or hash lookups over sequence name maps; the
//! store is immutable after construction and safe to share across
//! concurrent requests.

mod store;

#[cfg(test)]
mod tests;

use std::collections::HashMap;

use log::debug;

use crate::error::{Error, Result};
use store::{RangeTable, RawBundle, SpecialRange};

/// Scripts that never conflict with another script when resolving the
/// dominant script of a string.
pub const NEUTRAL_SCRIPTS: [&str; 2] = ["Common", "Inherited"];

const FE0F: char = '\u{fe0f}';

/// Hangul syllable name components, indexed per the standard
/// decomposition: `AC00 + (l * 21 + v) * 28 + t`.
const HANGUL_L: [&str; 19] = [
    "G", "GG", "N", "D", "DD", "R", "M", "B", "BB", "S", "SS", "", "J", "JJ", "C", "K", "T", "P",
    "H",
];
const HANGUL_V: [&str; 21] = [
    "A", "AE", "YA", "YAE", "EO", "E", "YEO", "YE", "O", "WA", "WAE", "OE", "YO", "U", "WEO", "WE",
    "WI", "YU", "EU", "YI", "I",
];
const HANGUL_T: [&str; 28] = [
    "", "G", "GG", "GS", "N", "NJ", "NH", "D", "L", "LG", "LM", "LB", "LS", "LT", "LP", "LH", "M",
    "B", "BS", "S", "SS", "NG", "J", "C", "K", "T", "P", "H",
];

/// Immutable Unicode property tables, loaded once at process start.
pub struct UnicodeData {
    names: HashMap<u32, String>,
    category: RangeTable<String>,
    combining: RangeTable<u8>,
    special: RangeTable<SpecialRange>,
    blocks: RangeTable<String>,
    scripts: RangeTable<String>,
    emojis: RangeTable<bool>,
    emoji_sequences: HashMap<String, String>,
    emoji_zwj_sequences: HashMap<String, String>,
    emoji_beautified: HashMap<String, String>,
    unicode_versions: RangeTable<String>,
    emoji_versions: HashMap<String, String>,
}

impl UnicodeData {
    /// Parses the bundled data tables.
    pub fn load() -> Result<Self> {
        let raw: RawBundle = serde_json::from_str(store::BUNDLE_JSON)?;
        let mut names = HashMap::with_capacity(raw.name.len());
        for (key, value) in raw.name {
            let cp =
                u32::from_str_radix(&key, 16).map_err(|_| Error::BadCodepointKey(key.clone()))?;
            names.insert(cp, value);
        }
        debug!(
            "unicode tables loaded: {} names, {} script ranges, {} emoji sequences",
            names.len(),
            raw.scripts.len(),
            raw.emoji_sequences.len() + raw.emoji_zwj_sequences.len(),
        );
        Ok(Self {
            names,
            category: raw.category,
            combining: raw.combining,
            special: raw.special,
            blocks: raw.blocks,
            scripts: raw.scripts,
            emojis: raw.emojis,
            emoji_sequences: raw.emoji_sequences,
            emoji_zwj_sequences: raw.emoji_zwj_sequences,
            emoji_beautified: raw.emoji_beautified,
            unicode_versions: raw.versions.unicode,
            emoji_versions: raw.versions.emoji,
        })
    }

    /// Returns the name of the character, or an error if it has none.
    pub fn name(&self, c: char) -> Result<String> {
        self.name_opt(c).ok_or(Error::NameNotFound(c as u32))
    }

    /// Returns the name of the character, or `default` if it has none.
    pub fn name_or(&self, c: char, default: &str) -> String {
        self.name_opt(c).unwrap_or_else(|| default.to_owned())
    }

    fn name_opt(&self, c: char) -> Option<String> {
        let cp = c as u32;
        if let Some(name) = self.names.get(&cp) {
            return Some(name.clone());
        }
        let special = self.special.lookup(cp)?;
        Some(match special.name.as_str() {
            "CJK Ideograph" => format!("CJK UNIFIED IDEOGRAPH-{cp:04X}"),
            "CJK Compatibility Ideograph" => format!("CJK COMPATIBILITY IDEOGRAPH-{cp:04X}"),
            "Tangut Ideograph" => format!("TANGUT IDEOGRAPH-{cp:04X}"),
            "Nushu Character" => format!("NUSHU CHARACTER-{cp:04X}"),
            "Khitan Small Script Character" => {
                format!("KHITAN SMALL SCRIPT CHARACTER-{cp:04X}")
            }
            "Hangul Syllable" => hangul_syllable_name(cp),
            other => other.to_owned(),
        })
    }

    /// Returns the general category of the character, `Cn` if unassigned.
    pub fn category(&self, c: char) -> &str {
        let cp = c as u32;
        self.category
            .lookup(cp)
            .map(String::as_str)
            .or_else(|| self.special.lookup(cp).map(|s| s.category.as_str()))
            .unwrap_or("Cn")
    }

    /// Returns the canonical combining class of the character, 0 if none.
    pub fn combining(&self, c: char) -> u8 {
        let cp = c as u32;
        self.combining
            .lookup(cp)
            .copied()
            .or_else(|| self.special.lookup(cp).map(|s| s.combining))
            .unwrap_or(0)
    }

    /// Returns the block the character belongs to, if any.
    pub fn block_of(&self, c: char) -> Option<&str> {
        self.blocks.lookup(c as u32).map(String::as_str)
    }

    /// True for Hangul Jamo codepoints (conjoining jamo blocks only, not
    /// precomposed syllables).
    pub fn is_hangul_jamo(&self, c: char) -> bool {
        self.block_of(c)
            .is_some_and(|block| block.contains("Hangul") && block.contains("Jamo"))
    }

    /// Returns the script of a single character, `"Unknown"` when the
    /// codepoint has no script assignment.
    pub fn script_of_char(&self, c: char) -> &str {
        self.scripts
            .lookup(c as u32)
            .map(String::as_str)
            .unwrap_or("Unknown")
    }

    /// Resolves the dominant script of `text`, or `None` when the text
    /// mixes two different non-neutral scripts (or is empty).
    ///
    /// `Common` and `Inherited` are neutral: `Common` is overridden only by
    /// a non-neutral script, `Inherited` is overridden by anything.
    pub fn script_of(&self, text: &str) -> Option<&str> {
        let mut script: Option<&str> = None;
        for c in text.chars() {
            let s = self.script_of_char(c);
            match script {
                None => script = Some(s),
                Some(current) if current != s => {
                    if current == "Common" {
                        if !NEUTRAL_SCRIPTS.contains(&s) {
                            script = Some(s);
                        }
                    } else if current == "Inherited" {
                        script = Some(s);
                    } else if !NEUTRAL_SCRIPTS.contains(&s) {
                        return None;
                    }
                }
                Some(_) => {}
            }
        }
        script
    }

    /// True if the single codepoint is emoji-capable.
    pub fn is_emoji_char(&self, c: char) -> bool {
        self.emojis.lookup(c as u32).copied().unwrap_or(false)
    }

    /// True if `text` is a registered (non-ZWJ) emoji sequence.
    pub fn is_emoji_sequence(&self, text: &str) -> bool {
        lookup_with_fe0f(&self.emoji_sequences, text).is_some()
    }

    /// Name of the registered emoji sequence, if any. A lookup that only
    /// succeeds after stripping variation selectors marks the name with a
    /// `WITH VARIATIONAL SELECTOR(S)` suffix.
    pub fn emoji_sequence_name(&self, text: &str) -> Option<String> {
        sequence_name(&self.emoji_sequences, text)
    }

    /// True if `text` is a registered emoji ZWJ sequence.
    pub fn is_emoji_zwj_sequence(&self, text: &str) -> bool {
        lookup_with_fe0f(&self.emoji_zwj_sequences, text).is_some()
    }

    /// Name of the registered emoji ZWJ sequence, if any.
    pub fn emoji_zwj_sequence_name(&self, text: &str) -> Option<String> {
        sequence_name(&self.emoji_zwj_sequences, text)
    }

    /// True if the grapheme is an emoji: a registered sequence, a
    /// registered ZWJ sequence, or a single emoji-capable codepoint.
    ///
    /// Multi-character emoji graphemes are expected to be present in the
    /// sequence tables; an unregistered multi-character grapheme is not an
    /// emoji even if all of its codepoints are emoji-capable.
    pub fn is_emoji(&self, text: &str) -> bool {
        if self.is_emoji_sequence(text) || self.is_emoji_zwj_sequence(text) {
            return true;
        }
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self.is_emoji_char(c),
            _ => false,
        }
    }

    /// The fully-qualified form of a registered emoji, used by
    /// beautification. `None` for anything unregistered.
    pub fn beautified(&self, text: &str) -> Option<&str> {
        lookup_with_fe0f(&self.emoji_beautified, text).map(String::as_str)
    }

    /// The Unicode version that introduced the character, if recorded.
    pub fn unicode_version(&self, c: char) -> Option<&str> {
        self.unicode_versions.lookup(c as u32).map(String::as_str)
    }

    /// The emoji spec version of the grapheme (`"E15.0"` style), looked up
    /// with variation selectors stripped.
    pub fn emoji_version(&self, text: &str) -> Option<&str> {
        self.emoji_versions
            .get(text)
            .or_else(|| self.emoji_versions.get(&strip_fe0f(text)))
            .map(String::as_str)
    }

    /// The minimum Unicode version needed to render the grapheme.
    ///
    /// Prefers the explicit per-character version table; otherwise derives
    /// the version from the emoji spec version via a fixed historical
    /// mapping (emoji releases were decoupled from Unicode releases before
    /// Emoji 11.0, and a few were published standalone afterwards).
    pub fn unicode_min_version(&self, text: &str) -> Option<String> {
        let mut chars = text.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(version) = self.unicode_version(c) {
                return Some(version.to_owned());
            }
        }

        let emoji_version = self.emoji_version(text)?;
        let emoji_version = emoji_version.strip_prefix('E').unwrap_or(emoji_version);
        match emoji_version {
            "1.0" | "2.0" => return Some("8.0".to_owned()),
            "3.0" | "4.0" => return Some("9.0".to_owned()),
            "5.0" => return Some("10.0".to_owned()),
            "12.1" => return Some("12.0".to_owned()),
            "13.1" => return Some("13.0".to_owned()),
            _ => {}
        }
        let (major, minor) = version_key(emoji_version);
        if major >= 11 {
            Some(format!("{major}.{minor}"))
        } else {
            None
        }
    }
}

/// Removes every U+FE0F from the string.
pub fn strip_fe0f(text: &str) -> String {
    text.chars().filter(|&c| c != FE0F).collect()
}

/// Parses a `major.minor` version string for numeric comparison.
/// Unparseable components compare as 0.
pub fn version_key(version: &str) -> (u32, u32) {
    let mut parts = version.split('.');
    let major = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    let minor = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    (major, minor)
}

fn lookup_with_fe0f<'a>(map: &'a HashMap<String, String>, text: &str) -> Option<&'a String> {
    map.get(text).or_else(|| {
        if text.contains(FE0F) {
            map.get(&strip_fe0f(text))
        } else {
            None
        }
    })
}

fn sequence_name(map: &HashMap<String, String>, text: &str) -> Option<String> {
    if let Some(name) = map.get(text) {
        return Some(name.clone());
    }
    if text.chars().count() > 1 && text.contains(FE0F) {
        if let Some(name) = map.get(&strip_fe0f(text)) {
            return Some(format!("{name} WITH VARIATIONAL SELECTOR(S)"));
        }
    }
    None
}

fn hangul_syllable_name(cp: u32) -> String {
    let index = (cp - 0xAC00) as usize;
    let l = index / (21 * 28);
    let v = (index % (21 * 28)) / 28;
    let t = index % 28;
    format!("HANGUL SYLLABLE {}{}{}", HANGUL_L[l], HANGUL_V[v], HANGUL_T[t])
}
