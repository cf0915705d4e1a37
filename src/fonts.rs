//! Font support lookups.
//!
//! Tells whether a character or emoji renders with the default font sets
//! of common operating systems. The answer is three-valued: a grapheme can
//! be known supported, known unsupported, or simply absent from the
//! coverage data.

use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::unicode::strip_fe0f;


const FONTS_JSON: &str = include_str!("../data/fonts.json");

/// Whether a grapheme renders on the default fonts of all common
/// operating systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSupport {
    Supported,
    Unsupported,
    Unknown,
}

impl FontSupport {
    pub fn as_str(self) -> &'static str {
        match self {
            FontSupport::Supported => "supported",
            FontSupport::Unsupported => "unsupported",
            FontSupport::Unknown => "unknown",
        }
    }
}

/// Aggregates per-grapheme (or per-character) support levels:
/// one unsupported input makes the whole label unsupported, otherwise one
/// unknown input makes it unknown.
pub fn aggregate_font_support(levels: impl IntoIterator<Item = FontSupport>) -> FontSupport {
    let mut unknown = false;
    for level in levels {
        match level {
            FontSupport::Unsupported => return FontSupport::Unsupported,
            FontSupport::Unknown => unknown = true,
            FontSupport::Supported => {}
        }
    }
    if unknown {
        FontSupport::Unknown
    } else {
        FontSupport::Supported
    }
}

#[derive(Debug, Deserialize)]
struct RawFontData {
    supported_chars: Vec<(u32, u32)>,
    unsupported_chars: Vec<(u32, u32)>,
    supported_sequences: Vec<String>,
    unsupported_sequences: Vec<String>,
}

/// The font coverage table, keyed by FE0F-stripped grapheme.
pub struct FontSupportTable {
    supported: HashSet<String>,
    unsupported: HashSet<String>,
}

impl FontSupportTable {
    pub fn load() -> Result<Self> {
        let raw: RawFontData = serde_json::from_str(FONTS_JSON)?;

        let mut supported = HashSet::new();
        collect_chars(&mut supported, &raw.supported_chars);
        collect_sequences(&mut supported, &raw.supported_sequences);
        let mut unsupported = HashSet::new();
        collect_chars(&mut unsupported, &raw.unsupported_chars);
        collect_sequences(&mut unsupported, &raw.unsupported_sequences);

        // contradictory entries resolve to unknown
        let conflicts: Vec<String> = supported.intersection(&unsupported).cloned().collect();
        for key in conflicts {
            supported.remove(&key);
            unsupported.remove(&key);
        }

        debug!(
            "font coverage loaded: {} supported, {} unsupported",
            supported.len(),
            unsupported.len()
        );
        Ok(Self {
            supported,
            unsupported,
        })
    }

    /// Looks up one character or whole grapheme. U+FE0F is always
    /// supported and is stripped before the table lookup.
    pub fn check_support(&self, text: &str) -> FontSupport {
        if text == "\u{fe0f}" {
            return FontSupport::Supported;
        }
        let key = strip_fe0f(text);
        if self.supported.contains(&key) {
            FontSupport::Supported
        } else if self.unsupported.contains(&key) {
            FontSupport::Unsupported
        } else {
            FontSupport::Unknown
        }
    }
}

fn collect_chars(set: &mut HashSet<String>, ranges: &[(u32, u32)]) {
    for &(start, stop) in ranges {
        for cp in start..=stop {
            if let Some(c) = char::from_u32(cp) {
                set.insert(c.to_string());
            }
        }
    }
}

fn collect_sequences(set: &mut HashSet<String>, sequences: &[String]) {
    set.extend(sequences.iter().map(|s| strip_fe0f(s)));
}
