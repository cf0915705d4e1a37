//! Grapheme segmentation tailored for label analysis.
//!
//! Segmentation starts from the standard extended grapheme clusters of
//! [UAX #29](https://www.unicode.org/reports/tr29/) and then applies two
//! extra passes:
//!
//! 1. **Invisible-joiner splitting** (can be opted out per request): a run
//!    of invisible joiner codepoints trailing a cluster is peeled off into
//!    one-codepoint graphemes, so that stray ZWJ/ZWNJ/variation-selector
//!    characters show up individually in the result instead of hiding
//!    inside a neighboring grapheme. A trailing U+FE0F stays attached when
//!    the base plus that selector forms a registered emoji.
//! 2. **Hangul jamo splitting**: every conjoining jamo codepoint starts a
//!    new grapheme. Unicode treats a jamo run as one cluster, but common
//!    platforms render non-precomposed jamo as multiple glyphs, and the
//!    analysis should match what users see. For precomposed Hangul to
//!    survive this pass the input must be in NFC.
//!
//! The concatenation of the returned graphemes always equals the input.

use std::sync::Arc;

use unicode_segmentation::UnicodeSegmentation;

use crate::unicode::UnicodeData;


const ZWJ: char = '\u{200d}';
const ZWNJ: char = '\u{200c}';
const FE0F: char = '\u{fe0f}';

/// True for codepoints peeled off by the invisible-joiner pass.
pub fn is_invisible_joiner(c: char) -> bool {
    matches!(c, ZWJ | ZWNJ | '\u{034f}' | '\u{17b4}' | '\u{17b5}')
        || ('\u{fe00}'..='\u{fe0f}').contains(&c)
}

/// Splits label text into user-perceived graphemes.
pub struct Segmenter {
    unicode: Arc<UnicodeData>,
}

impl Segmenter {
    pub fn new(unicode: Arc<UnicodeData>) -> Self {
        Self { unicode }
    }

    /// Splits `text` into graphemes. `split_invisible` enables the
    /// invisible-joiner pass; the jamo pass always runs.
    pub fn split(&self, text: &str, split_invisible: bool) -> Vec<String> {
        let mut graphemes = Vec::new();
        for cluster in text.graphemes(true) {
            if split_invisible {
                self.peel_invisible(cluster, &mut graphemes);
            } else {
                graphemes.push(cluster.to_owned());
            }
        }
        if text.chars().any(|c| self.unicode.is_hangul_jamo(c)) {
            graphemes = self.split_jamo(graphemes);
        }
        graphemes
    }

    /// Peels trailing invisible joiners off one cluster.
    fn peel_invisible(&self, cluster: &str, out: &mut Vec<String>) {
        let chars: Vec<char> = cluster.chars().collect();
        let mut base_len = chars.len();
        while base_len > 0 && is_invisible_joiner(chars[base_len - 1]) {
            base_len -= 1;
        }
        if base_len == chars.len() {
            out.push(cluster.to_owned());
            return;
        }

        let mut base: String = chars[..base_len].iter().collect();
        let mut peeled = &chars[base_len..];
        if base_len > 0 && peeled[0] == FE0F {
            // an emoji presentation selector belongs to its emoji
            let mut candidate = base.clone();
            candidate.push(FE0F);
            if self.unicode.is_emoji(&candidate) {
                base = candidate;
                peeled = &peeled[1..];
            }
        }
        if !base.is_empty() {
            out.push(base);
        }
        for &c in peeled {
            out.push(c.to_string());
        }
    }

    /// Re-splits graphemes so that every Hangul jamo starts a new one.
    fn split_jamo(&self, graphemes: Vec<String>) -> Vec<String> {
        let mut out = Vec::with_capacity(graphemes.len());
        for grapheme in graphemes {
            let mut piece = String::new();
            for c in grapheme.chars() {
                if !piece.is_empty() && self.unicode.is_hangul_jamo(c) {
                    out.push(std::mem::take(&mut piece));
                }
                piece.push(c);
            }
            if !piece.is_empty() {
                out.push(piece);
            }
        }
        out
    }
}
