//! Raw deserialization of the bundled Unicode data tables.
//!
//! The bundle stores per-codepoint properties as gap-compressed range
//! tables: `starts` is a sorted list of range starting codepoints and the
//! parallel value array holds the value for `starts[i]..starts[i+1]`, with
//! `null` marking unassigned gaps. Lookup is a single binary search.

use std::collections::HashMap;

use serde::Deserialize;

/// A gap-compressed codepoint range table.
#[derive(Debug, Deserialize)]
pub(crate) struct RangeTable<T> {
    starts: Vec<u32>,
    #[serde(alias = "names", alias = "is_emoji", alias = "data")]
    values: Vec<Option<T>>,
}

impl<T> RangeTable<T> {
    /// Returns the value of the range containing `cp`, or `None` for a gap.
    pub(crate) fn lookup(&self, cp: u32) -> Option<&T> {
        let idx = self.starts.partition_point(|&start| start <= cp);
        if idx == 0 {
            None
        } else {
            self.values[idx - 1].as_ref()
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.starts.len()
    }
}

/// Properties shared by a range of codepoints whose names are computed
/// algorithmically (CJK ideographs, Hangul syllables and similar).
#[derive(Debug, Deserialize)]
pub(crate) struct SpecialRange {
    pub(crate) name: String,
    pub(crate) category: String,
    pub(crate) combining: u8,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawVersions {
    pub(crate) unicode: RangeTable<String>,
    pub(crate) emoji: HashMap<String, String>,
}

/// The bundled data file, as serialized.
#[derive(Debug, Deserialize)]
pub(crate) struct RawBundle {
    pub(crate) name: HashMap<String, String>,
    pub(crate) category: RangeTable<String>,
    pub(crate) combining: RangeTable<u8>,
    pub(crate) special: RangeTable<SpecialRange>,
    pub(crate) blocks: RangeTable<String>,
    pub(crate) scripts: RangeTable<String>,
    pub(crate) emojis: RangeTable<bool>,
    pub(crate) emoji_sequences: HashMap<String, String>,
    pub(crate) emoji_zwj_sequences: HashMap<String, String>,
    pub(crate) emoji_beautified: HashMap<String, String>,
    pub(crate) versions: RawVersions,
}

pub(crate) const BUNDLE_JSON: &str = include_str!("../../data/myunicode.json");
