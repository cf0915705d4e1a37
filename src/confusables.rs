//! Confusable character and grapheme resolution.
//!
//! A confusable is a grapheme that renders similarly enough to another to
//! be usable for spoofing. The resolver answers three questions about a
//! grapheme: is it confusable, what is its canonical ("safe") form, and
//! which alternatives could it be confused with.
//!
//! Answers come from a merged static table plus one heuristic: a grapheme
//! made of a base character followed only by combining marks is confusable
//! with its bare base even when the exact combination is absent from the
//! table. For genuinely unknown multi-character strings the resolver falls
//! back to the first character; this is a deliberately preserved heuristic
//! that downstream consumers rely on.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;
use regex::Regex;
use serde::Deserialize;

use crate::error::Result;
use crate::normalizer::Normalizer;
use crate::segmentation::Segmenter;
use crate::unicode::UnicodeData;


const CHAR_TABLE_JSON: &str = include_str!("../data/confusables.json");
const GRAPHEME_TABLE_JSON: &str = include_str!("../data/grapheme_confusables.json");

/// Canonical form (if known) and alternatives of one confusable grapheme.
/// The grapheme itself never appears among its own alternatives, and the
/// canonical is excluded from them as well.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfusableEntry(pub Option<String>, pub Vec<String>);

type Table = HashMap<String, ConfusableEntry>;

/// The merged confusable tables, shared read-only across requests.
pub struct Confusables {
    unicode: Arc<UnicodeData>,
    full: Table,
    simple: Table,
    safe_ascii: Regex,
}

impl Confusables {
    /// Loads and merges the character-level and grapheme-level tables.
    /// Grapheme-level entries win on key collision. The simple view keeps
    /// only confusable strings that are normalized single graphemes.
    pub fn load(
        unicode: Arc<UnicodeData>,
        segmenter: &Segmenter,
        normalizer: &dyn Normalizer,
    ) -> Result<Self> {
        let mut full: Table = serde_json::from_str(CHAR_TABLE_JSON)?;
        let grapheme_table: Table = serde_json::from_str(GRAPHEME_TABLE_JSON)?;
        for (key, entry) in grapheme_table {
            full.insert(key, entry);
        }

        let is_simple = |conf: &str| {
            normalizer.is_normalized(conf) && segmenter.split(conf, true).len() == 1
        };
        let simple = full
            .iter()
            .map(|(grapheme, ConfusableEntry(canonical, alternatives))| {
                let canonical = canonical.as_deref().filter(|c| is_simple(c));
                let alternatives = alternatives
                    .iter()
                    .filter(|c| is_simple(c))
                    .cloned()
                    .collect();
                (
                    grapheme.clone(),
                    ConfusableEntry(canonical.map(str::to_owned), alternatives),
                )
            })
            .collect();

        debug!("confusable table loaded: {} entries", full.len());
        Ok(Self {
            unicode,
            full,
            simple,
            safe_ascii: Regex::new(r"\A[a-z0-9_$-]+\z")?,
        })
    }

    /// A view over the full or the simple table.
    pub fn view(&self, simple: bool) -> ConfusableView<'_> {
        ConfusableView {
            resolver: self,
            table: if simple { &self.simple } else { &self.full },
        }
    }
}

/// Resolution operations against one of the two tables.
pub struct ConfusableView<'a> {
    resolver: &'a Confusables,
    table: &'a Table,
}

impl<'a> ConfusableView<'a> {
    /// Base character followed only by combining marks.
    fn is_combining_mark_confusable(&self, grapheme: &str) -> bool {
        let unicode = &self.resolver.unicode;
        let mut chars = grapheme.chars();
        let Some(first) = chars.next() else {
            return false;
        };
        let mut rest = chars.peekable();
        rest.peek().is_some()
            && unicode.combining(first) == 0
            && rest.all(|c| unicode.combining(c) != 0)
    }

    /// Whether the grapheme is confusable. Lowercase ASCII letters,
    /// digits, hyphen, underscore and dollar sign are never confusable.
    pub fn is_confusable_grapheme(&self, grapheme: &str) -> bool {
        if self.resolver.safe_ascii.is_match(grapheme) {
            return false;
        }
        if let Some(ConfusableEntry(canonical, alternatives)) = self.table.get(grapheme) {
            // an entry with no alternatives whose canonical is itself (or
            // absent) marks a grapheme as explicitly not confusable
            let self_canonical = match canonical.as_deref() {
                Some(c) => c == grapheme,
                None => true,
            };
            return !(self_canonical && alternatives.is_empty());
        }
        self.is_combining_mark_confusable(grapheme)
    }

    /// The alternatives a grapheme can be confused with, excluding its
    /// canonical. Empty when not confusable or not known.
    pub fn confusables_of_grapheme(&self, grapheme: &str) -> Vec<String> {
        if self.is_combining_mark_confusable(grapheme) {
            // report the alternatives of the bare base character
            let base: String = grapheme.chars().take(1).collect();
            if let Some(ConfusableEntry(_, alternatives)) = self.table.get(&base) {
                return alternatives.clone();
            }
        }
        if let Some(ConfusableEntry(_, alternatives)) = self.table.get(grapheme) {
            return alternatives.clone();
        }
        Vec::new()
    }

    /// The canonical form of a confusable grapheme, `None` when unknown.
    /// A single character absent from the table is its own canonical.
    pub fn canonical_of_grapheme(&self, grapheme: &str) -> Option<String> {
        if self.is_combining_mark_confusable(grapheme) {
            return Some(grapheme.chars().take(1).collect());
        }
        if let Some(ConfusableEntry(canonical, _)) = self.table.get(grapheme) {
            return canonical.clone();
        }
        if grapheme.chars().count() == 1 {
            Some(grapheme.to_owned())
        } else {
            None
        }
    }

    /// Grapheme-level confusability for an arbitrary string.
    pub fn is_confusable(&self, string: &str) -> bool {
        self.is_confusable_grapheme(string)
    }

    /// Like [`Self::confusables_of_grapheme`], with a recursive fallback
    /// to the first character for unknown multi-character strings.
    pub fn confusables_of(&self, string: &str) -> Vec<String> {
        let confusables = self.confusables_of_grapheme(string);
        if !confusables.is_empty() || string.chars().count() <= 1 {
            return confusables;
        }
        let first: String = string.chars().take(1).collect();
        self.confusables_of(&first)
    }

    /// Like [`Self::canonical_of_grapheme`], with the same first-character
    /// fallback as [`Self::confusables_of`].
    pub fn canonical_of(&self, string: &str) -> Option<String> {
        match self.canonical_of_grapheme(string) {
            Some(canonical) if !canonical.is_empty() => Some(canonical),
            other => {
                if string.chars().count() <= 1 {
                    return other;
                }
                let first: String = string.chars().take(1).collect();
                self.canonical_of(&first)
            }
        }
    }
}
