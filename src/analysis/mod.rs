//! The per-request analysis tree.
//!
//! Each request builds a tree of analysis nodes: one [`LabelAnalysis`]
//! root, one grapheme node per grapheme, one character node per
//! character. Every derived value is a memoized field: a `OnceCell` slot
//! computed on first read and reused by every dependent field, so that
//! aggregates and the serialized output never recompute (or re-observe)
//! anything. Fields must form a DAG by construction.
//!
//! Nodes borrow a shared [`AnalysisContext`] for the lifetime of the
//! request instead of holding parent or root references; the only
//! parent-derived fact a character needs (whether it sits inside a
//! registered emoji) is passed down at construction.
//!
//! Truncation limits from [`AnalysisOptions`] are applied exclusively in
//! the `materialize` methods, after every aggregate has been computed
//! from the untruncated sequences.

mod chars;
mod graphemes;
mod label;


use std::hash::Hash;

use itertools::Itertools;

pub(crate) use chars::CharAnalysis;
pub(crate) use graphemes::{ConfusableAnalysis, GraphemeAnalysis, GraphemeWithConfusablesAnalysis};
pub(crate) use label::LabelAnalysis;

use crate::config::AnalysisOptions;
use crate::confusables::ConfusableView;
use crate::fonts::FontSupportTable;
use crate::normalizer::Normalizer;
use crate::segmentation::Segmenter;
use crate::unicode::UnicodeData;

/// Shared read-only services plus the request parameters, borrowed by
/// every node in one analysis tree.
pub(crate) struct AnalysisContext<'a> {
    pub unicode: &'a UnicodeData,
    pub segmenter: &'a Segmenter,
    pub confusables: ConfusableView<'a>,
    pub fonts: &'a FontSupportTable,
    pub normalizer: &'a dyn Normalizer,
    pub options: &'a AnalysisOptions,
    pub label: &'a str,
}

/// The common value if all items are equal, otherwise `None`.
/// An empty sequence has no common value.
pub(crate) fn agg_all<T: PartialEq + Copy>(items: impl IntoIterator<Item = T>) -> Option<T> {
    let mut items = items.into_iter();
    let first = items.next()?;
    items.all(|item| item == first).then_some(first)
}

/// The unique items in first-seen order.
pub(crate) fn agg_any<T: Eq + Hash + Clone>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    items.into_iter().unique().collect()
}
