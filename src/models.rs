//! Typed result models: the wire contract of the inspector.
//!
//! The analysis layer materializes its field graph into JSON and the
//! result is deserialized into these structs, so the types double as a
//! schema check: a field the analysis forgot to produce fails the
//! conversion instead of silently serializing as null.

use serde::{Deserialize, Serialize};

use crate::fonts::FontSupport;
use crate::punycode::PunycodeCompatibility;

/// Classification of a character or grapheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharType {
    /// `[a-z]`
    SimpleLetter,
    /// `[0-9]`
    SimpleNumber,
    /// A letter (`Ll`, `Lu`, `Lt`, `Lo`) outside `[a-z]`.
    OtherLetter,
    /// A number (`N*`) outside `[0-9]`.
    OtherNumber,
    Hyphen,
    Dollarsign,
    Underscore,
    /// An emoji, or a joiner inside a registered emoji sequence.
    Emoji,
    /// A joiner or variation selector outside an emoji.
    Invisible,
    /// Anything else.
    Special,
}

impl CharType {
    pub fn as_str(self) -> &'static str {
        match self {
            CharType::SimpleLetter => "simple_letter",
            CharType::SimpleNumber => "simple_number",
            CharType::OtherLetter => "other_letter",
            CharType::OtherNumber => "other_number",
            CharType::Hyphen => "hyphen",
            CharType::Dollarsign => "dollarsign",
            CharType::Underscore => "underscore",
            CharType::Emoji => "emoji",
            CharType::Invisible => "invisible",
            CharType::Special => "special",
        }
    }
}

/// One analyzed character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharResult {
    pub value: String,
    pub script: String,
    pub name: String,
    /// `0x`-prefixed lowercase hex.
    pub codepoint: String,
    pub link: String,
    #[serde(rename = "type")]
    pub char_type: CharType,
    pub unicode_version: Option<String>,
}

/// One analyzed grapheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphemeResult {
    pub value: String,
    /// May be shorter than the grapheme when `truncate_chars` applies.
    pub chars: Vec<CharResult>,
    pub name: String,
    /// Only present for single-character graphemes.
    pub codepoint: Option<String>,
    pub link: Option<String>,
    pub script: String,
    #[serde(rename = "type")]
    pub grapheme_type: CharType,
    pub description: String,
    pub unicode_version: Option<String>,
    /// Emoji spec version (`E15.0` style), absent for non-emoji.
    pub emoji_version: Option<String>,
    pub font_support_all_os: FontSupport,
}

/// A confusable alternative that is itself a single grapheme gets the full
/// grapheme analysis; a multi-grapheme alternative only gets a character
/// breakdown (confusables are not expanded recursively).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfusableResult {
    Grapheme(GraphemeResult),
    MultiGrapheme {
        value: String,
        chars: Vec<CharResult>,
    },
}

impl ConfusableResult {
    pub fn value(&self) -> &str {
        match self {
            ConfusableResult::Grapheme(grapheme) => &grapheme.value,
            ConfusableResult::MultiGrapheme { value, .. } => value,
        }
    }
}

/// One analyzed grapheme plus its confusable set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphemeWithConfusablesResult {
    #[serde(flatten)]
    pub grapheme: GraphemeResult,
    /// Canonical form of the confusable grapheme, if known.
    pub confusables_canonical: Option<ConfusableResult>,
    /// Confusable alternatives, excluding the canonical; may be truncated
    /// by `truncate_confusables`.
    pub confusables_other: Vec<ConfusableResult>,
}

/// Result for a label that is already in normalized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectorResultNormalized {
    pub label: String,
    pub status: String,
    /// Inspector version, usable as a cache key component.
    pub version: String,
    pub char_length: usize,
    pub grapheme_length: usize,
    /// The common grapheme type, when every grapheme agrees.
    pub all_type: Option<CharType>,
    pub any_types: Vec<CharType>,
    /// The common script, after discounting neutral scripts.
    pub all_script: Option<String>,
    pub any_scripts: Vec<String>,
    pub confusable_count: usize,
    /// May be truncated by `truncate_graphemes`.
    pub graphemes: Vec<GraphemeWithConfusablesResult>,
    pub beautiful_label: String,
    /// The label with confusables replaced by canonicals, normalized.
    pub canonical_confusable_label: Option<String>,
    pub beautiful_canonical_confusable_label: Option<String>,
    pub dns_hostname_support: bool,
    pub punycode_compatibility: PunycodeCompatibility,
    pub punycode_encoding: Option<String>,
    pub font_support_all_os: FontSupport,
}

/// Result for a label that failed normalization (or merely differs from
/// its normalized form).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectorResultUnnormalized {
    pub label: String,
    pub status: String,
    pub version: String,
    /// The label with curable sequences repaired, absent when the label is
    /// uncurable or curing was skipped.
    pub cured_label: Option<String>,
    /// The normalized form, absent when the label is disallowed.
    pub canonical_confusable_label: Option<String>,
    pub beautiful_canonical_confusable_label: Option<String>,
    pub normalization_error_message: String,
    pub normalization_error_details: Option<String>,
    pub normalization_error_code: String,
    /// Codepoint index of the offending sequence; absent for errors that
    /// cannot point at one.
    pub disallowed_sequence_start: Option<usize>,
    pub disallowed_sequence: Option<Vec<CharResult>>,
    pub suggested_replacement: Option<Vec<CharResult>>,
}

/// The analysis result, branching on `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InspectorResult {
    Normalized(Box<InspectorResultNormalized>),
    Unnormalized(Box<InspectorResultUnnormalized>),
}

impl InspectorResult {
    pub fn label(&self) -> &str {
        match self {
            InspectorResult::Normalized(result) => &result.label,
            InspectorResult::Unnormalized(result) => &result.label,
        }
    }

    pub fn status(&self) -> &str {
        match self {
            InspectorResult::Normalized(result) => &result.status,
            InspectorResult::Unnormalized(result) => &result.status,
        }
    }
}
