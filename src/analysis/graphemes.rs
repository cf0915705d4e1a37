//! Per-grapheme analysis, with and without confusable expansion.

use itertools::Itertools;
use once_cell::unsync::OnceCell;
use serde_json::{Map, Value};

use super::chars::{emoji_link, CharAnalysis};
use super::{agg_all, AnalysisContext};
use crate::config::truncated;
use crate::fonts::{aggregate_font_support, FontSupport};
use crate::models::CharType;
use crate::unicode::version_key;

/// External reference page for a multi-character grapheme.
fn multi_char_link(grapheme: &str) -> String {
    let encoded = grapheme.bytes().map(|b| format!("{b:02x}")).join(".");
    format!("https://unicode.link/inspect/utf8:{encoded}")
}

/// Basic analysis of one grapheme (no confusables).
pub(crate) struct GraphemeAnalysis<'a> {
    ctx: &'a AnalysisContext<'a>,
    value: String,
    chars: OnceCell<Vec<CharAnalysis<'a>>>,
    grapheme_type: OnceCell<CharType>,
    name: OnceCell<String>,
    font_support: OnceCell<FontSupport>,
}

impl<'a> GraphemeAnalysis<'a> {
    pub fn new(ctx: &'a AnalysisContext<'a>, value: String) -> Self {
        Self {
            ctx,
            value,
            chars: OnceCell::new(),
            grapheme_type: OnceCell::new(),
            name: OnceCell::new(),
            font_support: OnceCell::new(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Untruncated character analysis; aggregates below always fold over
    /// this full list.
    pub fn chars_untruncated(&self) -> &[CharAnalysis<'a>] {
        self.chars.get_or_init(|| {
            let in_emoji = self.ctx.unicode.is_emoji(&self.value);
            self.value
                .chars()
                .map(|c| CharAnalysis::new(self.ctx, c, in_emoji))
                .collect()
        })
    }

    fn single_char(&self) -> Option<&CharAnalysis<'a>> {
        match self.chars_untruncated() {
            [only] => Some(only),
            _ => None,
        }
    }

    /// Emoji sequence name, single-character name, or a generic label.
    pub fn name(&self) -> &str {
        self.name.get_or_init(|| {
            self.ctx
                .unicode
                .emoji_zwj_sequence_name(&self.value)
                .or_else(|| self.ctx.unicode.emoji_sequence_name(&self.value))
                .or_else(|| self.single_char().map(|c| c.name().to_owned()))
                .unwrap_or_else(|| "Combined Character".to_owned())
        })
    }

    pub fn codepoint(&self) -> Option<String> {
        self.single_char().map(|c| c.codepoint())
    }

    pub fn link(&self) -> String {
        if self.grapheme_type() == CharType::Emoji {
            emoji_link(&self.value)
        } else {
            match self.single_char() {
                Some(c) => c.link(),
                None => multi_char_link(&self.value),
            }
        }
    }

    /// Dominant script of the grapheme, `"Combined"` when its characters
    /// mix non-neutral scripts.
    pub fn script(&self) -> &'a str {
        self.ctx.unicode.script_of(&self.value).unwrap_or("Combined")
    }

    pub fn grapheme_type(&self) -> CharType {
        *self.grapheme_type.get_or_init(|| {
            // a lone FE0F would otherwise classify as emoji
            if self.value == "\u{fe0f}" {
                return CharType::Invisible;
            }
            if self.ctx.unicode.is_emoji(&self.value) {
                return CharType::Emoji;
            }
            agg_all(self.chars_untruncated().iter().map(|c| c.char_type()))
                .unwrap_or(CharType::Special)
        })
    }

    pub fn description(&self) -> String {
        match self.grapheme_type() {
            CharType::SimpleLetter => "A-Z letter".to_owned(),
            CharType::SimpleNumber => "0-9 number".to_owned(),
            CharType::OtherLetter => format!("{} letter", self.script()),
            CharType::OtherNumber => format!("{} number", self.script()),
            CharType::Hyphen => "Hyphen".to_owned(),
            CharType::Dollarsign => "Dollar sign".to_owned(),
            CharType::Underscore => "Underscore".to_owned(),
            CharType::Emoji => "Emoji".to_owned(),
            CharType::Invisible => "Invisible character".to_owned(),
            CharType::Special => "Special character".to_owned(),
        }
    }

    /// Minimum Unicode version of the whole grapheme, or the highest
    /// version among its characters. A character with no known version
    /// never suppresses a known version from a sibling.
    pub fn unicode_version(&self) -> Option<String> {
        if let Some(version) = self.ctx.unicode.unicode_min_version(&self.value) {
            return Some(version);
        }
        self.chars_untruncated()
            .iter()
            .filter_map(|c| c.unicode_version())
            .max_by_key(|version| version_key(version))
    }

    pub fn emoji_version(&self) -> Option<String> {
        self.ctx.unicode.emoji_version(&self.value).map(str::to_owned)
    }

    pub fn font_support(&self) -> FontSupport {
        *self.font_support.get_or_init(|| {
            if self.grapheme_type() == CharType::Emoji {
                self.ctx.fonts.check_support(&self.value)
            } else {
                aggregate_font_support(
                    self.value
                        .chars()
                        .map(|c| self.ctx.fonts.check_support(&c.to_string())),
                )
            }
        })
    }

    /// Materializes the grapheme fields; `chars` is truncated here and
    /// only here.
    pub fn materialize(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("value".into(), Value::String(self.value.clone()));
        let chars = truncated(self.chars_untruncated(), self.ctx.options.truncate_chars)
            .iter()
            .map(CharAnalysis::materialize)
            .collect();
        fields.insert("chars".into(), Value::Array(chars));
        fields.insert("name".into(), Value::String(self.name().to_owned()));
        fields.insert(
            "codepoint".into(),
            self.codepoint().map_or(Value::Null, Value::String),
        );
        fields.insert("link".into(), Value::String(self.link()));
        fields.insert("script".into(), Value::String(self.script().to_owned()));
        fields.insert(
            "type".into(),
            Value::String(self.grapheme_type().as_str().to_owned()),
        );
        fields.insert("description".into(), Value::String(self.description()));
        fields.insert(
            "unicode_version".into(),
            self.unicode_version().map_or(Value::Null, Value::String),
        );
        fields.insert(
            "emoji_version".into(),
            self.emoji_version().map_or(Value::Null, Value::String),
        );
        fields.insert(
            "font_support_all_os".into(),
            Value::String(self.font_support().as_str().to_owned()),
        );
        fields
    }
}

/// A confusable alternative: a single grapheme gets full analysis, a
/// multi-grapheme string only a character breakdown (no recursive
/// confusable expansion).
pub(crate) enum ConfusableAnalysis<'a> {
    Grapheme(GraphemeAnalysis<'a>),
    MultiGrapheme {
        value: String,
        chars: Vec<CharAnalysis<'a>>,
    },
}

impl<'a> ConfusableAnalysis<'a> {
    pub fn new(ctx: &'a AnalysisContext<'a>, confusable: String) -> Self {
        let graphemes = ctx
            .segmenter
            .split(&confusable, !ctx.options.keep_invisible);
        if graphemes.len() == 1 {
            ConfusableAnalysis::Grapheme(GraphemeAnalysis::new(ctx, confusable))
        } else {
            let in_emoji = ctx.unicode.is_emoji(&confusable);
            let chars = confusable
                .chars()
                .map(|c| CharAnalysis::new(ctx, c, in_emoji))
                .collect();
            ConfusableAnalysis::MultiGrapheme {
                value: confusable,
                chars,
            }
        }
    }

    pub fn value(&self) -> &str {
        match self {
            ConfusableAnalysis::Grapheme(grapheme) => grapheme.value(),
            ConfusableAnalysis::MultiGrapheme { value, .. } => value,
        }
    }

    pub fn materialize(&self) -> Value {
        match self {
            ConfusableAnalysis::Grapheme(grapheme) => Value::Object(grapheme.materialize()),
            ConfusableAnalysis::MultiGrapheme { value, chars } => {
                let mut fields = Map::new();
                fields.insert("value".into(), Value::String(value.clone()));
                fields.insert(
                    "chars".into(),
                    Value::Array(chars.iter().map(CharAnalysis::materialize).collect()),
                );
                Value::Object(fields)
            }
        }
    }
}

/// Grapheme analysis extended with the confusable set.
pub(crate) struct GraphemeWithConfusablesAnalysis<'a> {
    base: GraphemeAnalysis<'a>,
    is_confusable: OnceCell<bool>,
    confusables_other: OnceCell<Vec<ConfusableAnalysis<'a>>>,
    confusables_canonical: OnceCell<Option<ConfusableAnalysis<'a>>>,
}

impl<'a> GraphemeWithConfusablesAnalysis<'a> {
    pub fn new(ctx: &'a AnalysisContext<'a>, value: String) -> Self {
        Self {
            base: GraphemeAnalysis::new(ctx, value),
            is_confusable: OnceCell::new(),
            confusables_other: OnceCell::new(),
            confusables_canonical: OnceCell::new(),
        }
    }

    pub fn base(&self) -> &GraphemeAnalysis<'a> {
        &self.base
    }

    pub fn is_confusable(&self) -> bool {
        *self.is_confusable.get_or_init(|| {
            self.base.ctx.confusables.is_confusable(self.base.value())
        })
    }

    /// Untruncated confusable alternatives.
    pub fn confusables_other_untruncated(&self) -> &[ConfusableAnalysis<'a>] {
        self.confusables_other.get_or_init(|| {
            if !self.is_confusable() {
                return Vec::new();
            }
            self.base
                .ctx
                .confusables
                .confusables_of(self.base.value())
                .into_iter()
                .map(|confusable| ConfusableAnalysis::new(self.base.ctx, confusable))
                .collect()
        })
    }

    /// Canonical form of the confusable grapheme, `None` when unknown.
    pub fn confusables_canonical(&self) -> Option<&ConfusableAnalysis<'a>> {
        self.confusables_canonical
            .get_or_init(|| {
                if !self.is_confusable() {
                    return None;
                }
                self.base
                    .ctx
                    .confusables
                    .canonical_of(self.base.value())
                    .map(|canonical| ConfusableAnalysis::new(self.base.ctx, canonical))
            })
            .as_ref()
    }

    /// Materializes the base grapheme fields plus the confusable set;
    /// `confusables_other` is truncated here and only here.
    pub fn materialize(&self) -> Value {
        let mut fields = self.base.materialize();
        fields.insert(
            "confusables_canonical".into(),
            self.confusables_canonical()
                .map_or(Value::Null, ConfusableAnalysis::materialize),
        );
        let others = truncated(
            self.confusables_other_untruncated(),
            self.base.ctx.options.truncate_confusables,
        )
        .iter()
        .map(ConfusableAnalysis::materialize)
        .collect();
        fields.insert("confusables_other".into(), Value::Array(others));
        Value::Object(fields)
    }
}
