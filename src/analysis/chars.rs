//! Per-character analysis.

use once_cell::unsync::OnceCell;
use serde_json::{Map, Value};

use super::AnalysisContext;
use crate::models::CharType;

const ZWJ: char = '\u{200d}';

/// Formats a codepoint as `0x`-prefixed lowercase hex.
pub(crate) fn codepoint_hex(c: char) -> String {
    format!("{:#x}", c as u32)
}

/// External reference page for a single character.
pub(crate) fn char_link(c: char) -> String {
    format!("https://unicodeplus.com/U+{:04X}", c as u32)
}

/// External reference page for an emoji (character or whole grapheme).
pub(crate) fn emoji_link(text: &str) -> String {
    format!("http://\u{1F4D9}.la/{text}")
}

/// Analysis of one character within a grapheme.
pub(crate) struct CharAnalysis<'a> {
    ctx: &'a AnalysisContext<'a>,
    value: char,
    /// Whether the surrounding grapheme is a registered emoji; needed to
    /// classify a ZWJ that is part of an emoji sequence.
    in_emoji_grapheme: bool,
    char_type: OnceCell<CharType>,
    name: OnceCell<String>,
}

impl<'a> CharAnalysis<'a> {
    pub fn new(ctx: &'a AnalysisContext<'a>, value: char, in_emoji_grapheme: bool) -> Self {
        Self {
            ctx,
            value,
            in_emoji_grapheme,
            char_type: OnceCell::new(),
            name: OnceCell::new(),
        }
    }

    pub fn value(&self) -> char {
        self.value
    }

    /// Never `"Combined"` for a single character, but may be `"Unknown"`.
    pub fn script(&self) -> &'a str {
        self.ctx.unicode.script_of_char(self.value)
    }

    pub fn name(&self) -> &str {
        self.name.get_or_init(|| {
            let fallback = format!("Unknown character in {} script", self.script());
            self.ctx.unicode.name_or(self.value, &fallback)
        })
    }

    pub fn char_type(&self) -> CharType {
        *self.char_type.get_or_init(|| self.classify())
    }

    fn classify(&self) -> CharType {
        if (self.value == ZWJ && self.in_emoji_grapheme)
            || self.ctx.unicode.is_emoji_char(self.value)
        {
            return CharType::Emoji;
        }
        match self.value {
            'a'..='z' => return CharType::SimpleLetter,
            '0'..='9' => return CharType::SimpleNumber,
            '-' => return CharType::Hyphen,
            '$' => return CharType::Dollarsign,
            '_' => return CharType::Underscore,
            '\u{200d}' | '\u{200c}' | '\u{fe0f}' | '\u{fe0e}' => return CharType::Invisible,
            _ => {}
        }
        match self.ctx.unicode.category(self.value) {
            "Ll" | "Lu" | "Lt" | "Lo" => CharType::OtherLetter,
            category if category.starts_with('N') => CharType::OtherNumber,
            _ => CharType::Special,
        }
    }

    pub fn codepoint(&self) -> String {
        codepoint_hex(self.value)
    }

    pub fn link(&self) -> String {
        if self.char_type() == CharType::Emoji {
            emoji_link(&self.value.to_string())
        } else {
            char_link(self.value)
        }
    }

    pub fn unicode_version(&self) -> Option<String> {
        self.ctx.unicode.unicode_min_version(&self.value.to_string())
    }

    pub fn materialize(&self) -> Value {
        let mut fields = Map::new();
        fields.insert("value".into(), Value::String(self.value.to_string()));
        fields.insert("script".into(), Value::String(self.script().to_owned()));
        fields.insert("name".into(), Value::String(self.name().to_owned()));
        fields.insert("codepoint".into(), Value::String(self.codepoint()));
        fields.insert("link".into(), Value::String(self.link()));
        fields.insert(
            "type".into(),
            Value::String(self.char_type().as_str().to_owned()),
        );
        fields.insert(
            "unicode_version".into(),
            self.unicode_version().map_or(Value::Null, Value::String),
        );
        Value::Object(fields)
    }
}
