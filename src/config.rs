/// Per-request analysis options.
///
/// Truncation limits reduce the size of the serialized result without
/// changing any aggregate field: `char_length`, `grapheme_length`,
/// `confusable_count` and friends are always computed from the full
/// untruncated sequences, and truncation is applied only when the result
/// tree is materialized. `None` means "no limit".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Maximum number of entries in each grapheme's `confusables_other`
    /// list. `confusables_canonical` is not affected.
    pub truncate_confusables: Option<usize>,
    /// Maximum number of entries in the `graphemes` list.
    pub truncate_graphemes: Option<usize>,
    /// Maximum number of entries in each grapheme's `chars` list.
    pub truncate_chars: Option<usize>,
    /// Use the filtered confusable table that only contains normalized,
    /// single-grapheme confusable strings.
    pub simple_confusables: bool,
    /// Skip the (potentially slow) cure step for unnormalized labels;
    /// `cured_label` is then always `None`.
    pub omit_cure: bool,
    /// Keep trailing invisible joiners attached to their cluster instead
    /// of splitting them into one-codepoint graphemes.
    pub keep_invisible: bool,
}

impl AnalysisOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn truncate_confusables(mut self, limit: usize) -> Self {
        self.truncate_confusables = Some(limit);
        self
    }

    pub fn truncate_graphemes(mut self, limit: usize) -> Self {
        self.truncate_graphemes = Some(limit);
        self
    }

    pub fn truncate_chars(mut self, limit: usize) -> Self {
        self.truncate_chars = Some(limit);
        self
    }

    pub fn simple_confusables(mut self, simple: bool) -> Self {
        self.simple_confusables = simple;
        self
    }

    pub fn omit_cure(mut self, omit: bool) -> Self {
        self.omit_cure = omit;
        self
    }

    pub fn keep_invisible(mut self, keep: bool) -> Self {
        self.keep_invisible = keep;
        self
    }
}

/// Applies a truncation limit to a slice, where `None` means "no limit".
pub(crate) fn truncated<T>(items: &[T], limit: Option<usize>) -> &[T] {
    match limit {
        Some(limit) if limit < items.len() => &items[..limit],
        _ => items,
    }
}
