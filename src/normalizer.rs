//! Label normalization.
//!
//! The inspector treats normalization as a pluggable collaborator: anything
//! implementing [`Normalizer`] can decide which labels are acceptable, how
//! to repair the ones that are not, and how to render the pretty
//! ("beautified") form. Failures are values, not crate errors, so that an
//! unusual label still produces a complete analysis result.
//!
//! [`StandardNormalizer`] is the bundled implementation. It enforces ENS
//! style rules over the property store: labels are case-folded and NFC
//! normalized, underscores are only allowed as a leading run, `--` is
//! rejected in the third and fourth position, and joiner or variation
//! selector codepoints are only allowed inside registered emoji.

use std::sync::Arc;

use log::trace;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

use crate::segmentation::Segmenter;
use crate::unicode::UnicodeData;


/// A problem found in a label. Curable and normalizable problems carry the
/// offending sequence and a suggested replacement; disallowed problems are
/// terminal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizationError {
    #[error("{message}")]
    DisallowedSequence { code: &'static str, message: String },
    #[error("{message}")]
    CurableSequence {
        code: &'static str,
        message: String,
        details: String,
        index: usize,
        sequence: String,
        suggested: String,
    },
    #[error("{message}")]
    NormalizableSequence {
        code: &'static str,
        message: String,
        details: String,
        index: usize,
        sequence: String,
        suggested: String,
    },
}

impl NormalizationError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::DisallowedSequence { code, .. }
            | Self::CurableSequence { code, .. }
            | Self::NormalizableSequence { code, .. } => code,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::DisallowedSequence { message, .. }
            | Self::CurableSequence { message, .. }
            | Self::NormalizableSequence { message, .. } => message,
        }
    }

    pub fn details(&self) -> Option<&str> {
        match self {
            Self::DisallowedSequence { .. } => None,
            Self::CurableSequence { details, .. }
            | Self::NormalizableSequence { details, .. } => Some(details),
        }
    }

    /// The codepoint index where the offending sequence starts.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::DisallowedSequence { .. } => None,
            Self::CurableSequence { index, .. }
            | Self::NormalizableSequence { index, .. } => Some(*index),
        }
    }

    pub fn sequence(&self) -> Option<&str> {
        match self {
            Self::DisallowedSequence { .. } => None,
            Self::CurableSequence { sequence, .. }
            | Self::NormalizableSequence { sequence, .. } => Some(sequence),
        }
    }

    pub fn suggested(&self) -> Option<&str> {
        match self {
            Self::DisallowedSequence { .. } => None,
            Self::CurableSequence { suggested, .. }
            | Self::NormalizableSequence { suggested, .. } => Some(suggested),
        }
    }

    /// Whether applying the suggested replacement can repair the label.
    pub fn is_curable(&self) -> bool {
        matches!(
            self,
            Self::CurableSequence { .. } | Self::NormalizableSequence { .. }
        )
    }
}

/// The full outcome of one [`Normalizer::process`] call.
#[derive(Debug, Clone, Default)]
pub struct ProcessResult {
    /// The first fatal problem (disallowed or curable), if any.
    pub error: Option<NormalizationError>,
    /// Pending automatic normalizations (case mapping, NFC), in order.
    pub normalizations: Vec<NormalizationError>,
    /// The normalized form, absent when `error` is set.
    pub normalized: Option<String>,
    /// The beautified form of `normalized`.
    pub beautified: Option<String>,
}

impl ProcessResult {
    /// The first reported problem of any kind. A label is normalized iff
    /// this is `None`.
    pub fn first_error(&self) -> Option<&NormalizationError> {
        self.error.as_ref().or_else(|| self.normalizations.first())
    }
}

/// The normalization contract the analysis engine calls into.
pub trait Normalizer {
    /// Returns the normalized form, or the first problem that prevents
    /// normalization.
    fn normalize(&self, label: &str) -> Result<String, NormalizationError>;

    /// Returns the beautified (display) form of the normalized label.
    fn beautify(&self, label: &str) -> Result<String, NormalizationError>;

    /// Repairs curable problems by applying suggested replacements until
    /// the label normalizes, then returns the normalized form.
    fn cure(&self, label: &str) -> Result<String, NormalizationError>;

    /// Runs the full pipeline once, reporting every finding.
    fn process(&self, label: &str) -> ProcessResult;

    /// Whether the label is already in normalized form.
    fn is_normalized(&self, label: &str) -> bool {
        self.process(label).first_error().is_none()
    }
}

const ZWNJ: char = '\u{200c}';
const ZWJ: char = '\u{200d}';
const FE0F: char = '\u{fe0f}';

/// The bundled [`Normalizer`] implementation.
pub struct StandardNormalizer {
    unicode: Arc<UnicodeData>,
    segmenter: Segmenter,
}

impl StandardNormalizer {
    pub fn new(unicode: Arc<UnicodeData>) -> Self {
        let segmenter = Segmenter::new(Arc::clone(&unicode));
        Self { unicode, segmenter }
    }

    /// Scans the label and reports the first fatal problem plus all
    /// pending normalizations.
    fn scan(&self, label: &str) -> (Option<NormalizationError>, Vec<NormalizationError>) {
        let mut error = None;
        let mut normalizations = Vec::new();
        let mut record = |finding: NormalizationError| {
            if matches!(finding, NormalizationError::NormalizableSequence { .. }) {
                normalizations.push(finding);
            } else if error.is_none() {
                error = Some(finding);
            }
        };

        let mut index = 0usize;
        let mut leading_underscores = true;
        for grapheme in self.segmenter.split(label, true) {
            let char_count = grapheme.chars().count();
            // single characters still go through classify below, so that
            // a stray FE0F (emoji-capable on its own) is reported
            if char_count > 1 && self.unicode.is_emoji(&grapheme) {
                leading_underscores = false;
                index += char_count;
                continue;
            }
            for c in grapheme.chars() {
                if let Some(finding) = self.classify(c, index, leading_underscores) {
                    record(finding);
                }
                leading_underscores = leading_underscores && c == '_';
                index += 1;
            }
        }

        let chars: Vec<char> = label.chars().collect();
        if chars.len() >= 4 && chars[2] == '-' && chars[3] == '-' {
            record(NormalizationError::CurableSequence {
                code: "hyphen",
                message: "Contains hyphens in the third and fourth position".to_owned(),
                details: "The sequence '--' is not allowed at this position".to_owned(),
                index: 2,
                sequence: "--".to_owned(),
                suggested: String::new(),
            });
        }

        let nfc: String = label.nfc().collect();
        if nfc != label {
            record(NormalizationError::NormalizableSequence {
                code: "nfc",
                message: "Contains a character sequence in a non-canonical form".to_owned(),
                details: "The label should be normalized to Unicode NFC".to_owned(),
                index: 0,
                sequence: label.to_owned(),
                suggested: nfc,
            });
        }

        (error, normalizations)
    }

    /// Classifies one character outside a registered emoji.
    fn classify(
        &self,
        c: char,
        index: usize,
        leading_underscores: bool,
    ) -> Option<NormalizationError> {
        match c {
            ZWJ | ZWNJ => {
                return Some(NormalizationError::CurableSequence {
                    code: "invisible",
                    message: "Contains a disallowed invisible character".to_owned(),
                    details: "A joiner is only allowed inside an emoji".to_owned(),
                    index,
                    sequence: c.to_string(),
                    suggested: String::new(),
                });
            }
            FE0F => {
                return Some(NormalizationError::CurableSequence {
                    code: "fe0f",
                    message: "Contains a disallowed variation selector".to_owned(),
                    details: "An emoji presentation selector is only allowed after an emoji"
                        .to_owned(),
                    index,
                    sequence: c.to_string(),
                    suggested: String::new(),
                });
            }
            '_' => {
                if leading_underscores {
                    return None;
                }
                return Some(NormalizationError::CurableSequence {
                    code: "underscore",
                    message: "Contains an underscore in a disallowed position".to_owned(),
                    details: "An underscore is only allowed at the start of a label".to_owned(),
                    index,
                    sequence: "_".to_owned(),
                    suggested: String::new(),
                });
            }
            '-' | '$' => return None,
            _ => {}
        }

        let category = self.unicode.category(c);
        if matches!(category, "Lu" | "Lt") || c.is_uppercase() {
            return Some(NormalizationError::NormalizableSequence {
                code: "mapped",
                message: "Contains a character that should be replaced".to_owned(),
                details: "The character is mapped to its lowercase form".to_owned(),
                index,
                sequence: c.to_string(),
                suggested: c.to_lowercase().to_string(),
            });
        }
        let allowed = matches!(category, "Ll" | "Lm" | "Lo")
            || matches!(category.as_bytes().first(), Some(b'M') | Some(b'N'))
            || self.unicode.is_emoji_char(c);
        if allowed {
            return None;
        }
        Some(NormalizationError::CurableSequence {
            code: "disallowed",
            message: "Contains a disallowed character".to_owned(),
            details: "The character is not allowed in a label".to_owned(),
            index,
            sequence: c.to_string(),
            suggested: String::new(),
        })
    }

    fn normalized_form(&self, label: &str) -> String {
        label.to_lowercase().nfc().collect()
    }

    /// Substitutes every emoji grapheme with its fully-qualified form.
    fn beautified_form(&self, normalized: &str) -> String {
        let mut out = String::with_capacity(normalized.len());
        for grapheme in self.segmenter.split(normalized, true) {
            match self.unicode.beautified(&grapheme) {
                Some(pretty) => out.push_str(pretty),
                None => out.push_str(&grapheme),
            }
        }
        out
    }
}

impl Normalizer for StandardNormalizer {
    fn normalize(&self, label: &str) -> Result<String, NormalizationError> {
        let result = self.process(label);
        match result.error {
            Some(error) => Err(error),
            // normalized is always set when there is no error
            None => Ok(result.normalized.unwrap_or_default()),
        }
    }

    fn beautify(&self, label: &str) -> Result<String, NormalizationError> {
        let result = self.process(label);
        match result.error {
            Some(error) => Err(error),
            None => Ok(result.beautified.unwrap_or_default()),
        }
    }

    fn cure(&self, label: &str) -> Result<String, NormalizationError> {
        let mut current = label.to_owned();
        // each cure removes or replaces at least one codepoint, so the
        // number of rounds is bounded by the label length
        for _ in 0..=label.chars().count() {
            let result = self.process(&current);
            let Some(error) = result.error else {
                return Ok(result.normalized.unwrap_or_default());
            };
            let (index, sequence, suggested) = match &error {
                NormalizationError::CurableSequence {
                    index,
                    sequence,
                    suggested,
                    ..
                } => (*index, sequence.clone(), suggested.clone()),
                _ => return Err(error),
            };
            let chars: Vec<char> = current.chars().collect();
            let end = index + sequence.chars().count();
            if end > chars.len() {
                return Err(error);
            }
            let mut next: String = chars[..index].iter().collect();
            next.push_str(&suggested);
            next.extend(&chars[end..]);
            current = next;
        }
        Err(NormalizationError::DisallowedSequence {
            code: "cure_failed",
            message: "The label could not be cured".to_owned(),
        })
    }

    fn process(&self, label: &str) -> ProcessResult {
        trace!("normalizing label of {} chars", label.chars().count());
        if label.is_empty() {
            return ProcessResult {
                error: Some(NormalizationError::DisallowedSequence {
                    code: "empty",
                    message: "The label is empty".to_owned(),
                }),
                ..ProcessResult::default()
            };
        }

        let (error, normalizations) = self.scan(label);
        let (normalized, beautified) = if error.is_some() {
            (None, None)
        } else {
            let normalized = self.normalized_form(label);
            let beautified = self.beautified_form(&normalized);
            (Some(normalized), Some(beautified))
        };
        ProcessResult {
            error,
            normalizations,
            normalized,
            beautified,
        }
    }
}
