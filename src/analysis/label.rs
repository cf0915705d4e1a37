//! Root label analysis and aggregation.

use once_cell::unsync::OnceCell;
use serde_json::{Map, Value};

use super::chars::CharAnalysis;
use super::graphemes::{GraphemeAnalysis, GraphemeWithConfusablesAnalysis};
use super::{agg_all, agg_any, AnalysisContext};
use crate::config::truncated;
use crate::fonts::{aggregate_font_support, FontSupport};
use crate::models::CharType;
use crate::normalizer::{NormalizationError, ProcessResult};
use crate::punycode::{self, PunycodeAnalysis};

const INSPECTOR_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The root node of one analysis request.
pub(crate) struct LabelAnalysis<'a> {
    ctx: &'a AnalysisContext<'a>,
    raw_graphemes: OnceCell<Vec<String>>,
    graphemes: OnceCell<Vec<GraphemeWithConfusablesAnalysis<'a>>>,
    punycode: OnceCell<PunycodeAnalysis>,
    process: OnceCell<ProcessResult>,
    canonical_label: OnceCell<Option<String>>,
}

impl<'a> LabelAnalysis<'a> {
    pub fn new(ctx: &'a AnalysisContext<'a>) -> Self {
        Self {
            ctx,
            raw_graphemes: OnceCell::new(),
            graphemes: OnceCell::new(),
            punycode: OnceCell::new(),
            process: OnceCell::new(),
            canonical_label: OnceCell::new(),
        }
    }

    fn raw_graphemes(&self) -> &[String] {
        self.raw_graphemes.get_or_init(|| {
            self.ctx
                .segmenter
                .split(self.ctx.label, !self.ctx.options.keep_invisible)
        })
    }

    /// Untruncated grapheme analysis; every aggregate folds over this.
    fn graphemes_untruncated(&self) -> &[GraphemeWithConfusablesAnalysis<'a>] {
        self.graphemes.get_or_init(|| {
            self.raw_graphemes()
                .iter()
                .map(|g| GraphemeWithConfusablesAnalysis::new(self.ctx, g.clone()))
                .collect()
        })
    }

    fn punycode(&self) -> &PunycodeAnalysis {
        self.punycode
            .get_or_init(|| punycode::analyze(self.ctx.label))
    }

    /// The single normalizer call of the request.
    fn process(&self) -> &ProcessResult {
        self.process
            .get_or_init(|| self.ctx.normalizer.process(self.ctx.label))
    }

    fn first_error(&self) -> Option<&NormalizationError> {
        self.process().first_error()
    }

    pub fn is_normalized(&self) -> bool {
        self.first_error().is_none()
    }

    fn status(&self) -> &'static str {
        if self.is_normalized() {
            "normalized"
        } else {
            "unnormalized"
        }
    }

    fn all_type(&self) -> Option<CharType> {
        agg_all(
            self.graphemes_untruncated()
                .iter()
                .map(|g| g.base().grapheme_type()),
        )
    }

    fn any_types(&self) -> Vec<CharType> {
        agg_any(
            self.graphemes_untruncated()
                .iter()
                .map(|g| g.base().grapheme_type()),
        )
    }

    fn any_scripts(&self) -> Vec<&'a str> {
        agg_any(self.graphemes_untruncated().iter().map(|g| g.base().script()))
    }

    /// The common script of the label, after discounting neutral scripts.
    /// `None` when any grapheme has an unknown or mixed script, or when
    /// two different non-neutral scripts are present.
    fn all_script(&self) -> Option<&'a str> {
        let mut had_common = false;
        let mut had_inherited = false;
        let mut strong_script: Option<&str> = None;
        for script in self.any_scripts() {
            match script {
                "Unknown" | "Combined" => return None,
                "Common" => had_common = true,
                "Inherited" => had_inherited = true,
                _ => match strong_script {
                    None => strong_script = Some(script),
                    Some(strong) if strong != script => return None,
                    Some(_) => {}
                },
            }
        }
        strong_script
            .or(had_common.then_some("Common"))
            .or(had_inherited.then_some("Inherited"))
    }

    fn confusable_count(&self) -> usize {
        self.graphemes_untruncated()
            .iter()
            .filter(|g| g.is_confusable())
            .count()
    }

    /// The label with every confusable grapheme replaced by its canonical
    /// form; `None` as soon as any confusable grapheme has no canonical.
    fn canonical_label(&self) -> Option<&str> {
        self.canonical_label
            .get_or_init(|| {
                let mut canonical = String::new();
                for grapheme in self.graphemes_untruncated() {
                    if !grapheme.is_confusable() {
                        canonical.push_str(grapheme.base().value());
                    } else {
                        canonical.push_str(grapheme.confusables_canonical()?.value());
                    }
                }
                Some(canonical)
            })
            .as_deref()
    }

    /// `canonical_label` run through the normalizer; `None` when the
    /// canonical form is unknown or cannot be normalized.
    fn canonical_confusable_label(&self) -> Option<String> {
        self.ctx.normalizer.normalize(self.canonical_label()?).ok()
    }

    fn beautiful_canonical_confusable_label(&self) -> Option<String> {
        self.ctx.normalizer.beautify(self.canonical_label()?).ok()
    }

    fn font_support(&self) -> FontSupport {
        aggregate_font_support(
            self.graphemes_untruncated()
                .iter()
                .map(|g| g.base().font_support()),
        )
    }

    fn cured_label(&self) -> Option<String> {
        if self.ctx.options.omit_cure {
            return None;
        }
        self.ctx.normalizer.cure(self.ctx.label).ok()
    }

    /// Expands a reported sequence into per-character analyses, one list
    /// entry per character across its graphemes.
    fn sequence_chars(&self, text: &str) -> Value {
        let mut chars = Vec::new();
        for grapheme in self
            .ctx
            .segmenter
            .split(text, !self.ctx.options.keep_invisible)
        {
            let analysis = GraphemeAnalysis::new(self.ctx, grapheme);
            chars.extend(
                analysis
                    .chars_untruncated()
                    .iter()
                    .map(CharAnalysis::materialize),
            );
        }
        Value::Array(chars)
    }

    /// Builds the serialized result for the request. Truncation of the
    /// `graphemes` list happens here and only here.
    pub fn materialize(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("label".into(), Value::String(self.ctx.label.to_owned()));
        fields.insert("status".into(), Value::String(self.status().to_owned()));
        fields.insert(
            "version".into(),
            Value::String(INSPECTOR_VERSION.to_owned()),
        );
        if self.is_normalized() {
            self.materialize_normalized(&mut fields);
        } else {
            self.materialize_unnormalized(&mut fields);
        }
        fields
    }

    fn materialize_normalized(&self, fields: &mut Map<String, Value>) {
        fields.insert(
            "char_length".into(),
            Value::from(self.ctx.label.chars().count()),
        );
        fields.insert(
            "grapheme_length".into(),
            Value::from(self.raw_graphemes().len()),
        );
        fields.insert(
            "all_type".into(),
            self.all_type()
                .map_or(Value::Null, |t| Value::String(t.as_str().to_owned())),
        );
        fields.insert(
            "any_types".into(),
            Value::Array(
                self.any_types()
                    .into_iter()
                    .map(|t| Value::String(t.as_str().to_owned()))
                    .collect(),
            ),
        );
        fields.insert(
            "all_script".into(),
            self.all_script()
                .map_or(Value::Null, |s| Value::String(s.to_owned())),
        );
        fields.insert(
            "any_scripts".into(),
            Value::Array(
                self.any_scripts()
                    .into_iter()
                    .map(|s| Value::String(s.to_owned()))
                    .collect(),
            ),
        );
        fields.insert("confusable_count".into(), Value::from(self.confusable_count()));
        let graphemes = truncated(
            self.graphemes_untruncated(),
            self.ctx.options.truncate_graphemes,
        )
        .iter()
        .map(GraphemeWithConfusablesAnalysis::materialize)
        .collect();
        fields.insert("graphemes".into(), Value::Array(graphemes));
        fields.insert(
            "beautiful_label".into(),
            Value::String(self.process().beautified.clone().unwrap_or_default()),
        );
        fields.insert(
            "canonical_confusable_label".into(),
            self.canonical_confusable_label()
                .map_or(Value::Null, Value::String),
        );
        fields.insert(
            "beautiful_canonical_confusable_label".into(),
            self.beautiful_canonical_confusable_label()
                .map_or(Value::Null, Value::String),
        );
        fields.insert(
            "dns_hostname_support".into(),
            Value::Bool(self.punycode().dns_support),
        );
        fields.insert(
            "punycode_compatibility".into(),
            Value::String(self.punycode().compatibility.as_str().to_owned()),
        );
        fields.insert(
            "punycode_encoding".into(),
            self.punycode()
                .encoded
                .clone()
                .map_or(Value::Null, Value::String),
        );
        fields.insert(
            "font_support_all_os".into(),
            Value::String(self.font_support().as_str().to_owned()),
        );
    }

    fn materialize_unnormalized(&self, fields: &mut Map<String, Value>) {
        fields.insert(
            "cured_label".into(),
            self.cured_label().map_or(Value::Null, Value::String),
        );
        fields.insert(
            "canonical_confusable_label".into(),
            self.process()
                .normalized
                .clone()
                .map_or(Value::Null, Value::String),
        );
        fields.insert(
            "beautiful_canonical_confusable_label".into(),
            self.process()
                .beautified
                .clone()
                .map_or(Value::Null, Value::String),
        );
        // is_normalized() is false here, so an error is always present
        let (message, details, code, index, sequence, suggested) = match self.first_error() {
            Some(error) => (
                error.message().to_owned(),
                error.details().map(str::to_owned),
                error.code().to_owned(),
                error.index(),
                error.sequence().map(str::to_owned),
                error.suggested().map(str::to_owned),
            ),
            None => Default::default(),
        };
        fields.insert("normalization_error_message".into(), Value::String(message));
        fields.insert(
            "normalization_error_details".into(),
            details.map_or(Value::Null, Value::String),
        );
        fields.insert("normalization_error_code".into(), Value::String(code));
        fields.insert(
            "disallowed_sequence_start".into(),
            index.map_or(Value::Null, Value::from),
        );
        fields.insert(
            "disallowed_sequence".into(),
            sequence.map_or(Value::Null, |s| self.sequence_chars(&s)),
        );
        fields.insert(
            "suggested_replacement".into(),
            suggested.map_or(Value::Null, |s| self.sequence_chars(&s)),
        );
    }
}
