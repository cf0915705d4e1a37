//! Service wiring and the public analysis entry point.

use std::sync::Arc;

use log::trace;
use serde_json::Value;

use crate::analysis::{AnalysisContext, LabelAnalysis};
use crate::config::AnalysisOptions;
use crate::confusables::Confusables;
use crate::error::Result;
use crate::fonts::FontSupportTable;
use crate::models::InspectorResult;
use crate::normalizer::{Normalizer, StandardNormalizer};
use crate::segmentation::Segmenter;
use crate::unicode::UnicodeData;

/// The label inspector: immutable shared services built once, then any
/// number of independent per-label analyses.
///
/// Construction parses the bundled data tables and is comparatively
/// expensive; an `Inspector` is meant to be created once and shared (it
/// is `Send + Sync`, analysis takes `&self`).
pub struct Inspector {
    unicode: Arc<UnicodeData>,
    segmenter: Segmenter,
    confusables: Confusables,
    fonts: FontSupportTable,
    normalizer: Box<dyn Normalizer + Send + Sync>,
}

impl Inspector {
    /// Builds an inspector with the bundled [`StandardNormalizer`].
    pub fn new() -> Result<Self> {
        let unicode = Arc::new(UnicodeData::load()?);
        let normalizer = StandardNormalizer::new(Arc::clone(&unicode));
        Self::build(unicode, Box::new(normalizer))
    }

    /// Builds an inspector around a custom normalization engine.
    pub fn with_normalizer(normalizer: Box<dyn Normalizer + Send + Sync>) -> Result<Self> {
        let unicode = Arc::new(UnicodeData::load()?);
        Self::build(unicode, normalizer)
    }

    fn build(
        unicode: Arc<UnicodeData>,
        normalizer: Box<dyn Normalizer + Send + Sync>,
    ) -> Result<Self> {
        let segmenter = Segmenter::new(Arc::clone(&unicode));
        let confusables = Confusables::load(Arc::clone(&unicode), &segmenter, normalizer.as_ref())?;
        let fonts = FontSupportTable::load()?;
        Ok(Self {
            unicode,
            segmenter,
            confusables,
            fonts,
            normalizer,
        })
    }

    /// Runs the full analysis for one label.
    ///
    /// Unusual Unicode content never fails the request: normalization
    /// problems surface as the `unnormalized` result branch, and
    /// missing-data lookups resolve to documented defaults.
    pub fn analyse_label(&self, label: &str, options: &AnalysisOptions) -> Result<InspectorResult> {
        trace!("analysing label of {} bytes", label.len());
        let ctx = AnalysisContext {
            unicode: &self.unicode,
            segmenter: &self.segmenter,
            confusables: self.confusables.view(options.simple_confusables),
            fonts: &self.fonts,
            normalizer: self.normalizer.as_ref(),
            options,
            label,
        };
        let analysis = LabelAnalysis::new(&ctx);
        let materialized = Value::Object(analysis.materialize());
        Ok(serde_json::from_value(materialized)?)
    }
}
