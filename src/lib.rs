//! Character-by-character and grapheme-by-grapheme analysis of text
//! labels (such as domain-name labels), for security and spoofing review.
//!
//! Given a label, the inspector segments it into user-perceived graphemes,
//! classifies every character and grapheme (script, type, name), resolves
//! visually-confusable substitutions against a precomputed table, checks
//! Punycode/DNS compatibility and default-font coverage, and assembles the
//! whole thing into one structured, serializable report.
//!
//! [`Inspector`] is the main type in this library. Construct one (it loads
//! the bundled Unicode, confusable and font data tables, so do this once
//! and share it) and then call [`Inspector::analyse_label`] per label:
//!
//! ```
//! use label_inspector::{AnalysisOptions, Inspector, InspectorResult};
//!
//! let inspector = Inspector::new().unwrap();
//! let result = inspector
//!     .analyse_label("\u{0105}laptop", &AnalysisOptions::new())
//!     .unwrap();
//! match result {
//!     InspectorResult::Normalized(result) => {
//!         assert_eq!(result.all_script.as_deref(), Some("Latin"));
//!         assert_eq!(result.confusable_count, 1);
//!         assert_eq!(
//!             result.canonical_confusable_label.as_deref(),
//!             Some("alaptop"),
//!         );
//!     }
//!     InspectorResult::Unnormalized(_) => unreachable!(),
//! }
//! ```
//!
//! The result has two shapes, picked by the normalization status of the
//! input: a `normalized` label gets the full per-grapheme breakdown with
//! label-level aggregates, while an `unnormalized` label gets the
//! normalization diagnosis (what is wrong, where, and how to repair it).
//! Both are plain data structs in [`models`] and serialize with `serde`.
//!
//! Normalization itself is pluggable: the [`normalizer::Normalizer`] trait
//! decides which labels are acceptable, and the bundled
//! [`normalizer::StandardNormalizer`] implements ENS-style rules. Pass
//! your own engine to [`Inspector::with_normalizer`] if your naming system
//! has different ones.
//!
//! Large results can be bounded with the truncation limits on
//! [`AnalysisOptions`]. Truncation only ever shortens the serialized
//! lists; every aggregate field (lengths, counts, common type/script,
//! canonical label) is computed from the full untruncated data first.

mod analysis;

pub mod config;
pub mod confusables;
pub mod error;
pub mod fonts;
pub mod inspector;
pub mod models;
pub mod normalizer;
pub mod punycode;
pub mod segmentation;
pub mod unicode;

pub use config::AnalysisOptions;
pub use error::{Error, Result};
pub use inspector::Inspector;
pub use models::{InspectorResult, InspectorResultNormalized, InspectorResultUnnormalized};
