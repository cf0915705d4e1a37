//! Punycode encoding and DNS hostname compatibility.
//!
//! A label is encodable for DNS when every dot-separated segment survives
//! the ASCII-compatible encoding rules of IDNA. The analysis reports the
//! first incompatibility found, plus whether the raw label is already a
//! valid RFC 1123 hostname.

use idna::punycode;
use serde::{Deserialize, Serialize};


/// RFC 1035 limits.
const MAX_LABEL_LENGTH: usize = 63;
const MAX_NAME_LENGTH: usize = 253;

/// Why a label cannot be turned into a DNS-compatible Punycode name, or
/// [`Compatible`](PunycodeCompatibility::Compatible) when it can.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PunycodeCompatibility {
    Compatible,
    UnsupportedAscii,
    PunycodeLiteral,
    InvalidLabelExtension,
    LabelTooLong,
    NameTooLong,
}

impl PunycodeCompatibility {
    pub fn as_str(self) -> &'static str {
        match self {
            PunycodeCompatibility::Compatible => "COMPATIBLE",
            PunycodeCompatibility::UnsupportedAscii => "UNSUPPORTED_ASCII",
            PunycodeCompatibility::PunycodeLiteral => "PUNYCODE_LITERAL",
            PunycodeCompatibility::InvalidLabelExtension => "INVALID_LABEL_EXTENSION",
            PunycodeCompatibility::LabelTooLong => "LABEL_TOO_LONG",
            PunycodeCompatibility::NameTooLong => "NAME_TOO_LONG",
        }
    }
}

/// The outcome of [`analyze`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PunycodeAnalysis {
    /// Whether the raw label is already a valid RFC 1123 hostname.
    pub dns_support: bool,
    pub compatibility: PunycodeCompatibility,
    /// The encoded name, present only when compatible.
    pub encoded: Option<String>,
}

/// Encodes one dot-separated segment. Empty and ASCII-only segments pass
/// through unchanged; anything else gets the `xn--` prefix.
fn encoded_segment(segment: &str) -> Option<String> {
    if segment.is_empty() {
        return Some(String::new());
    }
    let encoded = punycode::encode_str(segment)?;
    if encoded.ends_with('-') {
        // a trailing delimiter means the segment had no non-ASCII part
        Some(segment.to_owned())
    } else {
        Some(format!("xn--{encoded}"))
    }
}

/// Expects the already-lowercased encoded segment.
fn is_unsupported_ascii(encoded: &str) -> bool {
    encoded
        .chars()
        .any(|c| !c.is_ascii_lowercase() && !c.is_ascii_digit() && c != '-')
}

/// RFC 1123 hostname validity.
fn is_rfc1123(name: &str) -> bool {
    if name.len() > MAX_NAME_LENGTH + 1 {
        return false;
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return false;
    }
    name.split('.').all(|label| {
        label.len() <= MAX_LABEL_LENGTH && !label.starts_with('-') && !label.ends_with('-')
    })
}

/// Analyzes one label (which may itself contain dots) for Punycode and
/// DNS hostname compatibility. Encoded segments are reported lowercased.
pub fn analyze(label: &str) -> PunycodeAnalysis {
    let dns_support = is_rfc1123(label);

    let mut encoded_segments = Vec::new();
    for segment in label.split('.') {
        let Some(encoded) = encoded_segment(segment) else {
            return PunycodeAnalysis {
                dns_support,
                compatibility: PunycodeCompatibility::UnsupportedAscii,
                encoded: None,
            };
        };
        let encoded = encoded.to_lowercase();
        let compatibility = if is_unsupported_ascii(&encoded) {
            Some(PunycodeCompatibility::UnsupportedAscii)
        } else if encoded == segment && segment.starts_with("xn--") {
            Some(PunycodeCompatibility::PunycodeLiteral)
        } else if encoded == segment && segment.get(2..4) == Some("--") {
            Some(PunycodeCompatibility::InvalidLabelExtension)
        } else if encoded.len() > MAX_LABEL_LENGTH {
            Some(PunycodeCompatibility::LabelTooLong)
        } else {
            None
        };
        if let Some(compatibility) = compatibility {
            return PunycodeAnalysis {
                dns_support,
                compatibility,
                encoded: None,
            };
        }
        encoded_segments.push(encoded);
    }

    let encoded = encoded_segments.join(".");
    if encoded.len() > MAX_NAME_LENGTH {
        return PunycodeAnalysis {
            dns_support,
            compatibility: PunycodeCompatibility::NameTooLong,
            encoded: None,
        };
    }
    PunycodeAnalysis {
        dns_support,
        compatibility: PunycodeCompatibility::Compatible,
        encoded: Some(encoded),
    }
}
