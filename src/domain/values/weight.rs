//! Unit normalization for listing weight and dimension text.
//!
//! Listing pages state weights in whatever unit the seller picked
//! ("12 ounces", "1.2 Kilograms", "‎450 g") and dimensions as a free-form
//! triple ("10 x 8 x 2 inches"). Everything here converts to pounds so the
//! pricing engine works in a single unit.

use regex::Regex;
use std::sync::LazyLock;

/// Declared weight used when a listing gives no usable weight. A missing
/// weight must never price as zero, since that would erase shipping cost.
pub const DEFAULT_DECLARED_WEIGHT_LBS: f64 = 1.0;

/// Carrier divisor for inch-based dimensional weight.
pub const DIM_WEIGHT_DIVISOR: f64 = 139.0;

const LBS_PER_KG: f64 = 2.20462;

// Accepts "2", "2.", "2.5" and ".5".
static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\d+(?:\.\d*)?|\.\d+)").expect("valid regex"));

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d*)?|\.\d+").expect("valid regex"));

/// Bidi control characters Amazon sprinkles around detail-bullet values.
pub fn is_directional_mark(c: char) -> bool {
    matches!(c, '\u{200e}' | '\u{200f}' | '\u{202a}'..='\u{202e}')
}

/// Converts free-text weight to pounds.
///
/// Unit hints are checked in priority order: ounce, pound, kilogram
/// (`kilo`/`kg`), gram. Anything unparseable or unit-less falls back to
/// [`DEFAULT_DECLARED_WEIGHT_LBS`]. No rounding is applied.
pub fn normalize_weight(text: Option<&str>) -> f64 {
    let Some(text) = text else {
        return DEFAULT_DECLARED_WEIGHT_LBS;
    };
    let cleaned: String = text.chars().filter(|c| !is_directional_mark(*c)).collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return DEFAULT_DECLARED_WEIGHT_LBS;
    }

    let Some(value) = LEADING_NUMBER
        .find(cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
    else {
        return DEFAULT_DECLARED_WEIGHT_LBS;
    };

    let lower = cleaned.to_lowercase();
    if lower.contains("ounce") {
        value / 16.0
    } else if lower.contains("pound") {
        value
    } else if ["kilogram", "kilo", "kg"].iter().any(|u| lower.contains(u)) {
        value * LBS_PER_KG
    } else if lower.contains("gram") {
        (value / 1000.0) * LBS_PER_KG
    } else {
        DEFAULT_DECLARED_WEIGHT_LBS
    }
}

/// Converts a dimensions string to volumetric weight in pounds.
///
/// The first three numbers are length, breadth and height in inches; any
/// further numbers (a trailing weight, say) are ignored. Fewer than three
/// numbers gives `0.0`.
pub fn normalize_dimensions(text: Option<&str>) -> f64 {
    let Some(text) = text else {
        return 0.0;
    };
    let dims: Vec<f64> = NUMBER
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .take(3)
        .collect();
    match dims.as_slice() {
        [l, b, h] => (l * b * h) / DIM_WEIGHT_DIVISOR,
        _ => 0.0,
    }
}

/// Weight the carrier bills for: the larger of declared and volumetric.
pub fn effective_weight(declared_lbs: f64, volumetric_lbs: f64) -> f64 {
    declared_lbs.max(volumetric_lbs)
}
