/// Price magnitudes tried when looking for a "just under a round number" ending.
const MAGNITUDES: [u64; 3] = [10, 100, 1000];

/// Rounds a computed price up to the tightest psychological price.
///
/// For each magnitude the candidate is the nearest `…9`, `…99` or `…999`
/// at or above `ceil(value)`; the smallest candidate wins. Values that are
/// not finite or do not fit in a `u64` have no rounding.
///
/// `psychological_round(5202.05)` → `Some(5209)` (vs. `5299` and `5999`).
pub fn psychological_round(value: f64) -> Option<u64> {
    if !value.is_finite() {
        return None;
    }
    let ceiled = value.max(0.0).ceil();
    // u64::MAX as f64 rounds up to 2^64, which is already out of range.
    if ceiled >= u64::MAX as f64 {
        return None;
    }
    let x = ceiled as u64;
    MAGNITUDES
        .iter()
        .filter_map(|&unit| {
            let candidate = (x / unit * unit).checked_add(unit - 1)?;
            if candidate < x {
                candidate.checked_add(unit)
            } else {
                Some(candidate)
            }
        })
        .min()
}
