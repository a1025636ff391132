//! Numeric helpers shared by the sampling code

/// Index of the first entry of `cumulative` that is `>= value`, clipped to
/// the valid index range.
///
/// `cumulative` must be non-decreasing. Values above the last entry return
/// the last index rather than running off the end. Returns `None` only for an
/// empty slice.
pub fn locate_clip(cumulative: &[f64], value: f64) -> Option<usize> {
    if cumulative.is_empty() {
        return None;
    }
    let last = cumulative.len() - 1;
    if value <= cumulative[0] {
        return Some(0);
    }
    if value > cumulative[last] {
        return Some(last);
    }

    // invariant: cumulative[low] < value <= cumulative[high]
    let mut low = 0usize;
    let mut high = last;
    while high - low > 1 {
        let mid = (low + high) >> 1;
        if cumulative[mid] < value {
            low = mid;
        } else {
            high = mid;
        }
    }
    Some(high)
}

/// Normalised running sum of `weights`, with negative weights counted as zero.
///
/// The last entry is exactly 1. Returns an empty vector when the weights sum
/// to zero (or there are none), since no meaningful distribution exists then.
pub fn normalized_cdf<I>(weights: I) -> Vec<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut running = 0.0;
    let mut cumulative: Vec<f64> = weights
        .into_iter()
        .map(|w| {
            running += w.max(0.0);
            running
        })
        .collect();

    let total = running;
    if !(total > 0.0) || !total.is_finite() {
        return Vec::new();
    }
    for value in cumulative.iter_mut() {
        *value /= total;
    }
    if let Some(last) = cumulative.last_mut() {
        *last = 1.0;
    }
    cumulative
}
