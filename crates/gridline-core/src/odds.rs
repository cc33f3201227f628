// American odds <-> implied probability conversions.

/// Implied probability of an American price.
///
/// Negative prices are the stake needed to win 100, so the probability is
/// `|odds| / (|odds| + 100)`; non-negative prices give `100 / (odds + 100)`.
pub fn american_to_probability(odds: i32) -> f64 {
    if odds < 0 {
        let risk = f64::from(odds).abs();
        risk / (risk + 100.0)
    } else {
        100.0 / (f64::from(odds) + 100.0)
    }
}

/// Fair American price for a probability.
///
/// Returns `None` outside the open interval (0, 1), where no finite price
/// exists.
pub fn probability_to_american(p: f64) -> Option<i32> {
    if !p.is_finite() || p <= 0.0 || p >= 1.0 {
        return None;
    }
    let price = if p >= 0.5 {
        -100.0 * p / (1.0 - p)
    } else {
        100.0 * (1.0 - p) / p
    };
    Some(price.round() as i32)
}

/// Display form of an American price: `+150`, `-110`, or `N/A` when absent.
pub fn format_american(odds: Option<i32>) -> String {
    match odds {
        Some(price) if price >= 0 => format!("+{price}"),
        Some(price) => price.to_string(),
        None => "N/A".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
