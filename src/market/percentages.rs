use crate::error::PricingError;

/// Recomputes the percent change for one window when the price moves from
/// `current_price` to `new_price`.
///
/// `current_percent` is the change that already maps `current_price` back to
/// the window's starting price. That starting price is recovered first and
/// the new change is measured from it, so repeated updates never accumulate.
///
/// # Arguments
/// * `current_price` - The price before the change.
/// * `new_price` - The price after the change.
/// * `current_percent` - The percent change (12.5 means +12.5%) that led to `current_price`.
pub fn recalculate_percent_change(
    current_price: f64,
    new_price: f64,
    current_percent: f64,
) -> Result<f64, PricingError> {
    if !current_price.is_finite() || !new_price.is_finite() || !current_percent.is_finite() {
        return Err(PricingError::NonFinite);
    }

    let baseline = baseline_price(current_price, current_percent)?;
    let new_percent = (new_price - baseline) / baseline * 100.0;

    if !new_percent.is_finite() {
        return Err(PricingError::NonFinite);
    }
    Ok(new_percent)
}

/// Price at the start of the window implied by `price` and its recorded change.
pub fn baseline_price(price: f64, percent: f64) -> Result<f64, PricingError> {
    let factor = 1.0 + percent / 100.0;
    if price == 0.0 || factor == 0.0 {
        return Err(PricingError::InvalidBaseline { price, percent });
    }

    let baseline = price / factor;
    if baseline == 0.0 || !baseline.is_finite() {
        return Err(PricingError::InvalidBaseline { price, percent });
    }
    Ok(baseline)
}
