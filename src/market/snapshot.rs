use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::PricingError;
use crate::market::percentages::recalculate_percent_change;
use crate::types::{DegenListItem, TimelineValues, Window};

/// Returns a copy of `item` repriced at `new_price`.
///
/// Every window of `price_change_percent` is recalculated against its own
/// starting price (missing windows count as 0), liquidity is scaled by
/// `new_price / price_usd` and market cap is rebuilt from total supply.
/// Identity, flags and the other metrics are carried over untouched.
pub fn reprice(item: &DegenListItem, new_price: f64) -> Result<DegenListItem, PricingError> {
    if !new_price.is_finite() || new_price < 0.0 {
        return Err(PricingError::InvalidPrice(new_price));
    }

    let current_price = item.price_usd;
    let mut percent_change = TimelineValues::default();
    for window in Window::ALL {
        let current_percent = item.price_change_percent.get_or_zero(window);
        let updated = recalculate_percent_change(current_price, new_price, current_percent)?;
        percent_change.set(window, updated);
    }

    // current_price is non-zero and finite past the recalculation above.
    let price_ratio = new_price / current_price;

    let liquidity_usd = item.liquidity_usd * price_ratio;
    let market_cap_usd = item.total_supply * new_price;
    if !liquidity_usd.is_finite() || !market_cap_usd.is_finite() {
        return Err(PricingError::NonFinite);
    }

    let mut updated = item.clone();
    updated.price_usd = new_price;
    updated.price_change_percent = percent_change.into();
    updated.liquidity_usd = liquidity_usd;
    updated.market_cap_usd = market_cap_usd;
    Ok(updated)
}

/// Reprices every item that has an entry in `new_prices`, keyed by token address.
///
/// An item that cannot be repriced is kept as fetched.
pub fn reprice_list(items: &[DegenListItem], new_prices: &HashMap<String, f64>) -> Vec<DegenListItem> {
    items
        .iter()
        .map(|item| match new_prices.get(&item.token_address) {
            Some(&new_price) => match reprice(item, new_price) {
                Ok(updated) => {
                    debug!(
                        "Repriced {} from {} to {}",
                        item.token_address, item.price_usd, new_price
                    );
                    updated
                }
                Err(e) => {
                    warn!("Skipping reprice of {}: {}", item.token_address, e);
                    item.clone()
                }
            },
            None => item.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PartialTimelineValues;

    fn sample_item() -> DegenListItem {
        let mut item = DegenListItem::new("7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU", 110.0);
        item.token_symbol = Some("BONK".to_string());
        item.total_supply = 1_000.0;
        item.market_cap_usd = 110_000.0;
        item.liquidity_usd = 5_500.0;
        item.is_pro = true;
        item.price_change_percent = PartialTimelineValues {
            m5: Some(10.0),
            m30: Some(0.0),
            h1: Some(-50.0),
            h4: None,
            h8: Some(120.0),
            h24: Some(10.0),
        };
        item.whale_count.h24 = 42.0;
        item
    }

    #[test]
    fn reprice_recalculates_every_window() {
        let item = sample_item();
        let updated = reprice(&item, 121.0).unwrap();

        let pct = updated.price_change_percent;
        assert!((pct.m5.unwrap() - 21.0).abs() < 1e-9);
        assert!((pct.m30.unwrap() - 10.0).abs() < 1e-9);
        // baseline 220 -> 121 is -45%
        assert!((pct.h1.unwrap() + 45.0).abs() < 1e-9);
        // missing window counts as unchanged since window start
        assert!((pct.h4.unwrap() - 10.0).abs() < 1e-9);
        // baseline 50 -> 121 is +142%
        assert!((pct.h8.unwrap() - 142.0).abs() < 1e-9);
        assert!((pct.h24.unwrap() - 21.0).abs() < 1e-9);
    }

    #[test]
    fn reprice_rescales_dependent_fields() {
        let item = sample_item();
        let updated = reprice(&item, 55.0).unwrap();

        assert_eq!(updated.price_usd, 55.0);
        assert_eq!(updated.market_cap_usd, item.total_supply * 55.0);
        assert!((updated.liquidity_usd - 2_750.0).abs() < 1e-9);
    }

    #[test]
    fn reprice_does_not_touch_input_or_pass_through_fields() {
        let item = sample_item();
        let before = item.clone();
        let updated = reprice(&item, 0.5).unwrap();

        assert_eq!(item, before);
        assert_eq!(updated.token_address, item.token_address);
        assert_eq!(updated.token_symbol, item.token_symbol);
        assert_eq!(updated.is_pro, item.is_pro);
        assert_eq!(updated.whale_count, item.whale_count);
        assert_eq!(updated.total_supply, item.total_supply);
    }

    #[test]
    fn reprice_at_same_price_fills_missing_windows() {
        let item = sample_item();
        let updated = reprice(&item, item.price_usd).unwrap();
        assert_eq!(updated.price_change_percent.h4, Some(0.0));
        assert!((updated.price_change_percent.h1.unwrap() + 50.0).abs() < 1e-9);
        assert_eq!(updated.liquidity_usd, item.liquidity_usd);
    }

    #[test]
    fn zero_priced_item_cannot_be_repriced() {
        let item = DegenListItem::new("zero", 0.0);
        assert!(matches!(reprice(&item, 1.0), Err(PricingError::InvalidBaseline { .. })));
    }

    #[test]
    fn invalid_new_price_is_rejected() {
        let item = sample_item();
        assert_eq!(reprice(&item, -1.0), Err(PricingError::InvalidPrice(-1.0)));
        assert!(matches!(reprice(&item, f64::NAN), Err(PricingError::InvalidPrice(_))));
    }

    #[test]
    fn overflowing_market_cap_or_liquidity_is_rejected() {
        let mut item = sample_item();
        item.total_supply = f64::MAX;
        assert_eq!(reprice(&item, 121.0), Err(PricingError::NonFinite));

        let mut item = sample_item();
        item.liquidity_usd = f64::MAX;
        assert_eq!(reprice(&item, 220.0), Err(PricingError::NonFinite));
    }

    #[test]
    fn reprice_list_only_touches_matching_items() {
        let first = sample_item();
        let second = DegenListItem::new("untouched", 3.0);
        let zero = DegenListItem::new("zero", 0.0);
        let items = vec![first.clone(), second.clone(), zero.clone()];

        let mut prices = HashMap::new();
        prices.insert(first.token_address.clone(), 121.0);
        prices.insert("zero".to_string(), 2.0);

        let updated = reprice_list(&items, &prices);
        assert_eq!(updated.len(), 3);
        assert_eq!(updated[0].price_usd, 121.0);
        assert_eq!(updated[1], second);
        assert_eq!(updated[2], zero);
    }
}
