//! Core logic for pricing a package selection.

use crate::builder::selection::SelectionState;
use crate::builder::types::PricingResult;

/// Discount tier for a given number of distinct selected services.
///
/// The incentive rewards breadth of adoption, not raw quantity: ten units of
/// one service earn no discount, while one unit each of six distinct
/// services earns 41%. Past five services the tier keeps growing by one
/// point per service.
///
/// TODO: confirm with the product owner whether the discount should cap;
/// as written, twenty distinct services would earn 55% off.
pub fn discount_percent(unique_service_count: usize) -> u32 {
    match unique_service_count {
        0..=2 => 0,
        3 => 20,
        4 => 30,
        5 => 40,
        n => 40 + (n as u32 - 5),
    }
}

/// Round a monetary value to two decimals.
///
/// Applied only at display and commit time. Intermediate pricing math stays
/// in full precision so repeated additions cannot compound rounding error.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl PricingResult {
    /// Price a selection from scratch.
    ///
    /// Always a full re-derivation: the result is never cached or patched
    /// incrementally, so it cannot drift from the selection it describes.
    pub fn compute(state: &SelectionState) -> Self {
        let mut subtotal = 0.0_f64;
        let mut total_items = 0_u64;
        for entry in state.entries() {
            subtotal += entry.unit_price * f64::from(entry.quantity);
            total_items += u64::from(entry.quantity);
        }

        let unique_service_count = state.entries().len();
        let discount_percent = discount_percent(unique_service_count);
        let discount_amount = subtotal * f64::from(discount_percent) / 100.0;

        Self {
            subtotal,
            unique_service_count,
            discount_percent,
            discount_amount,
            total: subtotal - discount_amount,
            total_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ServiceCategory, ServiceOption};
    use proptest::prelude::*;

    fn svc(id: &str, price: f64) -> ServiceOption {
        ServiceOption {
            id: id.to_string(),
            name: id.to_string(),
            category: ServiceCategory::Branding,
            monthly_price: price,
            description: None,
            image_url: None,
            visible: true,
        }
    }

    fn select(prices: &[f64]) -> SelectionState {
        let mut state = SelectionState::new();
        for (i, price) in prices.iter().enumerate() {
            state.toggle(&svc(&format!("svc-{}", i), *price));
        }
        state
    }

    #[test]
    fn test_discount_thresholds() {
        assert_eq!(discount_percent(0), 0);
        assert_eq!(discount_percent(1), 0);
        assert_eq!(discount_percent(2), 0);
        assert_eq!(discount_percent(3), 20);
        assert_eq!(discount_percent(4), 30);
        assert_eq!(discount_percent(5), 40);
        assert_eq!(discount_percent(6), 41);
        assert_eq!(discount_percent(10), 45);
        // No ceiling: the tier keeps climbing.
        assert_eq!(discount_percent(20), 55);
    }

    #[test]
    fn test_quantity_does_not_affect_discount_tier() {
        let mut state = select(&[120.0]);
        state.adjust_quantity("svc-0", 49);

        let pricing = PricingResult::compute(&state);
        assert_eq!(pricing.total_items, 50);
        assert_eq!(pricing.unique_service_count, 1);
        assert_eq!(pricing.discount_percent, 0);
        assert_eq!(pricing.total, pricing.subtotal);
    }

    #[test]
    fn test_undiscounted_total() {
        let mut state = select(&[100.0, 50.0]);
        state.adjust_quantity("svc-0", 1); // qty 2 of the 100.0 service

        let pricing = PricingResult::compute(&state);
        assert_eq!(pricing.subtotal, 250.0);
        assert_eq!(pricing.discount_percent, 0);
        assert_eq!(pricing.discount_amount, 0.0);
        assert_eq!(round_to_cents(pricing.total), 250.00);
    }

    #[test]
    fn test_three_service_discount() {
        let pricing = PricingResult::compute(&select(&[10.0, 20.0, 30.0]));

        assert_eq!(pricing.subtotal, 60.0);
        assert_eq!(pricing.discount_percent, 20);
        assert_eq!(round_to_cents(pricing.discount_amount), 12.00);
        assert_eq!(round_to_cents(pricing.total), 48.00);
    }

    #[test]
    fn test_six_service_discount() {
        let pricing = PricingResult::compute(&select(&[10.0; 6]));

        assert_eq!(pricing.subtotal, 60.0);
        assert_eq!(pricing.discount_percent, 41);
        assert_eq!(round_to_cents(pricing.discount_amount), 24.60);
        assert_eq!(round_to_cents(pricing.total), 35.40);
    }

    #[test]
    fn test_empty_selection_prices_to_zero() {
        let pricing = PricingResult::compute(&SelectionState::new());
        assert_eq!(pricing, PricingResult::default());
    }

    #[test]
    fn test_reset_yields_all_zero_pricing() {
        let mut state = select(&[10.0, 20.0, 30.0, 40.0]);
        state.adjust_quantity("svc-1", 5);
        state.reset();

        assert_eq!(PricingResult::compute(&state), PricingResult::default());
    }

    #[test]
    fn test_rounding_only_at_the_edge() {
        // Three entries of 0.10 each: binary floats make the raw subtotal
        // slightly off 0.30, and the contract is to round once at the end.
        let pricing = PricingResult::compute(&select(&[0.1, 0.1, 0.1]));
        assert_eq!(round_to_cents(pricing.total), 0.24);
    }

    proptest! {
        #[test]
        fn prop_discount_is_monotonic(n in 0usize..200) {
            prop_assert!(discount_percent(n) <= discount_percent(n + 1));
        }

        #[test]
        fn prop_total_never_exceeds_subtotal(prices in proptest::collection::vec(0.0f64..10_000.0, 0..12)) {
            let pricing = PricingResult::compute(&select(&prices));
            prop_assert!(pricing.total <= pricing.subtotal + 1e-9);
            prop_assert!(pricing.discount_amount >= 0.0);
        }
    }
}
