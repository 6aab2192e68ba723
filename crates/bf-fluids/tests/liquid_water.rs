//! Property-level checks on the in-tree water correlation.

use bf_core::units::{degc, pa};
use bf_fluids::{LiquidWater, PropertyModel, StateInput};
use proptest::prelude::*;

#[test]
fn operating_envelope_is_covered() {
    let water = LiquidWater::new();
    for (p, t) in [(101_325.0, 20.0), (230_000.0, 35.0), (200_000.0, 50.0)] {
        let pack = water.property_pack(pa(p), degc(t)).unwrap();
        assert!(pack.rho.value > 950.0 && pack.rho.value < 1001.0);
        assert!(pack.h > 0.0);
        assert!(pack.mu.value > 2e-4 && pack.mu.value < 2e-3);
    }
}

#[test]
fn pt_state_outside_envelope_is_rejected() {
    let water = LiquidWater::new();
    let result = water.state(StateInput::PT {
        p: pa(200_000.0),
        t: degc(120.0),
    });
    assert!(result.unwrap_err().is_unreachable());
}

proptest! {
    #[test]
    fn provider_is_pure(p in 2_000.0f64..9.9e6, t in 0.0f64..100.0) {
        let water = LiquidWater::new();
        let a = water.property_pack(pa(p), degc(t)).unwrap();
        let b = water.property_pack(pa(p), degc(t)).unwrap();
        prop_assert_eq!(a.rho, b.rho);
        prop_assert_eq!(a.h, b.h);
        prop_assert_eq!(a.mu, b.mu);
    }

    #[test]
    fn enthalpy_increases_with_temperature(p in 2_000.0f64..9.9e6, t in 0.0f64..99.0) {
        let water = LiquidWater::new();
        let h1 = water.specific_enthalpy(pa(p), degc(t)).unwrap();
        let h2 = water.specific_enthalpy(pa(p), degc(t + 1.0)).unwrap();
        prop_assert!(h2 > h1);
    }
}
