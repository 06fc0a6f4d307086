//! Property tests for the solver contract.

use cf_core::{Tolerances, nearly_equal};
use cf_formula::{ErrorKind, Field, FormulaRegistry, FormulaSpec, solve};
use cf_units::base_unit;
use proptest::prelude::*;

fn registry() -> &'static FormulaRegistry {
    FormulaRegistry::standard().expect("standard catalogue builds")
}

fn spec(id: &str) -> &'static FormulaSpec {
    registry().get(id).expect("formula is registered")
}

fn base_field(spec: &FormulaSpec, key: &str, value: f64) -> Field {
    let q = spec.quantity(key).expect("declared quantity");
    Field::new(key, value.to_string(), base_unit(q.dimension).symbol)
}

fn base_fields(spec: &FormulaSpec, entries: &[(&str, f64)]) -> Vec<Field> {
    entries.iter().map(|&(k, v)| base_field(spec, k, v)).collect()
}

fn close(a: f64, b: f64) -> bool {
    nearly_equal(a, b, Tolerances { abs: 1e-9, rel: 1e-9 })
}

proptest! {
    #[test]
    fn potential_energy_inverts_to_height(
        m in 0.1_f64..1000.0,
        g in 0.1_f64..100.0,
        h in 0.01_f64..1000.0,
    ) {
        let pe = spec("potential-energy");
        let forward = solve(pe, &base_fields(pe, &[("m", m), ("g", g), ("h", h)]), None).unwrap();
        let energy = forward.base_value();
        let back = solve(pe, &base_fields(pe, &[("pe", energy), ("m", m), ("g", g)]), None).unwrap();
        prop_assert_eq!(back.target.key, "h");
        prop_assert!(close(back.base_value(), h));
    }

    #[test]
    fn density_inverts_to_mass(m in 0.001_f64..1e4, vol in 0.001_f64..100.0) {
        let density = spec("density");
        let rho = solve(density, &base_fields(density, &[("m", m), ("vol", vol)]), None)
            .unwrap()
            .base_value();
        let back = solve(density, &base_fields(density, &[("rho", rho), ("vol", vol)]), None).unwrap();
        prop_assert!(close(back.base_value(), m));
    }

    #[test]
    fn flow_rate_inverts_to_velocity(a in 1e-4_f64..10.0, v in 0.01_f64..50.0) {
        let flow = spec("flow-rate");
        let q = solve(flow, &base_fields(flow, &[("a", a), ("v", v)]), Some("q"))
            .unwrap()
            .base_value();
        let back = solve(flow, &base_fields(flow, &[("q", q), ("a", a)]), Some("v")).unwrap();
        prop_assert!(close(back.base_value(), v));
    }

    /// For the "leave one empty" formulas, only k-1 filled fields get past
    /// the completeness check.
    #[test]
    fn only_k_minus_one_fields_pass_completeness(
        values in prop::collection::vec(0.5_f64..50.0, 6),
        mask in prop::collection::vec(any::<bool>(), 6),
    ) {
        for spec in registry().iter().filter(|s| s.is_single_alternative()) {
            let vars: Vec<&str> = spec.variables().map(|q| q.key).collect();
            let entries: Vec<(&str, f64)> = vars
                .iter()
                .zip(&mask)
                .zip(&values)
                .filter(|&((_, &on), _)| on)
                .map(|((&k, _), &v)| (k, v))
                .collect();
            let outcome = solve(spec, &base_fields(spec, &entries), None);
            if entries.len() + 1 == vars.len() {
                if let Err(err) = outcome {
                    prop_assert_ne!(err.kind(), ErrorKind::Completeness, "{}: {}", spec.id, err);
                }
            } else {
                let err = outcome.unwrap_err();
                prop_assert_eq!(err.kind(), ErrorKind::Completeness, "{}: {}", spec.id, err);
            }
        }
    }

    /// Zeros, negatives and small numbers end in a finite answer or an error,
    /// never a NaN and never a panic.
    #[test]
    fn any_input_gives_finite_result_or_error(
        values in prop::collection::vec(prop_oneof![Just(0.0_f64), -10.0_f64..10.0], 8),
    ) {
        for spec in registry().iter() {
            for r in &spec.rearrangements {
                let entries: Vec<(&str, f64)> = r
                    .requires
                    .iter()
                    .chain(r.optional)
                    .copied()
                    .zip(values.iter().copied().cycle())
                    .collect();
                if let Ok(sol) = solve(spec, &base_fields(spec, &entries), Some(r.target)) {
                    prop_assert!(sol.value.is_finite(), "{}: {}", spec.id, r.equation);
                    prop_assert!(sol.base_value().is_finite(), "{}: {}", spec.id, r.equation);
                }
            }
        }
    }
}
