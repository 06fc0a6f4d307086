//! Heat transfer: calorimetry and Newton's law of cooling.
//!
//! Temperatures arrive in kelvin, so differences need no offset handling.

use cf_core::{CfError, CfResult, safe_div, safe_ln};
use cf_units::Dimension;

use crate::error::SpecResult;
use crate::quantity::QuantityDef;
use crate::spec::{Evaluation, FormulaSpec, Inputs, Rearrangement};

const fn temperature(key: &'static str, symbol: &'static str, name: &'static str) -> QuantityDef {
    QuantityDef::variable(key, symbol, name, Dimension::Temperature, "°C").absolute_temperature()
}

// Calorimetry

fn delta_t(i: &Inputs) -> CfResult<f64> {
    Ok((i.get("t2")? - i.get("t1")?).abs())
}

fn heat_per_kelvin(i: &Inputs) -> CfResult<f64> {
    Ok(i.get("m")? * i.get("c")?)
}

fn calorimetry_heat(i: &Inputs) -> CfResult<Evaluation> {
    let dt = delta_t(i)?;
    Ok(Evaluation::of(heat_per_kelvin(i)? * dt).term("ΔT", "|T₂ − T₁|", dt, Dimension::Temperature))
}

fn calorimetry_mass(i: &Inputs) -> CfResult<Evaluation> {
    let dt = delta_t(i)?;
    let m = safe_div(i.get("q")?, i.get("c")? * dt, "c × ΔT")?;
    Ok(Evaluation::of(m).term("ΔT", "|T₂ − T₁|", dt, Dimension::Temperature))
}

fn calorimetry_specific_heat(i: &Inputs) -> CfResult<Evaluation> {
    let dt = delta_t(i)?;
    let c = safe_div(i.get("q")?, i.get("m")? * dt, "m × ΔT")?;
    Ok(Evaluation::of(c).term("ΔT", "|T₂ − T₁|", dt, Dimension::Temperature))
}

fn temperature_change(i: &Inputs) -> CfResult<f64> {
    safe_div(i.get("q")?, heat_per_kelvin(i)?, "m × c")
}

/// Heat is a positive magnitude, so the temperature inverses assume the
/// sample was heated: a cooling case solves to the mirrored temperature.
fn calorimetry_initial(i: &Inputs) -> CfResult<Evaluation> {
    let dt = temperature_change(i)?;
    Ok(Evaluation::of(i.get("t2")? - dt).term("ΔT", "Q / (m × c)", dt, Dimension::Temperature))
}

fn calorimetry_final(i: &Inputs) -> CfResult<Evaluation> {
    let dt = temperature_change(i)?;
    Ok(Evaluation::of(i.get("t1")? + dt).term("ΔT", "Q / (m × c)", dt, Dimension::Temperature))
}

pub fn calorimetry() -> SpecResult<FormulaSpec> {
    FormulaSpec::builder("calorimetry", "Calorimetry", "Q = m × c × ΔT")
        .quantity(QuantityDef::variable("q", "Q", "Heat", Dimension::Energy, "J").positive())
        .quantity(QuantityDef::variable("m", "m", "Mass", Dimension::Mass, "kg").positive())
        .quantity(
            QuantityDef::variable("c", "c", "Specific heat capacity", Dimension::SpecificHeat, "J/(kg·K)")
                .positive(),
        )
        .quantity(temperature("t1", "T₁", "Initial temperature"))
        .quantity(temperature("t2", "T₂", "Final temperature"))
        .rearrangement(Rearrangement::new(
            "q",
            &["m", "c", "t1", "t2"],
            "Q = m × c × |T₂ − T₁|",
            "Q = {m} × {c} × {ΔT}",
            calorimetry_heat,
        ))
        .rearrangement(Rearrangement::new(
            "m",
            &["q", "c", "t1", "t2"],
            "m = Q / (c × |T₂ − T₁|)",
            "m = {q} / ({c} × {ΔT})",
            calorimetry_mass,
        ))
        .rearrangement(Rearrangement::new(
            "c",
            &["q", "m", "t1", "t2"],
            "c = Q / (m × |T₂ − T₁|)",
            "c = {q} / ({m} × {ΔT})",
            calorimetry_specific_heat,
        ))
        .rearrangement(Rearrangement::new(
            "t1",
            &["q", "m", "c", "t2"],
            "T₁ = T₂ − Q / (m × c)",
            "T₁ = {t2} − {q} / ({m} × {c})",
            calorimetry_initial,
        ))
        .rearrangement(Rearrangement::new(
            "t2",
            &["q", "m", "c", "t1"],
            "T₂ = T₁ + Q / (m × c)",
            "T₂ = {t1} + {q} / ({m} × {c})",
            calorimetry_final,
        ))
        .build()
}

// Newton's law of cooling

const EQUILIBRIUM_K: f64 = 1e-10;

/// `(T − Tₛ) / (T₀ − Tₛ)`, the fraction of the initial difference that remains.
fn remaining_fraction(i: &Inputs) -> CfResult<f64> {
    let (temp, ts, t0) = (i.get("temp")?, i.get("ts")?, i.get("t0")?);
    if (temp - ts).abs() < EQUILIBRIUM_K {
        return Err(CfError::OutOfRange {
            what: "temperature has reached equilibrium with the surroundings",
        });
    }
    if (temp > t0 && t0 > ts) || (temp < t0 && t0 < ts) {
        return Err(CfError::OutOfRange {
            what: "current temperature must lie between the initial and surrounding temperatures",
        });
    }
    safe_div(temp - ts, t0 - ts, "initial − surrounding temperature")
}

fn decay(i: &Inputs) -> CfResult<f64> {
    Ok((-i.get("k")? * i.get("time")?).exp())
}

fn cooling_temperature(i: &Inputs) -> CfResult<Evaluation> {
    let (ts, t0) = (i.get("ts")?, i.get("t0")?);
    let e = decay(i)?;
    Ok(Evaluation::of(ts + (t0 - ts) * e).term("e", "e^(−kt)", e, Dimension::Dimensionless))
}

fn cooling_surroundings(i: &Inputs) -> CfResult<Evaluation> {
    let (temp, t0) = (i.get("temp")?, i.get("t0")?);
    let e = decay(i)?;
    let ts = safe_div(temp - t0 * e, 1.0 - e, "1 − e^(−kt)")?;
    Ok(Evaluation::of(ts).term("e", "e^(−kt)", e, Dimension::Dimensionless))
}

fn cooling_initial(i: &Inputs) -> CfResult<Evaluation> {
    let (temp, ts) = (i.get("temp")?, i.get("ts")?);
    let e = decay(i)?;
    let t0 = ts + safe_div(temp - ts, e, "e^(−kt)")?;
    Ok(Evaluation::of(t0).term("e", "e^(−kt)", e, Dimension::Dimensionless))
}

fn cooling_constant(i: &Inputs) -> CfResult<Evaluation> {
    let ratio = remaining_fraction(i)?;
    let ln = safe_ln(ratio, "(T − Tₛ) / (T₀ − Tₛ)")?;
    let k = safe_div(-ln, i.get("time")?, "time")?;
    Ok(Evaluation::of(k).term("ratio", "(T − Tₛ) / (T₀ − Tₛ)", ratio, Dimension::Dimensionless))
}

fn cooling_time(i: &Inputs) -> CfResult<Evaluation> {
    let ratio = remaining_fraction(i)?;
    let ln = safe_ln(ratio, "(T − Tₛ) / (T₀ − Tₛ)")?;
    let t = safe_div(-ln, i.get("k")?, "cooling constant")?;
    Ok(Evaluation::of(t).term("ratio", "(T − Tₛ) / (T₀ − Tₛ)", ratio, Dimension::Dimensionless))
}

pub fn newtons_cooling() -> SpecResult<FormulaSpec> {
    FormulaSpec::builder("newtons-cooling", "Newton's Law of Cooling", "T = Tₛ + (T₀ − Tₛ)e^(−kt)")
        .quantity(temperature("temp", "T", "Temperature at time t"))
        .quantity(temperature("ts", "Tₛ", "Surrounding temperature"))
        .quantity(temperature("t0", "T₀", "Initial temperature"))
        .quantity(QuantityDef::variable("k", "k", "Cooling constant", Dimension::Rate, "1/s").positive())
        .quantity(QuantityDef::variable("time", "t", "Time", Dimension::Time, "s").non_negative())
        .rearrangement(Rearrangement::new(
            "temp",
            &["ts", "t0", "k", "time"],
            "T = Tₛ + (T₀ − Tₛ)e^(−kt)",
            "T = {ts} + ({t0} − {ts}) × {e}",
            cooling_temperature,
        ))
        .rearrangement(Rearrangement::new(
            "ts",
            &["temp", "t0", "k", "time"],
            "Tₛ = (T − T₀e^(−kt)) / (1 − e^(−kt))",
            "Tₛ = ({temp} − {t0} × {e}) / (1 − {e})",
            cooling_surroundings,
        ))
        .rearrangement(Rearrangement::new(
            "t0",
            &["temp", "ts", "k", "time"],
            "T₀ = Tₛ + (T − Tₛ) / e^(−kt)",
            "T₀ = {ts} + ({temp} − {ts}) / {e}",
            cooling_initial,
        ))
        .rearrangement(Rearrangement::new(
            "k",
            &["temp", "ts", "t0", "time"],
            "k = −ln((T − Tₛ) / (T₀ − Tₛ)) / t",
            "k = −ln({ratio}) / {time}",
            cooling_constant,
        ))
        .rearrangement(Rearrangement::new(
            "time",
            &["temp", "ts", "t0", "k"],
            "t = −ln((T − Tₛ) / (T₀ − Tₛ)) / k",
            "t = −ln({ratio}) / {k}",
            cooling_time,
        ))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, SolveError};
    use crate::solver::{Field, solve};

    fn fields(entries: &[(&str, &str, &str)]) -> Vec<Field> {
        entries.iter().map(|&(k, v, u)| Field::new(k, v, u)).collect()
    }

    #[test]
    fn heating_a_litre_of_water() {
        let spec = calorimetry().unwrap();
        let sol = solve(
            &spec,
            &fields(&[("m", "1", "kg"), ("c", "4186", "J/(kg·K)"), ("t1", "20", "°C"), ("t2", "30", "°C")]),
            None,
        )
        .unwrap();
        assert!((sol.value - 41_860.0).abs() < 1e-6);
    }

    #[test]
    fn temperatures_from_heat() {
        let spec = calorimetry().unwrap();
        let sol = solve(
            &spec,
            &fields(&[("q", "41860", "J"), ("m", "1", "kg"), ("c", "4186", "J/(kg·K)"), ("t1", "20", "°C")]),
            None,
        )
        .unwrap();
        assert_eq!(sol.target.key, "t2");
        assert_eq!(sol.unit.symbol, "°C");
        assert!((sol.value - 30.0).abs() < 1e-9);

        let sol = solve(
            &spec,
            &fields(&[
                ("q", "41860", "J"),
                ("m", "1", "kg"),
                ("c", "4186", "J/(kg·K)"),
                ("t1", "", "K"),
                ("t2", "30", "°C"),
            ]),
            None,
        )
        .unwrap();
        assert!((sol.value - 293.15).abs() < 1e-9);
    }

    #[test]
    fn temperature_inverses_assume_heating() {
        let spec = calorimetry().unwrap();
        let base = [("m", "1", "kg"), ("c", "4186", "J/(kg·K)")];

        // Cooling from 30 °C to 20 °C releases the same magnitude of heat.
        let mut cooling = fields(&base);
        cooling.extend(fields(&[("t1", "30", "°C"), ("t2", "20", "°C")]));
        let heat = solve(&spec, &cooling, None).unwrap();
        assert!((heat.value - 41_860.0).abs() < 1e-6);

        // Solving back from that heat lands on the heated side of T₁.
        let mut back = fields(&base);
        back.extend(fields(&[("q", "41860", "J"), ("t1", "30", "°C"), ("t2", "", "°C")]));
        let t2 = solve(&spec, &back, None).unwrap();
        assert!((t2.value - 40.0).abs() < 1e-9);

        let mut back = fields(&base);
        back.extend(fields(&[("q", "41860", "J"), ("t1", "", "°C"), ("t2", "20", "°C")]));
        let t1 = solve(&spec, &back, None).unwrap();
        assert!((t1.value - 10.0).abs() < 1e-9);
    }

    #[test]
    fn below_absolute_zero_is_rejected() {
        let spec = calorimetry().unwrap();
        let err = solve(
            &spec,
            &fields(&[("m", "1", "kg"), ("c", "1", "J/(kg·K)"), ("t1", "-300", "°C"), ("t2", "0", "°C")]),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, SolveError::ConstraintViolated { quantity: "Initial temperature", .. }));
    }

    #[test]
    fn equal_temperatures_cannot_give_mass() {
        let spec = calorimetry().unwrap();
        let err = solve(
            &spec,
            &fields(&[("q", "100", "J"), ("c", "1", "J/(kg·K)"), ("t1", "20", "°C"), ("t2", "20", "°C")]),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, SolveError::Domain(CfError::DivisionByZero { .. })));
    }

    fn cooling(entries: &[(&str, &str, &str)]) -> f64 {
        solve(&newtons_cooling().unwrap(), &fields(entries), None)
            .unwrap()
            .base_value()
    }

    #[test]
    fn coffee_cools_towards_the_room() {
        // 90 °C coffee in a 20 °C room, k = 0.001/s, after 10 minutes.
        let temp = cooling(&[("ts", "20", "°C"), ("t0", "90", "°C"), ("k", "0.001", "1/s"), ("time", "10", "min")]);
        let expected = 293.15 + 70.0 * (-0.6f64).exp();
        assert!((temp - expected).abs() < 1e-9);

        let text = temp.to_string();
        let t = cooling(&[("temp", &text, "K"), ("ts", "20", "°C"), ("t0", "90", "°C"), ("k", "0.001", "1/s")]);
        assert!((t - 600.0).abs() < 1e-6);
        let k = cooling(&[("temp", &text, "K"), ("ts", "20", "°C"), ("t0", "90", "°C"), ("time", "600", "s")]);
        assert!((k - 0.001).abs() < 1e-12);
        let t0 = cooling(&[("temp", &text, "K"), ("ts", "20", "°C"), ("k", "0.001", "1/s"), ("time", "600", "s")]);
        assert!((t0 - 363.15).abs() < 1e-9);
        let ts = cooling(&[("temp", &text, "K"), ("t0", "90", "°C"), ("k", "0.001", "1/s"), ("time", "600", "s")]);
        assert!((ts - 293.15).abs() < 1e-9);
    }

    #[test]
    fn equilibrium_and_ordering_guards() {
        let spec = newtons_cooling().unwrap();
        let err = solve(
            &spec,
            &fields(&[("temp", "20", "°C"), ("ts", "20", "°C"), ("t0", "90", "°C"), ("k", "0.001", "1/s")]),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, SolveError::Domain(CfError::OutOfRange { .. })));

        let err = solve(
            &spec,
            &fields(&[("temp", "95", "°C"), ("ts", "20", "°C"), ("t0", "90", "°C"), ("k", "0.001", "1/s")]),
            None,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Domain);
    }

    #[test]
    fn zero_time_cannot_give_surroundings() {
        let spec = newtons_cooling().unwrap();
        let err = solve(
            &spec,
            &fields(&[("temp", "90", "°C"), ("t0", "90", "°C"), ("k", "0.001", "1/s"), ("time", "0", "s")]),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, SolveError::Domain(CfError::DivisionByZero { .. })));
    }
}
