//! Compressible flow: Mach number in dry air.

use cf_core::units::constants::{GAMMA_AIR, R_AIR};
use cf_core::{CfResult, safe_div, safe_sqrt};
use cf_units::Dimension;

use crate::error::SpecResult;
use crate::quantity::QuantityDef;
use crate::spec::{Evaluation, FormulaSpec, Inputs, Rearrangement};

/// Speed of sound in dry air at absolute temperature `t`.
fn sound_speed(t: f64) -> CfResult<f64> {
    let x = GAMMA_AIR * R_AIR * t;
    safe_sqrt(x, x, "γRT")
}

fn air_temperature(c: f64) -> CfResult<f64> {
    safe_div(c * c, GAMMA_AIR * R_AIR, "γR")
}

fn mach_from_sound_speed(i: &Inputs) -> CfResult<Evaluation> {
    Ok(Evaluation::of(safe_div(i.get("v")?, i.get("c")?, "speed of sound")?))
}

fn mach_from_temperature(i: &Inputs) -> CfResult<Evaluation> {
    let c = sound_speed(i.get("temp")?)?;
    Ok(Evaluation::of(safe_div(i.get("v")?, c, "speed of sound")?).term("c", "√(γRT)", c, Dimension::Velocity))
}

fn velocity_from_sound_speed(i: &Inputs) -> CfResult<Evaluation> {
    Ok(Evaluation::of(i.get("mach")? * i.get("c")?))
}

fn velocity_from_temperature(i: &Inputs) -> CfResult<Evaluation> {
    let c = sound_speed(i.get("temp")?)?;
    Ok(Evaluation::of(i.get("mach")? * c).term("c", "√(γRT)", c, Dimension::Velocity))
}

fn sound_speed_from_flow(i: &Inputs) -> CfResult<Evaluation> {
    let c = safe_div(i.get("v")?, i.get("mach")?, "Mach number")?;
    Ok(Evaluation::of(c).extra("Equivalent air temperature", air_temperature(c)?, Dimension::Temperature))
}

fn sound_speed_from_temperature(i: &Inputs) -> CfResult<Evaluation> {
    Ok(Evaluation::of(sound_speed(i.get("temp")?)?))
}

fn temperature_from_sound_speed(i: &Inputs) -> CfResult<Evaluation> {
    Ok(Evaluation::of(air_temperature(i.get("c")?)?))
}

pub fn mach_number() -> SpecResult<FormulaSpec> {
    FormulaSpec::builder("mach-number", "Mach Number", "M = v / c, c = √(γRT)")
        .quantity(QuantityDef::variable("mach", "M", "Mach number", Dimension::Dimensionless, "").positive())
        .quantity(QuantityDef::variable("v", "v", "Velocity", Dimension::Velocity, "m/s").positive())
        .quantity(QuantityDef::variable("c", "c", "Speed of sound", Dimension::Velocity, "m/s").positive())
        .quantity(
            QuantityDef::variable("temp", "T", "Air temperature", Dimension::Temperature, "K")
                .absolute_temperature(),
        )
        .rearrangement(Rearrangement::new("mach", &["v", "c"], "M = v / c", "M = {v} / {c}", mach_from_sound_speed))
        .rearrangement(Rearrangement::new(
            "mach",
            &["v", "temp"],
            "M = v / √(γRT)",
            "M = {v} / {c}",
            mach_from_temperature,
        ))
        .rearrangement(Rearrangement::new(
            "v",
            &["mach", "c"],
            "v = M × c",
            "v = {mach} × {c}",
            velocity_from_sound_speed,
        ))
        .rearrangement(Rearrangement::new(
            "v",
            &["mach", "temp"],
            "v = M × √(γRT)",
            "v = {mach} × {c}",
            velocity_from_temperature,
        ))
        .rearrangement(Rearrangement::new("c", &["v", "mach"], "c = v / M", "c = {v} / {mach}", sound_speed_from_flow))
        .rearrangement(Rearrangement::new(
            "c",
            &["temp"],
            "c = √(γRT)",
            "c = √(1.4 × 287 × {temp})",
            sound_speed_from_temperature,
        ))
        .rearrangement(Rearrangement::new(
            "temp",
            &["c"],
            "T = c² / (γR)",
            "T = ({c})² / (1.4 × 287)",
            temperature_from_sound_speed,
        ))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{Field, solve};

    fn fields(entries: &[(&str, &str, &str)]) -> Vec<Field> {
        entries.iter().map(|&(k, v, u)| Field::new(k, v, u)).collect()
    }

    #[test]
    fn sound_speed_at_15c() {
        let spec = mach_number().unwrap();
        let sol = solve(&spec, &fields(&[("temp", "15", "°C")]), None).unwrap();
        assert_eq!(sol.target.key, "c");
        assert!((sol.value - 340.2627).abs() < 1e-3);
    }

    #[test]
    fn mach_from_temperature_shows_sound_speed() {
        let spec = mach_number().unwrap();
        let sol = solve(&spec, &fields(&[("v", "680.6", "m/s"), ("temp", "288.15", "K")]), None).unwrap();
        assert!((sol.value - 2.0).abs() < 1e-3);
        assert_eq!(sol.evaluation.terms[0].symbol, "c");
    }

    #[test]
    fn sound_speed_from_velocity_and_mach() {
        let spec = mach_number().unwrap();
        let sol = solve(&spec, &fields(&[("v", "686", "m/s"), ("mach", "2", "")]), None).unwrap();
        assert_eq!(sol.value, 343.0);
        let t = sol.evaluation.extras[0].value;
        assert!((t - 343.0 * 343.0 / (1.4 * 287.0)).abs() < 1e-9);
    }

    #[test]
    fn temperature_round_trip() {
        let spec = mach_number().unwrap();
        let sol = solve(&spec, &fields(&[("c", "343", "m/s"), ("temp", "", "°C")]), None).unwrap();
        assert!((sol.base_value() - 343.0 * 343.0 / (1.4 * 287.0)).abs() < 1e-9);
        assert_eq!(sol.unit.symbol, "°C");
    }
}
