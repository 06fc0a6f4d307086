//! Density, simple machines and shaft sections.

use std::f64::consts::PI;

use cf_core::{CfError, CfResult, safe_div, safe_root};
use cf_units::Dimension;

use crate::error::SpecResult;
use crate::quantity::QuantityDef;
use crate::spec::{Evaluation, FormulaSpec, Inputs, Rearrangement};

// Density

fn density_rho(i: &Inputs) -> CfResult<Evaluation> {
    Ok(Evaluation::of(safe_div(i.get("m")?, i.get("vol")?, "volume")?))
}

fn density_mass(i: &Inputs) -> CfResult<Evaluation> {
    Ok(Evaluation::of(i.get("rho")? * i.get("vol")?))
}

fn density_volume(i: &Inputs) -> CfResult<Evaluation> {
    Ok(Evaluation::of(safe_div(i.get("m")?, i.get("rho")?, "density")?))
}

pub fn density() -> SpecResult<FormulaSpec> {
    FormulaSpec::builder("density", "Density", "ρ = m / V")
        .quantity(QuantityDef::variable("rho", "ρ", "Density", Dimension::Density, "kg/m³").positive())
        .quantity(QuantityDef::variable("m", "m", "Mass", Dimension::Mass, "kg").positive())
        .quantity(QuantityDef::variable("vol", "V", "Volume", Dimension::Volume, "m³").positive())
        .rearrangement(Rearrangement::new("rho", &["m", "vol"], "ρ = m / V", "ρ = {m} / {vol}", density_rho))
        .rearrangement(Rearrangement::new("m", &["rho", "vol"], "m = ρ × V", "m = {rho} × {vol}", density_mass))
        .rearrangement(Rearrangement::new("vol", &["m", "rho"], "V = m / ρ", "V = {m} / {rho}", density_volume))
        .build()
}

// Mechanical advantage

fn ma_from_forces(i: &Inputs) -> CfResult<Evaluation> {
    Ok(Evaluation::of(safe_div(i.get("f_out")?, i.get("f_in")?, "input force")?))
}

fn ma_from_distances(i: &Inputs) -> CfResult<Evaluation> {
    Ok(Evaluation::of(safe_div(i.get("d_in")?, i.get("d_out")?, "output distance")?))
}

fn ma_output_force(i: &Inputs) -> CfResult<Evaluation> {
    Ok(Evaluation::of(i.get("ma")? * i.get("f_in")?))
}

fn ma_input_force(i: &Inputs) -> CfResult<Evaluation> {
    Ok(Evaluation::of(safe_div(i.get("f_out")?, i.get("ma")?, "mechanical advantage")?))
}

fn ma_input_distance(i: &Inputs) -> CfResult<Evaluation> {
    Ok(Evaluation::of(i.get("ma")? * i.get("d_out")?))
}

fn ma_output_distance(i: &Inputs) -> CfResult<Evaluation> {
    Ok(Evaluation::of(safe_div(i.get("d_in")?, i.get("ma")?, "mechanical advantage")?))
}

pub fn mechanical_advantage() -> SpecResult<FormulaSpec> {
    FormulaSpec::builder(
        "mechanical-advantage",
        "Mechanical Advantage",
        "MA = F_out / F_in = d_in / d_out",
    )
    .quantity(QuantityDef::variable("ma", "MA", "Mechanical advantage", Dimension::Dimensionless, "").positive())
    .quantity(QuantityDef::variable("f_in", "F_in", "Input force", Dimension::Force, "N").positive())
    .quantity(QuantityDef::variable("f_out", "F_out", "Output force", Dimension::Force, "N").positive())
    .quantity(QuantityDef::variable("d_in", "d_in", "Input distance", Dimension::Length, "m").positive())
    .quantity(QuantityDef::variable("d_out", "d_out", "Output distance", Dimension::Length, "m").positive())
    .rearrangement(Rearrangement::new(
        "ma",
        &["f_out", "f_in"],
        "MA = F_out / F_in",
        "MA = {f_out} / {f_in}",
        ma_from_forces,
    ))
    .rearrangement(Rearrangement::new(
        "ma",
        &["d_in", "d_out"],
        "MA = d_in / d_out",
        "MA = {d_in} / {d_out}",
        ma_from_distances,
    ))
    .rearrangement(Rearrangement::new(
        "f_out",
        &["ma", "f_in"],
        "F_out = MA × F_in",
        "F_out = {ma} × {f_in}",
        ma_output_force,
    ))
    .rearrangement(Rearrangement::new(
        "f_in",
        &["ma", "f_out"],
        "F_in = F_out / MA",
        "F_in = {f_out} / {ma}",
        ma_input_force,
    ))
    .rearrangement(Rearrangement::new(
        "d_in",
        &["ma", "d_out"],
        "d_in = MA × d_out",
        "d_in = {ma} × {d_out}",
        ma_input_distance,
    ))
    .rearrangement(Rearrangement::new(
        "d_out",
        &["ma", "d_in"],
        "d_out = d_in / MA",
        "d_out = {d_in} / {ma}",
        ma_output_distance,
    ))
    .build()
}

// Polar moment of inertia

const POLAR: QuantityDef = QuantityDef::variable(
    "j",
    "J",
    "Polar moment of inertia",
    Dimension::SecondMomentOfArea,
    "m⁴",
)
.positive();

const fn length(key: &'static str, symbol: &'static str, name: &'static str) -> QuantityDef {
    QuantityDef::variable(key, symbol, name, Dimension::Length, "m").positive()
}

fn solid_j(r: f64) -> f64 {
    PI * r.powi(4) / 2.0
}

/// Radius whose solid section has polar moment `j`.
fn solid_r(j: f64) -> CfResult<f64> {
    safe_root(2.0 * j / PI, 0.25, "2J / π")
}

fn solid_from_radius(i: &Inputs) -> CfResult<Evaluation> {
    Ok(Evaluation::of(solid_j(i.get("r")?)))
}

fn solid_from_diameter(i: &Inputs) -> CfResult<Evaluation> {
    let r = i.get("d")? / 2.0;
    Ok(Evaluation::of(solid_j(r)).term("r", "d / 2", r, Dimension::Length))
}

fn solid_radius(i: &Inputs) -> CfResult<Evaluation> {
    let r = solid_r(i.get("j")?)?;
    Ok(Evaluation::of(r).extra("Diameter", 2.0 * r, Dimension::Length))
}

fn solid_diameter(i: &Inputs) -> CfResult<Evaluation> {
    let r = solid_r(i.get("j")?)?;
    Ok(Evaluation::of(2.0 * r)
        .term("r", "(2J / π)^¼", r, Dimension::Length))
}

pub fn polar_moment_solid() -> SpecResult<FormulaSpec> {
    FormulaSpec::builder(
        "polar-moment-solid",
        "Polar Moment of Inertia (solid shaft)",
        "J = πr⁴ / 2",
    )
    .quantity(POLAR)
    .quantity(length("r", "r", "Radius"))
    .quantity(length("d", "d", "Diameter"))
    .rearrangement(Rearrangement::new("j", &["r"], "J = πr⁴ / 2", "J = π × ({r})⁴ / 2", solid_from_radius))
    .rearrangement(Rearrangement::new(
        "j",
        &["d"],
        "J = π(d/2)⁴ / 2",
        "J = π × ({r})⁴ / 2",
        solid_from_diameter,
    ))
    .rearrangement(Rearrangement::new("r", &["j"], "r = (2J / π)^¼", "r = (2 × {j} / π)^¼", solid_radius))
    .rearrangement(Rearrangement::new(
        "d",
        &["j"],
        "d = 2(2J / π)^¼",
        "d = 2 × {r}",
        solid_diameter,
    ))
    .build()
}

/// `π(R⁴ − r⁴) / 2`, rejecting an inner radius that is not inside the outer one.
fn hollow_j(outer: f64, inner: f64) -> CfResult<f64> {
    if inner >= outer {
        return Err(CfError::OutOfRange {
            what: "inner radius must be less than outer radius",
        });
    }
    Ok(PI * (outer.powi(4) - inner.powi(4)) / 2.0)
}

fn hollow_outer(j: f64, inner: f64) -> CfResult<f64> {
    safe_root(2.0 * j / PI + inner.powi(4), 0.25, "2J / π + r⁴")
}

fn hollow_inner(j: f64, outer: f64) -> CfResult<f64> {
    let rest = outer.powi(4) - 2.0 * j / PI;
    if rest <= 0.0 {
        return Err(CfError::OutOfRange {
            what: "polar moment is too large for a hollow section with this outer radius",
        });
    }
    safe_root(rest, 0.25, "R⁴ − 2J / π")
}

fn hollow_from_radii(i: &Inputs) -> CfResult<Evaluation> {
    Ok(Evaluation::of(hollow_j(i.get("ro")?, i.get("ri")?)?))
}

fn hollow_from_diameters(i: &Inputs) -> CfResult<Evaluation> {
    let (outer, inner) = (i.get("d_o")? / 2.0, i.get("d_i")? / 2.0);
    Ok(Evaluation::of(hollow_j(outer, inner)?)
        .term("R", "D_o / 2", outer, Dimension::Length)
        .term("r", "D_i / 2", inner, Dimension::Length))
}

fn hollow_outer_radius(i: &Inputs) -> CfResult<Evaluation> {
    Ok(Evaluation::of(hollow_outer(i.get("j")?, i.get("ri")?)?))
}

fn hollow_inner_radius(i: &Inputs) -> CfResult<Evaluation> {
    Ok(Evaluation::of(hollow_inner(i.get("j")?, i.get("ro")?)?))
}

fn hollow_outer_diameter(i: &Inputs) -> CfResult<Evaluation> {
    let inner = i.get("d_i")? / 2.0;
    Ok(Evaluation::of(2.0 * hollow_outer(i.get("j")?, inner)?)
        .term("r", "D_i / 2", inner, Dimension::Length))
}

fn hollow_inner_diameter(i: &Inputs) -> CfResult<Evaluation> {
    let outer = i.get("d_o")? / 2.0;
    Ok(Evaluation::of(2.0 * hollow_inner(i.get("j")?, outer)?)
        .term("R", "D_o / 2", outer, Dimension::Length))
}

pub fn polar_moment_hollow() -> SpecResult<FormulaSpec> {
    FormulaSpec::builder(
        "polar-moment-hollow",
        "Polar Moment of Inertia (hollow shaft)",
        "J = π(R⁴ − r⁴) / 2",
    )
    .quantity(POLAR)
    .quantity(length("ro", "R", "Outer radius"))
    .quantity(length("ri", "r", "Inner radius"))
    .quantity(length("d_o", "D_o", "Outer diameter"))
    .quantity(length("d_i", "D_i", "Inner diameter"))
    .rearrangement(Rearrangement::new(
        "j",
        &["ro", "ri"],
        "J = π(R⁴ − r⁴) / 2",
        "J = π × (({ro})⁴ − ({ri})⁴) / 2",
        hollow_from_radii,
    ))
    .rearrangement(Rearrangement::new(
        "j",
        &["d_o", "d_i"],
        "J = π((D_o/2)⁴ − (D_i/2)⁴) / 2",
        "J = π × (({R})⁴ − ({r})⁴) / 2",
        hollow_from_diameters,
    ))
    .rearrangement(Rearrangement::new(
        "ro",
        &["j", "ri"],
        "R = (2J / π + r⁴)^¼",
        "R = (2 × {j} / π + ({ri})⁴)^¼",
        hollow_outer_radius,
    ))
    .rearrangement(Rearrangement::new(
        "ri",
        &["j", "ro"],
        "r = (R⁴ − 2J / π)^¼",
        "r = (({ro})⁴ − 2 × {j} / π)^¼",
        hollow_inner_radius,
    ))
    .rearrangement(Rearrangement::new(
        "d_o",
        &["j", "d_i"],
        "D_o = 2(2J / π + (D_i/2)⁴)^¼",
        "D_o = 2 × (2 × {j} / π + ({r})⁴)^¼",
        hollow_outer_diameter,
    ))
    .rearrangement(Rearrangement::new(
        "d_i",
        &["j", "d_o"],
        "D_i = 2((D_o/2)⁴ − 2J / π)^¼",
        "D_i = 2 × (({R})⁴ − 2 × {j} / π)^¼",
        hollow_inner_diameter,
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
    fn density_of_water() {
        let spec = density().unwrap();
        let sol = solve(&spec, &fields(&[("m", "1", "kg"), ("vol", "1", "L")]), None).unwrap();
        assert!((sol.value - 1000.0).abs() < 1e-9);
        let sol = solve(&spec, &fields(&[("rho", "1", "g/cm³"), ("vol", "2", "L")]), None).unwrap();
        assert!((sol.value - 2.0).abs() < 1e-12);
    }

    #[test]
    fn mechanical_advantage_groups() {
        let spec = mechanical_advantage().unwrap();
        let sol = solve(&spec, &fields(&[("f_in", "50", "N"), ("f_out", "200", "N")]), None).unwrap();
        assert_eq!(sol.value, 4.0);
        let sol = solve(&spec, &fields(&[("d_in", "3", "m"), ("d_out", "50", "cm")]), None).unwrap();
        assert!((sol.value - 6.0).abs() < 1e-12);
        let sol = solve(&spec, &fields(&[("ma", "4", ""), ("f_in", "50", "N")]), None).unwrap();
        assert_eq!(sol.target.key, "f_out");
        assert_eq!(sol.value, 200.0);
    }

    #[test]
    fn explicit_target_prefers_forces() {
        let spec = mechanical_advantage().unwrap();
        let entries = [("f_in", "50", "N"), ("f_out", "200", "N"), ("d_in", "3", "m"), ("d_out", "1", "m")];
        let sol = solve(&spec, &fields(&entries), Some("ma")).unwrap();
        assert_eq!(sol.value, 4.0);
        // Both groups filled in auto mode fits no single rearrangement.
        let err = solve(&spec, &fields(&entries), None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Completeness);
    }

    #[test]
    fn solid_shaft_radius_and_diameter_agree() {
        let spec = polar_moment_solid().unwrap();
        let from_r = solve(&spec, &fields(&[("r", "2", "cm")]), None).unwrap();
        let from_d = solve(&spec, &fields(&[("d", "4", "cm")]), None).unwrap();
        assert!((from_r.base_value() - PI * 0.02f64.powi(4) / 2.0).abs() < 1e-18);
        assert!((from_r.base_value() - from_d.base_value()).abs() < 1e-18);
    }

    #[test]
    fn solid_shaft_needs_mode_when_only_j_is_given() {
        let spec = polar_moment_solid().unwrap();
        let j = fields(&[("j", "1e-6", "m⁴")]);
        assert!(matches!(solve(&spec, &j, None).unwrap_err(), SolveError::Ambiguous { .. }));
        let r = solve(&spec, &j, Some("r")).unwrap().value;
        let d = solve(&spec, &j, Some("d")).unwrap().value;
        assert!((d - 2.0 * r).abs() < 1e-12);
        assert!((solid_j(r) - 1e-6).abs() < 1e-18);
    }

    #[test]
    fn hollow_shaft_round_trip() {
        let spec = polar_moment_hollow().unwrap();
        let sol = solve(&spec, &fields(&[("ro", "5", "cm"), ("ri", "3", "cm")]), None).unwrap();
        let j = sol.base_value();
        assert!((j - PI * (0.05f64.powi(4) - 0.03f64.powi(4)) / 2.0).abs() < 1e-15);
        let text = j.to_string();
        let ro = solve(&spec, &fields(&[("j", &text, "m⁴"), ("ri", "0.03", "m")]), None).unwrap();
        assert!((ro.base_value() - 0.05).abs() < 1e-12);
        let ri = solve(&spec, &fields(&[("j", &text, "m⁴"), ("ro", "0.05", "m")]), None).unwrap();
        assert!((ri.base_value() - 0.03).abs() < 1e-12);
        let di = solve(&spec, &fields(&[("j", &text, "m⁴"), ("d_o", "0.1", "m")]), None).unwrap();
        assert!((di.base_value() - 0.06).abs() < 1e-12);
    }

    #[test]
    fn hollow_inner_must_be_smaller() {
        let spec = polar_moment_hollow().unwrap();
        let err = solve(&spec, &fields(&[("ro", "3", "cm"), ("ri", "5", "cm")]), None).unwrap_err();
        assert!(matches!(err, SolveError::Domain(CfError::OutOfRange { .. })));
        let err = solve(&spec, &fields(&[("j", "1", "m⁴"), ("ro", "1", "cm")]), None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Domain);
    }
}
