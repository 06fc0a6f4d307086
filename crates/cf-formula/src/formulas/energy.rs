//! Mechanical energy.

use cf_core::units::constants::G0_MPS2;
use cf_core::{CfResult, safe_div, safe_sqrt};
use cf_units::Dimension;

use crate::error::SpecResult;
use crate::quantity::QuantityDef;
use crate::spec::{Evaluation, FormulaSpec, Inputs, Rearrangement};

const MASS: QuantityDef = QuantityDef::variable("m", "m", "Mass", Dimension::Mass, "kg").positive();

fn pe_energy(i: &Inputs) -> CfResult<Evaluation> {
    Ok(Evaluation::of(i.get("m")? * i.get("g")? * i.get("h")?))
}

fn pe_mass(i: &Inputs) -> CfResult<Evaluation> {
    let (pe, g, h) = (i.get("pe")?, i.get("g")?, i.get("h")?);
    Ok(Evaluation::of(safe_div(pe, g * h, "g × h")?))
}

fn pe_gravity(i: &Inputs) -> CfResult<Evaluation> {
    let (pe, m, h) = (i.get("pe")?, i.get("m")?, i.get("h")?);
    Ok(Evaluation::of(safe_div(pe, m * h, "m × h")?))
}

fn pe_height(i: &Inputs) -> CfResult<Evaluation> {
    let (pe, m, g) = (i.get("pe")?, i.get("m")?, i.get("g")?);
    Ok(Evaluation::of(safe_div(pe, m * g, "m × g")?))
}

pub fn potential_energy() -> SpecResult<FormulaSpec> {
    FormulaSpec::builder("potential-energy", "Potential Energy", "PE = m × g × h")
        .quantity(QuantityDef::variable("pe", "PE", "Potential energy", Dimension::Energy, "J"))
        .quantity(MASS)
        .quantity(
            QuantityDef::variable("g", "g", "Gravitational acceleration", Dimension::Acceleration, "m/s²")
                .positive()
                .with_default(G0_MPS2),
        )
        .quantity(QuantityDef::variable("h", "h", "Height", Dimension::Length, "m"))
        .rearrangement(Rearrangement::new(
            "pe",
            &["m", "g", "h"],
            "PE = m × g × h",
            "PE = {m} × {g} × {h}",
            pe_energy,
        ))
        .rearrangement(Rearrangement::new(
            "m",
            &["pe", "g", "h"],
            "m = PE / (g × h)",
            "m = {pe} / ({g} × {h})",
            pe_mass,
        ))
        .rearrangement(Rearrangement::new(
            "g",
            &["pe", "m", "h"],
            "g = PE / (m × h)",
            "g = {pe} / ({m} × {h})",
            pe_gravity,
        ))
        .rearrangement(Rearrangement::new(
            "h",
            &["pe", "m", "g"],
            "h = PE / (m × g)",
            "h = {pe} / ({m} × {g})",
            pe_height,
        ))
        .build()
}

fn ke_energy(i: &Inputs) -> CfResult<Evaluation> {
    let (m, v) = (i.get("m")?, i.get("v")?);
    Ok(Evaluation::of(0.5 * m * v * v))
}

fn ke_mass(i: &Inputs) -> CfResult<Evaluation> {
    let (ke, v) = (i.get("ke")?, i.get("v")?);
    Ok(Evaluation::of(safe_div(2.0 * ke, v * v, "velocity")?))
}

fn ke_velocity(i: &Inputs) -> CfResult<Evaluation> {
    let (ke, m) = (i.get("ke")?, i.get("m")?);
    let x = safe_div(2.0 * ke, m, "mass")?;
    Ok(Evaluation::of(safe_sqrt(x, x, "2KE / m")?))
}

pub fn kinetic_energy() -> SpecResult<FormulaSpec> {
    FormulaSpec::builder("kinetic-energy", "Kinetic Energy", "KE = ½mv²")
        .quantity(QuantityDef::variable("ke", "KE", "Kinetic energy", Dimension::Energy, "J").non_negative())
        .quantity(MASS)
        .quantity(QuantityDef::variable("v", "v", "Velocity", Dimension::Velocity, "m/s").non_negative())
        .rearrangement(Rearrangement::new("ke", &["m", "v"], "KE = ½mv²", "KE = ½ × {m} × ({v})²", ke_energy))
        .rearrangement(Rearrangement::new("m", &["ke", "v"], "m = 2KE / v²", "m = 2 × {ke} / ({v})²", ke_mass))
        .rearrangement(Rearrangement::new(
            "v",
            &["ke", "m"],
            "v = √(2KE / m)",
            "v = √(2 × {ke} / {m})",
            ke_velocity,
        ))
        .build()
}
