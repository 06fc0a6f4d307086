//! Volumetric flow and pipe head loss.

use std::f64::consts::{LN_10, PI};

use cf_core::units::constants::{
    G0_MPS2, HAZEN_WILLIAMS_C_STEEL, HAZEN_WILLIAMS_DIAMETER_EXP, HAZEN_WILLIAMS_FLOW_EXP,
    HAZEN_WILLIAMS_K_SI, LAMINAR_REYNOLDS_LIMIT, STEEL_ROUGHNESS_MM, WATER_DENSITY, WATER_VISCOSITY,
};
use cf_core::{CfResult, safe_div, safe_ln, safe_root, safe_sqrt};
use cf_units::Dimension;

use crate::error::SpecResult;
use crate::quantity::QuantityDef;
use crate::spec::{Evaluation, FormulaSpec, Inputs, Rearrangement};

const FLOW: QuantityDef =
    QuantityDef::variable("q", "Q", "Flow rate", Dimension::FlowRate, "m³/s").positive();
const VELOCITY: QuantityDef =
    QuantityDef::variable("v", "v", "Velocity", Dimension::Velocity, "m/s").positive();
const AREA: QuantityDef =
    QuantityDef::variable("a", "A", "Cross-sectional area", Dimension::Area, "m²").positive();
const DIAMETER: QuantityDef =
    QuantityDef::variable("d", "D", "Pipe diameter", Dimension::Length, "m").positive();

// Flow rate

fn flow_from_area(i: &Inputs) -> CfResult<Evaluation> {
    Ok(Evaluation::of(i.get("a")? * i.get("v")?))
}

fn flow_from_volume(i: &Inputs) -> CfResult<Evaluation> {
    Ok(Evaluation::of(safe_div(i.get("vol")?, i.get("t")?, "time")?))
}

fn flow_area(i: &Inputs) -> CfResult<Evaluation> {
    Ok(Evaluation::of(safe_div(i.get("q")?, i.get("v")?, "velocity")?))
}

fn flow_velocity(i: &Inputs) -> CfResult<Evaluation> {
    Ok(Evaluation::of(safe_div(i.get("q")?, i.get("a")?, "area")?))
}

fn flow_volume(i: &Inputs) -> CfResult<Evaluation> {
    Ok(Evaluation::of(i.get("q")? * i.get("t")?))
}

fn flow_time(i: &Inputs) -> CfResult<Evaluation> {
    Ok(Evaluation::of(safe_div(i.get("vol")?, i.get("q")?, "flow rate")?))
}

pub fn flow_rate() -> SpecResult<FormulaSpec> {
    FormulaSpec::builder("flow-rate", "Flow Rate", "Q = A × v = V / t")
        .quantity(FLOW)
        .quantity(AREA)
        .quantity(VELOCITY)
        .quantity(QuantityDef::variable("vol", "V", "Volume", Dimension::Volume, "m³").positive())
        .quantity(QuantityDef::variable("t", "t", "Time", Dimension::Time, "s").positive())
        .rearrangement(Rearrangement::new("q", &["a", "v"], "Q = A × v", "Q = {a} × {v}", flow_from_area))
        .rearrangement(Rearrangement::new("q", &["vol", "t"], "Q = V / t", "Q = {vol} / {t}", flow_from_volume))
        .rearrangement(Rearrangement::new("a", &["q", "v"], "A = Q / v", "A = {q} / {v}", flow_area))
        .rearrangement(Rearrangement::new("v", &["q", "a"], "v = Q / A", "v = {q} / {a}", flow_velocity))
        .rearrangement(Rearrangement::new("vol", &["q", "t"], "V = Q × t", "V = {q} × {t}", flow_volume))
        .rearrangement(Rearrangement::new("t", &["q", "vol"], "t = V / Q", "t = {vol} / {q}", flow_time))
        .build()
}

// Pipe flow

fn circle_area(d: f64) -> f64 {
    PI * (d / 2.0).powi(2)
}

fn pipe_flow_from_area(i: &Inputs) -> CfResult<Evaluation> {
    Ok(Evaluation::of(i.get("a")? * i.get("v")?))
}

fn pipe_flow_from_diameter(i: &Inputs) -> CfResult<Evaluation> {
    let area = circle_area(i.get("d")?);
    Ok(Evaluation::of(area * i.get("v")?).term("A", "π(D/2)²", area, Dimension::Area))
}

fn pipe_velocity_from_area(i: &Inputs) -> CfResult<Evaluation> {
    Ok(Evaluation::of(safe_div(i.get("q")?, i.get("a")?, "area")?))
}

fn pipe_velocity_from_diameter(i: &Inputs) -> CfResult<Evaluation> {
    let area = circle_area(i.get("d")?);
    Ok(Evaluation::of(safe_div(i.get("q")?, area, "pipe area")?).term("A", "π(D/2)²", area, Dimension::Area))
}

fn pipe_diameter(i: &Inputs) -> CfResult<Evaluation> {
    let area = safe_div(i.get("q")?, i.get("v")?, "velocity")?;
    let d = 2.0 * safe_sqrt(area / PI, area, "A / π")?;
    Ok(Evaluation::of(d).term("A", "Q / v", area, Dimension::Area))
}

fn pipe_area(i: &Inputs) -> CfResult<Evaluation> {
    Ok(Evaluation::of(circle_area(i.get("d")?)))
}

pub fn pipe_flow() -> SpecResult<FormulaSpec> {
    FormulaSpec::builder("pipe-flow", "Pipe Flow", "Q = A × v, A = π(D/2)²")
        .quantity(FLOW)
        .quantity(VELOCITY)
        .quantity(DIAMETER)
        .quantity(AREA)
        .rearrangement(Rearrangement::new("q", &["a", "v"], "Q = A × v", "Q = {a} × {v}", pipe_flow_from_area))
        .rearrangement(Rearrangement::new(
            "q",
            &["d", "v"],
            "Q = π(D/2)² × v",
            "Q = {A} × {v}",
            pipe_flow_from_diameter,
        ))
        .rearrangement(Rearrangement::new(
            "v",
            &["q", "a"],
            "v = Q / A",
            "v = {q} / {a}",
            pipe_velocity_from_area,
        ))
        .rearrangement(Rearrangement::new(
            "v",
            &["q", "d"],
            "v = Q / (π(D/2)²)",
            "v = {q} / {A}",
            pipe_velocity_from_diameter,
        ))
        .rearrangement(Rearrangement::new(
            "d",
            &["q", "v"],
            "D = 2√(A / π), A = Q / v",
            "D = 2 × √({A} / π)",
            pipe_diameter,
        ))
        .rearrangement(Rearrangement::new("a", &["d"], "A = π(D/2)²", "A = π × ({d} / 2)²", pipe_area))
        .build()
}

// Darcy–Weisbach

/// Reynolds number and Darcy friction factor: `64/Re` when laminar,
/// Swamee–Jain otherwise.
fn friction_factor(i: &Inputs) -> CfResult<(f64, f64)> {
    let (rho, mu, eps) = (i.get("rho")?, i.get("mu")?, i.get("eps")?);
    let (d, v) = (i.get("d")?, i.get("v")?);
    let re = safe_div(rho * v * d, mu, "dynamic viscosity")?;
    if re < LAMINAR_REYNOLDS_LIMIT {
        return Ok((re, safe_div(64.0, re, "Reynolds number")?));
    }
    let arg = safe_div(eps, 3.7 * d, "pipe diameter")? + safe_div(5.74, re.powf(0.9), "Reynolds number")?;
    let log10 = safe_ln(arg, "Swamee–Jain argument")? / LN_10;
    Ok((re, safe_div(0.25, log10 * log10, "Swamee–Jain logarithm")?))
}

fn dw_head_loss(i: &Inputs) -> CfResult<Evaluation> {
    let (l, d, v, g) = (i.get("l")?, i.get("d")?, i.get("v")?, i.get("g")?);
    let mut terms = Vec::new();
    let f = match i.opt("f") {
        Some(f) => f,
        None => {
            let (re, f) = friction_factor(i)?;
            terms.push(("Re", "ρvD / μ", re));
            terms.push(("f", "64/Re or Swamee–Jain", f));
            f
        }
    };
    let hf = f * safe_div(l, d, "pipe diameter")? * v * v / (2.0 * g);
    let pressure = i.get("rho")? * g * hf;
    let eval = terms
        .into_iter()
        .fold(Evaluation::of(hf), |e, (symbol, expr, value)| {
            e.term(symbol, expr, value, Dimension::Dimensionless)
        });
    Ok(eval.extra("Pressure loss", pressure, Dimension::Pressure))
}

fn dw_friction(i: &Inputs) -> CfResult<Evaluation> {
    let (hf, l, d, v, g) = (i.get("hf")?, i.get("l")?, i.get("d")?, i.get("v")?, i.get("g")?);
    Ok(Evaluation::of(safe_div(hf * d * 2.0 * g, l * v * v, "L × v²")?))
}

fn dw_length(i: &Inputs) -> CfResult<Evaluation> {
    let (hf, f, d, v, g) = (i.get("hf")?, i.get("f")?, i.get("d")?, i.get("v")?, i.get("g")?);
    Ok(Evaluation::of(safe_div(hf * d * 2.0 * g, f * v * v, "f × v²")?))
}

fn dw_diameter(i: &Inputs) -> CfResult<Evaluation> {
    let (hf, f, l, v, g) = (i.get("hf")?, i.get("f")?, i.get("l")?, i.get("v")?, i.get("g")?);
    Ok(Evaluation::of(safe_div(f * l * v * v, 2.0 * g * hf, "2g × h_f")?))
}

fn dw_velocity(i: &Inputs) -> CfResult<Evaluation> {
    let (hf, f, l, d, g) = (i.get("hf")?, i.get("f")?, i.get("l")?, i.get("d")?, i.get("g")?);
    let x = safe_div(2.0 * g * hf * d, f * l, "f × L")?;
    Ok(Evaluation::of(safe_sqrt(x, x, "2g·h_f·D / (f·L)")?))
}

const DW_OPTIONAL: &[&str] = &["f", "rho", "mu", "eps", "g"];

pub fn darcy_weisbach() -> SpecResult<FormulaSpec> {
    FormulaSpec::builder("darcy-weisbach", "Darcy–Weisbach Head Loss", "h_f = f (L/D) v² / 2g")
        .quantity(QuantityDef::variable("hf", "h_f", "Head loss", Dimension::Length, "m").positive())
        .quantity(QuantityDef::variable("f", "f", "Friction factor", Dimension::Dimensionless, "").positive())
        .quantity(QuantityDef::variable("l", "L", "Pipe length", Dimension::Length, "m").positive())
        .quantity(DIAMETER)
        .quantity(VELOCITY)
        .quantity(
            QuantityDef::parameter("rho", "ρ", "Fluid density", Dimension::Density, "kg/m³")
                .positive()
                .with_default(WATER_DENSITY),
        )
        .quantity(
            QuantityDef::parameter("mu", "μ", "Dynamic viscosity", Dimension::DynamicViscosity, "Pa·s")
                .positive()
                .with_default(WATER_VISCOSITY),
        )
        .quantity(
            QuantityDef::parameter("eps", "ε", "Pipe roughness", Dimension::Length, "mm")
                .non_negative()
                .with_default(STEEL_ROUGHNESS_MM),
        )
        .quantity(
            QuantityDef::parameter("g", "g", "Gravitational acceleration", Dimension::Acceleration, "m/s²")
                .positive()
                .with_default(G0_MPS2),
        )
        .rearrangement(
            Rearrangement::new(
                "hf",
                &["l", "d", "v"],
                "h_f = f (L/D) v² / 2g",
                "h_f = {f} × ({l} / {d}) × ({v})² / (2 × {g})",
                dw_head_loss,
            )
            .with_optional(DW_OPTIONAL),
        )
        .rearrangement(
            Rearrangement::new(
                "f",
                &["hf", "l", "d", "v"],
                "f = 2g·h_f·D / (L·v²)",
                "f = 2 × {g} × {hf} × {d} / ({l} × ({v})²)",
                dw_friction,
            )
            .with_optional(&["g"]),
        )
        .rearrangement(
            Rearrangement::new(
                "l",
                &["hf", "f", "d", "v"],
                "L = 2g·h_f·D / (f·v²)",
                "L = 2 × {g} × {hf} × {d} / ({f} × ({v})²)",
                dw_length,
            )
            .with_optional(&["g"]),
        )
        .rearrangement(
            Rearrangement::new(
                "d",
                &["hf", "f", "l", "v"],
                "D = f·L·v² / (2g·h_f)",
                "D = {f} × {l} × ({v})² / (2 × {g} × {hf})",
                dw_diameter,
            )
            .with_optional(&["g"]),
        )
        .rearrangement(
            Rearrangement::new(
                "v",
                &["hf", "f", "l", "d"],
                "v = √(2g·h_f·D / (f·L))",
                "v = √(2 × {g} × {hf} × {d} / ({f} × {l}))",
                dw_velocity,
            )
            .with_optional(&["g"]),
        )
        .build()
}

// Hazen–Williams

fn hw_head_loss(i: &Inputs) -> CfResult<Evaluation> {
    let (l, q, c, d) = (i.get("l")?, i.get("q")?, i.get("c")?, i.get("d")?);
    let den = c.powf(HAZEN_WILLIAMS_FLOW_EXP) * d.powf(HAZEN_WILLIAMS_DIAMETER_EXP);
    Ok(Evaluation::of(safe_div(
        HAZEN_WILLIAMS_K_SI * l * q.powf(HAZEN_WILLIAMS_FLOW_EXP),
        den,
        "C^1.852 × D^4.8704",
    )?))
}

fn hw_length(i: &Inputs) -> CfResult<Evaluation> {
    let (hf, q, c, d) = (i.get("hf")?, i.get("q")?, i.get("c")?, i.get("d")?);
    let num = hf * c.powf(HAZEN_WILLIAMS_FLOW_EXP) * d.powf(HAZEN_WILLIAMS_DIAMETER_EXP);
    Ok(Evaluation::of(safe_div(
        num,
        HAZEN_WILLIAMS_K_SI * q.powf(HAZEN_WILLIAMS_FLOW_EXP),
        "Q^1.852",
    )?))
}

fn hw_flow(i: &Inputs) -> CfResult<Evaluation> {
    let (hf, l, c, d) = (i.get("hf")?, i.get("l")?, i.get("c")?, i.get("d")?);
    let num = hf * c.powf(HAZEN_WILLIAMS_FLOW_EXP) * d.powf(HAZEN_WILLIAMS_DIAMETER_EXP);
    let x = safe_div(num, HAZEN_WILLIAMS_K_SI * l, "pipe length")?;
    Ok(Evaluation::of(safe_root(x, 1.0 / HAZEN_WILLIAMS_FLOW_EXP, "Q^1.852")?))
}

fn hw_coefficient(i: &Inputs) -> CfResult<Evaluation> {
    let (hf, l, q, d) = (i.get("hf")?, i.get("l")?, i.get("q")?, i.get("d")?);
    let num = HAZEN_WILLIAMS_K_SI * l * q.powf(HAZEN_WILLIAMS_FLOW_EXP);
    let x = safe_div(num, hf * d.powf(HAZEN_WILLIAMS_DIAMETER_EXP), "h_f × D^4.8704")?;
    Ok(Evaluation::of(safe_root(x, 1.0 / HAZEN_WILLIAMS_FLOW_EXP, "C^1.852")?))
}

fn hw_diameter(i: &Inputs) -> CfResult<Evaluation> {
    let (hf, l, q, c) = (i.get("hf")?, i.get("l")?, i.get("q")?, i.get("c")?);
    let num = HAZEN_WILLIAMS_K_SI * l * q.powf(HAZEN_WILLIAMS_FLOW_EXP);
    let x = safe_div(num, hf * c.powf(HAZEN_WILLIAMS_FLOW_EXP), "h_f × C^1.852")?;
    Ok(Evaluation::of(safe_root(x, 1.0 / HAZEN_WILLIAMS_DIAMETER_EXP, "D^4.8704")?))
}

pub fn hazen_williams() -> SpecResult<FormulaSpec> {
    FormulaSpec::builder(
        "hazen-williams",
        "Hazen–Williams Head Loss",
        "h_f = 10.67 L Q^1.852 / (C^1.852 D^4.8704)",
    )
    .quantity(QuantityDef::variable("hf", "h_f", "Head loss", Dimension::Length, "m").positive())
    .quantity(QuantityDef::variable("l", "L", "Pipe length", Dimension::Length, "m").positive())
    .quantity(FLOW)
    .quantity(
        QuantityDef::variable("c", "C", "Roughness coefficient", Dimension::Dimensionless, "")
            .positive()
            .with_default(HAZEN_WILLIAMS_C_STEEL),
    )
    .quantity(DIAMETER)
    .rearrangement(Rearrangement::new(
        "hf",
        &["l", "q", "c", "d"],
        "h_f = 10.67 L Q^1.852 / (C^1.852 D^4.8704)",
        "h_f = 10.67 × {l} × ({q})^1.852 / (({c})^1.852 × ({d})^4.8704)",
        hw_head_loss,
    ))
    .rearrangement(Rearrangement::new(
        "l",
        &["hf", "q", "c", "d"],
        "L = h_f C^1.852 D^4.8704 / (10.67 Q^1.852)",
        "L = {hf} × ({c})^1.852 × ({d})^4.8704 / (10.67 × ({q})^1.852)",
        hw_length,
    ))
    .rearrangement(Rearrangement::new(
        "q",
        &["hf", "l", "c", "d"],
        "Q = (h_f C^1.852 D^4.8704 / (10.67 L))^(1/1.852)",
        "Q = ({hf} × ({c})^1.852 × ({d})^4.8704 / (10.67 × {l}))^(1/1.852)",
        hw_flow,
    ))
    .rearrangement(Rearrangement::new(
        "c",
        &["hf", "l", "q", "d"],
        "C = (10.67 L Q^1.852 / (h_f D^4.8704))^(1/1.852)",
        "C = (10.67 × {l} × ({q})^1.852 / ({hf} × ({d})^4.8704))^(1/1.852)",
        hw_coefficient,
    ))
    .rearrangement(Rearrangement::new(
        "d",
        &["hf", "l", "q", "c"],
        "D = (10.67 L Q^1.852 / (h_f C^1.852))^(1/4.8704)",
        "D = (10.67 × {l} × ({q})^1.852 / ({hf} × ({c})^1.852))^(1/4.8704)",
        hw_diameter,
    ))
    .build()
}
