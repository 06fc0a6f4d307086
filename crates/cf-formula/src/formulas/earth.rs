//! Earth curvature: drop, horizon distance and hidden height.
//!
//! The radius is a parameter preset to the mean Earth radius, so the same
//! formulas work for other spheres.

use cf_core::units::constants::EARTH_RADIUS_KM;
use cf_core::{CfError, CfResult, safe_div, safe_sqrt};
use cf_units::Dimension;

use crate::error::SpecResult;
use crate::quantity::QuantityDef;
use crate::spec::{Evaluation, FormulaSpec, Inputs, Rearrangement};

const RADIUS: QuantityDef =
    QuantityDef::parameter("r", "R", "Earth radius", Dimension::Length, "km")
        .positive()
        .with_default(EARTH_RADIUS_KM);

/// `√(2Rh + h²)`: distance to the horizon for an eye at height `h`.
fn horizon(r: f64, h: f64) -> CfResult<f64> {
    let x = 2.0 * r * h + h * h;
    safe_sqrt(x, x, "2Rh + h²")
}

/// Inverse of `horizon`, written as `d² / (R + √(R² + d²))` to avoid cancelling `R`.
fn eye_height(r: f64, d: f64) -> CfResult<f64> {
    let root = safe_sqrt(r * r + d * d, r * r, "R² + d²")?;
    safe_div(d * d, r + root, "R + √(R² + d²)")
}

// Curvature drop

fn drop_from_distance(i: &Inputs) -> CfResult<Evaluation> {
    let (r, d) = (i.get("r")?, i.get("d")?);
    if d > 2.0 * r {
        return Err(CfError::OutOfRange {
            what: "distance is larger than the Earth's diameter",
        });
    }
    let drop = if d >= r {
        r
    } else {
        r - safe_sqrt(r * r - d * d, r * r, "R² − d²")?
    };
    let approx = safe_div(d * d, 2.0 * r, "Earth radius")?;
    Ok(Evaluation::of(drop).extra("Small-angle approximation d²/(2R)", approx, Dimension::Length))
}

fn distance_from_drop(i: &Inputs) -> CfResult<Evaluation> {
    let (r, h) = (i.get("r")?, i.get("drop")?);
    if h > r {
        return Err(CfError::OutOfRange {
            what: "curvature drop cannot exceed the Earth radius",
        });
    }
    let x = 2.0 * r * h - h * h;
    Ok(Evaluation::of(safe_sqrt(x, x, "2Rh − h²")?))
}

pub fn curvature_drop() -> SpecResult<FormulaSpec> {
    FormulaSpec::builder("earth-curvature-drop", "Earth Curvature Drop", "h = R − √(R² − d²)")
        .quantity(QuantityDef::variable("drop", "h", "Curvature drop", Dimension::Length, "m").non_negative())
        .quantity(QuantityDef::variable("d", "d", "Distance", Dimension::Length, "km").non_negative())
        .quantity(RADIUS)
        .rearrangement(
            Rearrangement::new(
                "drop",
                &["d"],
                "h = R − √(R² − d²)",
                "h = {r} − √(({r})² − ({d})²)",
                drop_from_distance,
            )
            .with_optional(&["r"]),
        )
        .rearrangement(
            Rearrangement::new(
                "d",
                &["drop"],
                "d = √(2Rh − h²)",
                "d = √(2 × {r} × {drop} − ({drop})²)",
                distance_from_drop,
            )
            .with_optional(&["r"]),
        )
        .build()
}

// Horizon distance

fn horizon_distance_eval(i: &Inputs) -> CfResult<Evaluation> {
    let (r, h) = (i.get("r")?, i.get("h")?);
    let approx = safe_sqrt(2.0 * r * h, 0.0, "2Rh")?;
    Ok(Evaluation::of(horizon(r, h)?).extra("Approximation √(2Rh)", approx, Dimension::Length))
}

fn observer_height(i: &Inputs) -> CfResult<Evaluation> {
    Ok(Evaluation::of(eye_height(i.get("r")?, i.get("d")?)?))
}

pub fn horizon_distance() -> SpecResult<FormulaSpec> {
    FormulaSpec::builder("horizon-distance", "Distance to the Horizon", "d = √(2Rh + h²)")
        .quantity(QuantityDef::variable("d", "d", "Horizon distance", Dimension::Length, "km").non_negative())
        .quantity(QuantityDef::variable("h", "h", "Observer height", Dimension::Length, "m").non_negative())
        .quantity(RADIUS)
        .rearrangement(
            Rearrangement::new(
                "d",
                &["h"],
                "d = √(2Rh + h²)",
                "d = √(2 × {r} × {h} + ({h})²)",
                horizon_distance_eval,
            )
            .with_optional(&["r"]),
        )
        .rearrangement(
            Rearrangement::new(
                "h",
                &["d"],
                "h = √(R² + d²) − R",
                "h = √(({r})² + ({d})²) − {r}",
                observer_height,
            )
            .with_optional(&["r"]),
        )
        .build()
}

// Hidden height

fn hidden_from_distance(i: &Inputs) -> CfResult<Evaluation> {
    let (r, d, h) = (i.get("r")?, i.get("d")?, i.get("h")?);
    let dh = horizon(r, h)?;
    let beyond = (d - dh).max(0.0);
    let hidden = safe_div(beyond * beyond, 2.0 * r, "Earth radius")?;
    let eval = match i.opt("obj") {
        Some(obj) => {
            let hidden = hidden.min(obj);
            Evaluation::of(hidden).extra("Visible height", obj - hidden, Dimension::Length)
        }
        None => Evaluation::of(hidden),
    };
    Ok(eval
        .term("d_h", "√(2Rh + h²)", dh, Dimension::Length)
        .term("b", "max(0, d − d_h)", beyond, Dimension::Length))
}

fn distance_from_hidden(i: &Inputs) -> CfResult<Evaluation> {
    let (r, x, h) = (i.get("r")?, i.get("x")?, i.get("h")?);
    let dh = horizon(r, h)?;
    let beyond = safe_sqrt(2.0 * r * x, 0.0, "2Rx")?;
    Ok(Evaluation::of(dh + beyond)
        .term("d_h", "√(2Rh + h²)", dh, Dimension::Length)
        .term("b", "√(2Rx)", beyond, Dimension::Length))
}

fn observer_from_hidden(i: &Inputs) -> CfResult<Evaluation> {
    let (r, x, d) = (i.get("r")?, i.get("x")?, i.get("d")?);
    let beyond = safe_sqrt(2.0 * r * x, 0.0, "2Rx")?;
    let dh = d - beyond;
    if dh < 0.0 {
        return Err(CfError::OutOfRange {
            what: "hidden height is too large for this distance",
        });
    }
    Ok(Evaluation::of(eye_height(r, dh)?)
        .term("b", "√(2Rx)", beyond, Dimension::Length)
        .term("d_h", "d − b", dh, Dimension::Length))
}

pub fn hidden_height() -> SpecResult<FormulaSpec> {
    FormulaSpec::builder(
        "hidden-height",
        "Hidden Height Beyond the Horizon",
        "x = min(max(0, d − √(2Rh + h²))² / 2R, H)",
    )
    .quantity(QuantityDef::variable("x", "x", "Hidden height", Dimension::Length, "m").non_negative())
    .quantity(QuantityDef::variable("d", "d", "Distance to object", Dimension::Length, "km").positive())
    .quantity(QuantityDef::variable("h", "h", "Observer height", Dimension::Length, "m").non_negative())
    .quantity(QuantityDef::parameter("obj", "H", "Object height", Dimension::Length, "m").non_negative())
    .quantity(RADIUS)
    .rearrangement(
        Rearrangement::new(
            "x",
            &["d", "h"],
            "x = min(b² / 2R, H), b = max(0, d − d_h)",
            "x = ({b})² / (2 × {r})",
            hidden_from_distance,
        )
        .with_optional(&["obj", "r"]),
    )
    .rearrangement(
        Rearrangement::new(
            "d",
            &["x", "h"],
            "d = √(2Rh + h²) + √(2Rx)",
            "d = {d_h} + {b}",
            distance_from_hidden,
        )
        .with_optional(&["r"]),
    )
    .rearrangement(
        Rearrangement::new(
            "h",
            &["x", "d"],
            "h = √(R² + d_h²) − R, d_h = d − √(2Rx)",
            "h = √(({r})² + ({d_h})²) − {r}",
            observer_from_hidden,
        )
        .with_optional(&["r"]),
    )
    .build()
}
