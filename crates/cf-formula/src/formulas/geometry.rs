//! Surface areas of common solids.
//!
//! Every solid is solvable for each of its dimensions; the inverse of a
//! quadratic in `r` takes the positive root.

use std::f64::consts::PI;

use cf_core::{CfResult, safe_div, safe_sqrt};
use cf_units::Dimension;

use crate::error::SpecResult;
use crate::quantity::QuantityDef;
use crate::spec::{Evaluation, FormulaSpec, Inputs, Rearrangement};

const SA: QuantityDef =
    QuantityDef::variable("sa", "SA", "Surface area", Dimension::Area, "m²").positive();

const fn length(key: &'static str, symbol: &'static str, name: &'static str) -> QuantityDef {
    QuantityDef::variable(key, symbol, name, Dimension::Length, "m").positive()
}

// Cube

fn cube_area(i: &Inputs) -> CfResult<Evaluation> {
    let s = i.get("s")?;
    Ok(Evaluation::of(6.0 * s * s))
}

fn cube_side(i: &Inputs) -> CfResult<Evaluation> {
    let face = i.get("sa")? / 6.0;
    Ok(Evaluation::of(safe_sqrt(face, face, "surface area / 6")?))
}

pub fn cube() -> SpecResult<FormulaSpec> {
    FormulaSpec::builder("cube-surface-area", "Cube Surface Area", "SA = 6s²")
        .quantity(SA)
        .quantity(length("s", "s", "Side length"))
        .rearrangement(Rearrangement::new("sa", &["s"], "SA = 6s²", "SA = 6 × ({s})²", cube_area))
        .rearrangement(Rearrangement::new("s", &["sa"], "s = √(SA / 6)", "s = √({sa} / 6)", cube_side))
        .build()
}

// Rectangular prism

fn prism_area(i: &Inputs) -> CfResult<Evaluation> {
    let (l, w, h) = (i.get("l")?, i.get("w")?, i.get("h")?);
    Ok(Evaluation::of(2.0 * (l * w + l * h + w * h)))
}

/// One edge from the area and the other two: `(SA/2 − ab) / (a + b)`.
fn prism_edge(i: &Inputs, a: &str, b: &str) -> CfResult<Evaluation> {
    let (sa, a, b) = (i.get("sa")?, i.get(a)?, i.get(b)?);
    Ok(Evaluation::of(safe_div(sa / 2.0 - a * b, a + b, "sum of the other two edges")?))
}

fn prism_length(i: &Inputs) -> CfResult<Evaluation> {
    prism_edge(i, "w", "h")
}

fn prism_width(i: &Inputs) -> CfResult<Evaluation> {
    prism_edge(i, "l", "h")
}

fn prism_height(i: &Inputs) -> CfResult<Evaluation> {
    prism_edge(i, "l", "w")
}

pub fn rectangular_prism() -> SpecResult<FormulaSpec> {
    FormulaSpec::builder(
        "rectangular-prism-surface-area",
        "Rectangular Prism Surface Area",
        "SA = 2(lw + lh + wh)",
    )
    .quantity(SA)
    .quantity(length("l", "l", "Length"))
    .quantity(length("w", "w", "Width"))
    .quantity(length("h", "h", "Height"))
    .rearrangement(Rearrangement::new(
        "sa",
        &["l", "w", "h"],
        "SA = 2(lw + lh + wh)",
        "SA = 2({l} × {w} + {l} × {h} + {w} × {h})",
        prism_area,
    ))
    .rearrangement(Rearrangement::new(
        "l",
        &["sa", "w", "h"],
        "l = (SA/2 − wh) / (w + h)",
        "l = ({sa}/2 − {w} × {h}) / ({w} + {h})",
        prism_length,
    ))
    .rearrangement(Rearrangement::new(
        "w",
        &["sa", "l", "h"],
        "w = (SA/2 − lh) / (l + h)",
        "w = ({sa}/2 − {l} × {h}) / ({l} + {h})",
        prism_width,
    ))
    .rearrangement(Rearrangement::new(
        "h",
        &["sa", "l", "w"],
        "h = (SA/2 − lw) / (l + w)",
        "h = ({sa}/2 − {l} × {w}) / ({l} + {w})",
        prism_height,
    ))
    .build()
}

// Cylinder

fn cylinder_area(i: &Inputs) -> CfResult<Evaluation> {
    let (r, h) = (i.get("r")?, i.get("h")?);
    let ends = 2.0 * PI * r * r;
    let side = 2.0 * PI * r * h;
    Ok(Evaluation::of(ends + side)
        .term("A_ends", "2πr²", ends, Dimension::Area)
        .term("A_side", "2πrh", side, Dimension::Area))
}

fn cylinder_height(i: &Inputs) -> CfResult<Evaluation> {
    let (sa, r) = (i.get("sa")?, i.get("r")?);
    Ok(Evaluation::of(safe_div(sa, 2.0 * PI * r, "2πr")? - r))
}

fn cylinder_radius(i: &Inputs) -> CfResult<Evaluation> {
    let (sa, h) = (i.get("sa")?, i.get("h")?);
    let disc = h * h + 2.0 * sa / PI;
    Ok(Evaluation::of((safe_sqrt(disc, disc, "h² + 2SA/π")? - h) / 2.0))
}

pub fn cylinder() -> SpecResult<FormulaSpec> {
    FormulaSpec::builder("cylinder-surface-area", "Cylinder Surface Area", "SA = 2πr² + 2πrh")
        .quantity(SA)
        .quantity(length("r", "r", "Radius"))
        .quantity(length("h", "h", "Height"))
        .rearrangement(Rearrangement::new(
            "sa",
            &["r", "h"],
            "SA = 2πr² + 2πrh",
            "SA = {A_ends} + {A_side}",
            cylinder_area,
        ))
        .rearrangement(Rearrangement::new(
            "h",
            &["sa", "r"],
            "h = SA / (2πr) − r",
            "h = {sa} / (2π × {r}) − {r}",
            cylinder_height,
        ))
        .rearrangement(Rearrangement::new(
            "r",
            &["sa", "h"],
            "r = (−h + √(h² + 2SA/π)) / 2",
            "r = (−{h} + √({h}² + 2 × {sa}/π)) / 2",
            cylinder_radius,
        ))
        .build()
}

// Sphere

fn sphere_area(i: &Inputs) -> CfResult<Evaluation> {
    let r = i.get("r")?;
    Ok(Evaluation::of(4.0 * PI * r * r))
}

fn sphere_radius(i: &Inputs) -> CfResult<Evaluation> {
    let x = i.get("sa")? / (4.0 * PI);
    Ok(Evaluation::of(safe_sqrt(x, x, "SA / 4π")?))
}

pub fn sphere() -> SpecResult<FormulaSpec> {
    FormulaSpec::builder("sphere-surface-area", "Sphere Surface Area", "SA = 4πr²")
        .quantity(SA)
        .quantity(length("r", "r", "Radius"))
        .rearrangement(Rearrangement::new("sa", &["r"], "SA = 4πr²", "SA = 4π × ({r})²", sphere_area))
        .rearrangement(Rearrangement::new(
            "r",
            &["sa"],
            "r = √(SA / 4π)",
            "r = √({sa} / 4π)",
            sphere_radius,
        ))
        .build()
}

// Cone from slant height

fn cone_area(i: &Inputs) -> CfResult<Evaluation> {
    let (r, s) = (i.get("r")?, i.get("s")?);
    let base = PI * r * r;
    let lateral = PI * r * s;
    Ok(Evaluation::of(base + lateral)
        .term("A_base", "πr²", base, Dimension::Area)
        .term("A_lateral", "πrs", lateral, Dimension::Area))
}

fn cone_slant_from_area(i: &Inputs) -> CfResult<Evaluation> {
    let (sa, r) = (i.get("sa")?, i.get("r")?);
    Ok(Evaluation::of(safe_div(sa, PI * r, "πr")? - r))
}

fn cone_radius_from_slant(i: &Inputs) -> CfResult<Evaluation> {
    let (sa, s) = (i.get("sa")?, i.get("s")?);
    let disc = s * s + 4.0 * sa / PI;
    Ok(Evaluation::of((safe_sqrt(disc, disc, "s² + 4SA/π")? - s) / 2.0))
}

pub fn cone_slant() -> SpecResult<FormulaSpec> {
    FormulaSpec::builder("cone-surface-area", "Cone Surface Area", "SA = πr² + πrs")
        .quantity(SA)
        .quantity(length("r", "r", "Radius"))
        .quantity(length("s", "s", "Slant height"))
        .rearrangement(Rearrangement::new(
            "sa",
            &["r", "s"],
            "SA = πr² + πrs",
            "SA = {A_base} + {A_lateral}",
            cone_area,
        ))
        .rearrangement(Rearrangement::new(
            "s",
            &["sa", "r"],
            "s = SA / (πr) − r",
            "s = {sa} / (π × {r}) − {r}",
            cone_slant_from_area,
        ))
        .rearrangement(Rearrangement::new(
            "r",
            &["sa", "s"],
            "r = (−s + √(s² + 4SA/π)) / 2",
            "r = (−{s} + √({s}² + 4 × {sa}/π)) / 2",
            cone_radius_from_slant,
        ))
        .build()
}

// Cone from vertical height

fn cone_height_area(i: &Inputs) -> CfResult<Evaluation> {
    let (r, h) = (i.get("r")?, i.get("h")?);
    let s = (r * r + h * h).sqrt();
    Ok(Evaluation::of(PI * r * r + PI * r * s).term("s", "√(r² + h²)", s, Dimension::Length))
}

fn cone_height_height(i: &Inputs) -> CfResult<Evaluation> {
    let (sa, r) = (i.get("sa")?, i.get("r")?);
    let s = safe_div(sa, PI * r, "πr")? - r;
    let h = safe_sqrt(s * s - r * r, s * s, "slant height² − radius²")?;
    Ok(Evaluation::of(h).term("s", "SA / (πr) − r", s, Dimension::Length))
}

fn cone_height_radius(i: &Inputs) -> CfResult<Evaluation> {
    let (sa, h) = (i.get("sa")?, i.get("h")?);
    let u = sa / PI;
    let root = safe_sqrt(h * h + 2.0 * u, h * h, "h² + 2SA/π")?;
    Ok(Evaluation::of(safe_div(u, root, "√(h² + 2SA/π)")?).term("u", "SA / π", u, Dimension::Area))
}

pub fn cone_height() -> SpecResult<FormulaSpec> {
    FormulaSpec::builder(
        "cone-surface-area-height",
        "Cone Surface Area (from height)",
        "SA = πr(r + √(r² + h²))",
    )
    .quantity(SA)
    .quantity(length("r", "r", "Radius"))
    .quantity(length("h", "h", "Height"))
    .rearrangement(Rearrangement::new(
        "sa",
        &["r", "h"],
        "SA = πr² + πrs, s = √(r² + h²)",
        "SA = π × ({r})² + π × {r} × {s}",
        cone_height_area,
    ))
    .rearrangement(Rearrangement::new(
        "h",
        &["sa", "r"],
        "h = √(s² − r²), s = SA / (πr) − r",
        "h = √(({s})² − ({r})²)",
        cone_height_height,
    ))
    .rearrangement(Rearrangement::new(
        "r",
        &["sa", "h"],
        "r = u / √(h² + 2u), u = SA / π",
        "r = {u} / √(({h})² + 2 × {u})",
        cone_height_radius,
    ))
    .build()
}

// Triangular prism

const PERIMETER: &str = "a + b + c (3b when the sides are unknown)";

/// `a + b + c` when both other sides are given, else the equilateral estimate `3b`.
fn perimeter(i: &Inputs, b: f64) -> f64 {
    match (i.opt("a"), i.opt("c")) {
        (Some(a), Some(c)) => a + b + c,
        _ => 3.0 * b,
    }
}

fn tri_area(i: &Inputs) -> CfResult<Evaluation> {
    let (b, hb, len) = (i.get("b")?, i.get("hb")?, i.get("len")?);
    let p = perimeter(i, b);
    Ok(Evaluation::of(b * hb + p * len).term("P", PERIMETER, p, Dimension::Length))
}

fn tri_length(i: &Inputs) -> CfResult<Evaluation> {
    let (sa, b, hb) = (i.get("sa")?, i.get("b")?, i.get("hb")?);
    let p = perimeter(i, b);
    Ok(Evaluation::of(safe_div(sa - b * hb, p, "perimeter")?).term("P", PERIMETER, p, Dimension::Length))
}

fn tri_triangle_height(i: &Inputs) -> CfResult<Evaluation> {
    let (sa, b, len) = (i.get("sa")?, i.get("b")?, i.get("len")?);
    let p = perimeter(i, b);
    Ok(Evaluation::of(safe_div(sa - p * len, b, "base")?).term("P", PERIMETER, p, Dimension::Length))
}

fn tri_base(i: &Inputs) -> CfResult<Evaluation> {
    let (sa, hb, len) = (i.get("sa")?, i.get("hb")?, i.get("len")?);
    let (b, sides) = match (i.opt("a"), i.opt("c")) {
        (Some(a), Some(c)) => (safe_div(sa - (a + c) * len, hb + len, "h_b + L")?, a + c),
        _ => {
            let b = safe_div(sa, hb + 3.0 * len, "h_b + 3L")?;
            (b, 2.0 * b)
        }
    };
    Ok(Evaluation::of(b).term("S", "a + c (2b when the sides are unknown)", sides, Dimension::Length))
}

pub fn triangular_prism() -> SpecResult<FormulaSpec> {
    FormulaSpec::builder(
        "triangular-prism-surface-area",
        "Triangular Prism Surface Area",
        "SA = b·h_b + P·L",
    )
    .quantity(SA)
    .quantity(length("b", "b", "Triangle base"))
    .quantity(length("hb", "h_b", "Triangle height"))
    .quantity(length("len", "L", "Prism length"))
    .quantity(QuantityDef::parameter("a", "a", "Side a", Dimension::Length, "m").positive())
    .quantity(QuantityDef::parameter("c", "c", "Side c", Dimension::Length, "m").positive())
    .rearrangement(
        Rearrangement::new(
            "sa",
            &["b", "hb", "len"],
            "SA = b·h_b + P·L",
            "SA = {b} × {hb} + {P} × {len}",
            tri_area,
        )
        .with_optional(&["a", "c"]),
    )
    .rearrangement(
        Rearrangement::new(
            "len",
            &["sa", "b", "hb"],
            "L = (SA − b·h_b) / P",
            "L = ({sa} − {b} × {hb}) / {P}",
            tri_length,
        )
        .with_optional(&["a", "c"]),
    )
    .rearrangement(
        Rearrangement::new(
            "hb",
            &["sa", "b", "len"],
            "h_b = (SA − P·L) / b",
            "h_b = ({sa} − {P} × {len}) / {b}",
            tri_triangle_height,
        )
        .with_optional(&["a", "c"]),
    )
    .rearrangement(
        Rearrangement::new(
            "b",
            &["sa", "hb", "len"],
            "b = (SA − S·L) / (h_b + L), S = a + c",
            "b = ({sa} − {S} × {len}) / ({hb} + {len})",
            tri_base,
        )
        .with_optional(&["a", "c"]),
    )
    .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{Field, solve};
    use cf_core::{Tolerances, nearly_equal};

    fn close(a: f64, b: f64) -> bool {
        nearly_equal(a, b, Tolerances { abs: 1e-9, rel: 1e-9 })
    }

    fn run(spec: &FormulaSpec, entries: &[(&str, &str)]) -> f64 {
        let fields: Vec<Field> = entries.iter().map(|&(k, v)| Field::new(k, v, "")).collect();
        solve(spec, &fields, None).unwrap().value
    }

    #[test]
    fn cube_side_5_is_150() {
        let spec = cube().unwrap();
        assert_eq!(run(&spec, &[("s", "5")]), 150.0);
        assert!(close(run(&spec, &[("sa", "150")]), 5.0));
    }

    #[test]
    fn rectangular_prism_6_4_5_is_148() {
        let spec = rectangular_prism().unwrap();
        assert_eq!(run(&spec, &[("l", "6"), ("w", "4"), ("h", "5")]), 148.0);
        assert!(close(run(&spec, &[("sa", "148"), ("w", "4"), ("h", "5")]), 6.0));
        assert!(close(run(&spec, &[("sa", "148"), ("l", "6"), ("h", "5")]), 4.0));
        assert!(close(run(&spec, &[("sa", "148"), ("l", "6"), ("w", "4")]), 5.0));
    }

    #[test]
    fn cylinder_round_trip() {
        let spec = cylinder().unwrap();
        let sa = run(&spec, &[("r", "3"), ("h", "4")]);
        assert!(close(sa, 2.0 * PI * 9.0 + 2.0 * PI * 12.0));
        let text = sa.to_string();
        assert!(close(run(&spec, &[("sa", &text), ("r", "3")]), 4.0));
        assert!(close(run(&spec, &[("sa", &text), ("h", "4")]), 3.0));
    }

    #[test]
    fn sphere_round_trip() {
        let spec = sphere().unwrap();
        let sa = run(&spec, &[("r", "2")]);
        assert!(close(sa, 16.0 * PI));
        assert!(close(run(&spec, &[("sa", &sa.to_string())]), 2.0));
    }

    #[test]
    fn cone_with_slant_round_trip() {
        let spec = cone_slant().unwrap();
        let sa = run(&spec, &[("r", "3"), ("s", "5")]);
        assert!(close(sa, 24.0 * PI));
        let text = sa.to_string();
        assert!(close(run(&spec, &[("sa", &text), ("r", "3")]), 5.0));
        assert!(close(run(&spec, &[("sa", &text), ("s", "5")]), 3.0));
    }

    #[test]
    fn cone_with_height_round_trip() {
        let spec = cone_height().unwrap();
        let sa = run(&spec, &[("r", "3"), ("h", "4")]);
        assert!(close(sa, 24.0 * PI));
        let text = sa.to_string();
        assert!(close(run(&spec, &[("sa", &text), ("r", "3")]), 4.0));
        assert!(close(run(&spec, &[("sa", &text), ("h", "4")]), 3.0));
    }

    #[test]
    fn cone_height_impossible_area_is_domain_error() {
        let spec = cone_height().unwrap();
        // Area smaller than the base alone would need slant < radius.
        let fields = [Field::new("sa", "20", ""), Field::new("r", "3", "")];
        let err = solve(&spec, &fields, None).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Domain);
    }

    #[test]
    fn triangular_prism_estimates_perimeter() {
        let spec = triangular_prism().unwrap();
        // 2 × (½ × 4 × 3) + 3 × 4 × 10
        assert_eq!(run(&spec, &[("b", "4"), ("hb", "3"), ("len", "10")]), 132.0);
        assert!(close(run(&spec, &[("sa", "132"), ("hb", "3"), ("len", "10")]), 4.0));
    }

    #[test]
    fn triangular_prism_with_all_sides() {
        let spec = triangular_prism().unwrap();
        // 3-4-5 right triangle on base 4: 4 × 3 + 12 × 10
        let entries = [("b", "4"), ("hb", "3"), ("len", "10"), ("a", "3"), ("c", "5")];
        assert_eq!(run(&spec, &entries), 132.0);
        let inverse = [("sa", "132"), ("hb", "3"), ("len", "10"), ("a", "3"), ("c", "5")];
        assert!(close(run(&spec, &inverse), 4.0));
        let inverse = [("sa", "132"), ("b", "4"), ("hb", "3"), ("a", "3"), ("c", "5")];
        assert!(close(run(&spec, &inverse), 10.0));
    }
}
