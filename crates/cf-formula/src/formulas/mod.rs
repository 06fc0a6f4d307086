//! The standard formula catalogue.
//!
//! Each constructor returns a validated `FormulaSpec`; `all` collects them in
//! the order they are listed to users.

pub mod earth;
pub mod energy;
pub mod fluids;
pub mod geometry;
pub mod mechanics;
pub mod motion;
pub mod thermal;

use crate::error::SpecResult;
use crate::spec::FormulaSpec;

pub fn all() -> SpecResult<Vec<FormulaSpec>> {
    Ok(vec![
        geometry::cube()?,
        geometry::rectangular_prism()?,
        geometry::cylinder()?,
        geometry::sphere()?,
        geometry::cone_slant()?,
        geometry::cone_height()?,
        geometry::triangular_prism()?,
        energy::potential_energy()?,
        energy::kinetic_energy()?,
        mechanics::density()?,
        mechanics::mechanical_advantage()?,
        mechanics::polar_moment_solid()?,
        mechanics::polar_moment_hollow()?,
        fluids::flow_rate()?,
        fluids::pipe_flow()?,
        fluids::darcy_weisbach()?,
        fluids::hazen_williams()?,
        thermal::calorimetry()?,
        thermal::newtons_cooling()?,
        motion::mach_number()?,
        earth::curvature_drop()?,
        earth::horizon_distance()?,
        earth::hidden_height()?,
    ])
}
