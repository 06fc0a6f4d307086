//! uom SI quantity aliases and named physical constants.
//!
//! The unit table reads its conversion factors from these uom types, so the
//! aliases cover exactly the dimensions uom knows and the table uses.

use uom::si::f64 as si;

pub type Accel = si::Acceleration;
pub type Area = si::Area;
pub type Energy = si::Energy;
pub type Force = si::Force;
pub type Length = si::Length;
pub type Mass = si::Mass;
pub type Pressure = si::Pressure;
pub type Time = si::Time;
pub type Velocity = si::Velocity;
pub type Volume = si::Volume;

/// Named physical constants shared by the formula catalogue, in SI base units.
pub mod constants {
    /// Standard gravity, m/s².
    pub const G0_MPS2: f64 = 9.806_65;

    /// Specific gas constant of dry air, J/(kg·K).
    pub const R_AIR: f64 = 287.0;

    /// Heat capacity ratio of dry air.
    pub const GAMMA_AIR: f64 = 1.4;

    /// Mean Earth radius, km.
    pub const EARTH_RADIUS_KM: f64 = 6371.0;
    pub const EARTH_RADIUS_M: f64 = EARTH_RADIUS_KM * 1000.0;

    /// Water at room temperature, kg/m³.
    pub const WATER_DENSITY: f64 = 1000.0;

    /// Water at room temperature, Pa·s.
    pub const WATER_VISCOSITY: f64 = 0.001;

    /// Absolute roughness of commercial steel pipe, mm.
    pub const STEEL_ROUGHNESS_MM: f64 = 0.045;
    pub const STEEL_ROUGHNESS_M: f64 = STEEL_ROUGHNESS_MM / 1000.0;

    /// Reynolds number below which pipe flow is treated as laminar.
    pub const LAMINAR_REYNOLDS_LIMIT: f64 = 2300.0;

    /// Hazen–Williams head-loss coefficient for SI units.
    pub const HAZEN_WILLIAMS_K_SI: f64 = 10.67;
    /// Roughness coefficient C of new steel pipe.
    pub const HAZEN_WILLIAMS_C_STEEL: f64 = 100.0;
    pub const HAZEN_WILLIAMS_FLOW_EXP: f64 = 1.852;
    pub const HAZEN_WILLIAMS_DIAMETER_EXP: f64 = 4.8704;
}
