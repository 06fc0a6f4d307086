//! cf-core: stable foundation for calcflow.
//!
//! Contains:
//! - units (uom SI types + named physical constants)
//! - numeric (Real + tolerances + domain guards)
//! - format (the one number formatting policy for results and steps)
//! - error (shared error types)

pub mod error;
pub mod format;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CfError, CfResult};
pub use format::{FormatPolicy, format_value};
pub use numeric::*;
pub use units::*;
