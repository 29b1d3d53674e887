//! Expressway Geo - Planar and geodesic helpers for line editing
//!
//! Nearest-segment lookup for vertex insertion, coordinate validation, and
//! line length measurement.

pub mod measure;
pub mod segment;
pub mod validation;

pub use measure::line_length_km;
pub use segment::{nearest_insertion_index, point_segment_distance};
pub use validation::{validate_coordinate, validate_line};
