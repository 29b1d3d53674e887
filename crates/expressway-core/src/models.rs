pub mod feature;
pub mod geometry;
pub mod province;

pub use feature::{Feature, FeatureId, Status};
pub use geometry::{Coordinate, LineGeometry, MIN_LINE_VERTICES};
pub use province::province_label;
