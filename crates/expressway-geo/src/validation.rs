use expressway_core::error::{ExpresswayError, Result};
use expressway_core::models::{Coordinate, MIN_LINE_VERTICES};

/// Validate a single `[longitude, latitude]` pair
pub fn validate_coordinate(index: usize, coordinate: Coordinate) -> Result<()> {
    let [lon, lat] = coordinate;

    if !lon.is_finite() || !lat.is_finite() {
        return Err(ExpresswayError::InvalidCoordinate {
            index,
            reason: "Coordinates must be finite".to_string(),
        });
    }

    if !(-180.0..=180.0).contains(&lon) {
        return Err(ExpresswayError::InvalidCoordinate {
            index,
            reason: format!("Longitude {} is outside [-180, 180]", lon),
        });
    }

    if !(-90.0..=90.0).contains(&lat) {
        return Err(ExpresswayError::InvalidCoordinate {
            index,
            reason: format!("Latitude {} is outside [-90, 90]", lat),
        });
    }

    Ok(())
}

/// Validate an editable line: at least two vertices, each one valid
pub fn validate_line(line: &[Coordinate]) -> Result<()> {
    if line.len() < MIN_LINE_VERTICES {
        return Err(ExpresswayError::malformed(format!(
            "LineString must have at least {} points, found {}",
            MIN_LINE_VERTICES,
            line.len()
        )));
    }

    for (i, coordinate) in line.iter().enumerate() {
        validate_coordinate(i, *coordinate)?;
    }

    Ok(())
}
