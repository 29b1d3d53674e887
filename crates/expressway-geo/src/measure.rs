use expressway_core::models::Coordinate;
use geo::{Distance, Haversine, Point};

/// Geodesic length of a line in kilometres, rounded to 10 m
pub fn line_length_km(line: &[Coordinate]) -> f64 {
    let meters: f64 = line
        .windows(2)
        .map(|pair| {
            let a = Point::new(pair[0][0], pair[0][1]);
            let b = Point::new(pair[1][0], pair[1][1]);
            Haversine.distance(a, b)
        })
        .sum();

    (meters / 10.0).round() / 100.0
}
