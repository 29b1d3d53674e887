use expressway_core::models::Coordinate;
use geo::{Distance, Euclidean, Line, Point};

/// Index returned when no segment is strictly closer than infinity
const DEGENERATE_INSERTION_INDEX: usize = 1;

/// Planar distance from `point` to the segment `a`-`b`
///
/// Coordinates are treated as plane coordinates, which matches how the map
/// draws lines between vertices. A zero-length segment measures to its single
/// point.
pub fn point_segment_distance(point: Coordinate, a: Coordinate, b: Coordinate) -> f64 {
    Euclidean.distance(&Point::from(point), &Line::new(a, b))
}

/// Index at which a vertex placed at `target` should be inserted
///
/// Scans consecutive pairs left to right and returns `i + 1` for the first
/// segment `(i, i + 1)` at minimum distance. Callers must ensure the line has
/// at least two vertices; shorter or NaN-poisoned input yields `1`.
pub fn nearest_insertion_index(target: Coordinate, line: &[Coordinate]) -> usize {
    let mut best_distance = f64::INFINITY;
    let mut best_index = DEGENERATE_INSERTION_INDEX;

    for (i, pair) in line.windows(2).enumerate() {
        let distance = point_segment_distance(target, pair[0], pair[1]);
        if distance < best_distance {
            best_distance = distance;
            best_index = i + 1;
        }
    }

    best_index
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_perpendicular_distance() {
        let d = point_segment_distance([5.0, 1.0], [0.0, 0.0], [10.0, 0.0]);
        assert!((d - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_distance_to_endpoint_outside_projection() {
        let d = point_segment_distance([13.0, 4.0], [0.0, 0.0], [10.0, 0.0]);
        assert!((d - 5.0).abs() < 1e-12);

        let d = point_segment_distance([-3.0, -4.0], [0.0, 0.0], [10.0, 0.0]);
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_length_segment() {
        let d = point_segment_distance([3.0, 4.0], [0.0, 0.0], [0.0, 0.0]);
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_straight_line_inserts_between_endpoints() {
        let line = [[0.0, 0.0], [10.0, 0.0]];
        assert_eq!(nearest_insertion_index([5.0, 1.0], &line), 1);
    }

    #[test]
    fn test_picks_closest_segment() {
        // An L-shaped line: the point sits next to the vertical leg
        let line = [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [20.0, 10.0]];
        assert_eq!(nearest_insertion_index([11.0, 5.0], &line), 2);
        assert_eq!(nearest_insertion_index([15.0, 10.5], &line), 3);
    }

    #[test]
    fn test_tie_goes_to_first_segment() {
        // Equidistant from both segments of a straight line through the shared vertex
        let line = [[0.0, 0.0], [10.0, 0.0], [20.0, 0.0]];
        assert_eq!(nearest_insertion_index([10.0, 3.0], &line), 1);
    }

    #[test]
    fn test_degenerate_input_defaults_to_one() {
        assert_eq!(nearest_insertion_index([1.0, 1.0], &[]), 1);
        assert_eq!(nearest_insertion_index([1.0, 1.0], &[[0.0, 0.0]]), 1);
        assert_eq!(nearest_insertion_index([f64::NAN, 1.0], &[[0.0, 0.0], [1.0, 0.0]]), 1);
    }

    proptest! {
        #[test]
        fn prop_index_in_range(
            line in prop::collection::vec((-180.0f64..180.0, -90.0f64..90.0), 2..32),
            x in -180.0f64..180.0,
            y in -90.0f64..90.0,
        ) {
            let line: Vec<Coordinate> = line.into_iter().map(|(x, y)| [x, y]).collect();
            let index = nearest_insertion_index([x, y], &line);
            prop_assert!(index >= 1 && index < line.len());
        }
    }
}
