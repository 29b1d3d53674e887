//! Authoritative vertex list of the feature under edit.

use expressway_core::error::{ExpresswayError, Result};
use expressway_core::models::{Coordinate, MIN_LINE_VERTICES};

/// Ordered `[lon, lat]` sequence for the line being edited
///
/// Indices handed to the mutating methods come from vertex markers, which are
/// reindexed after every structural change, so they are always in range.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeometryStore {
    coordinates: Vec<Coordinate>,
}

impl GeometryStore {
    pub fn new(coordinates: Vec<Coordinate>) -> Self {
        Self { coordinates }
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    pub fn get(&self, index: usize) -> Option<Coordinate> {
        self.coordinates.get(index).copied()
    }

    /// Replace the vertex at `index` in place
    pub fn set_coordinate(&mut self, index: usize, point: Coordinate) {
        debug_assert!(index < self.coordinates.len(), "vertex index {} out of range", index);
        if let Some(slot) = self.coordinates.get_mut(index) {
            *slot = point;
        }
    }

    /// Insert a vertex at `index`, shifting later vertices up
    pub fn insert_coordinate(&mut self, index: usize, point: Coordinate) {
        debug_assert!(index <= self.coordinates.len(), "insert index {} out of range", index);
        let index = index.min(self.coordinates.len());
        self.coordinates.insert(index, point);
    }

    /// Remove the vertex at `index`, shifting later vertices down
    ///
    /// Refused when the line is already at its minimum of two vertices.
    pub fn remove_coordinate(&mut self, index: usize) -> Result<Coordinate> {
        if self.coordinates.len() <= MIN_LINE_VERTICES {
            return Err(ExpresswayError::ConstraintViolation {
                minimum: MIN_LINE_VERTICES,
                current: self.coordinates.len(),
            });
        }

        if index >= self.coordinates.len() {
            return Err(ExpresswayError::InvalidCoordinate {
                index,
                reason: format!("line has {} vertices", self.coordinates.len()),
            });
        }

        Ok(self.coordinates.remove(index))
    }

    pub fn into_coordinates(self) -> Vec<Coordinate> {
        self.coordinates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_set_keeps_length() {
        let mut store = GeometryStore::new(vec![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]]);
        store.set_coordinate(1, [1.5, 0.5]);
        assert_eq!(store.len(), 3);
        assert_eq!(store.get(1), Some([1.5, 0.5]));
    }

    #[test]
    fn test_insert_shifts_later_vertices() {
        let mut store = GeometryStore::new(vec![[0.0, 0.0], [2.0, 0.0]]);
        store.insert_coordinate(1, [1.0, 0.0]);
        assert_eq!(store.coordinates(), &[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]]);
    }

    #[test]
    fn test_remove_at_minimum_is_rejected() {
        let mut store = GeometryStore::new(vec![[0.0, 0.0], [1.0, 1.0]]);

        for index in 0..2 {
            let err = store.remove_coordinate(index).unwrap_err();
            assert!(matches!(
                err,
                ExpresswayError::ConstraintViolation { minimum: 2, current: 2 }
            ));
        }
        assert_eq!(store.coordinates(), &[[0.0, 0.0], [1.0, 1.0]]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut store = GeometryStore::new(vec![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]]);
        assert!(store.remove_coordinate(3).is_err());
        assert_eq!(store.len(), 3);
    }

    proptest! {
        #[test]
        fn prop_remove_drops_exactly_one(
            coords in prop::collection::vec((-180.0f64..180.0, -90.0f64..90.0), 3..40),
            pick in any::<prop::sample::Index>(),
        ) {
            let coords: Vec<Coordinate> = coords.into_iter().map(|(x, y)| [x, y]).collect();
            let index = pick.index(coords.len());
            let mut store = GeometryStore::new(coords.clone());

            let removed = store.remove_coordinate(index).unwrap();

            let mut expected = coords.clone();
            expected.remove(index);
            prop_assert_eq!(removed, coords[index]);
            prop_assert_eq!(store.len(), coords.len() - 1);
            prop_assert_eq!(store.coordinates(), expected.as_slice());
        }
    }
}
