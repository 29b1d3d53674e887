//! One draggable handle per vertex.
//!
//! Markers are addressed by a stable [`MarkerId`] and carry a cached vertex
//! index. The cached index is only ever written by [`MarkerSet::reindex`],
//! which runs after every insert and remove.

use std::fmt;

use expressway_core::error::{ExpresswayError, Result};
use expressway_core::models::Coordinate;

use crate::geometry_store::GeometryStore;

/// Stable handle of a vertex marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub u64);

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}", self.0)
    }
}

/// Interactive handle bound to one vertex
#[derive(Debug, Clone, PartialEq)]
pub struct VertexMarker {
    pub id: MarkerId,
    /// Position of the bound vertex in the geometry store
    pub index: usize,
    pub position: Coordinate,
}

/// Markers in vertex order
#[derive(Debug, Clone, Default)]
pub struct MarkerSet {
    markers: Vec<VertexMarker>,
    next_id: u64,
}

impl MarkerSet {
    /// One marker per coordinate, tagged with its index
    pub fn build(coordinates: &[Coordinate]) -> Self {
        let mut set = Self::default();
        for (index, position) in coordinates.iter().enumerate() {
            let id = set.allocate_id();
            set.markers.push(VertexMarker {
                id,
                index,
                position: *position,
            });
        }
        set
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VertexMarker> {
        self.markers.iter()
    }

    pub fn get(&self, id: MarkerId) -> Option<&VertexMarker> {
        self.markers.iter().find(|m| m.id == id)
    }

    /// Marker bound to the vertex at `index`
    pub fn at(&self, index: usize) -> Option<&VertexMarker> {
        self.markers.get(index)
    }

    /// Move a marker and the vertex it is bound to
    pub fn on_drag(
        &mut self,
        store: &mut GeometryStore,
        id: MarkerId,
        position: Coordinate,
    ) -> Result<()> {
        let marker = self
            .markers
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(ExpresswayError::UnknownMarker { marker: id.0 })?;

        store.set_coordinate(marker.index, position);
        marker.position = position;
        Ok(())
    }

    /// Remove a marker together with its vertex
    ///
    /// If the store refuses the removal nothing changes and the marker stays.
    pub fn on_remove_requested(
        &mut self,
        store: &mut GeometryStore,
        id: MarkerId,
    ) -> Result<VertexMarker> {
        let slot = self
            .markers
            .iter()
            .position(|m| m.id == id)
            .ok_or(ExpresswayError::UnknownMarker { marker: id.0 })?;

        store.remove_coordinate(self.markers[slot].index)?;
        let removed = self.markers.remove(slot);
        self.reindex();
        Ok(removed)
    }

    /// Insert a vertex and its marker at `index`
    pub fn insert_at(
        &mut self,
        store: &mut GeometryStore,
        index: usize,
        position: Coordinate,
    ) -> MarkerId {
        let index = index.min(self.markers.len());
        store.insert_coordinate(index, position);

        let id = self.allocate_id();
        self.markers.insert(index, VertexMarker { id, index, position });
        self.reindex();
        id
    }

    /// Whether every marker sits at its cached index and matches the store
    pub fn is_consistent_with(&self, store: &GeometryStore) -> bool {
        self.markers.len() == store.len()
            && self
                .markers
                .iter()
                .enumerate()
                .all(|(i, m)| m.index == i && store.get(i) == Some(m.position))
    }

    fn reindex(&mut self) {
        for (i, marker) in self.markers.iter_mut().enumerate() {
            marker.index = i;
        }
    }

    fn allocate_id(&mut self) -> MarkerId {
        let id = MarkerId(self.next_id);
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn line(n: usize) -> Vec<Coordinate> {
        (0..n).map(|i| [i as f64, 0.0]).collect()
    }

    #[test]
    fn test_build_tags_markers_in_order() {
        let set = MarkerSet::build(&line(4));
        let indices: Vec<usize> = set.iter().map(|m| m.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert_eq!(set.at(2).unwrap().position, [2.0, 0.0]);
    }

    #[test]
    fn test_drag_only_touches_its_vertex() {
        let mut store = GeometryStore::new(line(3));
        let mut set = MarkerSet::build(store.coordinates());
        let id = set.at(1).unwrap().id;

        set.on_drag(&mut store, id, [1.0, 5.0]).unwrap();

        assert_eq!(store.coordinates(), &[[0.0, 0.0], [1.0, 5.0], [2.0, 0.0]]);
        assert_eq!(set.get(id).unwrap().index, 1);
        assert!(set.is_consistent_with(&store));
    }

    #[test]
    fn test_remove_reindexes_later_markers() {
        let mut store = GeometryStore::new(line(4));
        let mut set = MarkerSet::build(store.coordinates());
        let removed_id = set.at(1).unwrap().id;
        let last_id = set.at(3).unwrap().id;

        let removed = set.on_remove_requested(&mut store, removed_id).unwrap();

        assert_eq!(removed.index, 1);
        assert!(set.get(removed_id).is_none());
        assert_eq!(set.get(last_id).unwrap().index, 2);
        assert!(set.is_consistent_with(&store));
    }

    #[test]
    fn test_remove_on_two_point_line_keeps_markers() {
        let mut store = GeometryStore::new(line(2));
        let mut set = MarkerSet::build(store.coordinates());

        for index in 0..2 {
            let id = set.at(index).unwrap().id;
            let err = set.on_remove_requested(&mut store, id).unwrap_err();
            assert!(matches!(err, ExpresswayError::ConstraintViolation { .. }));
        }

        assert_eq!(set.len(), 2);
        assert_eq!(store.len(), 2);
        assert!(set.is_consistent_with(&store));
    }

    #[test]
    fn test_insert_places_marker_in_order() {
        let mut store = GeometryStore::new(vec![[0.0, 0.0], [10.0, 0.0]]);
        let mut set = MarkerSet::build(store.coordinates());
        let old_second = set.at(1).unwrap().id;

        let new_id = set.insert_at(&mut store, 1, [5.0, 1.0]);

        assert_eq!(store.len(), 3);
        assert_eq!(set.get(new_id).unwrap().index, 1);
        assert_eq!(set.get(old_second).unwrap().index, 2);
        assert!(set.is_consistent_with(&store));
    }

    #[test]
    fn test_unknown_marker() {
        let mut store = GeometryStore::new(line(3));
        let mut set = MarkerSet::build(store.coordinates());

        let err = set.on_drag(&mut store, MarkerId(99), [0.0, 0.0]).unwrap_err();
        assert!(matches!(err, ExpresswayError::UnknownMarker { marker: 99 }));
    }

    #[test]
    fn test_rebuild_from_store_matches() {
        let mut store = GeometryStore::new(line(3));
        let mut set = MarkerSet::build(store.coordinates());
        set.insert_at(&mut store, 2, [1.5, 1.0]);
        let first = set.at(0).unwrap().id;
        set.on_remove_requested(&mut store, first).unwrap();

        let rebuilt = MarkerSet::build(store.coordinates());
        let handles = |s: &MarkerSet| s.iter().map(|m| (m.index, m.position)).collect::<Vec<_>>();
        assert_eq!(handles(&rebuilt), handles(&set));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Insert(usize, f64),
        Remove(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0usize..64, -50.0f64..50.0).prop_map(|(i, y)| Op::Insert(i, y)),
            (0usize..64).prop_map(Op::Remove),
        ]
    }

    proptest! {
        #[test]
        fn prop_markers_stay_indexed(start in 2usize..8, ops in prop::collection::vec(op(), 0..40)) {
            let mut store = GeometryStore::new(line(start));
            let mut set = MarkerSet::build(store.coordinates());

            for op in ops {
                match op {
                    Op::Insert(i, y) => {
                        let index = i % (set.len() + 1);
                        set.insert_at(&mut store, index, [index as f64, y]);
                    }
                    Op::Remove(i) => {
                        let id = set.at(i % set.len()).unwrap().id;
                        let before = store.len();
                        match set.on_remove_requested(&mut store, id) {
                            Ok(_) => prop_assert_eq!(store.len(), before - 1),
                            Err(_) => prop_assert_eq!(before, 2),
                        }
                    }
                }
                prop_assert!(set.is_consistent_with(&store));
                for (i, marker) in set.iter().enumerate() {
                    prop_assert_eq!(marker.index, i);
                }
            }
        }
    }
}
