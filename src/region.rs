//! The crop region data model: identity, geometry and the owning store.

use crate::geometry::Rect;

pub type RegionId = u32;

/// A user-defined rectangular crop area in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub id: RegionId,
    pub rect: Rect,
}

/// Owns all regions. Ids start at 1, increase strictly with each creation
/// and are never reused; the counter resets only through [`reset_all`],
/// which runs when a new image is loaded.
///
/// The backing vec stays sorted by id because creation appends increasing
/// ids and removal preserves order, so iteration is ascending-id for free.
///
/// [`reset_all`]: RegionStore::reset_all
#[derive(Debug)]
pub struct RegionStore {
    regions: Vec<Region>,
    next_id: RegionId,
}

impl Default for RegionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionStore {
    pub fn new() -> Self {
        Self {
            regions: Vec::new(),
            next_id: 1,
        }
    }

    /// Stores a new region and returns its id. Never fails; geometry
    /// validation happens in the interaction layer before commit.
    pub fn create(&mut self, rect: Rect) -> RegionId {
        let id = self.next_id;
        self.next_id += 1;
        self.regions.push(Region { id, rect });
        id
    }

    /// Removes the region with `id`; a no-op if it does not exist.
    pub fn remove(&mut self, id: RegionId) {
        self.regions.retain(|r| r.id != id);
    }

    /// In-place geometry replacement. The store is a pure container; the
    /// caller is responsible for clamping and minimum-size enforcement.
    pub fn update_geometry(&mut self, id: RegionId, rect: Rect) {
        if let Some(region) = self.regions.iter_mut().find(|r| r.id == id) {
            region.rect = rect;
        }
    }

    /// Clears every region and restarts id assignment at 1.
    pub fn reset_all(&mut self) {
        self.regions.clear();
        self.next_id = 1;
    }

    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    /// Regions in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Copy of all regions in ascending id order, for list views and export.
    pub fn snapshot(&self) -> Vec<Region> {
        self.regions.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic_and_never_reused() {
        let mut store = RegionStore::new();
        let a = store.create(Rect::from_size(10.0, 10.0));
        let b = store.create(Rect::from_size(20.0, 20.0));
        assert_eq!((a, b), (1, 2));

        store.remove(a);
        let c = store.create(Rect::from_size(30.0, 30.0));
        assert_eq!(c, 3);

        let ids: Vec<_> = store.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn default_store_starts_ids_at_one() {
        let mut store = RegionStore::default();
        assert_eq!(store.create(Rect::from_size(10.0, 10.0)), 1);
    }

    #[test]
    fn reset_restarts_at_one() {
        let mut store = RegionStore::new();
        store.create(Rect::from_size(10.0, 10.0));
        store.create(Rect::from_size(10.0, 10.0));
        store.reset_all();
        assert!(store.is_empty());
        assert_eq!(store.create(Rect::from_size(10.0, 10.0)), 1);
    }

    #[test]
    fn remove_of_unknown_id_is_a_noop() {
        let mut store = RegionStore::new();
        store.create(Rect::from_size(10.0, 10.0));
        store.remove(99);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_replaces_geometry_in_place() {
        let mut store = RegionStore::new();
        let id = store.create(Rect::new(0.0, 0.0, 10.0, 10.0));
        store.update_geometry(id, Rect::new(5.0, 5.0, 50.0, 40.0));
        assert_eq!(store.get(id).unwrap().rect, Rect::new(5.0, 5.0, 50.0, 40.0));
    }
}
