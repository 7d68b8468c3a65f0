//! The single source of truth for committed parcels and the in-progress
//! drawing session.
//!
//! Every mutation goes through one of the transition methods below. Each is
//! total and side-effect-free; the sync controller sequences them so no
//! half-applied state is ever observable. There is deliberately no way to
//! commit a parcel without a populated [`PendingDrawing`]: the pending
//! session fields travel as one `Option` that `commit` consumes.

use bevy::prelude::*;

use crate::draw::FeatureId;
use crate::geometry::Ring;

/// A committed, named field boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Parcel {
    pub id: FeatureId,
    pub name: String,
    pub ring: Ring,
    /// Hectares, rounded to two decimals; recomputed on every ring change.
    pub area_ha: f64,
}

/// Session fields of a drawing awaiting a name: the drawn feature, its ring,
/// and the area already computed for display.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingDrawing {
    pub feature_id: FeatureId,
    pub ring: Ring,
    pub area_ha: f64,
}

#[derive(Resource, Default)]
pub struct ParcelStore {
    parcels: Vec<Parcel>,
    pending: Option<PendingDrawing>,
    input_panel_open: bool,
}

impl ParcelStore {
    pub fn parcels(&self) -> &[Parcel] {
        &self.parcels
    }

    pub fn get(&self, id: FeatureId) -> Option<&Parcel> {
        self.parcels.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.parcels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parcels.is_empty()
    }

    pub fn pending(&self) -> Option<&PendingDrawing> {
        self.pending.as_ref()
    }

    pub fn set_pending(&mut self, pending: PendingDrawing) {
        self.pending = Some(pending);
    }

    pub fn take_pending(&mut self) -> Option<PendingDrawing> {
        self.pending.take()
    }

    pub fn input_panel_open(&self) -> bool {
        self.input_panel_open
    }

    pub fn open_input_panel(&mut self) {
        self.input_panel_open = true;
    }

    pub fn close_input_panel(&mut self) {
        self.input_panel_open = false;
    }

    /// Turn the pending drawing into a committed parcel. Returns the new
    /// parcel's id, or `None` when nothing is pending (a no-op).
    pub fn commit(&mut self, name: impl Into<String>) -> Option<FeatureId> {
        let pending = self.pending.take()?;
        let id = pending.feature_id;
        self.parcels.push(Parcel {
            id,
            name: name.into(),
            ring: pending.ring,
            area_ha: pending.area_ha,
        });
        self.input_panel_open = false;
        Some(id)
    }

    /// Rename a parcel; no-op when the id is absent.
    pub fn rename(&mut self, id: FeatureId, name: impl Into<String>) -> bool {
        match self.parcels.iter_mut().find(|p| p.id == id) {
            Some(parcel) => {
                parcel.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Remove a parcel from the list; no-op when the id is absent.
    pub fn remove(&mut self, id: FeatureId) -> bool {
        let before = self.parcels.len();
        self.parcels.retain(|p| p.id != id);
        before != self.parcels.len()
    }

    /// Replace a parcel's ring. The area is recomputed by the caller via
    /// [`update_area`](Self::update_area), not by this transition.
    pub fn update_ring(&mut self, id: FeatureId, ring: Ring) -> bool {
        match self.parcels.iter_mut().find(|p| p.id == id) {
            Some(parcel) => {
                parcel.ring = ring;
                true
            }
            None => false,
        }
    }

    pub fn update_area(&mut self, id: FeatureId, area_ha: f64) -> bool {
        match self.parcels.iter_mut().find(|p| p.id == id) {
            Some(parcel) => {
                parcel.area_ha = area_ha;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::DVec2;

    fn fid(raw: u64) -> FeatureId {
        FeatureId(raw)
    }

    fn square() -> Ring {
        Ring::new(vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(0.0, 1.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(0.0, 0.0),
        ])
    }

    fn store_with_ids(ids: &[u64]) -> ParcelStore {
        let mut store = ParcelStore::default();
        for &raw in ids {
            store.set_pending(PendingDrawing {
                feature_id: fid(raw),
                ring: square(),
                area_ha: 12.34,
            });
            store.commit(format!("Parcel {raw}"));
        }
        store
    }

    #[test]
    fn test_commit_consumes_pending_and_closes_panel() {
        let mut store = ParcelStore::default();
        store.set_pending(PendingDrawing {
            feature_id: fid(1),
            ring: square(),
            area_ha: 3.5,
        });
        store.open_input_panel();

        let id = store.commit("North Field");
        assert_eq!(id, Some(fid(1)));
        assert!(store.pending().is_none());
        assert!(!store.input_panel_open());

        let parcel = store.get(fid(1)).unwrap();
        assert_eq!(parcel.name, "North Field");
        assert_eq!(parcel.area_ha, 3.5);
        assert_eq!(parcel.ring, square());
    }

    #[test]
    fn test_commit_without_pending_is_noop() {
        let mut store = ParcelStore::default();
        assert_eq!(store.commit("ghost"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_deletes_exactly_the_target() {
        let mut store = store_with_ids(&[3, 7, 9]);
        assert!(store.remove(fid(7)));

        let ids: Vec<u64> = store.parcels().iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![3, 9]);
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let mut store = store_with_ids(&[3, 9]);
        assert!(!store.remove(fid(7)));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_rename_touches_only_the_name() {
        let mut store = store_with_ids(&[3, 7, 9]);
        let before: Vec<Parcel> = store.parcels().to_vec();

        assert!(store.rename(fid(7), "North Field"));

        for (old, new) in before.iter().zip(store.parcels()) {
            assert_eq!(old.id, new.id);
            assert_eq!(old.ring, new.ring);
            assert_eq!(old.area_ha, new.area_ha);
            if old.id == fid(7) {
                assert_eq!(new.name, "North Field");
            } else {
                assert_eq!(old.name, new.name);
            }
        }
    }

    #[test]
    fn test_rename_absent_id_is_noop() {
        let mut store = store_with_ids(&[3]);
        assert!(!store.rename(fid(7), "nope"));
        assert_eq!(store.parcels()[0].name, "Parcel 3");
    }

    #[test]
    fn test_update_ring_leaves_area_to_caller() {
        let mut store = store_with_ids(&[3]);
        let mut grown = square();
        grown.points[2] = DVec2::new(5.0, 5.0);

        assert!(store.update_ring(fid(3), grown.clone()));
        assert_eq!(store.get(fid(3)).unwrap().ring, grown);
        assert_eq!(store.get(fid(3)).unwrap().area_ha, 12.34);

        assert!(store.update_area(fid(3), 99.0));
        assert_eq!(store.get(fid(3)).unwrap().area_ha, 99.0);
    }

    #[test]
    fn test_parcels_keep_insertion_order() {
        let store = store_with_ids(&[9, 3, 7]);
        let ids: Vec<u64> = store.parcels().iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![9, 3, 7]);
    }
}
