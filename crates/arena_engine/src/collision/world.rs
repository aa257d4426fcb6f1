//! The collision volume registry and its positional queries.

use slotmap::SlotMap;

use crate::foundation::math::Vec2;

use super::volume::{volumes_overlap, Volume};

slotmap::new_key_type! {
    /// Handle to a volume registered in a [`CollisionWorld`]
    pub struct VolumeKey;
}

/// Flat registry of collision volumes with pairwise and positional
/// queries
///
/// The world holds the volumes; entities hold keys and are responsible
/// for removing their volume when they despawn. Queries are
/// deliberately permissive: dead keys and inactive volumes yield
/// `false`/empty results rather than errors, because callers routinely
/// query freshly-despawned entities within the same frame.
#[derive(Default)]
pub struct CollisionWorld {
    volumes: SlotMap<VolumeKey, Volume>,
}

impl CollisionWorld {
    /// Create an empty world
    pub fn new() -> Self {
        Self {
            volumes: SlotMap::with_key(),
        }
    }

    /// Register a volume, returning its handle
    pub fn insert(&mut self, volume: Volume) -> VolumeKey {
        self.volumes.insert(volume)
    }

    /// Unregister a volume
    ///
    /// Removing an already-removed key is a no-op.
    pub fn remove(&mut self, key: VolumeKey) -> Option<Volume> {
        self.volumes.remove(key)
    }

    /// Look up a volume
    pub fn get(&self, key: VolumeKey) -> Option<&Volume> {
        self.volumes.get(key)
    }

    /// Look up a volume mutably
    pub fn get_mut(&mut self, key: VolumeKey) -> Option<&mut Volume> {
        self.volumes.get_mut(key)
    }

    /// Move a volume; dead keys are ignored
    pub fn set_position(&mut self, key: VolumeKey, position: Vec2) {
        if let Some(volume) = self.volumes.get_mut(key) {
            volume.position = position;
        }
    }

    /// Activate or deactivate a volume; dead keys are ignored
    pub fn set_active(&mut self, key: VolumeKey, active: bool) {
        if let Some(volume) = self.volumes.get_mut(key) {
            volume.active = active;
        }
    }

    /// Number of registered volumes (active or not)
    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    /// True if no volumes are registered
    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    /// Pairwise overlap test between two registered volumes
    ///
    /// False if either key is dead or either volume inactive.
    pub fn overlaps(&self, a: VolumeKey, b: VolumeKey) -> bool {
        match (self.volumes.get(a), self.volumes.get(b)) {
            (Some(a), Some(b)) => volumes_overlap(a, b),
            _ => false,
        }
    }

    /// Would `key`'s volume overlap anything if it sat at `position`?
    ///
    /// Tests a hypothetically relocated copy against every other
    /// active volume; the registered volume itself is never touched.
    pub fn would_collide(&self, key: VolumeKey, position: Vec2) -> bool {
        let Some(volume) = self.volumes.get(key) else {
            return false;
        };
        if !volume.active {
            return false;
        }

        let moved = Volume {
            position,
            ..volume.clone()
        };
        self.volumes
            .iter()
            .any(|(other_key, other)| other_key != key && volumes_overlap(&moved, other))
    }

    /// Every other active volume currently overlapping `key`'s volume
    pub fn overlapping(&self, key: VolumeKey) -> Vec<VolumeKey> {
        let Some(volume) = self.volumes.get(key) else {
            return Vec::new();
        };
        if !volume.active {
            return Vec::new();
        }

        self.volumes
            .iter()
            .filter(|&(other_key, other)| other_key != key && volumes_overlap(volume, other))
            .map(|(other_key, _)| other_key)
            .collect()
    }

    /// Every registered volume overlapping an unregistered probe
    ///
    /// The line-of-sight sampler's primitive: build a throwaway volume,
    /// ask what it touches, discard it.
    pub fn probe(&self, volume: &Volume) -> Vec<VolumeKey> {
        if !volume.active {
            return Vec::new();
        }

        self.volumes
            .iter()
            .filter(|&(_, other)| volumes_overlap(volume, other))
            .map(|(other_key, _)| other_key)
            .collect()
    }
}
