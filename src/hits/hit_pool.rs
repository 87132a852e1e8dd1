//! # Event-scoped hit storage
//!
//! [`HitPool`] owns every [`Hit`] of one event. Tracks never own hits: they keep
//! [`HitIndex`] values pointing into the pool.
//!
//! ## Usage flag and concurrency
//!
//! Reading hits only needs `&HitPool`, so candidate tracks can be built and scored from
//! several threads at once. Flagging hits as used requires `&mut HitPool`
//! (see [`Track::tag_used_hits`](crate::tracks::Track::tag_used_hits)), which confines the
//! finalization of accepted tracks to a single owner.
//!
//! ## Typical usage
//!
//! ```rust
//! use pixtrack::hits::{hit_pool::HitPool, increasing_by_z};
//!
//! let mut pool = HitPool::with_capacity(3);
//! pool.push_hit(0, 1.0, 2.0, 0.0, 1.0, 1.0, 0);
//! pool.push_hit(1, 3.0, 6.0, 10.0, 1.0, 1.0, 1);
//!
//! let ordered = pool.sorted_indices(increasing_by_z);
//! assert_eq!(ordered, vec![0, 1]);
//!
//! // end of event
//! pool.reset();
//! assert!(pool.is_empty());
//! ```
use std::{
    cmp::Ordering,
    ops::{Index, IndexMut},
};

use ahash::AHashMap;
use itertools::Itertools;
use log::info;

use crate::{
    constants::{HitId, HitIndex, Millimeter, ModuleId},
    hits::Hit,
    pixtrack_errors::PixTrackError,
};

#[derive(Debug, Clone, Default)]
pub struct HitPool {
    hits: Vec<Hit>,
}

impl HitPool {
    pub fn new() -> Self {
        HitPool::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        HitPool {
            hits: Vec::with_capacity(capacity),
        }
    }

    /// Store a new unused hit and return its index in the pool.
    ///
    /// This is the entry point of the hit provider, called once per decoded pixel cluster.
    #[allow(clippy::too_many_arguments)]
    pub fn push_hit(
        &mut self,
        id: HitId,
        x: Millimeter,
        y: Millimeter,
        z: Millimeter,
        wxerr: f32,
        wyerr: f32,
        module: ModuleId,
    ) -> HitIndex {
        self.hits.push(Hit::new(id, x, y, z, wxerr, wyerr, module));
        self.hits.len() - 1
    }

    pub fn get(&self, index: HitIndex) -> Result<&Hit, PixTrackError> {
        self.hits
            .get(index)
            .ok_or(PixTrackError::HitNotFound(index))
    }

    pub fn get_mut(&mut self, index: HitIndex) -> Result<&mut Hit, PixTrackError> {
        self.hits
            .get_mut(index)
            .ok_or(PixTrackError::HitNotFound(index))
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Iterate over `(index, hit)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (HitIndex, &Hit)> {
        self.hits.iter().enumerate()
    }

    /// Iterate over the hits recorded on a given module
    pub fn hits_in_module(&self, module: ModuleId) -> impl Iterator<Item = (HitIndex, &Hit)> {
        self.iter().filter(move |(_, hit)| hit.module() == module)
    }

    /// Indices of all the hits, stably sorted with one of the hit comparators.
    ///
    /// Arguments
    /// ---------
    /// * `compare`: an ordering on hits, e.g. [`increasing_by_z`](crate::hits::increasing_by_z)
    ///
    /// Return
    /// ------
    /// * the sorted indices, ties keep their insertion order
    pub fn sorted_indices<F>(&self, mut compare: F) -> Vec<HitIndex>
    where
        F: FnMut(&Hit, &Hit) -> Ordering,
    {
        (0..self.hits.len())
            .sorted_by(|&a, &b| compare(&self.hits[a], &self.hits[b]))
            .collect()
    }

    /// Pairs of hits sitting at exactly the same position.
    ///
    /// Two hits form a pair when [`Hit::compare_hits`] holds. Hits with a NaN coordinate
    /// never match anything. Pairs are returned as `(lower index, higher index)`, sorted.
    pub fn find_duplicates(&self) -> Vec<(HitIndex, HitIndex)> {
        // +0.0 folds -0.0 onto 0.0, the two compare equal
        let key = |hit: &Hit| {
            [
                (hit.x() + 0.0).to_bits(),
                (hit.y() + 0.0).to_bits(),
                (hit.z() + 0.0).to_bits(),
            ]
        };

        let mut by_position: AHashMap<[u32; 3], Vec<HitIndex>> = AHashMap::new();
        for (index, hit) in self.iter() {
            if hit.x().is_nan() || hit.y().is_nan() || hit.z().is_nan() {
                continue;
            }
            by_position.entry(key(hit)).or_default().push(index);
        }

        by_position
            .into_iter()
            .map(|(_, group)| group)
            .filter(|group| group.len() > 1)
            .flat_map(|group| group.into_iter().tuple_combinations::<(_, _)>())
            .sorted()
            .collect()
    }

    /// Number of hits already associated to an accepted track
    pub fn nb_used(&self) -> usize {
        self.hits.iter().filter(|hit| hit.is_used()).count()
    }

    /// Release every hit, e.g. before running another search pass on the same event
    pub fn clear_usage(&mut self) {
        self.hits.iter_mut().for_each(|hit| hit.set_used(false));
    }

    /// Drop all the hits at the end of an event, keeping the allocation
    pub fn reset(&mut self) {
        info!("Resetting hit pool: {} hits dropped", self.hits.len());
        self.hits.clear();
    }
}

impl Index<HitIndex> for HitPool {
    type Output = Hit;

    fn index(&self, index: HitIndex) -> &Self::Output {
        &self.hits[index]
    }
}

impl IndexMut<HitIndex> for HitPool {
    fn index_mut(&mut self, index: HitIndex) -> &mut Self::Output {
        &mut self.hits[index]
    }
}

impl FromIterator<Hit> for HitPool {
    fn from_iter<T: IntoIterator<Item = Hit>>(iter: T) -> Self {
        HitPool {
            hits: iter.into_iter().collect(),
        }
    }
}
