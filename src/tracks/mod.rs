//! # Straight-line tracks
//!
//! A [`Track`] is an ordered list of hit references ([`HitIndex`] into a
//! [`HitPool`]) together with the four parameters of a straight line
//!
//! ```text
//! x(z) = x0 + tx * z
//! y(z) = y0 + ty * z
//! ```
//!
//! ## Lifecycle
//!
//! The search drives every track through the same implicit states:
//!
//! 1. **empty** – [`Track::new`]
//! 2. **seeded** – [`Track::set`] / [`Track::seed`] from two hits at different depths
//! 3. **extended** – [`Track::add_hit`]; parameters are *not* refreshed, call
//!    [`Track::fit`](crate::tracks::Track::fit) when they must describe every hit
//! 4. **finalized** – [`Track::accept_into`] marks the hits as used and copies the track out
//!
//! Numerical degeneracies (equal depths, track parallel to the beam, too few hits) are
//! reported as [`PixTrackError`] values instead of NaN or infinities.
//!
//! ## See also
//! ------------
//! * [`track_fit`] – Weighted least-squares refit.
//! * [`kinematics`] – `Theta`, `Phi`, `Eta` at the reference depth.
//! * [`display`] – Printing a track together with its hits.
pub mod display;
pub mod kinematics;
pub mod track_fit;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        HitIndex, Millimeter, TrackHits, Tracks, MEASUREMENTS_PER_HIT, MIN_HITS_FOR_CHI2,
        NB_FIT_PARAMETERS,
    },
    hits::{hit_pool::HitPool, Hit},
    pixtrack_errors::PixTrackError,
};

/// Working track used by the pattern recognition
///
/// # Fields
///
/// * `hits` - Indices of the hits in the event [`HitPool`], in the order they were added
/// * `tx`, `ty` - Slopes in x and y
/// * `x0`, `y0` - Positions at `z = 0`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    hits: TrackHits,
    tx: f32,
    ty: f32,
    x0: Millimeter,
    y0: Millimeter,
}

impl Track {
    pub fn new() -> Self {
        Track::default()
    }

    /// Create a track holding the given hits, with all line parameters at zero.
    pub fn from_hits(hits: impl IntoIterator<Item = HitIndex>) -> Self {
        Track {
            hits: hits.into_iter().collect(),
            ..Track::default()
        }
    }

    /// Create a seed track from two hits, see [`Track::set`].
    pub fn seed(pool: &HitPool, h1: HitIndex, h2: HitIndex) -> Result<Self, PixTrackError> {
        let mut track = Track::new();
        track.set(pool, h1, h2)?;
        Ok(track)
    }

    /// Start a seed track from the two given hits
    ///
    /// The line goes exactly through both hits and the hit list becomes `[h1, h2]`,
    /// whatever it held before.
    ///
    /// Arguments
    /// ---------
    /// * `pool`: the event hits
    /// * `h1`, `h2`: indices of the two seeding hits
    ///
    /// Return
    /// ------
    /// * [`PixTrackError::HitNotFound`] if an index is outside the pool
    /// * [`PixTrackError::DegenerateFit`] if both hits share the same z.
    ///   The track is left untouched on error.
    pub fn set(&mut self, pool: &HitPool, h1: HitIndex, h2: HitIndex) -> Result<(), PixTrackError> {
        let first = pool.get(h1)?;
        let second = pool.get(h2)?;

        let dz = first.z() - second.z();
        if dz == 0.0 {
            debug!(
                "Degenerate seed: hits {} and {} both at z = {}",
                first.id(),
                second.id(),
                first.z()
            );
            return Err(PixTrackError::DegenerateFit(format!(
                "seeding hits {} and {} share z = {}",
                first.id(),
                second.id(),
                first.z()
            )));
        }

        self.tx = (first.x() - second.x()) / dz;
        self.ty = (first.y() - second.y()) / dz;
        self.y0 = first.y() - self.ty * first.z();
        self.x0 = first.x() - self.tx * first.z();

        self.hits.clear();
        self.hits.push(h1);
        self.hits.push(h2);
        Ok(())
    }

    /// Append a hit to the track. The line parameters are left as they are.
    pub fn add_hit(&mut self, hit: HitIndex) {
        self.hits.push(hit);
    }

    /// Hits of the track, in the order they were added
    pub fn hits(&self) -> &TrackHits {
        &self.hits
    }

    pub fn hits_mut(&mut self) -> &mut TrackHits {
        &mut self.hits
    }

    /// Number of hits assigned to the track
    pub fn size(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn tx(&self) -> f32 {
        self.tx
    }

    pub fn ty(&self) -> f32 {
        self.ty
    }

    pub fn x0(&self) -> Millimeter {
        self.x0
    }

    pub fn y0(&self) -> Millimeter {
        self.y0
    }

    /// Mark the hits of this track as associated.
    ///
    /// # Panics
    /// If the track refers to an index outside `pool`.
    pub fn tag_used_hits(&self, pool: &mut HitPool) {
        for &index in self.hits.iter() {
            pool[index].set_used(true);
        }
    }

    /// Count the hits of this track not yet associated to an accepted track
    ///
    /// # Panics
    /// If the track refers to an index outside `pool`.
    pub fn nb_unused(&self, pool: &HitPool) -> usize {
        self.hits
            .iter()
            .filter(|&&index| !pool[index].is_used())
            .count()
    }

    /// Chi2 / degrees-of-freedom of the straight line over all the hits
    ///
    /// Return
    /// ------
    /// * the sum of the hit contributions divided by `2 * N - 4`
    /// * [`PixTrackError::InsufficientHits`] below three hits, where the number of degrees
    ///   of freedom is not positive
    pub fn chi2(&self, pool: &HitPool) -> Result<f32, PixTrackError> {
        if self.hits.len() < MIN_HITS_FOR_CHI2 {
            return Err(PixTrackError::InsufficientHits {
                found: self.hits.len(),
                required: MIN_HITS_FOR_CHI2,
            });
        }

        let mut ch = 0.0_f32;
        for &index in self.hits.iter() {
            ch += self.chi2_hit(pool.get(index)?);
        }
        let n_dof = MEASUREMENTS_PER_HIT * self.hits.len() - NB_FIT_PARAMETERS;
        Ok(ch / n_dof as f32)
    }

    /// Chi2 contribution from a given hit
    pub fn chi2_hit(&self, hit: &Hit) -> f32 {
        hit.chi2(self.x_at_z(hit.z()), self.y_at_z(hit.z()))
    }

    /// Position in x at the given z from the straight line
    pub fn x_at_z(&self, z: Millimeter) -> Millimeter {
        self.x0 + self.tx * z
    }

    /// Position in y at the given z from the straight line
    pub fn y_at_z(&self, z: Millimeter) -> Millimeter {
        self.y0 + self.ty * z
    }

    /// z position where the track passes closest to the beam line (x = y = 0)
    ///
    /// Return
    /// ------
    /// * [`PixTrackError::DegenerateFit`] when both slopes are zero: the track is parallel
    ///   to the beam and every z is equally close.
    pub fn z_beam(&self) -> Result<Millimeter, PixTrackError> {
        let slope2 = self.tx * self.tx + self.ty * self.ty;
        if slope2 == 0.0 {
            debug!("zBeam undefined for a track parallel to the beam line");
            return Err(PixTrackError::DegenerateFit(
                "track parallel to the beam line has no closest approach".into(),
            ));
        }
        Ok(-(self.x0 * self.tx + self.y0 * self.ty) / slope2)
    }

    /// Finalize an accepted track.
    ///
    /// Its hits are flagged as used in `pool` so later candidates see them as taken,
    /// and an independent copy is appended to `output`.
    pub fn accept_into(&self, pool: &mut HitPool, output: &mut Tracks) {
        self.tag_used_hits(pool);
        output.push(self.clone());
    }
}
