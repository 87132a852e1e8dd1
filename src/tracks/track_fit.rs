//! # Weighted straight-line refit
//!
//! [`Track::add_hit`] deliberately leaves the line parameters untouched, so a track extended
//! after seeding still describes its two seeding hits only. [`Track::fit`] refreshes
//! `(x0, tx)` and `(y0, ty)` from **all** the hits of the track.
//!
//! ## Method
//!
//! The x and y projections are fitted independently. Depths are taken relative to the
//! first hit of the track, `d_i = z_i - z_1`, so the sums stay small at detector depths of
//! several hundred millimeters. For the x projection, with `w_i = wxerr_i²`, the weighted
//! least-squares problem
//!
//! ```text
//! min Σ w_i (x_i - c - tx d_i)²
//! ```
//!
//! reduces to the 2×2 normal equations
//!
//! ```text
//! | Σw    Σwd  | | c  |   | Σwx  |
//! | Σwd   Σwd² | | tx | = | Σwxd |
//! ```
//!
//! accumulated in `f64` and solved with [`nalgebra::Matrix2`]. The intercept at the beam
//! origin is then `x0 = c - tx z_1`. The y projection is identical with `wy`.
use log::{debug, trace};
use nalgebra::{Matrix2, Vector2};

use crate::{
    constants::{Millimeter, MIN_HITS_FOR_FIT},
    hits::{hit_pool::HitPool, Hit},
    pixtrack_errors::PixTrackError,
    tracks::Track,
};

/// Weighted sums of one projection, depths relative to `z_ref`
#[derive(Debug)]
struct ProjectionSums {
    z_ref: f64,
    s0: f64,
    sd: f64,
    sd2: f64,
    sc: f64,
    scd: f64,
}

impl ProjectionSums {
    fn new(z_ref: Millimeter) -> Self {
        ProjectionSums {
            z_ref: z_ref as f64,
            s0: 0.0,
            sd: 0.0,
            sd2: 0.0,
            sc: 0.0,
            scd: 0.0,
        }
    }

    fn add(&mut self, weight: f32, z: Millimeter, coordinate: Millimeter) {
        let weight = weight as f64;
        let coordinate = coordinate as f64;
        let d = z as f64 - self.z_ref;
        let wd = weight * d;
        self.s0 += weight;
        self.sd += wd;
        self.sd2 += wd * d;
        self.sc += weight * coordinate;
        self.scd += wd * coordinate;
    }

    /// Solve the normal equations
    ///
    /// Return
    /// ------
    /// * `(intercept at z = 0, slope)` of the projection
    /// * [`PixTrackError::DegenerateFit`] when the normal matrix is singular (every weighted hit
    ///   at the same z, or every weight zero)
    fn solve(&self, projection: &str) -> Result<(f32, f32), PixTrackError> {
        let det = self.s0 * self.sd2 - self.sd * self.sd;
        let singular = || {
            debug!(
                "Singular {projection} fit: s0 = {}, sd = {}, sd2 = {}",
                self.s0, self.sd, self.sd2
            );
            PixTrackError::DegenerateFit(format!(
                "singular normal matrix in the {projection} projection"
            ))
        };

        if det.is_nan() || det <= f64::EPSILON * self.s0 * self.sd2 {
            return Err(singular());
        }

        let normal = Matrix2::new(self.s0, self.sd, self.sd, self.sd2);
        let rhs = Vector2::new(self.sc, self.scd);
        let solution = normal.try_inverse().ok_or_else(singular)? * rhs;
        let (intercept_at_ref, slope) = (solution[0], solution[1]);
        Ok(((intercept_at_ref - slope * self.z_ref) as f32, slope as f32))
    }
}

impl Track {
    /// Refit the straight line on every hit of the track.
    ///
    /// Arguments
    /// ---------
    /// * `pool`: the event hits
    ///
    /// Return
    /// ------
    /// * `Ok(())` once `tx`, `ty`, `x0`, `y0` describe all the hits
    /// * [`PixTrackError::InsufficientHits`] below two hits
    /// * [`PixTrackError::DegenerateFit`] when a projection cannot be solved
    /// * [`PixTrackError::HitNotFound`] for an index outside the pool
    ///
    /// The parameters are left unchanged on error.
    ///
    /// # Note
    /// With two hits of non-zero weight the result matches [`Track::set`] up to rounding,
    /// at any depth.
    pub fn fit(&mut self, pool: &HitPool) -> Result<(), PixTrackError> {
        if self.hits.len() < MIN_HITS_FOR_FIT {
            return Err(PixTrackError::InsufficientHits {
                found: self.hits.len(),
                required: MIN_HITS_FOR_FIT,
            });
        }

        let hits = self
            .hits
            .iter()
            .map(|&index| pool.get(index))
            .collect::<Result<Vec<&Hit>, _>>()?;

        let z_ref = hits[0].z();
        let (sums_x, sums_y) = hits.iter().fold(
            (ProjectionSums::new(z_ref), ProjectionSums::new(z_ref)),
            |(mut sx, mut sy), hit| {
                sx.add(hit.wx(), hit.z(), hit.x());
                sy.add(hit.wy(), hit.z(), hit.y());
                (sx, sy)
            },
        );
        trace!("Track fit sums: x = {sums_x:?}, y = {sums_y:?}");

        let (x0, tx) = sums_x.solve("x")?;
        let (y0, ty) = sums_y.solve("y")?;

        self.x0 = x0;
        self.tx = tx;
        self.y0 = y0;
        self.ty = ty;
        Ok(())
    }
}

#[cfg(test)]
mod track_fit_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fit_two_hits_matches_seed() {
        let mut pool = HitPool::new();
        pool.push_hit(0, 1.0, 2.0, 0.0, 3.0, 0.5, 0);
        pool.push_hit(1, 3.0, 6.0, 10.0, 1.0, 2.0, 1);

        let seed = Track::seed(&pool, 0, 1).unwrap();
        let mut fitted = Track::from_hits([0, 1]);
        fitted.fit(&pool).unwrap();

        assert_relative_eq!(fitted.tx(), seed.tx(), epsilon = 1e-5);
        assert_relative_eq!(fitted.ty(), seed.ty(), epsilon = 1e-5);
        assert_relative_eq!(fitted.x0(), seed.x0(), epsilon = 1e-4);
        assert_relative_eq!(fitted.y0(), seed.y0(), epsilon = 1e-4);
    }

    #[test]
    fn test_fit_after_extension() {
        let mut pool = HitPool::new();
        pool.push_hit(0, 0.0, 0.0, 0.0, 1.0, 1.0, 0);
        pool.push_hit(1, 1.0, -1.0, 10.0, 1.0, 1.0, 1);
        // x scatters around the seed line, y stays on y = -0.1 z
        pool.push_hit(2, 2.5, -2.0, 20.0, 1.0, 1.0, 2);
        pool.push_hit(3, 2.5, -3.0, 30.0, 1.0, 1.0, 3);

        let mut track = Track::seed(&pool, 0, 1).unwrap();
        track.add_hit(2);
        track.add_hit(3);
        let chi2_seed = track.chi2(&pool).unwrap();

        track.fit(&pool).unwrap();
        assert_eq!(track.size(), 4);
        assert!(track.chi2(&pool).unwrap() < chi2_seed);
        assert_relative_eq!(track.ty(), -0.1, epsilon = 1e-5);
        assert_relative_eq!(track.y0(), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_weights_pull_the_line() {
        let mut pool = HitPool::new();
        pool.push_hit(0, 0.0, 0.0, 0.0, 1.0, 1.0, 0);
        pool.push_hit(1, 1.0, 0.0, 10.0, 1.0, 1.0, 1);
        pool.push_hit(2, 3.0, 0.0, 20.0, 10.0, 1.0, 2);

        let mut track = Track::from_hits([0, 1, 2]);
        track.fit(&pool).unwrap();
        // the precise hit is almost exactly on the line
        assert_relative_eq!(track.x_at_z(20.0), 3.0, epsilon = 1e-2);
    }

    #[test]
    fn test_fit_two_hits_deep_in_the_detector() {
        let mut pool = HitPool::new();
        pool.push_hit(0, 60.3, -41.7, 700.0, 80.0, 80.0, 0);
        pool.push_hit(1, 62.1, -43.1, 725.0, 80.0, 80.0, 1);

        let seed = Track::seed(&pool, 0, 1).unwrap();
        let mut fitted = Track::from_hits([0, 1]);
        fitted.fit(&pool).unwrap();

        assert_relative_eq!(fitted.tx(), seed.tx(), max_relative = 1e-6);
        assert_relative_eq!(fitted.ty(), seed.ty(), max_relative = 1e-6);
        assert_relative_eq!(fitted.x0(), seed.x0(), epsilon = 1e-4);
        assert_relative_eq!(fitted.y0(), seed.y0(), epsilon = 1e-4);
        for index in [0, 1] {
            assert!(fitted.chi2_hit(&pool[index]) < 1e-3);
        }
    }

    #[test]
    fn test_fit_collinear_hits_deep_in_the_detector() {
        let (tx, ty, x0, y0) = (0.072_f32, -0.056_f32, 9.9_f32, -2.5_f32);
        let mut pool = HitPool::new();
        for (module, z) in [600.0_f32, 625.0, 650.0, 675.0].into_iter().enumerate() {
            pool.push_hit(
                module as i32,
                x0 + tx * z,
                y0 + ty * z,
                z,
                80.0,
                80.0,
                module as u32,
            );
        }

        let mut track = Track::from_hits([0, 1, 2, 3]);
        track.fit(&pool).unwrap();

        assert!(track.chi2(&pool).unwrap() < 1e-3);
        assert_relative_eq!(track.tx(), tx, max_relative = 1e-5);
        assert_relative_eq!(track.ty(), ty, max_relative = 1e-5);
        assert_relative_eq!(track.x_at_z(650.0), pool[2].x(), epsilon = 1e-4);
    }

    #[test]
    fn test_degenerate_fit() {
        let mut pool = HitPool::new();
        pool.push_hit(0, 0.0, 0.0, 5.0, 1.0, 1.0, 0);
        pool.push_hit(1, 1.0, 1.0, 5.0, 1.0, 1.0, 0);
        pool.push_hit(2, 2.0, 2.0, 5.0, 1.0, 1.0, 0);

        let mut track = Track::from_hits([0, 1, 2]);
        assert!(matches!(
            track.fit(&pool),
            Err(PixTrackError::DegenerateFit(_))
        ));
        assert_eq!(track, Track::from_hits([0, 1, 2]));

        pool.push_hit(3, 0.0, 0.0, 15.0, 0.0, 0.0, 1);
        pool.push_hit(4, 0.0, 0.0, 25.0, 0.0, 0.0, 2);
        let mut blind = Track::from_hits([3, 4]);
        assert!(matches!(
            blind.fit(&pool),
            Err(PixTrackError::DegenerateFit(_))
        ));

        assert_eq!(
            Track::from_hits([0]).fit(&pool),
            Err(PixTrackError::InsufficientHits {
                found: 1,
                required: 2
            })
        );
        assert_eq!(
            Track::from_hits([0, 8]).fit(&pool),
            Err(PixTrackError::HitNotFound(8))
        );
    }
}
