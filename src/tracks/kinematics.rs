//! # Track kinematics at a reference depth
//!
//! The angles are read off the straight line at a fixed depth `z_ref`
//! ([`REFERENCE_Z`] by default), with `(x, y)` the extrapolated position there:
//!
//! | Quantity | Formula                      | Remark                                        |
//! |----------|------------------------------|-----------------------------------------------|
//! | `Theta`  | `sqrt(x² + y²) / z_ref`      | small-angle polar angle, no `atan2`           |
//! | `Phi`    | `acos(x / sqrt(x² + y²))`    | in `[0, π]`, the sign of `y` is lost          |
//! | `Eta`    | `-ln(Theta / 2)`             | no tangent, differs from `-ln(tan(θ/2))`      |
//!
//! These formulas are kept as they are. A caller that needs a full-circle azimuth
//! flips `Phi` itself when `y < 0`.
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{Millimeter, Radian, REFERENCE_Z},
    pixtrack_errors::PixTrackError,
    tracking_config::TrackingConfig,
    tracks::Track,
};

/// Angular quantities of a track evaluated at one reference depth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kinematics {
    pub theta: Radian,
    pub phi: Radian,
    pub eta: f32,
}

fn theta_at(x: Millimeter, y: Millimeter, z_ref: Millimeter) -> Radian {
    (x * x + y * y).sqrt() / z_ref
}

fn phi_at(x: Millimeter, y: Millimeter) -> Result<Radian, PixTrackError> {
    let cos_phi = x / (x * x + y * y).sqrt();
    if !(-1.0..=1.0).contains(&cos_phi) {
        debug!("Phi undefined at ({x}, {y}): arccosine argument {cos_phi}");
        return Err(PixTrackError::DomainError(cos_phi));
    }
    Ok(cos_phi.acos())
}

fn eta_from_theta(theta: Radian) -> f32 {
    -(theta / 2.0).ln()
}

impl Track {
    /// Polar angle at [`REFERENCE_Z`], small-angle approximation
    pub fn theta(&self) -> Radian {
        theta_at(
            self.x_at_z(REFERENCE_Z),
            self.y_at_z(REFERENCE_Z),
            REFERENCE_Z,
        )
    }

    /// Azimuthal angle at [`REFERENCE_Z`], in `[0, π]`
    ///
    /// Return
    /// ------
    /// * [`PixTrackError::DomainError`] when the arccosine argument leaves `[-1, 1]`,
    ///   including the NaN produced by a track crossing the beam line at the reference depth
    pub fn phi(&self) -> Result<Radian, PixTrackError> {
        phi_at(self.x_at_z(REFERENCE_Z), self.y_at_z(REFERENCE_Z))
    }

    /// Pseudorapidity-like quantity `-ln(Theta / 2)`.
    ///
    /// Infinite when `Theta` is zero, NaN when `Theta` is NaN (a track with a NaN
    /// parameter). Neither case is reported as an error, check with `is_finite` if needed.
    pub fn eta(&self) -> f32 {
        eta_from_theta(self.theta())
    }

    /// `Theta`, `Phi` and `Eta` at the reference depth of `config`.
    ///
    /// Return
    /// ------
    /// * [`PixTrackError::DegenerateFit`] when `config.reference_z` is not a finite positive depth
    /// * [`PixTrackError::DomainError`] when `Phi` is undefined, as for [`Track::phi`]
    pub fn kinematics(&self, config: &TrackingConfig) -> Result<Kinematics, PixTrackError> {
        config.validate()?;
        let z_ref = config.reference_z;
        let x = self.x_at_z(z_ref);
        let y = self.y_at_z(z_ref);

        let theta = theta_at(x, y, z_ref);
        Ok(Kinematics {
            theta,
            phi: phi_at(x, y)?,
            eta: eta_from_theta(theta),
        })
    }
}

#[cfg(test)]
mod kinematics_test {
    use super::*;
    use crate::hits::hit_pool::HitPool;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn line_through(x1: f32, y1: f32, z1: f32, x2: f32, y2: f32, z2: f32) -> Track {
        let mut pool = HitPool::new();
        pool.push_hit(0, x1, y1, z1, 1.0, 1.0, 0);
        pool.push_hit(1, x2, y2, z2, 1.0, 1.0, 1);
        Track::seed(&pool, 0, 1).unwrap()
    }

    #[test]
    fn test_theta() {
        // at z = 100: (3, 4)
        let track = line_through(0.0, 0.0, 0.0, 0.3, 0.4, 10.0);
        assert_relative_eq!(track.theta(), 0.05, epsilon = 1e-6);
        assert_relative_eq!(track.eta(), -(0.025_f32).ln(), epsilon = 1e-5);
    }

    #[test]
    fn test_phi_half_circle() {
        let up = line_through(0.0, 0.0, 0.0, 0.0, 1.0, 10.0);
        assert_relative_eq!(up.phi().unwrap(), FRAC_PI_2, epsilon = 1e-6);

        // the sign of y is lost
        let down = line_through(0.0, 0.0, 0.0, 0.0, -1.0, 10.0);
        assert_relative_eq!(down.phi().unwrap(), FRAC_PI_2, epsilon = 1e-6);

        let backward = line_through(0.0, 0.0, 0.0, -1.0, 0.0, 10.0);
        assert_relative_eq!(backward.phi().unwrap(), PI, epsilon = 1e-6);
    }

    #[test]
    fn test_phi_domain_error() {
        // crosses the beam line exactly at z = 100
        let track = line_through(1.5625, 1.5625, 0.0, 0.0, 0.0, 100.0);
        assert!(matches!(track.phi(), Err(PixTrackError::DomainError(v)) if v.is_nan()));
        assert_eq!(track.eta(), f32::INFINITY);
    }

    #[test]
    fn test_kinematics_with_config() {
        let track = line_through(0.0, 0.0, 0.0, 0.3, 0.4, 10.0);

        let at_default = track.kinematics(&TrackingConfig::default()).unwrap();
        assert_eq!(at_default.theta, track.theta());
        assert_eq!(at_default.phi, track.phi().unwrap());
        assert_eq!(at_default.eta, track.eta());

        // a line through the origin has the same angles everywhere
        let far = track
            .kinematics(&TrackingConfig::default().with_reference_z(500.0))
            .unwrap();
        assert_relative_eq!(far.theta, 0.05, epsilon = 1e-6);
        assert_relative_eq!(far.phi, at_default.phi, epsilon = 1e-6);

        assert!(track
            .kinematics(&TrackingConfig::default().with_reference_z(0.0))
            .is_err());
    }

    #[test]
    fn test_kinematics_behind_the_origin() {
        let track = line_through(0.0, 0.0, 0.0, 0.3, 0.4, 10.0);
        assert!(matches!(
            track.kinematics(&TrackingConfig::default().with_reference_z(-100.0)),
            Err(PixTrackError::DegenerateFit(_))
        ));
    }

    #[test]
    fn test_eta_of_a_nan_track() {
        let track = line_through(0.0, 0.0, 0.0, f32::NAN, 0.4, 10.0);
        assert!(track.theta().is_nan());
        assert!(track.eta().is_nan());
    }
}
