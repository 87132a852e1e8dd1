//! # Tracking configuration
//!
//! [`TrackingConfig`] gathers the few tunable values of the hit/track layer. It is a plain
//! `serde` value so the external search can load it together with its own settings.
//!
//! ```rust
//! use pixtrack::tracking_config::TrackingConfig;
//!
//! let config = TrackingConfig::default().with_reference_z(250.0);
//! assert!(config.validate().is_ok());
//! ```
use serde::{Deserialize, Serialize};

use crate::{
    constants::{Millimeter, REFERENCE_Z},
    pixtrack_errors::PixTrackError,
};

/// Settings shared by the track kinematics.
///
/// # Fields
///
/// * `reference_z` - Depth along the beam axis where `Theta`, `Phi` and `Eta` are evaluated
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub reference_z: Millimeter,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        TrackingConfig {
            reference_z: REFERENCE_Z,
        }
    }
}

impl TrackingConfig {
    pub fn with_reference_z(mut self, reference_z: Millimeter) -> Self {
        self.reference_z = reference_z;
        self
    }

    /// Check that the configuration can be used for the kinematics.
    ///
    /// Return
    /// ------
    /// * `Ok(())` or [`PixTrackError::DegenerateFit`] when `reference_z` is not a finite,
    ///   strictly positive depth (`Theta` divides by it and `Eta` takes its logarithm).
    pub fn validate(&self) -> Result<(), PixTrackError> {
        if !(self.reference_z.is_finite() && self.reference_z > 0.0) {
            return Err(PixTrackError::DegenerateFit(format!(
                "invalid reference depth {}",
                self.reference_z
            )));
        }
        Ok(())
    }
}
