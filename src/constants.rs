//! # Constants and type definitions for pixtrack
//!
//! This module centralizes the **geometric constants** and **common type definitions** used
//! throughout the `pixtrack` library. It also defines the container types used to hold
//! hit references and finalized tracks.
//!
//! ## Overview
//!
//! - Straight-line fit bookkeeping (parameters, measurements per hit)
//! - Reference depth for the track kinematics
//! - Core type aliases used across the crate
//! - Container types for track hit lists and track collections
//!
//! All lengths follow the detector convention (millimeters along the beam axis `z`).

use crate::tracks::Track;
use smallvec::SmallVec;

// -------------------------------------------------------------------------------------------------
// Fit bookkeeping and reference values
// -------------------------------------------------------------------------------------------------

/// Depth along the beam axis at which `Theta`, `Phi` and `Eta` are evaluated
pub const REFERENCE_Z: Millimeter = 100.0;

/// Number of straight-line parameters (tx, ty, x0, y0)
pub const NB_FIT_PARAMETERS: usize = 4;

/// Number of independent measurements carried by a single hit (x and y)
pub const MEASUREMENTS_PER_HIT: usize = 2;

/// Minimal number of hits for a strictly positive number of degrees of freedom
pub const MIN_HITS_FOR_CHI2: usize = 3;

/// Minimal number of hits for a weighted straight-line refit
pub const MIN_HITS_FOR_FIT: usize = 2;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Length in millimeters
pub type Millimeter = f32;
/// Angle in radians
pub type Radian = f32;
/// Channel identifier of a hit
pub type HitId = i32;
/// Detector module number
pub type ModuleId = u32;
/// Position of a hit inside its [`HitPool`](crate::hits::hit_pool::HitPool)
pub type HitIndex = usize;

// -------------------------------------------------------------------------------------------------
// Data containers
// -------------------------------------------------------------------------------------------------

/// Ordered, non-owning hit references of a single track.
///
/// Tracks rarely cross more than a dozen modules, so the list stays inline in most cases.
pub type TrackHits = SmallVec<[HitIndex; 12]>;

/// Finalized tracks, handed out by value once the search accepts them.
pub type Tracks = Vec<Track>;
