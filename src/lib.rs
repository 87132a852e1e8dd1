//! # pixtrack
//!
//! Measurement and trajectory model for straight-line track reconstruction in a stack of
//! planar pixel modules.
//!
//! - [`hits`] – single measurements ([`Hit`]) and their event-scoped owner ([`HitPool`])
//! - [`tracks`] – straight-line candidates ([`Track`]): seeding, chi2, closest approach to the
//!   beam, refit, kinematics and printing
//! - [`tracking_config`] – tunable values ([`TrackingConfig`])
//! - [`pixtrack_errors`] – numeric failure kinds ([`PixTrackError`])
//!
//! The pattern recognition itself (seeding strategy, extension, clone killing) lives in the
//! caller; this crate provides the geometry it relies on.
//!
//! ```rust
//! use pixtrack::{HitPool, Track, Tracks};
//!
//! let mut pool = HitPool::new();
//! let a = pool.push_hit(0, 1.0, 2.0, 0.0, 10.0, 10.0, 0);
//! let b = pool.push_hit(1, 3.0, 6.0, 10.0, 10.0, 10.0, 1);
//! let c = pool.push_hit(2, 5.0, 10.0, 20.0, 10.0, 10.0, 2);
//!
//! let mut track = Track::seed(&pool, a, b)?;
//! track.add_hit(c);
//! track.fit(&pool)?;
//! assert!(track.chi2(&pool)? < 1e-3);
//!
//! let mut accepted = Tracks::new();
//! track.accept_into(&mut pool, &mut accepted);
//! assert_eq!(track.nb_unused(&pool), 0);
//! # Ok::<(), pixtrack::PixTrackError>(())
//! ```
pub mod constants;
pub mod hits;
pub mod pixtrack_errors;
pub mod tracking_config;
pub mod tracks;

pub use constants::{HitIndex, Tracks};
pub use hits::{hit_pool::HitPool, Hit};
pub use pixtrack_errors::PixTrackError;
pub use tracking_config::TrackingConfig;
pub use tracks::{kinematics::Kinematics, Track};
