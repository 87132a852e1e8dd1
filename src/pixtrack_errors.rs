use thiserror::Error;

use crate::constants::HitIndex;

#[derive(Error, Debug)]
pub enum PixTrackError {
    #[error("Degenerate straight-line fit: {0}")]
    DegenerateFit(String),

    #[error("Arccosine argument outside [-1, 1]: {0}")]
    DomainError(f32),

    #[error("Not enough hits: found {found}, at least {required} required")]
    InsufficientHits { found: usize, required: usize },

    #[error("Hit not found in the pool: {0}")]
    HitNotFound(HitIndex),
}

impl PartialEq for PixTrackError {
    fn eq(&self, other: &Self) -> bool {
        use PixTrackError::*;
        match (self, other) {
            (DegenerateFit(a), DegenerateFit(b)) => a == b,

            // NaN is a legitimate payload here, compare bit patterns
            (DomainError(a), DomainError(b)) => a.to_bits() == b.to_bits(),

            (
                InsufficientHits {
                    found: f1,
                    required: r1,
                },
                InsufficientHits {
                    found: f2,
                    required: r2,
                },
            ) => f1 == f2 && r1 == r2,
            (HitNotFound(a), HitNotFound(b)) => a == b,

            _ => false,
        }
    }
}

impl PixTrackError {
    /// True for the purely numeric conditions (degenerate geometry, arccosine domain, too few hits).
    ///
    /// The search typically skips or penalizes a candidate on these, while
    /// [`PixTrackError::HitNotFound`] points to a bookkeeping bug in the caller.
    pub fn is_numeric(&self) -> bool {
        !matches!(self, PixTrackError::HitNotFound(_))
    }
}
