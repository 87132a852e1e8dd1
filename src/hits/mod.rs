//! # Pixel hits
//!
//! A [`Hit`] is a single measurement of a pixel module: a 3D position, the per-axis
//! inverse errors (`1/σ`), the module it was recorded on and a flag telling whether an
//! accepted track already claimed it.
//!
//! Hits are owned by an event-scoped [`HitPool`](crate::hits::hit_pool::HitPool); tracks only
//! store their [`HitIndex`](crate::constants::HitIndex).
//!
//! ## Sorting
//!
//! The comparators [`decreasing_by_z`], [`increasing_by_z`], [`lower_by_x`] and [`lower_by_y`]
//! plug into `sort_by`. Ties keep their relative order only with a stable sort.
pub mod hit_pool;

use std::{cmp::Ordering, fmt};

use serde::{Deserialize, Serialize};

use crate::constants::{HitId, Millimeter, ModuleId};

/// A pixel measurement
///
/// # Fields
///
/// * `id` - Channel identifier
/// * `x`, `y`, `z` - Global position
/// * `wxerr`, `wyerr` - Weight (1 / error) in x and y
/// * `module` - Module number
/// * `used` - Already associated to an accepted track?
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    id: HitId,
    x: Millimeter,
    y: Millimeter,
    z: Millimeter,
    wxerr: f32,
    wyerr: f32,
    module: ModuleId,
    used: bool,
}

impl Hit {
    /// Create a new unused hit
    ///
    /// Arguments
    /// ---------
    /// * `id`: the channel identifier
    /// * `x`, `y`, `z`: the global position
    /// * `wxerr`, `wyerr`: the inverse errors in x and y
    /// * `module`: the module number
    pub fn new(
        id: HitId,
        x: Millimeter,
        y: Millimeter,
        z: Millimeter,
        wxerr: f32,
        wyerr: f32,
        module: ModuleId,
    ) -> Self {
        let mut hit = Hit::default();
        hit.set_hit(id, x, y, z, wxerr, wyerr, module);
        hit
    }

    /// Overwrite every field of the hit and reset the `used` flag.
    ///
    /// No range is enforced: zero weights are accepted and only make [`Hit::chi2`] degenerate.
    #[allow(clippy::too_many_arguments)]
    pub fn set_hit(
        &mut self,
        id: HitId,
        x: Millimeter,
        y: Millimeter,
        z: Millimeter,
        wxerr: f32,
        wyerr: f32,
        module: ModuleId,
    ) {
        self.id = id;
        self.x = x;
        self.y = y;
        self.z = z;
        self.wxerr = wxerr;
        self.wyerr = wyerr;
        self.module = module;
        self.used = false;
    }

    pub fn id(&self) -> HitId {
        self.id
    }

    pub fn x(&self) -> Millimeter {
        self.x
    }

    pub fn y(&self) -> Millimeter {
        self.y
    }

    pub fn z(&self) -> Millimeter {
        self.z
    }

    /// Precision in x (1 / σx²)
    pub fn wx(&self) -> f32 {
        self.wxerr * self.wxerr
    }

    /// Precision in y (1 / σy²)
    pub fn wy(&self) -> f32 {
        self.wyerr * self.wyerr
    }

    pub fn wxerr(&self) -> f32 {
        self.wxerr
    }

    pub fn wyerr(&self) -> f32 {
        self.wyerr
    }

    pub fn module(&self) -> ModuleId {
        self.module
    }

    pub fn is_used(&self) -> bool {
        self.used
    }

    pub fn set_used(&mut self, flag: bool) {
        self.used = flag;
    }

    /// Exact position equality, used to spot duplicated hits.
    ///
    /// Coordinates are compared with `==`, so any upstream rounding makes two
    /// hits of the same pixel look different.
    pub fn compare_hits(&self, other: &Hit) -> bool {
        other.x == self.x && other.y == self.y && other.z == self.z
    }

    /// Distance in the x-y plane to a point given at the hit depth
    ///
    /// Arguments
    /// ---------
    /// * `x`, `y`: the point, already extrapolated to `self.z()`
    ///
    /// Return
    /// ------
    /// * the transverse euclidean distance, zero only at the hit position
    pub fn distance(&self, x: Millimeter, y: Millimeter) -> Millimeter {
        let dx = x - self.x;
        let dy = y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Weighted squared residual (distance² / σ²) to a point given at the hit depth
    pub fn chi2(&self, x: Millimeter, y: Millimeter) -> f32 {
        let dx = self.wxerr * (x - self.x);
        let dy = self.wyerr * (y - self.y);
        dx * dx + dy * dy
    }
}

impl fmt::Display for Hit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({} ,{} ,{} ,{} ,{} ,{} ,{} ,{})",
            self.id,
            self.x,
            self.y,
            self.z,
            self.wxerr,
            self.wyerr,
            self.module,
            u8::from(self.used)
        )
    }
}

fn compare_coordinate(lhs: Millimeter, rhs: Millimeter) -> Ordering {
    lhs.partial_cmp(&rhs).unwrap_or(Ordering::Equal)
}

/// Hits with the largest z first
pub fn decreasing_by_z(lhs: &Hit, rhs: &Hit) -> Ordering {
    compare_coordinate(rhs.z, lhs.z)
}

/// Hits with the smallest z first
pub fn increasing_by_z(lhs: &Hit, rhs: &Hit) -> Ordering {
    compare_coordinate(lhs.z, rhs.z)
}

pub fn lower_by_x(lhs: &Hit, rhs: &Hit) -> Ordering {
    compare_coordinate(lhs.x, rhs.x)
}

pub fn lower_by_y(lhs: &Hit, rhs: &Hit) -> Ordering {
    compare_coordinate(lhs.y, rhs.y)
}
