//! # Printing tracks with their hits
//!
//! A [`Track`] only stores hit indices, so printing it needs the [`HitPool`]. The display
//! adaptor [`TrackDisplay`] **borrows** both and renders with the usual formatting macros:
//!
//! - `{}` – compact, one line: `[ (id ,x ,y ,z ,wxerr ,wyerr ,module ,used)... ]`
//! - `{:#}` – a [`comfy-table`] table, one row per hit with its chi2 contribution, followed
//!   by the line parameters and the chi2 per degree of freedom.
//!
//! ```rust
//! use pixtrack::{hits::hit_pool::HitPool, tracks::Track};
//!
//! let mut pool = HitPool::new();
//! pool.push_hit(0, 1.0, 2.0, 0.0, 1.0, 1.0, 0);
//! pool.push_hit(1, 3.0, 6.0, 10.0, 1.0, 1.0, 1);
//! let track = Track::seed(&pool, 0, 1).unwrap();
//!
//! assert_eq!(
//!     track.show(&pool).to_string(),
//!     "[ (0 ,1 ,2 ,0 ,1 ,1 ,0 ,0)(1 ,3 ,6 ,10 ,1 ,1 ,1 ,0) ]"
//! );
//! println!("{:#}", track.show(&pool).with_precision(3));
//! ```
//!
//! [`comfy-table`]: https://crates.io/crates/comfy-table
use std::fmt;

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Row, Table};

use crate::{hits::hit_pool::HitPool, tracks::Track};

/// Display adaptor returned by [`Track::show`].
///
/// Hits missing from the pool are rendered as `(?index)` instead of failing.
pub struct TrackDisplay<'a> {
    track: &'a Track,
    pool: &'a HitPool,
    precision: usize,
}

impl TrackDisplay<'_> {
    /// Number of fractional digits in the table layout (default 4)
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    fn write_compact(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ ")?;
        for &index in self.track.hits().iter() {
            match self.pool.get(index) {
                Ok(hit) => write!(f, "{hit}")?,
                Err(_) => write!(f, "(?{index})")?,
            }
        }
        write!(f, " ]")
    }

    fn build_table(&self) -> Table {
        let p = self.precision;
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(vec![
            Cell::new("#"),
            Cell::new("id"),
            Cell::new("module"),
            Cell::new("x"),
            Cell::new("y"),
            Cell::new("z"),
            Cell::new("wxerr"),
            Cell::new("wyerr"),
            Cell::new("used"),
            Cell::new("chi2"),
        ]);

        for (rank, &index) in self.track.hits().iter().enumerate() {
            let Ok(hit) = self.pool.get(index) else {
                table.add_row(Row::from(vec![
                    Cell::new(rank).set_alignment(CellAlignment::Right),
                    Cell::new(format!("missing hit {index}")),
                ]));
                continue;
            };

            table.add_row(Row::from(vec![
                Cell::new(rank).set_alignment(CellAlignment::Right),
                Cell::new(hit.id()).set_alignment(CellAlignment::Right),
                Cell::new(hit.module()).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.*}", p, hit.x())).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.*}", p, hit.y())).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.*}", p, hit.z())).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.*}", p, hit.wxerr())).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.*}", p, hit.wyerr())).set_alignment(CellAlignment::Right),
                Cell::new(if hit.is_used() { "yes" } else { "no" }),
                Cell::new(format!("{:.*}", p, self.track.chi2_hit(hit)))
                    .set_alignment(CellAlignment::Right),
            ]));
        }
        table
    }

    fn write_table(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.precision;
        writeln!(f, "{}", self.build_table())?;
        write!(
            f,
            "tx = {:.*}, ty = {:.*}, x0 = {:.*}, y0 = {:.*}",
            p,
            self.track.tx(),
            p,
            self.track.ty(),
            p,
            self.track.x0(),
            p,
            self.track.y0()
        )?;
        match self.track.chi2(self.pool) {
            Ok(chi2) => write!(f, ", chi2/dof = {chi2:.p$}"),
            Err(err) => write!(f, ", chi2/dof unavailable ({err})"),
        }
    }
}

impl fmt::Display for TrackDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            self.write_table(f)
        } else {
            self.write_compact(f)
        }
    }
}

impl Track {
    /// Borrow the track and its pool for printing, see [`TrackDisplay`].
    pub fn show<'a>(&'a self, pool: &'a HitPool) -> TrackDisplay<'a> {
        TrackDisplay {
            track: self,
            pool,
            precision: 4,
        }
    }
}
