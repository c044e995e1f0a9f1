//! `DistanceIndex` — "how far is address X from address Y?"
//!
//! # Source layout
//!
//! ```text
//!             , HUB , A   , B
//! HUB         , 0.0 ,     ,
//! A           , 7.2 , 0.0 ,
//! B           , 3.8 , 7.1 , 0.0
//! ```
//!
//! Row 0 is the header: a corner cell followed by one address per column,
//! `HUB` first.  Every other row starts with its own address.  Only one
//! triangle is usually populated, so each numeric cell is stored under both
//! (column → row) and (row → column).

use hs_core::AssociativeTable;
use tracing::trace;

use crate::{DataError, DataResult};

/// The distinguished origin/return address of every route.
pub const HUB: &str = "HUB";

/// Symmetric address-pair distance lookup built as a table of tables.
#[derive(Debug, Clone, Default)]
pub struct DistanceIndex {
    table: AssociativeTable<String, AssociativeTable<String, f64>>,
}

impl DistanceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw grid rows (see the module docs for the layout).
    ///
    /// Blank, non-numeric and negative cells are skipped.
    pub fn from_rows<R: AsRef<str>>(rows: &[Vec<R>]) -> Self {
        let mut index = Self::new();
        for (a, b, miles) in defined_cells(rows) {
            index.insert(a, b, miles);
        }
        index
    }

    /// Record `miles` under both `a → b` and `b → a`.
    pub fn insert(&mut self, a: &str, b: &str, miles: f64) {
        self.insert_directed(a, b, miles);
        self.insert_directed(b, a, miles);
    }

    pub(crate) fn insert_directed(&mut self, from: &str, to: &str, miles: f64) {
        if !self.table.contains(from) {
            self.table.put(from.to_owned(), AssociativeTable::new());
        }
        if let Ok(row) = self.table.get_mut(from) {
            row.put(to.to_owned(), miles);
        }
    }

    /// Distance between two indexed addresses. An address is 0 miles from
    /// itself even when the grid leaves the diagonal blank.
    pub fn get_distance(&self, a: &str, b: &str) -> DataResult<f64> {
        let row = self
            .table
            .get(a)
            .map_err(|_| DataError::AddressNotFound(a.to_owned()))?;
        if !self.table.contains(b) {
            return Err(DataError::AddressNotFound(b.to_owned()));
        }
        if a == b {
            return Ok(0.0);
        }
        row.get(b).copied().map_err(|_| DataError::MissingDistance {
            from: a.to_owned(),
            to:   b.to_owned(),
        })
    }

    #[inline]
    pub fn contains_address(&self, address: &str) -> bool {
        self.table.contains(address)
    }

    #[inline]
    pub fn address_count(&self) -> usize {
        self.table.len()
    }

    /// Every indexed address, sorted.
    pub fn addresses(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.table.keys().map(String::as_str).collect();
        out.sort_unstable();
        out
    }

    /// Check that every stored `a → b` has an equal `b → a`.
    pub fn verify_symmetry(&self) -> DataResult<()> {
        for (a, row) in self.table.iter() {
            for (b, &forward) in row.iter() {
                let backward = self
                    .table
                    .get(b.as_str())
                    .ok()
                    .and_then(|r| r.get(a.as_str()).ok())
                    .copied();
                if backward != Some(forward) {
                    return Err(DataError::Asymmetric {
                        from: a.clone(),
                        to: b.clone(),
                        forward,
                        backward,
                    });
                }
            }
        }
        Ok(())
    }

    /// Check every numeric source cell against the index.
    ///
    /// Catches grids that fill both triangles with different values: the
    /// later cell overwrote the earlier one during the build, so the earlier
    /// cell no longer matches.
    pub fn verify_against<R: AsRef<str>>(&self, rows: &[Vec<R>]) -> DataResult<()> {
        for (a, b, cell) in defined_cells(rows) {
            let indexed = self.get_distance(a, b)?;
            if indexed != cell {
                return Err(DataError::ConflictingCell {
                    from: a.to_owned(),
                    to: b.to_owned(),
                    cell,
                    indexed,
                });
            }
        }
        Ok(())
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Yield `(column address, row address, miles)` for every usable cell.
fn defined_cells<R: AsRef<str>>(rows: &[Vec<R>]) -> impl Iterator<Item = (&str, &str, f64)> {
    let header: &[R] = rows.first().map(Vec::as_slice).unwrap_or(&[]);

    header
        .iter()
        .enumerate()
        .skip(1)
        .map(|(col, a)| (col, a.as_ref().trim()))
        .filter(|(_, a)| !a.is_empty())
        .flat_map(move |(col, a)| {
            rows.iter().skip(1).filter_map(move |row| {
                let b = row.first()?.as_ref().trim();
                if b.is_empty() {
                    return None;
                }
                let raw = row.get(col)?.as_ref();
                match parse_cell(raw) {
                    Some(miles) => Some((a, b, miles)),
                    None => {
                        if !raw.trim().is_empty() {
                            trace!(from = a, to = b, cell = raw, "skipping malformed distance cell");
                        }
                        None
                    }
                }
            })
        })
}

fn parse_cell(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite() && *d >= 0.0)
}
