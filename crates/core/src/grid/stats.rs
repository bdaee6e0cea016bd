//! Population counts per cell class
//!
//! The same tallies the analysis tooling derives from the output stream:
//! living, burning and burned counts for trees and grass, plus the
//! succession stages. Counting is a parallel reduction over the snapshot and
//! never touches the simulation's random source.

use crate::core_types::Cell;
use rayon::prelude::*;
use serde::Serialize;

/// Cell counts for one snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ForestStats {
    pub water: usize,
    pub grass: usize,
    pub trees: usize,
    pub saplings: usize,
    pub young_trees: usize,
    pub burning_grass: usize,
    pub burning_trees: usize,
    pub burning_saplings: usize,
    pub burning_young_trees: usize,
    pub thunder: usize,
    pub burned_grass: usize,
    pub burned_trees: usize,
}

impl ForestStats {
    /// Tally a snapshot
    pub fn from_cells(cells: &[Cell]) -> Self {
        cells
            .par_iter()
            .fold(ForestStats::default, |mut stats, cell| {
                stats.record(*cell);
                stats
            })
            .reduce(ForestStats::default, ForestStats::merge)
    }

    fn record(&mut self, cell: Cell) {
        let slot = match cell {
            Cell::Water => &mut self.water,
            Cell::Grass => &mut self.grass,
            Cell::Tree => &mut self.trees,
            Cell::Sapling { .. } => &mut self.saplings,
            Cell::YoungTree { .. } => &mut self.young_trees,
            Cell::BurningGrass => &mut self.burning_grass,
            Cell::BurningTree { .. } => &mut self.burning_trees,
            Cell::BurningSapling => &mut self.burning_saplings,
            Cell::BurningYoungTree { .. } => &mut self.burning_young_trees,
            Cell::Thunder => &mut self.thunder,
            Cell::BurnedGrass { .. } => &mut self.burned_grass,
            Cell::BurnedTree { .. } => &mut self.burned_trees,
        };
        *slot += 1;
    }

    fn merge(a: Self, b: Self) -> Self {
        Self {
            water: a.water + b.water,
            grass: a.grass + b.grass,
            trees: a.trees + b.trees,
            saplings: a.saplings + b.saplings,
            young_trees: a.young_trees + b.young_trees,
            burning_grass: a.burning_grass + b.burning_grass,
            burning_trees: a.burning_trees + b.burning_trees,
            burning_saplings: a.burning_saplings + b.burning_saplings,
            burning_young_trees: a.burning_young_trees + b.burning_young_trees,
            thunder: a.thunder + b.thunder,
            burned_grass: a.burned_grass + b.burned_grass,
            burned_trees: a.burned_trees + b.burned_trees,
        }
    }

    /// Cells currently on fire
    pub fn burning(&self) -> usize {
        self.burning_grass + self.burning_trees + self.burning_saplings + self.burning_young_trees
    }

    /// Burned-out cells awaiting succession
    pub fn burned(&self) -> usize {
        self.burned_grass + self.burned_trees
    }

    /// Cells holding living vegetation
    pub fn living(&self) -> usize {
        self.grass + self.trees + self.saplings + self.young_trees
    }

    /// Every non-water cell
    pub fn land(&self) -> usize {
        self.living() + self.burning() + self.thunder + self.burned()
    }

    /// Share of land that is burned out, in percent
    pub fn percent_burned(&self) -> f64 {
        let land = self.land();
        if land == 0 {
            return 0.0;
        }
        100.0 * self.burned() as f64 / land as f64
    }
}
