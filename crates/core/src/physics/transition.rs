//! Per-cell state machine
//!
//! [`next_cell`] computes the successor of one cell from the previous
//! snapshot only. The machine is total: every state has a successor.
//!
//! | Current | Next |
//! |---|---|
//! | Water | Water |
//! | Tree / Sapling / YoungTree / Grass | first burn stage if ignited, else grown |
//! | Thunder | BurningTree 1 |
//! | BurningTree 1 → 2 → 3 | BurnedTree 0 after stage 3 |
//! | BurningYoungTree 1 → 2 | BurnedTree 0 after stage 2 |
//! | BurningSapling | BurnedTree 0 |
//! | BurningGrass | BurnedGrass 0 |
//! | BurnedTree / BurnedGrass | regrown or aged (see [`super::regrowth`]) |

use super::ignition::ignites;
use super::regrowth::{
    burned_grass_successor, burned_tree_successor, grow_sapling, grow_young_tree,
};
use super::WindModel;
use crate::core_types::{
    Cell, SimulationParams, Snapshot, TREE_BURN_STAGES, YOUNG_TREE_BURN_STAGES,
};
use rand::Rng;

/// Everything a transition may read during one step
#[derive(Debug, Clone, Copy)]
pub struct TransitionContext<'a> {
    pub snapshot: Snapshot<'a>,
    pub wind: &'a WindModel,
    pub params: &'a SimulationParams,
}

/// Successor of the cell at `(x, y)`
pub fn next_cell<R: Rng + ?Sized>(
    ctx: &TransitionContext<'_>,
    x: usize,
    y: usize,
    rng: &mut R,
) -> Cell {
    let current = ctx.snapshot.get(x, y);
    match current {
        Cell::Water => Cell::Water,

        Cell::Grass | Cell::Tree | Cell::Sapling { .. } | Cell::YoungTree { .. } => {
            let Some(class) = current.vegetation_class() else {
                return current;
            };
            if ignites(&ctx.snapshot, x, y, class, ctx.wind, ctx.params, rng) {
                return current.ignited();
            }
            match current {
                Cell::Sapling { growth } => grow_sapling(growth, &ctx.params.growth),
                Cell::YoungTree { growth } => grow_young_tree(growth, &ctx.params.growth),
                other => other,
            }
        }

        Cell::Thunder => Cell::BurningTree { stage: 1 },

        Cell::BurningTree { stage } if stage < TREE_BURN_STAGES => {
            Cell::BurningTree { stage: stage + 1 }
        }
        Cell::BurningYoungTree { stage } if stage < YOUNG_TREE_BURN_STAGES => {
            Cell::BurningYoungTree { stage: stage + 1 }
        }
        Cell::BurningTree { .. } | Cell::BurningYoungTree { .. } | Cell::BurningSapling => {
            Cell::BurnedTree { age: 0 }
        }
        Cell::BurningGrass => Cell::BurnedGrass { age: 0 },

        Cell::BurnedTree { age } => {
            burned_tree_successor(age, &ctx.snapshot, x, y, &ctx.params.growth, rng)
        }
        Cell::BurnedGrass { age } => {
            burned_grass_successor(age, &ctx.snapshot, x, y, &ctx.params.growth, rng)
        }
    }
}
