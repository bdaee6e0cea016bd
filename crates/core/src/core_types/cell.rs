//! Cell states for the forest automaton
//!
//! Every cell on the grid is exactly one [`Cell`] variant. Counters live on the
//! variants that need them: growth progress on saplings and young trees, decay
//! age on burned ground. Burning variants carry their stage so the burn
//! progression is visible to the renderer.
//!
//! # Stream codes
//!
//! Each variant maps to a short string code used in the NDJSON output stream.
//! The mapping is injective over variants (counters are not encoded):
//!
//! | Variant | Code |
//! |---|---|
//! | Water | `W` |
//! | Grass | `G` |
//! | Tree | `T` |
//! | Sapling | `s` |
//! | YoungTree | `y` |
//! | BurningTree 1/2/3 | `*` / `**` / `***` |
//! | BurningSapling | `!` |
//! | BurningYoungTree 1/2 | `&` / `@` |
//! | BurningGrass | `+` |
//! | Thunder | `TH` |
//! | BurnedTree | `A` |
//! | BurnedGrass | `-` |

/// Number of burn stages a mature tree passes through
pub const TREE_BURN_STAGES: u8 = 3;

/// Number of burn stages a young tree passes through
pub const YOUNG_TREE_BURN_STAGES: u8 = 2;

/// Vegetation class used to select a base ignition probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VegetationClass {
    Grass,
    Tree,
    Sapling,
    YoungTree,
}

/// State of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Never burns, never changes
    Water,
    Grass,
    /// Mature tree
    Tree,
    /// First succession stage after a burned tree; `growth` counts steps lived
    Sapling { growth: u32 },
    /// Second succession stage; `growth` counts steps since becoming young
    YoungTree { growth: u32 },
    /// Mature tree on fire, `stage` in `1..=TREE_BURN_STAGES`
    BurningTree { stage: u8 },
    BurningSapling,
    /// Young tree on fire, `stage` in `1..=YOUNG_TREE_BURN_STAGES`
    BurningYoungTree { stage: u8 },
    BurningGrass,
    /// Lightning strike, ignites unconditionally on the next step
    Thunder,
    /// Burned-out tree; `age` counts steps since the fire went out
    BurnedTree { age: u32 },
    /// Burned-out grass; `age` counts steps since the fire went out
    BurnedGrass { age: u32 },
}

impl Cell {
    /// New sapling with no growth
    pub const SAPLING: Cell = Cell::Sapling { growth: 0 };

    /// New young tree with no growth
    pub const YOUNG_TREE: Cell = Cell::YoungTree { growth: 0 };

    /// Check if the cell is in any burning stage
    ///
    /// Thunder is not burning: it is an ignition source that turns into a
    /// burning tree on the following step.
    pub const fn is_burning(&self) -> bool {
        matches!(
            self,
            Cell::BurningTree { .. }
                | Cell::BurningSapling
                | Cell::BurningYoungTree { .. }
                | Cell::BurningGrass
        )
    }

    /// Check if the cell holds living vegetation
    pub const fn is_living(&self) -> bool {
        matches!(
            self,
            Cell::Grass | Cell::Tree | Cell::Sapling { .. } | Cell::YoungTree { .. }
        )
    }

    /// Check if the cell is burned ground waiting for succession
    pub const fn is_burned(&self) -> bool {
        matches!(self, Cell::BurnedTree { .. } | Cell::BurnedGrass { .. })
    }

    /// Check if the cell can seed regrowth on an adjacent burned cell
    ///
    /// Living vegetation and water both qualify.
    pub const fn is_seed_source(&self) -> bool {
        self.is_living() || matches!(self, Cell::Water)
    }

    /// Vegetation class for flammable cells, `None` for everything else
    pub const fn vegetation_class(&self) -> Option<VegetationClass> {
        match self {
            Cell::Grass => Some(VegetationClass::Grass),
            Cell::Tree => Some(VegetationClass::Tree),
            Cell::Sapling { .. } => Some(VegetationClass::Sapling),
            Cell::YoungTree { .. } => Some(VegetationClass::YoungTree),
            _ => None,
        }
    }

    /// First burning stage for a flammable cell
    ///
    /// Non-flammable cells are returned unchanged.
    pub const fn ignited(self) -> Cell {
        match self {
            Cell::Grass => Cell::BurningGrass,
            Cell::Tree => Cell::BurningTree { stage: 1 },
            Cell::Sapling { .. } => Cell::BurningSapling,
            Cell::YoungTree { .. } => Cell::BurningYoungTree { stage: 1 },
            other => other,
        }
    }

    /// Growth or decay counter, zero for variants without one
    pub const fn counter(&self) -> u32 {
        match self {
            Cell::Sapling { growth } | Cell::YoungTree { growth } => *growth,
            Cell::BurnedTree { age } | Cell::BurnedGrass { age } => *age,
            _ => 0,
        }
    }

    /// Short code written to the output stream
    pub const fn code(&self) -> &'static str {
        match self {
            Cell::Water => "W",
            Cell::Grass => "G",
            Cell::Tree => "T",
            Cell::Sapling { .. } => "s",
            Cell::YoungTree { .. } => "y",
            Cell::BurningTree { stage: 0 | 1 } => "*",
            Cell::BurningTree { stage: 2 } => "**",
            Cell::BurningTree { .. } => "***",
            Cell::BurningSapling => "!",
            Cell::BurningYoungTree { stage: 0 | 1 } => "&",
            Cell::BurningYoungTree { .. } => "@",
            Cell::BurningGrass => "+",
            Cell::Thunder => "TH",
            Cell::BurnedTree { .. } => "A",
            Cell::BurnedGrass { .. } => "-",
        }
    }

    /// Decode a stream code back into a cell
    ///
    /// Counters are not part of the code, so decoded growth and decay
    /// counters are zero.
    pub fn from_code(code: &str) -> Option<Cell> {
        let cell = match code {
            "W" => Cell::Water,
            "G" => Cell::Grass,
            "T" => Cell::Tree,
            "s" => Cell::SAPLING,
            "y" => Cell::YOUNG_TREE,
            "*" => Cell::BurningTree { stage: 1 },
            "**" => Cell::BurningTree { stage: 2 },
            "***" => Cell::BurningTree { stage: 3 },
            "!" => Cell::BurningSapling,
            "&" => Cell::BurningYoungTree { stage: 1 },
            "@" => Cell::BurningYoungTree { stage: 2 },
            "+" => Cell::BurningGrass,
            "TH" => Cell::Thunder,
            "A" => Cell::BurnedTree { age: 0 },
            "-" => Cell::BurnedGrass { age: 0 },
            _ => return None,
        };
        Some(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn every_variant() -> Vec<Cell> {
        vec![
            Cell::Water,
            Cell::Grass,
            Cell::Tree,
            Cell::SAPLING,
            Cell::YOUNG_TREE,
            Cell::BurningTree { stage: 1 },
            Cell::BurningTree { stage: 2 },
            Cell::BurningTree { stage: 3 },
            Cell::BurningSapling,
            Cell::BurningYoungTree { stage: 1 },
            Cell::BurningYoungTree { stage: 2 },
            Cell::BurningGrass,
            Cell::Thunder,
            Cell::BurnedTree { age: 0 },
            Cell::BurnedGrass { age: 0 },
        ]
    }

    #[test]
    fn test_codes_are_unique() {
        let cells = every_variant();
        let codes: HashSet<&str> = cells.iter().map(Cell::code).collect();
        assert_eq!(codes.len(), cells.len());
    }

    #[test]
    fn test_codes_decode_to_same_variant() {
        for cell in every_variant() {
            assert_eq!(Cell::from_code(cell.code()), Some(cell), "code {}", cell.code());
        }
        assert_eq!(Cell::from_code("?"), None);
    }

    #[test]
    fn test_counters_not_encoded() {
        assert_eq!(Cell::Sapling { growth: 7 }.code(), "s");
        assert_eq!(Cell::BurnedGrass { age: 12 }.code(), "-");
        assert_eq!(Cell::BurnedTree { age: 3 }.counter(), 3);
        assert_eq!(Cell::Tree.counter(), 0);
    }

    #[test]
    fn test_classification() {
        assert!(Cell::BurningSapling.is_burning());
        assert!(!Cell::Thunder.is_burning());
        assert!(Cell::Water.is_seed_source());
        assert!(!Cell::Water.is_living());
        assert!(!Cell::BurnedTree { age: 40 }.is_seed_source());
        assert_eq!(Cell::Water.vegetation_class(), None);
        assert_eq!(
            Cell::YOUNG_TREE.vegetation_class(),
            Some(VegetationClass::YoungTree)
        );
    }

    #[test]
    fn test_ignition_targets() {
        assert_eq!(Cell::Tree.ignited(), Cell::BurningTree { stage: 1 });
        assert_eq!(Cell::SAPLING.ignited(), Cell::BurningSapling);
        assert_eq!(Cell::YOUNG_TREE.ignited(), Cell::BurningYoungTree { stage: 1 });
        assert_eq!(Cell::Grass.ignited(), Cell::BurningGrass);
        assert_eq!(Cell::Water.ignited(), Cell::Water);
    }
}
