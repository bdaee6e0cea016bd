//! Lightning strikes
//!
//! When thunder is triggered, a percentage of the current mature trees is
//! sampled uniformly without replacement and turned into [`Cell::Thunder`].
//! Thunder cells ignite unconditionally on the following step.
//!
//! The trigger comes from [`ThunderSchedule`] (every N advancing steps) or
//! from an on-demand request relayed by the control channel.

use crate::core_types::Cell;
use rand::seq::index;
use rand::Rng;
use tracing::debug;

/// Number of cells to pick from `population` at `percentage` (0-100)
pub fn sample_count(population: usize, percentage: u32) -> usize {
    population * percentage.min(100) as usize / 100
}

/// Replace a uniform sample of the cells matching `filter` with `replacement`
///
/// Samples `percentage` percent of the matching cells, rounded down, without
/// replacement. Returns the number of cells converted.
pub fn convert_sample<R, F>(
    cells: &mut [Cell],
    filter: F,
    percentage: u32,
    replacement: Cell,
    rng: &mut R,
) -> usize
where
    R: Rng + ?Sized,
    F: Fn(&Cell) -> bool,
{
    let candidates: Vec<usize> = cells
        .iter()
        .enumerate()
        .filter(|(_, cell)| filter(cell))
        .map(|(i, _)| i)
        .collect();

    let count = sample_count(candidates.len(), percentage);
    if count == 0 {
        return 0;
    }

    for picked in index::sample(rng, candidates.len(), count) {
        cells[candidates[picked]] = replacement;
    }
    count
}

/// Strike `percentage` percent of the mature trees with lightning
pub fn inject_thunder<R: Rng + ?Sized>(cells: &mut [Cell], percentage: u32, rng: &mut R) -> usize {
    let struck = convert_sample(cells, |cell| *cell == Cell::Tree, percentage, Cell::Thunder, rng);
    debug!("Thunder struck {} trees ({}%)", struck, percentage.min(100));
    struck
}

/// Interval-based thunder trigger
///
/// Counts advancing steps since the last strike. A strike fires once the
/// count reaches the interval, then the count restarts. Comparing with `>=`
/// means that shortening the interval while already overdue fires on the
/// very next step. An interval of 0 disables scheduled thunder.
#[derive(Debug, Clone, Default)]
pub struct ThunderSchedule {
    steps_since_strike: u32,
    last_interval: u32,
}

impl ThunderSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Steps counted since the last strike
    pub fn steps_since_strike(&self) -> u32 {
        self.steps_since_strike
    }

    /// Count one advancing step; returns `true` if thunder is due
    pub fn advance(&mut self, steps_between_thunder: u32) -> bool {
        if steps_between_thunder != self.last_interval {
            debug!(
                "Thunder interval changed {} -> {} ({} steps since last strike)",
                self.last_interval, steps_between_thunder, self.steps_since_strike
            );
            self.last_interval = steps_between_thunder;
        }

        if steps_between_thunder == 0 {
            self.steps_since_strike = 0;
            return false;
        }

        self.steps_since_strike = self.steps_since_strike.saturating_add(1);
        if self.steps_since_strike >= steps_between_thunder {
            self.steps_since_strike = 0;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sample_count() {
        assert_eq!(sample_count(200, 5), 10);
        assert_eq!(sample_count(19, 10), 1);
        assert_eq!(sample_count(9, 10), 0);
        assert_eq!(sample_count(50, 250), 50);
    }

    #[test]
    fn test_thunder_only_strikes_trees() {
        let mut cells = vec![Cell::Grass; 50];
        cells.extend(vec![Cell::Tree; 50]);
        cells.extend(vec![Cell::SAPLING; 10]);
        let mut rng = StdRng::seed_from_u64(42);

        let struck = inject_thunder(&mut cells, 20, &mut rng);

        assert_eq!(struck, 10);
        assert_eq!(cells.iter().filter(|c| **c == Cell::Thunder).count(), 10);
        assert_eq!(cells.iter().filter(|c| **c == Cell::Tree).count(), 40);
        assert_eq!(cells.iter().filter(|c| **c == Cell::Grass).count(), 50);
        assert!(cells[..50].iter().all(|c| *c == Cell::Grass));
    }

    #[test]
    fn test_full_percentage_strikes_every_tree() {
        let mut cells = vec![Cell::Tree; 12];
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(inject_thunder(&mut cells, 100, &mut rng), 12);
        assert!(cells.iter().all(|c| *c == Cell::Thunder));
    }

    #[test]
    fn test_schedule_every_n_steps() {
        let mut schedule = ThunderSchedule::new();
        let fired: Vec<bool> = (0..7).map(|_| schedule.advance(3)).collect();
        assert_eq!(fired, vec![false, false, true, false, false, true, false]);
    }

    #[test]
    fn test_schedule_disabled_at_zero() {
        let mut schedule = ThunderSchedule::new();
        assert!((0..20).all(|_| !schedule.advance(0)));
        assert_eq!(schedule.steps_since_strike(), 0);
    }

    #[test]
    fn test_shortened_interval_fires_immediately_when_overdue() {
        let mut schedule = ThunderSchedule::new();
        for _ in 0..6 {
            assert!(!schedule.advance(10));
        }
        // Six steps in, the interval drops to 4: already overdue
        assert!(schedule.advance(4));
        assert_eq!(schedule.steps_since_strike(), 0);
    }
}
