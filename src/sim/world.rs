/// Round: the complete state of one play-through.
///
/// ## Ownership
///
/// The round owns the grid outright. Entities hold only their positions and
/// borrow the grid (read-only) from the round when they move. The step
/// function is the single writer of grid cells.
///
/// ## Lifecycle
///
///   - built fresh per round by `level::build_round`
///   - advanced by `step::step` once per tick while `running`
///   - frozen once `outcome` leaves `Ongoing`; further steps are no-ops

use std::time::{Duration, Instant};

use crate::domain::entity::{Hazard, Player, Position};
use crate::domain::grid::Grid;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    Ongoing,
    /// A hazard reached the player.
    Lost,
    /// The player reached the finish.
    Won,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }
}

/// Elapsed-time bookkeeping for the stats readout.
#[derive(Clone, Debug)]
pub struct Stats {
    started: Instant,
    elapsed: Duration,
    ticks: u64,
}

impl Stats {
    pub fn new() -> Self {
        Stats { started: Instant::now(), elapsed: Duration::ZERO, ticks: 0 }
    }

    /// Count one tick and refresh the elapsed time.
    pub fn tick(&mut self) {
        self.ticks += 1;
        self.elapsed = self.started.elapsed();
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

pub struct Round {
    pub(super) grid: Grid,
    pub(super) player: Player,
    /// Advanced in this order every tick.
    pub(super) hazards: Vec<Hazard>,
    pub(super) finish: Position,
    pub(super) running: bool,
    pub(super) outcome: Outcome,
    pub(super) stats: Stats,
}

impl Round {
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn hazards(&self) -> &[Hazard] {
        &self.hazards
    }

    pub fn finish(&self) -> Position {
        self.finish
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_ongoing_is_not_terminal() {
        assert!(!Outcome::Ongoing.is_terminal());
        assert!(Outcome::Lost.is_terminal());
        assert!(Outcome::Won.is_terminal());
    }

    #[test]
    fn stats_count_ticks() {
        let mut s = Stats::new();
        assert_eq!(s.ticks(), 0);
        assert_eq!(s.elapsed(), Duration::ZERO);
        s.tick();
        s.tick();
        assert_eq!(s.ticks(), 2);
    }
}
