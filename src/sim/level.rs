/// Level definition and round construction.
///
/// A level is a grid size plus start positions:
///   - one player spawn
///   - one finish marker (static)
///   - any number of hazards, advanced in the order listed
///
/// `build_round` validates the definition and stamps the opening frame.
///
/// ## Default layout (80×18)
///   Player at (2,5) must cross the waterfall column x=10 and the
///   oscillator column x=16 to reach the finish at (77,9).

use crate::domain::entity::{Hazard, Player, Position};
use crate::domain::grid::Grid;
use crate::domain::tile::Tile;
use crate::error::{GameError, GameResult};
use crate::sim::world::{Outcome, Round, Stats};

/// An oscillator needs two interior rows to bounce between.
const OSCILLATOR_MIN_HEIGHT: usize = 4;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HazardKind {
    Oscillating,
    Waterfall,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HazardDef {
    pub kind: HazardKind,
    pub at: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelDef {
    pub width: usize,
    pub height: usize,
    pub player: Position,
    pub finish: Position,
    pub hazards: Vec<HazardDef>,
}

impl Default for LevelDef {
    fn default() -> Self {
        LevelDef {
            width: 80,
            height: 18,
            player: Position::new(2, 5),
            finish: Position::new(77, 9),
            hazards: vec![
                HazardDef { kind: HazardKind::Waterfall, at: Position::new(10, 5) },
                HazardDef { kind: HazardKind::Oscillating, at: Position::new(16, 5) },
            ],
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Public API
// ══════════════════════════════════════════════════════════════

/// Build a fresh round from a level definition.
pub fn build_round(def: &LevelDef) -> GameResult<Round> {
    let mut grid = Grid::new(def.width, def.height)?;
    validate(def, &grid)?;

    let hazards: Vec<Hazard> = def
        .hazards
        .iter()
        .map(|h| match h.kind {
            HazardKind::Oscillating => Hazard::oscillating(h.at),
            HazardKind::Waterfall => Hazard::waterfall(h.at),
        })
        .collect();

    // Same stamping order as a tick: hazards, finish, player on top.
    for h in &hazards {
        grid.set(h.pos, Tile::Hazard)?;
    }
    grid.set(def.finish, Tile::Finish)?;
    grid.set(def.player, Tile::Player)?;

    log::debug!(
        "built {}x{} level: player {:?}, finish {:?}, {} hazard(s)",
        def.width, def.height, def.player, def.finish, hazards.len()
    );

    Ok(Round {
        grid,
        player: Player::new(def.player),
        hazards,
        finish: def.finish,
        running: true,
        outcome: Outcome::Ongoing,
        stats: Stats::new(),
    })
}

// ══════════════════════════════════════════════════════════════
// Validation
// ══════════════════════════════════════════════════════════════

fn validate(def: &LevelDef, grid: &Grid) -> GameResult<()> {
    let inside = |what: &str, p: Position| -> GameResult<()> {
        if grid.is_interior(p) {
            Ok(())
        } else {
            Err(GameError::InvalidLevel(format!(
                "{what} at ({}, {}) is not inside the {}x{} border",
                p.x, p.y, def.width, def.height
            )))
        }
    };

    inside("player", def.player)?;
    inside("finish", def.finish)?;
    if def.player == def.finish {
        return Err(GameError::InvalidLevel("player starts on the finish".into()));
    }

    for (i, h) in def.hazards.iter().enumerate() {
        inside(format!("hazard #{i}").as_str(), h.at)?;
        if h.at == def.player {
            return Err(GameError::InvalidLevel(format!(
                "hazard #{i} starts on the player"
            )));
        }
        if h.kind == HazardKind::Oscillating && def.height < OSCILLATOR_MIN_HEIGHT {
            return Err(GameError::InvalidLevel(format!(
                "oscillating hazard #{i} needs a grid at least {OSCILLATOR_MIN_HEIGHT} rows tall"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(hazards: Vec<HazardDef>) -> LevelDef {
        LevelDef {
            width: 10,
            height: 8,
            player: Position::new(1, 3),
            finish: Position::new(8, 3),
            hazards,
        }
    }

    #[test]
    fn default_level_builds() {
        let round = build_round(&LevelDef::default()).unwrap();
        assert!(round.is_running());
        assert_eq!(round.outcome(), Outcome::Ongoing);
        assert_eq!(round.grid().width(), 80);
        assert_eq!(round.grid().height(), 18);
        assert_eq!(round.hazards().len(), 2);
        assert_eq!(round.stats().ticks(), 0);
    }

    #[test]
    fn opening_frame_is_stamped() {
        let round = build_round(&LevelDef::default()).unwrap();
        let g = round.grid();
        assert_eq!(g.get(Position::new(2, 5)), Tile::Player);
        assert_eq!(g.get(Position::new(10, 5)), Tile::Hazard);
        assert_eq!(g.get(Position::new(16, 5)), Tile::Hazard);
        assert_eq!(g.get(Position::new(77, 9)), Tile::Finish);
        assert_eq!(g.get(Position::new(0, 0)), Tile::Wall);
    }

    #[test]
    fn hazard_order_is_preserved() {
        let round = build_round(&LevelDef::default()).unwrap();
        assert_eq!(round.hazards()[0].pos, Position::new(10, 5));
        assert_eq!(round.hazards()[1].pos, Position::new(16, 5));
    }

    #[test]
    fn too_small_grid_is_invalid_dimensions() {
        let mut def = small(vec![]);
        def.width = 2;
        assert!(matches!(
            build_round(&def),
            Err(GameError::InvalidDimensions { width: 2, height: 8 })
        ));
    }

    #[test]
    fn positions_on_border_are_rejected() {
        let mut def = small(vec![]);
        def.player = Position::new(0, 3);
        assert!(matches!(build_round(&def), Err(GameError::InvalidLevel(_))));

        let mut def = small(vec![]);
        def.finish = Position::new(9, 3);
        assert!(matches!(build_round(&def), Err(GameError::InvalidLevel(_))));

        let def = small(vec![HazardDef { kind: HazardKind::Waterfall, at: Position::new(4, 7) }]);
        assert!(matches!(build_round(&def), Err(GameError::InvalidLevel(_))));
    }

    #[test]
    fn overlapping_starts_are_rejected() {
        let mut def = small(vec![]);
        def.finish = def.player;
        assert!(matches!(build_round(&def), Err(GameError::InvalidLevel(_))));

        let def = small(vec![HazardDef { kind: HazardKind::Oscillating, at: Position::new(1, 3) }]);
        assert!(matches!(build_round(&def), Err(GameError::InvalidLevel(_))));
    }

    #[test]
    fn oscillator_needs_four_rows() {
        let def = LevelDef {
            width: 6,
            height: 3,
            player: Position::new(1, 1),
            finish: Position::new(4, 1),
            hazards: vec![HazardDef { kind: HazardKind::Oscillating, at: Position::new(2, 1) }],
        };
        assert!(matches!(build_round(&def), Err(GameError::InvalidLevel(_))));

        let waterfall_ok = LevelDef {
            hazards: vec![HazardDef { kind: HazardKind::Waterfall, at: Position::new(2, 1) }],
            ..def
        };
        assert!(build_round(&waterfall_ok).is_ok());
    }
}
