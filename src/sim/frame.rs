/// Render projection: grid → rows of characters.
///
/// The projection is the whole contract with the display: `height` rows of
/// exactly `width` characters each, plus a few status lines underneath.
/// Colour and cursor handling belong to the renderer.

use crate::domain::grid::Grid;
use super::world::{Outcome, Round};

pub const CONTROLS_HINT: &str = "Use WASD to move your character.";

/// One frame handed to a display sink.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub rows: Vec<String>,
    pub status: Vec<String>,
}

pub fn project(grid: &Grid) -> Vec<String> {
    grid.rows()
        .map(|row| row.iter().map(|t| t.glyph()).collect())
        .collect()
}

/// The play-screen frame: map, controls hint and the stats block.
pub fn compose(round: &Round) -> Frame {
    let stats = round.stats();
    Frame {
        rows: project(round.grid()),
        status: vec![
            CONTROLS_HINT.to_string(),
            "--Stats".to_string(),
            format!("Time: {:.2}", stats.elapsed().as_secs_f64()),
            format!("Ticks: {}", stats.ticks()),
        ],
    }
}

/// End-of-round summary. Empty while the round is still going.
pub fn summary(round: &Round) -> Vec<String> {
    let headline = match round.outcome() {
        Outcome::Ongoing => return vec![],
        Outcome::Lost => "GAME OVER!",
        Outcome::Won => "YOU WIN!",
    };
    let stats = round.stats();
    vec![
        headline.to_string(),
        format!("Time: {:.2}s", stats.elapsed().as_secs_f64()),
        format!("Ticks: {}", stats.ticks()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::{Command, Position};
    use crate::sim::level::{build_round, HazardDef, HazardKind, LevelDef};
    use crate::sim::step::step;

    fn tiny() -> LevelDef {
        LevelDef {
            width: 6,
            height: 5,
            player: Position::new(1, 1),
            finish: Position::new(4, 3),
            hazards: vec![HazardDef { kind: HazardKind::Waterfall, at: Position::new(3, 1) }],
        }
    }

    #[test]
    fn empty_grid_projection() {
        let g = Grid::new(5, 3).unwrap();
        assert_eq!(project(&g), vec!["HHHHH", "H   H", "HHHHH"]);
    }

    #[test]
    fn projection_uses_glyph_table() {
        let round = build_round(&tiny()).unwrap();
        assert_eq!(
            project(round.grid()),
            vec!["HHHHHH", "HP X H", "H    H", "H   OH", "HHHHHH"]
        );
    }

    #[test]
    fn projection_is_rectangular() {
        let round = build_round(&LevelDef::default()).unwrap();
        let rows = project(round.grid());
        assert_eq!(rows.len(), 18);
        assert!(rows.iter().all(|r| r.chars().count() == 80));
    }

    #[test]
    fn compose_carries_stats() {
        let mut round = build_round(&tiny()).unwrap();
        step(&mut round, Command::Down).unwrap();
        let frame = compose(&round);
        assert_eq!(frame.rows[2], "HP X H");
        assert_eq!(frame.status[0], CONTROLS_HINT);
        assert_eq!(frame.status[1], "--Stats");
        assert!(frame.status[2].starts_with("Time: "));
        assert_eq!(frame.status[3], "Ticks: 1");
    }

    #[test]
    fn summary_only_after_the_round_ends() {
        let mut round = build_round(&tiny()).unwrap();
        assert!(summary(&round).is_empty());
        // waterfall at x=3 cycles y = 2, 3, 1, 2, 3
        step(&mut round, Command::Down).unwrap(); // player (1,2)
        step(&mut round, Command::Down).unwrap(); // player (1,3)
        step(&mut round, Command::Right).unwrap(); // player (2,3)
        step(&mut round, Command::NoOp).unwrap();
        step(&mut round, Command::Right).unwrap(); // both at (3,3)
        let lines = summary(&round);
        assert_eq!(round.outcome(), Outcome::Lost);
        assert_eq!(lines[0], "GAME OVER!");
        assert_eq!(lines[2], "Ticks: 5");
    }
}
