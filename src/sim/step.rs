/// The step function: advances a round by one tick.
///
/// Processing order:
///   1. Hazards: vacate all, move each in level order, then stamp all
///   2. Finish re-stamp (idempotent)
///   3. Player: vacate, move, stamp `Player` (last, so it is never hidden)
///   4. Stats
///   5. Win / lose check on entity positions
///
/// The terminal check compares stored positions, not grid cells: by the
/// time it runs, the player stamp may have overwritten a hazard stamp in
/// the same cell.

use crate::domain::entity::{Command, HazardTurn, Position};
use crate::domain::grid::Grid;
use crate::domain::tile::Tile;
use crate::error::GameResult;
use super::event::GameEvent;
use super::world::{Outcome, Round};

// ══════════════════════════════════════════════════════════════
// Main entry point
// ══════════════════════════════════════════════════════════════

pub fn step(round: &mut Round, command: Command) -> GameResult<Vec<GameEvent>> {
    if !round.running { return Ok(vec![]); }

    let mut events: Vec<GameEvent> = Vec::new();

    resolve_hazards(round, &mut events)?;
    round.grid.set(round.finish, Tile::Finish)?;
    resolve_player(round, command, &mut events)?;
    round.stats.tick();
    resolve_outcome(round, &mut events);

    Ok(events)
}

// ══════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════

/// Clear `pos` if it still shows `tile`.
/// A different stamp on that cell (finish, a hazard over the player) stays put.
fn vacate(grid: &mut Grid, pos: Position, tile: Tile) -> GameResult<()> {
    if grid.get(pos) == tile {
        grid.set(pos, Tile::Empty)?;
    }
    Ok(())
}

// ══════════════════════════════════════════════════════════════
// Movement
// ══════════════════════════════════════════════════════════════

fn resolve_hazards(round: &mut Round, events: &mut Vec<GameEvent>) -> GameResult<()> {
    // Every hazard leaves before any arrives, so hazards sharing a column
    // never clear each other's stamp.
    for hazard in &round.hazards {
        vacate(&mut round.grid, hazard.pos, Tile::Hazard)?;
    }
    for (id, hazard) in round.hazards.iter_mut().enumerate() {
        match hazard.advance(&round.grid) {
            HazardTurn::Moved => {}
            HazardTurn::Reversed => events.push(GameEvent::HazardReversed {
                id, x: hazard.pos.x, y: hazard.pos.y,
            }),
            HazardTurn::Wrapped => events.push(GameEvent::HazardWrapped {
                id, x: hazard.pos.x,
            }),
        }
    }
    for hazard in &round.hazards {
        round.grid.set(hazard.pos, Tile::Hazard)?;
    }
    Ok(())
}

fn resolve_player(round: &mut Round, command: Command, events: &mut Vec<GameEvent>) -> GameResult<()> {
    vacate(&mut round.grid, round.player.pos, Tile::Player)?;
    let moved = round.player.advance(command, &round.grid);
    let Position { x, y } = round.player.pos;
    if moved {
        events.push(GameEvent::PlayerMoved { x, y });
    } else if matches!(command, Command::Up | Command::Down | Command::Left | Command::Right) {
        events.push(GameEvent::PlayerBlocked { x, y });
    }
    round.grid.set(round.player.pos, Tile::Player)
}

// ══════════════════════════════════════════════════════════════
// Win / lose
// ══════════════════════════════════════════════════════════════

fn resolve_outcome(round: &mut Round, events: &mut Vec<GameEvent>) {
    let p = round.player.pos;
    if let Some(id) = round.hazards.iter().position(|h| h.pos == p) {
        round.outcome = Outcome::Lost;
        events.push(GameEvent::PlayerCaught { id, x: p.x, y: p.y });
    } else if round.finish == p {
        round.outcome = Outcome::Won;
        events.push(GameEvent::FinishReached { x: p.x, y: p.y });
    }

    if round.outcome.is_terminal() {
        round.running = false;
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
