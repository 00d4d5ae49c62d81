/// Motion rules, truth-table driven.
///
/// Pure functions: a position (and motion state) in, the next one out.
/// The grid is consulted for its dimensions only.
///
/// ## Player (one command per tick)
/// ┌──────────┬──────────────────┬──────────────┐
/// │ Command  │ Moves if         │ Result       │
/// ├──────────┼──────────────────┼──────────────┤
/// │ Up       │ y > 1            │ y - 1        │
/// │ Down     │ y < height - 2   │ y + 1        │
/// │ Left     │ x > 1            │ x - 1        │
/// │ Right    │ x < width - 2    │ x + 1        │
/// │ other    │ never            │ unchanged    │
/// └──────────┴──────────────────┴──────────────┘
/// A blocked move is silently dropped (clamp, not bounce).
///
/// ## Oscillating hazard
/// ┌──────────┬─────────┬─────────────────────────────────────────┐
/// │ reversed │ step    │ then, if                                │
/// ├──────────┼─────────┼─────────────────────────────────────────┤
/// │ false    │ y + 1   │ y == height-1 → y - 1, reversed = true  │
/// │ true     │ y - 1   │ y == 1        → y + 1, reversed = false │
/// └──────────┴─────────┴─────────────────────────────────────────┘
/// The two bounds are asymmetric: the floor reached is `height-2`, but the
/// ceiling reached is `2`. Row 1 is never occupied once the hazard has
/// bounced off the floor.
///
/// ## Waterfall hazard
/// ┌─────────┬─────────────────────────┐
/// │ step    │ then, if                │
/// ├─────────┼─────────────────────────┤
/// │ y + 1   │ y == height-1 → y = 1   │
/// └─────────┴─────────────────────────┘

use super::entity::{Command, Position};
use super::grid::Grid;

pub fn move_player(pos: Position, command: Command, grid: &Grid) -> Position {
    let Position { mut x, mut y } = pos;
    match command {
        Command::Up => {
            if y > 1 { y -= 1; }
        }
        Command::Down => {
            if y < grid.height() - 2 { y += 1; }
        }
        Command::Left => {
            if x > 1 { x -= 1; }
        }
        Command::Right => {
            if x < grid.width() - 2 { x += 1; }
        }
        Command::Confirm | Command::Decline | Command::Cancel | Command::NoOp => {}
    }
    Position { x, y }
}

/// One oscillator step. Returns the new position and the new `reversed` flag.
pub fn oscillate(pos: Position, reversed: bool, grid: &Grid) -> (Position, bool) {
    let mut y = pos.y;
    if reversed {
        y = y.saturating_sub(1);
        if y == 1 {
            return (Position { x: pos.x, y: y + 1 }, false);
        }
        return (Position { x: pos.x, y }, true);
    }
    y += 1;
    if y == grid.height() - 1 {
        return (Position { x: pos.x, y: y - 1 }, true);
    }
    (Position { x: pos.x, y }, false)
}

pub fn waterfall(pos: Position, grid: &Grid) -> Position {
    let mut y = pos.y + 1;
    if y == grid.height() - 1 {
        y = 1;
    }
    Position { x: pos.x, y }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
