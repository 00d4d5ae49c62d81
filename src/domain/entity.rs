/// Entities: Player and Hazard.
/// Entities never touch the grid. The step function vacates and stamps
/// their cells; the grid is lent to the motion rules for bounds only.

use super::grid::Grid;
use super::rules;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }
}

/// Discrete command delivered by an input source.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    /// Answer "no" at a prompt. Ignored during play.
    Decline,
    /// Quit: "no" at a prompt, abandon the session mid-round.
    Cancel,
    NoOp,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub pos: Position,
}

impl Player {
    pub fn new(pos: Position) -> Self {
        Player { pos }
    }

    /// Apply one command. Returns true if the player actually moved.
    pub fn advance(&mut self, command: Command, grid: &Grid) -> bool {
        let next = rules::move_player(self.pos, command, grid);
        let moved = next != self.pos;
        self.pos = next;
        moved
    }
}

/// How a hazard moves each tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HazardMotion {
    /// Bounces up and down its column.
    Oscillating { reversed: bool },
    /// Falls down its column and re-enters at the top.
    Waterfall,
}

/// What happened to a hazard during its step, beyond moving one cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HazardTurn {
    Moved,
    Reversed,
    Wrapped,
}

#[derive(Clone, Debug)]
pub struct Hazard {
    pub pos: Position,
    pub motion: HazardMotion,
}

impl Hazard {
    pub fn oscillating(pos: Position) -> Self {
        Hazard { pos, motion: HazardMotion::Oscillating { reversed: false } }
    }

    pub fn waterfall(pos: Position) -> Self {
        Hazard { pos, motion: HazardMotion::Waterfall }
    }

    /// Advance one tick. Hazards ignore input entirely.
    pub fn advance(&mut self, grid: &Grid) -> HazardTurn {
        match self.motion {
            HazardMotion::Oscillating { reversed } => {
                let (next, now_reversed) = rules::oscillate(self.pos, reversed, grid);
                self.pos = next;
                self.motion = HazardMotion::Oscillating { reversed: now_reversed };
                if now_reversed != reversed {
                    HazardTurn::Reversed
                } else {
                    HazardTurn::Moved
                }
            }
            HazardMotion::Waterfall => {
                let wrapped = self.pos.y + 1 == grid.height() - 1;
                self.pos = rules::waterfall(self.pos, grid);
                if wrapped { HazardTurn::Wrapped } else { HazardTurn::Moved }
            }
        }
    }
}
