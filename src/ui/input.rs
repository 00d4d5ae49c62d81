/// Input sources.
///
/// The session pulls one `Command` per tick from an `InputSource`:
///   - `TerminalInput` reads crossterm key events (raw mode is set up by the
///     renderer)
///   - `ScriptedInput` replays a fixed command list, for tests
///
/// Only Press and Repeat events count. Release events are ignored, so a
/// terminal with keyboard enhancement enabled doesn't produce a second
/// command when the key comes up.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::domain::entity::Command;
use crate::error::{GameError, GameResult};

pub trait InputSource {
    /// Block until the next command arrives.
    fn next_command(&mut self) -> GameResult<Command>;

    /// Wait at most `timeout` for a command. `None` if nothing arrived.
    fn poll_command(&mut self, timeout: Duration) -> GameResult<Option<Command>>;
}

// ── Key map ──

/// Translate one key event. Letters are case-insensitive; arrows work too.
/// `n` only answers prompts. Esc and Ctrl+C also quit mid-round.
pub fn map_key(key: KeyEvent) -> Command {
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
    {
        return Command::Cancel;
    }
    match key.code {
        KeyCode::Up => Command::Up,
        KeyCode::Down => Command::Down,
        KeyCode::Left => Command::Left,
        KeyCode::Right => Command::Right,
        KeyCode::Enter => Command::Confirm,
        KeyCode::Esc => Command::Cancel,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Command::Up,
            's' => Command::Down,
            'a' => Command::Left,
            'd' => Command::Right,
            'y' => Command::Confirm,
            'n' => Command::Decline,
            _ => Command::NoOp,
        },
        _ => Command::NoOp,
    }
}

fn key_command(ev: Event) -> Option<Command> {
    match ev {
        Event::Key(key) if key.kind != KeyEventKind::Release => Some(map_key(key)),
        _ => None,
    }
}

/// A terminal that hit end-of-file will never deliver another key.
fn read_failed(e: io::Error) -> GameError {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        GameError::InputClosed
    } else {
        GameError::Input(e)
    }
}

// ── Terminal ──

pub struct TerminalInput;

impl TerminalInput {
    pub fn new() -> Self {
        TerminalInput
    }
}

impl InputSource for TerminalInput {
    fn next_command(&mut self) -> GameResult<Command> {
        loop {
            let ev = event::read().map_err(read_failed)?;
            if let Some(cmd) = key_command(ev) {
                return Ok(cmd);
            }
        }
    }

    fn poll_command(&mut self, timeout: Duration) -> GameResult<Option<Command>> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if !event::poll(remaining).map_err(read_failed)? {
                return Ok(None);
            }
            let ev = event::read().map_err(read_failed)?;
            if let Some(cmd) = key_command(ev) {
                return Ok(Some(cmd));
            }
            if remaining.is_zero() {
                return Ok(None);
            }
        }
    }
}

// ── Scripted ──

/// Replays a fixed list of commands, then reports the source as closed.
#[cfg(test)]
pub struct ScriptedInput {
    commands: std::collections::VecDeque<Command>,
}

#[cfg(test)]
impl ScriptedInput {
    pub fn new(commands: impl IntoIterator<Item = Command>) -> Self {
        ScriptedInput { commands: commands.into_iter().collect() }
    }

    pub fn remaining(&self) -> usize {
        self.commands.len()
    }
}

#[cfg(test)]
impl InputSource for ScriptedInput {
    fn next_command(&mut self) -> GameResult<Command> {
        self.commands.pop_front().ok_or(GameError::InputClosed)
    }

    fn poll_command(&mut self, _timeout: Duration) -> GameResult<Option<Command>> {
        self.next_command().map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn wasd_any_case() {
        for (c, cmd) in [('w', Command::Up), ('s', Command::Down), ('a', Command::Left), ('d', Command::Right)] {
            assert_eq!(map_key(key(KeyCode::Char(c))), cmd);
            assert_eq!(map_key(key(KeyCode::Char(c.to_ascii_uppercase()))), cmd);
        }
    }

    #[test]
    fn arrows_move() {
        assert_eq!(map_key(key(KeyCode::Up)), Command::Up);
        assert_eq!(map_key(key(KeyCode::Down)), Command::Down);
        assert_eq!(map_key(key(KeyCode::Left)), Command::Left);
        assert_eq!(map_key(key(KeyCode::Right)), Command::Right);
    }

    #[test]
    fn prompt_keys() {
        assert_eq!(map_key(key(KeyCode::Char('y'))), Command::Confirm);
        assert_eq!(map_key(key(KeyCode::Char('Y'))), Command::Confirm);
        assert_eq!(map_key(key(KeyCode::Enter)), Command::Confirm);
        assert_eq!(map_key(key(KeyCode::Char('n'))), Command::Decline);
        assert_eq!(map_key(key(KeyCode::Char('N'))), Command::Decline);
        assert_eq!(map_key(key(KeyCode::Esc)), Command::Cancel);
    }

    #[test]
    fn ctrl_c_cancels() {
        let ev = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ev), Command::Cancel);
        // plain 'c' is just an unmapped letter
        assert_eq!(map_key(key(KeyCode::Char('c'))), Command::NoOp);
    }

    #[test]
    fn eof_closes_the_source() {
        let eof = io::Error::new(io::ErrorKind::UnexpectedEof, "tty gone");
        assert!(matches!(read_failed(eof), GameError::InputClosed));
        let other = io::Error::new(io::ErrorKind::Other, "bad read");
        assert!(matches!(read_failed(other), GameError::Input(_)));
    }

    #[test]
    fn release_events_are_ignored() {
        let mut ev = key(KeyCode::Char('w'));
        ev.kind = KeyEventKind::Release;
        assert_eq!(key_command(Event::Key(ev)), None);
        ev.kind = KeyEventKind::Repeat;
        assert_eq!(key_command(Event::Key(ev)), Some(Command::Up));
        assert_eq!(key_command(Event::FocusGained), None);
    }

    #[test]
    fn script_runs_dry() {
        let mut input = ScriptedInput::new([Command::Up, Command::NoOp]);
        assert_eq!(input.next_command().unwrap(), Command::Up);
        assert_eq!(input.poll_command(Duration::ZERO).unwrap(), Some(Command::NoOp));
        assert_eq!(input.remaining(), 0);
        assert!(matches!(input.next_command(), Err(GameError::InputClosed)));
    }
}
