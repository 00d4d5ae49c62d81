/// Session driver: start prompt → rounds → play-again prompt.
///
/// ```text
///   Welcome ──y──▶ Round ──won/lost──▶ Summary ──y──▶ Round ...
///      │             │                    │
///      n            Esc (abandon)         n
///      ▼             ▼                    ▼
///     end           end                  end
/// ```
///
/// Generic over the input source and display so tests can drive a whole
/// session without a terminal.

use std::time::{Duration, Instant};

use crate::config::GameConfig;
use crate::domain::entity::Command;
use crate::error::GameResult;
use crate::sim::frame::{compose, summary};
use crate::sim::level::{build_round, LevelDef};
use crate::sim::step::step;
use crate::sim::world::{Outcome, Round};
use crate::ui::input::InputSource;
use crate::ui::renderer::DisplaySink;

const WELCOME: &str = "Welcome to kamelKase!";
const START_PROMPT: &str = "Would you like to start? (y/n)";
const START_RETRY: &str = "Invalid input. Please press 'y' to start or 'n' to exit.";
const AGAIN_PROMPT: &str = "Play again? (y/n)";
const AGAIN_RETRY: &str = "Invalid input. Please press 'y' to play again or 'n' to exit.";

/// Totals reported when the session ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub rounds: u32,
    pub wins: u32,
}

enum RoundEnd {
    Finished(Round),
    Abandoned,
}

pub fn run<I: InputSource, D: DisplaySink>(
    input: &mut I,
    display: &mut D,
    config: &GameConfig,
) -> GameResult<SessionSummary> {
    let mut totals = SessionSummary::default();

    let welcome = vec![WELCOME.to_string(), String::new(), START_PROMPT.to_string()];
    if !ask(input, display, &welcome, START_RETRY)? {
        log::info!("start declined");
        return Ok(totals);
    }

    let tick = config.timing.fixed_tick();
    loop {
        let round = match play_round(input, display, &config.level, tick)? {
            RoundEnd::Finished(round) => round,
            RoundEnd::Abandoned => {
                log::info!("round abandoned after {} rounds", totals.rounds);
                return Ok(totals);
            }
        };

        totals.rounds += 1;
        if round.outcome() == Outcome::Won {
            totals.wins += 1;
        }
        log::info!(
            "round {} {:?} at {:?} (finish {:?}) in {} ticks ({:.2}s)",
            totals.rounds,
            round.outcome(),
            round.player().pos,
            round.finish(),
            round.stats().ticks(),
            round.stats().elapsed().as_secs_f64(),
        );

        let mut lines = summary(&round);
        lines.push(String::new());
        lines.push(AGAIN_PROMPT.to_string());
        if !ask(input, display, &lines, AGAIN_RETRY)? {
            return Ok(totals);
        }
    }
}

/// Show `lines` and wait for yes or no. Anything else re-prompts.
fn ask<I: InputSource, D: DisplaySink>(
    input: &mut I,
    display: &mut D,
    lines: &[String],
    retry: &str,
) -> GameResult<bool> {
    display.show_message(lines)?;
    loop {
        match input.next_command()? {
            Command::Confirm => return Ok(true),
            Command::Decline | Command::Cancel => return Ok(false),
            _ => {
                let mut again = lines.to_vec();
                again.push(retry.to_string());
                display.show_message(&again)?;
            }
        }
    }
}

fn play_round<I: InputSource, D: DisplaySink>(
    input: &mut I,
    display: &mut D,
    level: &LevelDef,
    tick: Option<Duration>,
) -> GameResult<RoundEnd> {
    let mut round = build_round(level)?;
    log::info!(
        "round started: {}x{}, {} hazards",
        round.grid().width(),
        round.grid().height(),
        round.hazards().len()
    );

    while round.is_running() {
        display.present(&compose(&round))?;

        let command = match tick {
            None => input.next_command()?,
            Some(period) => {
                let deadline = Instant::now() + period;
                let command = input.poll_command(period)?.unwrap_or(Command::NoOp);
                let rest = deadline.saturating_duration_since(Instant::now());
                if !rest.is_zero() {
                    std::thread::sleep(rest);
                }
                command
            }
        };

        if command == Command::Cancel {
            return Ok(RoundEnd::Abandoned);
        }

        for event in step(&mut round, command)? {
            log::debug!("{event:?}");
        }
    }

    display.present(&compose(&round))?;
    Ok(RoundEnd::Finished(round))
}
