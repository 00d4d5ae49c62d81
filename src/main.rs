/// Entry point: logging, config, terminal setup, session.

mod config;
mod domain;
mod error;
mod session;
mod sim;
mod ui;

use config::GameConfig;
use ui::input::TerminalInput;
use ui::renderer::TerminalRenderer;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = GameConfig::load();

    let mut renderer = TerminalRenderer::new();
    let result = renderer
        .init()
        .and_then(|()| session::run(&mut TerminalInput::new(), &mut renderer, &config));

    // Always restore the terminal, even if init failed halfway.
    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    match result {
        Ok(totals) => {
            log::info!("session over: {} rounds, {} wins", totals.rounds, totals.wins);
            println!("Thanks for playing kamelKase!");
            if totals.rounds > 0 {
                println!("Rounds: {}  Wins: {}", totals.rounds, totals.wins);
            }
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("kamelKase: {e}");
            std::process::exit(1);
        }
    }
}
