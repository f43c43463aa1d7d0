mod error;
mod game;
mod ui;
mod words;

use error::GameError;
use game::clock::SystemClock;
use game::controller::{GameConfig, GameController};
use std::env;
use ui::terminal::Terminal;

fn main()
{
    env_logger::init();

    if let Err(err) = run() {
        log::warn!("exiting: {err}");
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), GameError>
{
    if let Some(arg) = env::args().nth(1) {
        return Err(GameError::UnexpectedArgument(arg));
    }

    let mut terminal = Terminal::enter().map_err(GameError::TerminalInit)?;
    let mut controller =
        GameController::new(GameConfig::default(), SystemClock, rand::thread_rng());
    game::run(&mut controller, &mut terminal)
}
