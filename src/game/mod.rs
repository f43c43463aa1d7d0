pub mod clock;
pub mod controller;
pub mod input;
pub mod rows;

use crate::error::GameError;
use crate::ui::{InputSource, Renderer};
use clock::Clock;
use controller::GameController;
use rand::Rng;
use std::time::Duration;

const TICK_MS: u64 = 33;

pub fn run<C, R, T>(game: &mut GameController<C, R>, terminal: &mut T) -> Result<(), GameError>
where
    C: Clock,
    R: Rng,
    T: Renderer + InputSource,
{
    loop {
        for event in terminal.poll()? {
            if game.handle_event(event, &*terminal) {
                return Ok(());
            }
        }

        game.update();
        terminal.draw(&game.frame())?;

        std::thread::sleep(Duration::from_millis(TICK_MS));
    }
}
