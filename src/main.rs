mod cell;
mod game;
mod player;
mod term;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::game::Game;
use crate::term::{Console, Terminal};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut console = Terminal::new();
    loop {
        let mut game = Game::new();
        game.start(&mut console)?;

        let answer = console.read_line(Some("Restart? (yes/no): "))?;
        if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes") {
            console.write_line("")?;
        } else {
            break;
        }
    }
    Ok(())
}
