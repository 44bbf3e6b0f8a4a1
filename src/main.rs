mod game;
mod term;

use anyhow::Result;
use clap::Parser;
use log::info;

use snake_arena::config::Args;

fn main() -> Result<()> {
    pretty_env_logger::init();

    let args = Args::parse();
    info!("starting with {:?}", args);

    // Sessions loop inside until CTRL+C, the terminal is restored on the way out
    let mut game = game::SnakeGame::new(args)?;
    game.run()
}
