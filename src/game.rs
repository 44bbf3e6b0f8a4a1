use std::{thread::sleep, time::{Duration, Instant}};

use anyhow::{bail, Context, Result};
use crossterm::event::{KeyEvent, KeyModifiers, KeyCode};
use log::{error, info};

use snake_arena::board::{GameBoard, TickResult};
use snake_arena::config::Args;
use snake_arena::snake::{Direction::{*, self}, Position};

use crate::term::{Coords, TermInt, TermManager};

const POLL_INTERVAL_MS: u64 = 5;

const SNAKE_BODY_CHAR: char = '█';
const FOOD_CHAR: char = 'O';
const DEAD_SNAKE_CHAR: char = 'X';
const IDLE_HEAD_CHAR: char = '@';

/// What the player asked for while a session was running.
enum SessionEnd {
    Finished,
    Quit,
}

/// Terminal front end. Each call to `play` owns one `GameBoard` from start to
/// game over and only reads it to draw.
pub struct SnakeGame {
    args: Args,
    term: TermManager,
    paused: bool,
    drawn: Vec<Position>,
}

impl SnakeGame {
    pub fn new(args: Args) -> Result<Self> {
        let term = TermManager::new().context("reading terminal size")?;

        let (w, h) = term.size();
        if (w as i32) < args.width || (h as i32) < args.height + 1 {
            bail!(
                "terminal is {}x{} but a {}x{} board needs at least {}x{}",
                w, h, args.width, args.height, args.width, args.height + 1
            );
        }

        Ok(SnakeGame { args, term, paused: false, drawn: vec![] })
    }

    /// Runs sessions back to back until the player quits.
    pub fn run(&mut self) -> Result<()> {
        self.term.setup().context("setting up terminal")?;

        let res = self.run_sessions();

        let restored = self.term.restore().context("restoring terminal");
        session_outcome(res, restored)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn run_sessions(&mut self) -> Result<()> {
        if !self.show_intro()? {
            return Ok(());
        }

        loop {
            let board = self.args.board()?;
            if let SessionEnd::Quit = self.play(board)? {
                return Ok(());
            }

            // Any key plays again, CTRL+C quits
            if is_ctrl_c(&self.term.read_key_blocking()?) {
                return Ok(());
            }
        }
    }

    fn show_intro(&mut self) -> Result<bool> {
        let lines = &[
            "Arrow keys or WASD to move",
            "Esc to pause",
            "CTRL+C to quit",
            "",
            "Press any key to begin"
        ];

        let arena = self.arena();
        self.term.show_message(lines, arena)?;
        let key = self.term.read_key_blocking()?;
        self.term.hide_message()?;

        Ok(!is_ctrl_c(&key))
    }

    fn play(&mut self, mut board: GameBoard) -> Result<SessionEnd> {
        self.paused = false;
        self.drawn.clear();
        self.term.clear()?;
        self.draw_board(&board)?;

        let tick_interval = self.args.tick_interval();
        let mut next_tick = Instant::now() + tick_interval;

        loop {
            sleep(Duration::from_millis(POLL_INTERVAL_MS));

            for key_ev in self.term.read_key_events_queue()? {
                match &key_ev {
                    ev if is_ctrl_c(ev) => {
                        board.end();
                        return Ok(SessionEnd::Quit);
                    }
                    KeyEvent { code, modifiers: _ } => match code {
                        KeyCode::Char('w') | KeyCode::Up => board.set_direction(Up),
                        KeyCode::Char('a') | KeyCode::Left => board.set_direction(Left),
                        KeyCode::Char('s') | KeyCode::Down => board.set_direction(Down),
                        KeyCode::Char('d') | KeyCode::Right => board.set_direction(Right),
                        KeyCode::Esc => self.toggle_pause()?,
                        _ => {}
                    }
                }
            }

            if self.paused {
                next_tick = Instant::now() + tick_interval;
                continue;
            }

            let now = Instant::now();
            if now < next_tick {
                continue;
            }
            next_tick = catch_up(next_tick, now, tick_interval);

            match board.tick() {
                TickResult::Continues { .. } => self.draw_board(&board)?,
                TickResult::GameOver { score, cause } => {
                    info!("session over with score {} ({:?})", score, cause);
                    self.game_over(&board, score)?;
                    return Ok(SessionEnd::Finished);
                }
            }
        }
    }

    fn game_over(&mut self, board: &GameBoard, score: u32) -> Result<()> {
        for pos in board.snake().segments() {
            self.term.print_at(to_coords(*pos), DEAD_SNAKE_CHAR)?;
        }

        let arena = self.arena();
        self.term.show_message(&[
            "Game over!",
            &*format!("Score: {}", score),
            "",
            "Press any key to play again,",
            "or CTRL+C to quit."
        ], arena)?;

        Ok(())
    }

    fn draw_walls(&mut self, board: &GameBoard) -> Result<()> {
        let (end_x, end_y) = (board.width() - 1, board.height() - 1);

        for wall in board.walls() {
            let on_x_edge = wall.x == 0 || wall.x == end_x;
            let on_y_edge = wall.y == 0 || wall.y == end_y;

            let ch = match (on_x_edge, on_y_edge) {
                (true, true) => '+',
                (false, true) => '-',
                _ => '|',
            };
            self.term.print_at(to_coords(*wall), ch)?;
        }

        Ok(())
    }

    /// Wipes the cells drawn last frame and draws the current walls, snake,
    /// food and status line. A grown segment can sit on a wall, so the walls
    /// are redrawn every frame.
    fn draw_board(&mut self, board: &GameBoard) -> Result<()> {
        for pos in std::mem::take(&mut self.drawn) {
            self.term.print_at(to_coords(pos), ' ')?;
        }

        self.draw_walls(board)?;

        for food in board.food() {
            self.term.print_at(to_coords(*food), FOOD_CHAR)?;
            self.drawn.push(*food);
        }

        let head_char = head_char(board.direction());
        for (i, pos) in board.snake().segments().iter().enumerate() {
            let ch = if i == 0 { head_char } else { SNAKE_BODY_CHAR };
            self.term.print_at(to_coords(*pos), ch)?;
            self.drawn.push(*pos);
        }

        let status = format!("Score: {:<6} Speed: {}", board.score(), self.args.speed);
        self.term.print_str_at((0, board.height() as TermInt), &status)?;

        self.term.flush()?;
        Ok(())
    }

    fn toggle_pause(&mut self) -> Result<()> {
        if !self.paused {
            let arena = self.arena();
            self.term.show_message(&["Paused", "Press Esc to resume", "or Ctrl+C to quit"], arena)?;
        } else {
            self.term.hide_message()?;
        }

        self.paused = !self.paused;
        Ok(())
    }

    fn arena(&self) -> Coords {
        (self.args.width as TermInt, self.args.height as TermInt)
    }
}

/// A failed session wins over a failed restore, which only gets logged.
fn session_outcome(res: Result<()>, restored: Result<()>) -> Result<()> {
    match (res, restored) {
        (Err(e), Err(restore_err)) => {
            error!("{:#}", restore_err);
            Err(e)
        }
        (Err(e), Ok(())) => Err(e),
        (Ok(()), restored) => restored,
    }
}

/// Schedules the tick after the one due at `due`. A loop that fell more than
/// a whole interval behind restarts from `now` instead of ticking in a burst.
fn catch_up(due: Instant, now: Instant, interval: Duration) -> Instant {
    let next = due + interval;
    if next <= now { now + interval } else { next }
}

fn to_coords(pos: Position) -> Coords {
    (pos.x.max(0) as TermInt, pos.y.max(0) as TermInt)
}

fn head_char(direction: Option<Direction>) -> char {
    match direction {
        Some(Up) => '^',
        Some(Down) => 'v',
        Some(Left) => '<',
        Some(Right) => '>',
        None => IDLE_HEAD_CHAR,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_time_ticks_keep_the_cadence() {
        let interval = Duration::from_millis(80);
        let due = Instant::now();
        let now = due + Duration::from_millis(3);

        assert_eq!(catch_up(due, now, interval), due + interval);
    }

    #[test]
    fn late_ticks_do_not_burst() {
        let interval = Duration::from_millis(80);
        let due = Instant::now();
        let now = due + Duration::from_millis(500);

        let next = catch_up(due, now, interval);
        assert_eq!(next, now + interval);
        assert!(next > now);
    }

    #[test]
    fn session_error_survives_a_failed_restore() {
        let res = session_outcome(Err(anyhow::anyhow!("board too big")), Err(anyhow::anyhow!("raw mode")));
        assert_eq!(res.unwrap_err().to_string(), "board too big");

        let res = session_outcome(Ok(()), Err(anyhow::anyhow!("raw mode")));
        assert_eq!(res.unwrap_err().to_string(), "raw mode");

        assert!(session_outcome(Ok(()), Ok(())).is_ok());
    }

    #[test]
    fn head_shows_heading() {
        assert_eq!(head_char(None), IDLE_HEAD_CHAR);
        assert_eq!(head_char(Some(Up)), '^');
        assert_eq!(head_char(Some(Left)), '<');
    }
}
