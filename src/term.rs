use std::{io::{Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal, Result};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};

pub type TermInt = u16;
pub type Coords = (TermInt, TermInt);

/// Owns stdout while the game runs. Everything drawn through `print_at` is
/// mirrored in `screen` so message boxes can be taken down again.
pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    screen: Vec<char>,
    current_msg: Option<Message>,
}

struct Message {
    top_left: Coords,
    width: TermInt,
    height: TermInt,
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size()?;
        let screen = vec![' '; width as usize * height as usize];
        Ok(TermManager { width, height, stdout: stdout(), screen, current_msg: None })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen, cursor::Hide, cursor::DisableBlinking)?;
        terminal::enable_raw_mode()
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    pub fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }

    /// Drains whatever key presses are already waiting, without blocking.
    pub fn read_key_events_queue(&self) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(1))? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    pub fn size(&self) -> Coords {
        (self.width, self.height)
    }

    /// Centers a boxed message over the area `(0, 0)..area`, clipped to the
    /// terminal.
    pub fn show_message(&mut self, lines: &[&str], area: Coords) -> Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let center = (area.0.min(self.width) / 2, area.1.min(self.height) / 2);
        let top_left = (center.0.saturating_sub(msg_width / 2), center.1.saturating_sub(msg_height / 2));

        // Print the top and bottom empty lines
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            for x_diff in 0..msg_width {
                self.print_at_no_save((top_left.0 + x_diff, *y), ' ')?;
            }
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.print_at_no_save((top_left.0 + x_diff as TermInt, y), ch)?;
            }
        }

        self.current_msg = Some(Message { width: msg_width, height: msg_height, top_left });
        self.flush()
    }

    pub fn hide_message(&mut self) -> Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };

        // Put back what the box was covering
        for y in msg.top_left.1..msg.top_left.1.saturating_add(msg.height) {
            for x in msg.top_left.0..msg.top_left.0.saturating_add(msg.width) {
                if let Some(idx) = self.index((x, y)) {
                    let ch = self.screen[idx];
                    self.print_at_no_save((x, y), ch)?;
                }
            }
        }

        self.flush()
    }

    pub fn print_at(&mut self, pos: Coords, ch: char) -> Result<()> {
        if let Some(idx) = self.index(pos) {
            self.screen[idx] = ch;
            queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))?;
        }
        Ok(())
    }

    pub fn print_str_at(&mut self, pos: Coords, text: &str) -> Result<()> {
        for (x_diff, ch) in text.chars().enumerate() {
            self.print_at((pos.0.saturating_add(x_diff as TermInt), pos.1), ch)?;
        }
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        self.current_msg = None;
        self.screen = vec![' '; self.width as usize * self.height as usize];
        execute!(self.stdout, terminal::Clear(ClearType::All))
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn index(&self, pos: Coords) -> Option<usize> {
        if pos.0 < self.width && pos.1 < self.height {
            Some(self.width as usize * pos.1 as usize + pos.0 as usize)
        } else {
            None
        }
    }

    fn print_at_no_save(&mut self, pos: Coords, ch: char) -> Result<()> {
        // Messages skip the buffer so hide_message can restore what was there
        if self.index(pos).is_some() {
            queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))?;
        }
        Ok(())
    }
}
