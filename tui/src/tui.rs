//! The terminal frontend.

use crate::driver::{Command, Frame, Frontend};
use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{self, ClearType},
};
use std::{
    io::{self, Stdout, Write},
    time::Duration,
};

/// Draws the world in the alternate screen and reads keys.
///
/// * `[l]` loads the board file;
/// * `[s]` saves the world;
/// * `[space]` pauses or resumes;
/// * `[n]` or `[→]` advances one generation while paused;
/// * `[q]`, `[Esc]` or `[Ctrl-C]` quits.
///
/// The terminal is restored when this is dropped.
pub(crate) struct Terminal {
    stdout: Stdout,
}

impl Terminal {
    pub(crate) fn new() -> Result<Self> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(Terminal { stdout })
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// The lines of `text` with their row on the screen.
///
/// Lines below the last row a terminal can address are dropped.
fn screen_lines(text: &str) -> impl Iterator<Item = (u16, &str)> {
    text.lines()
        .enumerate()
        .map_while(|(y, line)| u16::try_from(y).ok().map(|y| (y, line)))
}

impl Frontend for Terminal {
    fn render(&mut self, frame: &Frame<'_>) -> Result<()> {
        queue!(self.stdout, terminal::Clear(ClearType::All))?;
        let screen = frame.world.to_plaintext('*', ' ') + &frame.status();
        // Raw mode does not return the carriage on `\n`.
        for (y, line) in screen_lines(&screen) {
            queue!(self.stdout, cursor::MoveTo(0, y), Print(line))?;
        }
        self.stdout.flush()?;
        Ok(())
    }

    fn poll(&mut self, timeout: Duration) -> Result<Option<Command>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        let command = match event::read()? {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => match code {
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(Command::Quit)
                }
                KeyCode::Char('l') => Some(Command::Load),
                KeyCode::Char('s') => Some(Command::Save),
                KeyCode::Char(' ') | KeyCode::Enter => Some(Command::Pause),
                KeyCode::Char('n') | KeyCode::Right => Some(Command::Step),
                KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
                _ => None,
            },
            _ => None,
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_beyond_the_screen_are_dropped() {
        let text = "*\n".repeat(usize::from(u16::MAX) + 10);
        let lines: Vec<_> = screen_lines(&text).collect();
        assert_eq!(lines.len(), usize::from(u16::MAX) + 1);
        assert_eq!(lines.last(), Some(&(u16::MAX, "*")));
    }
}
