use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{poll, read, Event, KeyCode, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen, size,
    },
};
use std::io::{self, Write, stdout};
use std::time::Duration;

/// Terminal abstraction for rendering
pub struct Terminal {
    width: u16,
    height: u16,
    buffer: Vec<Vec<Cell>>,
    front: Vec<Vec<Cell>>,
    alternate_screen: bool,
}

/// A single cell in the terminal buffer
#[derive(Clone, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: None,
            bg: None,
        }
    }
}

impl Terminal {
    /// Initialize the terminal for drawing
    pub fn new(alternate_screen: bool) -> io::Result<Self> {
        let (width, height) = size()?;

        if alternate_screen {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen, Hide)?;
        }

        Ok(Self::with_size(width, height, alternate_screen))
    }

    /// Off-screen buffer of a fixed size (print mode, no tty needed)
    pub fn headless(width: u16, height: u16) -> Self {
        Self::with_size(width, height, false)
    }

    fn with_size(width: u16, height: u16, alternate_screen: bool) -> Self {
        let blank = vec![vec![Cell::default(); width as usize]; height as usize];
        Self {
            width,
            height,
            buffer: blank.clone(),
            front: blank,
            alternate_screen,
        }
    }

    /// Get terminal dimensions
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Reallocate buffers after a resize; the next `present` redraws everything
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.buffer = vec![vec![Cell::default(); width as usize]; height as usize];
        self.front = self.buffer.clone();
        for row in &mut self.front {
            for cell in row {
                cell.ch = '\0';
            }
        }
    }

    /// Clear the buffer
    pub fn clear(&mut self) {
        for row in &mut self.buffer {
            for cell in row {
                *cell = Cell::default();
            }
        }
    }

    /// Clear the actual terminal
    pub fn clear_screen(&self) -> io::Result<()> {
        execute!(stdout(), Clear(ClearType::All))?;
        Ok(())
    }

    /// Set a character at position with optional colors
    pub fn set(&mut self, x: i32, y: i32, ch: char, fg: Option<Color>, bg: Option<Color>) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.buffer[y as usize][x as usize] = Cell { ch, fg, bg };
        }
    }

    /// Set a string starting at position
    pub fn set_str(&mut self, x: i32, y: i32, s: &str, fg: Option<Color>, bg: Option<Color>) {
        for (i, ch) in s.chars().enumerate() {
            self.set(x + i as i32, y, ch, fg, bg);
        }
    }

    #[cfg(test)]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.buffer.get(y as usize).and_then(|row| row.get(x as usize))
    }

    /// Flush cells that changed since the last present
    pub fn present(&mut self) -> io::Result<()> {
        let mut out = stdout();

        for (y, (back_row, front_row)) in self.buffer.iter().zip(self.front.iter_mut()).enumerate() {
            for (x, (cell, shown)) in back_row.iter().zip(front_row.iter_mut()).enumerate() {
                if cell == shown {
                    continue;
                }
                queue!(out, MoveTo(x as u16, y as u16))?;
                queue!(out, SetForegroundColor(cell.fg.unwrap_or(Color::Reset)))?;
                queue!(out, SetBackgroundColor(cell.bg.unwrap_or(Color::Reset)))?;
                queue!(out, Print(cell.ch))?;
                *shown = cell.clone();
            }
        }

        queue!(out, ResetColor)?;
        out.flush()?;
        Ok(())
    }

    /// Render the entire buffer to screen, ignoring what is already shown
    pub fn render(&mut self) -> io::Result<()> {
        for row in &mut self.front {
            for cell in row {
                cell.ch = '\0';
            }
        }
        self.present()
    }

    /// Check for keypress (non-blocking), returns (code, modifiers)
    pub fn check_key(&self) -> io::Result<Option<(KeyCode, KeyModifiers)>> {
        if poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = read()? {
                return Ok(Some((key_event.code, key_event.modifiers)));
            }
        }
        Ok(None)
    }

    /// Wait for a keypress with timeout
    pub fn wait_key(&self, timeout_ms: u64) -> io::Result<Option<KeyCode>> {
        if poll(Duration::from_millis(timeout_ms))? {
            if let Event::Key(key_event) = read()? {
                return Ok(Some(key_event.code));
            }
        }
        Ok(None)
    }

    /// Sleep for specified duration
    pub fn sleep(&self, seconds: f32) {
        std::thread::sleep(Duration::from_secs_f32(seconds));
    }

    /// Write the buffer with ANSI truecolor escapes (for print mode)
    pub fn write_ansi<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for row in &self.buffer {
            for cell in row {
                if let Some(code) = cell.fg.and_then(|c| sgr(c, 38)) {
                    write!(out, "\x1b[{}m", code)?;
                }
                if let Some(code) = cell.bg.and_then(|c| sgr(c, 48)) {
                    write!(out, "\x1b[{}m", code)?;
                }
                write!(out, "{}", cell.ch)?;
                if cell.fg.is_some() || cell.bg.is_some() {
                    write!(out, "\x1b[0m")?;
                }
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

/// SGR parameters for a color; `base` is 38 for foreground, 48 for background
fn sgr(color: Color, base: u8) -> Option<String> {
    match color {
        Color::Rgb { r, g, b } => Some(format!("{};2;{};{};{}", base, r, g, b)),
        Color::AnsiValue(v) => Some(format!("{};5;{}", base, v)),
        _ => None,
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.alternate_screen {
            let _ = execute!(stdout(), ResetColor, Show, LeaveAlternateScreen);
            let _ = disable_raw_mode();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_ignores_out_of_bounds() {
        let mut term = Terminal::headless(4, 2);
        term.set(-1, 0, 'x', None, None);
        term.set(4, 1, 'x', None, None);
        term.set(3, 1, 'y', None, None);
        assert_eq!(term.get(3, 1).map(|c| c.ch), Some('y'));
        assert!(term.get(4, 1).is_none());
    }

    #[test]
    fn ansi_output_has_truecolor_codes() {
        let mut term = Terminal::headless(2, 1);
        term.set(0, 0, '▀', Some(Color::Rgb { r: 1, g: 2, b: 3 }), Some(Color::Rgb { r: 4, g: 5, b: 6 }));
        let mut out = Vec::new();
        term.write_ansi(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("\x1b[38;2;1;2;3m\x1b[48;2;4;5;6m▀\x1b[0m"));
        assert!(text.ends_with(" \n"));
    }

    #[test]
    fn resize_reallocates_buffer() {
        let mut term = Terminal::headless(2, 2);
        term.resize(5, 3);
        assert_eq!(term.size(), (5, 3));
        assert!(term.get(4, 2).is_some());
    }
}
