use crate::terminal::Terminal;
use crossterm::cursor::MoveTo;
use crossterm::event::KeyCode;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::queue;
use std::io::{self, stdout, Write};

pub const FIRE_HELP: &str = "\
DOOM FIRE
─────────────────────────
h / ←    Wind blows left
l / →    Wind blows right
n / ↓    Calm air
Space    Pause / resume
1-9, 0   Frame delay presets
!        Doom palette
@        Ice palette
#        Toxic palette
&        Mono palette
?        Close this help
q / Esc  Quit";

/// Top-left corner and size of a centered help box
fn help_box(width: u16, height: u16, help_text: &str) -> (usize, usize, usize, usize) {
    let lines = help_text.lines().count();
    let max_width = help_text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    let box_width = max_width + 4; // 2 chars padding each side
    let box_height = lines + 2; // 1 row padding top/bottom

    let start_x = (width as usize).saturating_sub(box_width) / 2;
    let start_y = (height as usize).saturating_sub(box_height) / 2;
    (start_x, start_y, box_width, box_height)
}

/// Show a modal help overlay without modifying the back buffer.
/// Returns true if the user requested quit (q/Esc) while the overlay is open.
pub fn show_help_modal(term: &mut Terminal, help_text: &str) -> io::Result<bool> {
    if help_text.is_empty() {
        return Ok(false);
    }

    let (width, height) = term.size();
    render_help_overlay_direct(width, height, help_text)?;

    loop {
        if let Some(code) = term.wait_key(50)? {
            match code {
                KeyCode::Char('?') => break,
                KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
                _ => {}
            }
        }
    }

    // Restore previous frame from back buffer.
    term.render()?;
    Ok(false)
}

fn render_help_overlay_direct(width: u16, height: u16, help_text: &str) -> io::Result<()> {
    let (start_x, start_y, box_width, box_height) = help_box(width, height, help_text);
    let max_width = box_width - 4;

    let border_color = Color::White;
    let text_color = Color::Grey;

    let mut out = stdout();
    queue!(out, SetBackgroundColor(Color::Black))?;

    // Top border
    queue!(out, MoveTo(start_x as u16, start_y as u16), SetForegroundColor(border_color), Print('┌'))?;
    for x in 1..box_width - 1 {
        queue!(out, MoveTo((start_x + x) as u16, start_y as u16), Print('─'))?;
    }
    queue!(out, MoveTo((start_x + box_width - 1) as u16, start_y as u16), Print('┐'))?;

    // Content rows
    for (i, line) in help_text.lines().enumerate() {
        let y = start_y + 1 + i;
        queue!(out, MoveTo(start_x as u16, y as u16), SetForegroundColor(border_color), Print('│'))?;

        let padding = max_width.saturating_sub(line.chars().count());
        let padded = format!(" {}{} ", line, " ".repeat(padding));
        queue!(out, SetForegroundColor(text_color))?;
        queue!(out, MoveTo((start_x + 1) as u16, y as u16), Print(padded))?;

        queue!(out, SetForegroundColor(border_color))?;
        queue!(out, MoveTo((start_x + box_width - 1) as u16, y as u16), Print('│'))?;
    }

    // Bottom border
    let bottom_y = start_y + box_height - 1;
    queue!(out, MoveTo(start_x as u16, bottom_y as u16), SetForegroundColor(border_color), Print('└'))?;
    for x in 1..box_width - 1 {
        queue!(out, MoveTo((start_x + x) as u16, bottom_y as u16), Print('─'))?;
    }
    queue!(out, MoveTo((start_x + box_width - 1) as u16, bottom_y as u16), Print('┘'))?;

    queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_box_is_centered() {
        let (x, y, w, h) = help_box(80, 40, "ab\nabcd");
        assert_eq!((w, h), (8, 4));
        assert_eq!((x, y), (36, 18));
    }

    #[test]
    fn help_box_clamps_on_small_terminal() {
        let (x, y, _, _) = help_box(4, 2, FIRE_HELP);
        assert_eq!((x, y), (0, 0));
    }

    #[test]
    fn fire_help_lists_wind_keys() {
        assert!(FIRE_HELP.contains("Wind blows left"));
        assert!(FIRE_HELP.contains("Calm air"));
    }
}
