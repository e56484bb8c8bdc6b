//! Fire effect visualization (doom-style)
//!
//! The terminal is treated as a pixel surface two pixels tall per character
//! cell: `▀` draws the upper pixel in the foreground color and the lower one
//! in the background color.

use crate::config::{resolve_seed, FireConfig, OutputFormat, PrintConfig};
use crate::doom::geometry::CellRect;
use crate::doom::{FireSession, GridGeometry, WindDirection};
use crate::help::{show_help_modal, FIRE_HELP};
use crate::palette::{Palette, MAX_LEVEL};
use crate::terminal::Terminal;
use super::VizState;
use crossterm::style::Color;
use rand::prelude::*;
use serde::Serialize;
use std::cell::RefCell;
use std::io::{self, stdout, Write};
use std::rc::Rc;
use std::time::Instant;
use tracing::info;

type Rgb = (u8, u8, u8);

/// Pixel surface size for a terminal of `cols` x `rows` character cells
pub fn surface_size(cols: u16, rows: u16) -> (u32, u32) {
    (cols as u32, rows as u32 * 2)
}

/// Rasterizes fire intensities onto a pixel surface
pub struct FireView {
    width: u32,
    height: u32,
    pixels: Vec<Option<Rgb>>,
    palette: Palette,
}

impl FireView {
    pub fn new(width: u32, height: u32, palette: Palette) -> Self {
        Self {
            width,
            height,
            pixels: vec![None; width as usize * height as usize],
            palette,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![None; width as usize * height as usize];
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels[(y * self.width + x) as usize]
    }

    /// Paint one `cell_size` square per grid cell. The source row is never
    /// drawn; the flames appear to rise out of the bottom edge.
    pub fn rasterize(&mut self, geometry: &GridGeometry, intensities: &[u8]) {
        self.pixels.fill(None);
        if intensities.len() != geometry.cell_count() {
            return;
        }

        for column in 0..geometry.grid_width {
            for row in 0..geometry.grid_height.saturating_sub(1) {
                let level = intensities[geometry.index(column, row)];
                let rgb = self.palette.rgb(level);
                self.fill_rect(geometry.cell_rect(column, row), rgb);
            }
        }
    }

    fn fill_rect(&mut self, rect: CellRect, rgb: Rgb) {
        let x_end = (rect.x + rect.size).min(self.width);
        let y_end = (rect.y + rect.size).min(self.height);
        for y in rect.y..y_end {
            let start = (y * self.width) as usize;
            for x in rect.x..x_end {
                self.pixels[start + x as usize] = Some(rgb);
            }
        }
    }

    /// Compose pixel pairs into half-block glyphs in the back buffer
    pub fn draw(&self, term: &mut Terminal) {
        let to_color = |(r, g, b): Rgb| Color::Rgb { r, g, b };

        for ty in 0..self.height.div_ceil(2) {
            for x in 0..self.width {
                let upper = self.pixel(x, ty * 2);
                let lower = self.pixel(x, ty * 2 + 1);
                let (ch, fg, bg) = match (upper, lower) {
                    (Some(u), l) => ('▀', Some(to_color(u)), l.map(to_color)),
                    (None, Some(l)) => ('▄', Some(to_color(l)), None),
                    (None, None) => (' ', None, None),
                };
                term.set(x as i32, ty as i32, ch, fg, bg);
            }
        }
    }
}

/// Run the fire effect visualization
pub fn run(term: &mut Terminal, config: &FireConfig, rng: StdRng) -> io::Result<()> {
    let mut state = VizState::new(config.time_step, config.palette, config.wind);

    let mut size = term.size();
    let (surface_w, surface_h) = surface_size(size.0, size.1);

    let view = Rc::new(RefCell::new(FireView::new(surface_w, surface_h, state.palette)));
    let mut session = FireSession::new(MAX_LEVEL, state.wind, rng);
    let sink = Rc::clone(&view);
    session.subscribe(Box::new(move |geometry, pixels| {
        sink.borrow_mut().rasterize(geometry, pixels);
    }));
    session.measure(surface_w, surface_h);
    session.start();

    loop {
        let new_size = crossterm::terminal::size().unwrap_or(size);
        if new_size != size {
            size = new_size;
            term.resize(size.0, size.1);
            term.clear_screen()?;
            let (surface_w, surface_h) = surface_size(size.0, size.1);
            view.borrow_mut().resize(surface_w, surface_h);
            session.remeasure(surface_w, surface_h);
        }

        if let Some((code, mods)) = term.check_key()? {
            if state.handle_key(code, mods) {
                break;
            }
        }

        if state.show_help {
            state.show_help = false;
            if show_help_modal(term, FIRE_HELP)? {
                break;
            }
        }

        session.set_wind(state.wind);
        if state.paused && session.is_running() {
            session.stop();
        } else if !state.paused && !session.is_running() {
            session.start();
        }
        view.borrow_mut().set_palette(state.palette);

        if !session.on_frame(Instant::now()) {
            // Paused: repaint the frozen frame so palette changes still show
            if let Some(geometry) = session.geometry() {
                view.borrow_mut().rasterize(geometry, session.snapshot());
            }
        }

        term.clear();
        view.borrow().draw(term);
        if state.paused {
            draw_status(term, session.wind(), state.palette);
        }
        term.present()?;

        term.sleep(if state.paused { 0.1 } else { state.speed });
    }

    info!(ticks = session.ticks(), last_frame = ?session.last_frame(), "fire stopped");
    Ok(())
}

fn draw_status(term: &mut Terminal, wind: WindDirection, palette: Palette) {
    let status = format!(
        " PAUSED  wind: {}  palette: {}  ? help ",
        wind.label(),
        palette.label()
    );
    term.set_str(0, 0, &status, Some(Color::Black), Some(Color::Grey));
}

#[derive(Serialize)]
struct FrameDump<'a> {
    geometry: GridGeometry,
    max_level: u8,
    ticks: u64,
    wind: WindDirection,
    intensities: &'a [u8],
}

/// Simulate `config.frames` ticks headlessly and print the result to stdout
pub fn print_frames(config: &PrintConfig) -> io::Result<()> {
    let mut out = stdout().lock();
    render_frames(config, &mut out)?;
    out.flush()
}

pub fn render_frames<W: Write>(config: &PrintConfig, out: &mut W) -> io::Result<()> {
    let rng = StdRng::seed_from_u64(resolve_seed(config.seed));
    let mut session = FireSession::new(MAX_LEVEL, config.wind, rng);
    session.measure(config.width, config.height);
    session.start();
    for _ in 0..config.frames {
        session.on_frame(Instant::now());
    }

    let Some(geometry) = session.geometry().copied() else {
        return Ok(());
    };

    match config.format {
        OutputFormat::Json => {
            let dump = FrameDump {
                geometry,
                max_level: session.max_level(),
                ticks: session.ticks(),
                wind: config.wind,
                intensities: session.snapshot(),
            };
            serde_json::to_writer(&mut *out, &dump)?;
            writeln!(out)?;
        }
        OutputFormat::Ansi => {
            let mut view = FireView::new(config.width, config.height, config.palette);
            view.rasterize(&geometry, session.snapshot());

            let cols = u16::try_from(config.width).unwrap_or(u16::MAX);
            let rows = u16::try_from(config.height.div_ceil(2)).unwrap_or(u16::MAX);
            let mut term = Terminal::headless(cols, rows);
            view.draw(&mut term);
            term.write_ansi(out)?;
        }
    }
    Ok(())
}
