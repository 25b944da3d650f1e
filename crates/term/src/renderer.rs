//! TerminalRenderer: owns the terminal session and writes frames to it.
//!
//! Every frame is compared with the one before; only runs of changed cells are
//! sent. A size change (or [`TerminalRenderer::invalidate`]) sends the whole
//! frame. The sink is any `Write`, so tests can capture the bytes.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor, event,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    /// Frame currently on screen; `None` forces a full redraw.
    shown: Option<FrameBuffer>,
    bytes: Vec<u8>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            shown: None,
            bytes: Vec::with_capacity(16 * 1024),
        }
    }

    /// Switch to raw mode on the alternate screen with mouse reporting on.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.bytes.clear();
        self.bytes
            .queue(terminal::EnterAlternateScreen)?
            .queue(event::EnableMouseCapture)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        self.send()
    }

    /// Undo [`enter`](Self::enter).
    pub fn exit(&mut self) -> Result<()> {
        self.bytes.clear();
        self.bytes
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(event::DisableMouseCapture)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.send()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Make the next draw repaint everything (after a resize, for instance).
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Put `fb` on screen and hand back the previous frame in its place.
    ///
    /// `fb` comes back holding stale cells for the caller to draw over.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.bytes.clear();
        let mut previous = match self.shown.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.bytes)?;
                prev
            }
            stale => {
                encode_full_into(fb, &mut self.bytes)?;
                let mut prev = stale.unwrap_or_else(|| FrameBuffer::new(0, 0));
                prev.resize(fb.width(), fb.height());
                prev
            }
        };
        std::mem::swap(&mut previous, fb);
        self.shown = Some(previous);
        self.send()
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn send(&mut self) -> Result<()> {
        self.out.write_all(&self.bytes)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Queues cells, emitting style changes only when the style differs.
struct CellEncoder<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl<'a> CellEncoder<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn move_to(&mut self, x: u16, y: u16) -> Result<()> {
        self.out.queue(cursor::MoveTo(x, y))?;
        Ok(())
    }

    fn cells(&mut self, cells: &[Cell]) -> Result<()> {
        for cell in cells {
            if self.style != Some(cell.style) {
                queue_style(self.out, cell.style)?;
                self.style = Some(cell.style);
            }
            self.out.queue(Print(cell.ch))?;
        }
        Ok(())
    }

    /// Reset attributes if anything was styled.
    fn finish(self) -> Result<()> {
        if self.style.is_some() {
            self.out
                .queue(ResetColor)?
                .queue(SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

/// Queue a clear-screen followed by every cell of `fb`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut enc = CellEncoder::new(out);
    for y in 0..fb.height() {
        enc.move_to(0, y)?;
        enc.cells(fb.row(y))?;
    }
    enc.finish()
}

/// Queue only the cells of `next` that differ from `prev`.
///
/// Frames of different sizes are sent whole, row by row.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut enc = CellEncoder::new(out);
    for run in changed_runs(prev, next) {
        enc.move_to(run.x, run.y)?;
        let row = next.row(run.y);
        enc.cells(&row[run.x as usize..(run.x + run.len) as usize])?;
    }
    enc.finish()
}

fn queue_style(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?
        .queue(SetForegroundColor(to_color(style.fg)))?
        .queue(SetBackgroundColor(to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// A horizontal stretch of changed cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    x: u16,
    y: u16,
    len: u16,
}

fn changed_runs<'a>(prev: &'a FrameBuffer, next: &'a FrameBuffer) -> impl Iterator<Item = Run> + 'a {
    let resized = prev.width() != next.width() || prev.height() != next.height();
    (0..next.height()).flat_map(move |y| {
        let now = next.row(y);
        let before = if resized { &[][..] } else { prev.row(y) };
        row_runs(before, now).map(move |(x, len)| Run { x, y, len })
    })
}

/// `(start, len)` of each stretch where `now` differs from `before`.
///
/// Cells missing from `before` count as changed.
fn row_runs<'a>(before: &'a [Cell], now: &'a [Cell]) -> impl Iterator<Item = (u16, u16)> + 'a {
    let differs = move |i: usize| before.get(i) != Some(&now[i]);
    let mut i = 0;
    std::iter::from_fn(move || {
        while i < now.len() && !differs(i) {
            i += 1;
        }
        if i == now.len() {
            return None;
        }
        let start = i;
        while i < now.len() && differs(i) {
            i += 1;
        }
        Some((start as u16, (i - start) as u16))
    })
}
