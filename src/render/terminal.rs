use super::canvas::{Canvas, Cell};
use super::color::Color;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};

/// Puts the terminal in raw mode on the alternate screen, and restores it when dropped.
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

/// Leaves raw mode and the alternate screen. Safe to call when neither is active.
pub fn restore_terminal() {
    let _ = execute!(io::stdout(), ResetColor, Show, LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

/// Flushes canvases to a terminal, only rewriting the cells that changed since the last frame.
pub struct CanvasWriter<W: Write> {
    output: W,
    previous: Option<Canvas>,
}

#[derive(Clone, Copy, Default, PartialEq)]
struct Pen {
    fg: Option<Color>,
    bg: Option<Color>,
    bold: bool,
}

impl<W: Write> CanvasWriter<W> {
    pub fn new(output: W) -> Self {
        Self { output, previous: None }
    }

    pub fn render(&mut self, canvas: &Canvas) -> io::Result<()> {
        let previous = self.previous.take().filter(|previous| {
            previous.width() == canvas.width() && previous.height() == canvas.height()
        });
        if previous.is_none() {
            queue!(self.output, ResetColor, Clear(ClearType::All))?;
        }

        let mut pen: Option<Pen> = None;
        let mut cursor: Option<(u16, u16)> = None;
        for (y, row) in canvas.rows().enumerate() {
            let y = y as u16;
            for (x, cell) in row.iter().enumerate() {
                let x = x as u16;
                if cell.ch == Cell::CONTINUATION {
                    continue;
                }
                if previous.as_ref().and_then(|previous| previous.get(x, y)) == Some(cell) {
                    continue;
                }
                if cursor != Some((x, y)) {
                    queue!(self.output, MoveTo(x, y))?;
                }
                let wanted = Pen { fg: cell.fg, bg: cell.bg, bold: cell.bold };
                if pen != Some(wanted) {
                    self.apply(wanted)?;
                    pen = Some(wanted);
                }
                queue!(self.output, Print(cell.ch))?;
                let width = unicode_width::UnicodeWidthChar::width(cell.ch).unwrap_or(1) as u16;
                cursor = Some((x + width, y));
            }
        }
        queue!(self.output, ResetColor, SetAttribute(Attribute::Reset))?;
        self.output.flush()?;
        self.previous = Some(canvas.clone());
        Ok(())
    }

    fn apply(&mut self, pen: Pen) -> io::Result<()> {
        queue!(self.output, SetAttribute(Attribute::Reset), ResetColor)?;
        if pen.bold {
            queue!(self.output, SetAttribute(Attribute::Bold))?;
        }
        if let Some(fg) = pen.fg {
            queue!(self.output, SetForegroundColor(fg.into()))?;
        }
        if let Some(bg) = pen.bg {
            queue!(self.output, SetBackgroundColor(bg.into()))?;
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.output
    }
}
