use super::color::Color;
use unicode_width::UnicodeWidthChar;

/// A rectangle of terminal cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// A `width` x `height` rectangle centered in this one, clipped to fit.
    pub fn centered(&self, width: u16, height: u16) -> Self {
        let width = width.min(self.width);
        let height = height.min(self.height);
        Self::new(self.x + (self.width - width) / 2, self.y + (self.height - height) / 2, width, height)
    }

    /// Shrinks by `amount` cells on every side.
    pub fn inset(&self, amount: u16) -> Self {
        let width = self.width.saturating_sub(amount * 2);
        let height = self.height.saturating_sub(amount * 2);
        Self::new(self.x + amount.min(self.width / 2), self.y + amount.min(self.height / 2), width, height)
    }

    pub fn right(&self) -> u16 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u16 {
        self.y + self.height
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
}

impl Cell {
    /// Marks the second column of a double width character.
    pub const CONTINUATION: char = '\0';

    pub const fn blank() -> Self {
        Self { ch: ' ', fg: None, bg: None, bold: false }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank()
    }
}

/// An off-screen grid of cells that gets flushed to the terminal in one go.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height, cells: vec![Cell::blank(); width as usize * height as usize] }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn area(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|index| &self.cells[index])
    }

    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|index| &mut self.cells[index])
    }

    /// Writes a cell. Anything outside the canvas is dropped.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(target) = self.get_mut(x, y) {
            *target = cell;
        }
    }

    /// Writes a character in front of whatever background the cell already has.
    pub fn put_char(&mut self, x: u16, y: u16, ch: char, fg: Color, bold: bool) {
        if let Some(cell) = self.get_mut(x, y) {
            cell.ch = ch;
            cell.fg = Some(fg);
            cell.bold = bold;
        }
    }

    /// Writes text starting at `(x, y)` keeping existing backgrounds. Returns the columns used.
    pub fn put_str(&mut self, x: u16, y: u16, text: &str, fg: Color, bold: bool) -> u16 {
        let mut column = x;
        for ch in text.chars() {
            let width = ch.width().unwrap_or(0) as u16;
            if width == 0 {
                continue;
            }
            if column + width > self.width {
                break;
            }
            self.put_char(column, y, ch, fg, bold);
            if width == 2 {
                self.put_char(column + 1, y, Cell::CONTINUATION, fg, bold);
            }
            column += width;
        }
        column - x
    }

    /// Writes text horizontally centered inside `area` on row `y`, cut off at the area's edge.
    pub fn put_centered(&mut self, area: Rect, y: u16, text: &str, fg: Color, bold: bool) {
        let mut width = 0;
        let end = text
            .char_indices()
            .find(|(_, ch)| {
                width += ch.width().unwrap_or(0);
                width > area.width as usize
            })
            .map_or(text.len(), |(index, _)| index);
        let text = &text[..end];
        let width = text_width(text) as u16;
        self.put_str(area.x + (area.width - width) / 2, y, text, fg, bold);
    }

    pub fn set_background(&mut self, x: u16, y: u16, bg: Color) {
        if let Some(cell) = self.get_mut(x, y) {
            cell.bg = Some(bg);
        }
    }

    pub fn fill(&mut self, area: Rect, bg: Color) {
        for y in area.y..area.bottom().min(self.height) {
            for x in area.x..area.right().min(self.width) {
                self.set(x, y, Cell { bg: Some(bg), ..Cell::blank() });
            }
        }
    }

    /// Draws a rounded single line frame along the edge of `area`.
    pub fn frame(&mut self, area: Rect, color: Color) {
        if area.width < 2 || area.height < 2 {
            return;
        }
        let (left, top) = (area.x, area.y);
        let (right, bottom) = (area.right() - 1, area.bottom() - 1);
        for x in left + 1..right {
            self.put_char(x, top, '─', color, false);
            self.put_char(x, bottom, '─', color, false);
        }
        for y in top + 1..bottom {
            self.put_char(left, y, '│', color, false);
            self.put_char(right, y, '│', color, false);
        }
        self.put_char(left, top, '╭', color, false);
        self.put_char(right, top, '╮', color, false);
        self.put_char(left, bottom, '╰', color, false);
        self.put_char(right, bottom, '╯', color, false);
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// The characters on row `y`, mostly useful in tests.
    pub fn row_text(&self, y: u16) -> String {
        self.rows()
            .nth(y as usize)
            .map(|row| row.iter().map(|cell| cell.ch).filter(|ch| *ch != Cell::CONTINUATION).collect())
            .unwrap_or_default()
    }
}

/// Display width of `text` in terminal columns.
pub fn text_width(text: &str) -> usize {
    unicode_width::UnicodeWidthStr::width(text)
}
