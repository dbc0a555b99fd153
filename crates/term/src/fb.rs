//! Framebuffer and style types for terminal rendering.

use crate::layout::Region;
use crate::surface::DrawSurface;
use crate::types::ColorId;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

const FELT: Rgb = Rgb::new(0, 0, 0);
const CARD_STOCK: Rgb = Rgb::new(235, 235, 225);

/// Minimal per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            fg: Rgb::new(220, 220, 220),
            bg: FELT,
            bold: false,
            dim: false,
        }
    }
}

impl From<ColorId> for CellStyle {
    fn from(color: ColorId) -> Self {
        let on_felt = |fg: Rgb| CellStyle {
            fg,
            bg: FELT,
            bold: true,
            dim: false,
        };
        let on_card = |fg: Rgb| CellStyle {
            fg,
            bg: CARD_STOCK,
            bold: true,
            dim: false,
        };
        match color {
            ColorId::Default => CellStyle::default(),
            ColorId::CardFace => on_card(CARD_STOCK),
            ColorId::CardBlack => on_card(Rgb::new(20, 20, 20)),
            ColorId::CardRed => on_card(Rgb::new(200, 30, 30)),
            ColorId::Red => on_felt(Rgb::new(220, 80, 80)),
            ColorId::Green => on_felt(Rgb::new(100, 220, 120)),
            ColorId::Yellow => on_felt(Rgb::new(240, 220, 80)),
            ColorId::Blue => on_felt(Rgb::new(80, 120, 220)),
            ColorId::Magenta => on_felt(Rgb::new(200, 120, 220)),
            ColorId::Cyan => on_felt(Rgb::new(80, 220, 220)),
        }
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

/// 2D framebuffer of styled character cells.
///
/// Also the in-memory [`DrawSurface`]: writes outside the buffer are ignored,
/// `flush` is a no-op and the last cursor request is remembered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    cursor: Option<(u16, u16)>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
            cursor: None,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Last requested cursor position as `(x, y)`.
    pub fn cursor(&self) -> Option<(u16, u16)> {
        self.cursor
    }

    pub fn clear_cursor(&mut self) {
        self.cursor = None;
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: CellStyle) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x.saturating_add(dx), y.saturating_add(dy), Cell { ch, style });
            }
        }
    }

    /// Row `y` as plain text. Empty when out of range.
    pub fn row_string(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|cell| cell.ch)
            .collect()
    }

    /// Whole buffer as newline-separated rows.
    pub fn to_text(&self) -> String {
        let mut all = String::with_capacity((self.width as usize + 1) * self.height as usize);
        for y in 0..self.height {
            all.push_str(&self.row_string(y));
            all.push('\n');
        }
        all
    }

    /// Part of `region` that lies inside the buffer, as `(x, y, w, h)`.
    pub fn clip(&self, region: Region) -> Option<(u16, u16, u16, u16)> {
        let x0 = region.x.max(0);
        let y0 = region.y.max(0);
        let x1 = region.right().min(i32::from(self.width));
        let y1 = region.bottom().min(i32::from(self.height));
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        // All four values are within 0..=u16::MAX after clamping to the buffer.
        Some((x0 as u16, y0 as u16, (x1 - x0) as u16, (y1 - y0) as u16))
    }
}

fn grid_cell(y: i32, x: i32) -> Option<(u16, u16)> {
    Some((u16::try_from(x).ok()?, u16::try_from(y).ok()?))
}

impl DrawSurface for FrameBuffer {
    fn clear_region(&mut self, region: Region) {
        if let Some((x, y, w, h)) = self.clip(region) {
            self.fill_rect(x, y, w, h, ' ', CellStyle::default());
        }
    }

    fn draw_box(&mut self, region: Region) {
        if region.width < 2 || region.height < 2 {
            return;
        }
        let (x0, y0) = (region.x, region.y);
        let (x1, y1) = (region.right() - 1, region.bottom() - 1);
        let c = ColorId::Default;

        DrawSurface::put_char(self, y0, x0, '┌', c);
        DrawSurface::put_char(self, y0, x1, '┐', c);
        DrawSurface::put_char(self, y1, x0, '└', c);
        DrawSurface::put_char(self, y1, x1, '┘', c);
        for x in x0 + 1..x1 {
            DrawSurface::put_char(self, y0, x, '─', c);
            DrawSurface::put_char(self, y1, x, '─', c);
        }
        for y in y0 + 1..y1 {
            DrawSurface::put_char(self, y, x0, '│', c);
            DrawSurface::put_char(self, y, x1, '│', c);
        }
    }

    fn put_char(&mut self, y: i32, x: i32, ch: char, color: ColorId) {
        if let Some((x, y)) = grid_cell(y, x) {
            self.set(x, y, Cell {
                ch,
                style: color.into(),
            });
        }
    }

    fn flush(&mut self, _region: Region) {}

    fn move_cursor(&mut self, y: i32, x: i32) {
        if let Some((x, y)) = grid_cell(y, x) {
            if x < self.width && y < self.height {
                self.cursor = Some((x, y));
            }
        }
    }
}
