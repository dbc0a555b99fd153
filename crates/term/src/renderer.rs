//! TerminalRenderer: flushes framebuffer regions to a real terminal.
//!
//! The table repaints pane by pane, so the renderer diffs and emits one
//! rectangle at a time against what the terminal is known to show.

use std::io::{self, Write};

use anyhow::Result;
use tracing::{trace, warn};

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::layout::Region;
use crate::surface::DrawSurface;
use crate::table_view::CanvasSize;
use crate::types::ColorId;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// What the terminal currently shows.
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
        self.flush_buf()?;
        self.last = None;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Emit the changed cells of `region`, then park the cursor.
    ///
    /// `park` is the cursor position as `(x, y)`; `None` hides it.
    pub fn draw_region(
        &mut self,
        fb: &FrameBuffer,
        region: Region,
        park: Option<(u16, u16)>,
    ) -> Result<()> {
        let mut prev = match self.last.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => prev,
            // Blank, like the freshly cleared alternate screen.
            _ => FrameBuffer::new(fb.width(), fb.height()),
        };

        self.buf.clear();
        encode_region_into(&prev, fb, region, &mut self.buf)?;
        match park {
            Some((x, y)) => {
                self.buf.queue(cursor::MoveTo(x, y))?;
                self.buf.queue(cursor::Show)?;
            }
            None => {
                self.buf.queue(cursor::Hide)?;
            }
        }
        trace!(bytes = self.buf.len(), x = region.x, y = region.y, "region flushed");
        self.flush_buf()?;

        if let Some((x, y, w, h)) = fb.clip(region) {
            for row in y..y + h {
                for col in x..x + w {
                    if let Some(cell) = fb.get(col, row) {
                        prev.set(col, row, cell);
                    }
                }
            }
        }
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode the cells of `region` that differ between `prev` and `next` into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_region_into(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    region: Region,
    out: &mut Vec<u8>,
) -> Result<()> {
    let mut current_style: Option<CellStyle> = None;

    for_each_changed_run(prev, next, region, |x, y, len| {
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let cell = next.get(x + dx, y).unwrap_or_default();
            if current_style != Some(cell.style) {
                apply_style_into(out, cell.style)?;
                current_style = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
        Ok(())
    })?;

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    out.queue(SetAttribute(Attribute::Reset))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Call `f(x, y, len)` for each horizontal run of changed cells inside `region`.
fn for_each_changed_run(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    region: Region,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    let Some((x0, y0, w, h)) = next.clip(region) else {
        return Ok(());
    };
    let x_end = x0 + w;

    for y in y0..y0 + h {
        let mut x = x0;
        while x < x_end {
            let a = prev.get(x, y).unwrap_or_default();
            let b = next.get(x, y).unwrap_or_default();
            if a == b {
                x += 1;
                continue;
            }

            let start = x;
            x += 1;
            while x < x_end {
                let a2 = prev.get(x, y).unwrap_or_default();
                let b2 = next.get(x, y).unwrap_or_default();
                if a2 == b2 {
                    break;
                }
                x += 1;
            }
            f(start, y, x - start)?;
        }
    }

    Ok(())
}

/// A [`DrawSurface`] backed by the real terminal.
///
/// Painting goes to an in-memory framebuffer; `flush` pushes one region of it
/// out through the [`TerminalRenderer`]. Clearing a region drops any pending
/// cursor request, so the cursor only shows while a prompt keeps asking for it.
pub struct TerminalSurface {
    fb: FrameBuffer,
    renderer: TerminalRenderer,
}

impl TerminalSurface {
    pub fn new(canvas: CanvasSize) -> Self {
        // One spare row and column, matching `CanvasSize::from_terminal`.
        let width = u16::try_from(canvas.width + 1).unwrap_or(0);
        let height = u16::try_from(canvas.height + 1).unwrap_or(0);
        Self {
            fb: FrameBuffer::new(width, height),
            renderer: TerminalRenderer::new(),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        self.renderer.enter()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.renderer.exit()
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.fb
    }
}

impl DrawSurface for TerminalSurface {
    fn clear_region(&mut self, region: Region) {
        self.fb.clear_cursor();
        self.fb.clear_region(region);
    }

    fn draw_box(&mut self, region: Region) {
        self.fb.draw_box(region);
    }

    fn put_char(&mut self, y: i32, x: i32, ch: char, color: ColorId) {
        DrawSurface::put_char(&mut self.fb, y, x, ch, color);
    }

    fn flush(&mut self, region: Region) {
        // Nothing above the surface can act on a failed write; the next
        // repaint re-sends every changed cell anyway.
        if let Err(err) = self.renderer.draw_region(&self.fb, region, self.fb.cursor()) {
            warn!(%err, "terminal write failed");
        }
    }

    fn move_cursor(&mut self, y: i32, x: i32) {
        self.fb.move_cursor(y, x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fb::{Cell, CellStyle};

    #[test]
    fn style_conversion_is_exact() {
        let style = CellStyle::default();
        assert_eq!(
            rgb_to_color(style.fg),
            Color::Rgb {
                r: style.fg.r,
                g: style.fg.g,
                b: style.fg.b
            }
        );
    }

    #[test]
    fn changed_run_iterator_coalesces_adjacent_cells() {
        let style = CellStyle::default();
        let a = FrameBuffer::new(5, 1);
        let mut b = FrameBuffer::new(5, 1);

        // Change cells [1..=3] into X.
        for x in 1..=3 {
            b.set(x, 0, Cell { ch: 'X', style });
        }

        let mut runs = Vec::new();
        for_each_changed_run(&a, &b, Region::new(0, 0, 5, 1), |x, y, len| {
            runs.push((x, y, len));
            Ok(())
        })
        .unwrap();
        assert_eq!(runs, vec![(1, 0, 3)]);
    }

    #[test]
    fn changed_runs_stop_at_region_edges() {
        let style = CellStyle::default();
        let a = FrameBuffer::new(6, 3);
        let mut b = FrameBuffer::new(6, 3);
        for y in 0..3 {
            for x in 0..6 {
                b.set(x, y, Cell { ch: 'X', style });
            }
        }

        let mut runs = Vec::new();
        for_each_changed_run(&a, &b, Region::new(2, 1, 10, 1), |x, y, len| {
            runs.push((x, y, len));
            Ok(())
        })
        .unwrap();
        assert_eq!(runs, vec![(2, 1, 4)]);
    }

    #[test]
    fn unchanged_region_encodes_only_reset() {
        let fb = FrameBuffer::new(4, 4);
        let mut out = Vec::new();
        encode_region_into(&fb, &fb, Region::new(0, 0, 4, 4), &mut out).unwrap();

        let mut reset = Vec::new();
        reset.queue(ResetColor).unwrap();
        reset.queue(SetAttribute(Attribute::Reset)).unwrap();
        assert_eq!(out, reset);
    }

    #[test]
    fn encoded_region_contains_new_text() {
        let prev = FrameBuffer::new(10, 2);
        let mut next = FrameBuffer::new(10, 2);
        DrawSurface::put_str(&mut next, 1, 3, "Bet", ColorId::Default);
        DrawSurface::put_str(&mut next, 0, 0, "zz", ColorId::Default);

        let mut out = Vec::new();
        encode_region_into(&prev, &next, Region::new(0, 1, 10, 1), &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("Bet"));
        assert!(!text.contains("zz"));
    }
}
