//! Drawing-surface contract consumed by the table view.
//!
//! Coordinates are `(y, x)` grid cells, row first. Every write addressed
//! outside the surface must be a silent no-op: the view never pre-clips, so a
//! seat hanging off the edge of a small terminal just loses the cells that do
//! not fit.

use crate::layout::Region;
use crate::types::ColorId;

/// A character grid the table can be painted on.
pub trait DrawSurface {
    /// Blank every cell of `region`.
    fn clear_region(&mut self, region: Region);

    /// Outline `region` with a single-line border.
    fn draw_box(&mut self, region: Region);

    fn put_char(&mut self, y: i32, x: i32, ch: char, color: ColorId);

    /// Write `text` left to right from `(y, x)`; cells past the edge are dropped.
    fn put_str(&mut self, y: i32, x: i32, text: &str, color: ColorId) {
        let mut cx = x;
        for ch in text.chars() {
            self.put_char(y, cx, ch, color);
            cx = cx.saturating_add(1);
        }
    }

    /// Present whatever was painted inside `region`.
    fn flush(&mut self, region: Region);

    fn move_cursor(&mut self, y: i32, x: i32);
}

impl<S: DrawSurface + ?Sized> DrawSurface for &mut S {
    fn clear_region(&mut self, region: Region) {
        (**self).clear_region(region);
    }

    fn draw_box(&mut self, region: Region) {
        (**self).draw_box(region);
    }

    fn put_char(&mut self, y: i32, x: i32, ch: char, color: ColorId) {
        (**self).put_char(y, x, ch, color);
    }

    fn put_str(&mut self, y: i32, x: i32, text: &str, color: ColorId) {
        (**self).put_str(y, x, text, color);
    }

    fn flush(&mut self, region: Region) {
        (**self).flush(region);
    }

    fn move_cursor(&mut self, y: i32, x: i32) {
        (**self).move_cursor(y, x);
    }
}

/// A pane of a larger surface.
///
/// Coordinates passed to a `Clip` are relative to the pane's top-left corner,
/// and anything landing outside the pane is dropped.
pub struct Clip<'a, S: DrawSurface + ?Sized> {
    surface: &'a mut S,
    pane: Region,
}

impl<'a, S: DrawSurface + ?Sized> Clip<'a, S> {
    pub fn new(surface: &'a mut S, pane: Region) -> Self {
        Self { surface, pane }
    }

    /// The pane in its own coordinates: origin `(0, 0)`, same size.
    pub fn local_area(&self) -> Region {
        Region::new(0, 0, self.pane.width, self.pane.height)
    }

    fn to_absolute(&self, region: Region) -> Option<Region> {
        let x0 = region.x.max(0);
        let y0 = region.y.max(0);
        let x1 = region.right().min(self.pane.width);
        let y1 = region.bottom().min(self.pane.height);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Region::new(
            self.pane.x + x0,
            self.pane.y + y0,
            x1 - x0,
            y1 - y0,
        ))
    }
}

impl<S: DrawSurface + ?Sized> DrawSurface for Clip<'_, S> {
    fn clear_region(&mut self, region: Region) {
        if let Some(abs) = self.to_absolute(region) {
            self.surface.clear_region(abs);
        }
    }

    fn draw_box(&mut self, region: Region) {
        if let Some(abs) = self.to_absolute(region) {
            self.surface.draw_box(abs);
        }
    }

    fn put_char(&mut self, y: i32, x: i32, ch: char, color: ColorId) {
        if self.local_area().contains(x, y) {
            self.surface
                .put_char(self.pane.y + y, self.pane.x + x, ch, color);
        }
    }

    fn flush(&mut self, region: Region) {
        if let Some(abs) = self.to_absolute(region) {
            self.surface.flush(abs);
        }
    }

    fn move_cursor(&mut self, y: i32, x: i32) {
        if self.local_area().contains(x, y) {
            self.surface.move_cursor(self.pane.y + y, self.pane.x + x);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fb::FrameBuffer;

    #[test]
    fn clip_translates_and_drops_outside_writes() {
        let mut fb = FrameBuffer::new(10, 6);
        {
            let mut pane = Clip::new(&mut fb, Region::new(2, 3, 4, 2));
            pane.put_char(0, 0, 'a', ColorId::Default);
            pane.put_char(1, 3, 'b', ColorId::Default);
            pane.put_char(2, 0, 'c', ColorId::Default);
            pane.put_char(0, 4, 'd', ColorId::Default);
            pane.put_char(-1, 0, 'e', ColorId::Default);
            pane.put_str(0, 2, "xyz", ColorId::Default);
        }
        assert_eq!(fb.get(2, 3).unwrap().ch, 'a');
        assert_eq!(fb.get(5, 4).unwrap().ch, 'b');
        assert_eq!(fb.row_string(5), "          ");
        assert_eq!(fb.row_string(3), "  a xy    ");
        assert_eq!(fb.row_string(2), "          ");
    }

    #[test]
    fn clip_intersects_regions_with_pane() {
        let mut fb = FrameBuffer::new(8, 4);
        fb.fill_rect(0, 0, 8, 4, '#', Default::default());
        {
            let mut pane = Clip::new(&mut fb, Region::new(1, 1, 3, 2));
            pane.clear_region(Region::new(-5, -5, 100, 100));
        }
        assert_eq!(fb.row_string(0), "########");
        assert_eq!(fb.row_string(1), "#   ####");
        assert_eq!(fb.row_string(2), "#   ####");
        assert_eq!(fb.row_string(3), "########");
    }
}
