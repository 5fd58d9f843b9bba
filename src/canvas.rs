//! Fixed-size, toroidally wrapped stroke accumulator.
//!
//! The turtle walks an unbounded plane. The canvas covers one `W x H` tile of it and
//! addresses every point through `(x mod W, y mod H)`. A segment is rasterized only when
//! both endpoints lie in the same tile: drawing one that crosses a tile edge between its
//! wrapped endpoints would streak across the whole buffer.

use crate::error::{PlotterError, Result};
use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// A straight draw request in unwrapped plane coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: Vec2,
    pub to: Vec2,
}

/// Receiver of the interpreter's draw requests.
pub trait SegmentSink {
    fn draw_segment(&mut self, from: Vec2, to: Vec2);
}

/// Captures draw requests verbatim.
impl SegmentSink for Vec<Segment> {
    fn draw_segment(&mut self, from: Vec2, to: Vec2) {
        self.push(Segment { from, to });
    }
}

/// Row-major buffer of stroke hit counts. Zero is background.
#[derive(Clone, Debug)]
pub struct ToroidalCanvas {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
    drawn: usize,
    clipped: usize,
}

impl ToroidalCanvas {
    /// Creates a blank canvas. Both dimensions must be non-zero.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let len = width
            .checked_mul(height)
            .filter(|&len| len > 0)
            .ok_or(PlotterError::InvalidCanvas { width, height })?;
        Ok(Self {
            width,
            height,
            pixels: vec![0; len],
            drawn: 0,
            clipped: 0,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Index of the `W x H` period containing `p`.
    ///
    /// Derived from [`wrap`](Self::wrap) so the two always agree, including where
    /// `rem_euclid` rounds a tiny negative coordinate up to `W`.
    pub fn tile_of(&self, p: Vec2) -> IVec2 {
        let t = ((p - self.wrap(p)) / self.size()).round();
        IVec2::new(t.x as i32, t.y as i32)
    }

    /// `p` folded into the canvas, `[0, W) x [0, H)`.
    pub fn wrap(&self, p: Vec2) -> Vec2 {
        let size = self.size();
        Vec2::new(p.x.rem_euclid(size.x), p.y.rem_euclid(size.y))
    }

    /// Draws the segment if both endpoints share a tile. Returns whether anything was drawn.
    pub fn draw_segment(&mut self, p0: Vec2, p1: Vec2) -> bool {
        if self.tile_of(p0) != self.tile_of(p1) {
            self.clipped += 1;
            trace!(?p0, ?p1, "segment leaves tile, not drawn");
            return false;
        }
        let (x0, y0) = self.pixel_of(self.wrap(p0));
        let (x1, y1) = self.pixel_of(self.wrap(p1));
        self.rasterize(x0, y0, x1, y1);
        self.drawn += 1;
        true
    }

    // rem_euclid may round up to exactly W for tiny negative inputs.
    fn pixel_of(&self, wrapped: Vec2) -> (i64, i64) {
        let x = (wrapped.x.max(0.0) as usize).min(self.width - 1);
        let y = (wrapped.y.max(0.0) as usize).min(self.height - 1);
        (x as i64, y as i64)
    }

    /// Bresenham between two in-bounds pixels, endpoints inclusive.
    fn rasterize(&mut self, mut x0: i64, mut y0: i64, x1: i64, y1: i64) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.hit(x0 as usize, y0 as usize);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn hit(&mut self, x: usize, y: usize) {
        let idx = y * self.width + x;
        self.pixels[idx] = self.pixels[idx].saturating_add(1);
    }

    /// Resets every pixel to background and zeroes the counters.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
        self.drawn = 0;
        self.clipped = 0;
    }

    /// Stroke hits at `(x, y)`, `None` when out of bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Number of pixels touched by at least one stroke.
    pub fn lit_pixels(&self) -> usize {
        self.pixels.iter().filter(|&&p| p > 0).count()
    }

    pub fn segments_drawn(&self) -> usize {
        self.drawn
    }

    pub fn segments_clipped(&self) -> usize {
        self.clipped
    }
}

impl SegmentSink for ToroidalCanvas {
    fn draw_segment(&mut self, from: Vec2, to: Vec2) {
        ToroidalCanvas::draw_segment(self, from, to);
    }
}
