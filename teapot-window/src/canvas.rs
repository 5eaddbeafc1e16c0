/// Pixel canvas for the window frontend
use teapot_core::{ndc_to_cell, Ndc};

/// `0x00RRGGBB` pixels stored bottom-up: row 0 is the bottom scanline.
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Paint every point that maps onto the canvas with `color`
    pub fn paint(&mut self, points: &[Ndc], color: u32) {
        for point in points {
            if let Some((x, y)) = ndc_to_cell(point, self.width, self.height) {
                self.pixels[y * self.width + x] = color;
            }
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.width + x]
    }

    /// Copy into `out` with the top scanline first, as windowing surfaces expect
    pub fn copy_top_down(&self, out: &mut Vec<u32>) {
        out.clear();
        if self.width == 0 {
            return;
        }
        out.reserve(self.pixels.len());
        for row in self.pixels.chunks_exact(self.width).rev() {
            out.extend_from_slice(row);
        }
    }
}
