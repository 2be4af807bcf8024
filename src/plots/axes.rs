//! Plot frame, scales, and tick marks shared by the plot types.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};
use crate::render::{draw_line, draw_rect_outline};
use crate::scale::{nice_ticks, LinearScale, Scale, DEFAULT_MARGIN};

/// Approximate number of ticks per axis.
const TICK_TARGET: usize = 6;

/// Tick length in pixels, drawn outward from the frame.
const TICK_LENGTH: i32 = 4;

/// Data-to-pixel mapping for one plot area, plus its decorations.
#[derive(Debug, Clone, Copy)]
pub struct Axes {
    frame: Rect,
    x_scale: LinearScale,
    y_scale: LinearScale,
    frame_color: Rgba,
    grid: bool,
}

impl Axes {
    /// Fit axes to a canvas and the data extents.
    ///
    /// The plot area is the canvas minus `margin` on every side. Both scales
    /// are padded by [`DEFAULT_MARGIN`] so no point sits on the frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the margin leaves no plot area or an extent is
    /// not finite.
    pub fn fit(
        width: u32,
        height: u32,
        margin: u32,
        x_extent: (f32, f32),
        y_extent: (f32, f32),
    ) -> Result<Self> {
        let inset = margin.saturating_mul(2);
        if width <= inset || height <= inset {
            return Err(Error::InvalidDimensions { width, height });
        }

        let frame = Rect::new(
            margin as f32,
            margin as f32,
            (width - inset) as f32,
            (height - inset) as f32,
        );

        // Inset by one pixel so marks stay inside the frame line.
        let x_scale =
            LinearScale::padded(x_extent, (frame.x + 1.0, frame.right() - 1.0), DEFAULT_MARGIN)?;
        let y_scale =
            LinearScale::padded(y_extent, (frame.bottom() - 1.0, frame.y + 1.0), DEFAULT_MARGIN)?;

        Ok(Self {
            frame,
            x_scale,
            y_scale,
            frame_color: Rgba::BLACK,
            grid: false,
        })
    }

    /// Enable or disable light grid lines at the tick positions.
    #[must_use]
    pub fn grid(mut self, enabled: bool) -> Self {
        self.grid = enabled;
        self
    }

    /// The plot area in pixels.
    #[must_use]
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Horizontal scale.
    #[must_use]
    pub fn x_scale(&self) -> &LinearScale {
        &self.x_scale
    }

    /// Vertical scale (inverted: larger values are higher on screen).
    #[must_use]
    pub fn y_scale(&self) -> &LinearScale {
        &self.y_scale
    }

    /// Map a data point to pixel coordinates.
    #[must_use]
    pub fn project(&self, x: f32, y: f32) -> Point {
        Point::new(self.x_scale.scale(x), self.y_scale.scale(y))
    }

    /// Tick positions in data space, `(x_ticks, y_ticks)`.
    #[must_use]
    pub fn ticks(&self) -> (Vec<f32>, Vec<f32>) {
        let (x0, x1) = self.x_scale.domain();
        let (y0, y1) = self.y_scale.domain();
        (nice_ticks(x0, x1, TICK_TARGET), nice_ticks(y0, y1, TICK_TARGET))
    }

    /// Draw grid, frame and ticks.
    pub fn draw(&self, fb: &mut Framebuffer) {
        let left = self.frame.x as i32;
        let top = self.frame.y as i32;
        let right = self.frame.right() as i32 - 1;
        let bottom = self.frame.bottom() as i32 - 1;
        let (x_ticks, y_ticks) = self.ticks();

        if self.grid {
            let grid_color = self.frame_color.lerp(Rgba::WHITE, 0.85);
            for &tx in &x_ticks {
                let px = self.x_scale.scale(tx) as i32;
                draw_line(fb, px, top, px, bottom, grid_color);
            }
            for &ty in &y_ticks {
                let py = self.y_scale.scale(ty) as i32;
                draw_line(fb, left, py, right, py, grid_color);
            }
        }

        draw_rect_outline(
            fb,
            left,
            top,
            self.frame.width as u32,
            self.frame.height as u32,
            self.frame_color,
            1,
        );

        for &tx in &x_ticks {
            let px = self.x_scale.scale(tx) as i32;
            draw_line(fb, px, bottom + 1, px, bottom + TICK_LENGTH, self.frame_color);
        }
        for &ty in &y_ticks {
            let py = self.y_scale.scale(ty) as i32;
            draw_line(fb, left - TICK_LENGTH, py, left - 1, py, self.frame_color);
        }
    }
}
