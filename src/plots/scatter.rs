//! Scatter plot implementation.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::plots::axes::Axes;
use crate::plots::Plot;
use crate::render::{blend_circle, draw_circle};
use crate::sample::extent;

/// Builder for creating scatter plots.
#[derive(Debug, Clone)]
pub struct ScatterPlot {
    x_data: Vec<f32>,
    y_data: Vec<f32>,
    color: Rgba,
    point_size: f32,
    alpha: f32,
    width: u32,
    height: u32,
    margin: u32,
    grid: bool,
}

impl Default for ScatterPlot {
    fn default() -> Self {
        Self::new()
    }
}

impl ScatterPlot {
    /// Create a new scatter plot builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            x_data: Vec::new(),
            y_data: Vec::new(),
            color: Rgba::cycle(0),
            point_size: 6.0,
            alpha: 1.0,
            width: 640,
            height: 480,
            margin: 40,
            grid: false,
        }
    }

    /// Set the x-axis data.
    #[must_use]
    pub fn x(mut self, data: &[f32]) -> Self {
        self.x_data = data.to_vec();
        self
    }

    /// Set the y-axis data.
    #[must_use]
    pub fn y(mut self, data: &[f32]) -> Self {
        self.y_data = data.to_vec();
        self
    }

    /// Set the point color.
    #[must_use]
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Set the point size in pixels.
    #[must_use]
    pub fn size(mut self, size: f32) -> Self {
        self.point_size = size;
        self
    }

    /// Set the alpha transparency (0.0 - 1.0).
    #[must_use]
    pub fn alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    /// Set the output dimensions.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the margin around the plot.
    #[must_use]
    pub fn margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    /// Enable or disable grid lines.
    #[must_use]
    pub fn grid(mut self, enabled: bool) -> Self {
        self.grid = enabled;
        self
    }

    /// Get the number of points.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.x_data.len().min(self.y_data.len())
    }

    /// Build and validate the scatter plot.
    ///
    /// # Errors
    ///
    /// Returns an error if data is empty or x/y lengths don't match.
    pub fn build(self) -> Result<Self> {
        if self.x_data.is_empty() || self.y_data.is_empty() {
            return Err(Error::EmptyData);
        }

        if self.x_data.len() != self.y_data.len() {
            return Err(Error::DataLengthMismatch {
                x_len: self.x_data.len(),
                y_len: self.y_data.len(),
            });
        }

        Ok(self)
    }

    /// Render the scatter plot to a framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the plot has no data or the layout is invalid.
    pub fn render(&self, fb: &mut Framebuffer) -> Result<()> {
        let x_extent = extent(&self.x_data).ok_or(Error::EmptyData)?;
        let y_extent = extent(&self.y_data).ok_or(Error::EmptyData)?;
        let axes = Axes::fit(self.width, self.height, self.margin, x_extent, y_extent)?.grid(self.grid);

        axes.draw(fb);

        let color = self.color.with_alpha((self.alpha * 255.0) as u8);
        let radius = (self.point_size / 2.0) as i32;

        for (&x, &y) in self.x_data.iter().zip(&self.y_data) {
            let p = axes.project(x, y);
            if self.alpha < 1.0 {
                blend_circle(fb, p.x as i32, p.y as i32, radius, color);
            } else {
                draw_circle(fb, p.x as i32, p.y as i32, radius, color);
            }
        }

        Ok(())
    }
}

impl Plot for ScatterPlot {
    fn canvas_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn render(&self, fb: &mut Framebuffer) -> Result<()> {
        ScatterPlot::render(self, fb)
    }

    fn point_count(&self) -> usize {
        ScatterPlot::point_count(self)
    }
}

impl batuta_common::display::WithDimensions for ScatterPlot {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}
