//! Plot types.
//!
//! Provides ready-to-use visualization types with builder APIs.

mod axes;
mod line;
mod scatter;

pub use axes::Axes;
pub use line::{LineChart, LineSeries};
pub use scatter::ScatterPlot;

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Background every plot is drawn on.
pub const BACKGROUND: Rgba = Rgba::WHITE;

/// Common interface for plots that render onto a fresh canvas.
pub trait Plot {
    /// Canvas size in pixels, `(width, height)`.
    fn canvas_size(&self) -> (u32, u32);

    /// Render onto an existing framebuffer.
    fn render(&self, fb: &mut Framebuffer) -> Result<()>;

    /// Number of plotted points.
    fn point_count(&self) -> usize;

    /// Render to a new framebuffer cleared to [`BACKGROUND`].
    ///
    /// # Errors
    ///
    /// Returns an error if the canvas size is invalid or rendering fails.
    fn to_framebuffer(&self) -> Result<Framebuffer> {
        let (width, height) = self.canvas_size();
        let mut fb = Framebuffer::new(width, height)?;
        fb.clear(BACKGROUND);
        self.render(&mut fb)?;
        Ok(fb)
    }
}

/// How a sample set is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotStyle {
    /// Consecutive points joined by line segments.
    #[default]
    Line,
    /// Unconnected circular markers.
    Scatter,
}

impl PlotStyle {
    /// Build a plot of this style for the given points.
    ///
    /// `size` is the canvas `(width, height)`; `margin` is the gap between
    /// the canvas edge and the plot frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the data is empty or the lengths differ.
    pub fn build(
        self,
        xs: &[f32],
        ys: &[f32],
        color: Rgba,
        size: (u32, u32),
        margin: u32,
    ) -> Result<Box<dyn Plot>> {
        let (width, height) = size;
        Ok(match self {
            Self::Line => Box::new(
                LineChart::new()
                    .data(xs, ys)
                    .color(color)
                    .dimensions(width, height)
                    .margin(margin)
                    .build()?,
            ),
            Self::Scatter => Box::new(
                ScatterPlot::new()
                    .x(xs)
                    .y(ys)
                    .color(color)
                    .dimensions(width, height)
                    .margin(margin)
                    .build()?,
            ),
        })
    }
}

impl fmt::Display for PlotStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Line => "line",
            Self::Scatter => "scatter",
        })
    }
}

impl FromStr for PlotStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "line" => Ok(Self::Line),
            "scatter" => Ok(Self::Scatter),
            other => Err(Error::Config(format!("unknown plot style '{other}'"))),
        }
    }
}
