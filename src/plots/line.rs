//! Line chart implementation.
//!
//! Connects consecutive samples in order, optionally anti-aliased, on top of
//! a framed [`Axes`].

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::geometry::Point;
use crate::plots::axes::Axes;
use crate::plots::Plot;
use crate::render::{draw_circle, draw_line, draw_thick_line};
use crate::sample::extent;

// ============================================================================
// Line Series
// ============================================================================

/// A data series for line charts.
#[derive(Debug, Clone)]
pub struct LineSeries {
    /// Series name/label.
    pub name: String,
    /// X-axis data.
    pub x_data: Vec<f32>,
    /// Y-axis data.
    pub y_data: Vec<f32>,
    /// Line color.
    pub color: Rgba,
    /// Line thickness.
    pub thickness: f32,
    /// Use anti-aliasing.
    pub antialiased: bool,
}

impl LineSeries {
    /// Create a new line series.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            x_data: Vec::new(),
            y_data: Vec::new(),
            color: Rgba::cycle(0),
            thickness: 1.5,
            antialiased: true,
        }
    }

    /// Set the x and y data.
    #[must_use]
    pub fn data(mut self, x: &[f32], y: &[f32]) -> Self {
        self.x_data = x.to_vec();
        self.y_data = y.to_vec();
        self
    }

    /// Set the line color.
    #[must_use]
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Set the line thickness.
    #[must_use]
    pub fn thickness(mut self, thickness: f32) -> Self {
        self.thickness = thickness.max(0.5);
        self
    }

    /// Enable or disable anti-aliasing.
    #[must_use]
    pub fn antialiased(mut self, enabled: bool) -> Self {
        self.antialiased = enabled;
        self
    }

    /// Get the number of points.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.x_data.len().min(self.y_data.len())
    }
}

// ============================================================================
// Line Chart
// ============================================================================

/// Builder for creating line charts.
#[derive(Debug, Clone)]
pub struct LineChart {
    /// Data series.
    series: Vec<LineSeries>,
    /// Output width in pixels.
    width: u32,
    /// Output height in pixels.
    height: u32,
    /// Margin around the plot.
    margin: u32,
    /// Show data points as markers.
    show_markers: bool,
    /// Marker size.
    marker_size: f32,
    /// Draw grid lines.
    grid: bool,
}

impl Default for LineChart {
    fn default() -> Self {
        Self::new()
    }
}

impl LineChart {
    /// Create a new line chart builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            series: Vec::new(),
            width: 640,
            height: 480,
            margin: 40,
            show_markers: false,
            marker_size: 4.0,
            grid: false,
        }
    }

    /// Add a data series.
    #[must_use]
    pub fn add_series(mut self, series: LineSeries) -> Self {
        self.series.push(series);
        self
    }

    /// Add data as a single series (convenience method).
    #[must_use]
    pub fn data(self, x: &[f32], y: &[f32]) -> Self {
        let series = LineSeries::new("default").data(x, y);
        self.add_series(series)
    }

    /// Set the line color for the most recently added series.
    #[must_use]
    pub fn color(mut self, color: Rgba) -> Self {
        if let Some(series) = self.series.last_mut() {
            series.color = color;
        }
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

    /// Enable or disable data point markers.
    #[must_use]
    pub fn markers(mut self, show: bool) -> Self {
        self.show_markers = show;
        self
    }

    /// Set the marker size.
    #[must_use]
    pub fn marker_size(mut self, size: f32) -> Self {
        self.marker_size = size.max(1.0);
        self
    }

    /// Enable or disable grid lines.
    #[must_use]
    pub fn grid(mut self, enabled: bool) -> Self {
        self.grid = enabled;
        self
    }

    /// Build and validate the line chart.
    ///
    /// # Errors
    ///
    /// Returns an error if no data series or data is empty.
    pub fn build(self) -> Result<Self> {
        if self.series.is_empty() {
            return Err(Error::EmptyData);
        }

        for series in &self.series {
            if series.x_data.is_empty() || series.y_data.is_empty() {
                return Err(Error::EmptyData);
            }

            if series.x_data.len() != series.y_data.len() {
                return Err(Error::DataLengthMismatch {
                    x_len: series.x_data.len(),
                    y_len: series.y_data.len(),
                });
            }
        }

        Ok(self)
    }

    /// Get the data extent across all series.
    fn data_extent(&self) -> Result<((f32, f32), (f32, f32))> {
        let mut x_range: Option<(f32, f32)> = None;
        let mut y_range: Option<(f32, f32)> = None;

        let merge = |acc: Option<(f32, f32)>, next: (f32, f32)| match acc {
            None => next,
            Some((lo, hi)) => (lo.min(next.0), hi.max(next.1)),
        };

        for series in &self.series {
            x_range = Some(merge(x_range, extent(&series.x_data).ok_or(Error::EmptyData)?));
            y_range = Some(merge(y_range, extent(&series.y_data).ok_or(Error::EmptyData)?));
        }

        Ok((x_range.ok_or(Error::EmptyData)?, y_range.ok_or(Error::EmptyData)?))
    }

    /// Render the line chart to a framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the chart has no data or the layout is invalid.
    pub fn render(&self, fb: &mut Framebuffer) -> Result<()> {
        let (x_extent, y_extent) = self.data_extent()?;
        let axes = Axes::fit(self.width, self.height, self.margin, x_extent, y_extent)?.grid(self.grid);

        axes.draw(fb);

        for series in &self.series {
            self.render_series(fb, series, &axes);
        }

        Ok(())
    }

    /// Render a single series.
    fn render_series(&self, fb: &mut Framebuffer, series: &LineSeries, axes: &Axes) {
        let points: Vec<Point> = series
            .x_data
            .iter()
            .zip(&series.y_data)
            .map(|(&x, &y)| axes.project(x, y))
            .collect();

        for pair in points.windows(2) {
            let (p1, p2) = (pair[0], pair[1]);

            if series.antialiased {
                draw_thick_line(fb, p1, p2, series.thickness, series.color);
            } else {
                draw_line(fb, p1.x as i32, p1.y as i32, p2.x as i32, p2.y as i32, series.color);
            }
        }

        if self.show_markers {
            let radius = (self.marker_size / 2.0) as i32;
            for point in &points {
                draw_circle(fb, point.x as i32, point.y as i32, radius, series.color);
            }
        }
    }

    /// Get the total number of points across all series.
    #[must_use]
    pub fn total_points(&self) -> usize {
        self.series.iter().map(LineSeries::point_count).sum()
    }

    /// Get the number of series.
    #[must_use]
    pub fn series_count(&self) -> usize {
        self.series.len()
    }
}

impl Plot for LineChart {
    fn canvas_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn render(&self, fb: &mut Framebuffer) -> Result<()> {
        LineChart::render(self, fb)
    }

    fn point_count(&self) -> usize {
        self.total_points()
    }
}

impl batuta_common::display::WithDimensions for LineChart {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use batuta_common::display::WithDimensions;

    #[test]
    fn test_line_series_builder() {
        let series = LineSeries::new("test")
            .data(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0])
            .color(Rgba::RED)
            .thickness(2.0)
            .antialiased(true);

        assert_eq!(series.name, "test");
        assert_eq!(series.point_count(), 3);
        assert_eq!(series.color, Rgba::RED);
    }

    #[test]
    fn test_line_series_thickness_floor() {
        let series = LineSeries::new("thin").thickness(0.0);
        assert!((series.thickness - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_line_chart_builder() {
        let chart = LineChart::new()
            .data(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0])
            .dimensions(100, 100)
            .build()
            .unwrap();

        assert_eq!(chart.series_count(), 1);
        assert_eq!(chart.total_points(), 3);
    }

    #[test]
    fn test_line_chart_empty_data() {
        assert!(LineChart::new().build().is_err());
    }

    #[test]
    fn test_line_chart_data_mismatch() {
        let result = LineChart::new().data(&[1.0, 2.0, 3.0], &[4.0, 5.0]).build();
        assert!(matches!(result, Err(Error::DataLengthMismatch { x_len: 3, y_len: 2 })));
    }

    #[test]
    fn test_line_chart_draws_series_color() {
        let chart = LineChart::new()
            .data(&[0.0, 1.0], &[0.0, 0.0])
            .color(Rgba::RED)
            .dimensions(100, 100)
            .margin(10)
            .build()
            .unwrap();

        let fb = chart.to_framebuffer().unwrap();
        let mid = chart_row_has(&fb, 50, |p| p.r > 200 && p.g < 100);
        assert!(mid, "expected a red stroke crossing x = 50");
    }

    #[test]
    fn test_line_chart_not_antialiased() {
        let series = LineSeries::new("hard")
            .data(&[0.0, 1.0, 2.0], &[0.0, 1.0, 0.0])
            .color(Rgba::BLUE)
            .antialiased(false);
        let chart = LineChart::new().add_series(series).dimensions(120, 120).build().unwrap();

        let fb = chart.to_framebuffer().unwrap();
        assert!(chart_row_has(&fb, 60, |p| p == Rgba::BLUE));
    }

    #[test]
    fn test_line_chart_multi_series() {
        let series1 = LineSeries::new("series1")
            .data(&[0.0, 1.0, 2.0], &[0.0, 1.0, 2.0])
            .color(Rgba::RED);
        let series2 = LineSeries::new("series2")
            .data(&[0.0, 1.0, 2.0], &[2.0, 1.0, 0.0])
            .color(Rgba::BLUE);

        let chart = LineChart::new()
            .add_series(series1)
            .add_series(series2)
            .dimensions(100, 100)
            .build()
            .unwrap();

        assert_eq!(chart.series_count(), 2);
        assert_eq!(chart.total_points(), 6);
        assert!(chart.to_framebuffer().is_ok());
    }

    #[test]
    fn test_line_chart_with_markers() {
        let chart = LineChart::new()
            .data(&[0.0, 1.0, 2.0], &[0.0, 1.0, 2.0])
            .markers(true)
            .marker_size(6.0)
            .grid(true)
            .dimensions(100, 100)
            .build()
            .unwrap();

        assert!(chart.to_framebuffer().is_ok());
    }

    #[test]
    fn test_line_chart_single_point() {
        let chart = LineChart::new().data(&[1.0], &[1.0]).markers(true).build().unwrap();
        assert!(chart.to_framebuffer().is_ok());
    }

    #[test]
    fn test_with_dimensions() {
        let mut chart = LineChart::new().data(&[0.0, 1.0], &[0.0, 1.0]);
        chart.set_dimensions(320, 240);

        let fb = chart.to_framebuffer().unwrap();
        assert_eq!((fb.width(), fb.height()), (320, 240));
    }

    fn chart_row_has(fb: &Framebuffer, x: u32, pred: impl Fn(Rgba) -> bool) -> bool {
        (0..fb.height()).any(|y| fb.get_pixel(x, y).is_some_and(&pred))
    }
}
