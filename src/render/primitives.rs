//! Primitive rendering functions.
//!
//! Implements rasterization algorithms for the shapes a plot is made of.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::Point;

// ============================================================================
// Line Drawing
// ============================================================================

/// Draw a line using Bresenham's algorithm (non-antialiased).
///
/// # Arguments
///
/// * `fb` - Target framebuffer
/// * `x0`, `y0` - Start coordinates
/// * `x1`, `y1` - End coordinates
/// * `color` - Line color
pub fn draw_line(fb: &mut Framebuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        if x >= 0 && y >= 0 {
            fb.set_pixel(x as u32, y as u32, color);
        }

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Draw an anti-aliased line using Wu's algorithm.
///
/// Two pixels are drawn at each step along the major axis, with intensities
/// set by the fractional distance from the ideal line position.
///
/// # References
///
/// Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
pub fn draw_line_aa(fb: &mut Framebuffer, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgba) {
    let steep = (y1 - y0).abs() > (x1 - x0).abs();

    let (x0, y0, x1, y1) = if steep { (y0, x0, y1, x1) } else { (x0, y0, x1, y1) };
    let (x0, y0, x1, y1) = if x0 > x1 { (x1, y1, x0, y0) } else { (x0, y0, x1, y1) };

    let dx = x1 - x0;
    let dy = y1 - y0;
    let gradient = if dx.abs() < f32::EPSILON { 1.0 } else { dy / dx };

    // First endpoint
    let xend = x0.round();
    let yend = y0 + gradient * (xend - x0);
    let xgap = rfpart(x0 + 0.5);
    let xpxl1 = xend as i32;
    let ypxl1 = yend.floor() as i32;
    plot_pair(fb, steep, xpxl1, ypxl1, yend, xgap, color);

    let mut intery = yend + gradient;

    // Second endpoint
    let xend = x1.round();
    let yend = y1 + gradient * (xend - x1);
    let xgap = fpart(x1 + 0.5);
    let xpxl2 = xend as i32;
    let ypxl2 = yend.floor() as i32;
    plot_pair(fb, steep, xpxl2, ypxl2, yend, xgap, color);

    for x in (xpxl1 + 1)..xpxl2 {
        let ipart = intery.floor() as i32;
        plot_pair(fb, steep, x, ipart, intery, 1.0, color);
        intery += gradient;
    }
}

/// Draw a line of the given pixel thickness.
///
/// Thickness at or below 1.5 falls back to a single anti-aliased stroke.
/// Thicker lines are stroked as parallel offsets along the line normal.
pub fn draw_thick_line(fb: &mut Framebuffer, from: Point, to: Point, thickness: f32, color: Rgba) {
    if thickness <= 1.5 {
        draw_line_aa(fb, from.x, from.y, to.x, to.y, color);
        return;
    }

    let length = from.distance(to);
    if length < f32::EPSILON {
        draw_point(fb, from.x, from.y, thickness, color);
        return;
    }

    let nx = -(to.y - from.y) / length;
    let ny = (to.x - from.x) / length;
    let half = (thickness - 1.0) / 2.0;
    let steps = (thickness.ceil() as i32).max(2);

    for i in 0..steps {
        let offset = -half + (2.0 * half) * (i as f32) / ((steps - 1) as f32);
        draw_line_aa(
            fb,
            from.x + nx * offset,
            from.y + ny * offset,
            to.x + nx * offset,
            to.y + ny * offset,
            color,
        );
    }
}

/// Plot the two pixels straddling the ideal line at one step.
#[inline]
fn plot_pair(fb: &mut Framebuffer, steep: bool, x: i32, y: i32, y_exact: f32, gap: f32, color: Rgba) {
    if steep {
        plot(fb, y, x, color, rfpart(y_exact) * gap);
        plot(fb, y + 1, x, color, fpart(y_exact) * gap);
    } else {
        plot(fb, x, y, color, rfpart(y_exact) * gap);
        plot(fb, x, y + 1, color, fpart(y_exact) * gap);
    }
}

/// Plot a pixel with intensity (for anti-aliased drawing).
#[inline]
fn plot(fb: &mut Framebuffer, x: i32, y: i32, color: Rgba, intensity: f32) {
    if x >= 0 && y >= 0 && x < fb.width() as i32 && y < fb.height() as i32 {
        let alpha = (f32::from(color.a) * intensity) as u8;
        fb.blend_pixel(x as u32, y as u32, color.with_alpha(alpha));
    }
}

/// Fractional part of a float.
#[inline]
fn fpart(x: f32) -> f32 {
    x - x.floor()
}

/// Reverse fractional part.
#[inline]
fn rfpart(x: f32) -> f32 {
    1.0 - fpart(x)
}

// ============================================================================
// Rectangle Drawing
// ============================================================================

/// Draw a rectangle outline.
pub fn draw_rect_outline(
    fb: &mut Framebuffer,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    color: Rgba,
    thickness: u32,
) {
    let thickness = thickness.max(1);
    let x = x.max(0) as u32;
    let y = y.max(0) as u32;

    // Top edge
    fb.fill_rect(x, y, width, thickness, color);
    // Bottom edge
    if height > thickness {
        fb.fill_rect(x, y + height - thickness, width, thickness, color);
    }
    // Left edge
    if height > 2 * thickness {
        fb.fill_rect(x, y + thickness, thickness, height - 2 * thickness, color);
    }
    // Right edge
    if width > thickness && height > 2 * thickness {
        fb.fill_rect(
            x + width - thickness,
            y + thickness,
            thickness,
            height - 2 * thickness,
            color,
        );
    }
}

// ============================================================================
// Circle/Point Drawing
// ============================================================================

/// Draw a filled circle using the midpoint algorithm.
pub fn draw_circle(fb: &mut Framebuffer, cx: i32, cy: i32, radius: i32, color: Rgba) {
    if radius <= 0 {
        if radius == 0 && cx >= 0 && cy >= 0 {
            fb.set_pixel(cx as u32, cy as u32, color);
        }
        return;
    }

    let mut x = radius;
    let mut y = 0;
    let mut err = 1 - radius;

    while x >= y {
        draw_span(fb, cx - x, cx + x, cy + y, color);
        draw_span(fb, cx - x, cx + x, cy - y, color);
        draw_span(fb, cx - y, cx + y, cy + x, color);
        draw_span(fb, cx - y, cx + y, cy - x, color);

        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/// Draw a filled disc, alpha-blended, for translucent markers.
///
/// Unlike [`draw_circle`], each pixel is touched exactly once so overlapping
/// spans do not compound the alpha.
pub fn blend_circle(fb: &mut Framebuffer, cx: i32, cy: i32, radius: i32, color: Rgba) {
    let radius = radius.max(0);
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                let (px, py) = (cx + dx, cy + dy);
                if px >= 0 && py >= 0 {
                    fb.blend_pixel(px as u32, py as u32, color);
                }
            }
        }
    }
}

/// Draw a point with variable size (rendered as filled circle).
pub fn draw_point(fb: &mut Framebuffer, x: f32, y: f32, size: f32, color: Rgba) {
    let radius = (size / 2.0) as i32;
    draw_circle(fb, x as i32, y as i32, radius, color);
}

/// Horizontal run used by the filled circle.
#[inline]
fn draw_span(fb: &mut Framebuffer, x1: i32, x2: i32, y: i32, color: Rgba) {
    if y < 0 || y >= fb.height() as i32 {
        return;
    }

    let x_start = x1.max(0) as u32;
    let x_end = (x2 + 1).max(0).min(fb.width() as i32) as u32;

    if x_start < x_end {
        fb.fill_rect(x_start, y as u32, x_end - x_start, 1, color);
    }
}

// ============================================================================
// Tests
// ============================================================================
