//! # plotloop
//!
//! Writes a freshly generated random plot to a fixed PNG path on a timer.
//!
//! Every iteration draws 100 standard-normal samples per axis, renders them
//! as a line or scatter plot, saves the result with tight cropping over the
//! previous file, prints `Making plot!`, and sleeps. Rendering is pure Rust
//! (software rasterizer plus the `png` crate), with
//! [trueno](https://crates.io/crates/trueno) vector reductions for data
//! extents.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use plotloop::prelude::*;
//!
//! # fn main() -> plotloop::Result<()> {
//! let mut config = Config::new();
//! config.apply_preset(Preset::Public, None)?;
//! config.schedule.max_iterations = Some(1);
//!
//! PlotLoop::new(config).run()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## References
//!
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
//! - Heckbert, P. (1990). "Nice Numbers for Graph Labels." Graphics Gems.

#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code (Cloudflare incident 2025-11-18)
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and the plot color cycle.
pub mod color;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Geometric primitives (points, rectangles, pixel bounds).
pub mod geometry;

/// Scale functions for data-to-pixel mappings.
pub mod scale;

// ============================================================================
// Visualization Modules
// ============================================================================

/// Line and scatter plots.
pub mod plots;

/// Rasterization primitives.
pub mod render;

/// PNG output.
pub mod output;

// ============================================================================
// Loop Modules
// ============================================================================

/// Random sample generation.
pub mod sample;

/// YAML, environment and preset configuration.
pub mod config;

/// The iterate-render-save-sleep loop.
pub mod runner;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for plotloop operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use plotloop::prelude::*;
/// ```
pub mod prelude {
    pub use batuta_common::display::WithDimensions;
    pub use crate::color::Rgba;
    pub use crate::config::{Config, Preset};
    pub use crate::error::{Error, Result};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::{Bounds, Point, Rect};
    pub use crate::output::PngEncoder;
    pub use crate::plots::{LineChart, LineSeries, Plot, PlotStyle, ScatterPlot};
    pub use crate::runner::{IterationReport, PlotLoop};
    pub use crate::sample::SampleSet;
    pub use crate::scale::{LinearScale, Scale};
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;
