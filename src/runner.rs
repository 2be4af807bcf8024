//! The plot loop.
//!
//! Each iteration prints `Making plot!`, draws a fresh [`SampleSet`],
//! renders it, and writes a tightly-cropped PNG over the previous one.
//! [`PlotLoop::run`] repeats that with a fixed sleep in between.

use crate::config::Config;
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::output::PngEncoder;
use crate::plots::BACKGROUND;
use crate::sample::SampleSet;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Line printed to stdout at the start of every iteration.
pub const PROGRESS_LINE: &str = "Making plot!";

/// Outcome of one iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationReport {
    /// 1-based iteration number.
    pub iteration: u64,
    /// File that was written.
    pub path: PathBuf,
    /// Size of the written file.
    pub bytes_written: u64,
    /// Points per axis in the sample set.
    pub points: usize,
    /// Time spent rendering and encoding.
    pub render_time: Duration,
}

/// Generates, renders and saves a random plot on a fixed schedule.
#[derive(Debug)]
pub struct PlotLoop {
    config: Config,
    rng: StdRng,
    iteration: u64,
}

impl PlotLoop {
    /// Create a loop for `config`.
    ///
    /// The RNG is seeded from `schedule.seed` when set, otherwise from OS
    /// entropy.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let rng = match config.schedule.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            rng,
            iteration: 0,
        }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Iterations completed so far.
    #[must_use]
    pub const fn iterations(&self) -> u64 {
        self.iteration
    }

    /// Render one sample set with the configured style, color and size.
    ///
    /// # Errors
    ///
    /// Returns an error if the color or canvas configuration is invalid.
    pub fn render(&self, samples: &SampleSet) -> Result<Framebuffer> {
        let plot = &self.config.plot;
        plot.style
            .build(
                samples.xs(),
                samples.ys(),
                self.config.color()?,
                (plot.width, plot.height),
                plot.margin,
            )?
            .to_framebuffer()
    }

    /// Announce, generate, render and save one plot. Does not sleep.
    ///
    /// The progress line is printed before any work, so a failing
    /// iteration still announces itself.
    ///
    /// # Errors
    ///
    /// Returns the first failure: rendering, directory creation, or the
    /// file write itself.
    pub fn run_iteration(&mut self) -> Result<IterationReport> {
        println!("{PROGRESS_LINE}");

        let samples = SampleSet::generate(&mut self.rng, self.config.plot.samples)?;
        if let Ok(((x0, x1), (y0, y1))) = samples.extent() {
            debug!(x0, x1, y0, y1, "sample extent");
        }

        let path = &self.config.output.path;
        let started = Instant::now();

        let bytes_written = {
            let fb = self.render(&samples)?;
            if self.config.output.create_dirs {
                ensure_parent_dir(path)?;
            }
            PngEncoder::write_tight(&fb, path, BACKGROUND, self.config.plot.tight_pad)?
        };

        let render_time = started.elapsed();
        self.iteration += 1;

        info!(
            iteration = self.iteration,
            path = %path.display(),
            bytes = bytes_written,
            render_ms = render_time.as_millis(),
            "plot written"
        );

        Ok(IterationReport {
            iteration: self.iteration,
            path: path.clone(),
            bytes_written,
            points: samples.len(),
            render_time,
        })
    }

    /// Run iterations separated by the configured interval.
    ///
    /// Loops forever unless `schedule.max_iterations` is set, in which case
    /// it returns after that many iterations without a trailing sleep.
    ///
    /// # Errors
    ///
    /// Returns the first iteration error.
    pub fn run(&mut self) -> Result<()> {
        let interval = self.config.interval();
        let limit = self.config.schedule.max_iterations;
        info!(
            path = %self.config.output.path.display(),
            interval_ms = self.config.schedule.interval_ms,
            style = %self.config.plot.style,
            "starting plot loop"
        );

        loop {
            if limit.is_some_and(|n| self.iteration >= n) {
                return Ok(());
            }
            self.run_iteration()?;
            if limit.is_some_and(|n| self.iteration >= n) {
                return Ok(());
            }
            std::thread::sleep(interval);
        }
    }
}

/// Create the parent directory of `path` and any missing ancestors.
///
/// A path without a parent component is left alone.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            if !parent.is_dir() {
                debug!(dir = %parent.display(), "creating output directory");
            }
            std::fs::create_dir_all(parent)?;
            Ok(())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plots::PlotStyle;

    fn config_in(dir: &Path, rel: &str) -> Config {
        let mut config = Config::new();
        config.output.path = dir.join(rel);
        config.schedule.interval_ms = 10;
        config.schedule.seed = Some(7);
        config
    }

    fn png_size(path: &Path) -> (u32, u32) {
        let file = std::fs::File::open(path).unwrap();
        let reader = png::Decoder::new(std::io::BufReader::new(file)).read_info().unwrap();
        let info = reader.info();
        (info.width, info.height)
    }

    #[test]
    fn test_iteration_writes_nonempty_png() {
        let dir = tempfile::tempdir().unwrap();
        let mut plot_loop = PlotLoop::new(config_in(dir.path(), "plot2.png"));

        let report = plot_loop.run_iteration().unwrap();

        assert_eq!(report.iteration, 1);
        assert_eq!(report.points, 100);
        assert!(report.bytes_written > 0);
        let meta = std::fs::metadata(&report.path).unwrap();
        assert_eq!(meta.len(), report.bytes_written);
    }

    #[test]
    fn test_iteration_crops_tightly() {
        let dir = tempfile::tempdir().unwrap();
        let mut plot_loop = PlotLoop::new(config_in(dir.path(), "plot2.png"));

        let report = plot_loop.run_iteration().unwrap();
        let (w, h) = png_size(&report.path);

        // Margin 40 minus pad 10 is trimmed from each side.
        assert!(w < 640 && h < 480, "got {w}x{h}");
        assert!(w >= 640 - 2 * 40 && h >= 480 - 2 * 40, "got {w}x{h}");
    }

    #[test]
    fn test_repeated_iterations_overwrite_same_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut plot_loop = PlotLoop::new(config_in(dir.path(), "plot2.png"));

        for expected in 1..=3 {
            let report = plot_loop.run_iteration().unwrap();
            assert_eq!(report.iteration, expected);
        }

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(plot_loop.iterations(), 3);
    }

    #[test]
    fn test_creates_missing_directory_when_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path(), "public/images/plot.png");
        config.output.create_dirs = true;

        let report = PlotLoop::new(config).run_iteration().unwrap();

        assert!(dir.path().join("public").join("images").is_dir());
        assert!(report.path.is_file());
    }

    #[test]
    fn test_missing_directory_fails_when_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "absent/plot.png");

        let mut plot_loop = PlotLoop::new(config);
        assert!(plot_loop.run_iteration().is_err());
        assert_eq!(plot_loop.iterations(), 0);
        assert!(!dir.path().join("absent").exists());
    }

    #[test]
    fn test_run_stops_after_max_iterations() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path(), "plot2.png");
        config.schedule.interval_ms = 30;
        config.schedule.max_iterations = Some(3);

        let mut plot_loop = PlotLoop::new(config);
        let started = Instant::now();
        plot_loop.run().unwrap();

        assert_eq!(plot_loop.iterations(), 3);
        // Two sleeps separate three writes.
        assert!(started.elapsed() >= Duration::from_millis(60));
    }

    #[test]
    fn test_run_propagates_first_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path(), "absent/plot.png");
        config.schedule.max_iterations = Some(5);

        let mut plot_loop = PlotLoop::new(config);
        assert!(plot_loop.run().is_err());
        assert_eq!(plot_loop.iterations(), 0);
    }

    #[test]
    fn test_seeded_loops_render_identically() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.png");
        let b = dir.path().join("b.png");

        let mut config = config_in(dir.path(), "a.png");
        PlotLoop::new(config.clone()).run_iteration().unwrap();
        config.output.path = b.clone();
        PlotLoop::new(config).run_iteration().unwrap();

        assert_eq!(std::fs::read(a).unwrap(), std::fs::read(b).unwrap());
    }

    #[test]
    fn test_render_scatter_style() {
        let mut config = Config::new();
        config.plot.style = PlotStyle::Scatter;
        config.schedule.seed = Some(1);
        let plot_loop = PlotLoop::new(config);

        let mut rng = StdRng::seed_from_u64(3);
        let samples = SampleSet::generate(&mut rng, 20).unwrap();
        let fb = plot_loop.render(&samples).unwrap();

        assert_eq!((fb.width(), fb.height()), (640, 480));
        assert!(fb.content_bounds(BACKGROUND).is_some());
    }

    #[test]
    fn test_render_rejects_bad_color() {
        let mut config = Config::new();
        config.plot.color = "nope".to_string();
        let plot_loop = PlotLoop::new(config);

        let mut rng = StdRng::seed_from_u64(3);
        let samples = SampleSet::generate(&mut rng, 5).unwrap();
        assert!(plot_loop.render(&samples).is_err());
    }

    #[test]
    fn test_ensure_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b").join("plot.png");

        ensure_parent_dir(&nested).unwrap();
        assert!(dir.path().join("a").join("b").is_dir());

        // Existing directory and bare file name are both fine.
        ensure_parent_dir(&nested).unwrap();
        ensure_parent_dir(Path::new("plot2.png")).unwrap();
    }
}
