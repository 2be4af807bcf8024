//! plotloop: write a random plot to a fixed path every few seconds.
//!
//! Run: `plotloop` (writes `plot2.png` in the working directory)
//! Run: `plotloop --preset public` (writes `./public/images/plot.png`)

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use plotloop::config::{Config, Preset};
use plotloop::plots::PlotStyle;
use plotloop::runner::PlotLoop;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Output location presets.
#[derive(ValueEnum, Clone, Copy, Debug)]
enum PresetArg {
    /// plot2.png in the working directory
    Working,
    /// ./public/images/plot.png, directory auto-created
    Public,
    /// --output must be an absolute path in an existing directory
    Absolute,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Working => Self::Working,
            PresetArg::Public => Self::Public,
            PresetArg::Absolute => Self::Absolute,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StyleArg {
    Line,
    Scatter,
}

impl From<StyleArg> for PlotStyle {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Line => Self::Line,
            StyleArg::Scatter => Self::Scatter,
        }
    }
}

/// plotloop: random plot generator
#[derive(Parser, Debug)]
#[command(name = "plotloop")]
#[command(author = "PAIML Team")]
#[command(version)]
#[command(about = "Writes a random plot to a fixed PNG path on a timer", long_about = None)]
struct Cli {
    /// Output location preset
    #[arg(short, long, value_enum)]
    preset: Option<PresetArg>,

    /// Output file path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Create the output directory if it is missing
    #[arg(long, conflicts_with = "no_create_dirs")]
    create_dirs: bool,

    /// Fail if the output directory is missing
    #[arg(long)]
    no_create_dirs: bool,

    /// Sleep between plots in milliseconds
    #[arg(short, long)]
    interval_ms: Option<u64>,

    /// Plot style
    #[arg(short, long, value_enum)]
    style: Option<StyleArg>,

    /// Plot color (C0..C9 or #rrggbb)
    #[arg(long)]
    color: Option<String>,

    /// Samples per axis
    #[arg(long)]
    samples: Option<usize>,

    /// Stop after this many plots
    #[arg(short = 'n', long)]
    iterations: Option<u64>,

    /// RNG seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Cli {
    /// Layer file, environment and flags into one configuration.
    fn resolve(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => Config::default(),
        };

        config.apply_env().context("reading PLOTLOOP_* environment")?;

        match self.preset {
            Some(preset) => config
                .apply_preset(preset.into(), self.output.clone())
                .context("applying output preset")?,
            None => {
                if let Some(path) = &self.output {
                    config.output.path.clone_from(path);
                }
            }
        }
        if self.create_dirs {
            config.output.create_dirs = true;
        }
        if self.no_create_dirs {
            config.output.create_dirs = false;
        }
        if let Some(ms) = self.interval_ms {
            config.schedule.interval_ms = ms;
        }
        if let Some(style) = self.style {
            config.plot.style = style.into();
        }
        if let Some(color) = &self.color {
            config.plot.color.clone_from(color);
        }
        if let Some(samples) = self.samples {
            config.plot.samples = samples;
        }
        if self.iterations.is_some() {
            config.schedule.max_iterations = self.iterations;
        }
        if self.seed.is_some() {
            config.schedule.seed = self.seed;
        }

        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.resolve()?;

    let mut plot_loop = PlotLoop::new(config);
    if let Err(e) = plot_loop.run() {
        tracing::error!(iteration = plot_loop.iterations() + 1, error = %e, "plot loop failed");
        return Err(e).with_context(|| {
            format!("writing {}", plot_loop.config().output.path.display())
        });
    }

    Ok(())
}
