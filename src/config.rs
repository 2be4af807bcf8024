//! Configuration for the plot loop.
//!
//! Supports YAML configuration with precedence: CLI > ENV > file > defaults.
//! The defaults reproduce the plain working-directory variant: a line plot
//! of 100 samples in `C1`, written to `plot2.png` every four seconds.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::plots::PlotStyle;
use crate::sample::DEFAULT_SAMPLE_COUNT;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Environment variable overriding the output path.
pub const ENV_OUTPUT: &str = "PLOTLOOP_OUTPUT";
/// Environment variable overriding the sleep interval in milliseconds.
pub const ENV_INTERVAL_MS: &str = "PLOTLOOP_INTERVAL_MS";
/// Environment variable overriding the plot style.
pub const ENV_STYLE: &str = "PLOTLOOP_STYLE";

/// Largest accepted canvas width or height in pixels.
pub const MAX_CANVAS_DIMENSION: u32 = 16_384;

/// Where the output artifact goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output file path, overwritten every iteration.
    #[serde(default = "default_output_path")]
    pub path: PathBuf,

    /// Create the parent directory (and its parents) before each write.
    #[serde(default)]
    pub create_dirs: bool,
}

fn default_output_path() -> PathBuf {
    PathBuf::from("plot2.png")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            create_dirs: false,
        }
    }
}

/// Loop timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Sleep between iterations in milliseconds.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Stop after this many iterations. `None` runs until killed.
    #[serde(default)]
    pub max_iterations: Option<u64>,

    /// Fixed RNG seed. `None` seeds from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_interval_ms() -> u64 {
    4000
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            max_iterations: None,
            seed: None,
        }
    }
}

/// What gets drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Line or scatter.
    #[serde(default)]
    pub style: PlotStyle,

    /// `C0`..`C9` or `#rrggbb`.
    #[serde(default = "default_color")]
    pub color: String,

    /// Points per axis.
    #[serde(default = "default_samples")]
    pub samples: usize,

    /// Canvas width in pixels (before cropping).
    #[serde(default = "default_width")]
    pub width: u32,

    /// Canvas height in pixels (before cropping).
    #[serde(default = "default_height")]
    pub height: u32,

    /// Gap between canvas edge and plot frame.
    #[serde(default = "default_margin")]
    pub margin: u32,

    /// Padding kept around the content when cropping.
    #[serde(default = "default_tight_pad")]
    pub tight_pad: u32,
}

fn default_color() -> String {
    "C1".to_string()
}
fn default_samples() -> usize {
    DEFAULT_SAMPLE_COUNT
}
fn default_width() -> u32 {
    640
}
fn default_height() -> u32 {
    480
}
fn default_margin() -> u32 {
    40
}
fn default_tight_pad() -> u32 {
    10
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            style: PlotStyle::default(),
            color: default_color(),
            samples: default_samples(),
            width: default_width(),
            height: default_height(),
            margin: default_margin(),
            tight_pad: default_tight_pad(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Configuration version.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Loop timing.
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Plot appearance.
    #[serde(default)]
    pub plot: PlotConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            output: OutputConfig::default(),
            schedule: ScheduleConfig::default(),
            plot: PlotConfig::default(),
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigNotFound`] if the file does not exist, or a
    /// parse error with line number.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::ConfigNotFound(path.to_path_buf()),
            _ => Error::Io(e),
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            Error::ConfigParse {
                line,
                message: e.to_string(),
            }
        })
    }

    /// Apply one of the output presets.
    ///
    /// `path` overrides the preset's location; the `absolute` preset
    /// requires it.
    ///
    /// # Errors
    ///
    /// Returns an error if the `absolute` preset has no path or a relative one.
    pub fn apply_preset(&mut self, preset: Preset, path: Option<PathBuf>) -> Result<()> {
        self.output = preset.output(path)?;
        Ok(())
    }

    /// Overlay values from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an unparseable value.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an unparseable value.
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(path) = lookup(ENV_OUTPUT) {
            self.output.path = PathBuf::from(path);
        }
        if let Some(ms) = lookup(ENV_INTERVAL_MS) {
            self.schedule.interval_ms = ms
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("{ENV_INTERVAL_MS}='{ms}' is not a number")))?;
        }
        if let Some(style) = lookup(ENV_STYLE) {
            self.plot.style = style.parse()?;
        }
        Ok(())
    }

    /// Check values that would otherwise fail on the first iteration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] or [`Error::InvalidColor`] describing the
    /// first bad value.
    pub fn validate(&self) -> Result<()> {
        if self.plot.samples == 0 {
            return Err(Error::Config("plot.samples must be at least 1".to_string()));
        }
        if self.plot.width == 0 || self.plot.height == 0 {
            return Err(Error::InvalidDimensions {
                width: self.plot.width,
                height: self.plot.height,
            });
        }
        if self.plot.width > MAX_CANVAS_DIMENSION || self.plot.height > MAX_CANVAS_DIMENSION {
            return Err(Error::Config(format!(
                "plot canvas {}x{} exceeds the {MAX_CANVAS_DIMENSION} pixel limit",
                self.plot.width, self.plot.height
            )));
        }
        let inset = self.plot.margin.saturating_mul(2);
        if self.plot.width <= inset || self.plot.height <= inset {
            return Err(Error::Config(format!(
                "plot.margin {} leaves no room in a {}x{} canvas",
                self.plot.margin, self.plot.width, self.plot.height
            )));
        }
        if self.output.path.as_os_str().is_empty() {
            return Err(Error::Config("output.path is empty".to_string()));
        }
        self.color()?;
        Ok(())
    }

    /// The parsed plot color.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] if `plot.color` does not parse.
    pub fn color(&self) -> Result<Rgba> {
        self.plot.color.parse()
    }

    /// Returns the sleep interval as a Duration.
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.schedule.interval_ms)
    }
}

/// The three output locations the loop is run with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// `plot2.png` in the working directory.
    #[default]
    Working,
    /// `./public/images/plot.png`, creating the directory if needed.
    Public,
    /// A caller-supplied absolute path; the directory must already exist.
    Absolute,
}

impl Preset {
    /// Output settings for this preset.
    ///
    /// # Errors
    ///
    /// Returns an error if [`Preset::Absolute`] is given no path or a
    /// relative path.
    pub fn output(self, path: Option<PathBuf>) -> Result<OutputConfig> {
        match self {
            Self::Working => Ok(OutputConfig {
                path: path.unwrap_or_else(default_output_path),
                create_dirs: false,
            }),
            Self::Public => Ok(OutputConfig {
                path: path.unwrap_or_else(|| ["public", "images", "plot.png"].iter().collect()),
                create_dirs: true,
            }),
            Self::Absolute => {
                let path = path
                    .ok_or_else(|| Error::Config("the absolute preset needs an output path".to_string()))?;
                if !path.is_absolute() {
                    return Err(Error::Config(format!(
                        "the absolute preset needs an absolute path, got {}",
                        path.display()
                    )));
                }
                Ok(OutputConfig {
                    path,
                    create_dirs: false,
                })
            }
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Working => "working",
            Self::Public => "public",
            Self::Absolute => "absolute",
        })
    }
}

impl FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "working" => Ok(Self::Working),
            "public" => Ok(Self::Public),
            "absolute" => Ok(Self::Absolute),
            other => Err(Error::Config(format!("unknown preset '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_config_default() {
        let config = Config::new();

        assert_eq!(config.version, 1);
        assert_eq!(config.output.path, PathBuf::from("plot2.png"));
        assert!(!config.output.create_dirs);
        assert_eq!(config.interval(), Duration::from_secs(4));
        assert_eq!(config.schedule.max_iterations, None);
        assert_eq!(config.plot.samples, 100);
        assert_eq!(config.plot.style, PlotStyle::Line);
        assert_eq!(config.color().unwrap(), Rgba::rgb(255, 127, 14));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_parse_minimal() {
        let config = Config::parse("version: 1").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_parse_full() {
        let yaml = r##"
version: 1
output:
  path: public/images/plot.png
  create_dirs: true
schedule:
  interval_ms: 250
  max_iterations: 3
  seed: 9
plot:
  style: scatter
  color: "#336699"
  samples: 50
"##;

        let config = Config::parse(yaml).unwrap();

        assert_eq!(config.output.path, PathBuf::from("public/images/plot.png"));
        assert!(config.output.create_dirs);
        assert_eq!(config.interval(), Duration::from_millis(250));
        assert_eq!(config.schedule.max_iterations, Some(3));
        assert_eq!(config.schedule.seed, Some(9));
        assert_eq!(config.plot.style, PlotStyle::Scatter);
        assert_eq!(config.color().unwrap(), Rgba::rgb(0x33, 0x66, 0x99));
        assert_eq!(config.plot.samples, 50);
        assert_eq!(config.plot.width, 640);
    }

    #[test]
    fn test_config_parse_error_includes_line() {
        let yaml = r#"
version: 1
schedule:
  interval_ms: not_a_number
"#;

        let err = Config::parse(yaml).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { line: 4, .. }), "got {err}");
        assert!(err.to_string().contains('4'));
    }

    #[test]
    fn test_config_load_missing_file() {
        let err = Config::load("/nonexistent/plotloop.yaml").unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound(_)));
    }

    #[test]
    fn test_config_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plotloop.yaml");
        std::fs::write(&path, "plot:\n  style: scatter\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.plot.style, PlotStyle::Scatter);
    }

    #[test]
    fn test_env_overlay() {
        let vars: HashMap<&str, &str> = [
            (ENV_OUTPUT, "/tmp/elsewhere.png"),
            (ENV_INTERVAL_MS, " 1500 "),
            (ENV_STYLE, "scatter"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::new();
        config
            .apply_env_from(|k| vars.get(k).map(ToString::to_string))
            .unwrap();

        assert_eq!(config.output.path, PathBuf::from("/tmp/elsewhere.png"));
        assert_eq!(config.schedule.interval_ms, 1500);
        assert_eq!(config.plot.style, PlotStyle::Scatter);
    }

    #[test]
    fn test_env_overlay_rejects_bad_interval() {
        let mut config = Config::new();
        let result = config.apply_env_from(|k| (k == ENV_INTERVAL_MS).then(|| "soon".to_string()));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_env_overlay_empty_lookup_is_noop() {
        let mut config = Config::new();
        config.apply_env_from(|_| None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_preset_working() {
        let out = Preset::Working.output(None).unwrap();
        assert_eq!(out.path, PathBuf::from("plot2.png"));
        assert!(!out.create_dirs);
    }

    #[test]
    fn test_preset_public_creates_dirs() {
        let out = Preset::Public.output(None).unwrap();
        assert_eq!(out.path, Path::new("public").join("images").join("plot.png"));
        assert!(out.create_dirs);
    }

    #[test]
    fn test_preset_absolute_requires_absolute_path() {
        assert!(Preset::Absolute.output(None).is_err());
        assert!(Preset::Absolute.output(Some(PathBuf::from("rel/plot.png"))).is_err());

        let abs = std::env::temp_dir().join("plot.png");
        let out = Preset::Absolute.output(Some(abs.clone())).unwrap();
        assert_eq!(out.path, abs);
        assert!(!out.create_dirs);
    }

    #[test]
    fn test_apply_preset() {
        let mut config = Config::new();
        config.apply_preset(Preset::Public, None).unwrap();
        assert!(config.output.create_dirs);
    }

    #[test]
    fn test_preset_parse_display() {
        for preset in [Preset::Working, Preset::Public, Preset::Absolute] {
            assert_eq!(preset.to_string().parse::<Preset>().unwrap(), preset);
        }
        assert!("home".parse::<Preset>().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::new();
        config.plot.samples = 0;
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.plot.color = "C42".to_string();
        assert!(matches!(config.validate(), Err(Error::InvalidColor(_))));

        let mut config = Config::new();
        config.plot.width = 0;
        assert!(matches!(config.validate(), Err(Error::InvalidDimensions { .. })));

        let mut config = Config::new();
        config.plot.margin = 300;
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.output.path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_huge_margin_is_error() {
        let config = Config::parse("plot:\n  margin: 3000000000\n").unwrap();
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let mut config = Config::new();
        config.plot.margin = u32::MAX;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_caps_canvas_size() {
        let config = Config::parse("plot:\n  width: 100000\n  height: 100000\n").unwrap();
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let mut config = Config::new();
        config.plot.width = MAX_CANVAS_DIMENSION;
        config.plot.height = MAX_CANVAS_DIMENSION;
        assert!(config.validate().is_ok());
    }
}
