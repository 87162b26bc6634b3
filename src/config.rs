use crate::{celebrate::CelebrationStyle, render::Color};
use serde::Deserialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

const DEFAULT_SEGMENT_COLORS: [Color; 12] = [
    Color::new(0xef, 0x44, 0x44),
    Color::new(0xf9, 0x73, 0x16),
    Color::new(0xea, 0xb3, 0x08),
    Color::new(0x84, 0xcc, 0x16),
    Color::new(0x22, 0xc5, 0x5e),
    Color::new(0x14, 0xb8, 0xa6),
    Color::new(0x06, 0xb6, 0xd4),
    Color::new(0x3b, 0x82, 0xf6),
    Color::new(0x8b, 0x5c, 0xf6),
    Color::new(0xd9, 0x46, 0xef),
    Color::new(0xec, 0x48, 0x99),
    Color::new(0xf4, 0x3f, 0x5e),
];

const MAX_IDLE_SEGMENTS: usize = 360;
const MAX_CONFETTI_PIECES: usize = 1000;

/// Presentation settings. Nothing in here changes who wins.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub spin: SpinConfig,
    pub wheel: WheelConfig,
    pub celebration: CelebrationConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SpinConfig {
    /// How long the wheel turns before the winner is revealed.
    pub duration_ms: u64,

    /// Frames drawn per second while something is moving.
    pub frame_rate: u16,
}

impl SpinConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(1000 / self.frame_rate.max(1) as u64)
    }
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self { duration_ms: 6000, frame_rate: 30 }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct WheelConfig {
    /// Segment colors, reused in order when there are more segments than colors.
    pub colors: Vec<Color>,

    /// The number of blank segments shown before any names are spun.
    pub idle_segments: usize,

    /// Labels longer than this get shortened with an ellipsis.
    pub label_max_chars: usize,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self { colors: DEFAULT_SEGMENT_COLORS.to_vec(), idle_segments: 12, label_max_chars: 10 }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CelebrationConfig {
    /// The FIGlet font the winner's name is written in.
    pub font: String,

    pub style: CelebrationStyle,

    pub confetti_pieces: usize,
}

impl Default for CelebrationConfig {
    fn default() -> Self {
        Self { font: "standard".into(), style: CelebrationStyle::Rainbow, confetti_pieces: 100 }
    }
}

impl Config {
    /// Loads the configuration at `path`, or at the default location when there's none.
    ///
    /// A missing file at the default location is fine and yields the defaults; a missing file
    /// that was asked for explicitly is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match Self::default_path() {
                Some(path) => (path, false),
                None => return Ok(Self::default()),
            },
        };
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound && !required => {
                log::debug!("no config file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(path, e)),
        };
        log::info!("loading config from {}", path.display());
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = if contents.trim().is_empty() { Self::default() } else { serde_yaml::from_str(contents)? };
        config.validate()?;
        Ok(config)
    }

    pub fn default_path() -> Option<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "raffle-spinner")?;
        Some(dirs.config_dir().join("config.yaml"))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.spin.duration_ms == 0 {
            return Err(ConfigError::Invalid("spin.duration_ms must be greater than zero".into()));
        }
        if !(1..=120).contains(&self.spin.frame_rate) {
            return Err(ConfigError::Invalid("spin.frame_rate must be between 1 and 120".into()));
        }
        if self.wheel.colors.is_empty() {
            return Err(ConfigError::Invalid("wheel.colors needs at least one color".into()));
        }
        if !(2..=MAX_IDLE_SEGMENTS).contains(&self.wheel.idle_segments) {
            return Err(ConfigError::Invalid(format!(
                "wheel.idle_segments must be between 2 and {MAX_IDLE_SEGMENTS}"
            )));
        }
        if self.wheel.label_max_chars < 4 {
            return Err(ConfigError::Invalid("wheel.label_max_chars must be at least 4".into()));
        }
        if self.celebration.confetti_pieces > MAX_CONFETTI_PIECES {
            return Err(ConfigError::Invalid(format!(
                "celebration.confetti_pieces must be at most {MAX_CONFETTI_PIECES}"
            )));
        }
        Ok(())
    }
}

/// Errors that can occur when loading the configuration
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {0}: {1}")]
    Io(PathBuf, io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    #[test]
    fn empty_file_is_default() {
        assert_eq!(Config::from_yaml("").expect("parse failed"), Config::default());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config = Config::from_yaml(
            r##"
spin:
  duration_ms: 1500
wheel:
  colors: ["#000000", "ffffff"]
celebration:
  style: neon
"##,
        )
        .expect("parse failed");
        assert_eq!(config.spin.duration(), Duration::from_millis(1500));
        assert_eq!(config.spin.frame_rate, 30);
        assert_eq!(config.wheel.colors, vec![Color::new(0, 0, 0), Color::WHITE]);
        assert_eq!(config.wheel.idle_segments, 12);
        assert_eq!(config.celebration.style, CelebrationStyle::Neon);
        assert_eq!(config.celebration.font, "standard");
    }

    #[rstest]
    #[case::unknown_field("spin:\n  revolutions: 9\n")]
    #[case::bad_color("wheel:\n  colors: [\"#12\"]\n")]
    #[case::bad_style("celebration:\n  style: sparkles\n")]
    fn parse_errors(#[case] contents: &str) {
        assert!(matches!(Config::from_yaml(contents), Err(ConfigError::Parse(_))));
    }

    #[rstest]
    #[case::zero_duration("spin:\n  duration_ms: 0\n")]
    #[case::frame_rate("spin:\n  frame_rate: 500\n")]
    #[case::no_colors("wheel:\n  colors: []\n")]
    #[case::one_segment("wheel:\n  idle_segments: 1\n")]
    #[case::tiny_labels("wheel:\n  label_max_chars: 2\n")]
    #[case::too_many_segments("wheel:\n  idle_segments: 100000\n")]
    #[case::too_much_confetti("celebration:\n  confetti_pieces: 1000000000\n")]
    fn validation_errors(#[case] contents: &str) {
        assert!(matches!(Config::from_yaml(contents), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn upper_bounds_are_allowed() {
        let config = Config::from_yaml("wheel:\n  idle_segments: 360\ncelebration:\n  confetti_pieces: 1000\n")
            .expect("parse failed");
        assert_eq!(config.wheel.idle_segments, MAX_IDLE_SEGMENTS);
        assert_eq!(config.celebration.confetti_pieces, MAX_CONFETTI_PIECES);
    }

    #[test]
    fn load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().expect("failed to create file");
        writeln!(file, "spin:\n  frame_rate: 60").expect("write failed");
        let config = Config::load(Some(file.path())).expect("load failed");
        assert_eq!(config.spin.frame_rate, 60);
        assert_eq!(config.spin.frame_interval(), Duration::from_millis(16));
    }

    #[test]
    fn missing_explicit_file_fails() {
        let dir = tempfile::tempdir().expect("failed to create dir");
        let path = dir.path().join("nope.yaml");
        assert!(matches!(Config::load(Some(&path)), Err(ConfigError::Io(..))));
    }
}
