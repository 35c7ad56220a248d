use crate::range::Direction;
use crate::style::{Color, ColorParseError, IconRef, Style, TextStyleRef, parse_color};
use std::path::Path;
use thiserror::Error;

pub const ENV_PREFIX: &str = "CIRCLESEEK";

pub const DEFAULT_MAX_VALUE: i32 = 100;
pub const DEFAULT_MIN_VALUE: i32 = 0;
pub const DEFAULT_VALUE: i32 = 0;

pub mod keys {
    pub const DENSITY: &str = "density";
    pub const BACKGROUND_STROKE_WIDTH: &str = "background_stroke_width";
    pub const PROGRESS_STROKE_WIDTH: &str = "progress_stroke_width";
    pub const BACKGROUND_COLOR: &str = "background_color";
    pub const PROGRESS_COLOR: &str = "progress_color";
    pub const DOT_RADIUS: &str = "dot_radius";
    pub const DOT_COLOR: &str = "dot_color";
    pub const DOT_ICON: &str = "dot_icon";
    pub const TICK_LINE_WIDTH: &str = "tick_line_width";
    pub const MAX_VALUE: &str = "max_value";
    pub const MIN_VALUE: &str = "min_value";
    pub const VALUE: &str = "value";
    pub const SHOW_COUNTER: &str = "show_counter";
    pub const IS_CLOCKWISE: &str = "is_clockwise";
    pub const DIRECTION: &str = "direction";
    pub const LABEL_TEXT_STYLE: &str = "label_text_style";
    pub const LABEL_COLOR: &str = "label_color";
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid color for '{key}': {source}")]
    InvalidColor {
        key: &'static str,
        source: ColorParseError,
    },
    #[error("Invalid direction '{0}', expected clockwise or counterclockwise")]
    InvalidDirection(String),
    #[error("Value for '{key}' does not fit an i32: {value}")]
    OutOfRange { key: &'static str, value: i64 },
}

/// Attribute table the widget is styled from. Queried once at construction.
///
/// Every getter returns `default` when the key is absent and an error when
/// the key is present but cannot be read as the requested type.
pub trait StyleSource {
    fn dimension(&self, key: &'static str, default: f64) -> Result<f64, ConfigError>;
    fn color(&self, key: &'static str, default: Color) -> Result<Color, ConfigError>;
    fn int(&self, key: &'static str, default: i32) -> Result<i32, ConfigError>;
    fn boolean(&self, key: &'static str, default: bool) -> Result<bool, ConfigError>;
    fn string(&self, key: &'static str) -> Result<Option<String>, ConfigError>;
}

fn optional<T>(result: Result<T, config::ConfigError>) -> Result<Option<T>, ConfigError> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(config::ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl StyleSource for config::Config {
    fn dimension(&self, key: &'static str, default: f64) -> Result<f64, ConfigError> {
        Ok(optional(self.get_float(key))?.unwrap_or(default))
    }

    fn color(&self, key: &'static str, default: Color) -> Result<Color, ConfigError> {
        optional(self.get_string(key))?
            .map(|s| parse_color(&s).map_err(|source| ConfigError::InvalidColor { key, source }))
            .unwrap_or(Ok(default))
    }

    fn int(&self, key: &'static str, default: i32) -> Result<i32, ConfigError> {
        optional(self.get_int(key))?
            .map(|v| i32::try_from(v).map_err(|_| ConfigError::OutOfRange { key, value: v }))
            .unwrap_or(Ok(default))
    }

    fn boolean(&self, key: &'static str, default: bool) -> Result<bool, ConfigError> {
        Ok(optional(self.get_bool(key))?.unwrap_or(default))
    }

    fn string(&self, key: &'static str) -> Result<Option<String>, ConfigError> {
        Ok(optional(self.get_string(key))?.filter(|s| !s.is_empty()))
    }
}

/// Construction-time options for a seek bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub style: Style,
    pub min_value: i32,
    pub max_value: i32,
    pub value: i32,
    pub show_counter: bool,
    pub direction: Direction,
}

impl Default for Config {
    fn default() -> Self {
        Self::with_density(1.0)
    }
}

impl Config {
    pub fn with_density(density: f64) -> Self {
        Self {
            style: Style::with_density(density),
            min_value: DEFAULT_MIN_VALUE,
            max_value: DEFAULT_MAX_VALUE,
            value: DEFAULT_VALUE,
            show_counter: true,
            direction: Direction::Clockwise,
        }
    }

    pub fn from_source(source: &impl StyleSource) -> Result<Self, ConfigError> {
        let density = source.dimension(keys::DENSITY, 1.0)?;
        let defaults = Self::with_density(density);
        let d = &defaults.style;

        let progress_color = source.color(keys::PROGRESS_COLOR, d.progress_color)?;
        let style = Style {
            background_stroke_width: source
                .dimension(keys::BACKGROUND_STROKE_WIDTH, d.background_stroke_width)?,
            progress_stroke_width: source
                .dimension(keys::PROGRESS_STROKE_WIDTH, d.progress_stroke_width)?,
            background_color: source.color(keys::BACKGROUND_COLOR, d.background_color)?,
            progress_color,
            dot_radius: source.dimension(keys::DOT_RADIUS, d.dot_radius)?,
            dot_color: source.color(keys::DOT_COLOR, progress_color)?,
            dot_icon: source.string(keys::DOT_ICON)?.map(IconRef::new),
            tick_line_width: source.dimension(keys::TICK_LINE_WIDTH, d.tick_line_width)?,
            label_color: source.color(keys::LABEL_COLOR, d.label_color)?,
            label_text_style: source
                .string(keys::LABEL_TEXT_STYLE)?
                .map(TextStyleRef::new),
        };

        // `direction` wins over the older boolean flag when both are given
        let direction = match source.string(keys::DIRECTION)? {
            Some(s) => s
                .parse::<Direction>()
                .map_err(|_| ConfigError::InvalidDirection(s))?,
            None => Direction::from_clockwise(source.boolean(keys::IS_CLOCKWISE, true)?),
        };

        Ok(Self {
            style,
            min_value: source.int(keys::MIN_VALUE, defaults.min_value)?,
            max_value: source.int(keys::MAX_VALUE, defaults.max_value)?,
            value: source.int(keys::VALUE, defaults.value)?,
            show_counter: source.boolean(keys::SHOW_COUNTER, defaults.show_counter)?,
            direction,
        })
    }
}

/// Reads an optional TOML file, then `CIRCLESEEK_*` environment variables.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX))
        .build()?;

    Config::from_source(&settings)
}
