use derive_more::{AsRef, Deref, Display, From, Into};
use palette::{Srgb, Srgba};
use std::str::FromStr;
use thiserror::Error;

pub type Color = Srgba<f64>;

/// Reference to an icon drawn in place of the filled dot. Resolution is left
/// to the host surface (the GTK host treats it as a file path).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct IconRef(String);

/// Opaque text style handed to the host when measuring and drawing the label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct TextStyleRef(String);

crate::impl_string_newtype!(IconRef, TextStyleRef);

#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub background_stroke_width: f64,
    pub progress_stroke_width: f64,
    pub background_color: Color,
    pub progress_color: Color,
    pub dot_radius: f64,
    pub dot_color: Color,
    pub dot_icon: Option<IconRef>,
    pub tick_line_width: f64,
    pub label_color: Color,
    pub label_text_style: Option<TextStyleRef>,
}

pub const DEFAULT_STROKE_WIDTH_DP: f64 = 2.0;
pub const DEFAULT_DOT_RADIUS_DP: f64 = 20.0;
pub const DEFAULT_TICK_LINE_WIDTH_DP: f64 = 2.0;

pub fn default_background_color() -> Color {
    Srgba::new(0.8, 0.8, 0.8, 1.0)
}

pub fn default_progress_color() -> Color {
    Srgba::new(0.4, 0.4, 0.8, 1.0)
}

pub fn default_label_color() -> Color {
    Srgba::new(0.0, 0.0, 0.0, 1.0)
}

impl Style {
    /// Defaults with dimensions scaled by the display `density` (px per dp).
    pub fn with_density(density: f64) -> Self {
        let progress_color = default_progress_color();
        Self {
            background_stroke_width: DEFAULT_STROKE_WIDTH_DP * density,
            progress_stroke_width: DEFAULT_STROKE_WIDTH_DP * density,
            background_color: default_background_color(),
            progress_color,
            dot_radius: DEFAULT_DOT_RADIUS_DP * density,
            dot_color: progress_color,
            dot_icon: None,
            tick_line_width: DEFAULT_TICK_LINE_WIDTH_DP * density,
            label_color: default_label_color(),
            label_text_style: None,
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::with_density(1.0)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid color '{0}', expected #RGB, #RRGGBB or #RRGGBBAA")]
pub struct ColorParseError(pub String);

/// Parses `#RGB`, `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
pub fn parse_color(s: &str) -> Result<Color, ColorParseError> {
    let trimmed = s.trim();
    let hex = trimmed.trim_start_matches('#');
    let err = || ColorParseError(s.to_string());
    if !hex.is_ascii() {
        return Err(err());
    }

    let (rgb, alpha) = match hex.len() {
        3 | 6 => (hex, u8::MAX),
        8 => {
            let alpha = u8::from_str_radix(&hex[6..], 16).map_err(|_| err())?;
            (&hex[..6], alpha)
        }
        _ => return Err(err()),
    };

    let rgb = Srgb::<u8>::from_str(rgb).map_err(|_| err())?;
    let rgb: Srgb<f64> = rgb.into_format();
    Ok(Srgba::new(
        rgb.red,
        rgb.green,
        rgb.blue,
        alpha as f64 / u8::MAX as f64,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(
            parse_color("#ff0000").unwrap(),
            Srgba::new(1.0, 0.0, 0.0, 1.0)
        );
        assert_eq!(parse_color("fff").unwrap(), Srgba::new(1.0, 1.0, 1.0, 1.0));

        let c = parse_color("#00000000").unwrap();
        assert_eq!(c.alpha, 0.0);
    }

    #[test]
    fn test_parse_color_rejects_garbage() {
        assert!(parse_color("red").is_err());
        assert!(parse_color("#12345").is_err());
        assert!(parse_color("#gg0000").is_err());
        assert!(parse_color("#ff0000zz").is_err());
    }

    #[test]
    fn test_dot_defaults_to_progress_color() {
        let style = Style::with_density(3.0);
        assert_eq!(style.dot_color, style.progress_color);
        assert_eq!(style.dot_radius, 60.0);
        assert_eq!(style.background_stroke_width, 6.0);
    }

    #[test]
    fn test_string_newtypes() {
        let icon = IconRef::from("/tmp/dot.png");
        assert_eq!(icon, IconRef::new(String::from("/tmp/dot.png")));
        assert_eq!(icon.as_str(), "/tmp/dot.png");
        assert_eq!(TextStyleRef::from("Sans 12").to_string(), "Sans 12");
    }
}
