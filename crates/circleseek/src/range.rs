use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumString};

pub const FULL_TURN: f64 = 360.0;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    #[strum(to_string = "clockwise", serialize = "cw")]
    Clockwise,
    #[strum(
        to_string = "counterclockwise",
        serialize = "ccw",
        serialize = "anticlockwise"
    )]
    CounterClockwise,
}

impl Direction {
    pub fn from_clockwise(clockwise: bool) -> Self {
        if clockwise {
            Self::Clockwise
        } else {
            Self::CounterClockwise
        }
    }

    pub fn is_clockwise(&self) -> bool {
        matches!(self, Self::Clockwise)
    }

    /// Sign applied to drawn sweeps and the dot offset.
    pub fn sign(&self) -> f64 {
        match self {
            Self::Clockwise => 1.0,
            Self::CounterClockwise => -1.0,
        }
    }
}

/// Inclusive integer range mapped onto one full turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueRange {
    min: i32,
    max: i32,
}

impl Default for ValueRange {
    fn default() -> Self {
        Self { min: 0, max: 100 }
    }
}

impl ValueRange {
    /// Builds a range, pulling `min` down to `max` when they are inverted.
    pub fn new(min: i32, max: i32) -> Self {
        if min > max {
            log::warn!("min value {} exceeds max value {}, using {}", min, max, max);
            return Self { min: max, max };
        }
        Self { min, max }
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }

    /// Out-of-range values fall back to `min`, not to the nearest bound.
    pub fn coerce(&self, value: i32) -> i32 {
        if self.contains(value) {
            value
        } else {
            log::warn!(
                "value {} outside [{}, {}], using {}",
                value,
                self.min,
                self.max,
                self.min
            );
            self.min
        }
    }

    fn degrees_per_unit(&self) -> Option<f64> {
        (!self.is_degenerate()).then(|| FULL_TURN / (self.max as f64 - self.min as f64))
    }

    /// Sweep angle for `value`: 0 at `min`, 360 at `max`.
    pub fn to_degrees(&self, value: i32) -> f64 {
        self.degrees_per_unit()
            .map(|step| (value as f64 - self.min as f64) * step)
            .unwrap_or(0.0)
    }

    /// Inverse of [`to_degrees`](Self::to_degrees), rounding half up.
    ///
    /// The result is not clamped to the range.
    pub fn to_value(&self, degrees: f64) -> i32 {
        match self.degrees_per_unit() {
            Some(step) => {
                let units = (degrees / step + 0.5).floor();
                (self.min as f64 + units) as i32
            }
            None => self.min,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverted_range_clamps_min() {
        let range = ValueRange::new(20, 10);
        assert_eq!(range.min(), 10);
        assert_eq!(range.max(), 10);
    }

    #[test]
    fn test_endpoints() {
        let range = ValueRange::new(-20, 40);
        assert_eq!(range.to_degrees(-20), 0.0);
        assert_eq!(range.to_degrees(40), 360.0);
    }

    #[test]
    fn test_half_way() {
        let range = ValueRange::new(0, 100);
        assert_eq!(range.to_degrees(50), 180.0);
    }

    #[test]
    fn test_round_trip() {
        for (min, max) in [(0, 100), (0, 7), (-50, 13), (3, 4), (0, 1000)] {
            let range = ValueRange::new(min, max);
            for v in min..=max {
                assert_eq!(range.to_value(range.to_degrees(v)), v, "range [{min}, {max}]");
            }
        }
    }

    #[test]
    fn test_round_half_up() {
        // 36 degrees per unit
        let range = ValueRange::new(0, 10);
        assert_eq!(range.to_value(18.0), 1);
        assert_eq!(range.to_value(17.9), 0);
        assert_eq!(range.to_value(53.9), 1);
        assert_eq!(range.to_value(54.0), 2);
    }

    #[test]
    fn test_to_value_is_unclamped() {
        let range = ValueRange::new(0, 10);
        assert_eq!(range.to_value(396.0), 11);
        assert_eq!(range.to_value(-36.0), -1);
    }

    #[test]
    fn test_degenerate_range() {
        let range = ValueRange::new(5, 5);
        assert_eq!(range.to_degrees(5), 0.0);
        assert_eq!(range.to_value(123.0), 5);
    }

    #[test]
    fn test_coerce_falls_back_to_min() {
        let range = ValueRange::new(0, 10);
        assert_eq!(range.coerce(15), 0);
        assert_eq!(range.coerce(-1), 0);
        assert_eq!(range.coerce(7), 7);
        assert_eq!(range.clamp(15), 10);
    }

    #[test]
    fn test_direction_deserialization() {
        let cases = vec![
            ("\"clockwise\"", Direction::Clockwise),
            ("\"Clockwise\"", Direction::Clockwise),
            ("\"CW\"", Direction::Clockwise),
            ("\"counterclockwise\"", Direction::CounterClockwise),
            ("\"ccw\"", Direction::CounterClockwise),
            ("\"AntiClockwise\"", Direction::CounterClockwise),
        ];

        for (json, expected) in cases {
            let deserialized: Direction = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_direction_from_bool() {
        assert_eq!(Direction::from_clockwise(true), Direction::Clockwise);
        assert_eq!(Direction::from_clockwise(false), Direction::CounterClockwise);
        assert_eq!(Direction::CounterClockwise.sign(), -1.0);
    }
}
