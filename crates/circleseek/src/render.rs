use crate::geometry::{Geometry, Point, Rect};
use crate::label::Label;
use crate::range::{Direction, ValueRange};
use crate::style::{Color, IconRef, Style, TextStyleRef};
use thiserror::Error;

/// Where the progress arc starts, in the host arc convention
/// (0 = 3 o'clock, positive = clockwise on screen). Visually the top.
pub const ARC_START_DEGREES: f64 = 270.0;
/// Offset between the sweep angle and the dot's screen angle.
pub const DOT_ANGLE_OFFSET: f64 = -95.0;
/// Screen angle of the tick line anchor marking the zero position.
pub const TICK_ANGLE_DEGREES: f64 = 262.2;
pub const TICK_OFFSET_X: f64 = 20.0;
pub const TICK_OFFSET_TOP: f64 = -10.0;
pub const TICK_OFFSET_BOTTOM: f64 = 8.0;
pub const DOT_ICON_SIZE: f64 = 36.0;
pub const DOT_ICON_OFFSET_X: f64 = 15.0;
pub const DOT_ICON_OFFSET_Y: f64 = 18.0;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Icon not found: {0}")]
    IconNotFound(IconRef),
    #[error("Failed to load icon '{icon}': {reason}")]
    IconLoad { icon: IconRef, reason: String },
    #[error("Surface error: {0}")]
    Surface(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintStyle {
    Stroke,
    Fill,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Color,
    pub stroke_width: f64,
    pub style: PaintStyle,
}

impl Paint {
    pub fn stroke(color: Color, stroke_width: f64) -> Self {
        Self {
            color,
            stroke_width,
            style: PaintStyle::Stroke,
        }
    }

    pub fn fill(color: Color) -> Self {
        Self {
            color,
            stroke_width: 0.0,
            style: PaintStyle::Fill,
        }
    }
}

/// Drawing primitives provided by the host toolkit. Angles are in degrees.
pub trait Surface {
    fn draw_circle(&mut self, center: Point, radius: f64, paint: &Paint)
    -> Result<(), RenderError>;

    /// Arc inscribed in `bounds`, starting at `start` and sweeping `sweep`
    /// degrees (negative sweeps run counterclockwise).
    fn draw_arc(
        &mut self,
        bounds: Rect,
        start: f64,
        sweep: f64,
        paint: &Paint,
    ) -> Result<(), RenderError>;

    fn draw_line(&mut self, from: Point, to: Point, paint: &Paint) -> Result<(), RenderError>;

    fn draw_icon(&mut self, icon: &IconRef, bounds: Rect) -> Result<(), RenderError>;

    fn draw_text(
        &mut self,
        text: &str,
        bounds: Rect,
        color: Color,
        style: Option<&TextStyleRef>,
    ) -> Result<(), RenderError>;
}

/// Signed sweep of the progress arc.
pub fn sweep_angle(range: &ValueRange, value: i32, direction: Direction) -> f64 {
    direction.sign() * range.to_degrees(value)
}

/// Screen angle of the dot for `value`.
pub fn dot_angle(range: &ValueRange, value: i32, direction: Direction) -> f64 {
    sweep_angle(range, value, direction) + DOT_ANGLE_OFFSET
}

/// Everything one draw pass reads.
pub struct Frame<'a> {
    pub geometry: &'a Geometry,
    pub style: &'a Style,
    pub range: &'a ValueRange,
    pub value: i32,
    pub direction: Direction,
    pub label: Option<&'a Label>,
}

impl Frame<'_> {
    /// Label first (underneath), then ring, arc, tick and dot.
    pub fn draw(&self, surface: &mut dyn Surface) -> Result<(), RenderError> {
        self.draw_label(surface)?;
        self.draw_background(surface)?;
        self.draw_progress(surface)?;
        self.draw_tick(surface)?;
        self.draw_dot(surface)
    }

    pub fn dot_position(&self) -> Point {
        self.geometry
            .point_at(dot_angle(self.range, self.value, self.direction))
    }

    fn draw_label(&self, surface: &mut dyn Surface) -> Result<(), RenderError> {
        match self.label.and_then(|l| l.bounds().map(|b| (l, b))) {
            Some((label, bounds)) => {
                surface.draw_text(label.text(), bounds, label.color(), label.text_style())
            }
            None => Ok(()),
        }
    }

    fn draw_background(&self, surface: &mut dyn Surface) -> Result<(), RenderError> {
        surface.draw_circle(
            self.geometry.center,
            self.geometry.base_radius,
            &Paint::stroke(
                self.style.background_color,
                self.style.background_stroke_width,
            ),
        )
    }

    fn draw_progress(&self, surface: &mut dyn Surface) -> Result<(), RenderError> {
        surface.draw_arc(
            self.geometry.arc_bounds,
            ARC_START_DEGREES,
            sweep_angle(self.range, self.value, self.direction),
            &Paint::stroke(self.style.progress_color, self.style.progress_stroke_width),
        )
    }

    fn draw_tick(&self, surface: &mut dyn Surface) -> Result<(), RenderError> {
        let anchor = self.geometry.point_at(TICK_ANGLE_DEGREES);
        let x = anchor.x + TICK_OFFSET_X;
        surface.draw_line(
            Point::new(x, anchor.y + TICK_OFFSET_BOTTOM),
            Point::new(x, anchor.y + TICK_OFFSET_TOP),
            &Paint::stroke(self.style.progress_color, self.style.tick_line_width),
        )
    }

    fn draw_dot(&self, surface: &mut dyn Surface) -> Result<(), RenderError> {
        let position = self.dot_position();

        let Some(icon) = &self.style.dot_icon else {
            return surface.draw_circle(
                position,
                self.style.dot_radius,
                &Paint::fill(self.style.dot_color),
            );
        };

        let bounds = Rect::new(
            position.x - DOT_ICON_OFFSET_X,
            position.y - DOT_ICON_OFFSET_Y,
            DOT_ICON_SIZE,
            DOT_ICON_SIZE,
        );
        // a broken icon must not take the rest of the frame down with it
        if let Err(e) = surface.draw_icon(icon, bounds) {
            log::error!("Skipping dot icon: {}", e);
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::geometry::{LayoutDirection, Padding, Size};

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum DrawOp {
        Circle {
            center: Point,
            radius: f64,
            paint: Paint,
        },
        Arc {
            bounds: Rect,
            start: f64,
            sweep: f64,
            paint: Paint,
        },
        Line {
            from: Point,
            to: Point,
            paint: Paint,
        },
        Icon {
            icon: IconRef,
            bounds: Rect,
        },
        Text {
            text: String,
            bounds: Rect,
        },
    }

    /// Records every call; icons whose name starts with `missing` fail.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingSurface {
        pub ops: Vec<DrawOp>,
    }

    impl Surface for RecordingSurface {
        fn draw_circle(
            &mut self,
            center: Point,
            radius: f64,
            paint: &Paint,
        ) -> Result<(), RenderError> {
            self.ops.push(DrawOp::Circle {
                center,
                radius,
                paint: *paint,
            });
            Ok(())
        }

        fn draw_arc(
            &mut self,
            bounds: Rect,
            start: f64,
            sweep: f64,
            paint: &Paint,
        ) -> Result<(), RenderError> {
            self.ops.push(DrawOp::Arc {
                bounds,
                start,
                sweep,
                paint: *paint,
            });
            Ok(())
        }

        fn draw_line(&mut self, from: Point, to: Point, paint: &Paint) -> Result<(), RenderError> {
            self.ops.push(DrawOp::Line {
                from,
                to,
                paint: *paint,
            });
            Ok(())
        }

        fn draw_icon(&mut self, icon: &IconRef, bounds: Rect) -> Result<(), RenderError> {
            if icon.starts_with("missing") {
                return Err(RenderError::IconNotFound(icon.clone()));
            }
            self.ops.push(DrawOp::Icon {
                icon: icon.clone(),
                bounds,
            });
            Ok(())
        }

        fn draw_text(
            &mut self,
            text: &str,
            bounds: Rect,
            _color: Color,
            _style: Option<&TextStyleRef>,
        ) -> Result<(), RenderError> {
            self.ops.push(DrawOp::Text {
                text: text.to_string(),
                bounds,
            });
            Ok(())
        }
    }

    fn geometry(style: &Style) -> Geometry {
        let size = Size::new(200.0, 200.0);
        Geometry::calculate(
            size,
            Padding::default().content_box(size, LayoutDirection::Ltr),
            style,
        )
    }

    fn draw(style: &Style, value: i32, direction: Direction) -> Vec<DrawOp> {
        let geometry = geometry(style);
        let range = ValueRange::new(0, 100);
        let frame = Frame {
            geometry: &geometry,
            style,
            range: &range,
            value,
            direction,
            label: None,
        };
        let mut surface = RecordingSurface::default();
        frame.draw(&mut surface).unwrap();
        surface.ops
    }

    fn dot_at(style: &Style, value: i32, direction: Direction) -> Point {
        let range = ValueRange::new(0, 100);
        geometry(style).point_at(dot_angle(&range, value, direction))
    }

    #[test]
    fn test_draw_order() {
        let ops = draw(&Style::default(), 25, Direction::Clockwise);
        assert_eq!(ops.len(), 4);
        assert!(matches!(ops[0], DrawOp::Circle { paint, .. } if paint.style == PaintStyle::Stroke));
        assert!(matches!(ops[1], DrawOp::Arc { .. }));
        assert!(matches!(ops[2], DrawOp::Line { .. }));
        assert!(matches!(ops[3], DrawOp::Circle { paint, .. } if paint.style == PaintStyle::Fill));
    }

    #[test]
    fn test_progress_arc_sweep_follows_direction() {
        let cw = draw(&Style::default(), 50, Direction::Clockwise);
        let ccw = draw(&Style::default(), 50, Direction::CounterClockwise);

        assert!(matches!(cw[1], DrawOp::Arc { start, sweep, .. } if start == 270.0 && sweep == 180.0));
        assert!(matches!(ccw[1], DrawOp::Arc { start, sweep, .. } if start == 270.0 && sweep == -180.0));
    }

    #[test]
    fn test_dot_angle_offset() {
        let range = ValueRange::new(0, 100);
        assert_eq!(dot_angle(&range, 25, Direction::Clockwise), 90.0 - 95.0);
        assert_eq!(dot_angle(&range, 25, Direction::CounterClockwise), -90.0 - 95.0);
    }

    #[test]
    fn test_dot_drawn_at_value() {
        let style = Style::default();
        let expected = dot_at(&style, 25, Direction::Clockwise);
        let ops = draw(&style, 25, Direction::Clockwise);
        assert!(
            matches!(ops[3], DrawOp::Circle { center, radius, .. } if center == expected && radius == 20.0)
        );
    }

    #[test]
    fn test_tick_line_is_fixed() {
        let style = Style::default();
        let ops_a = draw(&style, 0, Direction::Clockwise);
        let ops_b = draw(&style, 80, Direction::CounterClockwise);
        assert_eq!(ops_a[2], ops_b[2]);

        let anchor = geometry(&style).point_at(TICK_ANGLE_DEGREES);
        assert_eq!(
            ops_a[2],
            DrawOp::Line {
                from: Point::new(anchor.x + 20.0, anchor.y + 8.0),
                to: Point::new(anchor.x + 20.0, anchor.y - 10.0),
                paint: Paint::stroke(style.progress_color, style.tick_line_width),
            }
        );
    }

    #[test]
    fn test_icon_replaces_dot() {
        let style = Style {
            dot_icon: Some(IconRef::new("knob.png")),
            ..Style::default()
        };
        let p = dot_at(&style, 10, Direction::Clockwise);
        let ops = draw(&style, 10, Direction::Clockwise);
        assert_eq!(
            ops[3],
            DrawOp::Icon {
                icon: IconRef::new("knob.png"),
                bounds: Rect::new(p.x - 15.0, p.y - 18.0, 36.0, 36.0),
            }
        );
    }

    #[test]
    fn test_missing_icon_is_skipped() {
        let style = Style {
            dot_icon: Some(IconRef::new("missing.png")),
            ..Style::default()
        };
        let ops = draw(&style, 10, Direction::Clockwise);
        assert_eq!(ops.len(), 3);
    }

    #[test]
    fn test_label_drawn_first_once_laid_out() {
        let style = Style::default();
        let geometry = geometry(&style);
        let range = ValueRange::new(0, 100);
        let mut label = Label::new(42, None, style.label_color);
        let frame_ops = |label: &Label| {
            let mut surface = RecordingSurface::default();
            Frame {
                geometry: &geometry,
                style: &style,
                range: &range,
                value: 42,
                direction: Direction::Clockwise,
                label: Some(label),
            }
            .draw(&mut surface)
            .unwrap();
            surface.ops
        };

        assert_eq!(frame_ops(&label).len(), 4);

        let bounds = label.layout(
            Rect::new(0.0, 0.0, 200.0, 200.0),
            &crate::label::tests::FixedWidthMeasurer,
        );
        let ops = frame_ops(&label);
        assert_eq!(ops.len(), 5);
        assert_eq!(
            ops[0],
            DrawOp::Text {
                text: "42".to_string(),
                bounds
            }
        );
    }
}
