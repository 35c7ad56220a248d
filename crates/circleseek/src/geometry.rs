use crate::style::Style;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square with the given half-extent on both axes.
    pub fn square(center: Point, half_extent: f64) -> Self {
        Self::centered(center, Size::new(half_extent * 2.0, half_extent * 2.0))
    }

    pub fn centered(center: Point, size: Size) -> Self {
        Self::new(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutDirection {
    #[default]
    Ltr,
    Rtl,
}

/// Widget padding in pixels. `start`/`end` are the direction-relative
/// sides; when non-zero they win over `left`/`right`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub start: f64,
    pub end: f64,
}

impl Padding {
    pub fn uniform(value: f64) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
            start: 0.0,
            end: 0.0,
        }
    }

    /// Returns the effective `(left, right)` padding.
    pub fn resolve_horizontal(&self, direction: LayoutDirection) -> (f64, f64) {
        let (start_side, end_side) = match direction {
            LayoutDirection::Ltr => (self.left, self.right),
            LayoutDirection::Rtl => (self.right, self.left),
        };
        let start = if self.start != 0.0 { self.start } else { start_side };
        let end = if self.end != 0.0 { self.end } else { end_side };

        match direction {
            LayoutDirection::Ltr => (start, end),
            LayoutDirection::Rtl => (end, start),
        }
    }

    /// The box left over inside `size` once padding is removed.
    pub fn content_box(&self, size: Size, direction: LayoutDirection) -> Rect {
        let (left, right) = self.resolve_horizontal(direction);
        Rect::new(
            left,
            self.top,
            (size.width - left - right).max(0.0),
            (size.height - self.top - self.bottom).max(0.0),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub center: Point,
    pub base_radius: f64,
    pub arc_bounds: Rect,
}

impl Geometry {
    /// Ring geometry for a widget of `size` whose content box is `content`.
    ///
    /// The radius is shrunk by the wider of the two ring strokes and by the
    /// dot radius so the dot never leaves the widget bounds.
    pub fn calculate(size: Size, content: Rect, style: &Style) -> Self {
        let stroke = style
            .background_stroke_width
            .max(style.progress_stroke_width);
        let base_radius = (size.width.min(size.height) / 2.0 - stroke - style.dot_radius).max(0.0);
        let center = content.center();

        Self {
            center,
            base_radius,
            arc_bounds: Rect::square(center, base_radius),
        }
    }

    /// Point on the base circle at `degrees` (0 = 3 o'clock, clockwise on screen).
    pub fn point_at(&self, degrees: f64) -> Point {
        let radians = degrees.to_radians();
        Point::new(
            self.center.x + self.base_radius * radians.cos(),
            self.center.y + self.base_radius * radians.sin(),
        )
    }

    /// Screen angle of `point` around the center, in degrees within `(-180, 180]`.
    pub fn angle_of(&self, point: Point) -> f64 {
        let (dx, dy) = (point.x - self.center.x, point.y - self.center.y);
        dy.atan2(dx).to_degrees()
    }

    /// Whether `point` lies within `tolerance` of the base circle.
    pub fn is_on_arc(&self, point: Point, tolerance: f64) -> bool {
        (point.distance(self.center) - self.base_radius).abs() <= tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(bg: f64, progress: f64, dot: f64) -> Style {
        Style {
            background_stroke_width: bg,
            progress_stroke_width: progress,
            dot_radius: dot,
            ..Style::default()
        }
    }

    #[test]
    fn test_radius_uses_wider_stroke() {
        let size = Size::new(200.0, 300.0);
        let content = Padding::default().content_box(size, LayoutDirection::Ltr);

        let g = Geometry::calculate(size, content, &style(2.0, 6.0, 10.0));
        assert_eq!(g.base_radius, 100.0 - 6.0 - 10.0);

        let g = Geometry::calculate(size, content, &style(8.0, 6.0, 10.0));
        assert_eq!(g.base_radius, 100.0 - 8.0 - 10.0);
    }

    #[test]
    fn test_radius_never_negative() {
        let size = Size::new(10.0, 10.0);
        let content = Padding::default().content_box(size, LayoutDirection::Ltr);
        let g = Geometry::calculate(size, content, &style(2.0, 2.0, 20.0));
        assert_eq!(g.base_radius, 0.0);
    }

    #[test]
    fn test_center_respects_padding() {
        let size = Size::new(200.0, 100.0);
        let padding = Padding {
            left: 20.0,
            top: 10.0,
            right: 0.0,
            bottom: 30.0,
            ..Padding::default()
        };
        let content = padding.content_box(size, LayoutDirection::Ltr);
        let g = Geometry::calculate(size, content, &style(2.0, 2.0, 10.0));

        assert_eq!(g.center, Point::new(20.0 + 180.0 / 2.0, 10.0 + 60.0 / 2.0));
        assert_eq!(
            g.arc_bounds,
            Rect::new(
                g.center.x - g.base_radius,
                g.center.y - g.base_radius,
                g.base_radius * 2.0,
                g.base_radius * 2.0
            )
        );
    }

    #[test]
    fn test_start_end_padding_preferred() {
        let padding = Padding {
            left: 4.0,
            right: 6.0,
            start: 10.0,
            end: 0.0,
            ..Padding::default()
        };
        assert_eq!(padding.resolve_horizontal(LayoutDirection::Ltr), (10.0, 6.0));
        // start maps to the right side in RTL
        assert_eq!(padding.resolve_horizontal(LayoutDirection::Rtl), (4.0, 10.0));
    }

    #[test]
    fn test_point_and_angle_are_inverse() {
        let g = Geometry {
            center: Point::new(50.0, 50.0),
            base_radius: 40.0,
            arc_bounds: Rect::square(Point::new(50.0, 50.0), 40.0),
        };
        for degrees in [-170.0, -95.0, 0.0, 45.0, 135.0] {
            let p = g.point_at(degrees);
            assert!((g.angle_of(p) - degrees).abs() < 1e-9);
        }
    }

    #[test]
    fn test_on_arc_band() {
        let g = Geometry {
            center: Point::new(0.0, 0.0),
            base_radius: 100.0,
            arc_bounds: Rect::square(Point::new(0.0, 0.0), 100.0),
        };
        assert!(g.is_on_arc(Point::new(100.0, 0.0), 20.0));
        assert!(g.is_on_arc(Point::new(0.0, -120.0), 20.0));
        assert!(!g.is_on_arc(Point::new(0.0, 121.0), 20.0));
        assert!(!g.is_on_arc(Point::new(0.0, 0.0), 20.0));
    }
}
