use crate::config::{Config, ConfigError, StyleSource};
use crate::geometry::{Geometry, LayoutDirection, Padding, Point, Rect, Size};
use crate::gesture::{self, DragTracker, PointerEvent, PointerPhase, PointerResponse};
use crate::label::{Label, TextMeasurer};
use crate::range::{Direction, ValueRange};
use crate::render::{self, Frame, RenderError, Surface};
use crate::style::{Color, IconRef, Style, TextStyleRef};

/// Drag lifecycle notifications.
pub trait ScrollCallback {
    fn on_start_scrolling(&mut self, start_value: i32);
    fn on_end_scrolling(&mut self, end_value: i32);
}

pub type ValueChangedListener = Box<dyn FnMut(i32)>;

/// Work the host has to schedule. Hosts coalesce repeated requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invalidation {
    Redraw,
    /// The label text changed and needs measuring again; implies a redraw.
    Layout,
}

pub type Invalidator = Box<dyn FnMut(Invalidation)>;

/// Circular seek bar: a ring, a progress arc, a draggable dot and an
/// optional counter label.
///
/// The widget owns no toolkit objects. The host forwards size changes,
/// layout passes, draw passes and pointer events, and receives redraw
/// requests through the [`Invalidator`].
pub struct CircleSeekBar {
    style: Style,
    range: ValueRange,
    value: i32,
    direction: Direction,
    padding: Padding,
    layout_direction: LayoutDirection,
    size: Option<Size>,
    geometry: Option<Geometry>,
    label: Option<Label>,
    drag: DragTracker,
    callback: Option<Box<dyn ScrollCallback>>,
    on_value_changed: Option<ValueChangedListener>,
    invalidator: Option<Invalidator>,
}

impl Default for CircleSeekBar {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl CircleSeekBar {
    pub fn new(config: Config) -> Self {
        let range = ValueRange::new(config.min_value, config.max_value);
        let value = range.coerce(config.value);
        let label = config.show_counter.then(|| {
            Label::new(
                value,
                config.style.label_text_style.clone(),
                config.style.label_color,
            )
        });

        Self {
            style: config.style,
            range,
            value,
            direction: config.direction,
            padding: Padding::default(),
            layout_direction: LayoutDirection::default(),
            size: None,
            geometry: None,
            label,
            drag: DragTracker::default(),
            callback: None,
            on_value_changed: None,
            invalidator: None,
        }
    }

    pub fn from_style_source(source: &impl StyleSource) -> Result<Self, ConfigError> {
        Ok(Self::new(Config::from_source(source)?))
    }

    /// Replaces style, range and direction from a fresh config, keeping
    /// listeners, padding and size. The current value survives when it still
    /// fits the new range; otherwise the config's value is coerced in.
    pub fn apply_config(&mut self, config: Config) {
        self.range = ValueRange::new(config.min_value, config.max_value);
        self.direction = config.direction;
        self.label = config.show_counter.then(|| {
            Label::new(
                self.value,
                config.style.label_text_style.clone(),
                config.style.label_color,
            )
        });
        self.style = config.style;
        self.recalculate_geometry();

        if self.range.contains(self.value) {
            self.invalidate(Invalidation::Redraw);
            if self.label.is_some() {
                self.invalidate(Invalidation::Layout);
            }
        } else {
            let value = self.range.coerce(config.value);
            self.commit_value(value);
        }
    }

    // host callbacks

    pub fn on_size_changed(&mut self, width: f64, height: f64, old_width: f64, old_height: f64) {
        log::debug!(
            "size changed {}x{} -> {}x{}",
            old_width,
            old_height,
            width,
            height
        );
        self.size = Some(Size::new(width, height));
        self.recalculate_geometry();
        self.invalidate(Invalidation::Redraw);
    }

    /// Lays the label out inside the content box of `bounds`.
    pub fn on_layout(&mut self, bounds: Rect, measurer: &dyn TextMeasurer) {
        let content = self
            .padding
            .content_box(bounds.size(), self.layout_direction);
        if let Some(label) = self.label.as_mut() {
            label.layout(content, measurer);
        }
    }

    /// Draws the widget. Does nothing until the first size change.
    pub fn on_draw(&self, surface: &mut dyn Surface) -> Result<(), RenderError> {
        let Some(geometry) = &self.geometry else {
            return Ok(());
        };

        Frame {
            geometry,
            style: &self.style,
            range: &self.range,
            value: self.value,
            direction: self.direction,
            label: self.label.as_ref(),
        }
        .draw(surface)
    }

    /// Handles a pointer event. Every event is claimed, so the host should
    /// stop ancestors from intercepting the gesture.
    pub fn on_pointer_event(&mut self, event: PointerEvent) -> PointerResponse {
        let should_redraw = match event.phase {
            PointerPhase::Down => self.start_drag(event.position),
            PointerPhase::Move if self.drag.is_active() => self.drag_to(event.position),
            PointerPhase::Move => false,
            PointerPhase::Up | PointerPhase::Cancel => {
                self.end_drag();
                false
            }
        };
        PointerResponse::claimed(should_redraw)
    }

    fn start_drag(&mut self, position: Point) -> bool {
        if !self.is_on_arc(position) || !self.drag.begin() {
            return false;
        }
        log::debug!("drag started at {}", self.value);
        if let Some(callback) = self.callback.as_mut() {
            callback.on_start_scrolling(self.value);
        }

        // grabbing the dot keeps the value on its side of the seam
        let on_dot = self
            .dot_position()
            .is_some_and(|dot| dot.distance(position) <= self.style.dot_radius);
        if on_dot {
            self.drag.anchor(self.degrees());
            return false;
        }

        // a touch elsewhere on the ring jumps straight to that value
        let Some(geometry) = &self.geometry else {
            return false;
        };
        let sweep = gesture::sweep_at(geometry, self.direction, position);
        self.drag.anchor(sweep);
        self.set_sweep(sweep)
    }

    fn drag_to(&mut self, position: Point) -> bool {
        let Some(geometry) = &self.geometry else {
            return false;
        };
        let sweep = self
            .drag
            .follow(gesture::sweep_at(geometry, self.direction, position));
        self.set_sweep(sweep)
    }

    fn set_sweep(&mut self, sweep: f64) -> bool {
        let value = self.range.clamp(self.range.to_value(sweep));
        if value == self.value {
            return false;
        }
        self.commit_value(value);
        true
    }

    fn end_drag(&mut self) {
        if !self.drag.end() {
            return;
        }
        log::debug!("drag ended at {}", self.value);
        if let Some(callback) = self.callback.as_mut() {
            callback.on_end_scrolling(self.value);
        }
    }

    fn commit_value(&mut self, value: i32) {
        self.value = value;
        self.invalidate(Invalidation::Redraw);

        if let Some(label) = self.label.as_mut() {
            label.set_value(value);
            self.invalidate(Invalidation::Layout);
        }
        if let Some(listener) = self.on_value_changed.as_mut() {
            listener(value);
        }
    }

    fn recalculate_geometry(&mut self) {
        self.geometry = self.size.map(|size| {
            let content = self.padding.content_box(size, self.layout_direction);
            Geometry::calculate(size, content, &self.style)
        });
        if let Some(g) = &self.geometry {
            log::debug!(
                "geometry center=({:.1}, {:.1}) radius={:.1}",
                g.center.x,
                g.center.y,
                g.base_radius
            );
        }
    }

    fn invalidate(&mut self, invalidation: Invalidation) {
        if let Some(invalidator) = self.invalidator.as_mut() {
            invalidator(invalidation);
        }
    }

    fn update_style(&mut self, update: impl FnOnce(&mut Style)) {
        update(&mut self.style);
        self.recalculate_geometry();
        self.invalidate(Invalidation::Redraw);
    }

    // queries

    pub fn is_on_arc(&self, point: Point) -> bool {
        self.geometry
            .as_ref()
            .is_some_and(|g| g.is_on_arc(point, self.style.dot_radius))
    }

    /// Current sweep angle, derived from the value.
    pub fn degrees(&self) -> f64 {
        self.range.to_degrees(self.value)
    }

    pub fn dot_position(&self) -> Option<Point> {
        self.geometry
            .as_ref()
            .map(|g| g.point_at(render::dot_angle(&self.range, self.value, self.direction)))
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    pub fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn range(&self) -> ValueRange {
        self.range
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn min_value(&self) -> i32 {
        self.range.min()
    }

    pub fn max_value(&self) -> i32 {
        self.range.max()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_clockwise(&self) -> bool {
        self.direction.is_clockwise()
    }

    pub fn show_counter(&self) -> bool {
        self.label.is_some()
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    pub fn layout_direction(&self) -> LayoutDirection {
        self.layout_direction
    }

    pub fn background_stroke_width(&self) -> f64 {
        self.style.background_stroke_width
    }

    pub fn progress_stroke_width(&self) -> f64 {
        self.style.progress_stroke_width
    }

    pub fn background_color(&self) -> Color {
        self.style.background_color
    }

    pub fn progress_color(&self) -> Color {
        self.style.progress_color
    }

    pub fn dot_radius(&self) -> f64 {
        self.style.dot_radius
    }

    pub fn dot_color(&self) -> Color {
        self.style.dot_color
    }

    pub fn dot_icon(&self) -> Option<&IconRef> {
        self.style.dot_icon.as_ref()
    }

    pub fn tick_line_width(&self) -> f64 {
        self.style.tick_line_width
    }

    pub fn text_style(&self) -> Option<&TextStyleRef> {
        self.style.label_text_style.as_ref()
    }

    // mutators

    pub fn set_callback(&mut self, callback: impl ScrollCallback + 'static) {
        self.callback = Some(Box::new(callback));
    }

    pub fn set_on_value_changed(&mut self, listener: impl FnMut(i32) + 'static) {
        self.on_value_changed = Some(Box::new(listener));
    }

    pub fn set_invalidator(&mut self, invalidator: impl FnMut(Invalidation) + 'static) {
        self.invalidator = Some(Box::new(invalidator));
    }

    /// Sets the value, clamped into the range. Always notifies.
    pub fn set_value(&mut self, value: i32) {
        let clamped = self.range.clamp(value);
        if clamped != value {
            log::warn!("value {} clamped to {}", value, clamped);
        }
        self.commit_value(clamped);
    }

    /// Sets the minimum; a minimum above the maximum is pulled down to it.
    pub fn set_min_value(&mut self, min: i32) {
        self.set_range(ValueRange::new(min, self.range.max()));
    }

    /// Sets the maximum; a maximum below the minimum drags the minimum down.
    pub fn set_max_value(&mut self, max: i32) {
        self.set_range(ValueRange::new(self.range.min().min(max), max));
    }

    fn set_range(&mut self, range: ValueRange) {
        self.range = range;
        if range.contains(self.value) {
            self.invalidate(Invalidation::Redraw);
        } else {
            let value = range.coerce(self.value);
            self.commit_value(value);
        }
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
        self.invalidate(Invalidation::Redraw);
    }

    pub fn set_clockwise(&mut self, clockwise: bool) {
        self.set_direction(Direction::from_clockwise(clockwise));
    }

    pub fn set_show_counter(&mut self, show: bool) {
        match (show, self.label.is_some()) {
            (true, false) => {
                self.label = Some(Label::new(
                    self.value,
                    self.style.label_text_style.clone(),
                    self.style.label_color,
                ));
                self.invalidate(Invalidation::Layout);
            }
            (false, true) => {
                self.label = None;
                self.invalidate(Invalidation::Redraw);
            }
            _ => {}
        }
    }

    pub fn set_text_style(&mut self, text_style: Option<TextStyleRef>) {
        self.style.label_text_style = text_style.clone();
        if let Some(label) = self.label.as_mut() {
            label.set_text_style(text_style);
            self.invalidate(Invalidation::Layout);
        }
    }

    pub fn set_label_color(&mut self, color: Color) {
        self.style.label_color = color;
        if let Some(label) = self.label.as_mut() {
            label.set_color(color);
        }
        self.invalidate(Invalidation::Redraw);
    }

    pub fn set_padding(&mut self, padding: Padding) {
        self.padding = padding;
        self.recalculate_geometry();
        self.invalidate(Invalidation::Layout);
    }

    pub fn set_layout_direction(&mut self, direction: LayoutDirection) {
        self.layout_direction = direction;
        self.recalculate_geometry();
        self.invalidate(Invalidation::Layout);
    }

    pub fn set_background_stroke_width(&mut self, width: f64) {
        self.update_style(|s| s.background_stroke_width = width);
    }

    pub fn set_progress_stroke_width(&mut self, width: f64) {
        self.update_style(|s| s.progress_stroke_width = width);
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.update_style(|s| s.background_color = color);
    }

    pub fn set_progress_color(&mut self, color: Color) {
        self.update_style(|s| s.progress_color = color);
    }

    pub fn set_dot_radius(&mut self, radius: f64) {
        self.update_style(|s| s.dot_radius = radius);
    }

    pub fn set_dot_color(&mut self, color: Color) {
        self.update_style(|s| s.dot_color = color);
    }

    pub fn set_dot_icon(&mut self, icon: Option<IconRef>) {
        self.update_style(|s| s.dot_icon = icon);
    }

    pub fn set_tick_line_width(&mut self, width: f64) {
        self.update_style(|s| s.tick_line_width = width);
    }
}
