//! A circular seek bar: background ring, progress arc, draggable dot and an
//! optional counter label, drawn through a host-provided [`Surface`].

pub mod config;
pub mod geometry;
pub mod gesture;
pub mod label;
mod macros;
pub mod range;
pub mod render;
pub mod style;
pub mod widget;

pub use config::{Config, ConfigError, StyleSource};
pub use geometry::{Geometry, LayoutDirection, Padding, Point, Rect, Size};
pub use gesture::{PointerEvent, PointerPhase, PointerResponse};
pub use label::{Label, TextMeasurer};
pub use range::{Direction, ValueRange};
pub use render::{Paint, PaintStyle, RenderError, Surface};
pub use style::{Color, IconRef, Style, TextStyleRef};
pub use widget::{CircleSeekBar, Invalidation, ScrollCallback};
