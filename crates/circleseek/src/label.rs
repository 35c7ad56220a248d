use crate::geometry::{Rect, Size};
use crate::style::{Color, TextStyleRef};

/// Host text measurement, used during the layout pass.
pub trait TextMeasurer {
    fn measure(&self, text: &str, style: Option<&TextStyleRef>) -> Size;
}

/// Counter label shown in the middle of the ring.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    text: String,
    text_style: Option<TextStyleRef>,
    color: Color,
    bounds: Option<Rect>,
}

impl Label {
    pub fn new(value: i32, text_style: Option<TextStyleRef>, color: Color) -> Self {
        Self {
            text: value.to_string(),
            text_style,
            color,
            bounds: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn text_style(&self) -> Option<&TextStyleRef> {
        self.text_style.as_ref()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Position from the last layout pass, `None` before the first one.
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    pub fn set_value(&mut self, value: i32) {
        self.text = value.to_string();
    }

    pub fn set_text_style(&mut self, text_style: Option<TextStyleRef>) {
        self.text_style = text_style;
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Measures the text, capped to `content`, and centers it there.
    pub fn layout(&mut self, content: Rect, measurer: &dyn TextMeasurer) -> Rect {
        let measured = measurer.measure(&self.text, self.text_style.as_ref());
        let size = Size::new(
            measured.width.min(content.width),
            measured.height.min(content.height),
        );
        let bounds = Rect::centered(content.center(), size);
        self.bounds = Some(bounds);
        bounds
    }
}
