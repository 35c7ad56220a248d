use crate::gui::icons::IconCache;
use cairo::Context;
use circleseek::{
    Color, IconRef, Paint, PaintStyle, Point, Rect, RenderError, Size, Surface, TextMeasurer,
    TextStyleRef,
};
use gdk4::prelude::*;
use std::f64::consts::PI;

pub const DEFAULT_FONT_FAMILY: &str = "Sans";
pub const DEFAULT_FONT_SIZE: f64 = 24.0;

/// Font described by a label text style such as `"Sans Bold 24"`.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub bold: bool,
    pub size: f64,
}

impl FontSpec {
    pub fn parse(style: Option<&TextStyleRef>) -> Self {
        let mut spec = Self {
            family: DEFAULT_FONT_FAMILY.to_string(),
            bold: false,
            size: DEFAULT_FONT_SIZE,
        };
        let Some(style) = style else {
            return spec;
        };

        let mut family = Vec::new();
        for token in style.split_whitespace() {
            if let Ok(size) = token.parse::<f64>() {
                spec.size = size;
            } else if token.eq_ignore_ascii_case("bold") {
                spec.bold = true;
            } else {
                family.push(token);
            }
        }
        if !family.is_empty() {
            spec.family = family.join(" ");
        }
        spec
    }

    fn apply(&self, cr: &Context) {
        let weight = if self.bold {
            cairo::FontWeight::Bold
        } else {
            cairo::FontWeight::Normal
        };
        cr.select_font_face(&self.family, cairo::FontSlant::Normal, weight);
        cr.set_font_size(self.size);
    }
}

fn surface_error(e: cairo::Error) -> RenderError {
    RenderError::Surface(e.to_string())
}

/// [`Surface`] over a cairo context handed out by a `DrawingArea`.
pub struct CairoSurface<'a> {
    cr: &'a Context,
    icons: &'a mut IconCache,
}

impl<'a> CairoSurface<'a> {
    pub fn new(cr: &'a Context, icons: &'a mut IconCache) -> Self {
        Self { cr, icons }
    }

    fn set_color(&self, color: Color) {
        let (r, g, b, a) = color.into_components();
        self.cr.set_source_rgba(r, g, b, a);
    }

    fn finish(&self, paint: &Paint) -> Result<(), RenderError> {
        self.set_color(paint.color);
        match paint.style {
            PaintStyle::Stroke => {
                self.cr.set_line_width(paint.stroke_width);
                self.cr.stroke()
            }
            PaintStyle::Fill => self.cr.fill(),
        }
        .map_err(surface_error)
    }
}

impl Surface for CairoSurface<'_> {
    fn draw_circle(
        &mut self,
        center: Point,
        radius: f64,
        paint: &Paint,
    ) -> Result<(), RenderError> {
        self.cr.new_path();
        self.cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
        self.finish(paint)
    }

    fn draw_arc(
        &mut self,
        bounds: Rect,
        start: f64,
        sweep: f64,
        paint: &Paint,
    ) -> Result<(), RenderError> {
        let center = bounds.center();
        let radius = bounds.width / 2.0;
        let (from, to) = (start.to_radians(), (start + sweep).to_radians());

        self.cr.new_path();
        if sweep >= 0.0 {
            self.cr.arc(center.x, center.y, radius, from, to);
        } else {
            self.cr.arc_negative(center.x, center.y, radius, from, to);
        }
        self.finish(paint)
    }

    fn draw_line(&mut self, from: Point, to: Point, paint: &Paint) -> Result<(), RenderError> {
        self.cr.new_path();
        self.cr.move_to(from.x, from.y);
        self.cr.line_to(to.x, to.y);
        self.finish(paint)
    }

    fn draw_icon(&mut self, icon: &IconRef, bounds: Rect) -> Result<(), RenderError> {
        // a known-bad icon was already reported; skip it quietly
        let Some(pixbuf) = self
            .icons
            .get(icon, bounds.width as i32, bounds.height as i32)?
        else {
            return Ok(());
        };

        self.cr.save().map_err(surface_error)?;
        self.cr.set_source_pixbuf(&pixbuf, bounds.x, bounds.y);
        let painted = self.cr.paint().map_err(surface_error);
        self.cr.restore().map_err(surface_error)?;
        painted
    }

    fn draw_text(
        &mut self,
        text: &str,
        bounds: Rect,
        color: Color,
        style: Option<&TextStyleRef>,
    ) -> Result<(), RenderError> {
        FontSpec::parse(style).apply(self.cr);
        let ext = self.cr.text_extents(text).map_err(surface_error)?;

        self.set_color(color);
        // align the ink box, not the baseline, with the laid-out bounds
        self.cr
            .move_to(bounds.x - ext.x_bearing(), bounds.y - ext.y_bearing());
        self.cr.show_text(text).map_err(surface_error)
    }
}

impl TextMeasurer for CairoSurface<'_> {
    fn measure(&self, text: &str, style: Option<&TextStyleRef>) -> Size {
        FontSpec::parse(style).apply(self.cr);
        match self.cr.text_extents(text) {
            Ok(ext) => Size::new(ext.width(), ext.height()),
            Err(e) => {
                log::error!("Failed to measure label: {}", e);
                Size::default()
            }
        }
    }
}
