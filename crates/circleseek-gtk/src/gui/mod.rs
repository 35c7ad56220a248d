pub mod app;
pub mod icons;
pub mod surface;
